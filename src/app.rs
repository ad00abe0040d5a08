//! The per-tick control loop.
//!
//! Each tick: drive the PWM LEDs from the sample, consume the button flags
//! and apply their toggles, then redraw and send the frame. Sampling and the
//! fixed delay between ticks belong to the caller.

use crate::hardware::traits::{FrameDisplay, Led, PwmLeds};
use crate::input::{ButtonId, InputEvents};
use crate::joystick::{JoystickSample, SquarePosition};
use crate::leds;
use crate::render::{self, BorderStyle};

/// Everything that changes in response to button presses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct AppState {
    pub border: BorderStyle,
    /// Whether the red/blue LEDs follow the stick.
    pub leds_enabled: bool,
    pub green_led_on: bool,
}

impl AppState {
    pub const fn new() -> Self {
        Self {
            border: BorderStyle::None,
            leds_enabled: true,
            green_led_on: false,
        }
    }

    /// Joystick button: flip the green LED and move to the next border.
    pub fn on_joystick_press(&mut self) {
        self.green_led_on = !self.green_led_on;
        self.border = self.border.next();
    }

    /// Button A: turn stick-driven brightness on or off.
    pub fn on_button_a_press(&mut self) {
        self.leds_enabled = !self.leds_enabled;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// What one tick did, for logging.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct TickReport {
    pub square: Option<SquarePosition>,
    /// New border and green LED state if the joystick button was handled.
    pub joystick_press: Option<(BorderStyle, bool)>,
    /// New LED enable state if button A was handled.
    pub button_a_press: Option<bool>,
}

/// Owns the loop state and the output peripherals.
pub struct Controller<'a, P, G, D> {
    state: AppState,
    pwm_leds: P,
    green_led: G,
    display: D,
    events: &'a InputEvents,
}

impl<'a, P, G, D> Controller<'a, P, G, D>
where
    P: PwmLeds,
    G: Led,
    D: FrameDisplay,
{
    /// Takes the peripherals and writes the initial green LED state (off).
    ///
    /// `events` is the state shared with the button edge handlers; the
    /// controller only ever consumes flags from it.
    pub fn new(pwm_leds: P, mut green_led: G, display: D, events: &'a InputEvents) -> Self {
        let state = AppState::new();
        green_led.set(state.green_led_on);

        Self {
            state,
            pwm_leds,
            green_led,
            display,
            events,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run one tick with a fresh joystick sample.
    ///
    /// Order within a tick:
    /// 1. drive the red/blue LEDs from `sample` (or zero them when disabled)
    /// 2. consume a joystick press: toggle the green LED, advance the border
    /// 3. consume a button A press: flip the LED enable
    /// 4. draw the square and border, then send the frame
    ///
    /// The LEDs are driven before the buttons are looked at, so a button A
    /// press only affects brightness from the next tick on.
    ///
    /// # Errors
    ///
    /// Returns the display's error when drawing or sending fails. Button
    /// presses consumed in this tick stay applied, and the next tick redraws
    /// the whole frame.
    pub fn tick(&mut self, sample: JoystickSample) -> Result<TickReport, D::Error> {
        let mut report = TickReport::default();

        leds::apply(&mut self.pwm_leds, self.state.leds_enabled, sample);

        if self.events.take(ButtonId::Joystick) {
            self.state.on_joystick_press();
            self.green_led.set(self.state.green_led_on);
            report.joystick_press = Some((self.state.border, self.state.green_led_on));
        }

        if self.events.take(ButtonId::A) {
            self.state.on_button_a_press();
            report.button_a_press = Some(self.state.leds_enabled);
        }

        let square = SquarePosition::from_sample(sample, self.display.size());
        render::render(&mut self.display, square, self.state.border)?;
        report.square = Some(square);

        Ok(report)
    }

    pub fn display(&self) -> &D {
        &self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::DebounceScope;
    use crate::test_support::{RecordingLed, RecordingPwm, SendFailed, TestDisplay};

    const WINDOW: u64 = 350_000;

    type TestController<'a> = Controller<'a, RecordingPwm, RecordingLed, TestDisplay>;

    fn controller(events: &InputEvents) -> TestController<'_> {
        Controller::new(
            RecordingPwm::default(),
            RecordingLed::default(),
            TestDisplay::new(),
            events,
        )
    }

    #[test]
    fn test_initial_state() {
        let state = AppState::default();
        assert_eq!(state.border, BorderStyle::None);
        assert!(state.leds_enabled);
        assert!(!state.green_led_on);
    }

    #[test]
    fn test_new_writes_green_led() {
        let events = InputEvents::new(WINDOW, DebounceScope::Shared);
        let c = controller(&events);
        assert_eq!(c.green_led.writes, 1);
        assert!(!c.green_led.lit);
    }

    #[test]
    fn test_idle_tick() {
        let events = InputEvents::new(WINDOW, DebounceScope::Shared);
        let mut c = controller(&events);

        let report = c.tick(JoystickSample::new(0, 0)).unwrap();

        assert_eq!(report.joystick_press, None);
        assert_eq!(report.button_a_press, None);
        assert_eq!(report.square, Some(SquarePosition { pos_x: 56, pos_y: 0 }));
        assert_eq!(c.pwm_leds.history, vec![(0, 0)]);
        assert_eq!(c.green_led.writes, 1);
        assert_eq!(c.display().sent.len(), 1);
        assert!(c.display().pixel(0, 63));
    }

    #[test]
    fn test_far_corner_end_to_end() {
        let events = InputEvents::new(WINDOW, DebounceScope::Shared);
        let mut c = controller(&events);

        let report = c.tick(JoystickSample::new(4095, 4095)).unwrap();

        assert_eq!(report.square, Some(SquarePosition { pos_x: 0, pos_y: 120 }));
        assert_eq!(c.pwm_leds.history, vec![(4095, 4095)]);
        assert!(c.display().last_sent()[0][120]);
        assert!(c.display().last_sent()[7][127]);
    }

    #[test]
    fn test_joystick_press_cycles_border_and_green_led() {
        let events = InputEvents::new(WINDOW, DebounceScope::Shared);
        let mut c = controller(&events);
        let sample = JoystickSample::new(2048, 2048);

        let expected = [
            (BorderStyle::Single, true),
            (BorderStyle::Double, false),
            (BorderStyle::None, true),
        ];
        for (i, want) in expected.into_iter().enumerate() {
            let now = 1_000_000 * (i as u64 + 1);
            assert!(events.on_falling_edge(ButtonId::Joystick, now));
            let report = c.tick(sample).unwrap();
            assert_eq!(report.joystick_press, Some(want));
            assert_eq!(c.state().border, want.0);
            assert_eq!(c.green_led.lit, want.1);
        }
        assert_eq!(c.green_led.writes, 4);

        // flag was consumed
        let report = c.tick(sample).unwrap();
        assert_eq!(report.joystick_press, None);
        assert_eq!(c.state().border, BorderStyle::None);
    }

    #[test]
    fn test_border_is_visible_in_sent_frame() {
        let events = InputEvents::new(WINDOW, DebounceScope::Shared);
        let mut c = controller(&events);

        assert!(events.on_falling_edge(ButtonId::Joystick, 1_000_000));
        c.tick(JoystickSample::new(2048, 2048)).unwrap();

        let frame = c.display().last_sent();
        assert!(frame[0][0] && frame[63][127]);
        assert!(!frame[2][2]);
    }

    #[test]
    fn test_button_a_gates_leds_from_next_tick() {
        let events = InputEvents::new(WINDOW, DebounceScope::Shared);
        let mut c = controller(&events);
        let sample = JoystickSample::new(1234, 3210);

        assert!(events.on_falling_edge(ButtonId::A, 1_000_000));
        let report = c.tick(sample).unwrap();
        assert_eq!(report.button_a_press, Some(false));
        c.tick(sample).unwrap();

        assert!(events.on_falling_edge(ButtonId::A, 2_000_000));
        let report = c.tick(sample).unwrap();
        assert_eq!(report.button_a_press, Some(true));
        c.tick(sample).unwrap();

        assert_eq!(
            c.pwm_leds.history,
            vec![(1234, 3210), (0, 0), (0, 0), (1234, 3210)]
        );
        // button A never touches the green LED or the border
        assert_eq!(c.green_led.writes, 1);
        assert_eq!(c.state().border, BorderStyle::None);
    }

    #[test]
    fn test_shared_window_drops_cross_press() {
        let events = InputEvents::new(WINDOW, DebounceScope::Shared);
        let mut c = controller(&events);

        assert!(events.on_falling_edge(ButtonId::Joystick, 1_000_000));
        assert!(!events.on_falling_edge(ButtonId::A, 1_200_000));
        let report = c.tick(JoystickSample::default()).unwrap();

        assert!(report.joystick_press.is_some());
        assert_eq!(report.button_a_press, None);
        assert!(c.state().leds_enabled);
    }

    #[test]
    fn test_both_buttons_in_one_tick() {
        let events = InputEvents::new(WINDOW, DebounceScope::PerButton);
        let mut c = controller(&events);

        assert!(events.on_falling_edge(ButtonId::Joystick, 1_000_000));
        assert!(events.on_falling_edge(ButtonId::A, 1_100_000));
        let report = c.tick(JoystickSample::default()).unwrap();

        assert_eq!(report.joystick_press, Some((BorderStyle::Single, true)));
        assert_eq!(report.button_a_press, Some(false));
    }

    #[test]
    fn test_failed_send_keeps_consumed_press() {
        let events = InputEvents::new(WINDOW, DebounceScope::Shared);
        let mut c = controller(&events);
        let sample = JoystickSample::new(2048, 2048);

        c.display.fail_sends = true;
        assert!(events.on_falling_edge(ButtonId::Joystick, 1_000_000));
        assert_eq!(c.tick(sample), Err(SendFailed));
        assert_eq!(c.state().border, BorderStyle::Single);
        assert!(c.green_led.lit);
        assert!(!events.is_pending(ButtonId::Joystick));
        assert_eq!(c.pwm_leds.history, vec![(2048, 2048)]);

        // next tick redraws with the new border and no second toggle
        c.display.fail_sends = false;
        let report = c.tick(sample).unwrap();
        assert_eq!(report.joystick_press, None);
        assert!(c.display().last_sent()[0][0]);
        assert_eq!(c.green_led.writes, 2);
    }
}
