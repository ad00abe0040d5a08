use embassy_stm32::timer::GeneralInstance4Channel;
use embassy_stm32::timer::simple_pwm::SimplePwm;

use super::traits::PwmLeds;
use crate::config::PWM_WRAP;

/// Two LEDs on channels 1 and 2 of one general-purpose timer.
///
/// Levels are given on the `0..=PWM_WRAP` scale and mapped onto whatever
/// period the timer ended up with.
pub struct PwmLedPair<'d, T: GeneralInstance4Channel> {
    pwm: SimplePwm<'d, T>,
}

impl<'d, T: GeneralInstance4Channel> PwmLedPair<'d, T> {
    /// Takes a timer with channels 1 and 2 wired, enables both and starts dark.
    pub fn new(mut pwm: SimplePwm<'d, T>) -> Self {
        pwm.ch1().set_duty_cycle_fully_off();
        pwm.ch2().set_duty_cycle_fully_off();
        pwm.ch1().enable();
        pwm.ch2().enable();
        defmt::debug!("PWM LEDs ready, max duty {}", pwm.max_duty_cycle());

        Self { pwm }
    }
}

impl<'d, T: GeneralInstance4Channel> PwmLeds for PwmLedPair<'d, T> {
    fn set_levels(&mut self, first: u16, second: u16) {
        self.pwm
            .ch1()
            .set_duty_cycle_fraction(first.min(PWM_WRAP), PWM_WRAP);
        self.pwm
            .ch2()
            .set_duty_cycle_fraction(second.min(PWM_WRAP), PWM_WRAP);
    }
}
