//! Red/blue brightness follows the stick; button A gates it.

use crate::hardware::traits::PwmLeds;
use crate::joystick::JoystickSample;

/// PWM levels for (red, blue). Samples pass straight through since the PWM
/// runs on the ADC's scale.
pub const fn pwm_levels(enabled: bool, sample: JoystickSample) -> (u16, u16) {
    if enabled { (sample.x, sample.y) } else { (0, 0) }
}

/// Push one tick's levels to the LEDs.
pub fn apply<P: PwmLeds>(leds: &mut P, enabled: bool, sample: JoystickSample) {
    let (red, blue) = pwm_levels(enabled, sample);
    leds.set_levels(red, blue);
}
