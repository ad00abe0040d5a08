pub mod traits;

pub mod gpio_led;

#[cfg(feature = "async")]
pub mod gpio_button;

#[cfg(target_arch = "arm")]
pub mod joystick_adc;
#[cfg(target_arch = "arm")]
pub mod oled;
#[cfg(target_arch = "arm")]
pub mod pwm_leds;
