//! Compile-time configuration.
//!
//! Wiring (Blue Pill):
//!
//! ```text
//!   Joystick VRx -> PA0 (ADC1_IN0)
//!   Joystick VRy -> PA1 (ADC1_IN1)
//!   Joystick SW  -> PB12 (EXTI12, pull-up)
//!   Button A     -> PB13 (EXTI13, pull-up)
//!   Red LED      -> PA6 (TIM3_CH1)
//!   Blue LED     -> PA7 (TIM3_CH2)
//!   Green LED    -> PB0
//!   OLED SCL     -> PB6 (I2C1)
//!   OLED SDA     -> PB7 (I2C1)
//! ```

use crate::input::DebounceScope;

/// Largest value of the 12-bit ADC.
pub const ADC_MAX: u16 = 4095;

/// PWM level that means fully on. Same scale as the ADC so samples pass straight through.
pub const PWM_WRAP: u16 = 4095;

/// Minimum spacing between two accepted button edges, in microseconds.
pub const DEBOUNCE_US: u64 = 350_000;

/// Whether the buttons share one debounce window.
pub const DEBOUNCE_SCOPE: DebounceScope = if cfg!(feature = "per-button-debounce") {
    DebounceScope::PerButton
} else {
    DebounceScope::Shared
};

/// Main loop sleep between ticks.
pub const TICK_MS: u64 = 50;

/// Settle time after reset before touching the peripherals.
pub const STARTUP_DELAY_MS: u64 = 100;

/// SSD1306 panel geometry.
pub const SCREEN_WIDTH: u32 = 128;
pub const SCREEN_HEIGHT: u32 = 64;

/// Side of the square that follows the stick.
pub const SQUARE_SIZE: u32 = 8;

/// Inset of the inner outline of the double border.
pub const DOUBLE_BORDER_INSET: u32 = 2;

/// External crystal on the Blue Pill.
pub const HSE_HZ: u32 = 8_000_000;

/// SYSCLK after the PLL (HSE x 9).
pub const SYSCLK_HZ: u32 = HSE_HZ * 9;

/// APB1 (SYSCLK / 2), which clocks I2C1 and TIM3.
pub const PCLK1_HZ: u32 = SYSCLK_HZ / 2;

/// I2C bus clock for the display.
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

/// SCL rate an I2C v1 peripheral actually produces in fast mode
/// (duty 2:1, CCR = pclk / (3 * speed), truncated).
pub const fn fast_mode_scl_hz(pclk_hz: u32, speed_hz: u32) -> u32 {
    let ccr = pclk_hz / (speed_hz * 3);
    pclk_hz / (ccr * 3)
}

/// 7-bit bus address of the display.
pub const SSD1306_I2C_ADDRESS: u8 = 0x3C;
