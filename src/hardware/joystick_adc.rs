use embassy_stm32::adc::{Adc, AdcChannel, Instance};

use crate::joystick::JoystickSample;

/// Both stick axes on one ADC.
pub struct JoystickAdc<'d, T: Instance, X, Y> {
    adc: Adc<'d, T>,
    x: X,
    y: Y,
}

impl<'d, T, X, Y> JoystickAdc<'d, T, X, Y>
where
    T: Instance,
    X: AdcChannel<T>,
    Y: AdcChannel<T>,
{
    pub fn new(adc: Adc<'d, T>, x: X, y: Y) -> Self {
        Self { adc, x, y }
    }

    /// Convert X, then Y. Raw 12-bit values, no filtering.
    pub async fn sample(&mut self) -> JoystickSample {
        let x = self.adc.read(&mut self.x).await;
        let y = self.adc.read(&mut self.y).await;
        JoystickSample::new(x, y)
    }
}
