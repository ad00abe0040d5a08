use core::convert::Infallible;

use super::traits::Led;
use embedded_hal::digital::StatefulOutputPin;

/// LED on a plain GPIO, either polarity.
pub struct GpioLed<P> {
    pin: P,
    active_low: bool,
}

impl<P> GpioLed<P>
where
    P: StatefulOutputPin<Error = Infallible>,
{
    /// LED lights when the pin is high.
    pub fn active_high(pin: P) -> Self {
        Self {
            pin,
            active_low: false,
        }
    }

    /// LED lights when the pin is low (the Blue Pill's PC13 LED).
    pub fn active_low(pin: P) -> Self {
        Self {
            pin,
            active_low: true,
        }
    }

    pub fn is_on(&mut self) -> bool {
        let Ok(high) = self.pin.is_set_high();
        high != self.active_low
    }

    fn drive(&mut self, high: bool) {
        let Ok(()) = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
    }
}

impl<P> Led for GpioLed<P>
where
    P: StatefulOutputPin<Error = Infallible>,
{
    fn on(&mut self) {
        self.drive(!self.active_low);
    }

    fn off(&mut self) {
        self.drive(self.active_low);
    }

    fn toggle(&mut self) {
        let Ok(()) = self.pin.toggle();
    }
}
