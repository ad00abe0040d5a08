use core::convert::Infallible;

use embedded_hal_async::digital::Wait;

/// Active-low push button on an interrupt-capable pin (pull-up enabled).
pub struct GpioButton<P> {
    pin: P,
}

impl<P> GpioButton<P>
where
    P: Wait<Error = Infallible>,
{
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Sleep until the next falling edge, i.e. the next press.
    ///
    /// The edge interrupt is only armed while this future is pending.
    pub async fn wait_for_press(&mut self) {
        let Ok(()) = self.pin.wait_for_falling_edge().await;
    }
}
