use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

pub trait Led {
    fn on(&mut self);
    fn off(&mut self);
    fn toggle(&mut self);

    fn set(&mut self, on: bool) {
        if on {
            self.on();
        } else {
            self.off();
        }
    }
}

/// Two PWM-dimmed LEDs driven from the same timer.
///
/// Levels run from 0 (off) to [`PWM_WRAP`](crate::config::PWM_WRAP) (fully on).
pub trait PwmLeds {
    fn set_levels(&mut self, first: u16, second: u16);
}

/// Monochrome frame buffer that is pushed to the panel in one go.
pub trait FrameDisplay: DrawTarget<Color = BinaryColor> + OriginDimensions {
    /// Transmit the whole buffer to the panel.
    fn send(&mut self) -> Result<(), Self::Error>;
}
