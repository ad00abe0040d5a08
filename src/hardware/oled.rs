use embassy_stm32::i2c::I2c;
use embassy_stm32::mode::Blocking;
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
use ssd1306::{I2CDisplayInterface, Ssd1306, mode::BufferedGraphicsMode, prelude::*};

use super::traits::FrameDisplay;
use crate::config::SSD1306_I2C_ADDRESS;

/// The 128x64 panel in buffered mode on a blocking I2C bus.
pub type Oled<'d> = Ssd1306<
    I2CInterface<I2c<'d, Blocking>>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;

impl<'d> FrameDisplay for Oled<'d> {
    fn send(&mut self) -> Result<(), <Self as DrawTarget>::Error> {
        self.flush()
    }
}

/// Initialize and configure the panel, then push one blank frame.
pub fn init(i2c: I2c<'_, Blocking>) -> Result<Oled<'_>, <Oled<'_> as DrawTarget>::Error> {
    let interface = I2CDisplayInterface::new_custom_address(i2c, SSD1306_I2C_ADDRESS);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();

    display.init()?;
    display.clear(BinaryColor::Off)?;
    display.flush()?;
    defmt::info!("SSD1306 ready at {=u8:#x}", SSD1306_I2C_ADDRESS);

    Ok(display)
}
