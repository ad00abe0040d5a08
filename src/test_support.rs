//! Host stand-ins for the board peripherals.

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use crate::hardware::traits::{FrameDisplay, Led, PwmLeds};

pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 64;

/// Error returned by [`TestDisplay::send`] while `fail_sends` is set.
#[derive(Debug, PartialEq, Eq)]
pub struct SendFailed;

/// 128x64 in-memory panel.
pub struct TestDisplay {
    pub pixels: [[bool; WIDTH]; HEIGHT],
    /// Copy of `pixels` taken at every successful `send`.
    pub sent: Vec<[[bool; WIDTH]; HEIGHT]>,
    pub fail_sends: bool,
}

impl TestDisplay {
    pub fn new() -> Self {
        Self {
            pixels: [[false; WIDTH]; HEIGHT],
            sent: Vec::new(),
            fail_sends: false,
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[y][x]
    }

    pub fn lit_count(&self) -> usize {
        self.pixels.iter().flatten().filter(|p| **p).count()
    }

    pub fn last_sent(&self) -> &[[bool; WIDTH]; HEIGHT] {
        self.sent.last().expect("nothing sent")
    }
}

impl OriginDimensions for TestDisplay {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for TestDisplay {
    type Color = BinaryColor;
    type Error = SendFailed;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if (0..WIDTH as i32).contains(&point.x) && (0..HEIGHT as i32).contains(&point.y) {
                self.pixels[point.y as usize][point.x as usize] = color.is_on();
            }
        }
        Ok(())
    }
}

impl FrameDisplay for TestDisplay {
    fn send(&mut self) -> Result<(), SendFailed> {
        if self.fail_sends {
            return Err(SendFailed);
        }
        self.sent.push(self.pixels);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingPwm {
    pub history: Vec<(u16, u16)>,
}

impl PwmLeds for RecordingPwm {
    fn set_levels(&mut self, first: u16, second: u16) {
        self.history.push((first, second));
    }
}

#[derive(Default)]
pub struct RecordingLed {
    pub lit: bool,
    pub writes: usize,
}

impl Led for RecordingLed {
    fn on(&mut self) {
        self.lit = true;
        self.writes += 1;
    }

    fn off(&mut self) {
        self.lit = false;
        self.writes += 1;
    }

    fn toggle(&mut self) {
        self.lit = !self.lit;
        self.writes += 1;
    }
}
