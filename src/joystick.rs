//! Joystick samples and where they put the square on screen.

use embedded_graphics::prelude::{Point, Size};

use crate::config::{ADC_MAX, SQUARE_SIZE};

/// One raw reading of both stick axes, 0..=4095 each.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct JoystickSample {
    pub x: u16,
    pub y: u16,
}

impl JoystickSample {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Placement of the square for one tick.
///
/// The stick sits a quarter turn from the panel, so its X axis moves the
/// square up and down and its Y axis moves it left and right. `pos_x` is the
/// row of the square's top edge, `pos_y` the column of its left edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct SquarePosition {
    pub pos_x: i32,
    pub pos_y: i32,
}

impl SquarePosition {
    /// Scale a sample into the area the square can occupy on a display of
    /// `display` size. X is inverted, Y is not.
    pub fn from_sample(sample: JoystickSample, display: Size) -> Self {
        let max_x_pos = (display.height - SQUARE_SIZE) as i32;
        let max_y_pos = (display.width - SQUARE_SIZE) as i32;

        Self {
            pos_x: max_x_pos - scale(sample.x, max_x_pos),
            pos_y: scale(sample.y, max_y_pos),
        }
    }

    /// Top-left corner in display coordinates.
    pub fn top_left(&self) -> Point {
        Point::new(self.pos_y, self.pos_x)
    }
}

fn scale(raw: u16, max_pos: i32) -> i32 {
    (i32::from(raw) * max_pos) / i32::from(ADC_MAX)
}
