//! Full-frame redraw: blank, square, border, send.

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
};

use crate::config::{DOUBLE_BORDER_INSET, SQUARE_SIZE};
use crate::hardware::traits::FrameDisplay;
use crate::joystick::SquarePosition;

/// Frame drawn around the screen edge, cycled by the joystick button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum BorderStyle {
    #[default]
    None,
    Single,
    Double,
}

impl BorderStyle {
    /// None -> Single -> Double -> None.
    pub const fn next(self) -> Self {
        match self {
            BorderStyle::None => BorderStyle::Single,
            BorderStyle::Single => BorderStyle::Double,
            BorderStyle::Double => BorderStyle::None,
        }
    }
}

/// Draw one frame into the display's buffer. Nothing is sent.
pub fn draw_frame<D>(
    display: &mut D,
    square: SquarePosition,
    border: BorderStyle,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor> + OriginDimensions,
{
    display.clear(BinaryColor::Off)?;

    Rectangle::new(square.top_left(), Size::new_equal(SQUARE_SIZE))
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(display)?;

    let outline = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
    let bounds = display.bounding_box();
    match border {
        BorderStyle::None => {}
        BorderStyle::Single => {
            bounds.into_styled(outline).draw(display)?;
        }
        BorderStyle::Double => {
            bounds.into_styled(outline).draw(display)?;
            bounds
                .offset(-(DOUBLE_BORDER_INSET as i32))
                .into_styled(outline)
                .draw(display)?;
        }
    }

    Ok(())
}

/// Draw a frame and transmit the whole buffer.
pub fn render<D: FrameDisplay>(
    display: &mut D,
    square: SquarePosition,
    border: BorderStyle,
) -> Result<(), D::Error> {
    draw_frame(display, square, border)?;
    display.send()
}
