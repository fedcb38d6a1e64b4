//! Graphics support via embedded-graphics
//!
//! This module provides [`Canvas`], an 8x8 [`Frame`] that implements the
//! [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) trait from
//! the embedded-graphics ecosystem. Draw into it, then push the result
//! through [`Grid::update`](crate::grid::Grid::update).
//!
//! ## Example
//!
//! ```
//! use embedded_graphics::{
//!     pixelcolor::Rgb888,
//!     prelude::*,
//!     primitives::{Line, PrimitiveStyle},
//! };
//! use blinkgrid::Canvas;
//!
//! let mut canvas = Canvas::new();
//! let _ = Line::new(Point::new(0, 0), Point::new(7, 7))
//!     .into_styled(PrimitiveStyle::with_stroke(Rgb888::new(0, 30, 0), 1))
//!     .draw(&mut canvas);
//!
//! let frame = canvas.into_frame();
//! assert_eq!(frame[3][3], [0, 30, 0]);
//! assert_eq!(frame[3][4], [0, 0, 0]);
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::Rgb888,
    prelude::Pixel,
};

use crate::color::Color;
use crate::config::{HEIGHT, WIDTH};
use crate::grid::{BLANK_FRAME, Frame};

/// Drawable 8x8 frame
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    frame: Frame,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// A blank canvas
    pub fn new() -> Self {
        Self { frame: BLANK_FRAME }
    }

    /// Start from an existing frame
    pub fn from_frame(frame: Frame) -> Self {
        Self { frame }
    }

    /// The drawn frame
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Consume the canvas
    pub fn into_frame(self) -> Frame {
        self.frame
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }

            let (col, row) = (x as usize, y as usize);
            if col >= WIDTH || row >= HEIGHT {
                continue;
            }

            self.frame[row][col] = Color::from(color).to_channels();
        }

        Ok(())
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Builder;
    use crate::grid::Grid;
    use crate::interface::Mode;
    use crate::mock::{MockDelay, MockInterface};
    use embedded_graphics::{
        prelude::*,
        primitives::{PrimitiveStyle, Rectangle},
    };

    #[test]
    fn test_canvas_size() {
        assert_eq!(Canvas::new().size(), Size::new(8, 8));
    }

    #[test]
    fn test_out_of_range_pixels_are_clipped() {
        let mut canvas = Canvas::new();
        let pixels = [
            Pixel(Point::new(-1, 0), Rgb888::WHITE),
            Pixel(Point::new(0, 8), Rgb888::WHITE),
            Pixel(Point::new(8, 0), Rgb888::WHITE),
            Pixel(Point::new(7, 7), Rgb888::WHITE),
        ];
        canvas.draw_iter(pixels).unwrap();

        let lit = canvas.frame().iter().flatten().filter(|c| **c != [0; 3]).count();
        assert_eq!(lit, 1);
        assert_eq!(canvas.frame()[7][7], [255, 255, 255]);
    }

    #[test]
    fn test_filled_rectangle_reaches_grid() {
        let mut canvas = Canvas::new();
        Rectangle::new(Point::new(2, 1), Size::new(3, 2))
            .into_styled(PrimitiveStyle::with_fill(Rgb888::new(5, 0, 9)))
            .draw(&mut canvas)
            .unwrap();

        let config = Builder::new().build().unwrap();
        let mut delay = MockDelay::default();
        let mut grid =
            Grid::new(MockInterface::new(Mode::Addressable), config, &mut delay).unwrap();
        grid.interface_mut().writes.clear();

        let writes = grid.update(canvas.frame(), &mut delay).unwrap();

        assert_eq!(writes, 6);
        assert_eq!(
            grid.interface_mut().take_indices(),
            alloc::vec![10, 11, 12, 18, 19, 20]
        );
        assert_eq!(grid.pixel(2, 4), Some(Color::new(5, 0, 9)));
    }

    #[test]
    fn test_clear_fills_every_pixel() {
        let mut canvas = Canvas::new();
        canvas.clear(Rgb888::new(1, 2, 3)).unwrap();
        assert!(canvas.frame().iter().flatten().all(|c| *c == [1, 2, 3]));
    }
}
