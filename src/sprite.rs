//! Sprite sheet tiles
//!
//! The sheet is a single raster holding a 10x10 grid of 32x32 icons. Tile
//! `(big_r, big_c)` starts at a fixed offset plus `(size + gap) * index` on
//! each axis. A tile is reduced to 8x8 by taking the per-channel minimum of
//! each 4x4 block, then dimmed by integer division.
//!
//! ## Example
//!
//! ```
//! use blinkgrid::sprite::{self, FIRST_COL, FIRST_ROW, SKIP_ROWS, TILE_SIZE};
//!
//! assert_eq!(sprite::tile_origin(0, 0), Some((FIRST_ROW, FIRST_COL)));
//! assert_eq!(
//!     sprite::tile_origin(1, 0),
//!     Some((FIRST_ROW + TILE_SIZE + SKIP_ROWS, FIRST_COL))
//! );
//! assert_eq!(sprite::tile_origin(u32::MAX, 0), None);
//! ```

use std::path::Path;

use image::RgbImage;

use crate::config::{CHANNELS, HEIGHT};
use crate::error::SpriteError;
use crate::grid::{BLANK_FRAME, Frame};

/// Edge length of one tile in sheet pixels
pub const TILE_SIZE: u32 = 32;

/// Row of the first tile's top edge
pub const FIRST_ROW: u32 = 24;

/// Column of the first tile's left edge
pub const FIRST_COL: u32 = 5;

/// Vertical gap between tiles
pub const SKIP_ROWS: u32 = 16;

/// Horizontal gap between tiles
pub const SKIP_COLS: u32 = 20;

/// Edge length of the block reduced to one LED
pub const BLOCK_SIZE: u32 = TILE_SIZE / HEIGHT as u32;

/// Block minima are divided by this before display
pub const INTENSITY_DIVISOR: i32 = 20;

/// Tiles per sheet axis
pub const TILES_PER_AXIS: u32 = 10;

/// Sheet pixel `(row, col)` of a tile's top-left corner
///
/// Returns `None` if the position does not fit in `u32`.
pub fn tile_origin(big_r: u32, big_c: u32) -> Option<(u32, u32)> {
    let top = (TILE_SIZE + SKIP_ROWS)
        .checked_mul(big_r)?
        .checked_add(FIRST_ROW)?;
    let left = (TILE_SIZE + SKIP_COLS)
        .checked_mul(big_c)?
        .checked_add(FIRST_COL)?;
    Some((top, left))
}

/// Reduce the `TILE_SIZE` square at `origin` to a frame
///
/// The caller guarantees the square lies inside `image`.
fn downsample(image: &RgbImage, origin: (u32, u32)) -> Frame {
    let (top, left) = origin;
    let mut frame = BLANK_FRAME;
    for (row, cells) in frame.iter_mut().enumerate() {
        for (col, cell) in cells.iter_mut().enumerate() {
            let y0 = top + row as u32 * BLOCK_SIZE;
            let x0 = left + col as u32 * BLOCK_SIZE;
            let mut minimum = [u8::MAX; CHANNELS];
            for y in y0..y0 + BLOCK_SIZE {
                for x in x0..x0 + BLOCK_SIZE {
                    let pixel = image.get_pixel(x, y).0;
                    for (low, value) in minimum.iter_mut().zip(pixel) {
                        *low = (*low).min(value);
                    }
                }
            }
            *cell = minimum.map(|value| i32::from(value) / INTENSITY_DIVISOR);
        }
    }
    frame
}

/// A decoded sprite sheet
#[derive(Clone, Debug)]
pub struct SpriteSheet {
    image: RgbImage,
}

impl SpriteSheet {
    /// Load a sheet from an image file
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::Image`] if the file cannot be read or decoded.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SpriteError> {
        let image = image::open(path.as_ref())?.to_rgb8();
        log::debug!(
            "Loaded sprite sheet {} ({}x{})",
            path.as_ref().display(),
            image.width(),
            image.height()
        );
        Ok(Self { image })
    }

    /// Wrap an already decoded image
    pub fn from_image(image: RgbImage) -> Self {
        Self { image }
    }

    /// The underlying image
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Frame for tile `(big_r, big_c)`
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::TileOutOfBounds`] if the tile does not lie
    /// inside the image.
    pub fn tile(&self, big_r: u32, big_c: u32) -> Result<Frame, SpriteError> {
        let (width, height) = self.image.dimensions();
        let out_of_bounds = SpriteError::TileOutOfBounds {
            big_r,
            big_c,
            width,
            height,
        };
        let Some((top, left)) = tile_origin(big_r, big_c) else {
            return Err(out_of_bounds);
        };
        let fits = |start: u32, limit: u32| {
            start
                .checked_add(TILE_SIZE)
                .is_some_and(|end| end <= limit)
        };
        if !fits(top, height) || !fits(left, width) {
            return Err(out_of_bounds);
        }
        Ok(downsample(&self.image, (top, left)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    /// Smallest sheet that holds every tile
    fn full_sheet() -> RgbImage {
        let (bottom, right) = tile_origin(TILES_PER_AXIS - 1, TILES_PER_AXIS - 1).unwrap();
        RgbImage::from_pixel(right + TILE_SIZE, bottom + TILE_SIZE, Rgb([200, 100, 40]))
    }

    #[test]
    fn test_tile_origin_literals() {
        assert_eq!(tile_origin(0, 0), Some((24, 5)));
        assert_eq!(tile_origin(1, 0), Some((24 + 32 + 16, 5)));
        assert_eq!(tile_origin(0, 1), Some((24, 5 + 32 + 20)));
        assert_eq!(tile_origin(2, 3), Some((24 + 2 * 48, 5 + 3 * 52)));
    }

    #[test]
    fn test_block_size() {
        assert_eq!(BLOCK_SIZE, 4);
    }

    #[test]
    fn test_uniform_tile_is_scaled() {
        let sheet = SpriteSheet::from_image(full_sheet());
        let frame = sheet.tile(3, 4).unwrap();
        assert!(frame.iter().flatten().all(|cell| *cell == [10, 5, 2]));
    }

    #[test]
    fn test_block_minimum_per_channel() {
        let mut image = full_sheet();
        let (top, left) = tile_origin(0, 0).unwrap();
        // Block (0, 0): one dark red pixel, one dark blue pixel
        image.put_pixel(left + 1, top + 2, Rgb([0, 100, 40]));
        image.put_pixel(left + 3, top + 3, Rgb([200, 100, 19]));
        // Block (7, 7): bottom-right corner of the tile
        image.put_pixel(left + 31, top + 31, Rgb([60, 60, 60]));
        // Just outside the tile, must not leak in
        image.put_pixel(left + 32, top, Rgb([0, 0, 0]));

        let frame = SpriteSheet::from_image(image).tile(0, 0).unwrap();

        assert_eq!(frame[0][0], [0, 5, 0]);
        assert_eq!(frame[7][7], [3, 3, 2]);
        assert_eq!(frame[0][7], [10, 5, 2]);
    }

    #[test]
    fn test_tile_out_of_bounds() {
        let sheet = SpriteSheet::from_image(RgbImage::new(64, 64));
        let result = sheet.tile(1, 0);
        assert!(matches!(
            result,
            Err(SpriteError::TileOutOfBounds {
                big_r: 1,
                big_c: 0,
                width: 64,
                height: 64
            })
        ));
    }

    #[test]
    fn test_tile_origin_overflow() {
        assert_eq!(tile_origin(u32::MAX, 0), None);
        assert_eq!(tile_origin(0, u32::MAX), None);
        // Largest row index whose origin still fits
        let last = (u32::MAX - FIRST_ROW) / (TILE_SIZE + SKIP_ROWS);
        assert!(tile_origin(last, 0).is_some());
        assert_eq!(tile_origin(last + 1, 0), None);
    }

    #[test]
    fn test_huge_tile_index_is_out_of_bounds() {
        let sheet = SpriteSheet::from_image(RgbImage::new(64, 64));
        for (big_r, big_c) in [(100_000_000, 0), (89_478_486, 0), (0, u32::MAX)] {
            assert!(matches!(
                sheet.tile(big_r, big_c),
                Err(SpriteError::TileOutOfBounds { .. })
            ));
        }
    }

    #[test]
    fn test_open_missing_file() {
        let result = SpriteSheet::open("does/not/exist.png");
        assert!(matches!(result, Err(SpriteError::Image(_))));
    }
}
