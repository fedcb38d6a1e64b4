//! Frames built from font glyphs

use rand::Rng;

use crate::config::CHANNELS;
use crate::font::Glyph;
use crate::grid::{BLANK_FRAME, Frame};

/// Channel value of a lit pixel in a binary frame
pub const GLYPH_INTENSITY: i32 = 1;

/// Exclusive upper bound of each channel of a random message color
pub const MESSAGE_COLOR_LIMIT: i32 = 20;

/// Lit pixels get `color`, unlit pixels stay black
pub fn colored_frame(glyph: &Glyph, color: [i32; CHANNELS]) -> Frame {
    let mut frame = BLANK_FRAME;
    for (row, cells) in frame.iter_mut().enumerate() {
        for (col, cell) in cells.iter_mut().enumerate() {
            if glyph.is_lit(row, col) {
                *cell = color;
            }
        }
    }
    frame
}

/// Lit pixels at [`GLYPH_INTENSITY`] on every channel
pub fn binary_frame(glyph: &Glyph) -> Frame {
    colored_frame(glyph, [GLYPH_INTENSITY; CHANNELS])
}

/// One random color for all lit pixels
pub fn random_colored_frame<R: Rng + ?Sized>(glyph: &Glyph, rng: &mut R) -> Frame {
    let color = core::array::from_fn(|_| rng.gen_range(0..MESSAGE_COLOR_LIMIT));
    colored_frame(glyph, color)
}
