//! 8x8 bitmap font
//!
//! Each [`Glyph`] is eight row bytes, top row first, with the most
//! significant bit as the leftmost column. Lowercase letters share the
//! uppercase glyphs.
//!
//! ## Example
//!
//! ```
//! use blinkgrid::font;
//!
//! let a = font::glyph('a').map(|g| g.rows());
//! assert_eq!(a, font::glyph('A').map(|g| g.rows()));
//! assert!(font::glyph('~').is_none());
//! ```

use crate::config::{HEIGHT, WIDTH};

/// One character bitmap
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph([u8; HEIGHT]);

impl Glyph {
    /// Create a glyph from row bytes (MSB = leftmost column)
    pub const fn from_rows(rows: [u8; HEIGHT]) -> Self {
        Self(rows)
    }

    /// Row bytes, top first
    pub fn rows(&self) -> [u8; HEIGHT] {
        self.0
    }

    /// Whether the pixel at `(row, col)` is set
    ///
    /// Positions outside the 8x8 cell are unset.
    pub fn is_lit(&self, row: usize, col: usize) -> bool {
        row < HEIGHT && col < WIDTH && self.0[row] & (0x80 >> col) != 0
    }

    /// The bitmap as booleans, `[row][col]`
    pub fn to_bitmap(&self) -> [[bool; WIDTH]; HEIGHT] {
        let mut bitmap = [[false; WIDTH]; HEIGHT];
        for (row, cells) in bitmap.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = self.is_lit(row, col);
            }
        }
        bitmap
    }

    /// Number of set pixels
    pub fn lit_count(&self) -> u32 {
        self.0.iter().map(|row| row.count_ones()).sum()
    }
}

const fn g(rows: [u8; HEIGHT]) -> Glyph {
    Glyph::from_rows(rows)
}

/// Every glyph, sorted by character
pub const GLYPHS: &[(char, Glyph)] = &[
    (' ', g([0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00])),
    ('!', g([0x18, 0x18, 0x18, 0x18, 0x18, 0x00, 0x18, 0x00])),
    ('\'', g([0x18, 0x18, 0x30, 0x00, 0x00, 0x00, 0x00, 0x00])),
    (',', g([0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x30])),
    ('-', g([0x00, 0x00, 0x00, 0x7E, 0x00, 0x00, 0x00, 0x00])),
    ('.', g([0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x00])),
    ('0', g([0x3C, 0x66, 0x6E, 0x76, 0x66, 0x66, 0x3C, 0x00])),
    ('1', g([0x18, 0x38, 0x18, 0x18, 0x18, 0x18, 0x7E, 0x00])),
    ('2', g([0x3C, 0x66, 0x06, 0x0C, 0x30, 0x60, 0x7E, 0x00])),
    ('3', g([0x3C, 0x66, 0x06, 0x1C, 0x06, 0x66, 0x3C, 0x00])),
    ('4', g([0x06, 0x0E, 0x1E, 0x66, 0x7F, 0x06, 0x06, 0x00])),
    ('5', g([0x7E, 0x60, 0x7C, 0x06, 0x06, 0x66, 0x3C, 0x00])),
    ('6', g([0x3C, 0x66, 0x60, 0x7C, 0x66, 0x66, 0x3C, 0x00])),
    ('7', g([0x7E, 0x66, 0x0C, 0x18, 0x18, 0x18, 0x18, 0x00])),
    ('8', g([0x3C, 0x66, 0x66, 0x3C, 0x66, 0x66, 0x3C, 0x00])),
    ('9', g([0x3C, 0x66, 0x66, 0x3E, 0x06, 0x66, 0x3C, 0x00])),
    ('?', g([0x3C, 0x66, 0x06, 0x0C, 0x18, 0x00, 0x18, 0x00])),
    ('A', g([0x3C, 0x66, 0x66, 0x7E, 0x66, 0x66, 0x66, 0x00])),
    ('B', g([0x7C, 0x66, 0x66, 0x7C, 0x66, 0x66, 0x7C, 0x00])),
    ('C', g([0x3C, 0x66, 0x60, 0x60, 0x60, 0x66, 0x3C, 0x00])),
    ('D', g([0x78, 0x6C, 0x66, 0x66, 0x66, 0x6C, 0x78, 0x00])),
    ('E', g([0x7E, 0x60, 0x60, 0x78, 0x60, 0x60, 0x7E, 0x00])),
    ('F', g([0x7E, 0x60, 0x60, 0x78, 0x60, 0x60, 0x60, 0x00])),
    ('G', g([0x3C, 0x66, 0x60, 0x6E, 0x66, 0x66, 0x3C, 0x00])),
    ('H', g([0x66, 0x66, 0x66, 0x7E, 0x66, 0x66, 0x66, 0x00])),
    ('I', g([0x3C, 0x18, 0x18, 0x18, 0x18, 0x18, 0x3C, 0x00])),
    ('J', g([0x1E, 0x0C, 0x0C, 0x0C, 0x0C, 0x6C, 0x38, 0x00])),
    ('K', g([0x66, 0x6C, 0x78, 0x70, 0x78, 0x6C, 0x66, 0x00])),
    ('L', g([0x60, 0x60, 0x60, 0x60, 0x60, 0x60, 0x7E, 0x00])),
    ('M', g([0x63, 0x77, 0x7F, 0x6B, 0x63, 0x63, 0x63, 0x00])),
    ('N', g([0x66, 0x76, 0x7E, 0x7E, 0x6E, 0x66, 0x66, 0x00])),
    ('O', g([0x3C, 0x66, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x00])),
    ('P', g([0x7C, 0x66, 0x66, 0x7C, 0x60, 0x60, 0x60, 0x00])),
    ('Q', g([0x3C, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x0E, 0x00])),
    ('R', g([0x7C, 0x66, 0x66, 0x7C, 0x78, 0x6C, 0x66, 0x00])),
    ('S', g([0x3C, 0x66, 0x60, 0x3C, 0x06, 0x66, 0x3C, 0x00])),
    ('T', g([0x7E, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x00])),
    ('U', g([0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x00])),
    ('V', g([0x66, 0x66, 0x66, 0x66, 0x66, 0x3C, 0x18, 0x00])),
    ('W', g([0x63, 0x63, 0x63, 0x6B, 0x7F, 0x77, 0x63, 0x00])),
    ('X', g([0x66, 0x66, 0x3C, 0x18, 0x3C, 0x66, 0x66, 0x00])),
    ('Y', g([0x66, 0x66, 0x66, 0x3C, 0x18, 0x18, 0x18, 0x00])),
    ('Z', g([0x7E, 0x06, 0x0C, 0x18, 0x30, 0x60, 0x7E, 0x00])),
];

/// Look up the glyph for `c`
///
/// Lowercase ASCII letters map to their uppercase glyph. Returns `None` for
/// characters the font does not cover.
pub fn glyph(c: char) -> Option<Glyph> {
    let c = c.to_ascii_uppercase();
    GLYPHS
        .binary_search_by_key(&c, |(key, _)| *key)
        .ok()
        .map(|index| GLYPHS[index].1)
}
