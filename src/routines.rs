//! Playback loops that drive a [`Grid`]
//!
//! Each routine shows a sequence of frames with a fixed sleep between them and
//! returns the number of frames shown. Sequences wrap around, so with
//! [`FrameLimit::Unbounded`] a routine only returns on error.
//!
//! | Routine            | Frames                              | Interval   |
//! |--------------------|-------------------------------------|------------|
//! | [`cycle_tiles`]    | Sprite tiles, row-major             | 1000 ms    |
//! | [`cycle_glyphs`]   | Every glyph, sorted, binary         | 500 ms     |
//! | [`scroll_message`] | Message letters, random color each  | 300 ms     |
//! | [`run_life`]       | Game of Life ticks                  | 20 ms      |
//!
//! ## Example
//!
//! ```
//! use blinkgrid::routines::FrameLimit;
//!
//! assert!(FrameLimit::Frames(2).allows(1));
//! assert!(!FrameLimit::Frames(2).allows(2));
//! assert!(FrameLimit::Unbounded.allows(u64::MAX));
//! ```

use embedded_hal::delay::DelayNs;
use rand::Rng;

use crate::error::Error;
use crate::font::{self, GLYPHS};
use crate::grid::Grid;
use crate::interface::LedInterface;
use crate::life::{Life, TICK_INTERVAL_MS, TickOutcome};
use crate::pattern;
#[cfg(feature = "std")]
use crate::sprite::{SpriteSheet, TILES_PER_AXIS};

type RoutineResult<T, I> = core::result::Result<T, Error<I>>;

/// Sleep between sprite tiles
pub const TILE_INTERVAL_MS: u32 = 1_000;

/// Sleep between glyphs
pub const GLYPH_INTERVAL_MS: u32 = 500;

/// Sleep between message letters
pub const MESSAGE_INTERVAL_MS: u32 = 300;

/// How many frames a routine may show
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FrameLimit {
    /// Run until an error occurs
    #[default]
    Unbounded,
    /// Stop after this many frames
    Frames(u64),
}

impl FrameLimit {
    /// Whether another frame may be shown after `shown` frames
    pub fn allows(self, shown: u64) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Frames(limit) => shown < limit,
        }
    }
}

impl From<Option<u64>> for FrameLimit {
    fn from(frames: Option<u64>) -> Self {
        frames.map_or(Self::Unbounded, Self::Frames)
    }
}

/// Show one sprite tile
///
/// Returns the number of LEDs written.
///
/// # Errors
///
/// Returns [`Error::Sprite`] if the tile is outside the sheet, or
/// [`Error::Interface`] if a write fails.
#[cfg(feature = "std")]
pub fn render_tile<I, D>(
    grid: &mut Grid<I>,
    sheet: &SpriteSheet,
    big_r: u32,
    big_c: u32,
    delay: &mut D,
) -> RoutineResult<usize, I>
where
    I: LedInterface,
    D: DelayNs,
{
    let frame = sheet.tile(big_r, big_c)?;
    log::debug!("Showing tile ({big_r}, {big_c})");
    grid.update(&frame, delay)
}

/// Show every tile of the sheet in row-major order
///
/// # Errors
///
/// Returns [`Error::Sprite`] if the sheet is smaller than a full 10x10 grid
/// of tiles, or [`Error::Interface`] if a write fails.
#[cfg(feature = "std")]
pub fn cycle_tiles<I, D>(
    grid: &mut Grid<I>,
    sheet: &SpriteSheet,
    limit: FrameLimit,
    interval_ms: u32,
    delay: &mut D,
) -> RoutineResult<u64, I>
where
    I: LedInterface,
    D: DelayNs,
{
    let tiles = (0..TILES_PER_AXIS).flat_map(|r| (0..TILES_PER_AXIS).map(move |c| (r, c)));

    let mut shown = 0;
    for (big_r, big_c) in tiles.cycle() {
        if !limit.allows(shown) {
            break;
        }
        render_tile(grid, sheet, big_r, big_c, delay)?;
        delay.delay_ms(interval_ms);
        shown += 1;
    }
    Ok(shown)
}

/// Show every glyph of the font in character order at glyph intensity
///
/// # Errors
///
/// Returns [`Error::Interface`] if a write fails.
pub fn cycle_glyphs<I, D>(
    grid: &mut Grid<I>,
    limit: FrameLimit,
    delay: &mut D,
) -> RoutineResult<u64, I>
where
    I: LedInterface,
    D: DelayNs,
{
    let mut shown = 0;
    for (c, glyph) in GLYPHS.iter().cycle() {
        if !limit.allows(shown) {
            break;
        }
        log::debug!("Showing glyph {c:?}");
        grid.update(&pattern::binary_frame(glyph), delay)?;
        delay.delay_ms(GLYPH_INTERVAL_MS);
        shown += 1;
    }
    Ok(shown)
}

/// Show `message` one letter at a time, each in a random color
///
/// Every character is checked against the font before anything is shown. An
/// empty message shows nothing.
///
/// # Errors
///
/// Returns [`Error::UnknownGlyph`] for the first character without a glyph,
/// or [`Error::Interface`] if a write fails.
pub fn scroll_message<I, D, R>(
    grid: &mut Grid<I>,
    message: &str,
    rng: &mut R,
    limit: FrameLimit,
    delay: &mut D,
) -> RoutineResult<u64, I>
where
    I: LedInterface,
    D: DelayNs,
    R: Rng + ?Sized,
{
    if let Some(c) = message.chars().find(|c| font::glyph(*c).is_none()) {
        return Err(Error::UnknownGlyph(c));
    }

    let mut shown = 0;
    for glyph in message.chars().filter_map(font::glyph).cycle() {
        if !limit.allows(shown) {
            break;
        }
        grid.update(&pattern::random_colored_frame(&glyph, rng), delay)?;
        delay.delay_ms(MESSAGE_INTERVAL_MS);
        shown += 1;
    }
    Ok(shown)
}

/// Tick the simulation until the limit is reached
///
/// # Errors
///
/// Returns [`Error::Interface`] if a write fails.
pub fn run_life<I, D, R>(
    grid: &mut Grid<I>,
    life: &mut Life<R>,
    limit: FrameLimit,
    delay: &mut D,
) -> RoutineResult<u64, I>
where
    I: LedInterface,
    D: DelayNs,
    R: Rng,
{
    let mut shown = 0;
    while limit.allows(shown) {
        if life.tick(grid, delay)? == TickOutcome::Restarted {
            log::info!("Life restarted after {shown} ticks");
        }
        delay.delay_ms(TICK_INTERVAL_MS);
        shown += 1;
    }
    Ok(shown)
}
