//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`]),
//! grid operations ([`Error`]) and sprite sheet access ([`SpriteError`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors while updating the grid or running a routine
//! - [`SpriteError`] - Image loading and tile lookup errors (requires `std`)
//! - [`DeviceError`](crate::blinkstick::DeviceError) - USB/HID errors (requires `std`)
//!
//! Channel values outside `0..=255` are never an error; they are clamped.
//!
//! ## Example
//!
//! ```
//! use blinkgrid::{Builder, BuilderError};
//!
//! // Channel 7 does not exist on a BlinkStick Pro
//! let result = Builder::new().channel(7).build();
//! assert!(matches!(result, Err(BuilderError::InvalidChannel { channel: 7 })));
//! ```

use crate::config::{MAX_CHANNEL, MIN_WRITE_DELAY_US};
use crate::interface::LedInterface;

/// Errors that can occur when driving the grid
///
/// Generic over the interface type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<I: LedInterface> {
    /// Interface error (USB/HID)
    ///
    /// Wraps the underlying hardware error from the [`LedInterface`] implementation.
    Interface(I::Error),
    /// Input does not have the shape of the target
    ShapeMismatch {
        /// Number of values required
        expected: usize,
        /// Number of values provided
        provided: usize,
    },
    /// Region is empty or does not fit inside the 8x8 grid
    InvalidRegion {
        /// First row
        row: usize,
        /// First column
        col: usize,
        /// Number of rows
        height: usize,
        /// Number of columns
        width: usize,
    },
    /// Character has no glyph in the font
    UnknownGlyph(char),
    /// Sprite sheet error
    #[cfg(feature = "std")]
    Sprite(SpriteError),
}

impl<I: LedInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
            Self::ShapeMismatch { expected, provided } => {
                write!(
                    f,
                    "Shape mismatch: expected {expected} values, provided {provided}"
                )
            }
            Self::InvalidRegion {
                row,
                col,
                height,
                width,
            } => write!(
                f,
                "Invalid region: row={row}, col={col}, height={height}, width={width}"
            ),
            Self::UnknownGlyph(c) => write!(f, "No glyph for character {c:?}"),
            #[cfg(feature = "std")]
            Self::Sprite(e) => write!(f, "Sprite error: {e}"),
        }
    }
}

impl<I: LedInterface + core::fmt::Debug> core::error::Error for Error<I> {}

#[cfg(feature = "std")]
impl<I: LedInterface> From<SpriteError> for Error<I> {
    fn from(e: SpriteError) -> Self {
        Self::Sprite(e)
    }
}

/// Errors that can occur when building configuration
#[derive(Debug)]
pub enum BuilderError {
    /// LED channel does not exist on the controller
    InvalidChannel {
        /// Channel requested
        channel: u8,
    },
    /// Write delay is below the controller's minimum
    WriteDelayTooShort {
        /// Delay requested, in microseconds
        micros: u32,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidChannel { channel } => {
                write!(f, "Invalid channel {channel} (max {MAX_CHANNEL})")
            }
            Self::WriteDelayTooShort { micros } => write!(
                f,
                "Write delay {micros}us is below the minimum of {MIN_WRITE_DELAY_US}us"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}

/// Errors that can occur when reading tiles from a sprite sheet
#[cfg(feature = "std")]
#[derive(Debug)]
pub enum SpriteError {
    /// The image file could not be opened or decoded
    Image(image::ImageError),
    /// The tile does not lie inside the image
    TileOutOfBounds {
        /// Tile row
        big_r: u32,
        /// Tile column
        big_c: u32,
        /// Image width in pixels
        width: u32,
        /// Image height in pixels
        height: u32,
    },
}

#[cfg(feature = "std")]
impl core::fmt::Display for SpriteError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Image(e) => write!(f, "Image error: {e}"),
            Self::TileOutOfBounds {
                big_r,
                big_c,
                width,
                height,
            } => write!(
                f,
                "Tile ({big_r}, {big_c}) lies outside the {width}x{height} sprite sheet"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl core::error::Error for SpriteError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Image(e) => Some(e),
            Self::TileOutOfBounds { .. } => None,
        }
    }
}

#[cfg(feature = "std")]
impl From<image::ImageError> for SpriteError {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e)
    }
}
