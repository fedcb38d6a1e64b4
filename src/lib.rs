//! BlinkStick 8x8 LED Grid Driver
//!
//! A driver and pattern player for an 8x8 WS2812 RGB matrix hung off a
//! BlinkStick Pro channel.
//!
//! ## Features
//!
//! - Diff updates: only LEDs whose color changed are written
//! - Channel clamping: any `i32` value is accepted and clamped to `0..=255`
//! - Configurable inter-write delay (at least 2 ms, the controller's limit)
//! - Sprite sheet tiles, an 8x8 font and Conway's Game of Life
//! - `no_std` compatible core with `embedded-hal` v1.0 delays
//! - `embedded-graphics` integration (with `graphics` feature)
//! - USB HID backend and a command line player (with `std` feature)
//!
//! ## Usage
//!
//! ```rust
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use blinkgrid::{BLANK_FRAME, Builder, Color, Grid, LedInterface, Mode};
//!
//! # #[derive(Debug)]
//! # struct Strip(Mode, usize);
//! # impl LedInterface for Strip {
//! #     type Error = Infallible;
//! #     fn mode(&mut self) -> Result<Mode, Infallible> { Ok(self.0) }
//! #     fn set_mode(&mut self, mode: Mode) -> Result<(), Infallible> { self.0 = mode; Ok(()) }
//! #     fn set_color(&mut self, _: u8, _: u8, _: Color) -> Result<(), Infallible> {
//! #         self.1 += 1;
//! #         Ok(())
//! #     }
//! # }
//! # struct NoDelay;
//! # impl DelayNs for NoDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = NoDelay;
//! let config = match Builder::new().channel(0).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//! let mut grid = match Grid::new(Strip(Mode::Normal, 0), config, &mut delay) {
//!     Ok(grid) => grid,
//!     Err(_) => return,
//! };
//!
//! let mut frame = BLANK_FRAME;
//! frame[0][0] = [300, -4, 12];
//! assert_eq!(grid.update(&frame, &mut delay).ok(), Some(1));
//! assert_eq!(grid.pixel(0, 0), Some(Color::new(255, 0, 12)));
//!
//! // Same frame again: nothing to write
//! assert_eq!(grid.update(&frame, &mut delay).ok(), Some(0));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(test)]
extern crate alloc;

/// RGB pixel color with clamping
pub mod color;
/// Grid dimensions, configuration types and builder
pub mod config;
/// Error types for the driver
pub mod error;
/// 8x8 bitmap font
pub mod font;
/// Diff-updating LED grid
pub mod grid;
/// Hardware interface abstraction
pub mod interface;
/// Conway's Game of Life
pub mod life;
/// Frames built from font glyphs
pub mod pattern;
/// BlinkStick HID report layouts
pub mod report;
/// Playback loops
pub mod routines;

/// USB HID backend (requires `std` feature)
#[cfg(feature = "std")]
pub mod blinkstick;
/// Sprite sheet tiles (requires `std` feature)
#[cfg(feature = "std")]
pub mod sprite;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

#[cfg(test)]
mod mock;

pub use color::Color;
pub use config::{
    Builder, CHANNELS, Config, HEIGHT, MAX_CHANNEL, MIN_WRITE_DELAY_US, PIXEL_COUNT, WIDTH,
};
pub use error::{BuilderError, Error};
pub use grid::{BLANK_FRAME, Frame, Grid, Pixels, Region};
pub use interface::{LedInterface, Mode};
pub use life::{AliveState, Life, TickOutcome};
pub use routines::FrameLimit;

#[cfg(feature = "std")]
pub use blinkstick::{BlinkStick, DeviceError};
#[cfg(feature = "std")]
pub use error::SpriteError;
#[cfg(feature = "std")]
pub use interface::StdDelay;
#[cfg(feature = "std")]
pub use sprite::SpriteSheet;

#[cfg(feature = "graphics")]
pub use graphics::Canvas;
