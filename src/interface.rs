//! Hardware interface abstraction
//!
//! This module provides the [`LedInterface`] trait the grid drives, the
//! [`Mode`] the controller can be put in, and [`StdDelay`], a blocking
//! [`DelayNs`] for hosts with `std`.
//!
//! ## Example
//!
//! ```
//! use blinkgrid::{Color, LedInterface, Mode};
//!
//! #[derive(Debug, Default)]
//! struct Recorder {
//!     mode: u8,
//!     writes: Vec<(u8, u8, Color)>,
//! }
//!
//! impl LedInterface for Recorder {
//!     type Error = core::convert::Infallible;
//!
//!     fn mode(&mut self) -> Result<Mode, Self::Error> {
//!         Ok(Mode::from_byte(self.mode))
//!     }
//!
//!     fn set_mode(&mut self, mode: Mode) -> Result<(), Self::Error> {
//!         self.mode = mode.to_byte();
//!         Ok(())
//!     }
//!
//!     fn set_color(&mut self, channel: u8, index: u8, color: Color) -> Result<(), Self::Error> {
//!         self.writes.push((channel, index, color));
//!         Ok(())
//!     }
//! }
//!
//! let mut recorder = Recorder::default();
//! let _ = recorder.set_mode(Mode::Addressable);
//! assert_eq!(recorder.mode().ok(), Some(Mode::Addressable));
//! ```

use core::fmt::Debug;
#[cfg(feature = "std")]
use embedded_hal::delay::DelayNs;

use crate::color::Color;
use crate::report::{MODE_ADDRESSABLE, MODE_INVERSE, MODE_NORMAL};

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Controller output mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Single RGB LED
    Normal,
    /// Single RGB LED, inverted outputs
    Inverse,
    /// WS2812 strip, one color per LED index
    Addressable,
    /// Mode byte this driver does not know
    Unknown(u8),
}

impl Mode {
    /// Decode a mode byte
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            MODE_NORMAL => Self::Normal,
            MODE_INVERSE => Self::Inverse,
            MODE_ADDRESSABLE => Self::Addressable,
            other => Self::Unknown(other),
        }
    }

    /// Encode as a mode byte
    pub fn to_byte(self) -> u8 {
        match self {
            Self::Normal => MODE_NORMAL,
            Self::Inverse => MODE_INVERSE,
            Self::Addressable => MODE_ADDRESSABLE,
            Self::Unknown(byte) => byte,
        }
    }
}

/// Trait for the hardware interface to an LED controller
///
/// This trait abstracts over the USB transport so the
/// [`Grid`](crate::grid::Grid) can be driven by the [`BlinkStick`](crate::blinkstick::BlinkStick)
/// or by a test double.
///
/// ## Implementing
///
/// Implementations send exactly one device write per [`set_color`](Self::set_color)
/// call. Pacing between writes is done by the caller.
pub trait LedInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Read the current controller mode
    ///
    /// # Errors
    ///
    /// Returns an error if the device cannot be read.
    fn mode(&mut self) -> InterfaceResult<Mode, Self::Error>;

    /// Put the controller into `mode`
    ///
    /// # Errors
    ///
    /// Returns an error if the device rejects the write.
    fn set_mode(&mut self, mode: Mode) -> InterfaceResult<(), Self::Error>;

    /// Set the color of one LED
    ///
    /// # Arguments
    ///
    /// * `channel` - LED data channel
    /// * `index` - Linear pixel index, `row * 8 + col`
    /// * `color` - Clamped color to show
    ///
    /// # Errors
    ///
    /// Returns an error if the device rejects the write.
    fn set_color(&mut self, channel: u8, index: u8, color: Color)
    -> InterfaceResult<(), Self::Error>;
}

/// Blocking delay backed by [`std::thread::sleep`]
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug, Default)]
pub struct StdDelay;

#[cfg(feature = "std")]
impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(ns.into()));
    }

    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(std::time::Duration::from_micros(us.into()));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(ms.into()));
    }
}
