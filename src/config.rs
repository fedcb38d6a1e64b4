//! Grid geometry and driver configuration

pub use crate::error::BuilderError;

/// Number of LED rows on the grid
pub const HEIGHT: usize = 8;

/// Number of LED columns on the grid
pub const WIDTH: usize = 8;

/// Color channels per LED (red, green, blue)
pub const CHANNELS: usize = 3;

/// Number of addressable LEDs
pub const PIXEL_COUNT: usize = HEIGHT * WIDTH;

/// Number of channel values in a flat row-major frame
pub const FRAME_LEN: usize = PIXEL_COUNT * CHANNELS;

/// Highest LED data channel on a BlinkStick Pro (R = 0, G = 1, B = 2)
pub const MAX_CHANNEL: u8 = 2;

/// Minimum delay between two pixel writes, in microseconds
///
/// The controller drops reports that arrive faster than this.
pub const MIN_WRITE_DELAY_US: u32 = 2_000;

/// Driver configuration
///
/// Use [`Builder`] to create a Config.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// LED data channel the grid is wired to
    pub channel: u8,
    /// Delay after every pixel write, in microseconds
    pub write_delay_us: u32,
    /// Write the addressable mode even if the device already reports it
    pub force_mode: bool,
}

/// Builder for constructing driver configuration
///
/// # Example
///
/// ```
/// use blinkgrid::Builder;
///
/// let config = match Builder::new().channel(0).write_delay_us(2_500).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.write_delay_us, 2_500);
/// ```
#[must_use]
pub struct Builder {
    channel: u8,
    write_delay_us: u32,
    force_mode: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            // The 8x8 matrix hangs off the R pin
            channel: 0,
            write_delay_us: MIN_WRITE_DELAY_US,
            force_mode: false,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the LED data channel
    pub fn channel(mut self, channel: u8) -> Self {
        self.channel = channel;
        self
    }

    /// Set the delay after every pixel write, in microseconds
    pub fn write_delay_us(mut self, micros: u32) -> Self {
        self.write_delay_us = micros;
        self
    }

    /// Always send the mode report on start-up
    pub fn force_mode(mut self, value: bool) -> Self {
        self.force_mode = value;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidChannel` for channels above [`MAX_CHANNEL`]
    /// and `BuilderError::WriteDelayTooShort` below [`MIN_WRITE_DELAY_US`].
    pub fn build(self) -> Result<Config, BuilderError> {
        if self.channel > MAX_CHANNEL {
            return Err(BuilderError::InvalidChannel {
                channel: self.channel,
            });
        }
        if self.write_delay_us < MIN_WRITE_DELAY_US {
            return Err(BuilderError::WriteDelayTooShort {
                micros: self.write_delay_us,
            });
        }
        Ok(Config {
            channel: self.channel,
            write_delay_us: self.write_delay_us,
            force_mode: self.force_mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_build() {
        let config = Builder::new().build().unwrap();
        assert_eq!(config.channel, 0);
        assert_eq!(config.write_delay_us, MIN_WRITE_DELAY_US);
        assert!(!config.force_mode);
    }

    #[test]
    fn test_invalid_channel_returns_error() {
        let result = Builder::new().channel(3).build();
        assert!(matches!(
            result,
            Err(BuilderError::InvalidChannel { channel: 3 })
        ));
    }

    #[test]
    fn test_short_write_delay_returns_error() {
        let result = Builder::new().write_delay_us(500).build();
        assert!(matches!(
            result,
            Err(BuilderError::WriteDelayTooShort { micros: 500 })
        ));
    }

    #[test]
    fn test_frame_len() {
        assert_eq!(PIXEL_COUNT, 64);
        assert_eq!(FRAME_LEN, 192);
    }
}
