//! RGB color type and channel clamping
//!
//! Candidate frames carry unclamped `i32` channels so generators can emit
//! convolution sums or scaled image data directly. Everything that reaches
//! the grid or the device goes through [`clamp_channel`].
//!
//! ## Example
//!
//! ```
//! use blinkgrid::Color;
//!
//! let color = Color::from_channels([-40, 128, 300]);
//! assert_eq!(color, Color::new(0, 128, 255));
//! assert!(color.is_lit());
//! assert!(!Color::BLACK.is_lit());
//! ```

/// Clamp a channel intensity into `0..=255`
///
/// Values below zero become 0 and values above 255 become 255; nothing wraps.
pub fn clamp_channel(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

/// A single LED color
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub struct Color {
    /// Red intensity
    pub r: u8,
    /// Green intensity
    pub g: u8,
    /// Blue intensity
    pub b: u8,
}

impl Color {
    /// All channels off
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// All channels at full intensity
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a color from in-range channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from unclamped channels, clamping each one
    pub fn from_channels(channels: [i32; 3]) -> Self {
        let [r, g, b] = channels;
        Self::new(clamp_channel(r), clamp_channel(g), clamp_channel(b))
    }

    /// Channels as `[r, g, b]`
    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Channels widened to the candidate frame type
    pub fn to_channels(self) -> [i32; 3] {
        [self.r as i32, self.g as i32, self.b as i32]
    }

    /// Whether any channel is nonzero
    pub fn is_lit(self) -> bool {
        self.r != 0 || self.g != 0 || self.b != 0
    }
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::Rgb888> for Color {
    fn from(color: embedded_graphics_core::pixelcolor::Rgb888) -> Self {
        use embedded_graphics_core::pixelcolor::RgbColor;
        Self::new(color.r(), color.g(), color.b())
    }
}

#[cfg(feature = "graphics")]
impl From<Color> for embedded_graphics_core::pixelcolor::Rgb888 {
    fn from(color: Color) -> Self {
        Self::new(color.r, color.g, color.b)
    }
}
