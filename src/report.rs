//! BlinkStick HID feature report definitions
//!
//! The controller is driven entirely through HID feature reports. The first
//! byte of every report is its report id.
//!
//! ## Report Structure
//!
//! | Report | Layout                                  | Purpose                    |
//! |--------|-----------------------------------------|----------------------------|
//! | 1      | `[1, r, g, b]`                          | Color of LED 0, channel 0  |
//! | 4      | `[4, mode]`                             | Read or write device mode  |
//! | 5      | `[5, channel, index, r, g, b]`          | Color of one indexed LED   |
//!
//! ## Example
//!
//! ```
//! use blinkgrid::{report, Color};
//!
//! let report = report::color_report(0, 9, Color::new(10, 20, 30));
//! assert_eq!(report.as_slice(), &[report::INDEXED_COLOR, 0, 9, 10, 20, 30]);
//! ```

use heapless::Vec;

use crate::color::Color;

// USB identification

/// BlinkStick USB vendor id (0x20A0)
pub const VENDOR_ID: u16 = 0x20A0;

/// BlinkStick USB product id (0x41E5)
pub const PRODUCT_ID: u16 = 0x41E5;

// Report ids

/// Single color report (0x01)
///
/// Sets LED 0 on channel 0. Requires 3 bytes: red, green, blue.
pub const SINGLE_COLOR: u8 = 0x01;

/// Mode report (0x04)
///
/// Reads or writes the device mode. Requires 1 byte.
pub const MODE: u8 = 0x04;

/// Indexed color report (0x05)
///
/// Sets one LED on one channel.
/// Requires 5 bytes: channel, index, red, green, blue.
pub const INDEXED_COLOR: u8 = 0x05;

/// Length of the mode report including the report id
pub const MODE_REPORT_LEN: usize = 2;

/// Longest report this driver sends
pub const MAX_REPORT_LEN: usize = 6;

// Mode bytes

/// Normal RGB mode (0x00)
pub const MODE_NORMAL: u8 = 0x00;

/// Inverse RGB mode for common-anode LEDs (0x01)
pub const MODE_INVERSE: u8 = 0x01;

/// WS2812 per-pixel addressable mode (0x02)
pub const MODE_ADDRESSABLE: u8 = 0x02;

/// Encode a color write for one LED
///
/// LED 0 on channel 0 uses the short single-color report, everything else
/// the indexed report.
pub fn color_report(channel: u8, index: u8, color: Color) -> Vec<u8, MAX_REPORT_LEN> {
    let [r, g, b] = color.channels();
    let bytes: &[u8] = if channel == 0 && index == 0 {
        &[SINGLE_COLOR, r, g, b]
    } else {
        &[INDEXED_COLOR, channel, index, r, g, b]
    };
    bytes.iter().copied().collect()
}

/// Encode a mode write
pub fn mode_report(mode: u8) -> [u8; MODE_REPORT_LEN] {
    [MODE, mode]
}
