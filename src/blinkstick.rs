//! BlinkStick Pro over USB HID
//!
//! [`BlinkStick`] implements [`LedInterface`] with HID feature reports (see
//! [`report`](crate::report)). Discovery picks the first attached device;
//! there is no retry and no fallback when none is found.
//!
//! ## Example
//!
//! ```rust,no_run
//! use blinkgrid::{BlinkStick, Builder, Grid, StdDelay};
//!
//! let device = match BlinkStick::open() {
//!     Ok(device) => device,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//! let mut delay = StdDelay;
//! let _grid = Grid::new(device, config, &mut delay);
//! ```

use hidapi::{HidApi, HidDevice, HidError};

use crate::color::Color;
use crate::interface::{LedInterface, Mode};
use crate::report::{self, MODE, MODE_REPORT_LEN, PRODUCT_ID, VENDOR_ID};

/// Errors that can occur talking to a BlinkStick
#[derive(Debug)]
pub enum DeviceError {
    /// No BlinkStick is attached
    NotFound,
    /// HID transport error
    Hid(HidError),
    /// The device answered with fewer bytes than the report needs
    ShortReport {
        /// Bytes required, including the report id
        expected: usize,
        /// Bytes received
        provided: usize,
    },
}

impl core::fmt::Display for DeviceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "No BlinkStick found"),
            Self::Hid(e) => write!(f, "HID error: {e}"),
            Self::ShortReport { expected, provided } => write!(
                f,
                "Short report: expected {expected} bytes, received {provided}"
            ),
        }
    }
}

impl core::error::Error for DeviceError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Hid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<HidError> for DeviceError {
    fn from(e: HidError) -> Self {
        Self::Hid(e)
    }
}

/// An opened BlinkStick
pub struct BlinkStick {
    device: HidDevice,
}

impl core::fmt::Debug for BlinkStick {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BlinkStick").finish_non_exhaustive()
    }
}

impl BlinkStick {
    /// Initialize the HID library and open the first BlinkStick
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::NotFound`] when no device is attached.
    pub fn open() -> Result<Self, DeviceError> {
        let api = HidApi::new()?;
        Self::find_first(&api)
    }

    /// Open the first BlinkStick known to `api`
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::NotFound`] when no device is attached.
    pub fn find_first(api: &HidApi) -> Result<Self, DeviceError> {
        let Some(info) = api
            .device_list()
            .find(|info| info.vendor_id() == VENDOR_ID && info.product_id() == PRODUCT_ID)
        else {
            log::error!("No BlinkStick found");
            return Err(DeviceError::NotFound);
        };
        let device = info.open_device(api)?;
        log::info!(
            "BlinkStick connected (serial {})",
            info.serial_number().unwrap_or("unknown")
        );
        Ok(Self { device })
    }
}

impl LedInterface for BlinkStick {
    type Error = DeviceError;

    fn mode(&mut self) -> Result<Mode, Self::Error> {
        let mut buf = [0u8; MODE_REPORT_LEN];
        buf[0] = MODE;
        let provided = self.device.get_feature_report(&mut buf)?;
        if provided < MODE_REPORT_LEN {
            return Err(DeviceError::ShortReport {
                expected: MODE_REPORT_LEN,
                provided,
            });
        }
        Ok(Mode::from_byte(buf[1]))
    }

    fn set_mode(&mut self, mode: Mode) -> Result<(), Self::Error> {
        self.device
            .send_feature_report(&report::mode_report(mode.to_byte()))?;
        Ok(())
    }

    fn set_color(&mut self, channel: u8, index: u8, color: Color) -> Result<(), Self::Error> {
        let report = report::color_report(channel, index, color);
        self.device.send_feature_report(&report)?;
        Ok(())
    }
}
