//! Test doubles shared by the unit tests

use alloc::vec::Vec;
use embedded_hal::delay::DelayNs;

use crate::color::Color;
use crate::interface::{LedInterface, Mode};

/// Records every write instead of touching hardware
#[derive(Debug)]
pub(crate) struct MockInterface {
    pub(crate) mode: Mode,
    pub(crate) mode_writes: Vec<Mode>,
    pub(crate) writes: Vec<(u8, u8, Color)>,
}

impl MockInterface {
    pub(crate) fn new(mode: Mode) -> Self {
        Self {
            mode,
            mode_writes: Vec::new(),
            writes: Vec::new(),
        }
    }

    /// Linear indices written since the last call, in write order
    pub(crate) fn take_indices(&mut self) -> Vec<u8> {
        self.writes.drain(..).map(|(_, index, _)| index).collect()
    }
}

impl LedInterface for MockInterface {
    type Error = core::convert::Infallible;

    fn mode(&mut self) -> Result<Mode, Self::Error> {
        Ok(self.mode)
    }

    fn set_mode(&mut self, mode: Mode) -> Result<(), Self::Error> {
        self.mode = mode;
        self.mode_writes.push(mode);
        Ok(())
    }

    fn set_color(&mut self, channel: u8, index: u8, color: Color) -> Result<(), Self::Error> {
        self.writes.push((channel, index, color));
        Ok(())
    }
}

/// Counts requested delay instead of sleeping
#[derive(Debug, Default)]
pub(crate) struct MockDelay {
    pub(crate) total_ns: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}
