//! Grid state with diff-updates
//!
//! [`Grid`] owns the device and a copy of what it is currently showing.
//! Every update compares the clamped candidate [`Frame`] with that copy and
//! writes only the LEDs that changed, waiting the configured inter-write
//! delay after each one. A full repaint costs 64 writes (about 128ms at the
//! default 2ms delay).

use embedded_hal::delay::DelayNs;
use heapless::Vec;

use crate::color::Color;
use crate::config::{CHANNELS, Config, FRAME_LEN, HEIGHT, PIXEL_COUNT, WIDTH};
use crate::error::Error;
use crate::interface::{LedInterface, Mode};

type GridResult<T, I> = core::result::Result<T, Error<I>>;

/// Candidate grid with unclamped channel values, indexed `[row][col][channel]`
pub type Frame = [[[i32; CHANNELS]; WIDTH]; HEIGHT];

/// Committed grid colors, indexed `[row][col]`
pub type Pixels = [[Color; WIDTH]; HEIGHT];

/// A frame with every channel off
pub const BLANK_FRAME: Frame = [[[0; CHANNELS]; WIDTH]; HEIGHT];

/// Linear device index of a grid position
pub fn linear_index(row: usize, col: usize) -> usize {
    row * WIDTH + col
}

/// Clamp every channel of a frame
pub fn clamp_frame(frame: &Frame) -> Pixels {
    let mut pixels = [[Color::BLACK; WIDTH]; HEIGHT];
    for (out_row, row) in pixels.iter_mut().zip(frame) {
        for (out, channels) in out_row.iter_mut().zip(row) {
            *out = Color::from_channels(*channels);
        }
    }
    pixels
}

/// Widen committed colors back into a frame
pub fn to_frame(pixels: &Pixels) -> Frame {
    let mut frame = BLANK_FRAME;
    for (out_row, row) in frame.iter_mut().zip(pixels) {
        for (out, color) in out_row.iter_mut().zip(row) {
            *out = color.to_channels();
        }
    }
    frame
}

/// Positions where any channel differs between two grids
pub fn changed_cells(current: &Pixels, next: &Pixels) -> [[bool; WIDTH]; HEIGHT] {
    let mut changed = [[false; WIDTH]; HEIGHT];
    for (row, flags) in changed.iter_mut().enumerate() {
        for (col, flag) in flags.iter_mut().enumerate() {
            *flag = current[row][col] != next[row][col];
        }
    }
    changed
}

/// Rectangular part of the grid for partial reads and writes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    /// First row
    pub row: usize,
    /// First column
    pub col: usize,
    /// Number of rows
    pub height: usize,
    /// Number of columns
    pub width: usize,
}

impl Region {
    /// Create a new region
    pub fn new(row: usize, col: usize, height: usize, width: usize) -> Self {
        Self {
            row,
            col,
            height,
            width,
        }
    }

    /// The whole grid
    pub fn full() -> Self {
        Self::new(0, 0, HEIGHT, WIDTH)
    }

    /// A single cell
    pub fn cell(row: usize, col: usize) -> Self {
        Self::new(row, col, 1, 1)
    }

    /// A whole row
    pub fn row(row: usize) -> Self {
        Self::new(row, 0, 1, WIDTH)
    }

    /// Number of cells covered
    pub fn area(&self) -> usize {
        self.height * self.width
    }

    /// Whether the region is non-empty and lies inside the grid
    pub fn fits(&self) -> bool {
        self.height > 0
            && self.width > 0
            && self.row.saturating_add(self.height) <= HEIGHT
            && self.col.saturating_add(self.width) <= WIDTH
    }

    /// Positions covered, row-major
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.row..self.row + self.height)
            .flat_map(move |row| (self.col..self.col + self.width).map(move |col| (row, col)))
    }
}

/// The LED grid and the device that shows it
///
/// The buffer is created zero-filled by [`Grid::new`] and mutated in place for
/// the lifetime of the value.
pub struct Grid<I>
where
    I: LedInterface,
{
    /// Hardware interface
    interface: I,
    /// Driver configuration
    config: Config,
    /// Colors the device is currently showing
    pixels: Pixels,
}

impl<I> Grid<I>
where
    I: LedInterface,
{
    /// Take ownership of the device, switch it to addressable mode and
    /// blank all 64 LEDs
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interface`] if the device rejects the mode or a write.
    pub fn new<D: DelayNs>(interface: I, config: Config, delay: &mut D) -> GridResult<Self, I> {
        let mut grid = Self {
            interface,
            config,
            pixels: [[Color::BLACK; WIDTH]; HEIGHT],
        };
        grid.ensure_mode()?;
        grid.repaint(delay)?;
        log::info!("Grid initialized on channel {}", grid.config.channel);
        Ok(grid)
    }

    fn ensure_mode(&mut self) -> GridResult<(), I> {
        let current = self.interface.mode().map_err(Error::Interface)?;
        if current != Mode::Addressable || self.config.force_mode {
            log::info!("Changing mode {current:?} -> {:?}", Mode::Addressable);
            self.interface
                .set_mode(Mode::Addressable)
                .map_err(Error::Interface)?;
        }
        Ok(())
    }

    /// Show `frame`, writing only the LEDs whose color changed
    ///
    /// Every channel is clamped into `0..=255` before comparing. Changed LEDs
    /// are written in row-major order, each followed by the configured
    /// inter-write delay.
    ///
    /// Returns the number of LEDs written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interface`] if a write fails. The stored grid already
    /// holds the new frame at that point.
    pub fn update<D: DelayNs>(&mut self, frame: &Frame, delay: &mut D) -> GridResult<usize, I> {
        let next = clamp_frame(frame);
        let changed = changed_cells(&self.pixels, &next);
        self.pixels = next;

        let mut writes = 0;
        for (row, flags) in changed.iter().enumerate() {
            for (col, _) in flags.iter().enumerate().filter(|(_, changed)| **changed) {
                self.write_pixel(row, col, delay)?;
                writes += 1;
            }
        }
        log::trace!("Grid update wrote {writes} pixels");
        Ok(writes)
    }

    /// Show a flat row-major frame of `FRAME_LEN` channel values
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] without touching the grid if
    /// `values` is not exactly [`FRAME_LEN`] long.
    pub fn update_from_slice<D: DelayNs>(
        &mut self,
        values: &[i32],
        delay: &mut D,
    ) -> GridResult<usize, I> {
        if values.len() != FRAME_LEN {
            return Err(Error::ShapeMismatch {
                expected: FRAME_LEN,
                provided: values.len(),
            });
        }
        let mut frame = BLANK_FRAME;
        let cells = frame.iter_mut().flatten();
        for (cell, channels) in cells.zip(values.chunks_exact(CHANNELS)) {
            cell.copy_from_slice(channels);
        }
        self.update(&frame, delay)
    }

    /// Write every LED regardless of what changed
    pub fn repaint<D: DelayNs>(&mut self, delay: &mut D) -> GridResult<(), I> {
        for row in 0..HEIGHT {
            for col in 0..WIDTH {
                self.write_pixel(row, col, delay)?;
            }
        }
        Ok(())
    }

    /// Set every LED to `channels`
    pub fn fill<D: DelayNs>(
        &mut self,
        channels: [i32; CHANNELS],
        delay: &mut D,
    ) -> GridResult<usize, I> {
        self.update(&[[channels; WIDTH]; HEIGHT], delay)
    }

    /// Turn every LED off
    pub fn clear<D: DelayNs>(&mut self, delay: &mut D) -> GridResult<usize, I> {
        self.update(&BLANK_FRAME, delay)
    }

    /// Copy the colors inside `region`, row-major
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegion`] if the region does not fit the grid.
    pub fn read_region(&self, region: Region) -> GridResult<Vec<Color, PIXEL_COUNT>, I> {
        check_region(region)?;
        Ok(region
            .cells()
            .map(|(row, col)| self.pixels[row][col])
            .collect())
    }

    /// Patch `region` with `values` (one entry per cell, row-major) and
    /// diff-update the whole grid
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegion`] if the region does not fit the grid,
    /// [`Error::ShapeMismatch`] if `values` does not cover it exactly.
    pub fn write_region<D: DelayNs>(
        &mut self,
        region: Region,
        values: &[[i32; CHANNELS]],
        delay: &mut D,
    ) -> GridResult<usize, I> {
        check_region(region)?;
        if values.len() != region.area() {
            return Err(Error::ShapeMismatch {
                expected: region.area(),
                provided: values.len(),
            });
        }
        let mut frame = self.frame();
        for ((row, col), channels) in region.cells().zip(values) {
            frame[row][col] = *channels;
        }
        self.update(&frame, delay)
    }

    /// Colors currently shown
    pub fn pixels(&self) -> &Pixels {
        &self.pixels
    }

    /// Color at one position
    ///
    /// Returns `None` outside the grid.
    pub fn pixel(&self, row: usize, col: usize) -> Option<Color> {
        self.pixels.get(row).and_then(|cells| cells.get(col)).copied()
    }

    /// Colors currently shown, as a frame
    pub fn frame(&self) -> Frame {
        to_frame(&self.pixels)
    }

    /// Access the driver configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Access the underlying interface
    pub fn interface(&self) -> &I {
        &self.interface
    }

    /// Access the underlying interface mutably
    pub fn interface_mut(&mut self) -> &mut I {
        &mut self.interface
    }

    /// Give the interface back
    pub fn release(self) -> I {
        self.interface
    }

    fn write_pixel<D: DelayNs>(
        &mut self,
        row: usize,
        col: usize,
        delay: &mut D,
    ) -> GridResult<(), I> {
        let index = linear_index(row, col) as u8;
        self.interface
            .set_color(self.config.channel, index, self.pixels[row][col])
            .map_err(Error::Interface)?;
        delay.delay_us(self.config.write_delay_us);
        Ok(())
    }
}

fn check_region<I: LedInterface>(region: Region) -> GridResult<(), I> {
    if region.fits() {
        Ok(())
    } else {
        Err(Error::InvalidRegion {
            row: region.row,
            col: region.col,
            height: region.height,
            width: region.width,
        })
    }
}
