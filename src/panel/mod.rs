/*
 *  panel/mod.rs
 *
 *  InkList - the to-do list on the fridge door
 *
 *  The sink: the finished raster leaves the program through here.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

pub mod epd3in7;
#[cfg(test)]
pub mod mock;

pub use epd3in7::Epd3in7;

use log::info;
use thiserror::Error;

use crate::canvas::Canvas;

/// Unified error type for panel operations.
#[derive(Debug, Error)]
pub enum PanelError {
    #[error("SPI communication error: {0}")]
    Spi(String),
    #[error("GPIO error: {0}")]
    Gpio(String),
    #[error("frame size mismatch: expected {expected} bytes, got {actual}")]
    FrameSizeMismatch { expected: usize, actual: usize },
    #[error("panel did not leave its busy state")]
    BusyTimeout,
}

/// Contract every physical (or simulated) panel satisfies.
///
/// One refresh is strictly init -> clear -> update -> sleep; the driver
/// holds no frame state of its own between calls.
pub trait PanelDriver {
    /// Power-on reset and controller init sequence.
    fn init(&mut self) -> Result<(), PanelError>;

    /// Blank the panel to its white ground.
    fn clear(&mut self) -> Result<(), PanelError>;

    /// Transfer one full packed 1-bpp frame and trigger a refresh.
    fn update(&mut self, frame: &[u8]) -> Result<(), PanelError>;

    /// Put the controller into deep sleep until the next run.
    fn sleep(&mut self) -> Result<(), PanelError>;
}

/// Rotate, pack and push a finished canvas to the panel.
///
/// The panel hangs upside down in its frame, so the raster is flipped on
/// both axes before transfer. The canvas itself is read-only here; a failed
/// transfer discards the frame rather than retrying.
pub fn show(canvas: &Canvas, panel: &mut dyn PanelDriver) -> Result<(), PanelError> {
    let frame = canvas.rotate180().to_packed_bytes();

    panel.init()?;
    panel.clear()?;
    panel.update(&frame)?;
    panel.sleep()?;

    info!("Panel refresh complete");
    Ok(())
}
