/*
 *  panel/epd3in7.rs
 *
 *  InkList - the to-do list on the fridge door
 *
 *  Waveshare 3.7" (480x280) e-paper panel over spidev + gpiochip.
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

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;
use linux_embedded_hal::gpio_cdev::{Chip, LineRequestFlags};
use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
use linux_embedded_hal::{CdevPin, Delay, SpidevDevice};
use log::{debug, info};

use crate::constants::{PANEL_HEIGHT, PANEL_WIDTH, PIN_BUSY, PIN_DC, PIN_RST};
use crate::panel::{PanelDriver, PanelError};

// Controller command set (SSD1677 family).
const CMD_SW_RESET: u8 = 0x12;
const CMD_DRIVER_OUTPUT: u8 = 0x01;
const CMD_DATA_ENTRY_MODE: u8 = 0x11;
const CMD_BORDER_WAVEFORM: u8 = 0x3C;
const CMD_TEMP_SENSOR: u8 = 0x18;
const CMD_WRITE_RAM_BW: u8 = 0x24;
const CMD_DISPLAY_UPDATE_CTRL: u8 = 0x22;
const CMD_MASTER_ACTIVATION: u8 = 0x20;
const CMD_DEEP_SLEEP: u8 = 0x10;

/// Polls of the busy line before giving up on a refresh (10 ms apiece; a
/// full-frame refresh takes several seconds on this panel).
const BUSY_POLL_LIMIT: u32 = 3000;

/// The physical panel, wired over `/dev/spidevX.Y` and `/dev/gpiochipN`.
pub struct Epd3in7 {
    spi: SpidevDevice,
    dc: CdevPin,
    rst: CdevPin,
    busy: CdevPin,
    delay: Delay,
}

impl Epd3in7 {
    /// Open the SPI device and claim the control lines.
    pub fn open(spi_path: &str, gpiochip_path: &str) -> Result<Self, PanelError> {
        info!("Opening panel on {} / {}", spi_path, gpiochip_path);

        let mut spi =
            SpidevDevice::open(spi_path).map_err(|e| PanelError::Spi(format!("{:?}", e)))?;
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(4_000_000)
            .mode(SpiModeFlags::SPI_MODE_0)
            .build();
        spi.configure(&options)
            .map_err(|e| PanelError::Spi(format!("{:?}", e)))?;

        let mut chip =
            Chip::new(gpiochip_path).map_err(|e| PanelError::Gpio(format!("{:?}", e)))?;
        let dc = output_pin(&mut chip, PIN_DC, "inklist-dc")?;
        let rst = output_pin(&mut chip, PIN_RST, "inklist-rst")?;
        let busy = input_pin(&mut chip, PIN_BUSY, "inklist-busy")?;

        Ok(Self { spi, dc, rst, busy, delay: Delay {} })
    }

    fn command(&mut self, cmd: u8) -> Result<(), PanelError> {
        self.dc
            .set_low()
            .map_err(|e| PanelError::Gpio(format!("{:?}", e)))?;
        self.spi
            .write(&[cmd])
            .map_err(|e| PanelError::Spi(format!("{:?}", e)))
    }

    fn data(&mut self, data: &[u8]) -> Result<(), PanelError> {
        self.dc
            .set_high()
            .map_err(|e| PanelError::Gpio(format!("{:?}", e)))?;
        self.spi
            .write(data)
            .map_err(|e| PanelError::Spi(format!("{:?}", e)))
    }

    fn reset(&mut self) -> Result<(), PanelError> {
        for (level, ms) in [(true, 30), (false, 3), (true, 30)] {
            let toggled = if level {
                self.rst.set_high()
            } else {
                self.rst.set_low()
            };
            toggled.map_err(|e| PanelError::Gpio(format!("{:?}", e)))?;
            self.delay.delay_ms(ms);
        }
        Ok(())
    }

    /// The busy line stays high while the controller refreshes.
    fn wait_idle(&mut self) -> Result<(), PanelError> {
        for _ in 0..BUSY_POLL_LIMIT {
            let high = self
                .busy
                .is_high()
                .map_err(|e| PanelError::Gpio(format!("{:?}", e)))?;
            if !high {
                return Ok(());
            }
            self.delay.delay_ms(10);
        }
        Err(PanelError::BusyTimeout)
    }

    /// Push one packed frame into the controller's black/white RAM and
    /// trigger a full refresh.
    fn write_frame(&mut self, frame: &[u8]) -> Result<(), PanelError> {
        self.command(CMD_WRITE_RAM_BW)?;
        self.data(frame)?;
        self.command(CMD_DISPLAY_UPDATE_CTRL)?;
        self.data(&[0xF7])?;
        self.command(CMD_MASTER_ACTIVATION)?;
        self.wait_idle()
    }
}

impl PanelDriver for Epd3in7 {
    fn init(&mut self) -> Result<(), PanelError> {
        debug!("Panel init sequence");
        self.reset()?;

        self.command(CMD_SW_RESET)?;
        self.wait_idle()?;

        // gate lines = panel height - 1, scan order default
        let gates = (PANEL_HEIGHT - 1) as u16;
        self.command(CMD_DRIVER_OUTPUT)?;
        self.data(&[(gates & 0xFF) as u8, (gates >> 8) as u8, 0x00])?;

        // x increment, y increment
        self.command(CMD_DATA_ENTRY_MODE)?;
        self.data(&[0x03])?;

        self.command(CMD_BORDER_WAVEFORM)?;
        self.data(&[0x05])?;

        // internal temperature sensor
        self.command(CMD_TEMP_SENSOR)?;
        self.data(&[0x80])?;

        self.wait_idle()
    }

    fn clear(&mut self) -> Result<(), PanelError> {
        debug!("Blanking panel to white");
        let white = vec![0xFF; (PANEL_WIDTH * PANEL_HEIGHT / 8) as usize];
        self.write_frame(&white)
    }

    fn update(&mut self, frame: &[u8]) -> Result<(), PanelError> {
        let expected = (PANEL_WIDTH * PANEL_HEIGHT / 8) as usize;
        if frame.len() != expected {
            return Err(PanelError::FrameSizeMismatch { expected, actual: frame.len() });
        }
        debug!("Transferring {} byte frame", frame.len());
        self.write_frame(frame)
    }

    fn sleep(&mut self) -> Result<(), PanelError> {
        self.command(CMD_DEEP_SLEEP)?;
        self.data(&[0x01])
    }
}

fn output_pin(chip: &mut Chip, line: u32, label: &str) -> Result<CdevPin, PanelError> {
    let handle = chip
        .get_line(line)
        .and_then(|l| l.request(LineRequestFlags::OUTPUT, 0, label))
        .map_err(|e| PanelError::Gpio(format!("{:?}", e)))?;
    CdevPin::new(handle).map_err(|e| PanelError::Gpio(format!("{:?}", e)))
}

fn input_pin(chip: &mut Chip, line: u32, label: &str) -> Result<CdevPin, PanelError> {
    let handle = chip
        .get_line(line)
        .and_then(|l| l.request(LineRequestFlags::INPUT, 0, label))
        .map_err(|e| PanelError::Gpio(format!("{:?}", e)))?;
    CdevPin::new(handle).map_err(|e| PanelError::Gpio(format!("{:?}", e)))
}
