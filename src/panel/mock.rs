/*
 *  panel/mock.rs
 *
 *  InkList - the to-do list on the fridge door
 *
 *  Recording panel for tests; no hardware required.
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

use crate::constants::{PANEL_HEIGHT, PANEL_WIDTH};
use crate::panel::{PanelDriver, PanelError};

/// Everything a panel can be asked to do, in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Init,
    Clear,
    Update,
    Sleep,
}

/// Records every sink operation and keeps the last transferred frame so
/// tests can inspect what actually went out the door.
#[derive(Debug, Default)]
pub struct MockPanel {
    pub ops: Vec<Op>,
    pub last_frame: Option<Vec<u8>>,

    /// Simulate a transfer failure (for error-path tests).
    pub fail_update: bool,
}

impl MockPanel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PanelDriver for MockPanel {
    fn init(&mut self) -> Result<(), PanelError> {
        self.ops.push(Op::Init);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), PanelError> {
        self.ops.push(Op::Clear);
        Ok(())
    }

    fn update(&mut self, frame: &[u8]) -> Result<(), PanelError> {
        let expected = (PANEL_WIDTH * PANEL_HEIGHT / 8) as usize;
        if frame.len() != expected {
            return Err(PanelError::FrameSizeMismatch { expected, actual: frame.len() });
        }
        if self.fail_update {
            return Err(PanelError::Spi("simulated transfer failure".to_string()));
        }
        self.ops.push(Op::Update);
        self.last_frame = Some(frame.to_vec());
        Ok(())
    }

    fn sleep(&mut self) -> Result<(), PanelError> {
        self.ops.push(Op::Sleep);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::panel::show;
    use embedded_graphics::prelude::*;
    use embedded_graphics::pixelcolor::BinaryColor;

    #[test]
    fn show_runs_the_full_sink_sequence() {
        let canvas = Canvas::new();
        let mut panel = MockPanel::new();

        show(&canvas, &mut panel).unwrap();

        assert_eq!(panel.ops, vec![Op::Init, Op::Clear, Op::Update, Op::Sleep]);
        let frame = panel.last_frame.unwrap();
        assert_eq!(frame.len(), 480 * 280 / 8);
        // blank canvas -> all-white frame
        assert!(frame.iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn show_transfers_the_rotated_frame() {
        let mut canvas = Canvas::new();
        canvas
            .draw_iter([Pixel(Point::new(0, 0), BinaryColor::On)])
            .unwrap();

        let mut panel = MockPanel::new();
        show(&canvas, &mut panel).unwrap();

        // (0,0) ink lands at (479,279) after the 180 degree flip: last
        // byte of the frame, LSB cleared.
        let frame = panel.last_frame.unwrap();
        assert_eq!(frame[frame.len() - 1], 0xFE);
        assert_eq!(frame[0], 0xFF);
    }

    #[test]
    fn failed_transfer_surfaces_and_skips_sleep() {
        let canvas = Canvas::new();
        let mut panel = MockPanel::new();
        panel.fail_update = true;

        let err = show(&canvas, &mut panel).unwrap_err();
        assert!(matches!(err, PanelError::Spi(_)));
        assert_eq!(panel.ops, vec![Op::Init, Op::Clear]);
    }

    #[test]
    fn undersized_frame_is_rejected() {
        let mut panel = MockPanel::new();
        let err = panel.update(&[0u8; 16]).unwrap_err();
        assert!(matches!(err, PanelError::FrameSizeMismatch { expected: 16800, actual: 16 }));
    }
}
