/*
 *  canvas.rs
 *
 *  InkList - the to-do list on the fridge door
 *
 *  Fixed-size monochrome raster for one render pass.
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

use core::convert::Infallible;
use std::io;

use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::constants::{PANEL_HEIGHT, PANEL_WIDTH};

/// The 480x280 drawing surface.
///
/// `BinaryColor::Off` is the white ground, `On` is ink. The buffer starts
/// all white and is discarded once the panel (or the PBM dump) has consumed
/// it; nothing survives across runs. Draws outside the raster are silently
/// clipped.
#[derive(Debug, Clone)]
pub struct Canvas {
    buf: Vec<BinaryColor>,
    w: usize,
    h: usize,
}

impl Canvas {
    pub fn new() -> Self {
        let (w, h) = (PANEL_WIDTH as usize, PANEL_HEIGHT as usize);
        Self { buf: vec![BinaryColor::Off; w * h], w, h }
    }

    /// The raster flipped top-to-bottom and left-to-right, the orientation
    /// the panel is mounted in.
    pub fn rotate180(&self) -> Canvas {
        let mut buf = self.buf.clone();
        buf.reverse();
        Canvas { buf, w: self.w, h: self.h }
    }

    /// Pack 1 bit per pixel for the panel transfer: MSB-first within each
    /// byte, bit set = white (the panel's idea of the ground color).
    pub fn to_packed_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.w * self.h / 8];
        for (i, &pixel) in self.buf.iter().enumerate() {
            if pixel == BinaryColor::Off {
                bytes[i / 8] |= 0x80 >> (i % 8);
            }
        }
        bytes
    }

    /// Dump as plain PBM ("1" = ink), viewable with any image tool.
    pub fn write_pbm<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "P1")?;
        writeln!(out, "{} {}", self.w, self.h)?;
        for row in self.buf.chunks(self.w) {
            let line: Vec<&str> = row
                .iter()
                .map(|&p| if p == BinaryColor::On { "1" } else { "0" })
                .collect();
            writeln!(out, "{}", line.join(" "))?;
        }
        Ok(())
    }

    /// Map (x,y) to a linear index; `None` when off the raster.
    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 {
            let (x, y) = (p.x as usize, p.y as usize);
            if x < self.w && y < self.h {
                return Some(y * self.w + x);
            }
        }
        None
    }
}

// Inspection helpers; exercised by the test suites across the crate.
#[allow(dead_code)]
impl Canvas {
    pub fn width(&self) -> usize { self.w }
    pub fn height(&self) -> usize { self.h }

    /// Pixel lookup; `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<BinaryColor> {
        if (x as usize) < self.w && (y as usize) < self.h {
            self.buf.get(y as usize * self.w + x as usize).copied()
        } else {
            None
        }
    }

    /// Number of ink pixels on the whole canvas.
    pub fn ink_count(&self) -> usize {
        self.buf.iter().filter(|&&p| p == BinaryColor::On).count()
    }

    /// Ink pixels inside a half-open pixel region.
    pub fn ink_count_in(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> usize {
        let mut count = 0;
        for y in y0..y1.min(self.h as u32) {
            for x in x0..x1.min(self.w as u32) {
                if self.pixel(x, y) == Some(BinaryColor::On) {
                    count += 1;
                }
            }
        }
        count
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.w as u32, self.h as u32)
    }
}

impl DrawTarget for Canvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            if let Some(i) = self.idx(p) {
                self.buf[i] = c;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.buf.fill(color);
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        // fast path for the rectangular fills the primitives use
        let Size { width, height } = area.size;
        if width == 0 || height == 0 {
            return Ok(());
        }
        let (x0, y0) = (area.top_left.x.max(0) as usize, area.top_left.y.max(0) as usize);

        let mut it = colors.into_iter();
        for row in 0..height as usize {
            let base = (y0 + row) * self.w + x0;
            for col in 0..width as usize {
                if let Some(c) = it.next() {
                    let i = base + col;
                    if i < self.buf.len() {
                        self.buf[i] = c;
                    }
                } else {
                    return Ok(());
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{Line, PrimitiveStyle};

    #[test]
    fn canvas_is_always_panel_sized_and_white() {
        let canvas = Canvas::new();
        assert_eq!(canvas.width(), 480);
        assert_eq!(canvas.height(), 280);
        assert_eq!(canvas.ink_count(), 0);
    }

    #[test]
    fn out_of_bounds_draws_are_clipped() {
        let mut canvas = Canvas::new();
        Line::new(Point::new(470, 275), Point::new(600, 400))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut canvas)
            .unwrap();

        // Still panel sized, and only the on-raster part of the line landed.
        assert_eq!(canvas.width(), 480);
        assert_eq!(canvas.height(), 280);
        assert!(canvas.ink_count() > 0);
        assert_eq!(canvas.pixel(470, 275), Some(BinaryColor::On));
        assert_eq!(canvas.pixel(500, 300), None);
    }

    #[test]
    fn rotate180_maps_corners() {
        let mut canvas = Canvas::new();
        canvas
            .draw_iter([Pixel(Point::new(0, 0), BinaryColor::On)])
            .unwrap();

        let rotated = canvas.rotate180();
        assert_eq!(rotated.pixel(479, 279), Some(BinaryColor::On));
        assert_eq!(rotated.pixel(0, 0), Some(BinaryColor::Off));
        assert_eq!(rotated.ink_count(), 1);
    }

    #[test]
    fn packed_bytes_are_white_high() {
        let canvas = Canvas::new();
        let bytes = canvas.to_packed_bytes();
        assert_eq!(bytes.len(), 480 * 280 / 8);
        assert!(bytes.iter().all(|&b| b == 0xFF));

        let mut inked = Canvas::new();
        inked
            .draw_iter([Pixel(Point::new(0, 0), BinaryColor::On)])
            .unwrap();
        // first pixel black -> MSB of the first byte cleared
        assert_eq!(inked.to_packed_bytes()[0], 0x7F);
    }

    #[test]
    fn pbm_dump_has_header_and_rows() {
        let canvas = Canvas::new();
        let mut out = Vec::new();
        canvas.write_pbm(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("P1"));
        assert_eq!(lines.next(), Some("480 280"));
        assert_eq!(lines.count(), 280);
    }
}
