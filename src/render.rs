/*
 *  render.rs
 *
 *  InkList - the to-do list on the fridge door
 *
 *  Cursor-based text renderer: titles, to-do lines with strike-through,
 *  and the wrapped quote region.
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

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use crate::canvas::Canvas;
use crate::constants::{
    CURSOR_ORIGIN, LINE_HEIGHT, QUOTE_FRAME_BOTTOM_RIGHT, QUOTE_FRAME_TOP_LEFT, QUOTE_LINE_HEIGHT,
    QUOTE_ORIGIN, QUOTE_WRAP_COLUMNS, STRIKE_DROP,
};
use crate::todos::ToDoItem;

/// Sequential writer over one canvas.
///
/// The cursor is the top-left of the next glyph box. It starts at
/// `CURSOR_ORIGIN`, only ever moves downward during a pass, and is never
/// reset; a fresh `Renderer` is built per render invocation. All drawing
/// is ink-on-white and clips at the canvas edge.
pub struct Renderer<'a> {
    canvas: &'a mut Canvas,
    cursor: Point,
}

impl<'a> Renderer<'a> {
    pub fn new(canvas: &'a mut Canvas) -> Self {
        Self {
            canvas,
            cursor: Point::new(CURSOR_ORIGIN.0, CURSOR_ORIGIN.1),
        }
    }

    /// Where the next line will land; tests pin the cursor walk with this.
    #[allow(dead_code)]
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Paint `text` at the cursor. The cursor does not move.
    pub fn write(&mut self, text: &str, font: &'static MonoFont<'static>) {
        let style = MonoTextStyle::new(font, BinaryColor::On);
        Text::with_baseline(text, self.cursor, style, Baseline::Top)
            .draw(self.canvas)
            .ok();
    }

    /// Title line: paint, then drop one line height.
    pub fn write_title(&mut self, text: &str, font: &'static MonoFont<'static>) {
        self.write(text, font);
        self.increment_cursor(LINE_HEIGHT);
    }

    /// One to-do line, `- {name}`, struck through while still outstanding.
    pub fn write_todo(&mut self, item: &ToDoItem, font: &'static MonoFont<'static>) {
        let text = format!("- {}", item.name);
        let width = measured_width(&text, font);
        let height = font.character_size.height as i32;

        self.write(&text, font);

        if !item.is_done() {
            let y = self.cursor.y + height / 2 + STRIKE_DROP;
            Line::new(
                Point::new(self.cursor.x, y),
                Point::new(self.cursor.x + width, y),
            )
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(self.canvas)
            .ok();
        }

        self.increment_cursor(LINE_HEIGHT);
    }

    /// Move the cursor down (or up, for negative `dy`). X never changes.
    pub fn increment_cursor(&mut self, dy: i32) {
        self.cursor.y += dy;
    }

    /// Frame the right-hand region and fill it with the wrapped quote.
    ///
    /// The quote keeps its own local cursor; the main cursor is untouched.
    pub fn draw_quote(&mut self, quote: &str, font: &'static MonoFont<'static>) {
        Rectangle::with_corners(
            Point::new(QUOTE_FRAME_TOP_LEFT.0, QUOTE_FRAME_TOP_LEFT.1),
            Point::new(QUOTE_FRAME_BOTTOM_RIGHT.0, QUOTE_FRAME_BOTTOM_RIGHT.1),
        )
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(self.canvas)
        .ok();

        let style = MonoTextStyle::new(font, BinaryColor::On);
        let mut quote_y = QUOTE_ORIGIN.1;
        for line in wrap_quote(quote, QUOTE_WRAP_COLUMNS) {
            Text::with_baseline(&line, Point::new(QUOTE_ORIGIN.0, quote_y), style, Baseline::Top)
                .draw(self.canvas)
                .ok();
            quote_y += QUOTE_LINE_HEIGHT;
        }
    }
}

/// Rendered width of `text` under a monospaced font.
pub fn measured_width(text: &str, font: &MonoFont<'_>) -> i32 {
    let advance = font.character_size.width + font.character_spacing;
    (text.chars().count() as u32 * advance) as i32
}

/// Greedy word packer for the quote region.
///
/// A line keeps accepting words while its running character count is under
/// `columns` at the moment of the check, and every appended word carries a
/// trailing space. The check happens before the append, so the word that
/// closes a line may push it past the limit; wrapping is by character
/// count, not pixel measure.
pub fn wrap_quote(quote: &str, columns: usize) -> Vec<String> {
    let words: Vec<&str> = quote.split(' ').collect();
    let mut lines = Vec::new();

    let mut i = 0;
    while i < words.len() {
        let mut line = String::new();
        while line.chars().count() < columns && i < words.len() {
            line.push_str(words[i]);
            line.push(' ');
            i += 1;
        }
        lines.push(line);
    }
    lines
}
