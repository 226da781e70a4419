/*
 *  compose.rs
 *
 *  InkList - the to-do list on the fridge door
 *
 *  Lays the whole frame out: one title line per date group, the group's
 *  items beneath it, and the quote region on the right.
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

use chrono::NaiveDate;
use log::debug;

use crate::canvas::Canvas;
use crate::constants::{BODY_FONT, QUOTE_FONT, TITLE_FONT};
use crate::render::Renderer;
use crate::todos::ToDoCollection;

/// Build the finished raster for one refresh.
///
/// Groups come out of the collection in date order; the group matching
/// `today` is titled "To do today", every other one "To do {date}". The
/// quote lands in the side region last. An empty collection produces a
/// frame with nothing but the quote on it.
pub fn compose(todos: &ToDoCollection, today: NaiveDate, quote: &str) -> Canvas {
    let today_key = today.format("%Y-%m-%d").to_string();

    let mut canvas = Canvas::new();
    let mut writer = Renderer::new(&mut canvas);

    for (date, items) in todos.iter() {
        let title = if date == today_key {
            "To do today".to_string()
        } else {
            format!("To do {}", date)
        };
        debug!("Laying out {} item(s) under '{}'", items.len(), title);

        writer.write_title(&title, TITLE_FONT);
        for item in items {
            writer.write_todo(item, BODY_FONT);
        }
    }

    writer.draw_quote(quote, QUOTE_FONT);
    canvas
}
