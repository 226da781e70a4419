//! Layout, wiring and endpoint constants shared across the render and panel
//! modules. Everything here is fixed at compile time; the CLI only selects
//! device paths and output mode.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10, FONT_9X15};
use embedded_graphics::mono_font::MonoFont;

/// The total width of the e-paper panel in pixels.
pub const PANEL_WIDTH: u32 = 480;
/// The total height of the e-paper panel in pixels.
pub const PANEL_HEIGHT: u32 = 280;

/// Top-left of the first title line.
pub const CURSOR_ORIGIN: (i32, i32) = (15, 5);
/// Vertical advance applied after every title and to-do line.
pub const LINE_HEIGHT: i32 = 15;
/// The strike line sits this far below the vertical midpoint of a to-do line.
pub const STRIKE_DROP: i32 = 2;

/// Outline of the quote region on the right-hand side of the panel.
pub const QUOTE_FRAME_TOP_LEFT: (i32, i32) = (250, 10);
pub const QUOTE_FRAME_BOTTOM_RIGHT: (i32, i32) = (470, 270);
/// The first wrapped quote line is drawn here.
pub const QUOTE_ORIGIN: (i32, i32) = (255, 15);
/// Vertical advance per wrapped quote line.
pub const QUOTE_LINE_HEIGHT: i32 = 10;
/// A quote line stops accepting words once it reaches this many characters.
pub const QUOTE_WRAP_COLUMNS: usize = 25;

/// Font for the per-date title lines.
pub const TITLE_FONT: &MonoFont<'static> = &FONT_10X20;
/// Font for the to-do lines themselves.
pub const BODY_FONT: &MonoFont<'static> = &FONT_9X15;
/// Small font for the quote region.
pub const QUOTE_FONT: &MonoFont<'static> = &FONT_6X10;

/// Where the to-do service lives.
pub const TODO_API_URL: &str = "http://fridgepi.local:5000/todos";
/// Quote-of-the-day feed; a JSON list whose first element carries `q`.
pub const QUOTE_API_URL: &str = "https://zenquotes.io/api/today";

// Raspberry Pi wiring defaults, overridable from the CLI.
pub const SPI_DEV: &str = "/dev/spidev0.0";
pub const GPIOCHIP_DEV: &str = "/dev/gpiochip0";
/// Data/command select line (BCM numbering).
pub const PIN_DC: u32 = 25;
/// Panel reset line.
pub const PIN_RST: u32 = 17;
/// Controller busy line, high while a refresh is in progress.
pub const PIN_BUSY: u32 = 24;
