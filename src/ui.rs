//! Frame plumbing for the compositor.
//!
//! Windows float at signed coordinates and may hang off any edge of the
//! terminal, while `ratatui::Buffer` only addresses cells inside its own
//! area. Surfaces therefore reach the screen through [`Canvas`]: each
//! window draws into an offscreen buffer of its logical size and is
//! composited with [`Canvas::blit`], which discards the
//! offscreen cells. The bar and icon painters use the bounded write
//! helpers below instead of raw `set_string`.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;

use crate::window::SignedRect;

/// The drawing target for one frame: the visible area plus its buffer.
pub struct Canvas<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Wrap a bare buffer. Tests render the whole desktop this way and
    /// read the cells back.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    /// Copy an offscreen surface onto the frame at a signed position.
    /// `src` is addressed from its own origin; cells that fall outside
    /// the frame are dropped.
    pub fn blit(&mut self, src: &Buffer, dest: SignedRect) {
        let Some(visible) = dest.visible_within(self.area) else {
            return;
        };
        // how much the clip shaved off the top-left of the surface
        let skip_x = (visible.x as i32 - dest.x) as u16;
        let skip_y = (visible.y as i32 - dest.y) as u16;
        for row in 0..visible.height {
            for col in 0..visible.width {
                let from = src.cell((skip_x + col, skip_y + row));
                let to = self.buffer.cell_mut((visible.x + col, visible.y + row));
                if let (Some(from), Some(to)) = (from, to) {
                    *to = from.clone();
                }
            }
        }
    }
}

/// Blank out the part of `area` that lies inside the buffer.
pub(crate) fn fill_rect(buffer: &mut Buffer, area: Rect, style: Style) {
    let target = area.intersection(*buffer.area());
    for y in target.top()..target.bottom() {
        for x in target.left()..target.right() {
            if let Some(cell) = buffer.cell_mut((x, y)) {
                cell.set_symbol(" ");
                cell.set_style(style);
            }
        }
    }
}

/// Write `text` at `(x, y)`, truncated at the right edge of `bounds`.
/// Writes that start outside `bounds` are dropped entirely.
pub(crate) fn put_text(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if !bounds.contains(Position { x, y }) {
        return;
    }
    let room = bounds.right().saturating_sub(x);
    buffer.set_stringn(x, y, text, room as usize, style);
}
