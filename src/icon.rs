//! The draggable "Read Journal" icon that sits on the desktop surface.

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};

use crate::constants::{ICON_HEIGHT, ICON_WIDTH};
use crate::theme::{self, Theme};
use crate::ui::put_text;
use crate::window::{Point, SignedRect};

const LABEL: &str = "Read Journal";

pub struct DesktopIcon {
    position: Point,
}

impl DesktopIcon {
    pub fn new(position: Point) -> Self {
        Self { position }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn rect(&self) -> SignedRect {
        SignedRect {
            x: self.position.x,
            y: self.position.y,
            width: ICON_WIDTH,
            height: ICON_HEIGHT,
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.rect().contains(column, row)
    }

    /// Keeps the whole icon inside `bounds`, pinning to the origin when the
    /// desktop is smaller than the icon itself.
    pub fn clamp(position: Point, bounds: Rect) -> Point {
        let max_x = bounds.x as i32 + bounds.width.saturating_sub(ICON_WIDTH) as i32;
        let max_y = bounds.y as i32 + bounds.height.saturating_sub(ICON_HEIGHT) as i32;
        Point {
            x: position.x.clamp(bounds.x as i32, max_x.max(bounds.x as i32)),
            y: position.y.clamp(bounds.y as i32, max_y.max(bounds.y as i32)),
        }
    }

    pub fn render(&self, buffer: &mut Buffer, bounds: Rect, theme: Theme, hovered: bool) {
        let Some(area) = self.rect().visible_within(bounds) else {
            return;
        };
        let badge = Style::default().bg(theme::icon_accent()).fg(Color::White);
        // 4x2 folder badge centered above the label
        let badge_x = self.position.x + (ICON_WIDTH as i32 - 4) / 2;
        for row in 0..2i32 {
            for col in 0..4i32 {
                let x = badge_x + col;
                let y = self.position.y + row;
                if x >= 0
                    && y >= 0
                    && area.contains(Position {
                        x: x as u16,
                        y: y as u16,
                    })
                    && let Some(cell) = buffer.cell_mut((x as u16, y as u16))
                {
                    cell.set_symbol(" ");
                    cell.set_style(badge);
                }
            }
        }
        let glyph_x = badge_x + 1;
        let glyph_y = self.position.y;
        if glyph_x >= 0
            && glyph_y >= 0
            && area.contains(Position {
                x: glyph_x as u16,
                y: glyph_y as u16,
            })
            && let Some(cell) = buffer.cell_mut((glyph_x as u16, glyph_y as u16))
        {
            cell.set_symbol("▤");
        }

        let mut label_style = Style::default().fg(theme::desktop_fg(theme));
        if hovered {
            label_style = label_style.add_modifier(Modifier::REVERSED);
        }
        let label_x = self.position.x + (ICON_WIDTH as i32 - LABEL.len() as i32) / 2;
        let label_y = self.position.y + 2;
        if label_x >= 0 && label_y >= 0 {
            put_text(
                buffer,
                area,
                label_x as u16,
                label_y as u16,
                LABEL,
                label_style,
            );
        }
    }
}
