//! Bottom dock strip with one launcher per window and active dots.

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};

use crate::theme::{self, Theme};
use crate::ui::{fill_rect, put_text};
use crate::window::{PanelKind, WindowStore};

/// Column span on the item row, half-open.
type Span = (u16, u16);

#[derive(Default)]
pub struct Dock {
    area: Rect,
    item_hits: Vec<(Span, PanelKind)>,
}

impl Dock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.area.contains(Position { x: column, y: row })
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<PanelKind> {
        if row != self.area.y {
            return None;
        }
        self.item_hits
            .iter()
            .find(|((start, end), _)| column >= *start && column < *end)
            .map(|(_, kind)| *kind)
    }

    /// Center cell of an item in the last rendered strip. Minimize
    /// animations aim here.
    pub fn item_center(&self, kind: PanelKind) -> Option<(u16, u16)> {
        self.item_hits
            .iter()
            .find(|(_, k)| *k == kind)
            .map(|((start, end), _)| ((start + end) / 2, self.area.y))
    }

    pub fn render(
        &mut self,
        buffer: &mut Buffer,
        area: Rect,
        theme: Theme,
        store: &WindowStore,
        hover: Option<(u16, u16)>,
    ) {
        self.area = area;
        self.item_hits.clear();
        if area.width == 0 || area.height == 0 {
            return;
        }
        let base = Style::default()
            .bg(theme::bar_bg(theme))
            .fg(theme::bar_fg(theme));
        fill_rect(buffer, area, base);

        let total: u16 = PanelKind::ALL
            .iter()
            .map(|kind| kind.dock_label().chars().count() as u16 + 4)
            .sum();
        let mut x = area.x + area.width.saturating_sub(total) / 2;
        let item_row = area.y;
        let dot_row = area.y + 1;

        for kind in PanelKind::ALL {
            let label = kind.dock_label();
            let width = label.chars().count() as u16 + 4;
            let span = (x, x + width);
            let hovered = hover.is_some_and(|(column, row)| {
                row == item_row && column >= span.0 && column < span.1
            });
            let accent = theme::accent(kind);
            let item_style = if hovered {
                base.add_modifier(Modifier::REVERSED)
            } else {
                base
            };
            put_text(buffer, area, x, item_row, " ", item_style);
            put_text(buffer, area, x + 1, item_row, kind.glyph(), item_style.fg(accent));
            put_text(
                buffer,
                area,
                x + 2,
                item_row,
                &format!(" {label} "),
                item_style,
            );

            let active = store.get(kind.id()).is_some_and(|record| !record.minimized);
            if active && dot_row < area.bottom() {
                let dot_x = x + width / 2;
                put_text(buffer, area, dot_x, dot_row, "•", base.fg(accent));
            }

            self.item_hits.push((span, kind));
            x += width;
        }
    }
}
