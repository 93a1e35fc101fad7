//! Single-row status bar across the top of the screen.
//!
//! Left side carries the owner name and one restore chip per minimized
//! window. The clock sits centered, and the right side holds the theme
//! toggle plus battery and connectivity readouts from the host probe.

use chrono::{DateTime, Local};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};

use crate::probe::{BatteryState, HostSnapshot};
use crate::theme::{self, Theme};
use crate::ui::{fill_rect, put_text};
use crate::window::{PanelKind, WindowRecord};

const OWNER: &str = "Ushan Rashmika";

/// Column span on the bar row, half-open.
type Span = (u16, u16);

#[derive(Default)]
pub struct TopBar {
    area: Rect,
    restore_hits: Vec<(Span, PanelKind)>,
    theme_hit: Option<Span>,
}

fn battery_color(theme: Theme, battery: &BatteryState) -> Color {
    if battery.charging {
        theme::success_fg(theme)
    } else if battery.percent <= 20 {
        theme::error_fg(theme)
    } else if battery.percent <= 50 {
        theme::warn_fg(theme)
    } else {
        theme::bar_fg(theme)
    }
}

fn battery_text(battery: &BatteryState) -> String {
    let icon = if battery.charging {
        "↯"
    } else if battery.percent <= 20 {
        "▯"
    } else {
        "▮"
    };
    format!("{icon} {}%", battery.percent)
}

fn clock_text(now: DateTime<Local>) -> String {
    now.format("%H:%M · %a %b %-d").to_string()
}

impl TopBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.area.contains(ratatui::layout::Position { x: column, y: row })
    }

    pub fn hit_test_restore(&self, column: u16, row: u16) -> Option<PanelKind> {
        if row != self.area.y {
            return None;
        }
        self.restore_hits
            .iter()
            .find(|((start, end), _)| column >= *start && column < *end)
            .map(|(_, kind)| *kind)
    }

    pub fn hit_test_theme(&self, column: u16, row: u16) -> bool {
        if row != self.area.y {
            return false;
        }
        self.theme_hit
            .is_some_and(|(start, end)| column >= start && column < end)
    }

    pub fn render(
        &mut self,
        buffer: &mut Buffer,
        area: Rect,
        theme: Theme,
        now: DateTime<Local>,
        minimized: &[WindowRecord],
        snapshot: Option<&HostSnapshot>,
    ) {
        self.area = area;
        self.restore_hits.clear();
        self.theme_hit = None;
        if area.width == 0 || area.height == 0 {
            return;
        }
        let base = Style::default()
            .bg(theme::bar_bg(theme))
            .fg(theme::bar_fg(theme));
        fill_rect(buffer, area, base);
        let row = area.y;

        // left: owner plus restore chips
        let mut x = area.x + 1;
        put_text(buffer, area, x, row, OWNER, base.add_modifier(Modifier::BOLD));
        x += OWNER.chars().count() as u16 + 2;
        for record in minimized {
            let chip = format!(" {} ", record.kind.title());
            let width = chip.chars().count() as u16;
            put_text(buffer, area, x, row, &chip, base.add_modifier(Modifier::REVERSED));
            self.restore_hits.push(((x, x + width), record.kind));
            x += width + 1;
        }

        // right: theme toggle, battery, connectivity
        let toggle = match theme {
            Theme::Dark => "☀",
            Theme::Light => "☾",
        };
        let mut segments: Vec<(String, Style)> = Vec::new();
        segments.push((format!(" {toggle} "), base));
        if let Some(battery) = snapshot.and_then(|snapshot| snapshot.battery.as_ref()) {
            segments.push((
                format!("{} ", battery_text(battery)),
                base.fg(battery_color(theme, battery)),
            ));
        }
        if let Some(snapshot) = snapshot {
            let (icon, color) = if snapshot.online {
                ("◆", theme::success_fg(theme))
            } else {
                ("◇", theme::error_fg(theme))
            };
            segments.push((format!("{icon} "), base.fg(color)));
        }
        let total: u16 = segments
            .iter()
            .map(|(text, _)| text.chars().count() as u16)
            .sum();
        let mut x = area.right().saturating_sub(total);
        for (index, (text, style)) in segments.iter().enumerate() {
            let width = text.chars().count() as u16;
            put_text(buffer, area, x, row, text, *style);
            if index == 0 {
                self.theme_hit = Some((x, x + width));
            }
            x += width;
        }

        // center: clock
        let clock = clock_text(now);
        let clock_width = clock.chars().count() as u16;
        if clock_width < area.width {
            let x = area.x + (area.width - clock_width) / 2;
            put_text(buffer, area, x, row, &clock, base);
        }
    }
}
