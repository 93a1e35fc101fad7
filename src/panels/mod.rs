//! The six content panels.
//!
//! A panel is a pure consumer of `{theme, data}`: it renders into a window-
//! local buffer and reacts to the input the shell routes to it. Panels never
//! touch the window store; visibility, stacking and dragging live one layer
//! up in the desktop shell.

pub mod about;
pub mod contact;
pub mod education;
pub mod projects;
pub mod skills;
pub mod terminal;

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Text};
use ratatui::widgets::{Paragraph, Widget};

use crate::config::Config;
use crate::theme::Theme;
use crate::window::PanelKind;

/// Per-frame context handed to every panel call.
pub struct PanelContext {
    pub theme: Theme,
    /// Whether this panel's window currently has focus.
    pub focused: bool,
    pub now: Instant,
}

pub trait Panel {
    /// Render the panel body into `area` of `buffer`. Coordinates are
    /// window-local; the shell composites the buffer onto the desktop.
    fn render(&mut self, buffer: &mut Buffer, area: Rect, ctx: &PanelContext);

    /// Timed updates, once per frame tick.
    fn tick(&mut self, _ctx: &PanelContext) {}

    /// Key input while this panel's window is focused. Returning true
    /// consumes the key before global bindings see it.
    fn handle_key(&mut self, _key: &KeyEvent, _ctx: &PanelContext) -> bool {
        false
    }

    /// Pointer click at body-local coordinates.
    fn handle_click(&mut self, _column: u16, _row: u16, _ctx: &PanelContext) {}

    /// Wheel scroll, positive toward the end of the content.
    fn handle_scroll(&mut self, _delta: isize) {}
}

/// Deferred scroll offset. Wheel and key input `bump` a queued delta; the
/// next render `apply`s it against the actual content and viewport sizes,
/// which are only known at draw time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollState {
    pub offset: usize,
    queued: isize,
}

impl ScrollState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn bump(&mut self, delta: isize) {
        self.queued = self.queued.saturating_add(delta);
    }

    /// Settle the queued delta and clamp to the scrollable range. Also
    /// pulls the offset back in when the content shrank under it.
    pub fn apply(&mut self, total: usize, view: usize) {
        let moved = self.offset.saturating_add_signed(self.queued);
        self.queued = 0;
        self.offset = moved.min(total.saturating_sub(view));
    }
}

/// Arrow/page keys drive the given scroll state. Returns true when the key
/// was a scroll key.
pub(crate) fn scroll_key(scroll: &mut ScrollState, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Up => {
            scroll.bump(-1);
            true
        }
        KeyCode::Down => {
            scroll.bump(1);
            true
        }
        KeyCode::PageUp => {
            scroll.bump(-8);
            true
        }
        KeyCode::PageDown => {
            scroll.bump(8);
            true
        }
        _ => false,
    }
}

/// Render pre-built lines with the scroll state applied.
pub(crate) fn render_lines(
    buffer: &mut Buffer,
    area: Rect,
    lines: Vec<Line<'static>>,
    scroll: &mut ScrollState,
    style: Style,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    scroll.apply(lines.len(), area.height as usize);
    Paragraph::new(Text::from(lines))
        .style(style)
        .scroll((scroll.offset as u16, 0))
        .render(area, buffer);
}

/// Greedy word wrap. Words longer than `width` overflow their line and get
/// clipped by the renderer.
pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len == 0 {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// All six panels, owned by the desktop shell.
pub struct PanelSet {
    pub about: about::AboutPanel,
    pub projects: projects::ProjectsPanel,
    pub terminal: terminal::TerminalPanel,
    pub skills: skills::SkillsPanel,
    pub education: education::EducationPanel,
    pub contact: contact::ContactPanel,
}

impl PanelSet {
    pub fn new(config: &Config) -> Self {
        Self {
            about: about::AboutPanel::new(),
            projects: projects::ProjectsPanel::new(
                config.projects_url.clone(),
                config.offline,
            ),
            terminal: terminal::TerminalPanel::new(),
            skills: skills::SkillsPanel::new(),
            education: education::EducationPanel::new(),
            contact: contact::ContactPanel::new(
                config.contact_url.clone(),
                config.offline,
                config.contact_reset,
            ),
        }
    }

    pub fn get_mut(&mut self, kind: PanelKind) -> &mut dyn Panel {
        match kind {
            PanelKind::About => &mut self.about,
            PanelKind::Projects => &mut self.projects,
            PanelKind::Terminal => &mut self.terminal,
            PanelKind::Skills => &mut self.skills,
            PanelKind::Education => &mut self.education,
            PanelKind::Contact => &mut self.contact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_clamps_to_content() {
        let mut scroll = ScrollState::default();
        scroll.bump(100);
        scroll.apply(30, 10);
        assert_eq!(scroll.offset, 20);
        scroll.bump(-5);
        scroll.apply(30, 10);
        assert_eq!(scroll.offset, 15);
        scroll.bump(-100);
        scroll.apply(30, 10);
        assert_eq!(scroll.offset, 0);
    }

    #[test]
    fn scroll_shrinks_with_content() {
        let mut scroll = ScrollState::default();
        scroll.bump(50);
        scroll.apply(60, 10);
        assert_eq!(scroll.offset, 50);
        // content shrank below the stored offset
        scroll.apply(15, 10);
        assert_eq!(scroll.offset, 5);
    }

    #[test]
    fn wrap_respects_width() {
        let lines = wrap_text("one two three four five", 9);
        assert_eq!(lines, vec!["one two", "three", "four five"]);
        for line in &lines {
            assert!(line.chars().count() <= 9);
        }
    }

    #[test]
    fn wrap_handles_empty_and_zero_width() {
        assert!(wrap_text("", 10).is_empty());
        assert!(wrap_text("words here", 0).is_empty());
    }
}
