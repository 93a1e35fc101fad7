//! Contact form with social links and a background submit worker.
//!
//! While this panel's window is focused it owns the keyboard: printable
//! characters, Tab, Enter and Backspace all edit the form instead of
//! triggering desktop shortcuts. Ctrl and Alt chords are left alone so the
//! quit binding keeps working.

use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use tracing::debug;

use super::{Panel, PanelContext, wrap_text};
use crate::net::contact::{ContactMessage, SubmitError, spawn_submit, validate};
use crate::theme;
use crate::ui::put_text;
use crate::window::PanelKind;

const EMAIL: &str = "ushanrashmika23@gmail.com";
const GITHUB: &str = "github.com/ushanrashmika23";
const LINKEDIN: &str = "linkedin.com/in/ushanrashmika23";

/// Rows the message box occupies. The window is fixed-size, so the form
/// layout is too.
const MESSAGE_ROWS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Email,
    Message,
    Send,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Field::Name => Field::Email,
            Field::Email => Field::Message,
            Field::Message => Field::Send,
            Field::Send => Field::Name,
        }
    }

    fn previous(self) -> Self {
        match self {
            Field::Name => Field::Send,
            Field::Email => Field::Name,
            Field::Message => Field::Email,
            Field::Send => Field::Message,
        }
    }
}

enum SubmitPhase {
    Idle,
    Sending {
        receiver: Receiver<Result<(), SubmitError>>,
    },
    Sent {
        at: Instant,
    },
    Failed(String),
}

pub struct ContactPanel {
    url: String,
    offline: bool,
    reset_after: Duration,
    focus: Field,
    name: String,
    email: String,
    message: String,
    validation: Option<&'static str>,
    phase: SubmitPhase,
    /// Row ranges of each focusable field in the last render, for clicks.
    field_rows: [(u16, u16); 4],
}

impl ContactPanel {
    pub fn new(url: String, offline: bool, reset_after: Duration) -> Self {
        Self {
            url,
            offline,
            reset_after,
            focus: Field::Name,
            name: String::new(),
            email: String::new(),
            message: String::new(),
            validation: None,
            phase: SubmitPhase::Idle,
            field_rows: [(0, 0); 4],
        }
    }

    fn field_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Name => Some(&mut self.name),
            Field::Email => Some(&mut self.email),
            Field::Message => Some(&mut self.message),
            Field::Send => None,
        }
    }

    fn submit(&mut self) {
        if matches!(self.phase, SubmitPhase::Sending { .. }) {
            return;
        }
        let message = ContactMessage {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
        };
        if let Err(problem) = validate(&message) {
            self.validation = Some(problem);
            return;
        }
        self.validation = None;
        if self.offline {
            self.phase = SubmitPhase::Failed("offline mode - message not sent".to_string());
            return;
        }
        debug!(url = %self.url, "submitting contact message");
        self.phase = SubmitPhase::Sending {
            receiver: spawn_submit(self.url.clone(), message),
        };
    }

    fn clear_form(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
        self.focus = Field::Name;
    }

    fn button_label(&self) -> &'static str {
        match self.phase {
            SubmitPhase::Sending { .. } => " Sending... ",
            SubmitPhase::Sent { .. } => " Sent ",
            _ => " Send Message ",
        }
    }
}

impl Panel for ContactPanel {
    fn render(&mut self, buffer: &mut Buffer, area: Rect, ctx: &PanelContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let base = Style::default()
            .fg(theme::window_fg(ctx.theme))
            .bg(theme::window_bg(ctx.theme));
        let muted = base.fg(theme::window_fg_muted(ctx.theme));
        let accent = base.fg(theme::accent(PanelKind::Contact));
        let width = area.width as usize;

        let mut row = area.y;
        let put = |buffer: &mut Buffer, row: u16, text: &str, style: Style| {
            put_text(buffer, area, area.x + 1, row, text, style);
        };

        put(
            buffer,
            row,
            "Get In Touch",
            accent.add_modifier(Modifier::BOLD),
        );
        row += 1;
        put(buffer, row, &format!("✉ {EMAIL}"), muted);
        row += 1;
        put(buffer, row, &format!("⌗ {GITHUB}"), muted);
        row += 1;
        put(buffer, row, &format!("in {LINKEDIN}"), muted);
        row += 2;

        let mut field_rows = [(0u16, 0u16); 4];
        let mut draw_input =
            |buffer: &mut Buffer, row: &mut u16, label: &str, value: &str, field: Field| {
                let focused = ctx.focused && self.focus == field;
                let prefix_style = if focused { accent } else { muted };
                let prefix = if focused { "▌" } else { "│" };
                let mut text = format!("{prefix} {label}: {value}");
                if focused {
                    text.push('▏');
                }
                let label_style = if focused { base } else { muted };
                put(buffer, *row, &text, label_style);
                put_text(buffer, area, area.x + 1, *row, prefix, prefix_style);
                field_rows[field as usize] = (*row - area.y, *row - area.y + 1);
                *row += 1;
            };

        draw_input(buffer, &mut row, "Name", &self.name, Field::Name);
        draw_input(buffer, &mut row, "Email", &self.email, Field::Email);

        // Message spans a label-style prefix row plus wrapped body rows.
        let message_start = row - area.y;
        let message_focused = ctx.focused && self.focus == Field::Message;
        let prefix = if message_focused { "▌" } else { "│" };
        let prefix_style = if message_focused { accent } else { muted };
        let mut body = self.message.clone();
        if message_focused {
            body.push('▏');
        }
        // hard newlines from Enter stay line breaks; each segment wraps
        let mut rows: Vec<String> = Vec::new();
        for segment in body.split('\n') {
            let wrapped = wrap_text(segment, width.saturating_sub(4));
            if wrapped.is_empty() {
                rows.push(String::new());
            } else {
                rows.extend(wrapped);
            }
        }
        // show the tail so the caret stays visible while typing
        let skip = rows.len().saturating_sub(MESSAGE_ROWS);
        let rows: Vec<String> = rows.into_iter().skip(skip).collect();
        put(
            buffer,
            row,
            &format!("{prefix} Message:"),
            if message_focused { base } else { muted },
        );
        put_text(buffer, area, area.x + 1, row, prefix, prefix_style);
        row += 1;
        for line in &rows {
            put(buffer, row, &format!("{prefix}   {line}"), base);
            put_text(buffer, area, area.x + 1, row, prefix, prefix_style);
            row += 1;
        }
        field_rows[Field::Message as usize] = (message_start, row - area.y);

        row += 1;
        let button_focused = ctx.focused && self.focus == Field::Send;
        let button_style = match self.phase {
            SubmitPhase::Sent { .. } => base
                .fg(theme::success_fg(ctx.theme))
                .add_modifier(Modifier::BOLD),
            _ if button_focused => accent.add_modifier(Modifier::BOLD | Modifier::REVERSED),
            _ => accent.add_modifier(Modifier::BOLD),
        };
        let button = format!("[{}]", self.button_label());
        put(buffer, row, &button, button_style);
        field_rows[Field::Send as usize] = (row - area.y, row - area.y + 1);

        // Problems share the button row so the fixed layout never overflows.
        let note_x = area.x + 2 + button.chars().count() as u16;
        if let Some(problem) = self.validation {
            put_text(
                buffer,
                area,
                note_x,
                row,
                problem,
                base.fg(theme::error_fg(ctx.theme)),
            );
        } else if let SubmitPhase::Failed(reason) = &self.phase {
            put_text(
                buffer,
                area,
                note_x,
                row,
                reason,
                base.fg(theme::error_fg(ctx.theme)),
            );
        }

        self.field_rows = field_rows;
    }

    fn tick(&mut self, ctx: &PanelContext) {
        let next = match &mut self.phase {
            SubmitPhase::Sending { receiver } => match receiver.try_recv() {
                Ok(Ok(())) => Some(SubmitPhase::Sent { at: ctx.now }),
                Ok(Err(error)) => Some(SubmitPhase::Failed(error.to_string())),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    Some(SubmitPhase::Failed("submit worker exited".to_string()))
                }
            },
            SubmitPhase::Sent { at } => {
                if ctx.now.duration_since(*at) >= self.reset_after {
                    Some(SubmitPhase::Idle)
                } else {
                    None
                }
            }
            _ => None,
        };
        if let Some(phase) = next {
            if matches!(phase, SubmitPhase::Idle) {
                self.clear_form();
            }
            self.phase = phase;
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, _ctx: &PanelContext) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            || key.modifiers.contains(KeyModifiers::ALT)
        {
            return false;
        }
        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                true
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                true
            }
            KeyCode::Enter => {
                match self.focus {
                    Field::Send => self.submit(),
                    Field::Message => self.message.push('\n'),
                    _ => self.focus = self.focus.next(),
                }
                true
            }
            KeyCode::Backspace => {
                if let Some(text) = self.field_text_mut() {
                    text.pop();
                }
                true
            }
            KeyCode::Char(c) => {
                if let Some(text) = self.field_text_mut() {
                    text.push(c);
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    fn handle_click(&mut self, _column: u16, row: u16, _ctx: &PanelContext) {
        for (index, &(start, end)) in self.field_rows.iter().enumerate() {
            if row >= start && row < end {
                let field = match index {
                    0 => Field::Name,
                    1 => Field::Email,
                    2 => Field::Message,
                    _ => Field::Send,
                };
                self.focus = field;
                if field == Field::Send {
                    self.submit();
                }
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use std::sync::mpsc;

    fn ctx() -> PanelContext {
        PanelContext {
            theme: Theme::Dark,
            focused: true,
            now: Instant::now(),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(panel: &mut ContactPanel, text: &str) {
        for c in text.chars() {
            panel.handle_key(&key(KeyCode::Char(c)), &ctx());
        }
    }

    fn render_text(panel: &mut ContactPanel, area: Rect) -> String {
        let mut buffer = Buffer::empty(area);
        panel.render(&mut buffer, area, &ctx());
        let mut text = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                if let Some(cell) = buffer.cell((x, y)) {
                    text.push_str(cell.symbol());
                }
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn typing_fills_the_focused_field() {
        let mut panel = ContactPanel::new(String::new(), true, Duration::from_secs(2));
        type_text(&mut panel, "Ada");
        panel.handle_key(&key(KeyCode::Tab), &ctx());
        type_text(&mut panel, "ada@example.com");
        assert_eq!(panel.name, "Ada");
        assert_eq!(panel.email, "ada@example.com");
        panel.handle_key(&key(KeyCode::Backspace), &ctx());
        assert_eq!(panel.email, "ada@example.co");
    }

    #[test]
    fn control_chords_pass_through() {
        let mut panel = ContactPanel::new(String::new(), true, Duration::from_secs(2));
        let chord = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(!panel.handle_key(&chord, &ctx()));
        assert!(panel.name.is_empty());
    }

    #[test]
    fn invalid_email_blocks_submit() {
        let mut panel = ContactPanel::new(String::new(), true, Duration::from_secs(2));
        panel.name = "Ada".to_string();
        panel.email = "not-an-email".to_string();
        panel.message = "Hello".to_string();
        panel.focus = Field::Send;
        panel.handle_key(&key(KeyCode::Enter), &ctx());
        assert_eq!(panel.validation, Some("enter a valid email"));
        assert!(matches!(panel.phase, SubmitPhase::Idle));
    }

    #[test]
    fn offline_submit_fails_without_network() {
        let mut panel = ContactPanel::new(String::new(), true, Duration::from_secs(2));
        panel.name = "Ada".to_string();
        panel.email = "ada@example.com".to_string();
        panel.message = "Hello".to_string();
        panel.focus = Field::Send;
        panel.handle_key(&key(KeyCode::Enter), &ctx());
        assert!(matches!(panel.phase, SubmitPhase::Failed(_)));
    }

    #[test]
    fn sent_state_resets_and_clears_the_form() {
        let mut panel = ContactPanel::new(String::new(), false, Duration::from_millis(0));
        panel.name = "Ada".to_string();
        let (sender, receiver) = mpsc::channel();
        sender.send(Ok(())).ok();
        panel.phase = SubmitPhase::Sending { receiver };
        panel.tick(&ctx());
        assert!(matches!(panel.phase, SubmitPhase::Sent { .. }));
        assert_eq!(panel.button_label(), " Sent ");
        // zero reset duration flips back to idle on the next tick
        panel.tick(&ctx());
        assert!(matches!(panel.phase, SubmitPhase::Idle));
        assert!(panel.name.is_empty());
    }

    #[test]
    fn clicking_the_button_submits() {
        let mut panel = ContactPanel::new(String::new(), true, Duration::from_secs(2));
        panel.name = "Ada".to_string();
        panel.email = "ada@example.com".to_string();
        panel.message = "Hello".to_string();
        render_text(&mut panel, Rect::new(0, 0, 46, 13));
        let (send_row, _) = panel.field_rows[Field::Send as usize];
        panel.handle_click(3, send_row, &ctx());
        assert!(matches!(panel.phase, SubmitPhase::Failed(_)));
    }

    #[test]
    fn form_renders_socials_and_button() {
        let mut panel = ContactPanel::new(String::new(), true, Duration::from_secs(2));
        let text = render_text(&mut panel, Rect::new(0, 0, 46, 13));
        assert!(text.contains("Get In Touch"));
        assert!(text.contains("ushanrashmika23@gmail.com"));
        assert!(text.contains("github.com/ushanrashmika23"));
        assert!(text.contains("linkedin.com/in/ushanrashmika23"));
        assert!(text.contains("[ Send Message ]"));
    }
}
