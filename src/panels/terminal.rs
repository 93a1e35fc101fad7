//! The scripted terminal session.
//!
//! A fixed script replays as a typing animation: every character costs
//! 20 ms, every completed line adds a 100 ms pause. The animation is a pure
//! function of the elapsed time since `start`, so rendering never stores
//! per-character state and a manual clock can scrub to any point.

use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use super::{Panel, PanelContext, ScrollState, render_lines, scroll_key};
use crate::constants::{CURSOR_BLINK_MS, TYPE_CHAR_MS, TYPE_LINE_PAUSE_MS, TYPE_START_DELAY_MS};
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Command,
    Output,
}

struct ScriptLine {
    kind: LineKind,
    text: &'static str,
}

const fn command(text: &'static str) -> ScriptLine {
    ScriptLine {
        kind: LineKind::Command,
        text,
    }
}

const fn output(text: &'static str) -> ScriptLine {
    ScriptLine {
        kind: LineKind::Output,
        text,
    }
}

const SCRIPT: [ScriptLine; 32] = [
    command("$ whoami"),
    command("ushan@portfolio:~$ cat welcome.txt"),
    output(""),
    output("╔═══════════════════════════════════════╗"),
    output("║ Welcome to Ushan Rashmika's Portfolio ║"),
    output("╚═══════════════════════════════════════╝"),
    output(""),
    output("> Full-Stack Developer"),
    output("> Passionate about clean code and UI/UX"),
    output("> Building web applications since 2023"),
    output(""),
    command("$ ls -la skills/"),
    output(""),
    output("drwxr-xr-x  frontend/"),
    output("drwxr-xr-x  backend/"),
    output("drwxr-xr-x  databases/"),
    output("drwxr-xr-x  tools/"),
    output(""),
    command("$ cat about.txt"),
    output(""),
    output("Hi! I'm a passionate developer who loves creating"),
    output("elegant solutions to complex problems."),
    output(""),
    output("Frontend: React, Angular, TypeScript, Tailwind"),
    output("Backend: Node.js, Spring Boot, ExpressJs"),
    output("Database: MYSQL, MongoDB"),
    output("Tools: Git, Docker, AWS, Linux"),
    output(""),
    command("$ echo \"Let's build something amazing!\""),
    output("Let's build something amazing!"),
    output(""),
    command("ushan@portfolio:~$ _"),
];

/// How much of the script is revealed after `elapsed` of typing time:
/// `(completed_lines, characters_of_the_next_line)`.
fn reveal_at(elapsed: Duration) -> (usize, usize) {
    let mut remaining = elapsed.as_millis() as u64;
    for (index, line) in SCRIPT.iter().enumerate() {
        let chars = line.text.chars().count() as u64;
        let cost = chars * TYPE_CHAR_MS + TYPE_LINE_PAUSE_MS;
        if remaining >= cost {
            remaining -= cost;
        } else {
            let typed = (remaining / TYPE_CHAR_MS).min(chars) as usize;
            return (index, typed);
        }
    }
    (SCRIPT.len(), 0)
}

pub struct TerminalPanel {
    started_at: Option<Instant>,
    scroll: ScrollState,
    user_scrolled: bool,
}

impl TerminalPanel {
    pub fn new() -> Self {
        Self {
            started_at: None,
            scroll: ScrollState::default(),
            user_scrolled: false,
        }
    }

    /// Raised once by the shell when the boot sequence finishes. The first
    /// character appears a settle delay later.
    pub fn start(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    fn typing_elapsed(&self, now: Instant) -> Option<Duration> {
        let started = self.started_at?;
        now.duration_since(started)
            .checked_sub(Duration::from_millis(TYPE_START_DELAY_MS))
    }
}

impl Default for TerminalPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for TerminalPanel {
    fn render(&mut self, buffer: &mut Buffer, area: Rect, ctx: &PanelContext) {
        let base = Style::default()
            .fg(theme::term_fg(ctx.theme))
            .bg(theme::term_bg(ctx.theme));
        let command_style = base.fg(theme::term_prompt(ctx.theme));
        let output_style = base.fg(theme::term_output(ctx.theme));
        let style_for = |kind: LineKind| match kind {
            LineKind::Command => command_style,
            LineKind::Output => output_style,
        };

        let (full, typed) = match self.typing_elapsed(ctx.now) {
            Some(elapsed) => reveal_at(elapsed),
            None => (0, 0),
        };
        let blink_on = match self.started_at {
            Some(started) => {
                let phase = ctx.now.duration_since(started).as_millis() / CURSOR_BLINK_MS as u128;
                phase % 2 == 0
            }
            None => true,
        };

        let mut lines: Vec<Line<'static>> = Vec::with_capacity(full + 1);
        for line in SCRIPT.iter().take(full) {
            lines.push(Line::from(Span::styled(line.text, style_for(line.kind))));
        }
        if full < SCRIPT.len() {
            let line = &SCRIPT[full];
            let mut partial: String = line.text.chars().take(typed).collect();
            if blink_on {
                partial.push('▊');
            }
            lines.push(Line::from(Span::styled(partial, style_for(line.kind))));
        } else if blink_on {
            lines.push(Line::from(Span::styled("▊", command_style)));
        }

        // Follow the tail while the script types, unless the user took over.
        let finished = full >= SCRIPT.len();
        if !finished && !self.user_scrolled {
            self.scroll.offset = lines.len().saturating_sub(area.height as usize);
        }
        render_lines(buffer, area, lines, &mut self.scroll, base);
    }

    fn handle_key(&mut self, key: &KeyEvent, _ctx: &PanelContext) -> bool {
        if scroll_key(&mut self.scroll, key) {
            self.user_scrolled = true;
            return true;
        }
        false
    }

    fn handle_scroll(&mut self, delta: isize) {
        self.user_scrolled = true;
        self.scroll.bump(delta);
    }
}
