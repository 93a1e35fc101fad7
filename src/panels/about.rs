//! The welcome card.

use crossterm::event::KeyEvent;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use super::{Panel, PanelContext, ScrollState, render_lines, scroll_key, wrap_text};
use crate::theme;
use crate::window::PanelKind;

const NAME: &str = "Ushan Rashmika";
const ROLE: &str = "Full-Stack Developer";
const TAGLINE: &str = "Based in Sri Lanka · Open to opportunities";

const PARAGRAPHS: [&str; 3] = [
    "Hey there! I'm a passionate full-stack developer who loves building \
     elegant solutions to complex problems. I specialize in modern web \
     technologies and have a keen eye for user experience.",
    "My journey in software development has led me through various exciting \
     projects, from responsive web applications to scalable backend systems. \
     I believe in writing clean, maintainable code and staying updated with \
     the latest industry trends.",
    "When I'm not coding, you can find me exploring new technologies, \
     contributing to open-source projects, or sharing knowledge with the \
     developer community.",
];

const TIP: &str = "Tip: Drag windows around to arrange your workspace";

#[derive(Default)]
pub struct AboutPanel {
    scroll: ScrollState,
}

impl AboutPanel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Panel for AboutPanel {
    fn render(&mut self, buffer: &mut Buffer, area: Rect, ctx: &PanelContext) {
        let body = Style::default()
            .fg(theme::window_fg(ctx.theme))
            .bg(theme::window_bg(ctx.theme));
        let muted = body.fg(theme::window_fg_muted(ctx.theme));
        let accent = body.fg(theme::accent(PanelKind::About));
        let width = area.width.saturating_sub(2) as usize;

        let mut lines = vec![
            Line::from(Span::styled(NAME, body.add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(ROLE, accent)),
            Line::from(Span::styled(TAGLINE, muted)),
        ];
        for paragraph in PARAGRAPHS {
            lines.push(Line::default());
            for row in wrap_text(paragraph, width) {
                lines.push(Line::from(Span::styled(row, body)));
            }
        }
        lines.push(Line::default());
        for row in wrap_text(TIP, width) {
            lines.push(Line::from(Span::styled(
                row,
                muted.add_modifier(Modifier::ITALIC),
            )));
        }

        render_lines(buffer, area, lines, &mut self.scroll, body);
    }

    fn handle_key(&mut self, key: &KeyEvent, _ctx: &PanelContext) -> bool {
        scroll_key(&mut self.scroll, key)
    }

    fn handle_scroll(&mut self, delta: isize) {
        self.scroll.bump(delta);
    }
}
