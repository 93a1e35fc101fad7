//! Skill categories with per-item level bars.

use crossterm::event::KeyEvent;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use super::{Panel, PanelContext, ScrollState, render_lines, scroll_key};
use crate::theme;

struct Category {
    title: &'static str,
    color: (u8, u8, u8),
    skills: &'static [(&'static str, u8)],
}

const CATEGORIES: [Category; 4] = [
    Category {
        title: "Frontend",
        color: (0x35, 0x84, 0xe4),
        skills: &[
            ("JavaScript", 90),
            ("TypeScript", 85),
            ("React", 90),
            ("Next.js", 75),
            ("Angular", 70),
            ("CSS", 85),
            ("TailwindCSS", 85),
        ],
    },
    Category {
        title: "Backend",
        color: (0x33, 0xd1, 0x7a),
        skills: &[
            ("Node.js", 85),
            ("Java", 75),
            ("Spring Boot", 70),
            ("Python", 65),
            ("ExpressJs", 80),
        ],
    },
    Category {
        title: "Databases",
        color: (0xf6, 0xd3, 0x2d),
        skills: &[("PostgreSQL", 70), ("MongoDB", 80), ("MySQL", 75)],
    },
    Category {
        title: "Tools & Others",
        color: (0xe0, 0x1b, 0x24),
        skills: &[
            ("Git", 90),
            ("Docker", 75),
            ("Linux", 85),
            ("AWS", 65),
            ("CI/CD", 70),
            ("Figma", 60),
        ],
    },
];

const FOOTER: &str = "Continuously learning and expanding my tech stack";

const BAR_WIDTH: usize = 10;

fn level_bar(level: u8) -> String {
    let filled = (level as usize * BAR_WIDTH).div_ceil(100).min(BAR_WIDTH);
    let mut bar = String::with_capacity(BAR_WIDTH * 3);
    for _ in 0..filled {
        bar.push('█');
    }
    for _ in filled..BAR_WIDTH {
        bar.push('░');
    }
    bar
}

#[derive(Default)]
pub struct SkillsPanel {
    scroll: ScrollState,
}

impl SkillsPanel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Panel for SkillsPanel {
    fn render(&mut self, buffer: &mut Buffer, area: Rect, ctx: &PanelContext) {
        let body = Style::default()
            .fg(theme::window_fg(ctx.theme))
            .bg(theme::window_bg(ctx.theme));
        let muted = body.fg(theme::window_fg_muted(ctx.theme));

        let mut lines = vec![Line::from(Span::styled(
            "Skills & Technologies",
            body.add_modifier(Modifier::BOLD),
        ))];
        for category in &CATEGORIES {
            let (r, g, b) = category.color;
            let accent = body.fg(Color::Rgb(r, g, b));
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                format!("■ {}", category.title),
                accent.add_modifier(Modifier::BOLD),
            )));
            for (name, level) in category.skills {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {name:<14}"), body),
                    Span::styled(level_bar(*level), accent),
                    Span::styled(format!(" {level:>3}%"), muted),
                ]));
            }
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            FOOTER,
            muted.add_modifier(Modifier::ITALIC),
        )));

        render_lines(buffer, area, lines, &mut self.scroll, body);
    }

    fn handle_key(&mut self, key: &KeyEvent, _ctx: &PanelContext) -> bool {
        scroll_key(&mut self.scroll, key)
    }

    fn handle_scroll(&mut self, delta: isize) {
        self.scroll.bump(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_scale_with_level() {
        assert_eq!(level_bar(0), "░░░░░░░░░░");
        assert_eq!(level_bar(100), "██████████");
        assert_eq!(level_bar(75), "████████░░");
        assert_eq!(level_bar(61), "███████░░░");
    }

    #[test]
    fn every_category_has_skills() {
        for category in &CATEGORIES {
            assert!(!category.skills.is_empty(), "{}", category.title);
            for (_, level) in category.skills {
                assert!(*level <= 100);
            }
        }
    }
}
