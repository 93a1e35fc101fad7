//! Education and work-experience timelines behind a two-tab header.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use super::{Panel, PanelContext, ScrollState, render_lines, scroll_key, wrap_text};
use crate::theme;
use crate::ui::put_text;

struct EducationEntry {
    degree: &'static str,
    institution: &'static str,
    location: &'static str,
    period: &'static str,
    description: &'static str,
}

struct ExperienceEntry {
    position: &'static str,
    company: &'static str,
    location: &'static str,
    period: &'static str,
    description: &'static str,
    responsibilities: &'static [&'static str],
    technologies: &'static [&'static str],
}

const EDUCATION: [EducationEntry; 6] = [
    EducationEntry {
        degree: "BSc (Hons) in Software Engineering",
        institution: "General Sir John Kotelawala Defence University",
        location: "Colombo, SL",
        period: "2025 - present",
        description: "Specialized in Software Engineering. Thesis on Machine Learning \
                      Applications in Fullstack Development.",
    },
    EducationEntry {
        degree: "Full-Stack Master Diploma",
        institution: "Developer Stacks Academy",
        location: "Colombo, SL",
        period: "2024 - 2025",
        description: "Comprehensive study in Enterprise Systems, programming, and software \
                      development methodologies.",
    },
    EducationEntry {
        degree: "CCNA: Introduction to Networks",
        institution: "Cisco Networking Academy",
        location: "San Francisco, USA",
        period: "2025",
        description: "Fundamentals of networking, including network protocols, IP addressing, \
                      and network security.",
    },
    EducationEntry {
        degree: "Network Technician Career Path",
        institution: "Cisco Networking Academy",
        location: "San Francisco, USA",
        period: "2025",
        description: "In-depth knowledge of network infrastructure, troubleshooting, and \
                      maintenance.",
    },
    EducationEntry {
        degree: "Ethical Hacker",
        institution: "Cisco Networking Academy",
        location: "San Francisco, USA",
        period: "2025",
        description: "Comprehensive understanding of ethical hacking techniques, penetration \
                      testing, and cybersecurity principles.",
    },
    EducationEntry {
        degree: "Multi Cloud Network Associate",
        institution: "Aviatrix",
        location: "Santa Clara, USA",
        period: "2025",
        description: "Focused on multi-cloud networking concepts, cloud security, and network \
                      automation across various cloud platforms.",
    },
];

const EXPERIENCE: [ExperienceEntry; 3] = [
    ExperienceEntry {
        position: "Founder & Lead Developer",
        company: "Rusoft ltd.",
        location: "Colombo, SL",
        period: "2024 - present",
        description: "Leading a software development startup focused on delivering innovative \
                      web solutions.",
        responsibilities: &[
            "Founded and managed a software development company specializing in web applications",
            "Oversaw project management, client relations, and business development",
            "Implemented agile methodologies to streamline development processes",
        ],
        technologies: &[
            "HTML5",
            "CSS3",
            "JavaScript",
            "React",
            "Angular",
            "Node.js",
            "Spring Boot",
            "Sass",
            "Figma",
        ],
    },
    ExperienceEntry {
        position: "Full-Stack Developer",
        company: "Upwork",
        location: "Remote",
        period: "2024 - present",
        description: "Providing end-to-end web development services to clients on the Upwork \
                      platform.",
        responsibilities: &[
            "Built scalable web applications using MERN stack technologies",
            "Integrated third-party APIs to enhance application functionality",
            "Conducted code reviews and implemented best practices for code quality",
            "Managed deployment and monitoring of applications on cloud platforms",
        ],
        technologies: &[
            "Spring Boot",
            "Node.js",
            "Express.js",
            "MongoDB",
            "React",
            "Angular",
        ],
    },
    ExperienceEntry {
        position: "Full-Stack Developer",
        company: "Fiverr",
        location: "Remote",
        period: "2024 - Present",
        description: "Delivering full-stack development solutions for diverse clients on the \
                      Fiverr platform.",
        responsibilities: &[
            "Developed and maintained web applications using React, Node.js, and AWS",
            "Collaborated with clients to gather requirements and deliver tailored solutions",
            "Implemented responsive designs ensuring cross-device compatibility",
            "Optimized application performance leading to a 30% reduction in load times",
        ],
        technologies: &[
            "React",
            "Node.js",
            "AWS",
            "MongoDB",
            "Docker",
            "TypeScript",
            "MYSQL",
            "Angular",
            "Spring Boot",
        ],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Education,
    Experience,
}

impl Tab {
    fn label(self) -> &'static str {
        match self {
            Tab::Education => "Education",
            Tab::Experience => "Experience",
        }
    }

    fn accent(self) -> Color {
        match self {
            Tab::Education => Color::Rgb(0x35, 0x84, 0xe4),
            Tab::Experience => Color::Rgb(0x33, 0xd1, 0x7a),
        }
    }
}

pub struct EducationPanel {
    tab: Tab,
    education_scroll: ScrollState,
    experience_scroll: ScrollState,
    /// Column ranges of the two tab labels on the header row, recorded at
    /// render time for click hit-testing.
    tab_spans: [(u16, u16); 2],
}

impl EducationPanel {
    pub fn new() -> Self {
        Self {
            tab: Tab::Education,
            education_scroll: ScrollState::default(),
            experience_scroll: ScrollState::default(),
            tab_spans: [(0, 0); 2],
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.tab
    }

    fn active_scroll(&mut self) -> &mut ScrollState {
        match self.tab {
            Tab::Education => &mut self.education_scroll,
            Tab::Experience => &mut self.experience_scroll,
        }
    }

    fn education_lines(&self, width: usize, base: Style, muted: Style) -> Vec<Line<'static>> {
        let accent = base.fg(Tab::Education.accent()).add_modifier(Modifier::BOLD);
        let mut lines = Vec::new();
        for entry in &EDUCATION {
            lines.push(Line::from(Span::styled(
                format!("▸ {}", entry.degree),
                accent,
            )));
            lines.push(Line::from(Span::styled(
                format!("  {}", entry.institution),
                base,
            )));
            lines.push(Line::from(Span::styled(
                format!("  {} · {}", entry.location, entry.period),
                muted,
            )));
            for row in wrap_text(entry.description, width.saturating_sub(2)) {
                lines.push(Line::from(Span::styled(format!("  {row}"), base)));
            }
            lines.push(Line::default());
        }
        lines
    }

    fn experience_lines(&self, width: usize, base: Style, muted: Style) -> Vec<Line<'static>> {
        let accent = base
            .fg(Tab::Experience.accent())
            .add_modifier(Modifier::BOLD);
        let mut lines = Vec::new();
        for entry in &EXPERIENCE {
            lines.push(Line::from(Span::styled(
                format!("▸ {}", entry.position),
                accent,
            )));
            lines.push(Line::from(Span::styled(
                format!("  {} · {} · {}", entry.company, entry.location, entry.period),
                muted,
            )));
            for row in wrap_text(entry.description, width.saturating_sub(2)) {
                lines.push(Line::from(Span::styled(format!("  {row}"), base)));
            }
            for responsibility in entry.responsibilities {
                let wrapped = wrap_text(responsibility, width.saturating_sub(4));
                for (index, row) in wrapped.into_iter().enumerate() {
                    let prefix = if index == 0 { "  • " } else { "    " };
                    lines.push(Line::from(Span::styled(format!("{prefix}{row}"), base)));
                }
            }
            let tech = format!("  Tech: {}", entry.technologies.join(", "));
            for row in wrap_text(&tech, width) {
                lines.push(Line::from(Span::styled(row, muted)));
            }
            lines.push(Line::default());
        }
        lines
    }
}

impl Default for EducationPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for EducationPanel {
    fn render(&mut self, buffer: &mut Buffer, area: Rect, ctx: &PanelContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let base = Style::default()
            .fg(theme::window_fg(ctx.theme))
            .bg(theme::window_bg(ctx.theme));
        let muted = base.fg(theme::window_fg_muted(ctx.theme));

        // Header row with the two tabs.
        let mut cursor = area.x + 1;
        for (index, tab) in [Tab::Education, Tab::Experience].into_iter().enumerate() {
            let label = format!(" {} ", tab.label());
            let style = if tab == self.tab {
                base.fg(tab.accent())
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                muted
            };
            put_text(buffer, area, cursor, area.y, &label, style);
            let width = label.chars().count() as u16;
            self.tab_spans[index] = (cursor - area.x, cursor - area.x + width);
            cursor += width + 2;
        }

        let body_area = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height.saturating_sub(1),
        };
        let width = body_area.width as usize;
        let lines = match self.tab {
            Tab::Education => self.education_lines(width, base, muted),
            Tab::Experience => self.experience_lines(width, base, muted),
        };
        let scroll = self.active_scroll();
        render_lines(buffer, body_area, lines, scroll, base);
    }

    fn handle_key(&mut self, key: &KeyEvent, _ctx: &PanelContext) -> bool {
        match key.code {
            KeyCode::Left => {
                self.tab = Tab::Education;
                true
            }
            KeyCode::Right => {
                self.tab = Tab::Experience;
                true
            }
            _ => scroll_key(self.active_scroll(), key),
        }
    }

    fn handle_click(&mut self, column: u16, row: u16, _ctx: &PanelContext) {
        if row != 0 {
            return;
        }
        let [education, experience] = self.tab_spans;
        if column >= education.0 && column < education.1 {
            self.tab = Tab::Education;
        } else if column >= experience.0 && column < experience.1 {
            self.tab = Tab::Experience;
        }
    }

    fn handle_scroll(&mut self, delta: isize) {
        self.active_scroll().bump(delta);
    }
}
