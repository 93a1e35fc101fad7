//! Project cards fetched from the journal backend.
//!
//! The fetch runs on a worker thread so the frame loop never blocks on the
//! network. The panel stays in [`FetchPhase::Idle`] until the window first
//! becomes visible, which keeps startup quiet for people who never open it.

use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use tracing::{debug, warn};

use super::{Panel, PanelContext, ScrollState, render_lines, scroll_key, wrap_text};
use crate::net::projects::{FetchError, Project, spawn_fetch};
use crate::theme;
use crate::window::PanelKind;

const PROGRESS_BAR_WIDTH: usize = 10;
const SPINNER_STEP_MS: u128 = 300;

enum FetchPhase {
    Idle,
    Loading {
        receiver: Receiver<Result<Vec<Project>, FetchError>>,
        started: Instant,
    },
    Loaded(Vec<Project>),
    Failed(String),
    Offline,
}

pub struct ProjectsPanel {
    url: String,
    phase: FetchPhase,
    selected: usize,
    scroll: ScrollState,
    follow_selection: bool,
    /// Line ranges of each card in the last rendered list, for click mapping
    /// and selection-follow scrolling.
    card_ranges: Vec<(usize, usize)>,
}

impl ProjectsPanel {
    pub fn new(url: String, offline: bool) -> Self {
        let phase = if offline {
            FetchPhase::Offline
        } else {
            FetchPhase::Idle
        };
        Self {
            url,
            phase,
            selected: 0,
            scroll: ScrollState::default(),
            follow_selection: false,
            card_ranges: Vec::new(),
        }
    }

    /// Kicks off the background fetch the first time the window is shown.
    /// Safe to call every tick; only an idle panel starts a worker.
    pub fn ensure_fetch(&mut self, now: Instant) {
        if matches!(self.phase, FetchPhase::Idle) {
            debug!(url = %self.url, "starting project fetch");
            self.phase = FetchPhase::Loading {
                receiver: spawn_fetch(self.url.clone()),
                started: now,
            };
        }
    }

    fn projects(&self) -> Option<&[Project]> {
        match &self.phase {
            FetchPhase::Loaded(projects) => Some(projects),
            _ => None,
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let Some(projects) = self.projects() else {
            return;
        };
        if projects.is_empty() {
            return;
        }
        let last = projects.len() - 1;
        let next = self.selected.saturating_add_signed(delta).min(last);
        if next != self.selected {
            self.selected = next;
            self.follow_selection = true;
        }
    }

    fn open_selected_link(&self, demo: bool) {
        let Some(projects) = self.projects() else {
            return;
        };
        let Some(project) = projects.get(self.selected) else {
            return;
        };
        let url = if demo {
            project.demo_url.as_deref()
        } else {
            project.github_url.as_deref()
        };
        let Some(url) = url else {
            return;
        };
        match webbrowser::open(url) {
            Ok(()) => debug!(%url, "opened project link"),
            Err(error) => warn!(%url, %error, "could not open project link"),
        }
    }

    fn card_lines(
        &mut self,
        projects: &[Project],
        width: usize,
        base: Style,
        muted: Style,
    ) -> Vec<Line<'static>> {
        let accent = theme::accent(PanelKind::Projects);
        let mut lines: Vec<Line<'static>> = Vec::new();
        self.card_ranges.clear();
        for (index, project) in projects.iter().enumerate() {
            let start = lines.len();
            let selected = index == self.selected;
            let marker = if selected { "▸ " } else { "  " };
            let title_style = if selected {
                base.fg(accent).add_modifier(Modifier::BOLD)
            } else {
                base.add_modifier(Modifier::BOLD)
            };
            lines.push(Line::from(Span::styled(
                format!("{marker}{}", project.title),
                title_style,
            )));
            lines.push(Line::from(vec![
                Span::styled(format!("  {} ", project.status), muted),
                Span::styled(progress_bar(project.progress), base.fg(accent)),
                Span::styled(format!(" {:>3}%", project.progress.min(100)), muted),
            ]));
            for paragraph in &project.description {
                for row in wrap_text(paragraph, width.saturating_sub(2)) {
                    lines.push(Line::from(Span::styled(format!("  {row}"), base)));
                }
            }
            if !project.tech_stack.is_empty() {
                let chips = format!("  {}", project.tech_stack.join(" · "));
                for row in wrap_text(&chips, width) {
                    lines.push(Line::from(Span::styled(row, muted)));
                }
            }
            let mut hints = Vec::new();
            if project.github_url.is_some() {
                hints.push("g GitHub");
            }
            if project.demo_url.is_some() {
                hints.push("d Live demo");
            }
            if selected && !hints.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {}", hints.join("   ")),
                    base.fg(accent),
                )));
            }
            lines.push(Line::default());
            self.card_ranges.push((start, lines.len()));
        }
        lines
    }
}

fn progress_bar(progress: u8) -> String {
    let filled = (progress.min(100) as usize * PROGRESS_BAR_WIDTH).div_ceil(100);
    let mut bar = String::with_capacity(PROGRESS_BAR_WIDTH * 3);
    for slot in 0..PROGRESS_BAR_WIDTH {
        bar.push(if slot < filled { '█' } else { '░' });
    }
    bar
}

impl Panel for ProjectsPanel {
    fn render(&mut self, buffer: &mut Buffer, area: Rect, ctx: &PanelContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let base = Style::default()
            .fg(theme::window_fg(ctx.theme))
            .bg(theme::window_bg(ctx.theme));
        let muted = base.fg(theme::window_fg_muted(ctx.theme));
        let width = area.width as usize;

        let lines = match &self.phase {
            FetchPhase::Idle => vec![Line::from(Span::styled(
                "Waiting to fetch projects…",
                muted,
            ))],
            FetchPhase::Loading { started, .. } => {
                let dots = (ctx.now.duration_since(*started).as_millis() / SPINNER_STEP_MS) % 4;
                vec![Line::from(Span::styled(
                    format!("Fetching projects{}", ".".repeat(dots as usize)),
                    muted,
                ))]
            }
            FetchPhase::Failed(message) => {
                let mut lines = vec![Line::from(Span::styled(
                    "Could not load projects:",
                    base.fg(theme::error_fg(ctx.theme)),
                ))];
                for row in wrap_text(message, width.saturating_sub(2)) {
                    lines.push(Line::from(Span::styled(format!("  {row}"), muted)));
                }
                lines.push(Line::default());
                lines.push(Line::from(Span::styled("Press r to retry.", muted)));
                lines
            }
            FetchPhase::Offline => vec![Line::from(Span::styled(
                "Offline mode - the project list is unavailable.",
                muted,
            ))],
            FetchPhase::Loaded(projects) if projects.is_empty() => vec![Line::from(
                Span::styled("No projects published yet.", muted),
            )],
            FetchPhase::Loaded(projects) => {
                let projects = projects.clone();
                self.card_lines(&projects, width, base, muted)
            }
        };

        if self.follow_selection
            && let Some(&(start, end)) = self.card_ranges.get(self.selected)
        {
            let height = area.height as usize;
            if start < self.scroll.offset {
                self.scroll.offset = start;
            } else if end > self.scroll.offset + height {
                self.scroll.offset = end.saturating_sub(height);
            }
            self.follow_selection = false;
        }
        render_lines(buffer, area, lines, &mut self.scroll, base);
    }

    fn tick(&mut self, _ctx: &PanelContext) {
        let next = match &mut self.phase {
            FetchPhase::Loading { receiver, .. } => match receiver.try_recv() {
                Ok(Ok(projects)) => {
                    self.selected = 0;
                    self.scroll.reset();
                    Some(FetchPhase::Loaded(projects))
                }
                Ok(Err(error)) => Some(FetchPhase::Failed(error.to_string())),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    Some(FetchPhase::Failed("fetch worker exited".to_string()))
                }
            },
            _ => None,
        };
        if let Some(phase) = next {
            self.phase = phase;
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, ctx: &PanelContext) -> bool {
        match key.code {
            KeyCode::Up => {
                self.move_selection(-1);
                true
            }
            KeyCode::Down => {
                self.move_selection(1);
                true
            }
            KeyCode::Char('g') => {
                self.open_selected_link(false);
                true
            }
            KeyCode::Char('d') => {
                self.open_selected_link(true);
                true
            }
            KeyCode::Char('r') if matches!(self.phase, FetchPhase::Failed(_)) => {
                self.phase = FetchPhase::Idle;
                self.ensure_fetch(ctx.now);
                true
            }
            _ => scroll_key(&mut self.scroll, key),
        }
    }

    fn handle_click(&mut self, _column: u16, row: u16, _ctx: &PanelContext) {
        let line = row as usize + self.scroll.offset;
        for (index, &(start, end)) in self.card_ranges.iter().enumerate() {
            if line >= start && line < end {
                self.selected = index;
                return;
            }
        }
    }

    fn handle_scroll(&mut self, delta: isize) {
        self.scroll.bump(delta);
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

    fn sample_project(title: &str) -> Project {
        Project {
            id: format!("id-{title}"),
            title: title.to_string(),
            description: vec!["A sample project.".to_string()],
            progress: 60,
            status: "in-progress".to_string(),
            start_date: "2025-01-01".to_string(),
            github_url: Some("https://github.com/example/example".to_string()),
            demo_url: None,
            tech_stack: vec!["Rust".to_string(), "ratatui".to_string()],
            first_screenshot: None,
        }
    }

    fn render_text(panel: &mut ProjectsPanel, area: Rect) -> String {
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
    fn offline_panel_never_fetches() {
        let mut panel = ProjectsPanel::new("http://unreachable.invalid".to_string(), true);
        panel.ensure_fetch(Instant::now());
        assert!(matches!(panel.phase, FetchPhase::Offline));
        let text = render_text(&mut panel, Rect::new(0, 0, 60, 6));
        assert!(text.contains("Offline mode"));
    }

    #[test]
    fn disconnected_worker_surfaces_as_failure() {
        let (sender, receiver) = mpsc::channel();
        let mut panel = ProjectsPanel::new(String::new(), false);
        panel.phase = FetchPhase::Loading {
            receiver,
            started: Instant::now(),
        };
        drop(sender);
        panel.tick(&ctx());
        assert!(matches!(panel.phase, FetchPhase::Failed(_)));
        let text = render_text(&mut panel, Rect::new(0, 0, 60, 6));
        assert!(text.contains("Could not load projects"));
        assert!(text.contains("Press r to retry"));
    }

    #[test]
    fn loaded_cards_render_and_select() {
        let mut panel = ProjectsPanel::new(String::new(), false);
        panel.phase = FetchPhase::Loaded(vec![sample_project("Alpha"), sample_project("Beta")]);
        let text = render_text(&mut panel, Rect::new(0, 0, 60, 20));
        assert!(text.contains("▸ Alpha"));
        assert!(text.contains("  Beta"));
        assert!(text.contains("in-progress"));
        assert!(text.contains("60%"));
        assert!(text.contains("Rust · ratatui"));

        let key = KeyEvent::new(KeyCode::Down, crossterm::event::KeyModifiers::NONE);
        assert!(panel.handle_key(&key, &ctx()));
        assert_eq!(panel.selected, 1);
        // selection saturates at the last card
        panel.handle_key(&key, &ctx());
        assert_eq!(panel.selected, 1);
    }

    #[test]
    fn clicking_a_card_selects_it() {
        let mut panel = ProjectsPanel::new(String::new(), false);
        panel.phase = FetchPhase::Loaded(vec![sample_project("Alpha"), sample_project("Beta")]);
        render_text(&mut panel, Rect::new(0, 0, 60, 20));
        let (beta_start, _) = panel.card_ranges[1];
        panel.handle_click(4, beta_start as u16, &ctx());
        assert_eq!(panel.selected, 1);
    }

    #[test]
    fn progress_bar_scales() {
        assert_eq!(progress_bar(0), "░░░░░░░░░░");
        assert_eq!(progress_bar(100), "██████████");
        assert_eq!(progress_bar(55), "██████░░░░");
    }
}
