//! Desktop shell: owns the window store, panels, bars and the boot splash,
//! routes every input event and paints whole frames.
//!
//! Everything here runs on the UI thread. Worker threads (fetch, submit,
//! probe, beacons) only ever talk back through channels drained on ticks, so
//! store operations never contend with anything.

use std::time::Instant;

use chrono::Local;
use crossterm::event::{Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use tracing::{debug, warn};

use crate::boot::BootSequence;
use crate::clock::Clock;
use crate::config::Config;
use crate::constants::{DOCK_HEIGHT, TOP_BAR_HEIGHT};
use crate::dock::Dock;
use crate::icon::DesktopIcon;
use crate::keybindings::{Action, KeyMap};
use crate::net::analytics;
use crate::panels::{PanelContext, PanelSet};
use crate::probe::{HostProbe, HostSnapshot};
use crate::theme::{self, Theme};
use crate::topbar::TopBar;
use crate::ui::{Canvas, fill_rect, put_text};
use crate::window::{
    DragOutcome, DragState, DragThresholds, PanelKind, Point, SignedRect, TransitionKind,
    WindowRecord, WindowStore,
};

/// Pixel geometry of the page the layout was designed against. Initial
/// window positions scale from this reference onto the real cell grid.
const REFERENCE_WIDTH: i32 = 1920;
const REFERENCE_HEIGHT: i32 = 1080;

enum Phase {
    Boot(BootSequence),
    Desktop,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum DragTarget {
    Window(&'static str),
    Icon,
}

struct ActiveDrag {
    target: DragTarget,
    state: DragState,
}

pub struct Desktop<C: Clock> {
    config: Config,
    clock: C,
    theme: Theme,
    phase: Phase,
    store: WindowStore,
    bindings: KeyMap,
    thresholds: DragThresholds,
    drag: Option<ActiveDrag>,
    icon: DesktopIcon,
    topbar: TopBar,
    dock: Dock,
    panels: PanelSet,
    probe: Option<HostProbe>,
    snapshot: Option<HostSnapshot>,
    hover: Option<(u16, u16)>,
    area: Rect,
    should_quit: bool,
}

/// Screen region between the top bar and the dock.
fn desktop_area(area: Rect) -> Rect {
    let top = TOP_BAR_HEIGHT;
    let reserved = TOP_BAR_HEIGHT + DOCK_HEIGHT;
    Rect {
        x: area.x,
        y: area.y.saturating_add(top),
        width: area.width,
        height: area.height.saturating_sub(reserved),
    }
}

fn initial_records(desk: Rect) -> Vec<WindowRecord> {
    let dx = desk.x as i32;
    let dy = desk.y as i32;
    let dw = desk.width as i32;
    let dh = desk.height as i32;
    let scale_x = |px: i32| dx + px * dw / REFERENCE_WIDTH;
    let scale_y = |px: i32| dy + px * dh / REFERENCE_HEIGHT;

    let (about_w, about_h) = PanelKind::About.surface_size();
    let (term_w, term_h) = PanelKind::Terminal.surface_size();
    vec![
        // about card sits toward the bottom-right corner
        WindowRecord::new(
            PanelKind::About,
            (dx + dw - about_w as i32 - 2).max(dx),
            (dy + dh - about_h as i32 - 1).max(dy),
            1,
        ),
        // terminal slightly above dead center
        WindowRecord::new(
            PanelKind::Terminal,
            dx + (dw - term_w as i32) / 2,
            (dy + (dh - term_h as i32) / 2 - 1).max(dy),
            2,
        ),
        WindowRecord::new(PanelKind::Projects, scale_x(150), scale_y(300), 3).minimized(true),
        WindowRecord::new(PanelKind::Skills, scale_x(700), scale_y(350), 4).minimized(true),
        WindowRecord::new(PanelKind::Education, scale_x(200), scale_y(250), 5).minimized(true),
        WindowRecord::new(PanelKind::Contact, scale_x(400), scale_y(450), 6).minimized(true),
    ]
}

fn lerp_rect(from: SignedRect, to: SignedRect, t: f32) -> SignedRect {
    let t = t.clamp(0.0, 1.0);
    let lerp_i32 = |a: i32, b: i32| a + ((b - a) as f32 * t).round() as i32;
    let lerp_u16 = |a: u16, b: u16| {
        let value = a as f32 + (b as f32 - a as f32) * t;
        value.round().max(0.0) as u16
    };
    SignedRect {
        x: lerp_i32(from.x, to.x),
        y: lerp_i32(from.y, to.y),
        width: lerp_u16(from.width, to.width),
        height: lerp_u16(from.height, to.height),
    }
}

impl<C: Clock> Desktop<C> {
    pub fn new(config: Config, clock: C, probe: Option<HostProbe>, area: Rect) -> Self {
        let now = clock.now();
        let desk = desktop_area(area);
        let store = WindowStore::new(
            initial_records(desk),
            config.close_animation,
            config.minimize_animation,
        );
        let icon_start = Point::new(
            desk.x as i32 + 50 * desk.width as i32 / REFERENCE_WIDTH,
            desk.y as i32 + 100 * desk.height as i32 / REFERENCE_HEIGHT,
        );
        let icon = DesktopIcon::new(DesktopIcon::clamp(icon_start, desk));
        let panels = PanelSet::new(&config);
        let thresholds = config.drag_thresholds();
        let skip_boot = config.skip_boot;
        let theme = config.theme;
        let mut desktop = Self {
            config,
            clock,
            theme,
            phase: Phase::Boot(BootSequence::new(now)),
            store,
            bindings: KeyMap::stock(),
            thresholds,
            drag: None,
            icon,
            topbar: TopBar::new(),
            dock: Dock::new(),
            panels,
            probe,
            snapshot: None,
            hover: None,
            area,
            should_quit: false,
        };
        if skip_boot {
            desktop.enter_desktop(now);
        }
        desktop
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn store(&self) -> &WindowStore {
        &self.store
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn booting(&self) -> bool {
        matches!(self.phase, Phase::Boot(_))
    }

    pub fn icon_position(&self) -> Point {
        self.icon.position()
    }

    fn enter_desktop(&mut self, now: Instant) {
        self.phase = Phase::Desktop;
        self.panels.terminal.start(now);
        if !self.config.offline {
            match analytics::state_file_path() {
                Some(path) => analytics::spawn_visit_beacon(
                    self.config.analytics_url.clone(),
                    path,
                    (self.area.width, self.area.height),
                ),
                None => warn!("no state directory available, visit beacon skipped"),
            }
        }
        debug!("desktop ready");
    }

    fn panel_ctx(&self, kind: PanelKind, now: Instant) -> PanelContext {
        let focused = self
            .store
            .focused()
            .map(|record| record.kind == kind)
            .unwrap_or(false);
        PanelContext {
            theme: self.theme,
            focused,
            now,
        }
    }

    /// The window's on-screen frame, following the pointer mid-drag.
    fn record_frame(&self, record: &WindowRecord) -> SignedRect {
        let (width, height) = record.kind.surface_size();
        let position = match &self.drag {
            Some(drag) if drag.target == DragTarget::Window(record.id) => drag.state.current(),
            _ => record.position,
        };
        SignedRect::new(position, width, height)
    }

    /// Dock-click and digit-key semantics: restore when minimized, otherwise
    /// start the animated minimize. A window already mid-transition is left
    /// alone.
    fn toggle_panel(&mut self, kind: PanelKind, now: Instant) {
        let id = kind.id();
        match self.store.get(id) {
            Some(record) if record.minimized => self.store.restore_window(id),
            Some(_) if self.store.transition_kind(id).is_none() => {
                self.store.begin_transition(id, TransitionKind::Minimize, now);
            }
            _ => {}
        }
    }

    fn close_all(&mut self, now: Instant) {
        let visible: Vec<&'static str> = self
            .store
            .records()
            .iter()
            .filter(|record| !record.minimized)
            .map(|record| record.id)
            .collect();
        for id in visible {
            self.store.begin_transition(id, TransitionKind::Close, now);
        }
    }

    pub fn on_event(&mut self, event: &Event) {
        let now = self.clock.now();
        if let Phase::Boot(boot) = &mut self.phase {
            match event {
                Event::Key(_) => boot.skip(),
                Event::Mouse(mouse)
                    if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) =>
                {
                    boot.skip()
                }
                Event::Resize(width, height) => {
                    self.area = Rect::new(0, 0, *width, *height);
                }
                _ => {}
            }
            return;
        }
        match event {
            Event::Key(key) => self.on_key(key, now),
            Event::Mouse(mouse) => self.on_mouse(mouse, now),
            Event::Resize(width, height) => {
                self.area = Rect::new(0, 0, *width, *height);
                let desk = desktop_area(self.area);
                self.icon
                    .set_position(DesktopIcon::clamp(self.icon.position(), desk));
            }
            _ => {}
        }
    }

    fn on_key(&mut self, key: &KeyEvent, now: Instant) {
        // the focused panel gets first refusal, so forms can own typing
        if let Some(record) = self.store.focused() {
            let ctx = self.panel_ctx(record.kind, now);
            if self.panels.get_mut(record.kind).handle_key(key, &ctx) {
                return;
            }
        }
        match self.bindings.lookup(key) {
            Some(Action::Quit) => self.should_quit = true,
            Some(Action::ToggleTheme) => self.theme = self.theme.toggle(),
            Some(Action::TogglePanel(kind)) => self.toggle_panel(kind, now),
            Some(Action::CloseAll) => self.close_all(now),
            Some(Action::CycleFocus) => self.store.cycle_focus(),
            None => {}
        }
    }

    fn on_mouse(&mut self, mouse: &MouseEvent, now: Instant) {
        let column = mouse.column;
        let row = mouse.row;
        match mouse.kind {
            MouseEventKind::Moved => self.hover = Some((column, row)),
            MouseEventKind::Down(MouseButton::Left) => {
                self.hover = Some((column, row));
                self.on_mouse_down(column, row, now);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.hover = Some((column, row));
                if let Some(drag) = &mut self.drag {
                    let position = drag.state.track(column, row);
                    if drag.target == DragTarget::Icon {
                        let desk = desktop_area(self.area);
                        drag.state.pin(DesktopIcon::clamp(position, desk));
                    }
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.on_mouse_up(column, row, now),
            MouseEventKind::ScrollUp => self.scroll_at(column, row, -3),
            MouseEventKind::ScrollDown => self.scroll_at(column, row, 3),
            _ => {}
        }
    }

    fn on_mouse_down(&mut self, column: u16, row: u16, now: Instant) {
        if self.topbar.contains(column, row) {
            if let Some(kind) = self.topbar.hit_test_restore(column, row) {
                self.store.restore_window(kind.id());
            } else if self.topbar.hit_test_theme(column, row) {
                self.theme = self.theme.toggle();
            }
            return;
        }
        if self.dock.contains(column, row) {
            if let Some(kind) = self.dock.hit_test(column, row) {
                self.toggle_panel(kind, now);
            }
            return;
        }
        for record in self.store.paint_order().into_iter().rev() {
            let frame = self.record_frame(&record);
            if !frame.contains(column, row) {
                continue;
            }
            // mid-animation windows swallow clicks without reacting
            if self.store.transition_kind(record.id).is_some() {
                return;
            }
            let local_x = column as i32 - frame.x;
            let local_y = row as i32 - frame.y;
            if local_y == 0 {
                match local_x {
                    1 => {
                        self.store
                            .begin_transition(record.id, TransitionKind::Close, now)
                    }
                    3 => {
                        self.store
                            .begin_transition(record.id, TransitionKind::Minimize, now)
                    }
                    5 => self.store.focus_window(record.id),
                    _ => {
                        self.store.focus_window(record.id);
                        self.drag = Some(ActiveDrag {
                            target: DragTarget::Window(record.id),
                            state: DragState::begin(record.position, column, row, now),
                        });
                    }
                }
            } else {
                self.store.focus_window(record.id);
                let body_w = frame.width as i32 - 2;
                let body_h = frame.height as i32 - 2;
                let body_x = local_x - 1;
                let body_y = local_y - 1;
                if body_x >= 0 && body_x < body_w && body_y >= 0 && body_y < body_h {
                    let ctx = self.panel_ctx(record.kind, now);
                    self.panels.get_mut(record.kind).handle_click(
                        body_x as u16,
                        body_y as u16,
                        &ctx,
                    );
                }
            }
            return;
        }
        if self.icon.contains(column, row) {
            self.drag = Some(ActiveDrag {
                target: DragTarget::Icon,
                state: DragState::begin(self.icon.position(), column, row, now),
            });
        }
    }

    fn on_mouse_up(&mut self, column: u16, row: u16, now: Instant) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        let outcome = drag.state.finish(column, row, now, &self.thresholds);
        match (drag.target, outcome) {
            (DragTarget::Window(id), DragOutcome::Commit(position)) => {
                self.store.move_window(id, position);
            }
            (DragTarget::Window(_), DragOutcome::Click) => {}
            (DragTarget::Icon, DragOutcome::Commit(position)) => {
                let desk = desktop_area(self.area);
                self.icon.set_position(DesktopIcon::clamp(position, desk));
            }
            (DragTarget::Icon, DragOutcome::Click) => {
                let url = self.config.journal_url.clone();
                match webbrowser::open(&url) {
                    Ok(()) => debug!(%url, "opened journal"),
                    Err(error) => warn!(%url, %error, "could not open journal"),
                }
            }
        }
    }

    fn scroll_at(&mut self, column: u16, row: u16, delta: isize) {
        for record in self.store.paint_order().into_iter().rev() {
            let frame = self.record_frame(&record);
            if !frame.contains(column, row) {
                continue;
            }
            if self.store.transition_kind(record.id).is_some() {
                return;
            }
            let local_y = row as i32 - frame.y;
            if local_y >= 1 && local_y < frame.height as i32 - 1 {
                self.panels.get_mut(record.kind).handle_scroll(delta);
            }
            return;
        }
    }

    pub fn on_tick(&mut self) {
        let now = self.clock.now();
        if let Phase::Boot(boot) = &self.phase {
            if boot.finished(now) {
                self.enter_desktop(now);
            }
            return;
        }
        self.store.commit_transitions(now);
        if let Some(probe) = &self.probe
            && let Some(snapshot) = probe.latest()
        {
            self.snapshot = Some(snapshot);
        }
        // projects fetch fires the first time its window is actually shown
        if self
            .store
            .get(PanelKind::Projects.id())
            .is_some_and(|record| !record.minimized)
        {
            self.panels.projects.ensure_fetch(now);
        }
        for kind in PanelKind::ALL {
            let ctx = self.panel_ctx(kind, now);
            self.panels.get_mut(kind).tick(&ctx);
        }
    }

    pub fn render(&mut self, frame: &mut Canvas) {
        self.area = frame.area();
        let now = self.clock.now();
        if let Phase::Boot(boot) = &self.phase {
            boot.render(frame, now);
            return;
        }

        let area = self.area;
        let desk = desktop_area(area);
        fill_rect(
            frame.buffer_mut(),
            area,
            Style::default()
                .bg(theme::desktop_bg(self.theme))
                .fg(theme::desktop_fg(self.theme)),
        );

        let icon_hovered = match (&self.drag, self.hover) {
            (Some(drag), _) => drag.target == DragTarget::Icon,
            (None, Some((column, row))) => self.icon.contains(column, row),
            _ => false,
        };
        let icon = DesktopIcon::new(match &self.drag {
            Some(drag) if drag.target == DragTarget::Icon => drag.state.current(),
            _ => self.icon.position(),
        });
        icon.render(frame.buffer_mut(), desk, self.theme, icon_hovered);

        for record in self.store.paint_order() {
            self.draw_window(frame, record, now);
        }

        let top = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: TOP_BAR_HEIGHT.min(area.height),
        };
        let minimized = self.store.minimized();
        self.topbar.render(
            frame.buffer_mut(),
            top,
            self.theme,
            Local::now(),
            &minimized,
            self.snapshot.as_ref(),
        );

        if area.height > TOP_BAR_HEIGHT + DOCK_HEIGHT {
            let dock_area = Rect {
                x: area.x,
                y: area.y + area.height - DOCK_HEIGHT,
                width: area.width,
                height: DOCK_HEIGHT,
            };
            self.dock
                .render(frame.buffer_mut(), dock_area, self.theme, &self.store, self.hover);
        }
    }

    fn dock_target(&self, kind: PanelKind) -> SignedRect {
        if let Some((center_x, center_y)) = self.dock.item_center(kind) {
            SignedRect {
                x: center_x as i32 - 1,
                y: center_y as i32,
                width: 2,
                height: 1,
            }
        } else {
            SignedRect {
                x: self.area.x as i32 + self.area.width as i32 / 2 - 1,
                y: self.area.y as i32 + self.area.height as i32 - 1,
                width: 2,
                height: 1,
            }
        }
    }

    fn draw_window(&mut self, frame: &mut Canvas, record: WindowRecord, now: Instant) {
        let dest = self.record_frame(&record);
        let accent = theme::accent(record.kind);

        if let Some(progress) = self.store.transition_progress(record.id, now) {
            let target = match self.store.transition_kind(record.id) {
                Some(TransitionKind::Minimize) => self.dock_target(record.kind),
                _ => SignedRect {
                    x: dest.x + dest.width as i32 / 2 - 1,
                    y: dest.y + dest.height as i32 / 2,
                    width: 2,
                    height: 1,
                },
            };
            let ghost = lerp_rect(dest, target, progress);
            if let Some(visible) = ghost.visible_within(frame.area()) {
                fill_rect(
                    frame.buffer_mut(),
                    visible,
                    Style::default()
                        .bg(theme::titlebar_bg(self.theme))
                        .fg(accent),
                );
            }
            return;
        }

        let (width, height) = record.kind.surface_size();
        if width < 3 || height < 3 {
            return;
        }
        let focused = self
            .store
            .focused()
            .map(|top| top.id == record.id)
            .unwrap_or(false);
        let local = Rect::new(0, 0, width, height);
        let mut surface = Buffer::empty(local);

        let body_style = Style::default()
            .bg(theme::window_bg(self.theme))
            .fg(theme::window_fg(self.theme));
        fill_rect(&mut surface, local, body_style);

        let body = Rect::new(1, 1, width - 2, height - 2);
        let ctx = self.panel_ctx(record.kind, now);
        self.panels.get_mut(record.kind).render(&mut surface, body, &ctx);

        // chrome over the content: title bar, side and bottom borders
        let bar_style = Style::default()
            .bg(theme::titlebar_bg(self.theme))
            .fg(theme::titlebar_fg(self.theme));
        fill_rect(&mut surface, Rect::new(0, 0, width, 1), bar_style);
        put_text(&mut surface, local, 1, 0, "●", bar_style.fg(theme::close_button()));
        put_text(
            &mut surface,
            local,
            3,
            0,
            "●",
            bar_style.fg(theme::minimize_button()),
        );
        put_text(&mut surface, local, 5, 0, "●", bar_style.fg(theme::zoom_button()));
        let title = format!("{} {}", record.kind.glyph(), record.kind.title());
        let title_width = title.chars().count() as u16;
        let title_x = width.saturating_sub(title_width) / 2;
        let title_style = if focused {
            bar_style.fg(accent).add_modifier(Modifier::BOLD)
        } else {
            bar_style
        };
        put_text(&mut surface, local, title_x.max(7), 0, &title, title_style);

        let border_style = if focused {
            body_style.fg(accent)
        } else {
            body_style.fg(theme::window_border(self.theme))
        };
        for y in 1..height - 1 {
            put_text(&mut surface, local, 0, y, "│", border_style);
            put_text(&mut surface, local, width - 1, y, "│", border_style);
        }
        let bottom: String = std::iter::once('└')
            .chain(std::iter::repeat_n('─', width.saturating_sub(2) as usize))
            .chain(std::iter::once('┘'))
            .collect();
        put_text(&mut surface, local, 0, height - 1, &bottom, border_style);

        frame.blit(&surface, dest);
    }
}
