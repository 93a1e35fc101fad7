//! User-level flows driven through the desktop shell with synthetic
//! crossterm events: boot, dock and top bar clicks, window chrome,
//! typing, and resize handling. Rendering goes into a plain buffer so
//! assertions can read the screen back as text.

use std::time::Duration;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use term_desk::clock::ManualClock;
use term_desk::config::Config;
use term_desk::desktop::Desktop;
use term_desk::theme::Theme;
use term_desk::ui::Canvas;
use term_desk::window::{PanelKind, Point, TransitionKind};

// wide enough that the two startup windows never overlap
const AREA: Rect = Rect {
    x: 0,
    y: 0,
    width: 160,
    height: 48,
};

fn config() -> Config {
    Config {
        skip_boot: true,
        offline: true,
        ..Config::default()
    }
}

fn desktop() -> (Desktop<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let desktop = Desktop::new(config(), clock.clone(), None, AREA);
    (desktop, clock)
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn click(desktop: &mut Desktop<ManualClock>, column: u16, row: u16) {
    desktop.on_event(&mouse(MouseEventKind::Down(MouseButton::Left), column, row));
    desktop.on_event(&mouse(MouseEventKind::Up(MouseButton::Left), column, row));
}

fn render_rows(desktop: &mut Desktop<ManualClock>) -> Vec<String> {
    let mut buffer = Buffer::empty(AREA);
    let mut frame = Canvas::from_parts(AREA, &mut buffer);
    desktop.render(&mut frame);
    (0..AREA.height)
        .map(|y| {
            (0..AREA.width)
                .map(|x| buffer.cell((x, y)).map(|cell| cell.symbol()).unwrap_or(" "))
                .collect()
        })
        .collect()
}

/// Screen cell where `needle` starts on `row`. Every symbol the desktop
/// paints is a single char, so char offsets equal cell columns.
fn locate(rows: &[String], row: usize, needle: &str) -> (u16, u16) {
    let byte = rows[row]
        .find(needle)
        .unwrap_or_else(|| panic!("{needle:?} not found on row {row}"));
    let column = rows[row][..byte].chars().count() as u16;
    (column, row as u16)
}

#[test]
fn boot_splash_shows_until_a_key_skips_it() {
    let clock = ManualClock::new();
    let mut desktop = Desktop::new(
        Config {
            offline: true,
            ..Config::default()
        },
        clock.clone(),
        None,
        AREA,
    );
    assert!(desktop.booting());
    let rows = render_rows(&mut desktop);
    assert!(rows.iter().any(|row| row.contains("Portfolio Boot Loader")));

    desktop.on_event(&key(KeyCode::Char('b')));
    desktop.on_tick();
    assert!(!desktop.booting());
    let rows = render_rows(&mut desktop);
    assert!(rows[0].contains("Ushan Rashmika"));
}

#[test]
fn boot_finishes_on_its_own() {
    let clock = ManualClock::new();
    let mut desktop = Desktop::new(
        Config {
            offline: true,
            ..Config::default()
        },
        clock.clone(),
        None,
        AREA,
    );
    desktop.on_tick();
    assert!(desktop.booting());

    clock.advance(Duration::from_millis(8000));
    desktop.on_tick();
    assert!(!desktop.booting());
}

#[test]
fn dock_click_minimizes_with_animation_then_restores() {
    let (mut desktop, clock) = desktop();
    let rows = render_rows(&mut desktop);
    let item_row = (AREA.height - 2) as usize;
    let dot_row = item_row + 1;
    let (x, y) = locate(&rows, item_row, "Terminal");

    click(&mut desktop, x, y);
    assert_eq!(
        desktop.store().transition_kind("terminal"),
        Some(TransitionKind::Minimize)
    );
    // the dot stays lit while the window shrinks toward the dock
    let rows = render_rows(&mut desktop);
    assert_eq!(rows[dot_row].matches('•').count(), 2);

    clock.advance(Duration::from_millis(400));
    desktop.on_tick();
    assert!(desktop.store().get("terminal").unwrap().minimized);
    let rows = render_rows(&mut desktop);
    assert_eq!(rows[dot_row].matches('•').count(), 1);

    // a second click brings it back, focused
    click(&mut desktop, x, y);
    assert!(!desktop.store().get("terminal").unwrap().minimized);
    assert_eq!(desktop.store().focused().unwrap().kind, PanelKind::Terminal);
}

#[test]
fn topbar_chip_restores_a_minimized_window() {
    let (mut desktop, _clock) = desktop();
    let rows = render_rows(&mut desktop);
    let (x, y) = locate(&rows, 0, "Projects");

    click(&mut desktop, x, y);
    let record = desktop.store().get("projects").unwrap();
    assert!(!record.minimized);
    assert_eq!(desktop.store().focused().unwrap().kind, PanelKind::Projects);

    // the chip leaves the bar once its window is visible again
    let rows = render_rows(&mut desktop);
    assert!(!rows[0].contains("Projects"));
}

#[test]
fn theme_button_in_the_bar_toggles_the_palette() {
    let (mut desktop, _clock) = desktop();
    let rows = render_rows(&mut desktop);
    let (x, y) = locate(&rows, 0, "☀");

    click(&mut desktop, x, y);
    assert_eq!(desktop.theme(), Theme::Light);
    let rows = render_rows(&mut desktop);
    assert!(rows[0].contains("☾"));
}

#[test]
fn titlebar_buttons_map_to_close_and_minimize() {
    let (mut desktop, _clock) = desktop();
    let terminal = desktop.store().get("terminal").unwrap().position;

    // the zoom dot only raises the window
    click(&mut desktop, (terminal.x + 5) as u16, terminal.y as u16);
    assert_eq!(desktop.store().transition_kind("terminal"), None);
    assert_eq!(desktop.store().focused().unwrap().kind, PanelKind::Terminal);

    click(&mut desktop, (terminal.x + 3) as u16, terminal.y as u16);
    assert_eq!(
        desktop.store().transition_kind("terminal"),
        Some(TransitionKind::Minimize)
    );

    let about = desktop.store().get("about").unwrap().position;
    click(&mut desktop, (about.x + 1) as u16, about.y as u16);
    assert_eq!(
        desktop.store().transition_kind("about"),
        Some(TransitionKind::Close)
    );
}

#[test]
fn the_contact_form_owns_typing_while_focused() {
    let (mut desktop, _clock) = desktop();
    desktop.on_event(&key(KeyCode::Char('6')));
    assert_eq!(desktop.store().focused().unwrap().kind, PanelKind::Contact);

    for c in "Amy".chars() {
        desktop.on_event(&key(KeyCode::Char(c)));
    }
    let rows = render_rows(&mut desktop);
    assert!(rows.iter().any(|row| row.contains("Name: Amy")));

    // plain q lands in the field instead of quitting
    desktop.on_event(&key(KeyCode::Char('q')));
    assert!(!desktop.should_quit());

    desktop.on_event(&Event::Key(KeyEvent::new(
        KeyCode::Char('c'),
        KeyModifiers::CONTROL,
    )));
    assert!(desktop.should_quit());
}

#[test]
fn windows_dragged_offscreen_render_clipped() {
    let (mut desktop, clock) = desktop();
    let start = desktop.store().get("terminal").unwrap().position;
    let grab = ((start.x + 10) as u16, start.y as u16);

    desktop.on_event(&mouse(MouseEventKind::Down(MouseButton::Left), grab.0, grab.1));
    clock.advance(Duration::from_millis(250));
    desktop.on_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 2, grab.1));
    desktop.on_event(&mouse(MouseEventKind::Up(MouseButton::Left), 2, grab.1));

    let moved = desktop.store().get("terminal").unwrap().position;
    assert_eq!(moved, Point::new(start.x - (grab.0 as i32 - 2), start.y));
    assert!(moved.x < 0);

    // the visible remainder still paints, title included
    let rows = render_rows(&mut desktop);
    assert!(rows[start.y as usize].contains("> Terminal"));
}

#[test]
fn resize_clamps_the_desktop_icon() {
    let (mut desktop, _clock) = desktop();
    assert_eq!(desktop.icon_position(), Point::new(4, 5));

    desktop.on_event(&Event::Resize(18, 8));
    assert_eq!(desktop.icon_position(), Point::new(4, 2));
}

#[test]
fn tab_cycles_focus_between_visible_windows() {
    let (mut desktop, _clock) = desktop();
    assert_eq!(desktop.store().focused().unwrap().kind, PanelKind::Terminal);

    desktop.on_event(&key(KeyCode::Tab));
    assert_eq!(desktop.store().focused().unwrap().kind, PanelKind::About);

    desktop.on_event(&key(KeyCode::Tab));
    assert_eq!(desktop.store().focused().unwrap().kind, PanelKind::Terminal);
}
