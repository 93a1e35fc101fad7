//! Invariants of the window state machine, checked directly on the store
//! and through the desktop shell with a hand-stepped clock.

use std::time::Duration;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use term_desk::clock::ManualClock;
use term_desk::config::Config;
use term_desk::desktop::Desktop;
use term_desk::window::{PanelKind, Point, TransitionKind, WindowRecord, WindowStore};

fn six_window_store() -> WindowStore {
    let records = PanelKind::ALL
        .iter()
        .enumerate()
        .map(|(index, kind)| {
            WindowRecord::new(*kind, index as i32 * 10, index as i32 * 3, index as i32 + 1)
        })
        .collect();
    WindowStore::new(
        records,
        Duration::from_millis(300),
        Duration::from_millis(400),
    )
}

fn config() -> Config {
    Config {
        skip_boot: true,
        offline: true,
        ..Config::default()
    }
}

fn desktop() -> (Desktop<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let desktop = Desktop::new(config(), clock.clone(), None, Rect::new(0, 0, 120, 36));
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

#[test]
fn focused_window_stays_strictly_on_top_through_any_focus_sequence() {
    let mut store = six_window_store();
    let sequence = [
        "contact",
        "about",
        "terminal",
        "about",
        "skills",
        "projects",
        "education",
        "about",
    ];
    for id in sequence {
        store.focus_window(id);
        let top = store.get(id).unwrap().z;
        for record in store.records() {
            if record.id != id {
                assert!(
                    record.z < top,
                    "{} (z={}) should sit below {} (z={})",
                    record.id,
                    record.z,
                    id,
                    top
                );
            }
        }
    }
}

#[test]
fn toggling_twice_restores_the_minimized_flag() {
    let mut store = six_window_store();
    store.minimize_window("skills");

    // one visible window, one minimized: both parities round-trip
    for id in ["about", "skills"] {
        let before = *store.get(id).unwrap();
        store.toggle_window(id);
        store.toggle_window(id);
        let after = store.get(id).unwrap();
        assert_eq!(after.minimized, before.minimized, "{id} parity");
        assert_eq!(after.position, before.position, "{id} position");
    }
}

#[test]
fn move_window_reads_back_exactly_even_offscreen() {
    let mut store = six_window_store();
    for target in [Point::new(-12, 3), Point::new(0, 0), Point::new(875, -40)] {
        store.move_window("terminal", target);
        assert_eq!(store.get("terminal").unwrap().position, target);
    }
}

#[test]
fn focusing_the_bottom_of_three_takes_the_next_z_above() {
    let records = vec![
        WindowRecord::new(PanelKind::About, 0, 0, 1),
        WindowRecord::new(PanelKind::Projects, 12, 2, 2),
        WindowRecord::new(PanelKind::Terminal, 24, 4, 3),
    ];
    let mut store = WindowStore::new(
        records,
        Duration::from_millis(300),
        Duration::from_millis(400),
    );

    store.focus_window("about");

    assert_eq!(store.get("about").unwrap().z, 4);
    assert_eq!(store.get("projects").unwrap().z, 2);
    assert_eq!(store.get("terminal").unwrap().z, 3);
}

#[test]
fn unknown_ids_leave_the_records_untouched() {
    let mut store = six_window_store();
    let before = store.records().to_vec();

    store.move_window("nonexistent", Point::new(10, 10));
    store.focus_window("nonexistent");
    store.toggle_window("nonexistent");
    store.restore_window("nonexistent");
    store.minimize_window("nonexistent");

    assert_eq!(store.records(), before.as_slice());
}

#[test]
fn close_all_minimizes_everything_without_moving_anything() {
    let (mut desktop, clock) = desktop();
    let before: Vec<_> = desktop
        .store()
        .records()
        .iter()
        .map(|record| (record.id, record.position, record.z))
        .collect();

    desktop.on_event(&key(KeyCode::Char('0')));
    clock.advance(Duration::from_millis(300));
    desktop.on_tick();

    for (id, position, z) in before {
        let record = desktop.store().get(id).unwrap();
        assert!(record.minimized, "{id} should be back in the dock");
        assert_eq!(record.position, position, "{id} position");
        assert_eq!(record.z, z, "{id} z");
    }
}

#[test]
fn a_titlebar_drag_commits_the_exact_pointer_delta() {
    let clock = ManualClock::new();
    let mut desktop = Desktop::new(config(), clock.clone(), None, Rect::new(0, 0, 220, 140));
    let start = desktop.store().get("terminal").unwrap().position;
    // grab the titlebar well clear of the three buttons
    let grab = ((start.x + 10) as u16, start.y as u16);

    desktop.on_event(&mouse(MouseEventKind::Down(MouseButton::Left), grab.0, grab.1));
    clock.advance(Duration::from_millis(250));
    desktop.on_event(&mouse(
        MouseEventKind::Drag(MouseButton::Left),
        grab.0 + 50,
        grab.1 - 30,
    ));
    // nothing moves until release
    assert_eq!(desktop.store().get("terminal").unwrap().position, start);

    desktop.on_event(&mouse(
        MouseEventKind::Up(MouseButton::Left),
        grab.0 + 50,
        grab.1 - 30,
    ));
    assert_eq!(
        desktop.store().get("terminal").unwrap().position,
        Point::new(start.x + 50, start.y - 30)
    );
}

#[test]
fn a_transition_commits_only_once_its_deadline_passes() {
    let (mut desktop, clock) = desktop();

    desktop.on_event(&key(KeyCode::Char('1')));
    assert_eq!(
        desktop.store().transition_kind("about"),
        Some(TransitionKind::Minimize)
    );

    clock.advance(Duration::from_millis(399));
    desktop.on_tick();
    assert!(!desktop.store().get("about").unwrap().minimized);

    clock.advance(Duration::from_millis(1));
    desktop.on_tick();
    assert!(desktop.store().get("about").unwrap().minimized);
    assert_eq!(desktop.store().transition_kind("about"), None);
}
