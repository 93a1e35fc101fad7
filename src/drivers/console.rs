//! The real console: crossterm events in, ratatui frames out.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::{EventSource, Screen};
use crate::ui::Canvas;

/// Fold terminal quirks into a uniform event stream: Shift+Tab becomes
/// `BackTab` everywhere, and key releases are dropped so Windows (which
/// reports both edges) behaves like Unix.
fn normalize_event(evt: Event) -> Option<Event> {
    match evt {
        Event::Key(mut key) => {
            if key.modifiers.contains(KeyModifiers::SHIFT) && key.code == KeyCode::Tab {
                key.modifiers.remove(KeyModifiers::SHIFT);
                key.code = KeyCode::BackTab;
            }
            (key.kind != KeyEventKind::Release).then_some(Event::Key(key))
        }
        other => Some(other),
    }
}

#[derive(Default)]
pub struct CrosstermEvents;

impl CrosstermEvents {
    pub fn new() -> Self {
        Self
    }
}

impl EventSource for CrosstermEvents {
    fn ready(&mut self, timeout: Duration) -> io::Result<bool> {
        crossterm::event::poll(timeout)
    }

    fn next_event(&mut self) -> io::Result<Event> {
        // skip over events the normalizer swallows
        loop {
            if let Some(event) = normalize_event(crossterm::event::read()?) {
                return Ok(event);
            }
        }
    }
}

pub struct CrosstermScreen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    acquired: bool,
}

impl CrosstermScreen {
    pub fn new() -> io::Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok(Self {
            terminal,
            acquired: false,
        })
    }
}

impl Screen for CrosstermScreen {
    fn acquire(&mut self) -> io::Result<()> {
        if self.acquired {
            return Ok(());
        }
        terminal::enable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            EnterAlternateScreen,
            EnableMouseCapture
        )?;
        self.terminal.hide_cursor()?;
        self.acquired = true;
        Ok(())
    }

    fn restore(&mut self) -> io::Result<()> {
        if !self.acquired {
            return Ok(());
        }
        self.terminal.show_cursor()?;
        execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;
        self.acquired = false;
        Ok(())
    }

    fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(Canvas<'_>),
    {
        match self.terminal.draw(|frame| f(Canvas::new(frame))) {
            Ok(_) => Ok(()),
            Err(err) => Err(io::Error::other(err.to_string())),
        }
    }
}

// the console must come back even when the desktop errors out
impl Drop for CrosstermScreen {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
