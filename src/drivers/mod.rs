//! Terminal I/O seams. The desktop reaches the console through two small
//! traits so tests can feed scripted input and render offscreen.

pub mod console;

pub use console::{CrosstermEvents, CrosstermScreen};

use std::io;
use std::time::Duration;

use crossterm::event::Event;

use crate::ui::Canvas;

/// Where input events come from.
pub trait EventSource {
    fn ready(&mut self, timeout: Duration) -> io::Result<bool>;
    fn next_event(&mut self) -> io::Result<Event>;
}

/// Owns the terminal for the desktop's lifetime. `acquire` switches to the
/// alternate screen and takes mouse capture; `restore` puts the console
/// back, and must also run on error paths (the crossterm implementation
/// guarantees this with a `Drop`).
pub trait Screen {
    fn acquire(&mut self) -> io::Result<()>;
    fn restore(&mut self) -> io::Result<()>;

    fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(Canvas<'_>);
}
