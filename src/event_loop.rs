//! The single loop that owns the UI thread.
//!
//! Each pass calls the handler once with `None` (the tick that drives
//! animations, the typed terminal session and timed commits, and redraws
//! the frame) and then drains every queued input event before ticking
//! again. Background work (the host probe, network fetches) runs on its
//! own threads and only feeds state that the tick renders.

use std::io;
use std::time::Duration;

use crossterm::event::Event;

use crate::drivers::EventSource;

pub enum ControlFlow {
    Continue,
    Quit,
}

pub struct EventLoop<S> {
    source: S,
    poll_interval: Duration,
}

impl<S: EventSource> EventLoop<S> {
    pub fn new(source: S, poll_interval: Duration) -> Self {
        Self {
            source,
            poll_interval,
        }
    }

    /// Take over the current thread until the handler asks to quit.
    ///
    /// The handler sees `None` on every tick and `Some(event)` for each
    /// input event. Bursts are drained in full between ticks; processing
    /// one event per poll would let a mouse drag outrun the render loop.
    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut S, Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if matches!(handler(&mut self.source, None)?, ControlFlow::Quit) {
                return Ok(());
            }
            let mut pending = self.source.ready(self.poll_interval)?;
            while pending {
                let event = self.source.next_event()?;
                if matches!(handler(&mut self.source, Some(event))?, ControlFlow::Quit) {
                    return Ok(());
                }
                pending = self.source.ready(Duration::ZERO)?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::collections::VecDeque;

    struct Scripted {
        queue: VecDeque<Event>,
    }

    impl EventSource for Scripted {
        fn ready(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(!self.queue.is_empty())
        }

        fn next_event(&mut self) -> io::Result<Event> {
            self.queue
                .pop_front()
                .ok_or_else(|| io::Error::new(io::ErrorKind::WouldBlock, "queue empty"))
        }
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn ticks_first_then_drains_the_burst_until_quit() {
        let source = Scripted {
            queue: VecDeque::from([key('a'), key('b'), key('q')]),
        };
        let mut event_loop = EventLoop::new(source, Duration::ZERO);
        let mut log = Vec::new();

        event_loop
            .run(|_, event| {
                match event {
                    None => log.push('.'),
                    Some(Event::Key(k)) => {
                        if let KeyCode::Char(c) = k.code {
                            log.push(c);
                            if c == 'q' {
                                return Ok(ControlFlow::Quit);
                            }
                        }
                    }
                    Some(_) => {}
                }
                Ok(ControlFlow::Continue)
            })
            .unwrap();

        assert_eq!(log, vec!['.', 'a', 'b', 'q']);
    }
}
