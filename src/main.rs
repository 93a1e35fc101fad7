use std::io;
use std::time::Instant;

use clap::Parser;
use ratatui::layout::Rect;

use term_desk::clock::SystemClock;
use term_desk::config::{Cli, Config};
use term_desk::desktop::Desktop;
use term_desk::drivers::{CrosstermEvents, CrosstermScreen, Screen};
use term_desk::event_loop::{ControlFlow, EventLoop};
use term_desk::logging;
use term_desk::net::analytics;
use term_desk::probe::HostProbe;

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let config =
        Config::try_from(&cli).map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    logging::init(config.log_file.as_deref())?;

    let probe = Some(HostProbe::spawn(config.probe_interval, config.offline)?);

    let mut screen = CrosstermScreen::new()?;
    screen.acquire()?;
    let (width, height) = crossterm::terminal::size()?;
    let area = Rect::new(0, 0, width, height);

    let offline = config.offline;
    let analytics_url = config.analytics_url.clone();
    let tick_interval = config.tick_interval;
    let mut desktop = Desktop::new(config, SystemClock, probe, area);
    let session_start = Instant::now();

    let mut events = EventLoop::new(CrosstermEvents::new(), tick_interval);
    let result = events.run(|_, event| {
        match event {
            Some(event) => desktop.on_event(&event),
            None => {
                desktop.on_tick();
                screen.draw(|mut frame| desktop.render(&mut frame))?;
            }
        }
        Ok(if desktop.should_quit() {
            ControlFlow::Quit
        } else {
            ControlFlow::Continue
        })
    });

    screen.restore()?;
    if !offline {
        analytics::send_exit_beacon(&analytics_url, session_start.elapsed());
    }
    result
}
