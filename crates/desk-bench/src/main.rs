//! Compositing throughput probe.
//!
//! Paints a scene shaped like the desktop's real workload: a full-screen
//! backdrop, a strip of bars, and a stack of drifting bordered windows
//! whose bodies churn every frame, so the diff never collapses to a
//! cheap partial update. Reports frames, frame times and cell rate.

use std::io::{self, Stdout};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use indoc::formatdoc;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
};

const BODY_GLYPHS: [&str; 10] = [".", ",", ":", "-", ";", "+", "*", "x", "#", "@"];

const WINDOW_ACCENTS: [Color; 6] = [
    Color::Rgb(0x35, 0x84, 0xe4),
    Color::Rgb(0x33, 0xd1, 0x7a),
    Color::Rgb(0xf6, 0xd3, 0x2d),
    Color::Rgb(0xe0, 0x1b, 0x24),
    Color::Rgb(0x91, 0x41, 0xac),
    Color::Rgb(0xff, 0x78, 0x00),
];

#[derive(Parser, Debug)]
#[command(
    name = "desk-bench",
    version,
    about = "Measures full-screen compositing throughput with a desktop-shaped scene"
)]
struct Cli {
    /// Run time in seconds.
    #[arg(
        short = 'd',
        long = "duration",
        value_name = "SECONDS",
        default_value_t = 10.0
    )]
    seconds: f64,

    /// Pacing target in frames per second.
    #[arg(short = 'f', long = "fps", value_name = "FPS", default_value_t = 60.0)]
    fps: f64,

    /// Number of drifting windows in the scene.
    #[arg(short = 'w', long = "windows", value_name = "COUNT", default_value_t = 6)]
    windows: u16,
}

struct Settings {
    run_for: Duration,
    frame_budget: Duration,
    target_fps: f64,
    windows: u16,
}

impl TryFrom<&Cli> for Settings {
    type Error = String;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        if !(1.0..=300.0).contains(&cli.seconds) {
            return Err("duration must be 1-300 seconds".into());
        }
        if !(5.0..=240.0).contains(&cli.fps) {
            return Err("fps must be 5-240".into());
        }
        if !(1..=24).contains(&cli.windows) {
            return Err("window count must be 1-24".into());
        }
        Ok(Self {
            run_for: Duration::from_secs_f64(cli.seconds),
            frame_budget: Duration::from_secs_f64(cli.fps.recip()),
            target_fps: cli.fps,
            windows: cli.windows,
        })
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let settings =
        Settings::try_from(&cli).map_err(|why| io::Error::new(io::ErrorKind::InvalidInput, why))?;

    // the guard restores the console before the summary prints
    let report = {
        let mut screen = RawScreen::enter()?;
        run(&mut screen.terminal, &settings)?
    };
    print!("{}", report.summary(&settings));
    Ok(())
}

/// Alternate-screen raw-mode session that undoes itself on drop, so a
/// panicking draw still leaves the shell usable.
struct RawScreen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl RawScreen {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for RawScreen {
    fn drop(&mut self) {
        let _ = execute!(
            self.terminal.backend_mut(),
            cursor::Show,
            LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

struct Report {
    wall: Duration,
    frames: u64,
    cells: u64,
    busy: Duration,
    best: Duration,
    worst: Duration,
    aborted: bool,
}

impl Report {
    fn summary(&self, settings: &Settings) -> String {
        let secs = self.wall.as_secs_f64();
        let fps = if secs > 0.0 {
            self.frames as f64 / secs
        } else {
            0.0
        };
        let rate = if secs > 0.0 { self.cells as f64 / secs } else { 0.0 };
        let (avg_ms, best_ms, worst_ms) = if self.frames > 0 {
            (
                self.busy.as_secs_f64() * 1000.0 / self.frames as f64,
                self.best.as_secs_f64() * 1000.0,
                self.worst.as_secs_f64() * 1000.0,
            )
        } else {
            (0.0, 0.0, 0.0)
        };
        let how = if self.aborted {
            "stopped early"
        } else {
            "ran to completion"
        };

        formatdoc! {"
            desk-bench {how} after {secs:.2}s (target {target:.2}s)
              frames   {frames} at {fps:.1} fps (pacing target {pace:.0})
              frame ms avg {avg_ms:.2}, best {best_ms:.2}, worst {worst_ms:.2}
              cells    {cells} painted, {rate:.0}/s across {windows} windows
            ",
            target = settings.run_for.as_secs_f64(),
            frames = self.frames,
            pace = settings.target_fps,
            cells = self.cells,
            windows = settings.windows,
        }
    }
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    settings: &Settings,
) -> io::Result<Report> {
    let started = Instant::now();
    let mut rng = Lcg::from_entropy();
    let mut frames = 0u64;
    let mut cells = 0u64;
    let mut busy = Duration::ZERO;
    let mut best = Duration::MAX;
    let mut worst = Duration::ZERO;
    let mut aborted = false;

    for tick in 0u64.. {
        let hud = hud_lines(started.elapsed(), frames, cells, settings);
        let begin = Instant::now();
        let mut painted = 0u64;
        terminal.draw(|frame| {
            painted = paint_scene(frame, tick, &hud, &mut rng, settings);
        })?;
        let spent = begin.elapsed();

        frames += 1;
        cells += painted;
        busy += spent;
        best = best.min(spent);
        worst = worst.max(spent);

        if started.elapsed() >= settings.run_for {
            break;
        }
        if quit_requested(settings.frame_budget.saturating_sub(spent))? {
            aborted = true;
            break;
        }
    }

    Ok(Report {
        wall: started.elapsed(),
        frames,
        cells,
        busy,
        best,
        worst,
        aborted,
    })
}

fn hud_lines(elapsed: Duration, frames: u64, cells: u64, settings: &Settings) -> Vec<String> {
    let secs = elapsed.as_secs_f64();
    let fps = if secs > 0.0 { frames as f64 / secs } else { 0.0 };
    let rate = if secs > 0.0 { cells as f64 / secs } else { 0.0 };
    vec![
        "desk-bench".to_string(),
        format!("{secs:5.1}s of {:.1}s", settings.run_for.as_secs_f64()),
        format!("{fps:5.1} fps, target {:.0}", settings.target_fps),
        format!("{} windows, {rate:9.0} cells/s", settings.windows),
        "q or esc stops the run".to_string(),
    ]
}

fn paint_scene(
    frame: &mut Frame,
    tick: u64,
    hud: &[String],
    rng: &mut Lcg,
    settings: &Settings,
) -> u64 {
    let screen = frame.area();
    if screen.width == 0 || screen.height == 0 {
        return 0;
    }
    let buffer = frame.buffer_mut();

    backdrop(buffer, screen, tick);
    for slot in 0..settings.windows {
        drifting_window(buffer, screen, slot, tick, rng);
    }
    chrome_bars(buffer, screen, tick);

    if let Some(hud_rect) = hud_area(screen, hud) {
        let text = Style::default().fg(Color::White).bg(Color::Black);
        clear_rect(buffer, hud_rect, text);
        for (row, line) in hud.iter().enumerate() {
            buffer.set_stringn(
                hud_rect.x + 1,
                hud_rect.y + 1 + row as u16,
                line,
                hud_rect.width.saturating_sub(2) as usize,
                text,
            );
        }
    }

    screen.width as u64 * screen.height as u64
}

/// Dim dotted field that shifts one column per frame.
fn backdrop(buffer: &mut Buffer, screen: Rect, tick: u64) {
    let style = Style::default()
        .fg(Color::Rgb(0x3a, 0x3f, 0x4b))
        .bg(Color::Rgb(0x17, 0x19, 0x1f));
    for y in screen.top()..screen.bottom() {
        for x in screen.left()..screen.right() {
            let phase = x as u64 + y as u64 * 7 + tick;
            let cell = &mut buffer[(x, y)];
            cell.set_symbol(if phase % 11 == 0 { "·" } else { " " });
            cell.set_style(style);
        }
    }
}

/// Integer triangle wave over `0..=span`.
fn bounce(phase: u64, span: u16) -> u16 {
    if span == 0 {
        return 0;
    }
    let period = 2 * span as u64;
    let p = phase % period;
    if p <= span as u64 {
        p as u16
    } else {
        (period - p) as u16
    }
}

fn drifting_window(buffer: &mut Buffer, screen: Rect, slot: u16, tick: u64, rng: &mut Lcg) {
    let width = (screen.width / 2).clamp(12, 48);
    let height = (screen.height / 2).clamp(6, 16);
    if screen.width <= width || screen.height <= height {
        return;
    }
    // a distinct phase per window keeps the stack reshuffling which
    // cells it covers
    let x0 = screen.x + bounce(tick / 2 + slot as u64 * 23, screen.width - width);
    let y0 = screen.y + bounce(tick / 3 + slot as u64 * 11, screen.height - height);
    let accent = WINDOW_ACCENTS[slot as usize % WINDOW_ACCENTS.len()];
    let body_bg = Color::Rgb(0x1d, 0x20, 0x28);
    let titlebar = Style::default().fg(accent).bg(Color::Rgb(0x26, 0x2a, 0x33));
    let border = Style::default().fg(accent).bg(body_bg);

    for row in 0..height {
        for col in 0..width {
            let cell = &mut buffer[(x0 + col, y0 + row)];
            if row == 0 {
                cell.set_symbol(if matches!(col, 1 | 3 | 5) { "●" } else { " " });
                cell.set_style(titlebar);
            } else if col == 0 || col + 1 == width {
                cell.set_symbol("│");
                cell.set_style(border);
            } else if row + 1 == height {
                cell.set_symbol("─");
                cell.set_style(border);
            } else {
                let glyph = BODY_GLYPHS[rng.next() as usize % BODY_GLYPHS.len()];
                let grey = 0x60 + (rng.next() % 0x60) as u8;
                let mut style = Style::default()
                    .fg(Color::Rgb(grey, grey, grey))
                    .bg(body_bg);
                if rng.next() & 2 != 0 {
                    style = style.add_modifier(Modifier::BOLD);
                }
                cell.set_symbol(glyph);
                cell.set_style(style);
            }
        }
    }
}

/// One top-bar row plus a two-row dock, with a sweeping highlight.
fn chrome_bars(buffer: &mut Buffer, screen: Rect, tick: u64) {
    if screen.height < 4 {
        return;
    }
    let style = Style::default()
        .fg(Color::Rgb(0xd8, 0xdc, 0xe4))
        .bg(Color::Rgb(0x21, 0x24, 0x2c));
    let rows = [screen.top(), screen.bottom() - 2, screen.bottom() - 1];
    for (slot, y) in rows.into_iter().enumerate() {
        let glyph = if slot == 0 { "▪" } else { "•" };
        for x in screen.left()..screen.right() {
            let lit = (x as u64).wrapping_sub(tick) % 24 == 0;
            let cell = &mut buffer[(x, y)];
            cell.set_symbol(if lit { glyph } else { " " });
            cell.set_style(style);
        }
    }
}

fn hud_area(screen: Rect, lines: &[String]) -> Option<Rect> {
    let widest = lines.iter().map(|line| line.chars().count()).max()? as u16;
    let width = widest + 2;
    let height = lines.len() as u16 + 2;
    if screen.width < width + 2 || screen.height < height + 2 {
        return None;
    }
    Some(Rect {
        x: screen.x + 1,
        y: screen.y + 1,
        width,
        height,
    })
}

fn clear_rect(buffer: &mut Buffer, rect: Rect, style: Style) {
    for y in rect.top()..rect.bottom() {
        for x in rect.left()..rect.right() {
            let cell = &mut buffer[(x, y)];
            cell.set_symbol(" ");
            cell.set_style(style);
        }
    }
}

struct Lcg(u64);

impl Lcg {
    fn from_entropy() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos() as u64);
        Self(nanos.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1)
    }

    fn next(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 32) as u32
    }
}

fn quit_requested(wait: Duration) -> io::Result<bool> {
    let mut pending = event::poll(wait)?;
    while pending {
        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            let ctrl_c =
                key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
            if ctrl_c
                || matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
            {
                return Ok(true);
            }
        }
        pending = event::poll(Duration::ZERO)?;
    }
    Ok(false)
}
