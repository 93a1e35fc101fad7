//! Fake BIOS/systemd boot splash shown before the desktop.
//!
//! Lines appear one at a time on a fixed schedule. Any key press or mouse
//! click skips straight to the desktop.

use std::time::{Duration, Instant};

use ratatui::style::Style;

use crate::constants::{BOOT_HOLD_MS, CURSOR_BLINK_MS};
use crate::theme;
use crate::ui::{Canvas, fill_rect, put_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MessageKind {
    Firmware,
    Hardware,
    Ok,
    Action,
    Plain,
}

struct BootMessage {
    text: &'static str,
    delay_ms: u64,
    kind: MessageKind,
}

const fn msg(text: &'static str, delay_ms: u64, kind: MessageKind) -> BootMessage {
    BootMessage {
        text,
        delay_ms,
        kind,
    }
}

#[rustfmt::skip]
const SCRIPT: [BootMessage; 35] = [
    msg("BIOS 2.8.1 - American Megatrends Inc.", 800, MessageKind::Firmware),
    msg("CPU: Intel(R) Core(TM) i9-14900K @ 3.20GHz (24 cores)", 150, MessageKind::Hardware),
    msg("Memory: 65536 MB DDR5 @ 6400 MHz", 200, MessageKind::Hardware),
    msg("[    0.000000] Linux version 6.8.0-gnome-x86_64", 250, MessageKind::Firmware),
    msg("[    0.123456] ACPI: Core revision 20240322", 80, MessageKind::Plain),
    msg("[    0.234567] PCI: Using configuration type 1", 80, MessageKind::Plain),
    msg("[    0.456789] smpboot: Allowing 24 CPUs, 0 hotplug CPUs", 100, MessageKind::Plain),
    msg("[    0.789012] Console: colour dummy device 80x25", 80, MessageKind::Plain),
    msg("[    1.123456] tsc: Detected 3200.000 MHz processor", 90, MessageKind::Plain),
    msg("[    1.345678] Calibrating delay loop... 6400.00 BogoMIPS", 400, MessageKind::Plain),
    msg("[    1.567890] Security Framework initialized", 100, MessageKind::Plain),
    msg("[  OK  ] Started Early OOM Daemon", 120, MessageKind::Ok),
    msg("[  OK  ] Created slice system-getty.slice", 90, MessageKind::Ok),
    msg("[  OK  ] Listening on Journal Socket", 80, MessageKind::Ok),
    msg("[  OK  ] Listening on udev Control Socket", 80, MessageKind::Ok),
    msg("         Mounting Kernel Debug File System...", 70, MessageKind::Action),
    msg("         Starting Journal Service...", 100, MessageKind::Action),
    msg("         Starting Load Kernel Modules...", 120, MessageKind::Action),
    msg("[  OK  ] Mounted Kernel Debug File System", 150, MessageKind::Ok),
    msg("[  OK  ] Finished Load Kernel Modules", 180, MessageKind::Ok),
    msg("[  OK  ] Reached target Local File Systems", 150, MessageKind::Ok),
    msg("         Starting Network Time Synchronization...", 100, MessageKind::Action),
    msg("[  OK  ] Started Network Time Synchronization", 200, MessageKind::Ok),
    msg("[  OK  ] Started Journal Service", 90, MessageKind::Ok),
    msg("[  OK  ] Reached target Network", 180, MessageKind::Ok),
    msg("         Starting GNOME Display Manager...", 120, MessageKind::Action),
    msg("         Starting React.js Runtime Environment...", 150, MessageKind::Action),
    msg("         Starting TypeScript Compilation Service...", 130, MessageKind::Action),
    msg("[  OK  ] Started React.js Runtime Environment", 250, MessageKind::Ok),
    msg("[  OK  ] Started TypeScript Compilation Service", 200, MessageKind::Ok),
    msg("[  OK  ] Started GNOME Display Manager", 300, MessageKind::Ok),
    msg("[  OK  ] Reached target Graphical Interface", 250, MessageKind::Ok),
    msg("", 150, MessageKind::Plain),
    msg("Ushanrashmika23 Portfolio System [Version 1.0.0]", 400, MessageKind::Plain),
    msg("Starting desktop environment...", 800, MessageKind::Action),
];

const HEADER: &str = "Ushanrashmika23's Portfolio Boot Loader v1.0";

fn kind_color(kind: MessageKind) -> ratatui::style::Color {
    match kind {
        MessageKind::Firmware => theme::boot_firmware(),
        MessageKind::Hardware => theme::boot_hardware(),
        MessageKind::Ok => theme::boot_ok(),
        MessageKind::Action => theme::boot_action(),
        MessageKind::Plain => theme::boot_fg(),
    }
}

pub struct BootSequence {
    started_at: Instant,
    skipped: bool,
}

impl BootSequence {
    pub fn new(now: Instant) -> Self {
        Self {
            started_at: now,
            skipped: false,
        }
    }

    pub fn skip(&mut self) {
        self.skipped = true;
    }

    /// Number of script lines visible after `now`. Each line waits its own
    /// delay before appearing, so this is a prefix-sum walk.
    fn revealed(&self, now: Instant) -> usize {
        let elapsed = now.duration_since(self.started_at);
        let mut deadline = Duration::ZERO;
        for (index, message) in SCRIPT.iter().enumerate() {
            deadline += Duration::from_millis(message.delay_ms);
            if elapsed < deadline {
                return index;
            }
        }
        SCRIPT.len()
    }

    pub fn finished(&self, now: Instant) -> bool {
        if self.skipped {
            return true;
        }
        let total: u64 = SCRIPT.iter().map(|message| message.delay_ms).sum();
        now.duration_since(self.started_at) >= Duration::from_millis(total + BOOT_HOLD_MS)
    }

    pub fn render(&self, frame: &mut Canvas, now: Instant) {
        let area = frame.area();
        if area.width == 0 || area.height == 0 {
            return;
        }
        let bg = Style::default().bg(theme::boot_bg());
        fill_rect(frame.buffer_mut(), area, bg);

        let buffer = frame.buffer_mut();
        put_text(buffer, area, area.x + 1, area.y, "●", bg.fg(theme::boot_accent()));
        put_text(
            buffer,
            area,
            area.x + 3,
            area.y,
            HEADER,
            bg.fg(theme::boot_dim()),
        );

        let body_top = area.y + 2;
        let body_height = area.height.saturating_sub(2) as usize;
        if body_height == 0 {
            return;
        }
        let revealed = self.revealed(now);
        let skip = revealed.saturating_sub(body_height);
        let blink_on =
            (now.duration_since(self.started_at).as_millis() / CURSOR_BLINK_MS as u128) % 2 == 0;
        for (slot, index) in (skip..revealed).enumerate() {
            let message = &SCRIPT[index];
            let style = bg.fg(kind_color(message.kind));
            let y = body_top + slot as u16;
            put_text(buffer, area, area.x + 1, y, message.text, style);
            if index + 1 == revealed && blink_on {
                let x = area.x + 1 + message.text.chars().count() as u16 + 1;
                put_text(buffer, area, x, y, "▊", bg.fg(theme::boot_ok()));
            }
        }
    }
}
