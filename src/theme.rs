//! Centralized colors. Keep these as small helpers so every surface pulls
//! from one palette per theme instead of scattering hex values around.

use ratatui::style::Color;

use crate::window::PanelKind;

/// The two desktop palettes. Dark is the default; the top bar toggle and the
/// `t` key flip between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

fn rgb(rgb: (u8, u8, u8)) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Per-window accent, fixed regardless of theme.
pub fn accent(kind: PanelKind) -> Color {
    rgb(kind.accent_rgb())
}

// Desktop backdrop
pub fn desktop_bg(theme: Theme) -> Color {
    match theme {
        Theme::Dark => rgb((30, 30, 36)),
        Theme::Light => rgb((222, 221, 218)),
    }
}
pub fn desktop_fg(theme: Theme) -> Color {
    match theme {
        Theme::Dark => rgb((154, 153, 150)),
        Theme::Light => rgb((94, 92, 100)),
    }
}

// Window surfaces
pub fn window_bg(theme: Theme) -> Color {
    match theme {
        Theme::Dark => rgb((36, 36, 42)),
        Theme::Light => rgb((250, 250, 250)),
    }
}
pub fn window_fg(theme: Theme) -> Color {
    match theme {
        Theme::Dark => rgb((222, 221, 218)),
        Theme::Light => rgb((36, 36, 42)),
    }
}
pub fn window_fg_muted(theme: Theme) -> Color {
    match theme {
        Theme::Dark => rgb((134, 134, 140)),
        Theme::Light => rgb((136, 136, 136)),
    }
}
pub fn window_border(theme: Theme) -> Color {
    match theme {
        Theme::Dark => rgb((70, 70, 80)),
        Theme::Light => rgb((180, 180, 180)),
    }
}

// Title bars
pub fn titlebar_bg(theme: Theme) -> Color {
    match theme {
        Theme::Dark => rgb((48, 48, 56)),
        Theme::Light => rgb((235, 235, 235)),
    }
}
pub fn titlebar_fg(theme: Theme) -> Color {
    match theme {
        Theme::Dark => rgb((222, 221, 218)),
        Theme::Light => rgb((60, 60, 60)),
    }
}

// Top bar and dock share one bar palette
pub fn bar_bg(theme: Theme) -> Color {
    match theme {
        Theme::Dark => rgb((22, 22, 26)),
        Theme::Light => rgb((240, 240, 240)),
    }
}
pub fn bar_fg(theme: Theme) -> Color {
    match theme {
        Theme::Dark => rgb((222, 221, 218)),
        Theme::Light => rgb((50, 50, 50)),
    }
}

// Status accents
pub fn success_fg(theme: Theme) -> Color {
    match theme {
        Theme::Dark => rgb((51, 209, 122)),
        Theme::Light => rgb((38, 162, 105)),
    }
}
pub fn warn_fg(theme: Theme) -> Color {
    match theme {
        Theme::Dark => rgb((246, 211, 45)),
        Theme::Light => rgb((229, 165, 10)),
    }
}
pub fn error_fg(theme: Theme) -> Color {
    match theme {
        Theme::Dark => rgb((224, 27, 36)),
        Theme::Light => rgb((192, 28, 40)),
    }
}

// Traffic-light window buttons, fixed across themes
pub fn close_button() -> Color {
    rgb((255, 95, 87))
}
pub fn minimize_button() -> Color {
    rgb((254, 188, 46))
}
pub fn zoom_button() -> Color {
    rgb((40, 200, 64))
}

/// Folder-yellow used by the journal icon, same in both themes.
pub fn icon_accent() -> Color {
    rgb((0xf6, 0xd3, 0x2d))
}

// Boot splash palette, fixed regardless of theme
pub fn boot_bg() -> Color {
    rgb((0x1a, 0x1d, 0x23))
}
pub fn boot_fg() -> Color {
    rgb((0xc0, 0xc0, 0xc0))
}
pub fn boot_ok() -> Color {
    rgb((0x33, 0xff, 0x33))
}
pub fn boot_action() -> Color {
    rgb((0xff, 0xdd, 0x33))
}
pub fn boot_firmware() -> Color {
    rgb((0xff, 0x66, 0xff))
}
pub fn boot_hardware() -> Color {
    rgb((0x33, 0xff, 0xff))
}
pub fn boot_accent() -> Color {
    rgb((0x33, 0xcc, 0xff))
}
pub fn boot_dim() -> Color {
    rgb((0x80, 0x80, 0x80))
}

// Scripted terminal session, Atom One per theme
pub fn term_bg(theme: Theme) -> Color {
    match theme {
        Theme::Dark => rgb((40, 44, 52)),
        Theme::Light => rgb((250, 250, 250)),
    }
}
pub fn term_fg(theme: Theme) -> Color {
    match theme {
        Theme::Dark => rgb((171, 178, 191)),
        Theme::Light => rgb((56, 58, 66)),
    }
}
pub fn term_prompt(theme: Theme) -> Color {
    match theme {
        Theme::Dark => rgb((97, 175, 239)),
        Theme::Light => rgb((64, 120, 242)),
    }
}
pub fn term_output(theme: Theme) -> Color {
    match theme {
        Theme::Dark => rgb((152, 195, 121)),
        Theme::Light => rgb((80, 161, 79)),
    }
}
