pub mod drag;
pub mod store;

use ratatui::prelude::Rect;

pub use drag::{DragOutcome, DragState, DragThresholds};
pub use store::{TransitionKind, WindowStore};

/// The fixed set of content panels. One window exists per kind for the whole
/// session; windows are minimized and restored, never created or destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PanelKind {
    About,
    Projects,
    Terminal,
    Skills,
    Education,
    Contact,
}

impl PanelKind {
    pub const ALL: [PanelKind; 6] = [
        PanelKind::About,
        PanelKind::Projects,
        PanelKind::Terminal,
        PanelKind::Skills,
        PanelKind::Education,
        PanelKind::Contact,
    ];

    /// Stable window id used by the state store and the dock.
    pub fn id(self) -> &'static str {
        match self {
            PanelKind::About => "about",
            PanelKind::Projects => "projects",
            PanelKind::Terminal => "terminal",
            PanelKind::Skills => "skills",
            PanelKind::Education => "education",
            PanelKind::Contact => "contact",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PanelKind::About => "About Me",
            PanelKind::Projects => "Projects",
            PanelKind::Terminal => "Terminal",
            PanelKind::Skills => "Skills",
            PanelKind::Education => "Education & Experience",
            PanelKind::Contact => "Contact",
        }
    }

    /// Label for the dock strip, where horizontal space is scarce.
    pub fn dock_label(self) -> &'static str {
        match self {
            PanelKind::About => "About",
            PanelKind::Education => "Education",
            other => other.title(),
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            PanelKind::About => "●",
            PanelKind::Projects => "▣",
            PanelKind::Terminal => ">",
            PanelKind::Skills => "★",
            PanelKind::Education => "♦",
            PanelKind::Contact => "✉",
        }
    }

    /// Per-kind accent used for dock glyphs, focused chrome and panel
    /// highlights. Hue stays fixed across themes.
    pub fn accent_rgb(self) -> (u8, u8, u8) {
        match self {
            PanelKind::About => (0x35, 0x84, 0xe4),
            PanelKind::Projects => (0x33, 0xd1, 0x7a),
            PanelKind::Terminal => (0xf6, 0xd3, 0x2d),
            PanelKind::Skills => (0xe0, 0x1b, 0x24),
            PanelKind::Education => (0x91, 0x41, 0xac),
            PanelKind::Contact => (0xff, 0x78, 0x00),
        }
    }

    /// Window surface size in cells, chrome included. Windows are not
    /// resizable, so this is fixed per kind.
    pub fn surface_size(self) -> (u16, u16) {
        match self {
            PanelKind::About => (44, 12),
            PanelKind::Projects => (62, 18),
            PanelKind::Terminal => (58, 16),
            PanelKind::Skills => (46, 14),
            PanelKind::Education => (54, 16),
            PanelKind::Contact => (48, 15),
        }
    }
}

/// Signed desktop-cell position. Windows may be dragged partially or fully
/// off-screen, so coordinates are not clamped to the terminal area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Signed rectangle origin with unsigned size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl SignedRect {
    pub fn new(origin: Point, width: u16, height: u16) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width,
            height,
        }
    }

    /// Whether a terminal cell coordinate falls inside this rect. Terminal
    /// coordinates are always non-negative; the rect may not be.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        let cx = column as i32;
        let cy = row as i32;
        cx >= self.x
            && cx < self.x + self.width as i32
            && cy >= self.y
            && cy < self.y + self.height as i32
    }

    /// The on-screen portion of this rect, if any.
    pub fn visible_within(&self, bounds: Rect) -> Option<Rect> {
        let bx0 = bounds.x as i32;
        let by0 = bounds.y as i32;
        let bx1 = bx0 + bounds.width as i32;
        let by1 = by0 + bounds.height as i32;
        let x0 = self.x.max(bx0);
        let y0 = self.y.max(by0);
        let x1 = (self.x + self.width as i32).min(bx1);
        let y1 = (self.y + self.height as i32).min(by1);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some(Rect {
            x: x0 as u16,
            y: y0 as u16,
            width: (x1 - x0) as u16,
            height: (y1 - y0) as u16,
        })
    }
}

/// One window's state: which panel it shows, where it sits, its stacking
/// order and whether it is minimized. Only `position`, `z` and `minimized`
/// mutate after startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRecord {
    pub id: &'static str,
    pub kind: PanelKind,
    pub position: Point,
    pub z: i32,
    pub minimized: bool,
}

impl WindowRecord {
    pub fn new(kind: PanelKind, x: i32, y: i32, z: i32) -> Self {
        Self {
            id: kind.id(),
            kind,
            position: Point::new(x, y),
            z,
            minimized: false,
        }
    }

    pub fn minimized(mut self, minimized: bool) -> Self {
        self.minimized = minimized;
        self
    }

    pub fn rect(&self) -> SignedRect {
        let (width, height) = self.kind.surface_size();
        SignedRect::new(self.position, width, height)
    }
}
