//! A desktop-style developer portfolio that runs entirely in the terminal:
//! a boot splash, six draggable windows over a dock and a top bar, rendered
//! with ratatui and driven by crossterm events.
//!
//! The crate splits along three seams. [`window`] holds the pure window
//! state (stacking, minimize/restore, drags, animated transitions) with no
//! I/O at all; [`panels`] render content into window-local buffers; and
//! [`desktop`] is the shell that owns both, routes input and composites
//! frames. Everything timed flows through [`clock::Clock`], and all network
//! work lives on worker threads under [`net`].

pub mod boot;
pub mod clock;
pub mod config;
pub mod constants;
pub mod desktop;
pub mod dock;
pub mod drivers;
pub mod event_loop;
pub mod icon;
pub mod keybindings;
pub mod logging;
pub mod net;
pub mod panels;
pub mod probe;
pub mod theme;
pub mod topbar;
pub mod ui;
pub mod window;
