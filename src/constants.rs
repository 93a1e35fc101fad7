//! Shared crate-wide defaults. Most of these are starting values for CLI
//! flags; see `config.rs` for the override surface.

/// Event pump tick interval. The loop redraws and runs timed work once per
/// tick even when no input arrives.
///
/// Units: milliseconds.
pub const TICK_INTERVAL_MS: u64 = 16;

/// Press-to-release window under which a pointer press can still count as a
/// click rather than a drag. Both this and `CLICK_TRAVEL_THRESHOLD` must
/// hold for the release to be treated as a click.
///
/// Units: milliseconds.
pub const CLICK_TIME_THRESHOLD_MS: u64 = 200;

/// Maximum pointer travel (Chebyshev distance from the press cell) for a
/// release to count as a click. The default of 1 means any movement at all
/// turns the gesture into a drag.
///
/// Units: terminal cells.
pub const CLICK_TRAVEL_THRESHOLD: u16 = 1;

/// How long a window shrinks toward the dock after its close button (or the
/// close-all gesture) fires, before the minimized state actually commits.
///
/// Units: milliseconds.
pub const CLOSE_ANIMATION_MS: u64 = 300;

/// Same as `CLOSE_ANIMATION_MS` but for the minimize button and dock toggle.
///
/// Units: milliseconds.
pub const MINIMIZE_ANIMATION_MS: u64 = 400;

/// Interval between ambient host samples (wall clock, battery,
/// connectivity).
///
/// Units: seconds.
pub const PROBE_INTERVAL_SECS: u64 = 10;

/// The contact form's "Sent" confirmation resets back to idle after this
/// long.
///
/// Units: milliseconds.
pub const CONTACT_RESET_MS: u64 = 2000;

/// Typing rate of the terminal panel's scripted session.
///
/// Units: milliseconds per character.
pub const TYPE_CHAR_MS: u64 = 20;

/// Pause after each fully typed line before the next one starts.
///
/// Units: milliseconds.
pub const TYPE_LINE_PAUSE_MS: u64 = 100;

/// Settle delay between the boot handoff and the first typed character.
///
/// Units: milliseconds.
pub const TYPE_START_DELAY_MS: u64 = 500;

/// Half-period of every blinking cursor (boot splash, terminal panel).
///
/// Units: milliseconds.
pub const CURSOR_BLINK_MS: u64 = 500;

/// Hold on the completed boot script before the desktop appears.
///
/// Units: milliseconds.
pub const BOOT_HOLD_MS: u64 = 500;

/// Top bar height in rows.
pub const TOP_BAR_HEIGHT: u16 = 1;

/// Dock height in rows: one row of items, one row of active dots.
pub const DOCK_HEIGHT: u16 = 2;

/// Desktop icon footprint. The icon clamps so this whole footprint stays on
/// the desktop.
///
/// Units: terminal cells.
pub const ICON_WIDTH: u16 = 14;
pub const ICON_HEIGHT: u16 = 4;

/// Focus hands out strictly increasing z values. Once the next allocation
/// would cross this watermark the store renormalizes every z back to
/// `1..=n` (order preserved), so a long session can never overflow.
pub const Z_RENORMALIZE_LIMIT: i32 = i32::MAX / 2;

/// Timeout applied to every outbound HTTP request.
///
/// Units: seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 10;

/// Project listing endpoint.
pub const DEFAULT_PROJECTS_URL: &str =
    "https://dev-journal-backend-huozsgy77.vercel.app/projects/metaList";

/// Contact message endpoint.
pub const DEFAULT_CONTACT_URL: &str = "https://dev-journal-backend.vercel.app/email/sendPFmsg";

/// Base URL for the visitor beacons (`/visitors/new`, `/visitors/update`).
pub const DEFAULT_ANALYTICS_URL: &str = "https://dev-journal-backend.vercel.app";

/// URL the desktop icon opens.
pub const DEFAULT_JOURNAL_URL: &str = "https://developer-journal.vercel.app/";
