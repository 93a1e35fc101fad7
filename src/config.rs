//! Command line surface and the validated runtime configuration built from
//! it. Timing flags exist mostly so tests and demos can speed the desktop
//! up or slow it down without recompiling.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::constants;
use crate::theme::Theme;
use crate::window::DragThresholds;

#[derive(Parser, Debug)]
#[command(
    name = "term-desk",
    version = env!("CARGO_PKG_VERSION"),
    about = "A desktop-style developer portfolio that runs in the terminal"
)]
pub struct Cli {
    /// Starting palette, "dark" or "light". The top bar toggle still works.
    #[arg(long = "theme", value_name = "THEME", default_value = "dark")]
    pub theme: String,

    /// Jump straight to the desktop without the boot splash.
    #[arg(long = "skip-boot")]
    pub skip_boot: bool,

    /// Disable all network activity: fetches, beacons, the connectivity
    /// probe. The projects window falls back to a placeholder.
    #[arg(long = "offline")]
    pub offline: bool,

    /// Project listing endpoint.
    #[arg(
        long = "projects-url",
        value_name = "URL",
        default_value = constants::DEFAULT_PROJECTS_URL
    )]
    pub projects_url: String,

    /// Contact message endpoint.
    #[arg(
        long = "contact-url",
        value_name = "URL",
        default_value = constants::DEFAULT_CONTACT_URL
    )]
    pub contact_url: String,

    /// Base URL for visitor beacons.
    #[arg(
        long = "analytics-url",
        value_name = "URL",
        default_value = constants::DEFAULT_ANALYTICS_URL
    )]
    pub analytics_url: String,

    /// URL the desktop icon opens in the system browser.
    #[arg(
        long = "journal-url",
        value_name = "URL",
        default_value = constants::DEFAULT_JOURNAL_URL
    )]
    pub journal_url: String,

    /// Event pump tick interval in milliseconds.
    #[arg(
        long = "tick-ms",
        value_name = "MILLIS",
        default_value_t = constants::TICK_INTERVAL_MS
    )]
    pub tick_ms: u64,

    /// Press-to-release time below which a press counts as a click.
    #[arg(
        long = "click-ms",
        value_name = "MILLIS",
        default_value_t = constants::CLICK_TIME_THRESHOLD_MS
    )]
    pub click_ms: u64,

    /// Maximum pointer travel, in cells, for a press to count as a click.
    #[arg(
        long = "click-travel",
        value_name = "CELLS",
        default_value_t = constants::CLICK_TRAVEL_THRESHOLD
    )]
    pub click_travel: u16,

    /// Close animation length in milliseconds.
    #[arg(
        long = "close-ms",
        value_name = "MILLIS",
        default_value_t = constants::CLOSE_ANIMATION_MS
    )]
    pub close_ms: u64,

    /// Minimize animation length in milliseconds.
    #[arg(
        long = "minimize-ms",
        value_name = "MILLIS",
        default_value_t = constants::MINIMIZE_ANIMATION_MS
    )]
    pub minimize_ms: u64,

    /// Seconds between host samples (clock, battery, connectivity).
    #[arg(
        long = "probe-secs",
        value_name = "SECONDS",
        default_value_t = constants::PROBE_INTERVAL_SECS
    )]
    pub probe_secs: u64,

    /// How long the contact form shows "Sent" before resetting.
    #[arg(
        long = "contact-reset-ms",
        value_name = "MILLIS",
        default_value_t = constants::CONTACT_RESET_MS
    )]
    pub contact_reset_ms: u64,

    /// Append debug logs to this file. Logging is off without it.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Validated runtime settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub skip_boot: bool,
    pub offline: bool,
    pub projects_url: String,
    pub contact_url: String,
    pub analytics_url: String,
    pub journal_url: String,
    pub tick_interval: Duration,
    pub click_time: Duration,
    pub click_travel: u16,
    pub close_animation: Duration,
    pub minimize_animation: Duration,
    pub probe_interval: Duration,
    pub contact_reset: Duration,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn drag_thresholds(&self) -> DragThresholds {
        DragThresholds {
            click_time: self.click_time,
            click_travel: self.click_travel,
        }
    }
}

impl TryFrom<&Cli> for Config {
    type Error = String;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        let theme = match cli.theme.as_str() {
            "dark" => Theme::Dark,
            "light" => Theme::Light,
            other => return Err(format!("unknown theme {other:?}, expected dark or light")),
        };
        if !(1..=1000).contains(&cli.tick_ms) {
            return Err("tick-ms must be between 1 and 1000".to_string());
        }
        if !(1..=3600).contains(&cli.probe_secs) {
            return Err("probe-secs must be between 1 and 3600".to_string());
        }
        Ok(Self {
            theme,
            skip_boot: cli.skip_boot,
            offline: cli.offline,
            projects_url: cli.projects_url.clone(),
            contact_url: cli.contact_url.clone(),
            analytics_url: cli.analytics_url.clone(),
            journal_url: cli.journal_url.clone(),
            tick_interval: Duration::from_millis(cli.tick_ms),
            click_time: Duration::from_millis(cli.click_ms),
            click_travel: cli.click_travel,
            close_animation: Duration::from_millis(cli.close_ms),
            minimize_animation: Duration::from_millis(cli.minimize_ms),
            probe_interval: Duration::from_secs(cli.probe_secs),
            contact_reset: Duration::from_millis(cli.contact_reset_ms),
            log_file: cli.log_file.clone(),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            skip_boot: false,
            offline: false,
            projects_url: constants::DEFAULT_PROJECTS_URL.to_string(),
            contact_url: constants::DEFAULT_CONTACT_URL.to_string(),
            analytics_url: constants::DEFAULT_ANALYTICS_URL.to_string(),
            journal_url: constants::DEFAULT_JOURNAL_URL.to_string(),
            tick_interval: Duration::from_millis(constants::TICK_INTERVAL_MS),
            click_time: Duration::from_millis(constants::CLICK_TIME_THRESHOLD_MS),
            click_travel: constants::CLICK_TRAVEL_THRESHOLD,
            close_animation: Duration::from_millis(constants::CLOSE_ANIMATION_MS),
            minimize_animation: Duration::from_millis(constants::MINIMIZE_ANIMATION_MS),
            probe_interval: Duration::from_secs(constants::PROBE_INTERVAL_SECS),
            contact_reset: Duration::from_millis(constants::CONTACT_RESET_MS),
            log_file: None,
        }
    }
}
