//! Ambient host sampling: wall clock, battery, connectivity.
//!
//! A background thread produces a [`HostSnapshot`] at a fixed interval and
//! sends it over a channel; the UI drains the channel once per tick and
//! keeps only the newest sample. No UI component reads the host environment
//! directly, which keeps rendering deterministic under test. The thread
//! winds down on its own once the receiving side is dropped.

use std::fs;
use std::io;
use std::net::{SocketAddr, TcpStream};
use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryState {
    /// Charge level, 0..=100.
    pub percent: u8,
    pub charging: bool,
}

#[derive(Debug, Clone)]
pub struct HostSnapshot {
    pub time: DateTime<Local>,
    /// `None` when the host exposes no readable battery.
    pub battery: Option<BatteryState>,
    pub online: bool,
}

pub struct HostProbe {
    receiver: Receiver<HostSnapshot>,
}

impl HostProbe {
    /// Start the sampler thread. With `offline` set the connectivity check
    /// is skipped entirely and snapshots always report offline.
    pub fn spawn(interval: Duration, offline: bool) -> io::Result<Self> {
        let (sender, receiver) = mpsc::channel();
        thread::Builder::new()
            .name("host-probe".to_string())
            .spawn(move || {
                loop {
                    let snapshot = HostSnapshot {
                        time: Local::now(),
                        battery: read_battery(),
                        online: !offline && check_online(),
                    };
                    if sender.send(snapshot).is_err() {
                        break;
                    }
                    thread::sleep(interval);
                }
                debug!("host probe stopped");
            })?;
        Ok(Self { receiver })
    }

    /// The newest snapshot produced since the last call, if any.
    pub fn latest(&self) -> Option<HostSnapshot> {
        self.receiver.try_iter().last()
    }
}

/// Parse one power-supply directory (`capacity` and `status` files). The
/// status file is optional; a missing or unknown status reads as not
/// charging.
pub fn read_battery_at(dir: &Path) -> Option<BatteryState> {
    let capacity = fs::read_to_string(dir.join("capacity")).ok()?;
    let percent: u8 = capacity.trim().parse().ok()?;
    let status = fs::read_to_string(dir.join("status")).unwrap_or_default();
    let charging = matches!(status.trim(), "Charging" | "Full");
    Some(BatteryState {
        percent: percent.min(100),
        charging,
    })
}

#[cfg(target_os = "linux")]
fn read_battery() -> Option<BatteryState> {
    let entries = fs::read_dir("/sys/class/power_supply").ok()?;
    for entry in entries.flatten() {
        if entry.file_name().to_string_lossy().starts_with("BAT")
            && let Some(state) = read_battery_at(&entry.path())
        {
            return Some(state);
        }
    }
    None
}

#[cfg(not(target_os = "linux"))]
fn read_battery() -> Option<BatteryState> {
    None
}

/// Cheap reachability check: a TCP connect to a public resolver. Good
/// enough for an indicator glyph.
fn check_online() -> bool {
    let addr = SocketAddr::from(([1, 1, 1, 1], 443));
    TcpStream::connect_timeout(&addr, Duration::from_secs(2)).is_ok()
}

/// Host name with the usual fallback when the OS string is unusable.
pub fn hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|s| s.into_string().ok())
        .unwrap_or_else(|| "unknown-host".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn parses_discharging_battery() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("capacity"), "87\n").unwrap();
        fs::write(dir.path().join("status"), "Discharging\n").unwrap();
        let state = read_battery_at(dir.path()).unwrap();
        assert_eq!(state.percent, 87);
        assert!(!state.charging);
    }

    #[test]
    fn parses_charging_and_full_as_on_power() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("capacity"), "42").unwrap();
        fs::write(dir.path().join("status"), "Charging").unwrap();
        assert!(read_battery_at(dir.path()).unwrap().charging);
        fs::write(dir.path().join("status"), "Full").unwrap();
        assert!(read_battery_at(dir.path()).unwrap().charging);
    }

    #[test]
    fn missing_status_reads_as_not_charging() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("capacity"), "63").unwrap();
        let state = read_battery_at(dir.path()).unwrap();
        assert_eq!(state.percent, 63);
        assert!(!state.charging);
    }

    #[test]
    fn garbage_capacity_is_no_battery() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("capacity"), "not-a-number").unwrap();
        fs::write(dir.path().join("status"), "Charging").unwrap();
        assert!(read_battery_at(dir.path()).is_none());
    }

    #[test]
    fn absent_directory_is_no_battery() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_battery_at(&dir.path().join("BAT9")).is_none());
    }

    #[test]
    fn overlarge_capacity_clamps() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("capacity"), "120").unwrap();
        assert_eq!(read_battery_at(dir.path()).unwrap().percent, 100);
    }

    #[test]
    fn hostname_is_never_empty() {
        assert!(!hostname().is_empty());
    }
}
