//! Visitor beacons and the visit-state file.
//!
//! Best effort only: every outcome is logged and otherwise ignored. The
//! visit-state file distinguishes a first visit from a returning one so the
//! startup beacon can hit the matching endpoint.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};

use super::http_client;
use crate::probe::hostname;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VisitState {
    /// True when an earlier run already recorded a visit.
    #[serde(default)]
    pub seen_before: bool,
    #[serde(default)]
    pub visits: u64,
}

#[derive(Debug, Error)]
pub enum StateFileError {
    #[error("state file io: {0}")]
    Io(#[from] io::Error),
    #[error("state file encoding: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Per-user location for the visit state. `None` when the platform exposes
/// no state directory at all.
pub fn state_file_path() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|dir| dir.join("term-desk").join("visit-state.json"))
}

/// Read the visit state, treating a missing or corrupt file as a first
/// visit.
pub fn load_visit_state(path: &Path) -> VisitState {
    fs::read_to_string(path)
        .ok()
        .and_then(|body| serde_json::from_str(&body).ok())
        .unwrap_or_default()
}

/// Bump the visit counter and persist. The returned state's `seen_before`
/// reflects whether any visit existed *before* this one, which is what
/// selects the beacon endpoint.
pub fn record_visit(path: &Path) -> Result<VisitState, StateFileError> {
    let previous = load_visit_state(path);
    let updated = VisitState {
        seen_before: previous.visits > 0,
        visits: previous.visits + 1,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(&updated)?;
    fs::write(path, body)?;
    Ok(updated)
}

fn post_beacon(url: &str, payload: serde_json::Value) -> Result<(), reqwest::Error> {
    let client = http_client()?;
    client.post(url).json(&payload).send()?.error_for_status()?;
    Ok(())
}

/// Record the visit and post the startup beacon on a worker thread.
pub fn spawn_visit_beacon(base_url: String, state_path: PathBuf, terminal_size: (u16, u16)) {
    thread::spawn(move || {
        let state = match record_visit(&state_path) {
            Ok(state) => state,
            Err(error) => {
                warn!(error = %error, "visit state update failed");
                VisitState::default()
            }
        };
        let endpoint = if state.seen_before {
            format!("{base_url}/visitors/update")
        } else {
            format!("{base_url}/visitors/new")
        };
        let payload = json!({
            "hostname": hostname(),
            "platform": std::env::consts::OS,
            "terminal": format!("{}x{}", terminal_size.0, terminal_size.1),
            "version": env!("CARGO_PKG_VERSION"),
            "visits": state.visits,
        });
        match post_beacon(&endpoint, payload) {
            Ok(()) => debug!(endpoint = %endpoint, "visit beacon sent"),
            Err(error) => debug!(error = %error, "visit beacon failed"),
        }
    });
}

/// Post the session-duration beacon. Runs inline on shutdown, capped by the
/// shared client timeout.
pub fn send_exit_beacon(base_url: &str, session: Duration) {
    let endpoint = format!("{base_url}/visitors/update");
    let payload = json!({
        "hostname": hostname(),
        "session_seconds": session.as_secs(),
    });
    match post_beacon(&endpoint, payload) {
        Ok(()) => debug!("exit beacon sent"),
        Err(error) => debug!(error = %error, "exit beacon failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_visit_then_returning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("visit-state.json");

        let first = record_visit(&path).unwrap();
        assert!(!first.seen_before);
        assert_eq!(first.visits, 1);

        let second = record_visit(&path).unwrap();
        assert!(second.seen_before);
        assert_eq!(second.visits, 2);
    }

    #[test]
    fn corrupt_state_resets_to_first_visit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("visit-state.json");
        fs::write(&path, "{{{ not json").unwrap();

        let state = record_visit(&path).unwrap();
        assert!(!state.seen_before);
        assert_eq!(state.visits, 1);
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let state = load_visit_state(&dir.path().join("nope.json"));
        assert_eq!(state, VisitState::default());
    }

    #[test]
    fn state_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("visit-state.json");
        let written = record_visit(&path).unwrap();
        assert_eq!(load_visit_state(&path), written);
    }
}
