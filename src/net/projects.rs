//! Project listing fetch.
//!
//! The endpoint wraps its payload in a `{code, status, data}` envelope;
//! anything other than a `200 / "success"` envelope is an error the
//! projects panel shows inline. The fetch runs once per session on a worker
//! thread, started the first time the projects window opens.

use std::sync::mpsc::{self, Receiver};
use std::thread;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::http_client;

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Vec<String>,
    /// Completion percentage, 0..=100.
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "startDate", default)]
    pub start_date: String,
    #[serde(rename = "githubUrl", default)]
    pub github_url: Option<String>,
    #[serde(rename = "demoUrl", default)]
    pub demo_url: Option<String>,
    #[serde(rename = "techStack", default)]
    pub tech_stack: Vec<String>,
    #[serde(rename = "firstScreenShot", default)]
    pub first_screenshot: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    code: u16,
    status: String,
    #[serde(default)]
    data: Vec<Project>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("unexpected envelope: code {code}, status {status:?}")]
    Envelope { code: u16, status: String },
}

pub(crate) fn parse_envelope(body: &str) -> Result<Vec<Project>, FetchError> {
    let envelope: Envelope = serde_json::from_str(body)?;
    if envelope.code != 200 || envelope.status != "success" {
        return Err(FetchError::Envelope {
            code: envelope.code,
            status: envelope.status,
        });
    }
    Ok(envelope.data)
}

pub fn fetch_projects(url: &str) -> Result<Vec<Project>, FetchError> {
    let client = http_client()?;
    let body = client.get(url).send()?.error_for_status()?.text()?;
    parse_envelope(&body)
}

/// Fetch on a worker thread; the receiver yields exactly one result.
pub fn spawn_fetch(url: String) -> Receiver<Result<Vec<Project>, FetchError>> {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let result = fetch_projects(&url);
        match &result {
            Ok(projects) => debug!(count = projects.len(), "projects fetch succeeded"),
            Err(error) => warn!(error = %error, "projects fetch failed"),
        }
        let _ = sender.send(result);
    });
    receiver
}
