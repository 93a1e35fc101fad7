//! Contact form submission.

use std::sync::mpsc::{self, Receiver};
use std::thread;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::http_client;

#[derive(Debug, Clone, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server rejected the message: HTTP {0}")]
    Status(u16),
}

/// Minimal form validation: all fields present, email roughly shaped like
/// one. The server does the real validation.
pub fn validate(message: &ContactMessage) -> Result<(), &'static str> {
    if message.name.trim().is_empty() {
        return Err("name is required");
    }
    if !looks_like_email(&message.email) {
        return Err("enter a valid email");
    }
    if message.message.trim().is_empty() {
        return Err("message is required");
    }
    Ok(())
}

fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

pub fn submit(url: &str, message: &ContactMessage) -> Result<(), SubmitError> {
    let client = http_client()?;
    let response = client.post(url).json(message).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(SubmitError::Status(status.as_u16()));
    }
    Ok(())
}

/// Submit on a worker thread; the receiver yields exactly one result.
pub fn spawn_submit(url: String, message: ContactMessage) -> Receiver<Result<(), SubmitError>> {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let result = submit(&url, &message);
        match &result {
            Ok(()) => debug!("contact message sent"),
            Err(error) => warn!(error = %error, "contact message failed"),
        }
        let _ = sender.send(result);
    });
    receiver
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(name: &str, email: &str, body: &str) -> ContactMessage {
        ContactMessage {
            name: name.to_string(),
            email: email.to_string(),
            message: body.to_string(),
        }
    }

    #[test]
    fn accepts_complete_message() {
        assert!(validate(&message("Ada", "ada@example.com", "Hello there")).is_ok());
    }

    #[test]
    fn rejects_blank_fields() {
        assert!(validate(&message("", "ada@example.com", "Hi")).is_err());
        assert!(validate(&message("Ada", "ada@example.com", "   ")).is_err());
    }

    #[test]
    fn email_shapes() {
        assert!(looks_like_email("ada@example.com"));
        assert!(looks_like_email("a.b@sub.domain.dev"));
        assert!(!looks_like_email("ada"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("ada@nodot"));
        assert!(!looks_like_email("ada@.com"));
        assert!(!looks_like_email("ada@com."));
    }

    #[test]
    fn serializes_expected_field_names() {
        let value =
            serde_json::to_value(message("Ada", "ada@example.com", "Hello")).unwrap();
        assert_eq!(value["name"], "Ada");
        assert_eq!(value["email"], "ada@example.com");
        assert_eq!(value["message"], "Hello");
    }
}
