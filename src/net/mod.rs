//! Remote interfaces: the projects fetch, the contact submit, and the
//! visitor beacons. Everything here runs on worker threads and reports back
//! over `mpsc` channels; the UI never blocks on the network.

pub mod analytics;
pub mod contact;
pub mod projects;

use std::time::Duration;

use reqwest::blocking::Client;

use crate::constants::HTTP_TIMEOUT_SECS;

pub(crate) fn http_client() -> reqwest::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(concat!("term-desk/", env!("CARGO_PKG_VERSION")))
        .build()
}
