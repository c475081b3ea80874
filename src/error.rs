//! Error kinds for a browser inspection run.
//!
//! A login wall is not an error: it is reported as
//! [`Outcome::AuthRequired`](crate::session::Outcome::AuthRequired).

use std::time::Duration;
use thiserror::Error;

/// Failure reported by a [`PageDriver`](crate::driver::PageDriver).
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("script evaluation failed: {0}")]
    Evaluate(String),

    #[error("failed to close browser: {0}")]
    Close(String),

    #[error("browser automation is not compiled in; rebuild with `--features browser`")]
    Unsupported,
}

/// Failure of an inspection run after the browser has been acquired.
#[derive(Debug, Error)]
pub enum InspectError {
    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error("malformed {what} returned by the page")]
    MalformedData {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("timed out after {after:?} waiting for {what}")]
    Timeout { what: &'static str, after: Duration },

    #[error("inspection cancelled")]
    Cancelled,
}

impl InspectError {
    pub fn malformed(what: &'static str, source: serde_json::Error) -> Self {
        Self::MalformedData { what, source }
    }
}
