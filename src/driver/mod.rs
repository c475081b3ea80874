//! Browser driver abstraction
//!
//! The inspector only needs a handful of capabilities from the browser:
//! navigate, evaluate a script and get its value back, and close. They are
//! collected in [`PageDriver`] so the session logic can run against Chromium
//! (via CDP) or against a scripted fake in tests.

#[cfg(feature = "browser")]
mod chrome;

#[cfg(feature = "browser")]
pub use chrome::ChromeDriver;

use crate::config::BrowserSettings;
use crate::error::DriverError;
use async_trait::async_trait;
use serde_json::Value;

/// Capabilities consumed from a live browser page.
#[async_trait]
pub trait PageDriver: Send {
    /// Navigate the page and wait for the navigation to commit.
    async fn navigate(&mut self, url: &str) -> Result<(), DriverError>;

    /// Evaluate a script in the page and return its value.
    async fn evaluate(&mut self, script: &str) -> Result<Value, DriverError>;

    /// Visible text of `<body>`.
    async fn body_text(&mut self) -> Result<String, DriverError> {
        let value = self
            .evaluate("document.body ? document.body.innerText : ''")
            .await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    /// Shut the browser down. Called exactly once per session.
    async fn close(&mut self) -> Result<(), DriverError>;
}

/// Launch Chromium with the given settings.
#[cfg(feature = "browser")]
pub async fn launch(settings: &BrowserSettings) -> Result<ChromeDriver, DriverError> {
    ChromeDriver::launch(settings).await
}

/// Without the `browser` feature there is nothing to launch.
#[cfg(not(feature = "browser"))]
pub async fn launch(_settings: &BrowserSettings) -> Result<NoBrowser, DriverError> {
    Err(DriverError::Unsupported)
}

/// Placeholder driver type for builds without the `browser` feature.
#[cfg(not(feature = "browser"))]
#[derive(Debug)]
pub enum NoBrowser {}

#[cfg(not(feature = "browser"))]
#[async_trait]
impl PageDriver for NoBrowser {
    async fn navigate(&mut self, _url: &str) -> Result<(), DriverError> {
        match *self {}
    }

    async fn evaluate(&mut self, _script: &str) -> Result<Value, DriverError> {
        match *self {}
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        match *self {}
    }
}
