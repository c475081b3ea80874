//! Chromium driver over the DevTools protocol (chromiumoxide).

use super::PageDriver;
use crate::config::BrowserSettings;
use crate::error::DriverError;
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures_util::StreamExt;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// One Chromium process with a single page.
pub struct ChromeDriver {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

impl ChromeDriver {
    pub async fn launch(settings: &BrowserSettings) -> Result<Self, DriverError> {
        let mut builder = BrowserConfig::builder().viewport(None);
        if !settings.headless {
            builder = builder.with_head();
        }
        if settings.no_sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(path) = &settings.executable {
            builder = builder.chrome_executable(path);
        }
        let args = settings.launch_args();
        debug!(?args, headless = settings.headless, "Launching Chromium");

        let config = builder
            .args(args)
            .build()
            .map_err(|e| DriverError::Launch(format!("invalid browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| DriverError::Launch(e.to_string()))?;

        // The CDP connection only makes progress while its handler is polled.
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!(error = %e, "CDP handler event error");
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                return Err(DriverError::Launch(format!("failed to open page: {}", e)));
            }
        };

        Ok(Self {
            browser,
            page,
            handler,
        })
    }
}

#[async_trait]
impl PageDriver for ChromeDriver {
    async fn navigate(&mut self, url: &str) -> Result<(), DriverError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| DriverError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    async fn evaluate(&mut self, script: &str) -> Result<Value, DriverError> {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| DriverError::Evaluate(e.to_string()))?;
        Ok(result.value().cloned().unwrap_or(Value::Null))
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        let closed = self
            .browser
            .close()
            .await
            .map_err(|e| DriverError::Close(e.to_string()));
        if closed.is_ok() {
            if let Err(e) = self.browser.wait().await {
                warn!(error = %e, "Browser process did not exit cleanly");
            }
        }
        self.handler.abort();
        closed.map(|_| ())
    }
}
