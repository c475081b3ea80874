//! One inspection run against an acquired browser.
//!
//! The driver is closed exactly once when [`run`] returns, whether the
//! inspection finished, hit the login wall, or failed part way.

use crate::config::Config;
use crate::driver::PageDriver;
use crate::error::InspectError;
use crate::inspect::{self, script};
use crate::report::Report;
use crate::wait::{WaitConfig, WaitOutcome, cancellable, pause, wait_until};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// How a run ended, short of an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Outcome {
    /// The page shows a sign-in prompt; nothing was inspected.
    AuthRequired { url: String },
    Inspected(Report),
}

/// First configured login marker present in the page text.
pub fn login_marker<'a>(body: &str, markers: &'a [String]) -> Option<&'a str> {
    markers
        .iter()
        .map(String::as_str)
        .find(|m| !m.is_empty() && body.contains(m))
}

/// Run the inspection and close the driver.
///
/// `sink` receives the outcome as soon as it is known, before the optional
/// hold-open pause, so the report is visible while the browser stays up.
pub async fn run<D, F>(
    mut driver: D,
    config: &Config,
    cancel: &CancellationToken,
    mut sink: F,
) -> Result<Outcome, InspectError>
where
    D: PageDriver,
    F: FnMut(&Outcome),
{
    let result = drive(&mut driver, config, cancel, &mut sink).await;

    info!("Closing browser...");
    if let Err(e) = driver.close().await {
        warn!(error = %e, "Browser did not close cleanly");
    }

    result
}

async fn drive<D, F>(
    driver: &mut D,
    config: &Config,
    cancel: &CancellationToken,
    sink: &mut F,
) -> Result<Outcome, InspectError>
where
    D: PageDriver,
    F: FnMut(&Outcome),
{
    let url = config.target_url.as_str();
    let poll_interval = config.wait.poll_interval();

    info!(%url, "Opening page");
    cancellable(cancel, driver.navigate(url)).await?;

    info!("Waiting for page to load...");
    let page_wait = WaitConfig::new(config.wait.page_load_timeout(), poll_interval);
    if wait_until(driver, script::DOCUMENT_READY, page_wait, cancel).await? == WaitOutcome::TimedOut
    {
        return Err(InspectError::Timeout {
            what: "page load",
            after: page_wait.timeout,
        });
    }

    let body = driver.body_text().await?;
    if let Some(marker) = login_marker(&body, &config.login_markers) {
        info!(marker, "Page requires login");
        let outcome = Outcome::AuthRequired {
            url: url.to_string(),
        };
        sink(&outcome);
        return Ok(outcome);
    }

    info!("Looking for video elements...");
    let media_wait = WaitConfig::new(config.wait.video_timeout(), poll_interval);
    if wait_until(driver, script::MEDIA_PRESENT, media_wait, cancel).await? == WaitOutcome::TimedOut
    {
        warn!(after = ?media_wait.timeout, "No video or iframe appeared; inspecting anyway");
    }

    let result = inspect::inspect(driver).await?;
    let tracks = inspect::enumerate_tracks(driver).await?;
    info!(
        player = %result.player_type,
        videos = result.videos.len(),
        iframes = result.iframes.len(),
        tracks = tracks.len(),
        "Inspection complete"
    );

    let outcome = Outcome::Inspected(Report::new(result, tracks));
    sink(&outcome);

    let hold = config.hold_open();
    if !hold.is_zero() {
        info!(
            secs = hold.as_secs(),
            "Keeping browser open for manual inspection (Ctrl-C to close now)"
        );
        if !pause(hold, cancel).await {
            info!("Hold interrupted");
        }
    }

    Ok(outcome)
}
