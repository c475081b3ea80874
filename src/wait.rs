//! Bounded, cancellable readiness polling against the page.

use crate::driver::PageDriver;
use crate::error::InspectError;
use serde_json::Value;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl WaitConfig {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Ready,
    TimedOut,
}

/// JavaScript truthiness of a returned value.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Evaluate `check` until it is truthy or `config.timeout` elapses.
///
/// The check always runs at least once, so a zero timeout is a single check.
pub async fn wait_until<D: PageDriver + ?Sized>(
    driver: &mut D,
    check: &str,
    config: WaitConfig,
    cancel: &CancellationToken,
) -> Result<WaitOutcome, InspectError> {
    let deadline = Instant::now() + config.timeout;
    let mut ticker = tokio::time::interval(config.poll_interval.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut attempts = 0u32;

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(InspectError::Cancelled),
            _ = ticker.tick() => {}
        }

        attempts += 1;
        if is_truthy(&driver.evaluate(check).await?) {
            debug!(attempts, "Readiness check passed");
            return Ok(WaitOutcome::Ready);
        }
        if Instant::now() >= deadline {
            debug!(attempts, ?config.timeout, "Readiness check timed out");
            return Ok(WaitOutcome::TimedOut);
        }
    }
}

/// Sleep for `duration` unless cancelled first. Returns false when cancelled.
pub async fn pause(duration: Duration, cancel: &CancellationToken) -> bool {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => false,
        _ = tokio::time::sleep(duration) => true,
    }
}

/// Drive `task` to completion unless `cancel` fires first.
///
/// Used for single driver steps (launch, navigation) that have no timeout of
/// their own and could otherwise outlive a Ctrl-C.
pub async fn cancellable<T, E, F>(cancel: &CancellationToken, task: F) -> Result<T, InspectError>
where
    F: Future<Output = Result<T, E>>,
    InspectError: From<E>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(InspectError::Cancelled),
        done = task => done.map_err(InspectError::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&serde_json::json!(false)));
        assert!(!is_truthy(&serde_json::json!(0)));
        assert!(!is_truthy(&serde_json::json!("")));
        assert!(is_truthy(&serde_json::json!(true)));
        assert!(is_truthy(&serde_json::json!(2)));
        assert!(is_truthy(&serde_json::json!("complete")));
        assert!(is_truthy(&serde_json::json!([])));
    }

    #[tokio::test]
    async fn test_pause_completes() {
        let cancel = CancellationToken::new();
        assert!(pause(Duration::from_millis(5), &cancel).await);
    }

    #[tokio::test]
    async fn test_pause_cancelled() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        assert!(!pause(Duration::from_secs(3600), &cancel).await);
    }

    #[tokio::test]
    async fn test_cancellable_passes_result_through() {
        let cancel = CancellationToken::new();
        let done = cancellable(&cancel, async { Ok::<_, InspectError>(7) }).await;
        assert!(matches!(done, Ok(7)));

        let failed = cancellable(&cancel, async {
            Err::<(), _>(crate::error::DriverError::Launch("no chrome".to_string()))
        })
        .await;
        assert!(matches!(
            failed,
            Err(InspectError::Driver(crate::error::DriverError::Launch(_)))
        ));
    }

    #[tokio::test]
    async fn test_cancellable_abandons_stalled_task() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let stalled = std::future::pending::<Result<(), InspectError>>();
        let result = tokio::time::timeout(Duration::from_secs(5), cancellable(&cancel, stalled))
            .await
            .expect("cancellation was ignored");
        assert!(matches!(result, Err(InspectError::Cancelled)));
    }
}
