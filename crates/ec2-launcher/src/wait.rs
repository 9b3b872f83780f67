//! Polling with exponential backoff and a deadline.
//!
//! Provides a generic abstraction for waiting on an AWS resource (or any async
//! condition) to become ready, with configurable exponential backoff and jitter.
//! The outcome is explicit: ready, timed out, or failed.

use anyhow::Result;
use backon::{BackoffBuilder, ExponentialBuilder};
use ec2_launcher_common::defaults::{
    DEFAULT_SPOT_TIMEOUT_SECS, SPOT_POLL_INITIAL_DELAY_SECS, SPOT_POLL_MAX_DELAY_SECS,
};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Configuration for polling with exponential backoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitConfig {
    /// Initial delay between checks
    pub initial_delay: Duration,
    /// Maximum delay between checks (cap for exponential growth)
    pub max_delay: Duration,
    /// Maximum total time to wait before timeout
    pub timeout: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(SPOT_POLL_INITIAL_DELAY_SECS),
            max_delay: Duration::from_secs(SPOT_POLL_MAX_DELAY_SECS),
            timeout: Duration::from_secs(DEFAULT_SPOT_TIMEOUT_SECS),
        }
    }
}

impl WaitConfig {
    /// Spot fulfillment polling with the given deadline
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }
}

/// How a wait ended
#[derive(Debug)]
pub enum WaitOutcome<T> {
    /// The check reported the resource ready
    Ready(T),
    /// The deadline passed while the resource was still pending
    TimedOut { attempts: u32, elapsed: Duration },
    /// The check returned an error; polling stopped
    Failed(anyhow::Error),
}

/// Poll `check` until it yields a value, fails, or the deadline passes.
///
/// `check` returns `Ok(Some(value))` when ready, `Ok(None)` to keep waiting
/// and `Err` to stop. The resource is always checked at least once, and the
/// last sleep is shortened so the final check lands on the deadline.
///
/// Elapsed time is measured on the tokio clock.
///
/// # Example
/// ```ignore
/// let outcome = poll_until(
///     &WaitConfig::default(),
///     || async { Ok(lookup().await?.instance_id) },
///     "spot request sir-123",
/// ).await;
/// ```
pub async fn poll_until<T, F, Fut>(
    config: &WaitConfig,
    mut check: F,
    resource_name: &str,
) -> WaitOutcome<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    let start = Instant::now();
    let mut attempts = 0u32;

    let backoff = ExponentialBuilder::default()
        .with_min_delay(config.initial_delay)
        .with_max_delay(config.max_delay)
        .with_factor(2.0)
        .with_jitter()
        .build();

    let mut delays = backoff.into_iter();

    loop {
        attempts += 1;

        match check().await {
            Ok(Some(value)) => {
                debug!(resource = %resource_name, attempts, "Resource ready");
                return WaitOutcome::Ready(value);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(resource = %resource_name, attempts, error = ?e, "Resource check failed");
                return WaitOutcome::Failed(e);
            }
        }

        let elapsed = start.elapsed();
        if elapsed >= config.timeout {
            return WaitOutcome::TimedOut { attempts, elapsed };
        }

        let delay = delays
            .next()
            .unwrap_or(config.max_delay)
            .min(config.timeout - elapsed);
        debug!(
            resource = %resource_name,
            attempt = attempts,
            delay_ms = delay.as_millis(),
            "Resource not ready, retrying"
        );

        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_config(timeout: Duration) -> WaitConfig {
        WaitConfig {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(4),
            timeout,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_after_pending_checks() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let outcome = poll_until(
            &fast_config(Duration::from_secs(60)),
            || {
                let counter = counter.clone();
                async move {
                    let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                    Ok((n >= 3).then(|| "i-0abc".to_string()))
                }
            },
            "test",
        )
        .await;

        match outcome {
            WaitOutcome::Ready(id) => assert_eq!(id, "i-0abc"),
            other => panic!("expected Ready, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_at_deadline() {
        let outcome: WaitOutcome<()> = poll_until(
            &fast_config(Duration::from_secs(30)),
            || async { Ok(None) },
            "test",
        )
        .await;

        match outcome {
            WaitOutcome::TimedOut { attempts, elapsed } => {
                assert!(attempts >= 2);
                assert!(elapsed >= Duration::from_secs(30));
                assert!(elapsed < Duration::from_secs(31));
            }
            other => panic!("expected TimedOut, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_timeout_checks_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let outcome: WaitOutcome<()> = poll_until(
            &fast_config(Duration::ZERO),
            || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(None)
                }
            },
            "test",
        )
        .await;

        assert!(matches!(outcome, WaitOutcome::TimedOut { attempts: 1, .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_stops_polling() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let outcome: WaitOutcome<()> = poll_until(
            &fast_config(Duration::from_secs(60)),
            || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(anyhow::anyhow!("bad-parameters"))
                }
            },
            "test",
        )
        .await;

        match outcome {
            WaitOutcome::Failed(e) => assert!(e.to_string().contains("bad-parameters")),
            other => panic!("expected Failed, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_default_config_matches_spot_defaults() {
        let config = WaitConfig::with_timeout(Duration::from_secs(90));
        assert_eq!(config.initial_delay, Duration::from_secs(5));
        assert_eq!(config.max_delay, Duration::from_secs(15));
        assert_eq!(config.timeout, Duration::from_secs(90));
    }
}
