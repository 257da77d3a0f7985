//! Bounded waits for browser conditions.
//!
//! Every page-object action blocks until its element is present, so the whole
//! suite rests on one primitive: poll a condition at a fixed interval until it
//! holds or a timeout elapses. [`poll_until`] is that primitive; [`wait_for`]
//! and [`wait_for_result`] are the boolean forms of it.

use crate::error::{E2eError, Result};
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, trace};

/// Default timeout for wait operations (10 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default poll interval for checking conditions (100ms).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Configuration for wait operations.
///
/// CI environments might need longer timeouts; tests against the simulated
/// storefront use much shorter ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    /// Maximum time to wait for the condition.
    pub timeout: Duration,

    /// How often to check if the condition is satisfied.
    pub poll_interval: Duration,
}

impl WaitConfig {
    /// Creates a new wait configuration.
    #[must_use]
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Creates a config with custom timeout and default poll interval.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new(timeout, DEFAULT_POLL_INTERVAL)
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_POLL_INTERVAL)
    }
}

/// Polls `producer` until it yields a value, with timeout.
///
/// The producer is called at `poll_interval` until it returns `Ok(Some(_))`.
/// `Ok(None)` means "not yet". A transient error (see
/// [`E2eError::is_transient`]) is logged and retried like `Ok(None)`; any
/// other error is returned at once. The condition is always checked at
/// least once, even with a zero timeout.
///
/// # Errors
///
/// Returns the first non-transient error from `producer`, or `WaitTimeout`
/// if no value was produced before the timeout.
pub async fn poll_until<T, F, Fut>(producer: F, config: WaitConfig, description: &str) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    let start = Instant::now();
    let mut last_error = None;

    loop {
        match producer().await {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => {}
            Err(e) if e.is_transient() => {
                trace!("{description}: transient error while polling: {e}");
                last_error = Some(e);
            }
            Err(e) => return Err(e),
        }

        if start.elapsed() >= config.timeout {
            if let Some(e) = last_error {
                debug!("{description}: last error before timeout: {e}");
            }
            return Err(E2eError::WaitTimeout {
                condition: description.to_string(),
                timeout: config.timeout,
            });
        }

        sleep(config.poll_interval).await;
    }
}

/// Waits for a condition to become true, with timeout.
///
/// # Example
///
/// ```ignore
/// wait_for(
///     || async { page.current_url().await.is_ok_and(|u| u.contains("inventory")) },
///     WaitConfig::default(),
///     "inventory to load",
/// ).await?;
/// ```
///
/// # Errors
///
/// Returns `WaitTimeout` if the condition never held.
pub async fn wait_for<F, Fut>(condition: F, config: WaitConfig, description: &str) -> Result<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = bool>,
{
    poll_until(
        || {
            let check = condition();
            async move { Ok(check.await.then_some(())) }
        },
        config,
        description,
    )
    .await
}

/// Waits for a condition that returns a `Result<bool>`.
///
/// Transient errors from the condition are treated like `false` and
/// retried; other errors end the wait.
///
/// # Errors
///
/// Returns a non-transient condition error as is, or `WaitTimeout` if the
/// condition never returned `Ok(true)`.
pub async fn wait_for_result<F, Fut>(
    condition: F,
    config: WaitConfig,
    description: &str,
) -> Result<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    poll_until(
        || {
            let check = condition();
            async move { check.await.map(|ok| ok.then_some(())) }
        },
        config,
        description,
    )
    .await
}
