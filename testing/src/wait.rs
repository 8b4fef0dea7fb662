//! Bounded waiting for asynchronous outcomes.
//!
//! Asserting on something that only becomes true after an effect resolves
//! needs a retry loop with a deadline. [`wait_for`] re-runs a probe until it
//! succeeds or the timeout expires, and reports the probe's last error when
//! it gives up.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::time::Instant;

/// Default time to keep retrying (1 second)
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// Default pause between retries (50ms)
pub const DEFAULT_INTERVAL_MS: u64 = 50;

/// How long and how often to retry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    /// Give up after this long
    pub timeout: Duration,
    /// Pause between attempts when nothing signals a change
    pub interval: Duration,
}

impl WaitConfig {
    /// Create a config
    #[must_use]
    pub const fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }

    /// Set the timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry interval
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
        }
    }
}

/// The probe never succeeded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WaitError<E> {
    /// The deadline passed; `last_error` is what the final attempt returned
    #[error("Timed out after {timeout:?}: {last_error}")]
    TimedOut {
        /// The configured timeout
        timeout: Duration,
        /// Error from the last attempt
        last_error: E,
    },
}

/// Retry `probe` until it returns `Ok` or the timeout expires
///
/// The probe always runs at least once, and once more at the deadline.
///
/// # Errors
///
/// [`WaitError::TimedOut`] carrying the last probe error.
///
/// # Example
///
/// ```ignore
/// let label = wait_for(&WaitConfig::default(), || async {
///     let label = store.state(TodoState::submit_label).await;
///     if label == "Add #2" { Ok(label) } else { Err(label) }
/// })
/// .await?;
/// ```
pub async fn wait_for<T, E, F, Fut>(config: &WaitConfig, probe: F) -> Result<T, WaitError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    retry::<T, E, F, Fut, ()>(config, probe, None).await
}

/// Like [`wait_for`], but also retries as soon as `changes` reports a new value
///
/// # Errors
///
/// [`WaitError::TimedOut`] carrying the last probe error.
pub async fn wait_for_changes<T, E, F, Fut, W>(
    config: &WaitConfig,
    changes: &mut watch::Receiver<W>,
    probe: F,
) -> Result<T, WaitError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    retry(config, probe, Some(changes)).await
}

async fn retry<T, E, F, Fut, W>(
    config: &WaitConfig,
    mut probe: F,
    mut changes: Option<&mut watch::Receiver<W>>,
) -> Result<T, WaitError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let deadline = Instant::now() + config.timeout;

    loop {
        // Only changes after this attempt should wake the next one
        if let Some(changes) = changes.as_deref_mut() {
            changes.borrow_and_update();
        }

        let last_error = match probe().await {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        let now = Instant::now();
        if now >= deadline {
            return Err(WaitError::TimedOut {
                timeout: config.timeout,
                last_error,
            });
        }

        let pause = config.interval.min(deadline - now);
        tokio::select! {
            () = next_change(changes.as_deref_mut()) => {},
            () = tokio::time::sleep(pause) => {},
        }
    }
}

async fn next_change<W>(changes: Option<&mut watch::Receiver<W>>) {
    if let Some(changes) = changes {
        if changes.changed().await.is_ok() {
            return;
        }
    }
    // No sender left or nothing to watch, fall back to the interval
    std::future::pending::<()>().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn succeeds_once_probe_passes() {
        let attempts = AtomicUsize::new(0);
        let config = WaitConfig::default().with_interval(Duration::from_millis(1));

        let result = wait_for(&config, || async {
            let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            if n >= 3 { Ok(n) } else { Err(n) }
        })
        .await;

        assert_eq!(result, Ok(3));
    }

    #[tokio::test]
    async fn times_out_with_last_error() {
        let config = WaitConfig::new(Duration::from_millis(20), Duration::from_millis(5));

        let result: Result<(), _> = wait_for(&config, || async { Err("still missing") }).await;

        assert_eq!(
            result,
            Err(WaitError::TimedOut {
                timeout: Duration::from_millis(20),
                last_error: "still missing",
            })
        );
    }

    #[tokio::test]
    async fn change_signal_wakes_before_interval() {
        let (tx, mut rx) = watch::channel(0_u32);
        let config = WaitConfig::new(Duration::from_secs(5), Duration::from_secs(5));
        let value = std::sync::Arc::new(AtomicUsize::new(0));

        let writer = {
            let value = std::sync::Arc::clone(&value);
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                value.store(1, Ordering::SeqCst);
                tx.send_replace(1);
                // Keep the sender alive past the probe
                tokio::time::sleep(Duration::from_millis(50)).await;
            })
        };

        let started = Instant::now();
        let result = wait_for_changes(&config, &mut rx, || async {
            match value.load(Ordering::SeqCst) {
                0 => Err(()),
                n => Ok(n),
            }
        })
        .await;

        assert_eq!(result, Ok(1));
        assert!(started.elapsed() < Duration::from_secs(1));
        let _ = writer.await;
    }

    #[tokio::test]
    async fn closed_change_signal_falls_back_to_interval() {
        let (tx, mut rx) = watch::channel(0_u32);
        drop(tx);
        let attempts = AtomicUsize::new(0);
        let config = WaitConfig::new(Duration::from_secs(1), Duration::from_millis(5));

        let result = wait_for_changes(&config, &mut rx, || async {
            let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            if n >= 4 { Ok(n) } else { Err(n) }
        })
        .await;

        assert_eq!(result, Ok(4));
    }
}
