use log::{debug, error, warn};
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Fixed-delay retry policy for a single remote call.
///
/// Every `Err` from the operation counts as a transient failure. Soft
/// failures that must not be retried are expressed in the `Ok` value
/// (see [`crate::http::HttpClient`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// `max_attempts` is clamped to at least one
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `operation` until it succeeds or attempts are exhausted.
    /// Sleeps `delay` after each failed attempt except the last.
    pub async fn execute<F, Fut, T, E>(
        &self,
        operation_name: &str,
        mut operation: F,
    ) -> Result<T, RetryExhausted<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let mut attempt = 0;

        loop {
            attempt += 1;

            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!("[{}] succeeded after {} attempts", operation_name, attempt);
                    }
                    return Ok(value);
                }
                Err(e) if attempt < self.max_attempts => {
                    warn!(
                        "[{}] attempt {}/{} failed: {}, retrying in {:?}...",
                        operation_name, attempt, self.max_attempts, e, self.delay
                    );
                    sleep(self.delay).await;
                }
                Err(e) => {
                    error!("[{}] failed for good: {}", operation_name, e);
                    return Err(RetryExhausted {
                        operation: operation_name.to_string(),
                        attempts: attempt,
                        last_error: e,
                    });
                }
            }
        }
    }
}

/// All attempts failed; carries the last error
#[derive(Debug)]
pub struct RetryExhausted<E> {
    pub operation: String,
    pub attempts: u32,
    pub last_error: E,
}

impl<E: fmt::Display> fmt::Display for RetryExhausted<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failed after {} attempt(s): {}",
            self.operation, self.attempts, self.last_error
        )
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for RetryExhausted<E> {}
