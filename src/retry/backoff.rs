//! Retry execution on top of the `backoff` crate.
//!
//! [`retry_with_backoff`] mirrors [`RetryExecutor::execute`] for callers that
//! already standardize on `backoff` futures; both honor the same
//! [`RetryPolicy`] and the same retryability rules.
//!
//! [`RetryExecutor::execute`]: super::policy::RetryExecutor::execute

use std::cell::Cell;

use backoff::{Error as BackoffError, ExponentialBackoff, ExponentialBackoffBuilder};

use super::policy::RetryPolicy;
use crate::error::DashScopeError;

/// Translate a [`RetryPolicy`] into the `backoff` crate's exponential backoff.
///
/// Attempt counting is not expressible here; [`retry_with_backoff`] enforces
/// `max_attempts` around it.
pub fn exponential_backoff(policy: &RetryPolicy) -> ExponentialBackoff {
    ExponentialBackoffBuilder::new()
        .with_initial_interval(policy.initial_delay)
        .with_max_interval(policy.max_delay)
        .with_multiplier(policy.backoff_multiplier)
        .with_randomization_factor(if policy.use_jitter {
            policy.jitter_factor
        } else {
            0.0
        })
        .with_max_elapsed_time(None)
        .build()
}

/// Execute an operation with retries driven by the `backoff` crate.
///
/// Non-retryable errors become permanent immediately; retryable errors are
/// transient until `policy.max_attempts` is reached.
pub async fn retry_with_backoff<F, Fut, T>(
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, DashScopeError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, DashScopeError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let attempts = Cell::new(0u32);
    let attempts = &attempts;

    backoff::future::retry(exponential_backoff(policy), || {
        let fut = operation();
        async move {
            let attempt = attempts.get() + 1;
            attempts.set(attempt);
            match fut.await {
                Ok(value) => Ok(value),
                Err(err) if err.is_retryable() && attempt < max_attempts => {
                    Err(BackoffError::transient(err))
                }
                Err(err) => Err(BackoffError::permanent(err)),
            }
        }
    })
    .await
}
