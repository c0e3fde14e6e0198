//! Retry with exponential back-off and jitter for storefront reads.
//!
//! Only idempotent requests go through [`retry_with_backoff`]; adding to the
//! cart is never retried because a timed-out POST may still have landed.

use std::future::Future;
use std::time::Duration;

use crate::error::StorefrontError;

/// Upper bound on a single back-off sleep.
const MAX_DELAY_MS: u64 = 10_000;

/// Returns `true` if `err` is transient and worth retrying.
///
/// Retriable:
/// - [`StorefrontError::RateLimited`]: HTTP 429.
/// - [`StorefrontError::Http`]: connection reset, timeout, TLS hiccup.
/// - [`StorefrontError::UnexpectedStatus`] with a 5xx status.
///
/// Everything else (404, malformed JSON, rejected cart lines, bad input) is
/// returned immediately.
pub(crate) fn is_retriable(err: &StorefrontError) -> bool {
    match err {
        StorefrontError::RateLimited { .. } | StorefrontError::Http(_) => true,
        StorefrontError::UnexpectedStatus { status, .. } => *status >= 500,
        StorefrontError::Deserialize { .. }
        | StorefrontError::NotFound { .. }
        | StorefrontError::CartRejected { .. }
        | StorefrontError::EmptyAddResponse { .. }
        | StorefrontError::InvalidStoreUrl { .. }
        | StorefrontError::InvalidHandle { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// The n-th retry sleeps `backoff_base_ms * 2^(n-1)` ms ±25 % jitter, capped
/// at [`MAX_DELAY_MS`]. With `max_retries = 2` the operation runs at most
/// three times.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, StorefrontError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, StorefrontError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient storefront error — retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
