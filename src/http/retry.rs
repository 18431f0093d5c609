//! Retry logic for network operations with error classification.

use reqwest::StatusCode;
use thiserror::Error;

/// Maximum number of attempts for network operations.
pub const MAX_RETRIES: usize = 3;

/// Delay between retry attempts in milliseconds.
pub const RETRY_DELAY_MS: u64 = 1000;

/// Errors that should not be retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NonRetryableError {
    /// HTTP 403 or 429. The API answers 403 once the anonymous quota is used up.
    #[error(
        "GitHub API rate limit exceeded. Consider adding a GITHUB_TOKEN environment variable for higher limits."
    )]
    RateLimitExceeded,
    /// HTTP 401
    #[error("Authentication failed. Check your GITHUB_TOKEN.")]
    AuthenticationFailed,
    /// HTTP 404
    #[error("Not found: {0}")]
    NotFound(String),
    /// Other client errors that won't succeed on retry
    #[error("GitHub API responded with status: {0}")]
    ClientError(u16),
}

/// Classifies a status error as retryable (`Ok`) or not.
pub fn classify_error(error: &reqwest::Error) -> Result<(), NonRetryableError> {
    let Some(status) = error.status() else {
        // Connection errors, timeouts, etc.
        return Ok(());
    };

    match status {
        StatusCode::UNAUTHORIZED => Err(NonRetryableError::AuthenticationFailed),
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
            Err(NonRetryableError::RateLimitExceeded)
        }
        StatusCode::NOT_FOUND => Err(NonRetryableError::NotFound(
            error
                .url()
                .map(|u| u.path().to_string())
                .unwrap_or_else(|| "the requested resource".to_string()),
        )),
        s if s.is_client_error() => Err(NonRetryableError::ClientError(s.as_u16())),
        // 5xx server errors are retryable
        _ => Ok(()),
    }
}

/// Maps an error from `error_for_status()` to a [`NonRetryableError`] when
/// retrying is pointless, leaving it untouched otherwise.
pub fn check_retryable(error: reqwest::Error) -> anyhow::Error {
    match classify_error(&error) {
        Ok(()) => anyhow::Error::from(error),
        Err(non_retryable) => anyhow::Error::from(non_retryable),
    }
}

/// Whether an error chain was caused by the provider's rate limiting.
pub fn is_rate_limited(error: &anyhow::Error) -> bool {
    error
        .chain()
        .any(|cause| {
            matches!(
                cause.downcast_ref::<NonRetryableError>(),
                Some(NonRetryableError::RateLimitExceeded)
            )
        })
}
