//! HTTP client module with retry logic and error handling.

mod client;
mod retry;

pub use client::{HttpClient, JSON_MEDIA_TYPE, RAW_MEDIA_TYPE};
pub use retry::{
    MAX_RETRIES, NonRetryableError, RETRY_DELAY_MS, check_retryable, classify_error,
    is_rate_limited,
};
