// Rust guideline compliant 2026-02-06

//! Retry policy for tracker requests.
//!
//! Each request runs as a small state machine: attempt, then either
//! succeed, wait with exponential backoff (transient 5xx/410 and network
//! failures), wait for the server's rate-limit hint (429), report a
//! definitive not-found (404), or fail hard (any other non-2xx). Both wait
//! kinds carry their own bounded counter, so no request loops forever.

use std::time::Duration;

/// Total attempt budget per request, for each wait kind.
pub const MAX_ATTEMPTS: u32 = 6;

/// Base backoff factor; attempt `n` waits `BACKOFF_FACTOR_MS << (n - 1)`.
pub const BACKOFF_FACTOR_MS: u64 = 800;

/// Rate-limit wait used when the server supplies no usable hint.
pub const DEFAULT_RATE_LIMIT_WAIT: Duration = Duration::from_secs(5);

/// How a response status steers the retry state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Success; hand the response to the caller.
    Ok,
    /// Definitive not-found; never retried.
    NotFound,
    /// Rate limited; wait for the server hint and retry.
    RateLimited,
    /// Transient failure; retry with backoff.
    Retryable,
    /// Non-retryable failure; give up and report.
    Fatal,
}

/// Classifies an HTTP status into a retry disposition.
pub fn classify(status: u16) -> Disposition {
    match status {
        200..=299 => Disposition::Ok,
        404 => Disposition::NotFound,
        429 => Disposition::RateLimited,
        410 | 500 | 502 | 503 | 504 => Disposition::Retryable,
        _ => Disposition::Fatal,
    }
}

/// Exponential backoff delay for the given attempt number (1-based).
pub fn backoff_delay(attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1).min(10);
    Duration::from_millis(BACKOFF_FACTOR_MS << exponent)
}

/// Wait duration for a 429 response.
///
/// Honors a `Retry-After` seconds value when parseable, clamped to at
/// least one second; otherwise falls back to the fixed default.
pub fn rate_limit_delay(retry_after: Option<&str>) -> Duration {
    match retry_after.map(str::trim).and_then(|s| s.parse::<u64>().ok()) {
        Some(secs) => Duration::from_secs(secs.max(1)),
        None => DEFAULT_RATE_LIMIT_WAIT,
    }
}
