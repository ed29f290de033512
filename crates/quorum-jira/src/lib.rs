// Rust guideline compliant 2026-02-06

//! Quorum Jira Adapter
//!
//! Infrastructure crate implementing `quorum-core`'s `Tracker` port over
//! the Jira REST v3 API with blocking HTTP:
//! - Bounded retry/backoff with explicit rate-limit handling
//! - Paginated search via opaque continuation tokens
//! - Single-issue fetch distinguishing not-found from failure
//! - Link-type discovery

pub mod client;
pub mod retry;

pub use client::{
    ApiRequest, Credentials, Exchange, JiraClient, Method, ReqwestExchange, Sleeper,
    ThreadSleeper, WireResponse,
};
pub use retry::{classify, Disposition, DEFAULT_RATE_LIMIT_WAIT, MAX_ATTEMPTS};
