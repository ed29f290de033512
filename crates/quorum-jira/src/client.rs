// Rust guideline compliant 2026-02-06

//! Blocking Jira REST v3 client implementing the `Tracker` port.
//!
//! The wire seam is the [`Exchange`] trait (one request, one response), so
//! the retry loop and pagination are testable with scripted responses. The
//! production exchange wraps `reqwest::blocking` with basic auth, JSON
//! headers and a fixed per-request timeout.

use crate::retry::{
    backoff_delay, classify, rate_limit_delay, Disposition, MAX_ATTEMPTS,
};
use quorum_core::{
    Config, Error, FetchOutcome, LinkType, RawIssue, Result, SearchOutcome, Tracker,
};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

/// Tracker account credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Account email used for basic auth.
    pub email: String,
    /// API token used for basic auth.
    pub token: String,
}

impl Credentials {
    /// Reads credentials from `JIRA_USER_EMAIL` and `JIRA_API_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns an error if either variable is unset or empty; callers
    /// surface this as a usage error before the pipeline runs.
    pub fn from_env() -> Result<Self> {
        let email = std::env::var("JIRA_USER_EMAIL").unwrap_or_default();
        let token = std::env::var("JIRA_API_TOKEN").unwrap_or_default();
        if email.is_empty() || token.is_empty() {
            return Err(Error::InvalidConfig(
                "set env vars JIRA_USER_EMAIL and JIRA_API_TOKEN".to_string(),
            ));
        }
        Ok(Self { email, token })
    }
}

/// HTTP method for an API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET request.
    Get,
    /// POST request with a JSON body.
    Post,
}

/// One API request as seen by the wire seam.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Fully qualified URL.
    pub url: String,
    /// JSON body, for POST requests.
    pub body: Option<Value>,
}

/// One wire response, reduced to what the retry loop needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw `Retry-After` header value, when present.
    pub retry_after: Option<String>,
    /// Response body text.
    pub body: String,
}

/// A single wire round trip. Network-level failures (timeout, connect)
/// surface as `Err` and are retried within the attempt budget.
pub trait Exchange {
    /// Executes one request.
    fn execute(&self, request: &ApiRequest) -> std::result::Result<WireResponse, String>;
}

/// Synchronous sleep, abstracted so tests can observe waits.
pub trait Sleeper {
    /// Blocks the current thread for the given duration.
    fn sleep(&self, duration: Duration);
}

/// Sleeper backed by `std::thread::sleep`.
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Production exchange over `reqwest::blocking`.
pub struct ReqwestExchange {
    client: reqwest::blocking::Client,
    credentials: Credentials,
}

impl ReqwestExchange {
    /// Builds a blocking HTTP client with JSON headers and a fixed timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be constructed.
    pub fn new(credentials: Credentials, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::network(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            credentials,
        })
    }
}

impl Exchange for ReqwestExchange {
    fn execute(&self, request: &ApiRequest) -> std::result::Result<WireResponse, String> {
        let builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => {
                let builder = self.client.post(&request.url);
                match &request.body {
                    Some(body) => builder.json(body),
                    None => builder,
                }
            }
        };

        let response = builder
            .basic_auth(&self.credentials.email, Some(&self.credentials.token))
            .header("Accept", "application/json")
            .send()
            .map_err(|e| e.to_string())?;

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().map_err(|e| e.to_string())?;

        Ok(WireResponse {
            status,
            retry_after,
            body,
        })
    }
}

/// Jira REST v3 tracker client.
pub struct JiraClient {
    exchange: Box<dyn Exchange>,
    sleeper: Box<dyn Sleeper>,
    server_url: String,
}

impl JiraClient {
    /// Creates a client for the configured server with real HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &Config, credentials: Credentials) -> Result<Self> {
        let exchange = ReqwestExchange::new(credentials, config.timeout_secs)?;
        Ok(Self::with_parts(
            Box::new(exchange),
            Box::new(ThreadSleeper),
            config.server_url.clone(),
        ))
    }

    /// Creates a client over an arbitrary exchange and sleeper.
    pub fn with_parts(
        exchange: Box<dyn Exchange>,
        sleeper: Box<dyn Sleeper>,
        server_url: String,
    ) -> Self {
        Self {
            exchange,
            sleeper,
            server_url: server_url.trim_end_matches('/').to_string(),
        }
    }

    /// Sends a request, retrying per the policy in [`crate::retry`].
    ///
    /// Returns the response for success and definitive not-found statuses;
    /// callers decide what 404 means for their endpoint. Backoff retries
    /// and rate-limit waits are counted on separate bounded budgets.
    fn send_with_retry(&self, request: &ApiRequest) -> Result<WireResponse> {
        let mut backoff_attempts: u32 = 0;
        let mut rate_limit_waits: u32 = 0;

        loop {
            match self.exchange.execute(request) {
                Ok(response) => match classify(response.status) {
                    Disposition::Ok | Disposition::NotFound => return Ok(response),
                    Disposition::RateLimited => {
                        rate_limit_waits += 1;
                        if rate_limit_waits >= MAX_ATTEMPTS {
                            return Err(Error::transport(
                                response.status,
                                "rate-limit retries exhausted",
                            ));
                        }
                        let wait = rate_limit_delay(response.retry_after.as_deref());
                        warn!("rate limited, waiting {}s", wait.as_secs());
                        self.sleeper.sleep(wait);
                    }
                    Disposition::Retryable => {
                        backoff_attempts += 1;
                        if backoff_attempts >= MAX_ATTEMPTS {
                            return Err(Error::transport(
                                response.status,
                                format!(
                                    "retry budget exhausted: {}",
                                    server_messages(&response.body)
                                ),
                            ));
                        }
                        let wait = backoff_delay(backoff_attempts);
                        debug!(
                            "transient HTTP {}, backing off {}ms",
                            response.status,
                            wait.as_millis()
                        );
                        self.sleeper.sleep(wait);
                    }
                    Disposition::Fatal => {
                        return Err(Error::transport(
                            response.status,
                            server_messages(&response.body),
                        ));
                    }
                },
                Err(message) => {
                    backoff_attempts += 1;
                    if backoff_attempts >= MAX_ATTEMPTS {
                        return Err(Error::network(message));
                    }
                    let wait = backoff_delay(backoff_attempts);
                    debug!("network error ({}), backing off {}ms", message, wait.as_millis());
                    self.sleeper.sleep(wait);
                }
            }
        }
    }

    fn parse_body(body: &str) -> Result<Value> {
        Ok(serde_json::from_str(body)?)
    }
}

impl Tracker for JiraClient {
    fn search(&self, query: &str, fields: &[String], page_size: usize) -> SearchOutcome {
        let url = format!("{}/rest/api/3/search/jql", self.server_url);
        let mut issues: Vec<RawIssue> = Vec::new();
        let mut next_page_token: Option<String> = None;

        loop {
            let mut body = json!({
                "jql": query,
                "fields": fields,
                "maxResults": page_size,
            });
            if let Some(token) = &next_page_token {
                body["nextPageToken"] = json!(token);
            }

            let request = ApiRequest {
                method: Method::Post,
                url: url.clone(),
                body: Some(body),
            };

            let response = match self.send_with_retry(&request) {
                Ok(response) if response.status == 404 => {
                    // A search endpoint 404 is a server-side failure, not
                    // a missing issue.
                    return SearchOutcome {
                        issues,
                        failure: Some(Error::transport(404, "search endpoint not found")),
                    };
                }
                Ok(response) => response,
                Err(err) => {
                    return SearchOutcome {
                        issues,
                        failure: Some(err),
                    };
                }
            };

            let data = match Self::parse_body(&response.body) {
                Ok(data) => data,
                Err(err) => {
                    return SearchOutcome {
                        issues,
                        failure: Some(err),
                    };
                }
            };

            if let Some(page) = data.get("issues").and_then(Value::as_array) {
                issues.extend(page.iter().cloned());
            }
            debug!("fetched {} issue(s) so far", issues.len());

            next_page_token = data
                .get("nextPageToken")
                .and_then(Value::as_str)
                .map(str::to_string);
            if next_page_token.is_none() {
                return SearchOutcome {
                    issues,
                    failure: None,
                };
            }
        }
    }

    fn get_by_key(&self, key: &str, fields: &[String]) -> FetchOutcome {
        let url = format!(
            "{}/rest/api/3/issue/{}?fields={}",
            self.server_url,
            key,
            fields.join(",")
        );
        let request = ApiRequest {
            method: Method::Get,
            url,
            body: None,
        };

        match self.send_with_retry(&request) {
            Ok(response) if response.status == 404 => FetchOutcome::NotFound,
            Ok(response) => match Self::parse_body(&response.body) {
                Ok(raw) => FetchOutcome::Found(raw),
                Err(err) => FetchOutcome::Failed(err),
            },
            Err(err) => FetchOutcome::Failed(err),
        }
    }

    fn list_link_types(&self) -> Result<Vec<LinkType>> {
        let url = format!("{}/rest/api/3/issueLinkType", self.server_url);
        let request = ApiRequest {
            method: Method::Get,
            url,
            body: None,
        };

        let response = self.send_with_retry(&request)?;
        if response.status == 404 {
            return Err(Error::transport(404, "link-type endpoint not found"));
        }

        let data = Self::parse_body(&response.body)?;
        let types = data
            .get("issueLinkTypes")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| LinkType {
                        name: text(entry, "name"),
                        inward: text(entry, "inward"),
                        outward: text(entry, "outward"),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(types)
    }
}

/// String member of a JSON object, empty when absent.
fn text(value: &Value, member: &str) -> String {
    value
        .get(member)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Extracts server `errorMessages` from an error body, falling back to a
/// truncated body excerpt.
fn server_messages(body: &str) -> String {
    if let Ok(data) = serde_json::from_str::<Value>(body) {
        if let Some(messages) = data.get("errorMessages").and_then(Value::as_array) {
            let joined: Vec<&str> = messages.iter().filter_map(Value::as_str).collect();
            if !joined.is_empty() {
                return joined.join("; ");
            }
        }
    }
    let mut excerpt: String = body.chars().take(200).collect();
    if excerpt.is_empty() {
        excerpt = "no response body".to_string();
    }
    excerpt
}
