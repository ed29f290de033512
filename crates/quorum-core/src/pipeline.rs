// Rust guideline compliant 2026-02-06

//! Pipeline orchestration: fetch, normalize, resolve, assemble.
//!
//! The orchestrator drives retrieval through the [`Tracker`] port trait,
//! which infrastructure adapters implement. Retrieval is strictly
//! sequential: a primary issue's linked issues are fetched after its own
//! record is built and before the next primary begins.

use crate::config::Config;
use crate::links::resolve_links;
use crate::models::{IssueWithLinks, LinkedIssue, RawIssue};
use crate::record::build_record;
use crate::{Error, Result};
use tracing::{debug, info, warn};

/// Result of a paginated search: whatever was accumulated, plus the error
/// that ended retrieval early, if any (partial-success policy).
#[derive(Debug)]
pub struct SearchOutcome {
    /// Raw issues accumulated across pages, in retrieval order.
    pub issues: Vec<RawIssue>,
    /// The failure that stopped pagination, when retrieval was cut short.
    pub failure: Option<Error>,
}

/// Result of fetching a single issue by key.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The issue was retrieved.
    Found(RawIssue),
    /// The tracker definitively reported the key as unknown.
    NotFound,
    /// Retrieval failed (non-retryable status or retry budget exhausted).
    Failed(Error),
}

/// A link type as advertised by the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkType {
    /// Display name of the link type.
    pub name: String,
    /// Inward-direction label.
    pub inward: String,
    /// Outward-direction label.
    pub outward: String,
}

/// Read-only issue tracker capability consumed by the pipeline.
///
/// Implementations own transport concerns (retry, backoff, rate limiting);
/// the pipeline adds no retries of its own.
pub trait Tracker {
    /// Searches for issues matching a query, following pagination to the end.
    fn search(&self, query: &str, fields: &[String], page_size: usize) -> SearchOutcome;

    /// Fetches a single issue by key.
    fn get_by_key(&self, key: &str, fields: &[String]) -> FetchOutcome;

    /// Lists the link types the tracker advertises, in server order.
    fn list_link_types(&self) -> Result<Vec<LinkType>>;
}

/// Primary issue selection for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Search by query; None uses the configured default query.
    Query(Option<String>),
    /// Fetch an explicit, ordered key list.
    Keys(Vec<String>),
}

impl Selector {
    /// Builds a selector from the CLI's optional query and key list.
    ///
    /// Explicit keys take precedence when both are supplied; the query is
    /// ignored in that case.
    pub fn from_args(query: Option<String>, keys: Vec<String>) -> Self {
        if keys.is_empty() {
            Self::Query(query)
        } else {
            if query.is_some() {
                debug!("both query and keys given; explicit keys take precedence");
            }
            Self::Keys(keys)
        }
    }
}

/// Outcome of a pipeline run.
#[derive(Debug)]
pub struct RunReport {
    /// Assembled issue graph nodes, in primary retrieval order.
    pub results: Vec<IssueWithLinks>,
    /// Failure that cut the primary phase short, when one occurred. The
    /// results accumulated before the failure are still complete.
    pub failure: Option<Error>,
}

/// Runs the fetch–normalize–resolve–assemble pipeline.
///
/// Primary issues come from a search or an explicit key list. NotFound
/// primaries are skipped with a warning; a hard transport failure ends the
/// primary phase but issues already fetched are still resolved and
/// returned, with the failure recorded in the report. A linked issue that
/// cannot be fetched is dropped with a warning and never aborts the run.
///
/// # Errors
///
/// Returns an error only for defects: a fetched issue payload without a
/// `key` (malformed tracker data).
pub fn run(tracker: &dyn Tracker, config: &Config, selector: &Selector) -> Result<RunReport> {
    let fetch_fields = config.fetch_fields();

    let (primaries, failure) = match selector {
        Selector::Keys(keys) => fetch_primaries_by_key(tracker, keys, &fetch_fields),
        Selector::Query(query) => {
            let query = query.clone().unwrap_or_else(|| config.default_query());
            info!(query = %query, "searching issues");
            let outcome = tracker.search(&query, &fetch_fields, config.page_size);
            (outcome.issues, outcome.failure)
        }
    };

    info!("found {} issue(s)", primaries.len());

    let mut results = Vec::with_capacity(primaries.len());
    for (index, raw) in primaries.iter().enumerate() {
        let record = build_record(raw, config)?;
        info!(
            "processing {}/{}: {}",
            index + 1,
            primaries.len(),
            record.key
        );

        let mut linked_issues = Vec::new();
        for link_edge in resolve_links(raw, &config.relation_names) {
            match tracker.get_by_key(&link_edge.related_key, &fetch_fields) {
                FetchOutcome::Found(linked_raw) => {
                    linked_issues.push(LinkedIssue {
                        record: build_record(&linked_raw, config)?,
                        link_type: link_edge.relation_name,
                        link_direction: link_edge.direction,
                    });
                }
                FetchOutcome::NotFound => {
                    warn!(
                        "linked issue {} of {} not found; dropping edge",
                        link_edge.related_key, record.key
                    );
                }
                FetchOutcome::Failed(err) => {
                    warn!(
                        "failed to fetch linked issue {} of {}: {}; dropping edge",
                        link_edge.related_key, record.key, err
                    );
                }
            }
        }

        results.push(IssueWithLinks {
            issue: record,
            linked_issues,
        });
    }

    Ok(RunReport { results, failure })
}

/// Fetches primaries sequentially by key, skipping NotFound keys with a
/// warning and stopping (with the error recorded) on a hard failure.
fn fetch_primaries_by_key(
    tracker: &dyn Tracker,
    keys: &[String],
    fields: &[String],
) -> (Vec<RawIssue>, Option<Error>) {
    info!("fetching {} specified issue(s)", keys.len());
    let mut issues = Vec::new();

    for key in keys {
        match tracker.get_by_key(key, fields) {
            FetchOutcome::Found(raw) => issues.push(raw),
            FetchOutcome::NotFound => warn!("issue {} not found; skipping", key),
            FetchOutcome::Failed(err) => {
                warn!("fetching {} failed: {}; stopping primary fetch", key, err);
                return (issues, Some(err));
            }
        }
    }

    (issues, None)
}
