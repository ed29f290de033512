// Rust guideline compliant 2026-02-06

//! Quorum Core Library
//!
//! This crate provides the domain components for the Quorum governance
//! extraction pipeline:
//! - Configuration (tracker address, field-id table, relation names)
//! - Data models (IssueRecord, LinkEdge, IssueWithLinks)
//! - Field normalization (total conversions over raw tracker values)
//! - Record building and link resolution
//! - Pipeline orchestration over the `Tracker` port trait
//! - Exporters (text, JSON, flat CSV, grouped CSV)
//! - Error types and result handling
//!
//! The crate performs no I/O of its own; tracker access is injected through
//! [`pipeline::Tracker`] by an infrastructure adapter.

pub mod config;
pub mod error;
pub mod export;
pub mod fields;
pub mod links;
pub mod models;
pub mod pipeline;
pub mod record;

pub use config::{Config, FieldIds};
pub use error::{Error, Result};
pub use links::resolve_links;
pub use models::{Direction, IssueRecord, IssueWithLinks, LinkEdge, LinkedIssue, RawIssue};
pub use pipeline::{FetchOutcome, LinkType, RunReport, SearchOutcome, Selector, Tracker};
pub use record::build_record;
