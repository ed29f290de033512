// Rust guideline compliant 2026-02-06

//! Quorum CLI Application
//!
//! Command-line interface for extracting governance issues and their
//! linked issues from a Jira tracker, rendering them as a text report,
//! JSON, flat CSV or one-row-per-group CSV.

pub mod output;

pub use output::{deliver, link_types_table, render, validate_destination, OutputKind};
