// Rust guideline compliant 2026-02-06

//! Output selection and delivery for the Quorum CLI.
//!
//! Rendering itself lives in `quorum_core::export`; this module picks the
//! exporter for the requested format, enforces the save-file rules, and
//! writes the result to a file or stdout.

use anyhow::{bail, Context, Result};
use quorum_core::export::{render_csv, render_grouped_csv, render_json, render_text};
use quorum_core::{IssueWithLinks, LinkType};
use std::io::Write;
use std::path::Path;
use tabled::{builder::Builder, settings::Style};
use tracing::info;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputKind {
    /// Human-readable text report.
    Text,
    /// Pretty-printed JSON document.
    Json,
    /// Flat CSV, one row per issue or linked issue.
    Csv,
    /// Grouped CSV, one row per group with linked-issue columns.
    #[value(name = "grouped-csv")]
    GroupedCsv,
}

impl OutputKind {
    /// Whether the format can only be written to a file.
    pub fn requires_save(self) -> bool {
        matches!(self, Self::Csv | Self::GroupedCsv)
    }
}

/// Rejects format/destination combinations before any network work runs.
///
/// # Errors
///
/// Returns a usage error when a CSV format is requested without `--save`.
pub fn validate_destination(kind: OutputKind, save: Option<&Path>) -> Result<()> {
    if kind.requires_save() && save.is_none() {
        bail!("--output {:?} requires --save FILE", kind);
    }
    Ok(())
}

/// Renders the assembled issue graph in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(kind: OutputKind, results: &[IssueWithLinks], project_key: &str) -> Result<String> {
    let rendered = match kind {
        OutputKind::Text => render_text(results, project_key),
        OutputKind::Json => render_json(results)?,
        OutputKind::Csv => render_csv(results),
        OutputKind::GroupedCsv => render_grouped_csv(results),
    };
    Ok(rendered)
}

/// Writes rendered output to its destination.
///
/// The text report always goes to stdout and is additionally saved when a
/// file is given; the other formats go to the save file when given, stdout
/// otherwise.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn deliver(kind: OutputKind, rendered: &str, save: Option<&Path>) -> Result<()> {
    if kind == OutputKind::Text || save.is_none() {
        println!("{}", rendered);
    }
    if let Some(path) = save {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        file.write_all(rendered.as_bytes())
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("output saved to: {}", path.display());
    }
    Ok(())
}

/// Renders the tracker's link types as a table, in server order.
pub fn link_types_table(types: &[LinkType]) -> String {
    let mut builder = Builder::default();
    builder.push_record(vec!["Name", "Inward", "Outward"]);
    for link_type in types {
        builder.push_record(vec![
            link_type.name.as_str(),
            link_type.inward.as_str(),
            link_type.outward.as_str(),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::modern());
    table.to_string()
}
