// Rust guideline compliant 2026-02-06

//! Quorum command-line entry point.
//!
//! Wires configuration, credentials and the Jira client together, runs the
//! extraction pipeline and delivers the rendered output.

use anyhow::{Context, Result};
use clap::Parser;
use quorum_cli::output::{self, OutputKind};
use quorum_core::{pipeline, Config, Selector, Tracker};
use quorum_jira::{Credentials, JiraClient};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "quorum",
    version,
    about = "Extract governance issues and their linked issues from Jira",
    after_help = "Credentials are read from the JIRA_USER_EMAIL and JIRA_API_TOKEN environment variables.\n\nExamples:\n  quorum\n  quorum --output json --save issues.json\n  quorum --issues RVG-58 RVG-23 --output text\n  quorum --jql 'project = RVG AND status = Active' --output grouped-csv --save groups.csv\n  quorum --list-link-types\n"
)]
struct Cli {
    /// Custom JQL query for selecting primary issues
    #[arg(long)]
    jql: Option<String>,

    /// Explicit issue keys to fetch (takes precedence over --jql)
    #[arg(long = "issues", value_name = "KEY", num_args = 1..)]
    issues: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    output: OutputKind,

    /// Write output to a file instead of stdout (required for CSV formats)
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,

    /// Custom config file path
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,

    /// List the tracker's link types and exit
    #[arg(long)]
    list_link_types: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Usage errors are cheap to catch; reject them before any network work.
    output::validate_destination(cli.output, cli.save.as_deref())?;

    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    let credentials = Credentials::from_env()?;
    let client = JiraClient::new(&config, credentials)?;

    if cli.list_link_types {
        let types = client.list_link_types()?;
        println!("{}", output::link_types_table(&types));
        return Ok(());
    }

    let selector = Selector::from_args(cli.jql.clone(), cli.issues.clone());
    let report = pipeline::run(&client, &config, &selector)?;

    if report.results.is_empty() {
        println!("No issues found.");
        if let Some(failure) = report.failure {
            anyhow::bail!("retrieval incomplete: {}", failure);
        }
        return Ok(());
    }

    let rendered = output::render(cli.output, &report.results, &config.project_key)?;
    output::deliver(cli.output, &rendered, cli.save.as_deref())?;

    // A mid-run transport failure still exported the accumulated results;
    // report it and exit non-zero so callers notice the truncation.
    if let Some(failure) = report.failure {
        error!("run ended early: {}", failure);
        anyhow::bail!("retrieval incomplete: {}", failure);
    }

    Ok(())
}
