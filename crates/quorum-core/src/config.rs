// Rust guideline compliant 2026-02-06

//! Configuration management for Quorum.
//!
//! The configuration is an immutable value built once at process start:
//! defaults, then an optional TOML file, then environment variable
//! overrides, then validation. Core logic receives it by reference and
//! never consults the environment itself.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Custom-field identifier table for the tracker instance.
///
/// Field ids are externally configured constants; Quorum performs no schema
/// discovery. The defaults match the RVG governance project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldIds {
    /// Chair (user reference or plain string).
    pub chair: String,
    /// Chair Email (plain string when populated directly).
    pub chair_email: String,
    /// Chair Affiliation (dropdown).
    pub chair_affiliation: String,
    /// Vice-Chair (user reference or plain string).
    pub vice_chair: String,
    /// Vice-Chair Email.
    pub vice_chair_email: String,
    /// Vice-Chair Affiliation (dropdown).
    pub vice_chair_affiliation: String,
    /// Charter (URL).
    pub charter: String,
    /// Confluence Space (URL).
    pub confluence_space: String,
    /// Mailing List (URL).
    pub mailing_list: String,
    /// Activity Level (dropdown).
    pub activity_level: String,
    /// Meeting Notes (URL).
    pub meeting_notes: String,
    /// Group Creation Date (opaque date string).
    pub creation_date: String,
    /// Next Election Month (dropdown).
    pub next_election_month: String,
    /// Next Election Year (dropdown).
    pub next_election_year: String,
    /// Last Election Month (dropdown).
    pub last_election_month: String,
    /// Last Election Year (dropdown).
    pub last_election_year: String,
    /// Is Acting Chair? (checkbox).
    pub is_acting_chair: String,
    /// Is Acting Vice-Chair? (checkbox).
    pub is_acting_vice_chair: String,
    /// Recharter Approval Date (opaque date string).
    pub recharter_approval_date: String,
}

impl Default for FieldIds {
    fn default() -> Self {
        Self {
            chair: "customfield_10092".to_string(),
            chair_email: "customfield_10093".to_string(),
            chair_affiliation: "customfield_10096".to_string(),
            vice_chair: "customfield_10099".to_string(),
            vice_chair_email: "customfield_10100".to_string(),
            vice_chair_affiliation: "customfield_10103".to_string(),
            charter: "customfield_10086".to_string(),
            confluence_space: "customfield_10122".to_string(),
            mailing_list: "customfield_10071".to_string(),
            activity_level: "customfield_10145".to_string(),
            meeting_notes: "customfield_10088".to_string(),
            creation_date: "customfield_10090".to_string(),
            next_election_month: "customfield_10312".to_string(),
            next_election_year: "customfield_10313".to_string(),
            last_election_month: "customfield_10311".to_string(),
            last_election_year: "customfield_10310".to_string(),
            is_acting_chair: "customfield_10094".to_string(),
            is_acting_vice_chair: "customfield_10102".to_string(),
            recharter_approval_date: "customfield_10643".to_string(),
        }
    }
}

/// Configuration for a Quorum run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the tracker server (no trailing slash).
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Project key whose issues form the governance set.
    #[serde(default = "default_project_key")]
    pub project_key: String,

    /// Page size for paginated searches.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Per-request timeout ceiling in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Relation-name fragments matched against link-type labels, in
    /// precedence order. Matching is case-insensitive substring.
    #[serde(default = "default_relation_names")]
    pub relation_names: Vec<String>,

    /// Custom-field identifier table.
    #[serde(default)]
    pub fields: FieldIds,
}

/// Default tracker server URL.
fn default_server_url() -> String {
    "https://riscv.atlassian.net".to_string()
}

/// Default governance project key.
fn default_project_key() -> String {
    "RVG".to_string()
}

/// Default search page size.
fn default_page_size() -> usize {
    50
}

/// Default per-request timeout in seconds.
fn default_timeout_secs() -> u64 {
    30
}

/// Default relation names resolved against issue links.
fn default_relation_names() -> Vec<String> {
    vec![
        "is direct-lined by".to_string(),
        "is governed by".to_string(),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            project_key: default_project_key(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
            relation_names: default_relation_names(),
            fields: FieldIds::default(),
        }
    }
}

impl Config {
    /// Loads configuration from an optional file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. TOML configuration file, when a path is given and the file exists
    /// 3. Environment variables (`JIRA_SERVER_URL`, `JIRA_HTTP_TIMEOUT`)
    ///
    /// # Arguments
    ///
    /// * `path` - Optional path to a TOML configuration file
    ///
    /// # Returns
    ///
    /// A validated Config with file and environment overrides applied.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration file exists but cannot be read
    /// - The configuration file contains invalid TOML
    /// - Environment variable values are invalid
    /// - Configuration values fail validation
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(config_path) = path {
            if config_path.exists() {
                let content = std::fs::read_to_string(config_path)?;
                config = toml::from_str(&content).map_err(|e| {
                    crate::Error::InvalidConfig(format!("Invalid config file: {}", e))
                })?;
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `JIRA_SERVER_URL` - Tracker base URL
    /// - `JIRA_HTTP_TIMEOUT` - Per-request timeout in seconds
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable values are invalid.
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("JIRA_SERVER_URL") {
            self.server_url = val;
        }

        if let Ok(val) = std::env::var("JIRA_HTTP_TIMEOUT") {
            self.timeout_secs = val.parse().map_err(|_| {
                crate::Error::InvalidConfig(
                    "JIRA_HTTP_TIMEOUT must be a number of seconds".to_string(),
                )
            })?;
        }

        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - server_url is empty
    /// - page_size is zero
    /// - relation_names is empty
    fn validate(&self) -> Result<()> {
        if self.server_url.trim().is_empty() {
            return Err(crate::Error::InvalidConfig(
                "server_url must not be empty".to_string(),
            ));
        }

        if self.page_size == 0 {
            return Err(crate::Error::InvalidConfig(
                "page_size must be greater than 0".to_string(),
            ));
        }

        if self.relation_names.is_empty() {
            return Err(crate::Error::InvalidConfig(
                "relation_names must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Returns the built-in default JQL for the governance set.
    ///
    /// Excludes subtasks and keeps the active-ish statuses, ordered by
    /// status then key so runs are deterministic.
    pub fn default_query(&self) -> String {
        format!(
            "project = {} AND issuetype not in subTaskIssueTypes() \
             AND status in (Active, Proposing, \"Structuring and Chartering\") \
             ORDER BY status ASC, key ASC",
            self.project_key
        )
    }

    /// Returns the ordered field-id list requested from the tracker.
    pub fn fetch_fields(&self) -> Vec<String> {
        vec![
            "summary".to_string(),
            "status".to_string(),
            "issuelinks".to_string(),
            self.fields.chair.clone(),
            self.fields.chair_email.clone(),
            self.fields.chair_affiliation.clone(),
            self.fields.vice_chair.clone(),
            self.fields.vice_chair_email.clone(),
            self.fields.vice_chair_affiliation.clone(),
            self.fields.charter.clone(),
            self.fields.confluence_space.clone(),
            self.fields.mailing_list.clone(),
            self.fields.activity_level.clone(),
            self.fields.meeting_notes.clone(),
            self.fields.creation_date.clone(),
            self.fields.next_election_month.clone(),
            self.fields.next_election_year.clone(),
            self.fields.last_election_month.clone(),
            self.fields.last_election_year.clone(),
            self.fields.is_acting_chair.clone(),
            self.fields.is_acting_vice_chair.clone(),
            self.fields.recharter_approval_date.clone(),
        ]
    }

    /// Returns the browse URL for an issue key on this server.
    pub fn issue_url(&self, key: &str) -> String {
        format!("{}/browse/{}", self.server_url.trim_end_matches('/'), key)
    }
}
