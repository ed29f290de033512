// Rust guideline compliant 2026-02-06

//! Exporters for the assembled issue graph.
//!
//! All four renderers are pure functions of the `IssueWithLinks` slice and
//! produce identical bytes for identical input. Date strings pass through
//! verbatim; nothing here consults a clock or locale.

use crate::models::{IssueRecord, IssueWithLinks};
use crate::Result;
use std::cmp::Ordering;
use std::fmt::Write as _;

const RULE_HEAVY: &str =
    "================================================================================";
const RULE_LIGHT: &str =
    "--------------------------------------------------------------------------------";

/// Renders the issue graph as bordered text blocks.
///
/// The banner names the project key. One block per primary issue with
/// summary, URL, chair, vice-chair and email lines, then an indented list
/// of linked issues in the same shape, or an explicit `None` marker. Ends
/// with a total count banner.
pub fn render_text(results: &[IssueWithLinks], project_key: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", RULE_HEAVY);
    let _ = writeln!(out, "{} ISSUES WITH LINKED GOVERNANCE", project_key);
    let _ = writeln!(out, "{}", RULE_HEAVY);
    let _ = writeln!(out);

    for result in results {
        let issue = &result.issue;
        let _ = writeln!(out, "{}", RULE_LIGHT);
        let _ = writeln!(out, "Issue: {}", issue.key);
        let _ = writeln!(out, "{}", RULE_LIGHT);
        push_record_lines(&mut out, issue, "  ");

        if result.linked_issues.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "  Linked Issues: None");
        } else {
            let _ = writeln!(out);
            let _ = writeln!(out, "  Linked Issues ({}):", result.linked_issues.len());
            for linked in &result.linked_issues {
                let _ = writeln!(out, "    - {} ({})", linked.record.key, linked.link_type);
                push_record_lines(&mut out, &linked.record, "      ");
            }
        }

        let _ = writeln!(out);
    }

    let _ = writeln!(out, "{}", RULE_HEAVY);
    let _ = writeln!(out, "Total: {} issue(s)", results.len());
    let _ = writeln!(out, "{}", RULE_HEAVY);

    out
}

/// Appends the summary/URL/chair/vice-chair/email lines of one record.
fn push_record_lines(out: &mut String, record: &IssueRecord, indent: &str) {
    let email_indent = format!("{}             ", indent);
    let _ = writeln!(out, "{}Summary:     {}", indent, record.summary);
    let _ = writeln!(out, "{}URL:         {}", indent, record.url);
    let _ = writeln!(out, "{}Chair:       {}", indent, or_na(&record.chair));
    if let Some(email) = &record.chair_email {
        let _ = writeln!(out, "{}Email: {}", email_indent, email);
    }
    let _ = writeln!(out, "{}Vice-Chair:  {}", indent, or_na(&record.vice_chair));
    if let Some(email) = &record.vice_chair_email {
        let _ = writeln!(out, "{}Email: {}", email_indent, email);
    }
    if !record.emails.is_empty() {
        let _ = writeln!(out, "{}Emails:      {}", indent, record.emails.join(", "));
    }
}

fn or_na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("N/A")
}

/// Renders the issue graph as a JSON array with 2-space indentation.
///
/// Serialization is lossless: re-parsing the output reproduces the input
/// sequence field for field.
///
/// # Errors
///
/// Returns an error if serialization fails, which does not happen for
/// well-formed records.
pub fn render_json(results: &[IssueWithLinks]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// Flat CSV column headers.
const CSV_HEADERS: [&str; 11] = [
    "type",
    "key",
    "summary",
    "url",
    "chair",
    "chair_email",
    "vice_chair",
    "vice_chair_email",
    "emails",
    "linked_to",
    "link_type",
];

/// Renders the issue graph as flat CSV.
///
/// One `main` row per primary issue followed by one `linked` row per linked
/// issue carrying a `linked_to` back-reference; emails joined with `;`.
pub fn render_csv(results: &[IssueWithLinks]) -> String {
    let mut rows: Vec<Vec<String>> = Vec::new();

    for result in results {
        let issue = &result.issue;
        rows.push(flat_row("main", issue, "", ""));
        for linked in &result.linked_issues {
            rows.push(flat_row("linked", &linked.record, &issue.key, &linked.link_type));
        }
    }

    write_csv(&CSV_HEADERS, &rows)
}

fn flat_row(row_type: &str, record: &IssueRecord, linked_to: &str, link_type: &str) -> Vec<String> {
    vec![
        row_type.to_string(),
        record.key.clone(),
        record.summary.clone(),
        record.url.clone(),
        opt(&record.chair),
        opt(&record.chair_email),
        opt(&record.vice_chair),
        opt(&record.vice_chair_email),
        record.emails.join(";"),
        linked_to.to_string(),
        link_type.to_string(),
    ]
}

/// Grouped CSV column headers: full governance metadata per primary issue
/// plus the linked issue's contact columns.
const GROUPED_HEADERS: [&str; 30] = [
    "Issue",
    "Summary",
    "Status",
    "Creation Date",
    "Recharter Approval Date",
    "Charter",
    "Confluence Space",
    "Mailing List",
    "Activity Level",
    "Meeting Notes",
    "Next Election Month",
    "Next Election Year",
    "Last Election Month",
    "Last Election Year",
    "Chair",
    "Chair Email",
    "Chair Affiliation",
    "Is Acting Chair",
    "Vice-Chair",
    "Vice-Chair Email",
    "Vice-Chair Affiliation",
    "Is Acting Vice-Chair",
    "Linked Issue Summary",
    "Linked Issue Chair",
    "Linked Issue Chair Email",
    "Linked Issue Chair Affiliation",
    "Linked Issue Vice-Chair",
    "Linked Issue Vice-Chair Email",
    "Linked Issue Vice-Chair Affiliation",
    "Linked Issue Mailing List",
];

/// Renders the issue graph as grouped CSV.
///
/// One row per (primary, linked) pair, or a single row with empty linked
/// columns when a primary has no links. Rows are sorted by linked-issue
/// summary (empty summaries last) then primary key, clustering governance
/// units under a shared parent summary.
pub fn render_grouped_csv(results: &[IssueWithLinks]) -> String {
    let mut rows: Vec<Vec<String>> = Vec::new();

    for result in results {
        let issue = &result.issue;
        if result.linked_issues.is_empty() {
            rows.push(grouped_row(issue, None));
        } else {
            for linked in &result.linked_issues {
                rows.push(grouped_row(issue, Some(&linked.record)));
            }
        }
    }

    // Columns 22 and 0 are the linked-issue summary and the primary key.
    rows.sort_by(|a, b| {
        summary_last(&a[22], &b[22]).then_with(|| a[0].cmp(&b[0]))
    });

    write_csv(&GROUPED_HEADERS, &rows)
}

/// Orders summaries lexically with empty strings strictly last.
fn summary_last(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.cmp(b),
    }
}

fn grouped_row(issue: &IssueRecord, linked: Option<&IssueRecord>) -> Vec<String> {
    let mut row = vec![
        issue.key.clone(),
        issue.summary.clone(),
        opt(&issue.status),
        opt(&issue.creation_date),
        opt(&issue.recharter_approval_date),
        opt(&issue.charter),
        opt(&issue.confluence_space),
        opt(&issue.mailing_list),
        opt(&issue.activity_level),
        opt(&issue.meeting_notes),
        opt(&issue.next_election_month),
        opt(&issue.next_election_year),
        opt(&issue.last_election_month),
        opt(&issue.last_election_year),
        opt(&issue.chair),
        opt(&issue.chair_email),
        opt(&issue.chair_affiliation),
        yes_no(issue.is_acting_chair),
        opt(&issue.vice_chair),
        opt(&issue.vice_chair_email),
        opt(&issue.vice_chair_affiliation),
        yes_no(issue.is_acting_vice_chair),
    ];

    match linked {
        Some(li) => row.extend([
            li.summary.clone(),
            opt(&li.chair),
            opt(&li.chair_email),
            opt(&li.chair_affiliation),
            opt(&li.vice_chair),
            opt(&li.vice_chair_email),
            opt(&li.vice_chair_affiliation),
            opt(&li.mailing_list),
        ]),
        None => row.extend(std::iter::repeat(String::new()).take(8)),
    }

    row
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn yes_no(flag: bool) -> String {
    if flag { "Yes" } else { "No" }.to_string()
}

/// Writes a header row and data rows as CSV text.
fn write_csv(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    let header_row: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    push_csv_row(&mut out, &header_row);
    for row in rows {
        push_csv_row(&mut out, row);
    }
    out
}

fn push_csv_row(out: &mut String, row: &[String]) {
    for (i, field) in row.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&csv_field(field));
    }
    out.push('\n');
}

/// Quotes a CSV field when it contains a delimiter, quote or line break;
/// embedded quotes are doubled.
fn csv_field(field: &str) -> String {
    if field.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Direction, LinkedIssue};

    fn record(key: &str, summary: &str) -> IssueRecord {
        IssueRecord {
            key: key.to_string(),
            summary: summary.to_string(),
            url: format!("https://tracker.example.com/browse/{}", key),
            chair: Some("Ada Lovelace".to_string()),
            chair_email: Some("ada@example.com".to_string()),
            chair_affiliation: None,
            vice_chair: None,
            vice_chair_email: None,
            vice_chair_affiliation: None,
            emails: vec!["ada@example.com".to_string()],
            status: Some("Active".to_string()),
            charter: None,
            confluence_space: None,
            mailing_list: None,
            activity_level: None,
            meeting_notes: None,
            creation_date: Some("2023-01-15".to_string()),
            next_election_month: None,
            next_election_year: None,
            last_election_month: None,
            last_election_year: None,
            is_acting_chair: false,
            is_acting_vice_chair: false,
            recharter_approval_date: None,
        }
    }

    fn with_links(issue: IssueRecord, linked: Vec<(IssueRecord, &str)>) -> IssueWithLinks {
        IssueWithLinks {
            issue,
            linked_issues: linked
                .into_iter()
                .map(|(rec, link_type)| LinkedIssue {
                    record: rec,
                    link_type: link_type.to_string(),
                    link_direction: Direction::Inward,
                })
                .collect(),
        }
    }

    #[test]
    fn test_text_renders_blocks_and_total() {
        let results = vec![with_links(
            record("RVG-1", "Vector WG"),
            vec![(record("RVG-9", "Governance Board"), "Governs")],
        )];
        let text = render_text(&results, "RVG");
        assert!(text.contains("RVG ISSUES WITH LINKED GOVERNANCE"));
        assert!(text.contains("Issue: RVG-1"));
        assert!(text.contains("  Summary:     Vector WG"));
        assert!(text.contains("  Linked Issues (1):"));
        assert!(text.contains("    - RVG-9 (Governs)"));
        assert!(text.contains("      Summary:     Governance Board"));
        assert!(text.contains("Total: 1 issue(s)"));
    }

    #[test]
    fn test_text_marks_empty_linked_list() {
        let results = vec![with_links(record("RVG-1", "Vector WG"), vec![])];
        let text = render_text(&results, "RVG");
        assert!(text.contains("  Linked Issues: None"));
    }

    #[test]
    fn test_text_banner_names_project() {
        let text = render_text(&[], "GOV");
        assert!(text.starts_with(&format!(
            "{}\nGOV ISSUES WITH LINKED GOVERNANCE\n",
            "=".repeat(80)
        )));
    }

    #[test]
    fn test_text_omits_absent_email_lines() {
        let mut rec = record("RVG-1", "Vector WG");
        rec.chair = None;
        rec.chair_email = None;
        rec.emails = Vec::new();
        let text = render_text(&[with_links(rec, vec![])], "RVG");
        assert!(text.contains("  Chair:       N/A"));
        assert!(!text.contains("Email:"));
        assert!(!text.contains("Emails:"));
    }

    #[test]
    fn test_json_round_trip() {
        let results = vec![
            with_links(
                record("RVG-1", "Vector WG"),
                vec![(record("RVG-9", "Board"), "Governs")],
            ),
            with_links(record("RVG-2", "Crypto WG"), vec![]),
        ];
        let json = render_json(&results).unwrap();
        let parsed: Vec<IssueWithLinks> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, results);
    }

    #[test]
    fn test_json_uses_two_space_indent() {
        let results = vec![with_links(record("RVG-1", "Vector WG"), vec![])];
        let json = render_json(&results).unwrap();
        assert!(json.contains("\n  {"));
        assert!(json.contains("\n    \"issue\""));
    }

    #[test]
    fn test_flat_csv_rows() {
        let results = vec![with_links(
            record("RVG-1", "Vector WG"),
            vec![(record("RVG-9", "Board"), "Governs")],
        )];
        let csv = render_csv(&results);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("type,key,summary,url,chair"));
        assert!(lines[1].starts_with("main,RVG-1,Vector WG,"));
        assert!(lines[2].starts_with("linked,RVG-9,Board,"));
        assert!(lines[2].contains(",RVG-1,Governs"));
    }

    #[test]
    fn test_flat_csv_joins_emails_with_semicolon() {
        let mut rec = record("RVG-1", "Vector WG");
        rec.emails = vec!["a@x.org".to_string(), "b@y.org".to_string()];
        let csv = render_csv(&[with_links(rec, vec![])]);
        assert!(csv.contains("a@x.org;b@y.org"));
    }

    #[test]
    fn test_csv_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn test_csv_quotes_summary_with_comma() {
        let rec = record("RVG-1", "Vector, SIMD and friends");
        let csv = render_csv(&[with_links(rec, vec![])]);
        assert!(csv.contains("\"Vector, SIMD and friends\""));
    }

    #[test]
    fn test_grouped_csv_sorts_by_linked_summary_empty_last() {
        // A has no links, B links to "Zeta", C links to "Alpha":
        // expected row order is C, B, A.
        let results = vec![
            with_links(record("RVG-A", "Unit A"), vec![]),
            with_links(
                record("RVG-B", "Unit B"),
                vec![(record("RVG-10", "Zeta"), "Governs")],
            ),
            with_links(
                record("RVG-C", "Unit C"),
                vec![(record("RVG-11", "Alpha"), "Governs")],
            ),
        ];
        let csv = render_grouped_csv(&results);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("RVG-C,"));
        assert!(lines[2].starts_with("RVG-B,"));
        assert!(lines[3].starts_with("RVG-A,"));
    }

    #[test]
    fn test_grouped_csv_ties_break_on_primary_key() {
        let results = vec![
            with_links(
                record("RVG-B", "Unit B"),
                vec![(record("RVG-10", "Shared Parent"), "Governs")],
            ),
            with_links(
                record("RVG-A", "Unit A"),
                vec![(record("RVG-10", "Shared Parent"), "Governs")],
            ),
        ];
        let csv = render_grouped_csv(&results);
        let lines: Vec<&str> = csv.lines().collect();
        assert!(lines[1].starts_with("RVG-A,"));
        assert!(lines[2].starts_with("RVG-B,"));
    }

    #[test]
    fn test_grouped_csv_unlinked_row_has_empty_linked_columns() {
        let results = vec![with_links(record("RVG-A", "Unit A"), vec![])];
        let csv = render_grouped_csv(&results);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0].split(',').count(), 30);
        assert!(lines[1].ends_with(",,,,,,,"));
    }

    #[test]
    fn test_grouped_csv_renders_flags_as_yes_no() {
        let mut rec = record("RVG-A", "Unit A");
        rec.is_acting_chair = true;
        let csv = render_grouped_csv(&[with_links(rec, vec![])]);
        assert!(csv.lines().nth(1).unwrap().contains(",Yes,"));
        assert!(csv.lines().nth(1).unwrap().contains(",No,"));
    }

    #[test]
    fn test_exporters_are_deterministic() {
        let results = vec![with_links(
            record("RVG-1", "Vector WG"),
            vec![(record("RVG-9", "Board"), "Governs")],
        )];
        assert_eq!(render_text(&results, "RVG"), render_text(&results, "RVG"));
        assert_eq!(render_csv(&results), render_csv(&results));
        assert_eq!(render_grouped_csv(&results), render_grouped_csv(&results));
        assert_eq!(
            render_json(&results).unwrap(),
            render_json(&results).unwrap()
        );
    }
}
