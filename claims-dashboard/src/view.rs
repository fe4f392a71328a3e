//! Plain-text rendering of the dashboard.

use chrono::{DateTime, Local, NaiveDateTime};
use claims_client::{Activity, Claim, Dashboard};
use std::fmt::Write;

const TITLE: &str = "Claims Management Dashboard";
const DESCRIPTION_WIDTH: usize = 40;

/// Render the whole dashboard: form, feedback line and claim table
pub fn render_dashboard(dash: &Dashboard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "{}", "=".repeat(TITLE.len()));
    let _ = writeln!(out);

    let _ = writeln!(out, "Submit New Claim");
    let _ = writeln!(out, "  Customer ID: {}", field(dash.form().customer_id()));
    let _ = writeln!(out, "  Description: {}", field(dash.form().description()));
    let submit = if *dash.activity() == Activity::Submitting {
        "[ Submitting... ]"
    } else if dash.is_busy() {
        "[ Submit Claim ] (disabled)"
    } else {
        "[ Submit Claim ]"
    };
    let _ = writeln!(out, "  {submit}");
    if let Some(notice) = dash.notice() {
        let prefix = if notice.is_error { "ERROR" } else { "OK" };
        let _ = writeln!(out, "  {prefix}: {}", notice.text);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "All Claims");
    let claims = dash.claims();
    if *dash.activity() == Activity::Loading && claims.is_empty() {
        let _ = writeln!(out, "  Loading claims...");
    } else if let Some(list_error) = dash.list_error() {
        let _ = writeln!(out, "  {list_error}");
    } else if let Some(action_error) = dash.action_error() {
        let _ = writeln!(out, "  {action_error}");
        if !claims.is_empty() {
            out.push_str(&render_claims(dash));
        }
    } else if claims.is_empty() {
        let _ = writeln!(out, "  No claims found. Submit one above!");
    } else {
        out.push_str(&render_claims(dash));
    }
    out
}

/// Claim table with one row per cached claim and the actions its status offers
pub fn render_claims(dash: &Dashboard) -> String {
    let headers = [
        "ID",
        "Customer ID",
        "Description",
        "Status",
        "Submission Date",
        "Actions",
    ];
    let rows: Vec<[String; 6]> = dash
        .claims()
        .claims()
        .iter()
        .map(|claim| {
            let mut actions = dash
                .actions_for(claim)
                .iter()
                .map(|action| format!("[{}]", action.label()))
                .collect::<Vec<_>>()
                .join(" ");
            if dash.is_busy() && !actions.is_empty() {
                actions.push_str(" (disabled)");
            }
            [
                claim.id.to_string(),
                claim.customer_id.clone(),
                truncate(&claim.description, DESCRIPTION_WIDTH),
                claim.status.to_string(),
                format_timestamp(&claim.submission_date),
                actions,
            ]
        })
        .collect();

    render_table(&headers, &rows)
}

/// Full detail of a single claim, including its audit trail
pub fn render_claim_detail(claim: &Claim) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Claim {}", claim.id);
    let _ = writeln!(out, "  Customer ID:     {}", claim.customer_id);
    let _ = writeln!(out, "  Description:     {}", claim.description);
    let _ = writeln!(out, "  Status:          {}", claim.status);
    let _ = writeln!(
        out,
        "  Submitted:       {}",
        format_timestamp(&claim.submission_date)
    );
    if let Some(root_cause) = &claim.root_cause {
        let _ = writeln!(out, "  Root cause:      {root_cause}");
    }
    if let Some(resolution) = &claim.resolution_type {
        let _ = writeln!(out, "  Resolution:      {resolution}");
    }
    if let Some(amount) = claim.refund_amount {
        let _ = writeln!(out, "  Refund amount:   {amount:.2}");
    }

    if claim.audit_log.is_empty() {
        return out;
    }
    let _ = writeln!(out, "  Audit log:");
    for entry in &claim.audit_log {
        let _ = write!(
            out,
            "    {} {}",
            format_timestamp(&entry.timestamp),
            entry.action
        );
        if let Some(details) = &entry.details {
            let _ = write!(out, " {details}");
        }
        let _ = writeln!(out);
    }
    out
}

/// Local time for offset-carrying timestamps, wall time for naive ones, and
/// the raw text for anything else
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%Y-%m-%d %H:%M:%S";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(DISPLAY).to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format(DISPLAY).to_string();
    }
    raw.to_string()
}

fn field(value: &str) -> &str {
    if value.is_empty() { "(empty)" } else { value }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

fn render_table<const N: usize>(headers: &[&str; N], rows: &[[String; N]]) -> String {
    let mut widths = (*headers).map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let line = |out: &mut String, cells: Vec<&str>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        let _ = writeln!(out, "  {}", padded.join("  ").trim_end());
    };

    line(&mut out, headers.to_vec());
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    line(&mut out, rule.iter().map(String::as_str).collect());
    for row in rows {
        line(&mut out, row.iter().map(String::as_str).collect());
    }
    out
}
