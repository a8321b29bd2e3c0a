// crates/goneat-cli/src/output.rs
// ============================================================================
// Module: Output Helpers
// Description: Writes to stdout/stderr through explicit `Write` handles, and
//              renders an `AssessmentReport` in each `--format` (§6).
// Purpose: Keep every line of process output funneled through one place,
//          consistent with denying `println!`/`eprintln!` in non-test code.
// Dependencies: goneat-core, serde_json
// ============================================================================

//! ## Overview
//! [`write_stdout_line`]/[`write_stderr_line`] are the only two functions in
//! this crate allowed to touch `std::io::{stdout, stderr}` directly; every
//! command routes its output through them (or through [`emit_error`] for the
//! final failure path). The report body always goes to stdout; diagnostics
//! always go to stderr (§4.7) — the two streams are never interleaved.

use std::io::Write as _;
use std::process::ExitCode;

use goneat_core::AssessmentReport;
use goneat_core::Severity;

use crate::cli::ReportFormat;

/// Writes a single line to stdout.
///
/// # Errors
///
/// Returns the underlying [`std::io::Error`] if the write fails.
pub fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut handle = std::io::stdout();
    writeln!(handle, "{message}")
}

/// Writes a single line to stderr.
///
/// # Errors
///
/// Returns the underlying [`std::io::Error`] if the write fails.
pub fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut handle = std::io::stderr();
    writeln!(handle, "{message}")
}

/// Emits `message` to stderr and returns the process failure exit code.
pub fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}

/// Renders `report` in the requested format.
///
/// # Errors
///
/// Returns an error string when `--format json` fails to serialize (should
/// not happen for a report built from this crate's own types).
pub fn render_report(report: &AssessmentReport, format: ReportFormat) -> Result<String, String> {
    match format {
        ReportFormat::Json => serde_json::to_string_pretty(report).map_err(|err| err.to_string()),
        ReportFormat::Text => Ok(render_text(report)),
        ReportFormat::Concise => Ok(render_concise(report)),
        ReportFormat::Markdown => Ok(render_markdown(report)),
        ReportFormat::Html => Ok(render_html(report)),
    }
}

/// Full per-issue text rendering, one section per category.
fn render_text(report: &AssessmentReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("goneat assessment of {}\n", report.target));
    out.push_str(&format!("mode: {}\n\n", report.mode.as_str()));
    for (category, result) in &report.categories {
        out.push_str(&format!(
            "== {} ({}) — {} issue(s), {}\n",
            category.as_str(),
            result.command_name,
            result.issue_count,
            if result.success { "ok" } else { "failed" },
        ));
        if let Some(error) = &result.error_message {
            out.push_str(&format!("  error: {error}\n"));
        }
        for issue in &result.issues {
            out.push_str(&format!(
                "  [{}] {}{}: {}\n",
                issue.severity.as_str(),
                issue.file,
                if issue.line > 0 { format!(":{}", issue.line) } else { String::new() },
                issue.message,
            ));
        }
    }
    if !report.failed_runners.is_empty() {
        out.push_str("\nfailed runners:\n");
        for failure in &report.failed_runners {
            out.push_str(&format!("  {}: {}\n", failure.category.as_str(), failure.error));
        }
    }
    out.push_str(&format!(
        "\ntotal issues: {} (wall time {})\n",
        report.metrics.total_issues,
        goneat_core::time::format_duration_go_style(report.metrics.wall_time),
    ));
    out
}

/// One line per category: name, issue count, worst severity.
fn render_concise(report: &AssessmentReport) -> String {
    let mut out = String::new();
    for (category, result) in &report.categories {
        let worst = result.max_severity().map_or_else(|| "-".to_string(), |severity: Severity| severity.as_str().to_string());
        out.push_str(&format!(
            "{}: {} issue(s), worst={}, {}\n",
            category.as_str(),
            result.issue_count,
            worst,
            if result.success { "ok" } else { "failed" },
        ));
    }
    out
}

/// Markdown table summary, suitable for a PR comment.
fn render_markdown(report: &AssessmentReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("# goneat assessment of `{}`\n\n", report.target));
    out.push_str("| category | issues | status |\n|---|---|---|\n");
    for (category, result) in &report.categories {
        out.push_str(&format!(
            "| {} | {} | {} |\n",
            category.as_str(),
            result.issue_count,
            if result.success { "ok" } else { "failed" },
        ));
    }
    out.push_str(&format!("\nTotal issues: **{}**\n", report.metrics.total_issues));
    out
}

/// Minimal HTML wrapper around the markdown table's data.
fn render_html(report: &AssessmentReport) -> String {
    let mut out = String::new();
    out.push_str("<html><body>\n");
    out.push_str(&format!("<h1>goneat assessment of {}</h1>\n", report.target));
    out.push_str("<table><tr><th>category</th><th>issues</th><th>status</th></tr>\n");
    for (category, result) in &report.categories {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            category.as_str(),
            result.issue_count,
            if result.success { "ok" } else { "failed" },
        ));
    }
    out.push_str("</table>\n</body></html>\n");
    out
}
