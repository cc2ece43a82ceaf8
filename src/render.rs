//! Presentation helpers
//!
//! The narrative insight is opaque formatted text owned by the sessions;
//! only here, at render time, is its lightweight markup interpreted, and
//! only through a narrow whitelist: line breaks and `**bold**` spans.
//! Nothing else is transformed or sanitized away.

use crate::models::AnalysisResult;

/// Render an assistant message as HTML with the whitelisted transforms:
/// `\n` becomes `<br>`, balanced `**` pairs become `<strong>` spans. An
/// unbalanced trailing `**` is kept as literal text.
pub fn insight_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut parts = text.split("**");

    if let Some(first) = parts.next() {
        out.push_str(first);
    }
    loop {
        match (parts.next(), parts.next()) {
            (Some(bold), Some(after)) => {
                out.push_str("<strong>");
                out.push_str(bold);
                out.push_str("</strong>");
                out.push_str(after);
            }
            (Some(tail), None) => {
                out.push_str("**");
                out.push_str(tail);
                break;
            }
            (None, _) => break,
        }
    }

    out.replace('\n', "<br>")
}

/// Plain-text rendering for the terminal: bold markers stripped, line
/// breaks kept as-is.
pub fn insight_plain(text: &str) -> String {
    text.replace("**", "")
}

/// Dashboard summary of an analysis result, as display-ready lines.
pub fn dashboard_summary(result: &AnalysisResult) -> String {
    let mut out = String::new();

    out.push_str("=== Financial Overview ===\n");
    match result.goal_diff {
        Some(diff) => out.push_str(&format!(
            "Potential Savings: {} {:.2} ({:+.2} vs target)\n",
            result.currency, result.total_saved, diff
        )),
        None => out.push_str(&format!(
            "Potential Savings: {} {:.2}\n",
            result.currency, result.total_saved
        )),
    }
    out.push_str(&format!("Efficiency Score:  {}%\n", result.efficiency));
    out.push_str(&format!("Optimization Focus: {}\n", result.top_cat));

    if !result.chart_labels.is_empty() {
        out.push_str("\nSavings Distribution:\n");
        for (label, value) in result.chart_labels.iter().zip(&result.chart_data) {
            out.push_str(&format!("  {:<14} {:.2}\n", label, value));
        }
    }

    out
}
