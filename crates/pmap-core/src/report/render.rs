//! Human-readable `summary.md` for runs that ended without a document.
//!
//! Renders from the report contract only, so a summary can be produced
//! from any `mapper_report.json` on disk, including older or partial ones.

use serde::Deserialize;

use crate::report::model::Report;

/// Body written when no report could be found.
pub const MISSING_REPORT_SUMMARY: &str = "# Run failed\n\nNo mapper_report.json found.\n";

const DEFAULT_REASON: &str = "Request was denied.";

/// The subset of a report the summary reads. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryView {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub errors: Vec<SummaryError>,
    #[serde(default)]
    pub guardrails: Option<SummaryGuardrails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryError {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryGuardrails {
    #[serde(default)]
    pub applied: bool,
    #[serde(default)]
    pub policy: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl From<&Report> for SummaryView {
    fn from(report: &Report) -> Self {
        Self {
            status: Some(report.status.to_string()),
            errors: report
                .errors
                .iter()
                .map(|e| SummaryError {
                    message: Some(e.message.clone()),
                })
                .collect(),
            guardrails: report.guardrails.as_ref().map(|g| SummaryGuardrails {
                applied: g.applied,
                policy: Some(g.policy.to_string()),
                reason: Some(g.reason.clone()),
            }),
        }
    }
}

pub fn render_summary(view: &SummaryView) -> String {
    let mut out = String::new();
    out.push_str("# Run result\n\n");
    out.push_str(&format!(
        "**Status:** {}\n",
        view.status.as_deref().unwrap_or("unknown")
    ));

    if let Some(err) = view.errors.first() {
        let msg = err
            .message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_REASON);
        out.push_str("\n## Reason\n\n");
        out.push_str(msg);
        out.push('\n');
    }

    if let Some(g) = view.guardrails.as_ref().filter(|g| g.applied) {
        out.push_str("\n## Details\n\n");
        out.push_str(&format!(
            "- Policy: {}\n",
            g.policy.as_deref().unwrap_or("unknown")
        ));
        out.push_str(&format!(
            "- Reason: {}\n",
            g.reason.as_deref().unwrap_or("unknown")
        ));
    }

    out
}
