use std::fmt::Write as _;

use factlens_broker::{AnalysisReport, EvidenceTally, Verdict, VerdictLabel, VerdictRule};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SynthesisOutput<'a> {
    pub verdict: VerdictLabel,
    pub confidence: f64,
    pub reasoning: &'a str,
    pub rule: VerdictRule,
    pub false_count: usize,
    pub true_count: usize,
}

impl<'a> SynthesisOutput<'a> {
    pub fn new(verdict: &'a Verdict, tally: EvidenceTally) -> Self {
        Self {
            verdict: verdict.label,
            confidence: verdict.confidence,
            reasoning: &verdict.reasoning,
            rule: verdict.rule,
            false_count: tally.false_count,
            true_count: tally.true_count,
        }
    }
}

/// One line of `batch` output; exactly one of `report` and `error` is set.
#[derive(Debug, Serialize)]
pub struct BatchLine {
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<AnalysisReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchLine {
    pub fn ok(line: usize, report: AnalysisReport) -> Self {
        Self {
            line,
            report: Some(report),
            error: None,
        }
    }

    pub fn failed(line: usize, error: impl Into<String>) -> Self {
        Self {
            line,
            report: None,
            error: Some(error.into()),
        }
    }
}

pub fn render_text(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Verdict:     {} ({:.0}% confidence)",
        report.verdict,
        report.confidence * 100.0
    );
    let _ = writeln!(out, "Reasoning:   {}", report.reasoning);
    let _ = writeln!(
        out,
        "Model:       {} ({:.0}%)",
        report.ml_prediction,
        report.ml_confidence * 100.0
    );
    let _ = writeln!(out, "Fact-checks: {}", report.fact_checks.len());
    for check in &report.fact_checks {
        let _ = write!(out, "  - [{}] {}: {}", check.rating, check.source, check.claim);
        if let Some(url) = &check.url {
            let _ = write!(out, " <{url}>");
        }
        out.push('\n');
    }
    let _ = writeln!(out, "Processing:  {:.0} ms", report.processing_time_ms);
    out
}
