use std::time::Duration;

use factlens_signals::{FactCheckEvidence, MlLabel, MlPrediction};
use serde::{Deserialize, Serialize};

use crate::confidence::{Verdict, VerdictLabel};

/// Everything one analysis produced. Built once by the analyzer, then only read.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub ml: MlPrediction,
    pub evidence: Vec<FactCheckEvidence>,
    pub verdict: Verdict,
    pub elapsed: Duration,
}

impl AnalysisResult {
    pub fn report(&self) -> AnalysisReport {
        AnalysisReport::from(self)
    }
}

/// Flat record handed to whatever surface presents the result. Field names are
/// a stable contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub verdict: VerdictLabel,
    pub confidence: f64,
    pub ml_prediction: MlLabel,
    pub ml_confidence: f64,
    pub fact_checks: Vec<FactCheckEvidence>,
    pub reasoning: String,
    pub processing_time_ms: f64,
}

impl From<&AnalysisResult> for AnalysisReport {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            verdict: result.verdict.label,
            confidence: result.verdict.confidence,
            ml_prediction: result.ml.label(),
            ml_confidence: result.ml.confidence(),
            fact_checks: result.evidence.clone(),
            reasoning: result.verdict.reasoning.clone(),
            processing_time_ms: result.elapsed.as_secs_f64() * 1000.0,
        }
    }
}
