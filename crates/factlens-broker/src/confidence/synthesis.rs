use std::cmp::Ordering;

use factlens_signals::{MlLabel, MlPrediction};
use serde::{Deserialize, Serialize};

use super::tally::EvidenceTally;

/// Consensus confidence in percentage points: 70 plus 10 per agreeing
/// fact-checker, capped at 95. Consensus is never treated as certainty.
const CONSENSUS_BASE_PCT: usize = 70;
const CONSENSUS_STEP_PCT: usize = 10;
const CONSENSUS_CAP_PCT: usize = 95;

const MIXED_TRUST_THRESHOLD: f64 = 0.80;
const MIXED_DISCOUNT: f64 = 0.85;
const MIXED_UNCERTAIN_CONFIDENCE: f64 = 0.5;
const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.85;
const MODERATE_CONFIDENCE_THRESHOLD: f64 = 0.65;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VerdictLabel {
    Fake,
    Real,
    Uncertain,
}

impl From<MlLabel> for VerdictLabel {
    fn from(value: MlLabel) -> Self {
        match value {
            MlLabel::Fake => VerdictLabel::Fake,
            MlLabel::Real => VerdictLabel::Real,
        }
    }
}

impl std::fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            VerdictLabel::Fake => "FAKE",
            VerdictLabel::Real => "REAL",
            VerdictLabel::Uncertain => "UNCERTAIN",
        };
        write!(f, "{label}")
    }
}

/// The branch of the cascade that produced a verdict, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictRule {
    /// More fact-checkers rated the claim false than true.
    FactCheckFalse,
    /// More fact-checkers rated the claim true than false.
    FactCheckTrue,
    /// Fact-checkers tied; the classifier is confident enough to decide.
    MixedModelFallback,
    /// Fact-checkers tied and the classifier is not confident.
    MixedUncertain,
    ModelHighConfidence,
    ModelModerateConfidence,
    Inconclusive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub label: VerdictLabel,
    pub confidence: f64,
    pub reasoning: String,
    pub rule: VerdictRule,
}

/// Reconciles the classifier's prediction with the fact-check tally.
///
/// `has_evidence` is whether any evidence was retrieved at all, not whether the
/// tally is non-zero: a list of only undetermined ratings still goes through the
/// tie rules, never the model-only ones.
pub fn synthesize(ml: &MlPrediction, tally: EvidenceTally, has_evidence: bool) -> Verdict {
    let rule = select_rule(ml.confidence(), tally, has_evidence);
    let verdict = render(rule, ml, tally);

    tracing::debug!(
        target: "factlens_broker",
        ml_label = %ml.label(),
        ml_confidence = ml.confidence(),
        false_count = tally.false_count,
        true_count = tally.true_count,
        has_evidence,
        rule = ?rule,
        verdict = %verdict.label,
        confidence = verdict.confidence,
        "verdict synthesized"
    );
    verdict
}

fn select_rule(ml_confidence: f64, tally: EvidenceTally, has_evidence: bool) -> VerdictRule {
    if has_evidence {
        // Greater/Less imply the winning side is non-zero.
        match tally.false_count.cmp(&tally.true_count) {
            Ordering::Greater => VerdictRule::FactCheckFalse,
            Ordering::Less => VerdictRule::FactCheckTrue,
            Ordering::Equal if ml_confidence > MIXED_TRUST_THRESHOLD => {
                VerdictRule::MixedModelFallback
            }
            Ordering::Equal => VerdictRule::MixedUncertain,
        }
    } else if ml_confidence > HIGH_CONFIDENCE_THRESHOLD {
        VerdictRule::ModelHighConfidence
    } else if ml_confidence > MODERATE_CONFIDENCE_THRESHOLD {
        VerdictRule::ModelModerateConfidence
    } else {
        VerdictRule::Inconclusive
    }
}

fn render(rule: VerdictRule, ml: &MlPrediction, tally: EvidenceTally) -> Verdict {
    let ml_label = ml.label();
    let ml_confidence = ml.confidence();
    let (label, confidence, reasoning) = match rule {
        VerdictRule::FactCheckFalse => (
            VerdictLabel::Fake,
            consensus_confidence(tally.false_count),
            format!(
                "Professional fact-checkers found this claim to be false. \
                 {} fact-checker(s) rated it as false or misleading.",
                tally.false_count
            ),
        ),
        VerdictRule::FactCheckTrue => (
            VerdictLabel::Real,
            consensus_confidence(tally.true_count),
            format!(
                "Professional fact-checkers verified this claim as true. \
                 {} fact-checker(s) confirmed its accuracy.",
                tally.true_count
            ),
        ),
        VerdictRule::MixedModelFallback => (
            VerdictLabel::from(ml_label),
            ml_confidence * MIXED_DISCOUNT,
            format!(
                "Fact-checkers provided mixed signals. Our AI model predicts \
                 this is {ml_label} with {} confidence.",
                percent(ml_confidence)
            ),
        ),
        VerdictRule::MixedUncertain => (
            VerdictLabel::Uncertain,
            MIXED_UNCERTAIN_CONFIDENCE,
            "Fact-checkers provided conflicting assessments, and our AI \
             model is not highly confident. More investigation needed."
                .to_string(),
        ),
        VerdictRule::ModelHighConfidence => (
            VerdictLabel::from(ml_label),
            ml_confidence,
            format!(
                "No fact-checks found. Our AI model predicts this is {ml_label} \
                 with high confidence ({}).",
                percent(ml_confidence)
            ),
        ),
        VerdictRule::ModelModerateConfidence => (
            VerdictLabel::from(ml_label),
            ml_confidence,
            format!(
                "No fact-checks found. Our AI model suggests this is likely \
                 {ml_label} ({} confidence).",
                percent(ml_confidence)
            ),
        ),
        VerdictRule::Inconclusive => (
            VerdictLabel::Uncertain,
            ml_confidence,
            format!(
                "No definitive fact-checks found, and our AI model has moderate \
                 confidence ({}). This claim requires more context \
                 or investigation.",
                percent(ml_confidence)
            ),
        ),
    };

    Verdict {
        label,
        confidence,
        reasoning,
        rule,
    }
}

fn consensus_confidence(agreeing: usize) -> f64 {
    let pct = agreeing
        .saturating_mul(CONSENSUS_STEP_PCT)
        .saturating_add(CONSENSUS_BASE_PCT)
        .min(CONSENSUS_CAP_PCT);
    pct as f64 / 100.0
}

fn percent(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}
