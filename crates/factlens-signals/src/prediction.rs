use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MlLabel {
    Fake,
    Real,
}

impl std::fmt::Display for MlLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MlLabel::Fake => "FAKE",
            MlLabel::Real => "REAL",
        };
        write!(f, "{label}")
    }
}

impl std::str::FromStr for MlLabel {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "FAKE" => Ok(MlLabel::Fake),
            "REAL" => Ok(MlLabel::Real),
            other => anyhow::bail!("unknown classifier label `{other}` (expected FAKE or REAL)"),
        }
    }
}

/// Class probabilities under the classifier's two-class softmax.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    #[serde(rename = "FAKE")]
    pub fake: f64,
    #[serde(rename = "REAL")]
    pub real: f64,
}

/// The classifier's verdict for one request.
///
/// `confidence` is the probability mass assigned to `label` and always lies in
/// `[0, 1]`; construction clamps out-of-range input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPrediction")]
pub struct MlPrediction {
    label: MlLabel,
    confidence: f64,
}

#[derive(Deserialize)]
struct RawPrediction {
    label: MlLabel,
    confidence: f64,
}

impl From<RawPrediction> for MlPrediction {
    fn from(raw: RawPrediction) -> Self {
        Self::new(raw.label, raw.confidence)
    }
}

impl MlPrediction {
    pub fn new(label: MlLabel, confidence: f64) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self { label, confidence }
    }

    /// Builds a prediction from raw `[fake, real]` logits.
    ///
    /// Index 0 is FAKE and index 1 is REAL. Equal logits resolve to FAKE.
    /// Returns `None` when either logit is not finite.
    pub fn from_logits(logits: [f64; 2]) -> Option<Self> {
        if !logits.iter().all(|value| value.is_finite()) {
            return None;
        }
        let max = logits[0].max(logits[1]);
        let fake = (logits[0] - max).exp();
        let real = (logits[1] - max).exp();
        let total = fake + real;
        Self::from_probabilities([fake / total, real / total])
    }

    /// Builds a prediction from `[fake, real]` probabilities.
    ///
    /// The pair is renormalised so the two classes sum to one.
    pub fn from_probabilities(probabilities: [f64; 2]) -> Option<Self> {
        let [fake, real] = probabilities;
        if !fake.is_finite() || !real.is_finite() || fake < 0.0 || real < 0.0 {
            return None;
        }
        // Scale by the larger class first so huge inputs cannot overflow the sum.
        let max = fake.max(real);
        if max <= 0.0 {
            return None;
        }
        let (fake, real) = (fake / max, real / max);
        let total = fake + real;
        let (fake, real) = (fake / total, real / total);
        if real > fake {
            Some(Self::new(MlLabel::Real, real))
        } else {
            Some(Self::new(MlLabel::Fake, fake))
        }
    }

    pub fn label(&self) -> MlLabel {
        self.label
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn probabilities(&self) -> ClassProbabilities {
        let other = 1.0 - self.confidence;
        match self.label {
            MlLabel::Fake => ClassProbabilities {
                fake: self.confidence,
                real: other,
            },
            MlLabel::Real => ClassProbabilities {
                fake: other,
                real: self.confidence,
            },
        }
    }
}
