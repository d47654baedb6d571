use async_trait::async_trait;

use crate::{Classifier, MlPrediction};

/// Returns the same prediction for every text.
#[derive(Debug, Clone, Copy)]
pub struct FixedClassifier {
    prediction: MlPrediction,
}

impl FixedClassifier {
    pub fn new(prediction: MlPrediction) -> Self {
        Self { prediction }
    }
}

#[async_trait]
impl Classifier for FixedClassifier {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn predict(&self, text: &str) -> anyhow::Result<MlPrediction> {
        tracing::debug!(
            target: "factlens_signals",
            text_len = text.len(),
            label = %self.prediction.label(),
            "fixed classifier prediction"
        );
        Ok(self.prediction)
    }
}
