use factlens_signals::FactCheckEvidence;
use serde::{Deserialize, Serialize};

use super::rating::{classify, RatingBucket};

/// False vs true ratings across one request's evidence. Undetermined ratings
/// count towards neither side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceTally {
    pub false_count: usize,
    pub true_count: usize,
}

impl EvidenceTally {
    pub fn new(false_count: usize, true_count: usize) -> Self {
        Self {
            false_count,
            true_count,
        }
    }
}

pub fn tally(evidence: &[FactCheckEvidence]) -> EvidenceTally {
    evidence
        .iter()
        .fold(EvidenceTally::default(), |mut counts, item| {
            match classify(&item.rating) {
                RatingBucket::False => counts.false_count += 1,
                RatingBucket::True => counts.true_count += 1,
                RatingBucket::Undetermined => {}
            }
            counts
        })
}
