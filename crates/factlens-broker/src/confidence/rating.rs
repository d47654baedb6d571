use serde::{Deserialize, Serialize};

const FALSE_MARKERS: &[&str] = &["false", "pants on fire", "mostly false"];
const TRUE_MARKERS: &[&str] = &["true", "mostly true", "correct"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RatingBucket {
    False,
    True,
    Undetermined,
}

/// Buckets a fact-checker's free-text rating by case-insensitive substring match.
///
/// The false markers are checked first, so a rating containing both a true and a
/// false marker ("True to false", "not true, false") buckets as `False`. Ports
/// must keep this order to agree on such ratings.
pub fn classify(rating: &str) -> RatingBucket {
    let rating = rating.to_lowercase();
    if FALSE_MARKERS.iter().any(|marker| rating.contains(marker)) {
        RatingBucket::False
    } else if TRUE_MARKERS.iter().any(|marker| rating.contains(marker)) {
        RatingBucket::True
    } else {
        RatingBucket::Undetermined
    }
}
