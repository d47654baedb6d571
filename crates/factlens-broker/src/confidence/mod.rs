pub mod rating;
pub mod synthesis;
pub mod tally;

pub use rating::{classify, RatingBucket};
pub use synthesis::{synthesize, Verdict, VerdictLabel, VerdictRule};
pub use tally::{tally, EvidenceTally};
