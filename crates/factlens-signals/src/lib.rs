pub mod classifier;
pub mod evidence;
pub mod prediction;
pub mod traits;

pub use classifier::FixedClassifier;
pub use evidence::FactCheckEvidence;
pub use prediction::{ClassProbabilities, MlLabel, MlPrediction};
pub use traits::{Classifier, FactCheckSource};
