//! Agentflow Classifier
//!
//! Maps a user's free-text instruction to a task [`Category`].
//!
//! The [`Classifier`] trait is the seam the orchestrator depends on. The
//! shipped implementation, [`KeywordClassifier`], is a case-sensitive
//! keyword matcher; a model-backed classifier can replace it without
//! touching the orchestrator.

mod category;
mod keyword;

pub use category::Category;
pub use keyword::{DEFAULT_CONFIDENCE, KeywordClassifier, KeywordRule};

/// Outcome of classifying one instruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
  pub category: Category,
  /// Confidence reported alongside the intent, in `0.0..=1.0`.
  pub confidence: f64,
}

/// Classifies free text into a task category.
///
/// Implementations must be pure and total: the same text always yields the
/// same classification, and every input yields one.
pub trait Classifier: Send + Sync {
  fn classify(&self, text: &str) -> Classification;
}

/// Classify `text` with the default keyword rules.
pub fn classify(text: &str) -> Category {
  KeywordClassifier::default().classify(text).category
}
