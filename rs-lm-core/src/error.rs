//! Error types for model training and finalization.

/// Errors that can occur while building a language model.
///
/// Generation deliberately has no error variant: a model that cannot
/// continue from the current window returns the text accumulated so far,
/// which is a normal (possibly shorter than requested) result.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
	/// The corpus ended before a single window could be formed.
	#[error("corpus shorter than the window: needed at least {needed} characters, got {got}")]
	InsufficientCorpus { needed: usize, got: usize },

	/// Probability calculation was invoked on a distribution with no
	/// observations. Unreachable through `train`, kept as a guard.
	#[error("cannot compute probabilities for an empty distribution")]
	EmptyDistribution,
}

pub type Result<T> = std::result::Result<T, ModelError>;
