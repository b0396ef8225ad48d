use std::io;

use thiserror::Error;

use crate::model::Token;

/// Errors raised by the Markov model and its generation driver.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
	/// Sampling was attempted with a context that was never witnessed.
	#[error("context [{}] was never witnessed", .0.join(" "))]
	MissingContext(Vec<Token>),

	/// The model order must be at least 1.
	#[error("model order must be >= 1, got {0}")]
	InvalidOrder(usize),
}

/// Errors raised while reading a corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
	#[error("failed to read corpus: {0}")]
	Io(#[from] io::Error),
}

/// A sampling strategy name that does not match any known strategy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown sampling strategy '{0}', expected 'skewed' or 'proportional'")]
pub struct ParseStrategyError(pub String);
