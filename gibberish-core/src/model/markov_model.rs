use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use log::debug;
use rand::Rng;
use rand::seq::IteratorRandom;
use serde::Serialize;

use crate::error::ModelError;
use super::context_window::ContextWindow;
use super::generation_input::GenerationInput;
use super::gibberish::Gibberish;
use super::sampling::SamplingStrategy;
use super::state::State;
use super::Token;

/// A k-th order Markov model of word transitions.
///
/// The order `k` is the full span of the training window, including the
/// predicted word: stored contexts are `k - 1` words long.
///
/// # Responsibilities
/// - Accumulate context → next-word counts while witnessing a corpus
/// - Sample the next word for a known context
/// - Seed and drive lazy generation
///
/// # Invariants
/// - `order >= 1`
/// - Every stored context has exactly `context_len()` tokens
/// - Every stored count is strictly positive
#[derive(Clone, Debug)]
pub struct MarkovModel {
	/// Window span, including the predicted word
	order: usize,

	/// Number of witnessed transitions
	witnessed: usize,

	/// Mapping from a context to the words that followed it
	states: BTreeMap<Vec<Token>, State>,

	/// Training window (capacity `order`)
	window: ContextWindow,

	/// Default draw used by `sample` and new generations
	strategy: SamplingStrategy,
}

/// Summary of a trained model.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ModelStats {
	pub order: usize,
	pub context_len: usize,
	pub witnessed: usize,
	pub contexts: usize,
}

impl MarkovModel {
	/// Creates an empty model of order `order`.
	///
	/// # Errors
	/// Returns `ModelError::InvalidOrder` if `order < 1`.
	pub fn new(order: usize) -> Result<Self, ModelError> {
		if order < 1 {
			return Err(ModelError::InvalidOrder(order));
		}
		Ok(Self {
			order,
			witnessed: 0,
			states: BTreeMap::new(),
			window: ContextWindow::new(order),
			strategy: SamplingStrategy::default(),
		})
	}

	/// Sets the default sampling strategy.
	pub fn with_strategy(mut self, strategy: SamplingStrategy) -> Self {
		self.strategy = strategy;
		self
	}

	/// Records one word of the training corpus.
	///
	/// The first `order` words only fill the window. Every later word is
	/// counted against the `order - 1` words preceding it.
	pub fn witness(&mut self, token: impl Into<Token>) {
		let token = token.into();
		if !self.window.is_full() {
			self.window.push(token);
			return;
		}

		// The oldest word is not part of the key
		self.window.pop_oldest();
		let key = self.window.to_context();
		self.states.entry(key).or_default().add_transition(token.clone());
		self.witnessed += 1;
		self.window.push(token);
	}

	/// Witnesses every token of `tokens` in order.
	pub fn witness_all<I, T>(&mut self, tokens: I)
	where
		I: IntoIterator<Item = T>,
		T: Into<Token>,
	{
		for token in tokens {
			self.witness(token);
		}
	}

	/// Samples the word following `context` with the default strategy.
	///
	/// # Errors
	/// Returns `ModelError::MissingContext` if `context` was never witnessed.
	pub fn sample<R: Rng + ?Sized>(
		&self,
		context: &[Token],
		rng: &mut R,
	) -> Result<&Token, ModelError> {
		self.sample_with(context, self.strategy, rng)
	}

	/// Samples the word following `context` with an explicit strategy.
	pub fn sample_with<R: Rng + ?Sized>(
		&self,
		context: &[Token],
		strategy: SamplingStrategy,
		rng: &mut R,
	) -> Result<&Token, ModelError> {
		self.states
			.get(context)
			.and_then(|state| state.predict(strategy, rng))
			.ok_or_else(|| ModelError::MissingContext(context.to_vec()))
	}

	/// Returns a lazy, infinite stream starting with `prehistory`.
	///
	/// See `Gibberish` for the exact emission order.
	pub fn gibberish<I, T, R>(&self, prehistory: I, rng: R) -> Gibberish<'_, R>
	where
		I: IntoIterator<Item = T>,
		T: Into<Token>,
		R: Rng,
	{
		Gibberish::new(self, prehistory, rng)
	}

	/// Generates the prehistory followed by `input.count` sampled words.
	///
	/// # Behavior
	/// - Uses `input.prehistory` if set, otherwise a random stored context.
	/// - Uses `input.strategy` if set, otherwise the model default.
	/// - Seeds the random source from `input.seed` if set.
	///
	/// # Errors
	/// Returns `ModelError::MissingContext` as soon as a rolling context is
	/// unknown, or with an empty context if the model was never trained.
	pub fn generate(&self, input: &GenerationInput) -> Result<Vec<Token>, ModelError> {
		let mut rng = input.rng();
		let prehistory = match &input.prehistory {
			Some(prehistory) => prehistory.clone(),
			None => self
				.random_prehistory(&mut rng)
				.ok_or_else(|| ModelError::MissingContext(Vec::new()))?,
		};
		let strategy = input.strategy.unwrap_or(self.strategy);
		let total = prehistory.len().saturating_add(input.count);

		debug!(
			"Generating {} words ({} strategy) from [{}]",
			input.count,
			strategy,
			prehistory.join(" ")
		);

		self.gibberish(prehistory, rng)
			.with_strategy(strategy)
			.take(total)
			.collect()
	}

	/// Returns a uniformly chosen stored context.
	///
	/// Returns `None` if the model is empty.
	pub fn random_prehistory<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Vec<Token>> {
		self.states.keys().choose(rng).cloned()
	}

	/// Returns the `word => count` map recorded after `context`,
	/// in first-witnessed order.
	pub fn distribution(&self, context: &[Token]) -> Option<&IndexMap<Token, usize>> {
		self.states.get(context).map(State::transitions)
	}

	/// Iterates over stored contexts in sorted order.
	pub fn contexts(&self) -> impl Iterator<Item = &[Token]> {
		self.states.keys().map(Vec::as_slice)
	}

	pub fn order(&self) -> usize {
		self.order
	}

	/// Length of every stored context (`order - 1`).
	pub fn context_len(&self) -> usize {
		self.order - 1
	}

	/// Total number of witnessed transitions.
	pub fn witnessed(&self) -> usize {
		self.witnessed
	}

	pub fn context_count(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	pub fn strategy(&self) -> SamplingStrategy {
		self.strategy
	}

	pub fn stats(&self) -> ModelStats {
		ModelStats {
			order: self.order,
			context_len: self.context_len(),
			witnessed: self.witnessed,
			contexts: self.states.len(),
		}
	}
}

/// Dumps the frequency table, one context per line:
/// `[the] -> mat:1 cat:1 (2)`
impl fmt::Display for MarkovModel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (context, state) in &self.states {
			write!(f, "[{}] ->", context.join(" "))?;
			for (token, count) in state.transitions() {
				write!(f, " {token}:{count}")?;
			}
			writeln!(f, " ({})", state.total())?;
		}
		Ok(())
	}
}
