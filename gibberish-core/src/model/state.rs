use indexmap::IndexMap;
use rand::Rng;

use super::Token;
use super::sampling::SamplingStrategy;

/// Frequency distribution attached to one context of a Markov model.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges
/// are weighted by their number of observations.
///
/// ## Responsibilities:
/// - Accumulate transition occurrences during training
/// - Draw the next token using a `SamplingStrategy`
///
/// ## Invariants
/// - Each transition occurrence count is strictly positive
/// - Transitions keep the order in which they were first witnessed
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct State {
	/// Outgoing transitions in first-witnessed order.
	/// Example: { "cat" => 2, "mat" => 1 }
	transitions: IndexMap<Token, usize>,
}

impl State {
	/// Records an occurrence of a transition toward `next`.
	pub(crate) fn add_transition(&mut self, next: Token) {
		*self.transitions.entry(next).or_insert(0) += 1;
	}

	/// Draws the next token.
	///
	/// Returns `None` only if the state has no transitions, which cannot
	/// happen for a state created by training.
	pub(crate) fn predict<R: Rng + ?Sized>(
		&self,
		strategy: SamplingStrategy,
		rng: &mut R,
	) -> Option<&Token> {
		if self.transitions.is_empty() {
			return None;
		}

		let weights: Vec<usize> = self.transitions.values().copied().collect();
		let index = strategy.pick(&weights, rng);
		self.transitions.get_index(index).map(|(token, _)| token)
	}

	/// Transitions as `token => count`, in first-witnessed order.
	pub(crate) fn transitions(&self) -> &IndexMap<Token, usize> {
		&self.transitions
	}

	/// Sum of all transition counts.
	pub(crate) fn total(&self) -> usize {
		self.transitions.values().sum()
	}
}
