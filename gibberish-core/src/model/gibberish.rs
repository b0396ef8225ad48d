use std::iter::FusedIterator;

use rand::Rng;

use crate::error::ModelError;
use super::context_window::ContextWindow;
use super::markov_model::MarkovModel;
use super::sampling::SamplingStrategy;
use super::Token;

/// Lazy, infinite stream of words sampled from a trained `MarkovModel`.
///
/// # Behavior
/// - Yields every prehistory word, in order.
/// - Then, on each call, samples the next word from the rolling context,
///   appends it to the context and yields it. The context starts as the
///   whole prehistory and drops its oldest word after each append once it
///   holds more than `model.context_len()` words.
/// - Yields `Err(ModelError::MissingContext)` once if the rolling context
///   was never witnessed, and `None` forever after.
///
/// The stream never ends on its own; bound it with `take`.
pub struct Gibberish<'m, R> {
	model: &'m MarkovModel,
	rng: R,
	strategy: SamplingStrategy,
	prehistory: std::vec::IntoIter<Token>,
	context: ContextWindow,
	failed: bool,
}

impl<'m, R: Rng> Gibberish<'m, R> {
	pub fn new<I, T>(model: &'m MarkovModel, prehistory: I, rng: R) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Into<Token>,
	{
		let prehistory: Vec<Token> = prehistory.into_iter().map(Into::into).collect();
		let context = ContextWindow::seeded(model.context_len(), prehistory.iter().cloned());

		Self {
			model,
			rng,
			strategy: model.strategy(),
			prehistory: prehistory.into_iter(),
			context,
			failed: false,
		}
	}

	/// Overrides the model's default sampling strategy for this stream.
	pub fn with_strategy(mut self, strategy: SamplingStrategy) -> Self {
		self.strategy = strategy;
		self
	}
}

impl<R: Rng> Iterator for Gibberish<'_, R> {
	type Item = Result<Token, ModelError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.failed {
			return None;
		}
		if let Some(token) = self.prehistory.next() {
			return Some(Ok(token));
		}

		let context = self.context.contents();
		match self.model.sample_with(context, self.strategy, &mut self.rng) {
			Ok(token) => {
				let token = token.clone();
				self.context.push(token.clone());
				Some(Ok(token))
			}
			Err(e) => {
				self.failed = true;
				Some(Err(e))
			}
		}
	}
}

impl<R: Rng> FusedIterator for Gibberish<'_, R> {}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn trained(order: usize, text: &str) -> MarkovModel {
		let mut model = MarkovModel::new(order).unwrap();
		model.witness_all(text.split(' '));
		model
	}

	#[test]
	fn emits_prehistory_first() {
		let model = trained(3, "a b c a b c a b c");
		let rng = StdRng::seed_from_u64(5);
		let head: Vec<Token> =
			model.gibberish(["a", "b"], rng).take(5).collect::<Result<_, _>>().unwrap();
		assert_eq!(head, vec!["a", "b", "c", "a", "b"]);
	}

	#[test]
	fn first_sample_comes_from_prehistory_context() {
		let model = trained(2, "the cat sat on the mat the cat ran");
		for seed in 0..100 {
			let mut stream = model.gibberish(["the"], StdRng::seed_from_u64(seed));
			assert_eq!(stream.next(), Some(Ok("the".to_owned())));
			let word = stream.next().unwrap().unwrap();
			assert!(word == "cat" || word == "mat", "{word}");
		}
	}

	#[test]
	fn same_seed_reproduces_stream() {
		let model = trained(2, "a b a c a b b a c c a b a");
		let run = |seed| -> Vec<Token> {
			model
				.gibberish(["a"], StdRng::seed_from_u64(seed))
				.take(50)
				.collect::<Result<_, _>>()
				.unwrap()
		};
		assert_eq!(run(9), run(9));
	}

	#[test]
	fn unknown_context_fails_then_stops() {
		let model = trained(2, "x y z");
		let mut stream = model.gibberish(["y"], StdRng::seed_from_u64(0));
		assert_eq!(stream.next(), Some(Ok("y".to_owned())));
		assert_eq!(stream.next(), Some(Ok("z".to_owned())));
		assert_eq!(stream.next(), Some(Err(ModelError::MissingContext(vec!["z".to_owned()]))));
		assert_eq!(stream.next(), None);
	}

	#[test]
	fn prehistory_not_in_corpus_fails() {
		let model = trained(2, "x y z");
		let mut stream = model.gibberish(["w"], StdRng::seed_from_u64(0)).skip(1);
		assert!(matches!(stream.next(), Some(Err(ModelError::MissingContext(_)))));
	}

	#[test]
	fn long_prehistory_is_a_missing_context() {
		let model = trained(2, "a b a b a b");
		let mut stream = model.gibberish(["q", "r", "a"], StdRng::seed_from_u64(1));
		for word in ["q", "r", "a"] {
			assert_eq!(stream.next(), Some(Ok(word.to_owned())));
		}
		let context = vec!["q".to_owned(), "r".to_owned(), "a".to_owned()];
		assert_eq!(stream.next(), Some(Err(ModelError::MissingContext(context))));
		assert_eq!(stream.next(), None);
	}

	#[test]
	fn order_one_rejects_non_empty_prehistory() {
		let model = trained(1, "a b a");
		let mut stream = model.gibberish(["a"], StdRng::seed_from_u64(1));
		assert_eq!(stream.next(), Some(Ok("a".to_owned())));
		assert_eq!(stream.next(), Some(Err(ModelError::MissingContext(vec!["a".to_owned()]))));

		let words: Vec<Token> = model
			.gibberish(Vec::<Token>::new(), StdRng::seed_from_u64(1))
			.take(4)
			.collect::<Result<_, _>>()
			.unwrap();
		assert!(words.iter().all(|word| word == "a" || word == "b"), "{words:?}");
	}

	#[test]
	fn empty_model_fails_immediately() {
		let model = MarkovModel::new(2).unwrap();
		let mut stream = model.gibberish(Vec::<Token>::new(), StdRng::seed_from_u64(0));
		assert!(matches!(stream.next(), Some(Err(ModelError::MissingContext(_)))));
	}
}
