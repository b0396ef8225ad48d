use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::ParseStrategyError;
use super::sampling::SamplingStrategy;
use super::Token;

/// Default number of words generated after the prehistory.
pub const DEFAULT_COUNT: usize = 100;

/// Input parameters for a bounded generation (`MarkovModel::generate`).
///
/// # Responsibilities
/// - Track how many words to sample (`count`)
/// - Track the optional random seed, starting prehistory and strategy
///
/// Unset optional fields fall back to the model: a random stored context
/// as prehistory, the model's default strategy, and an OS-seeded RNG.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationInput {
	/// Number of words sampled after the prehistory.
	pub count: usize,

	/// Seed for a reproducible stream.
	pub seed: Option<u64>,

	/// Starting words, normally `order - 1` of them.
	pub prehistory: Option<Vec<Token>>,

	/// Sampling strategy override.
	pub strategy: Option<SamplingStrategy>,
}

impl Default for GenerationInput {
	fn default() -> Self {
		Self { count: DEFAULT_COUNT, seed: None, prehistory: None, strategy: None }
	}
}

impl GenerationInput {
	/// Sets the prehistory from whitespace-separated text.
	///
	/// Blank text clears the prehistory.
	pub fn set_prehistory(&mut self, text: &str) {
		let words: Vec<Token> = text.split_whitespace().map(str::to_owned).collect();
		self.prehistory = if words.is_empty() { None } else { Some(words) };
	}

	/// Sets the strategy from its name (`skewed` or `proportional`).
	///
	/// # Errors
	/// Returns an error if the name is unknown; the current strategy is kept.
	pub fn set_strategy(&mut self, name: &str) -> Result<(), ParseStrategyError> {
		self.strategy = Some(name.parse()?);
		Ok(())
	}

	/// Builds the random source for one generation.
	pub(crate) fn rng(&self) -> StdRng {
		match self.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		}
	}
}
