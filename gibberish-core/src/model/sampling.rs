use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ParseStrategyError;

/// Strategy used to draw one candidate from a weighted distribution.
///
/// # Variants
/// - `Skewed`: draws `x = total * (1 - r^(1/m))` for `m` candidates and walks
///   the candidates in order. Favors candidates seen first in the corpus.
/// - `Proportional`: draws `x` uniformly in `[0, total)`, so each candidate
///   is chosen proportionally to its count.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SamplingStrategy {
	#[default]
	Skewed,
	Proportional,
}

impl SamplingStrategy {
	/// Picks an index into `weights`.
	///
	/// `weights` must be non-empty and every weight strictly positive.
	/// Returns the last index if floating-point rounding walks past the end.
	pub(crate) fn pick<R: Rng + ?Sized>(self, weights: &[usize], rng: &mut R) -> usize {
		debug_assert!(!weights.is_empty());
		let last = weights.len() - 1;

		match self {
			SamplingStrategy::Skewed => {
				let total: usize = weights.iter().sum();
				let r: f64 = rng.random();
				let mut x = total as f64 * (1.0 - r.powf(1.0 / weights.len() as f64));

				for (i, weight) in weights.iter().enumerate() {
					let weight = *weight as f64;
					if x <= weight {
						return i;
					}
					x -= weight;
				}
				last
			}
			SamplingStrategy::Proportional => {
				let total: usize = weights.iter().sum();
				let mut x = rng.random_range(0..total);

				for (i, weight) in weights.iter().enumerate() {
					if x < *weight {
						return i;
					}
					x -= weight;
				}
				last
			}
		}
	}
}

impl FromStr for SamplingStrategy {
	type Err = ParseStrategyError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"skewed" => Ok(SamplingStrategy::Skewed),
			"proportional" => Ok(SamplingStrategy::Proportional),
			_ => Err(ParseStrategyError(s.to_owned())),
		}
	}
}

impl fmt::Display for SamplingStrategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SamplingStrategy::Skewed => f.write_str("skewed"),
			SamplingStrategy::Proportional => f.write_str("proportional"),
		}
	}
}
