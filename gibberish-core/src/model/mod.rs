//! Top-level module for the word-level Markov system.
//!
//! It includes:
//! - The bounded sliding window over recent words (`ContextWindow`)
//! - Per-context frequency distributions (`State`)
//! - The trainable model itself (`MarkovModel`)
//! - The lazy generation driver (`Gibberish`)
//! - Generation configuration (`GenerationInput`)

/// Bounded, ordered queue of the most recent tokens.
///
/// Used during training to key observations and during generation
/// as the rolling context.
pub mod context_window;

/// k-th order Markov model over words.
///
/// Handles training (`witness`), sampling (`sample`) and
/// seeding new generations from stored contexts.
pub mod markov_model;

/// Lazy, infinite token stream sampled from a trained model.
pub mod gibberish;

/// Generation parameters (count, seed, prehistory, strategy).
pub mod generation_input;

/// How a candidate is drawn from a frequency distribution.
pub mod sampling;

/// Internal frequency distribution attached to a single context.
///
/// Not exposed publicly.
mod state;

/// A single word. Compared by value, never normalized.
pub type Token = String;
