//! Word-level Markov chain gibberish generation library.
//!
//! This crate provides a k-th order Markov text model including:
//! - Training by witnessing a corpus one word at a time
//! - Context → next-word frequency tables with deterministic ordering
//! - Weighted sampling with an injected, seedable random source
//! - A lazy, infinite generation driver
//! - Corpus analysis helpers (line splitting and word stripping)
//!
//! ```
//! use gibberish_core::model::markov_model::MarkovModel;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut model = MarkovModel::new(2).unwrap();
//! model.witness_all("the cat sat on the mat".split(' '));
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let word = model.sample(&["the".to_owned()], &mut rng).unwrap();
//! assert!(word == "cat" || word == "mat");
//! ```

/// Markov model, context window, sampling and generation.
pub mod model;

/// Error types shared by the model and the corpus reader.
pub mod error;

/// Corpus I/O (opening sources, splitting lines into words).
pub mod io;
