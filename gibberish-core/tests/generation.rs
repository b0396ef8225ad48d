use std::fs;

use gibberish_core::error::ModelError;
use gibberish_core::io::{analyse, analyse_file, DEFAULT_STRIP_CHARS};
use gibberish_core::model::generation_input::GenerationInput;
use gibberish_core::model::markov_model::MarkovModel;
use gibberish_core::model::sampling::SamplingStrategy;
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

const CORPUS: &str = "\
the quick brown fox jumps over the lazy dog
the quick red fox runs past the lazy cat
a lazy dog sleeps while the quick fox jumps again
";

fn trained(order: usize) -> MarkovModel {
	let mut model = MarkovModel::new(order).unwrap();
	analyse(CORPUS.as_bytes(), &mut model, Some(DEFAULT_STRIP_CHARS)).unwrap();
	model
}

#[test]
fn trains_from_a_file() {
	let temp = TempDir::new().unwrap();
	let path = temp.path().join("corpus.txt");
	fs::write(&path, CORPUS).unwrap();

	let mut model = MarkovModel::new(3).unwrap();
	let count = analyse_file(&path, &mut model, Some(DEFAULT_STRIP_CHARS)).unwrap();

	assert_eq!(count, 28);
	assert_eq!(model.witnessed(), 25);
	assert_eq!(model.to_string(), trained(3).to_string());
}

#[test]
fn missing_file_is_an_error() {
	let temp = TempDir::new().unwrap();
	let mut model = MarkovModel::new(3).unwrap();
	assert!(analyse_file(temp.path().join("absent.txt"), &mut model, None).is_err());
}

#[test]
fn seeded_generation_is_reproducible() {
	let model = trained(3);
	for strategy in [SamplingStrategy::Skewed, SamplingStrategy::Proportional] {
		let input = GenerationInput {
			count: 40,
			seed: Some(1234),
			prehistory: None,
			strategy: Some(strategy),
		};
		let first = model.generate(&input);
		let second = model.generate(&input);
		assert_eq!(first, second);
	}
}

#[test]
fn generated_words_follow_witnessed_transitions() {
	let model = trained(3);
	let mut input = GenerationInput { count: 30, seed: Some(99), ..Default::default() };
	input.set_prehistory("the quick");

	// "a lazy dog sleeps ... jumps again" ends the corpus, so a stream may
	// reach the unknown context [jumps again] and stop early.
	let words = match model.generate(&input) {
		Ok(words) => words,
		Err(ModelError::MissingContext(context)) => {
			assert_eq!(context, vec!["jumps".to_owned(), "again".to_owned()]);
			return;
		}
		Err(e) => panic!("unexpected error: {e}"),
	};

	assert_eq!(&words[..2], &["the".to_owned(), "quick".to_owned()]);
	assert_eq!(words.len(), 32);
	for window in words.windows(3) {
		let followers = model.distribution(&window[..2]).unwrap();
		assert!(followers.iter().any(|(token, _)| *token == window[2]), "{window:?}");
	}
}

#[test]
fn untrained_model_cannot_generate() {
	let model = MarkovModel::new(5).unwrap();
	let input = GenerationInput { seed: Some(0), ..Default::default() };
	assert_eq!(model.generate(&input), Err(ModelError::MissingContext(Vec::new())));

	let mut short = MarkovModel::new(5).unwrap();
	short.witness_all(["only", "four", "words", "here"]);
	assert!(short.is_empty());
	let mut rng = StdRng::seed_from_u64(0);
	let context = ["four", "words", "here", "x"].map(str::to_owned);
	assert!(short.sample(&context, &mut rng).is_err());
}

#[test]
fn zero_count_returns_prehistory_only() {
	let model = trained(2);
	let mut input = GenerationInput { count: 0, seed: Some(3), ..Default::default() };
	input.set_prehistory("anything at all");
	assert_eq!(
		model.generate(&input),
		Ok(vec!["anything".to_owned(), "at".to_owned(), "all".to_owned()])
	);
}
