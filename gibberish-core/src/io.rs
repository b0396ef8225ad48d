use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use log::{debug, warn};

use crate::error::CorpusError;
use crate::model::markov_model::MarkovModel;

/// Characters stripped from both ends of every raw word by default.
pub const DEFAULT_STRIP_CHARS: &[char] = &[' ', '\t', '\n'];

/// Lines are split on this character only.
const DELIMITER: char = ' ';

/// Opens a corpus for reading.
///
/// - `Some(path)` opens the file, falling back to standard input
///   (with a warning) if it cannot be opened
/// - `None` reads standard input
pub fn open_corpus<P: AsRef<Path>>(path: Option<P>) -> Box<dyn BufRead> {
	open_or_else(path, || Box::new(io::stdin().lock()))
}

/// Opens `path`, or returns `fallback()` if it is absent or cannot be opened.
fn open_or_else<P, F>(path: Option<P>, fallback: F) -> Box<dyn BufRead>
where
	P: AsRef<Path>,
	F: FnOnce() -> Box<dyn BufRead>,
{
	if let Some(path) = path {
		let path = path.as_ref();
		match File::open(path) {
			Ok(file) => return Box::new(BufReader::new(file)),
			Err(e) => warn!("Cannot open {}: {e}, reading standard input", path.display()),
		}
	}
	fallback()
}

/// Splits one line into words.
///
/// The line is split on single spaces and each piece is stripped of
/// `strip` characters (all whitespace if `None`). Empty pieces are dropped.
pub fn words<'a>(
	line: &'a str,
	strip: Option<&'a [char]>,
) -> impl Iterator<Item = &'a str> + 'a {
	line.split(DELIMITER)
		.map(move |word| match strip {
			Some(chars) => word.trim_matches(chars),
			None => word.trim(),
		})
		.filter(|word| !word.is_empty())
}

/// Witnesses every word of `reader` into `model`.
///
/// Lines keep their terminator while being split, so a strip set without
/// `'\n'` leaves it attached to the last word of the line.
///
/// Returns the number of witnessed words.
///
/// # Errors
/// Returns an error if reading fails; words read so far stay witnessed.
pub fn analyse<R: BufRead>(
	mut reader: R,
	model: &mut MarkovModel,
	strip: Option<&[char]>,
) -> Result<usize, CorpusError> {
	let mut line = String::new();
	let mut count = 0;

	loop {
		line.clear();
		if reader.read_line(&mut line)? == 0 {
			break;
		}
		for word in words(&line, strip) {
			model.witness(word);
			count += 1;
		}
	}

	debug!(
		"Analysed {count} words: {} transitions over {} contexts",
		model.witnessed(),
		model.context_count()
	);
	Ok(count)
}

/// Reads a corpus file into `model`.
///
/// Unlike `open_corpus`, a missing file is an error.
pub fn analyse_file<P: AsRef<Path>>(
	path: P,
	model: &mut MarkovModel,
	strip: Option<&[char]>,
) -> Result<usize, CorpusError> {
	let file = File::open(path)?;
	analyse(BufReader::new(file), model, strip)
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use std::fs;
	use std::io::{Cursor, Read};
	use tempfile::TempDir;

	fn read_all(mut reader: Box<dyn BufRead>) -> String {
		let mut contents = String::new();
		reader.read_to_string(&mut contents).unwrap();
		contents
	}

	fn stand_in() -> Box<dyn BufRead> {
		Box::new(Cursor::new("from stdin\n"))
	}

	#[test]
	fn open_corpus_reads_an_existing_file() {
		let temp = TempDir::new().unwrap();
		let path = temp.path().join("corpus.txt");
		fs::write(&path, "one two\nthree\n").unwrap();

		assert_eq!(read_all(open_corpus(Some(&path))), "one two\nthree\n");
		assert_eq!(read_all(open_or_else(Some(&path), stand_in)), "one two\nthree\n");
	}

	#[test]
	fn open_corpus_falls_back_when_file_is_missing() {
		let temp = TempDir::new().unwrap();
		let missing = temp.path().join("absent.txt");

		assert_eq!(read_all(open_or_else(Some(&missing), stand_in)), "from stdin\n");
		assert_eq!(read_all(open_or_else(None::<&Path>, stand_in)), "from stdin\n");

		// The real fallback is standard input; not read, so it cannot block.
		drop(open_corpus(Some(&missing)));
	}

	#[test]
	fn missing_corpus_still_trains_from_fallback() {
		let temp = TempDir::new().unwrap();
		let reader = open_or_else(Some(temp.path().join("absent.txt")), || {
			Box::new(Cursor::new("a b a b a\n"))
		});

		let mut model = MarkovModel::new(2).unwrap();
		assert_eq!(analyse(reader, &mut model, Some(DEFAULT_STRIP_CHARS)).unwrap(), 5);
		assert_eq!(model.witnessed(), 3);
	}

	#[test]
	fn words_are_split_on_spaces_and_stripped() {
		let line = "\tthe  cat\tsat \n";
		let found: Vec<&str> = words(line, Some(DEFAULT_STRIP_CHARS)).collect();
		assert_eq!(found, vec!["the", "cat\tsat"]);
	}

	#[test]
	fn custom_strip_set_keeps_other_characters() {
		let found: Vec<&str> = words("(hi) there.\n", Some(&['(', ')', '.'][..])).collect();
		assert_eq!(found, vec!["hi", "there.\n"]);
	}

	#[test]
	fn no_strip_set_trims_all_whitespace() {
		let found: Vec<&str> = words("a\r b\u{a0} \n", None).collect();
		assert_eq!(found, vec!["a", "b"]);
	}

	#[test]
	fn analyse_counts_words_across_lines() {
		let mut model = MarkovModel::new(2).unwrap();
		let corpus = "the cat sat\non the mat\n\nthe cat ran";
		let count = analyse(corpus.as_bytes(), &mut model, Some(DEFAULT_STRIP_CHARS)).unwrap();
		assert_eq!(count, 9);
		assert_eq!(model.witnessed(), 7);
	}
}
