use std::path::PathBuf;

use gibberish_core::error::ParseStrategyError;
use gibberish_core::model::generation_input::GenerationInput;
use thiserror::Error;

/// Model order used when `--order` is not given.
pub const DEFAULT_ORDER: usize = 5;

pub const USAGE: &str = "\
Usage: gibberish [OPTIONS] [CORPUS]

Trains a word-level Markov model on CORPUS (standard input if absent or
unreadable) and prints generated gibberish.

Options:
  -k, --order <K>           Model order, context is K-1 words [default: 5]
  -n, --count <N>           Words generated after the prehistory [default: 100]
  -s, --seed <SEED>         Seed for reproducible output
  -p, --prehistory <WORDS>  Starting words [default: a random context]
      --strategy <NAME>     skewed or proportional [default: skewed]
      --dump                Print the frequency table instead of generating
  -h, --help                Print this help";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgError {
    #[error("missing value for {0}")]
    MissingValue(String),

    #[error("invalid value '{value}' for {flag}")]
    InvalidValue { flag: String, value: String },

    #[error("unknown option {0}")]
    UnknownFlag(String),

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),

    #[error(transparent)]
    Strategy(#[from] ParseStrategyError),
}

/// Command-line configuration.
#[derive(Debug, PartialEq, Eq)]
pub struct CliConfig {
    /// Corpus path, standard input if `None`.
    pub corpus: Option<PathBuf>,

    /// Model order (>= 1, checked by the model).
    pub order: usize,

    /// Generation parameters.
    pub input: GenerationInput,

    /// Print the frequency table instead of generating.
    pub dump: bool,

    pub help: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            corpus: None,
            order: DEFAULT_ORDER,
            input: GenerationInput::default(),
            dump: false,
            help: false,
        }
    }
}

impl CliConfig {
    /// Parses arguments, program name excluded.
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self, ArgError> {
        let mut config = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => config.help = true,
                "--dump" => config.dump = true,
                "-k" | "--order" => config.order = parse_number(&arg, args.next())?,
                "-n" | "--count" => config.input.count = parse_number(&arg, args.next())?,
                "-s" | "--seed" => config.input.seed = Some(parse_number(&arg, args.next())?),
                "-p" | "--prehistory" => {
                    let value = args.next().ok_or_else(|| ArgError::MissingValue(arg.clone()))?;
                    config.input.set_prehistory(&value);
                }
                "--strategy" => {
                    let value = args.next().ok_or_else(|| ArgError::MissingValue(arg.clone()))?;
                    config.input.set_strategy(&value)?;
                }
                s if s.starts_with('-') && s != "-" => return Err(ArgError::UnknownFlag(arg)),
                _ => {
                    if config.corpus.is_some() {
                        return Err(ArgError::UnexpectedArgument(arg));
                    }
                    // "-" explicitly selects standard input
                    if arg != "-" {
                        config.corpus = Some(PathBuf::from(arg));
                    }
                }
            }
        }

        Ok(config)
    }
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, ArgError> {
    let value = value.ok_or_else(|| ArgError::MissingValue(flag.to_owned()))?;
    value.parse().map_err(|_| ArgError::InvalidValue { flag: flag.to_owned(), value })
}
