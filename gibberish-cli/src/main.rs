use std::process::ExitCode;

use gibberish_core::io::{analyse, open_corpus, DEFAULT_STRIP_CHARS};
use gibberish_core::model::markov_model::MarkovModel;
use log::info;

mod config;

use config::{CliConfig, USAGE};

fn main() -> ExitCode {
    env_logger::init();

    let config = match CliConfig::parse(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    if config.help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Train once over the whole corpus (file, or standard input)
    let mut model = MarkovModel::new(config.order)?;
    let reader = open_corpus(config.corpus.as_ref());
    let count = analyse(reader, &mut model, Some(DEFAULT_STRIP_CHARS))?;
    info!(
        "Trained order {} model on {count} words ({} contexts)",
        model.order(),
        model.context_count()
    );

    if config.dump {
        print!("{model}");
        return Ok(());
    }

    let words = model.generate(&config.input)?;
    println!("{}", words.join(" "));

    Ok(())
}
