use std::{env, io};

use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use log::info;
use serde::Deserialize;

use gibberish_core::error::ModelError;
use gibberish_core::io::{analyse_file, DEFAULT_STRIP_CHARS};
use gibberish_core::model::generation_input::GenerationInput;
use gibberish_core::model::markov_model::MarkovModel;

const CORPUS_VAR: &str = "GIBBERISH_CORPUS";
const ORDER_VAR: &str = "GIBBERISH_ORDER";
const DEFAULT_CORPUS: &str = "./data/corpus.txt";
const DEFAULT_ORDER: usize = 5;

/// Upper bound on `count`, keeps a single request from sampling forever.
const MAX_COUNT: usize = 10_000;
const DEFAULT_CONTEXT_LIMIT: usize = 100;

/// Query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	count: Option<usize>,
	seed: Option<u64>,
	prehistory: Option<String>, // space separated, random stored context if absent
	strategy: Option<String>,
}

#[derive(Deserialize)]
struct ContextsQuery {
	limit: Option<usize>
}

/// Trained model, read-only once the server starts
struct SharedData {
	model: MarkovModel
}

impl GenerateParams {
	/// Builds generation parameters from the query.
	fn generation_input(&self) -> Result<GenerationInput, String> {
		let mut input = GenerationInput::default();

		if let Some(count) = self.count {
			if count > MAX_COUNT {
				return Err(format!("count must be <= {MAX_COUNT}, got {count}"));
			}
			input.count = count;
		}
		input.seed = self.seed;
		if let Some(prehistory) = &self.prehistory {
			input.set_prehistory(prehistory);
		}
		if let Some(strategy) = &self.strategy {
			input.set_strategy(strategy).map_err(|e| e.to_string())?;
		}

		Ok(input)
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Returns the prehistory followed by `count` generated words,
/// separated by single spaces.
#[get("/v1/generate")]
async fn get_generated(
	data: web::Data<SharedData>,
	query: web::Query<GenerateParams>,
) -> impl Responder {
	let input = match query.generation_input() {
		Ok(input) => input,
		Err(e) => return HttpResponse::BadRequest().body(e)
	};

	match data.model.generate(&input) {
		Ok(words) => HttpResponse::Ok().body(words.join(" ")),
		Err(e @ ModelError::MissingContext(_)) => HttpResponse::NotFound().body(e.to_string()),
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

#[get("/v1/stats")]
async fn get_stats(data: web::Data<SharedData>) -> impl Responder {
	HttpResponse::Ok().json(data.model.stats())
}

#[get("/v1/contexts")]
async fn get_contexts(
	data: web::Data<SharedData>,
	query: web::Query<ContextsQuery>,
) -> impl Responder {
	let limit = query.limit.unwrap_or(DEFAULT_CONTEXT_LIMIT);
	let contexts: Vec<String> = data.model
		.contexts()
		.take(limit)
		.map(|context| context.join(" "))
		.collect();
	HttpResponse::Ok().body(contexts.join("\n"))
}

fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(get_generated)
		.service(get_stats)
		.service(get_contexts);
}

/// Trains a model of order `order` from the corpus at `path`.
fn train(path: &str, order: usize) -> Result<MarkovModel, Box<dyn std::error::Error>> {
	let mut model = MarkovModel::new(order)?;
	let count = analyse_file(path, &mut model, Some(DEFAULT_STRIP_CHARS))?;
	info!(
		"Trained order {order} model on {count} words from {path} ({} contexts)",
		model.context_count()
	);
	Ok(model)
}

/// Main entry point for the server.
///
/// Trains the model once, then shares it read-only between workers.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - Corpus path: first argument, else `GIBBERISH_CORPUS`, else `./data/corpus.txt`.
/// - Model order: `GIBBERISH_ORDER`, else 5.
#[actix_web::main]
async fn main() -> io::Result<()> {
	env_logger::init();

	let corpus = env::args()
		.nth(1)
		.or_else(|| env::var(CORPUS_VAR).ok())
		.unwrap_or_else(|| DEFAULT_CORPUS.to_owned());
	let order = match env::var(ORDER_VAR) {
		Ok(value) => value.parse().map_err(|_| {
			io::Error::new(
				io::ErrorKind::InvalidInput,
				format!("{ORDER_VAR} must be a positive integer, got '{value}'"),
			)
		})?,
		Err(_) => DEFAULT_ORDER,
	};

	let model = train(&corpus, order).map_err(|e| io::Error::other(e.to_string()))?;
	let shared_data = web::Data::new(SharedData { model });

	HttpServer::new(move || {
		App::new()
			.app_data(shared_data.clone())
			.configure(configure)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
