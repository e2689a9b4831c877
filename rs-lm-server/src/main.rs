use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{get, middleware, put, web, App, HttpResponse, HttpServer, Responder};

use rs_lm_core::io::{list_files, read_corpus};
use rs_lm_core::model::language_model::LanguageModel;
use serde::Deserialize;

/// Directory scanned for `.txt` corpora.
const DATA_DIR: &str = "./data";

/// Window length of the model the server boots with, before any
/// `PUT /v1/train` replaces it.
const DEFAULT_WINDOW_LENGTH: usize = 3;

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	initial: Option<String>,
	length: Option<usize>,
}

/// Struct representing query parameters for the `/v1/train` endpoint
#[derive(Deserialize)]
struct TrainParams {
	corpus: Option<String>,
	window_length: Option<usize>,
	seed: Option<u64>, // omitted -> OS-entropy seeding, non-reproducible
}

struct SharedData {
	model: LanguageModel,
}

/// HTTP GET endpoint `/v1/generate`
///
/// Extends `initial` until it holds `length` characters beyond the
/// trailing window, sampling from the currently trained model. An
/// untrained model, or an initial text whose trailing window was never
/// observed, sends the initial text back unchanged: that is a normal
/// response, not an error.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let initial = match &query.initial {
		Some(s) => s.as_str(),
		None => return HttpResponse::BadRequest().body("Missing 'initial' query parameter"),
	};
	let length = query.length.unwrap_or(100);

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	HttpResponse::Ok().body(shared_data.model.generate(initial, length))
}

/// HTTP PUT endpoint `/v1/train`
///
/// Replaces the current model with a fresh one of the requested window
/// length (seeded when `seed` is given) trained on
/// `./data/<corpus>.txt`. The old model and its random stream are
/// discarded; training never merges corpora.
#[put("/v1/train")]
async fn put_train(data: web::Data<Mutex<SharedData>>, query: web::Query<TrainParams>) -> impl Responder {
	let corpus_name = match &query.corpus {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty corpus name"),
	};
	let window_length = query.window_length.unwrap_or(DEFAULT_WINDOW_LENGTH);

	let corpus_path = format!("{DATA_DIR}/{corpus_name}.txt");
	let corpus = match read_corpus(&corpus_path) {
		Ok(text) => text,
		Err(e) => return HttpResponse::InternalServerError().body(format!("Failed to read corpus: {e}")),
	};

	let mut model = match query.seed {
		Some(seed) => LanguageModel::with_seed(window_length, seed),
		None => LanguageModel::new(window_length),
	};
	if let Err(e) = model.train(corpus.chars()) {
		return HttpResponse::BadRequest().body(format!("Training failed: {e}"));
	}

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	log::info!(
		"trained on '{}': window length {}, {} windows",
		corpus_name,
		window_length,
		model.len()
	);
	shared_data.model = model;

	HttpResponse::Ok().body("Model trained successfully")
}

/// HTTP GET endpoint `/v1/corpora`
///
/// Lists the corpus files available for training, one name per line.
#[get("/v1/corpora")]
async fn get_corpora() -> impl Responder {
	match list_files(DATA_DIR, "txt") {
		Ok(files) => HttpResponse::Ok().body(files.join("\n").replace(".txt", "")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list corpora"),
	}
}

/// HTTP GET endpoint `/v1/dump`
///
/// Returns the textual dump of the trained index, one window per line.
/// Debugging aid only; the dump is not a model interchange format.
#[get("/v1/dump")]
async fn get_dump(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	HttpResponse::Ok().body(shared_data.model.to_string())
}

/// Main entry point for the server.
///
/// Boots with an untrained model (generation passes initial text back
/// unchanged) and waits for `PUT /v1/train`. The `Mutex` is the single
/// exclusive lock around whole train/generate operations that the model
/// requires when shared; the model itself stays single-threaded.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - Request logging goes through `env_logger`; set `RUST_LOG` to tune.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

	let shared_data = SharedData {
		model: LanguageModel::new(DEFAULT_WINDOW_LENGTH),
	};
	let shared_model = web::Data::new(Mutex::new(shared_data));

	log::info!("listening on 127.0.0.1:5000");

	HttpServer::new(move || {
		App::new()
			.app_data(shared_model.clone())
			.wrap(middleware::Logger::default())
			.wrap(Cors::permissive())
			.service(get_generated)
			.service(put_train)
			.service(get_corpora)
			.service(get_dump)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
