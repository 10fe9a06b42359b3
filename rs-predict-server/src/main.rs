use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{post, web, App, HttpResponse, HttpServer, Responder};
use actix_web::middleware::Logger;

use log::info;
use serde::{Deserialize, Serialize};

use rs_predict_core::model::corrector::Corrector;
use rs_predict_core::model::predictor::Predictor;
use rs_predict_core::model::trainer::Trainer;

/// Struct representing the JSON body for the `/predict` endpoint
#[derive(Deserialize)]
struct PredictParams {
	context: Option<String>,
	n: Option<usize>,
}

/// Struct representing the JSON body for the `/autocorrect` endpoint
#[derive(Deserialize)]
struct AutocorrectParams {
	word: Option<String>,
	max_distance: Option<usize>,
}

#[derive(Serialize)]
struct PredictResponse {
	predictions: Vec<String>,
}

#[derive(Serialize)]
struct AutocorrectResponse {
	correction: String,
}

struct SharedData {
	predictor: Predictor,
	corrector: Corrector,
}

/// HTTP POST endpoint `/predict`
///
/// Ranks likely next words for the supplied context string.
/// Returns `{"predictions": [...]}` with at most `n` entries.
#[post("/predict")]
async fn post_predict(data: web::Data<SharedData>, body: web::Json<PredictParams>) -> impl Responder {
	let context = body.context.as_deref().unwrap_or("");
	let n = body.n.unwrap_or(Predictor::DEFAULT_COUNT);

	let predictions = data.predictor.predict_next(context, n);
	HttpResponse::Ok().json(PredictResponse { predictions })
}

/// HTTP POST endpoint `/autocorrect`
///
/// Corrects the supplied word to its closest vocabulary entry.
/// Returns `{"correction": "..."}`; the input comes back unchanged when
/// nothing is within the edit-distance bound.
#[post("/autocorrect")]
async fn post_autocorrect(
	data: web::Data<SharedData>,
	body: web::Json<AutocorrectParams>,
) -> impl Responder {
	let word = body.word.as_deref().unwrap_or("");
	let max_distance = body.max_distance.unwrap_or(Corrector::DEFAULT_MAX_DISTANCE);

	let correction = data.corrector.autocorrect(word, max_distance);
	HttpResponse::Ok().json(AutocorrectResponse { correction })
}

/// Main entry point for the server.
///
/// Loads or builds the frequency model once, hands read-only handles to
/// the predictor and the corrector, and starts an Actix-web HTTP server.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - The corpus path comes from the first CLI argument, defaulting to
///   `./data/corpus.txt`; the snapshot lives next to it.
/// - Model construction completes before the workers start, so request
///   handlers read the model without locking.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let corpus_path = std::env::args()
		.nth(1)
		.unwrap_or_else(|| "./data/corpus.txt".to_owned());

	let model = Trainer::load_or_build(&corpus_path)
		.map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
	let model = Arc::new(model);

	let shared_data = web::Data::new(SharedData {
		predictor: Predictor::new(Arc::clone(&model)),
		corrector: Corrector::new(model),
	});

	info!("Serving predictions on 127.0.0.1:5000");
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.wrap(Logger::default())
			.app_data(shared_data.clone())
			.service(post_predict)
			.service(post_autocorrect)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
