use std::path::Path;
use std::sync::mpsc;
use std::thread;

use log::info;
use thiserror::Error;

use crate::io::{build_output_path, read_file};
use super::frequency_model::FrequencyModel;

/// Startup failure while restoring or building a model.
///
/// This is the only error class the core surfaces: query paths degrade to
/// empty/unchanged results instead of failing. The caller decides whether
/// to fall back to retraining; no retry happens here.
#[derive(Debug, Error)]
pub enum ModelLoadError {
	/// The snapshot or corpus file could not be read.
	#[error("model data unreadable: {0}")]
	Missing(#[from] std::io::Error),
	/// The snapshot bytes could not be decoded into a model.
	#[error("model snapshot corrupt: {0}")]
	Corrupt(#[from] postcard::Error),
}

/// Normalizes a raw sentence into lowercase tokens.
///
/// Splits on whitespace only; no punctuation handling beyond what the
/// corpus itself provides.
pub fn normalize_sentence(sentence: &str) -> Vec<String> {
	sentence.split_whitespace().map(str::to_lowercase).collect()
}

/// Builds a `FrequencyModel` from a corpus of sentences.
///
/// # Responsibilities
/// - Walk the corpus exactly once and populate the model tables
/// - Build partial models in parallel over corpus chunks and merge them
/// - Persist a trained model as a snapshot and restore it later
///
/// Training is deterministic: the same corpus always yields identical
/// tables, whether trained sequentially or in parallel.
pub struct Trainer;

impl Trainer {
	/// Adds one raw sentence to the model.
	///
	/// Every token joins the vocabulary; every adjacent pair updates the
	/// bigram table and every adjacent triple the trigram table. Sentences
	/// shorter than two tokens contribute only to the vocabulary.
	pub fn train_sentence(model: &mut FrequencyModel, sentence: &str) {
		let tokens = normalize_sentence(sentence);

		for token in &tokens {
			model.add_to_vocabulary(token);
		}

		for pair in tokens.windows(2) {
			model.record_bigram(&pair[0], &pair[1]);
		}

		for triple in tokens.windows(3) {
			model.record_trigram(&triple[0], &triple[1], &triple[2]);
		}
	}

	/// Trains a model over a finite sequence of sentences, single pass.
	pub fn train<I>(sentences: I) -> FrequencyModel
	where
		I: IntoIterator,
		I::Item: AsRef<str>,
	{
		let mut model = FrequencyModel::new();
		for sentence in sentences {
			Self::train_sentence(&mut model, sentence.as_ref());
		}
		model
	}

	/// Trains a model over corpus lines using multithreaded merging.
	///
	/// # Behavior
	/// - Splits input lines into chunks (based on CPU cores * factor).
	/// - Spawns threads to build partial models for each chunk.
	/// - Merges all partial models sequentially.
	///
	/// # Notes
	/// - Uses MPSC channels to collect models from threads.
	/// - Counts are identical to a sequential pass because merging sums them.
	pub fn train_corpus(lines: Vec<String>) -> FrequencyModel {
		if lines.is_empty() {
			return FrequencyModel::new();
		}

		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = (lines.len() + chunks - 1) / chunks;

		let (tx, rx) = mpsc::channel();
		for chunk in lines.chunks(chunk_size) {
			let tx = tx.clone();
			let chunk: Vec<String> = chunk.to_vec();

			thread::spawn(move || {
				let mut partial_model = FrequencyModel::new();
				for sentence in &chunk {
					Self::train_sentence(&mut partial_model, sentence);
				}
				tx.send(partial_model).expect("Failed to send from thread");
			});
		}
		drop(tx);

		let mut final_model = FrequencyModel::new();
		for partial_model in rx.iter() {
			final_model.merge(partial_model);
		}

		final_model
	}

	/// Serializes a model to `path` as a compact binary snapshot.
	pub fn save_snapshot<P: AsRef<Path>>(
		model: &FrequencyModel,
		path: P,
	) -> Result<(), ModelLoadError> {
		let bytes = postcard::to_stdvec(model)?;
		std::fs::write(path, bytes)?;
		Ok(())
	}

	/// Restores a model from a snapshot written by [`save_snapshot`](Self::save_snapshot).
	///
	/// The restored model is equal to the one that was saved and is a pure
	/// substitute for retraining.
	///
	/// # Errors
	/// - [`ModelLoadError::Missing`] if the file cannot be read.
	/// - [`ModelLoadError::Corrupt`] if the bytes do not decode.
	pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<FrequencyModel, ModelLoadError> {
		let bytes = std::fs::read(path)?;
		let model = postcard::from_bytes(&bytes)?;
		Ok(model)
	}

	/// Loads a model from a snapshot if one exists next to the corpus,
	/// otherwise trains from the corpus file and persists the result.
	///
	/// The snapshot path is the corpus path with a `bin` extension
	/// (`data/corpus.txt` → `data/corpus.bin`).
	///
	/// # Errors
	/// Returns [`ModelLoadError`] if the corpus is unreadable or an
	/// existing snapshot is unreadable or corrupt. A corrupt snapshot is
	/// never silently rebuilt; the caller decides.
	pub fn load_or_build<P: AsRef<Path>>(corpus_path: P) -> Result<FrequencyModel, ModelLoadError> {
		let snapshot_path = build_output_path(&corpus_path, "bin")?;

		if snapshot_path.exists() {
			let model = Self::load_snapshot(&snapshot_path)?;
			info!(
				"Loaded model snapshot from {} ({} vocabulary entries)",
				snapshot_path.display(),
				model.vocabulary_len()
			);
			return Ok(model);
		}

		let lines = read_file(&corpus_path)?;
		let model = Self::train_corpus(lines);
		Self::save_snapshot(&model, &snapshot_path)?;
		info!(
			"Trained model from {} ({} vocabulary entries), snapshot written to {}",
			corpus_path.as_ref().display(),
			model.vocabulary_len(),
			snapshot_path.display()
		);

		Ok(model)
	}
}
