//! Top-level module for the word prediction system.
//!
//! This crate provides a bigram/trigram next-word predictor, including:
//! - The frequency tables and vocabulary (`FrequencyModel`)
//! - Corpus training and snapshot persistence (`Trainer`)
//! - Deterministic next-word ranking (`Predictor`)
//! - Edit-distance autocorrection (`Corrector`)

/// Frequency model owning the vocabulary and the bigram/trigram tables.
///
/// Built once by the trainer (or restored from a snapshot), then treated
/// as read-only by the predictor and the corrector.
pub mod frequency_model;

/// Corpus training, parallel construction and snapshot load/save.
///
/// Also hosts sentence normalization (lowercasing and whitespace
/// tokenization) and the startup `load_or_build` entry point.
pub mod trainer;

/// Next-word ranking over the frequency tables.
///
/// Selects the bigram or trigram table from the context length and
/// returns the most frequent followers, most likely first.
pub mod predictor;

/// Nearest-neighbor spelling correction over the vocabulary.
///
/// Brute-force bounded Levenshtein scan, parallelized over vocabulary
/// entries.
pub mod corrector;

/// Internal representation of one follower-count table entry.
///
/// Tracks follower occurrences and supports deterministic top-n ranking.
/// This module is not exposed publicly.
mod follower_counts;
