//! Next-word prediction and autocorrection library.
//!
//! This crate provides a word-level n-gram prediction system including:
//! - Bigram/trigram frequency tables with a shared vocabulary
//! - Single-pass and multithreaded corpus training
//! - Deterministic top-n next-word ranking
//! - Bounded edit-distance autocorrection against the vocabulary
//! - Snapshot persistence for trained models
//!
//! Only the high-level API is exposed publicly. Low-level components
//! are kept internal to ensure consistency and prevent misuse.

/// Core frequency model, training, prediction and correction logic.
///
/// This module exposes the high-level interfaces while keeping
/// internal count representations private.
pub mod model;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;
