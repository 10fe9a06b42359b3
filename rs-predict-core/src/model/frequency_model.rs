use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::follower_counts::FollowerCounts;

/// The trained frequency model: vocabulary plus bigram and trigram tables.
///
/// The three parts are always trained together and always loaded/saved
/// together; no partial states are valid. After training (or after a
/// snapshot load) the model is read-only for the rest of the process
/// lifetime.
///
/// # Responsibilities
/// - Accumulate bigram/trigram occurrence counts during training
/// - Answer follower-count queries for the predictor
/// - Answer vocabulary membership queries for the corrector
/// - Merge with another model (parallel training support)
///
/// # Invariants
/// - Every count stored in a table is strictly positive
/// - An absent context or follower means a count of zero, never an error
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct FrequencyModel {
	/// All distinct tokens observed during training.
	vocabulary: HashSet<String>,
	/// Mapping from a preceding word to its follower counts.
	bigrams: HashMap<String, FollowerCounts>,
	/// Mapping from an ordered preceding word pair to its follower counts.
	trigrams: HashMap<(String, String), FollowerCounts>,
}

impl FrequencyModel {
	/// Returns a new, empty model.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one occurrence of `w2` following `w1`.
	pub fn record_bigram(&mut self, w1: &str, w2: &str) {
		self.bigrams.entry(w1.to_owned()).or_default().record(w2);
	}

	/// Records one occurrence of `w3` following the ordered pair `(w1, w2)`.
	pub fn record_trigram(&mut self, w1: &str, w2: &str, w3: &str) {
		self.trigrams
			.entry((w1.to_owned(), w2.to_owned()))
			.or_default()
			.record(w3);
	}

	/// Inserts a token into the vocabulary. Idempotent.
	pub fn add_to_vocabulary(&mut self, token: &str) {
		if !self.vocabulary.contains(token) {
			self.vocabulary.insert(token.to_owned());
		}
	}

	/// Vocabulary membership test. O(1) expected.
	pub fn contains(&self, token: &str) -> bool {
		self.vocabulary.contains(token)
	}

	/// Number of distinct tokens observed during training.
	pub fn vocabulary_len(&self) -> usize {
		self.vocabulary.len()
	}

	/// Returns an iterator over all vocabulary tokens (unordered).
	pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
		self.vocabulary.iter().map(String::as_str)
	}

	/// Returns the `(follower, count)` pairs observed after `w1`.
	///
	/// An unseen `w1` yields an empty iterator; this query never fails.
	pub fn bigram_counts<'a>(&'a self, w1: &str) -> impl Iterator<Item = (&'a str, usize)> {
		self.bigrams.get(w1).into_iter().flat_map(FollowerCounts::iter)
	}

	/// Returns the `(follower, count)` pairs observed after the pair `(w1, w2)`.
	///
	/// An unseen pair yields an empty iterator; this query never fails.
	pub fn trigram_counts<'a>(&'a self, w1: &str, w2: &str) -> impl Iterator<Item = (&'a str, usize)> {
		self.trigrams
			.get(&(w1.to_owned(), w2.to_owned()))
			.into_iter()
			.flat_map(FollowerCounts::iter)
	}

	/// Number of times `w2` was observed following `w1` (zero if never).
	pub fn bigram_count(&self, w1: &str, w2: &str) -> usize {
		self.bigrams.get(w1).map_or(0, |followers| followers.count(w2))
	}

	/// Number of times `w3` was observed following the pair `(w1, w2)`.
	pub fn trigram_count(&self, w1: &str, w2: &str, w3: &str) -> usize {
		self.trigrams
			.get(&(w1.to_owned(), w2.to_owned()))
			.map_or(0, |followers| followers.count(w3))
	}

	/// Table entry for `w1`, if any. Used by the predictor for ranking.
	pub(crate) fn bigram_followers(&self, w1: &str) -> Option<&FollowerCounts> {
		self.bigrams.get(w1)
	}

	/// Table entry for the pair `(w1, w2)`, if any.
	pub(crate) fn trigram_followers(&self, w1: &str, w2: &str) -> Option<&FollowerCounts> {
		self.trigrams.get(&(w1.to_owned(), w2.to_owned()))
	}

	/// Iterates over every bigram table entry, regardless of context.
	///
	/// Used by the predictor to total follower occurrences for the
	/// zero-context fallback ranking.
	pub(crate) fn bigram_entries(&self) -> impl Iterator<Item = &FollowerCounts> {
		self.bigrams.values()
	}

	/// Raw vocabulary set, for the corrector's parallel scan.
	pub(crate) fn vocabulary_set(&self) -> &HashSet<String> {
		&self.vocabulary
	}

	/// Merges another model into this one.
	///
	/// Vocabularies are unioned; occurrence counts for matching contexts
	/// and followers are summed. Intended for combining partial models
	/// built in parallel over corpus chunks.
	pub fn merge(&mut self, other: Self) {
		self.vocabulary.extend(other.vocabulary);

		for (context, entry) in other.bigrams {
			match self.bigrams.get_mut(&context) {
				Some(existing) => existing.merge(&entry),
				None => {
					self.bigrams.insert(context, entry);
				}
			}
		}

		for (context, entry) in other.trigrams {
			match self.trigrams.get_mut(&context) {
				Some(existing) => existing.merge(&entry),
				None => {
					self.trigrams.insert(context, entry);
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_record_bigram_counts() {
		let mut model = FrequencyModel::new();
		model.record_bigram("the", "cat");
		model.record_bigram("the", "cat");
		model.record_bigram("the", "dog");

		let counts: HashMap<&str, usize> = model.bigram_counts("the").collect();
		assert_eq!(counts.get("cat"), Some(&2));
		assert_eq!(counts.get("dog"), Some(&1));
	}

	#[test]
	fn test_unseen_context_is_empty_not_an_error() {
		let model = FrequencyModel::new();
		assert_eq!(model.bigram_counts("ghost").count(), 0);
		assert_eq!(model.trigram_counts("ghost", "word").count(), 0);
	}

	#[test]
	fn test_vocabulary_is_idempotent() {
		let mut model = FrequencyModel::new();
		model.add_to_vocabulary("cat");
		model.add_to_vocabulary("cat");
		assert!(model.contains("cat"));
		assert!(!model.contains("dog"));
		assert_eq!(model.vocabulary_len(), 1);
	}

	#[test]
	fn test_merge_sums_tables_and_unions_vocabulary() {
		let mut a = FrequencyModel::new();
		a.add_to_vocabulary("the");
		a.record_bigram("the", "cat");
		a.record_trigram("the", "cat", "sat");

		let mut b = FrequencyModel::new();
		b.add_to_vocabulary("cat");
		b.record_bigram("the", "cat");
		b.record_trigram("the", "cat", "ran");

		a.merge(b);

		let bigram: HashMap<&str, usize> = a.bigram_counts("the").collect();
		assert_eq!(bigram.get("cat"), Some(&2));

		let trigram: HashMap<&str, usize> = a.trigram_counts("the", "cat").collect();
		assert_eq!(trigram.get("sat"), Some(&1));
		assert_eq!(trigram.get("ran"), Some(&1));

		assert!(a.contains("the"));
		assert!(a.contains("cat"));
	}
}
