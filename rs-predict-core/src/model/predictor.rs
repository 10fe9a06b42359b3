use std::collections::HashMap;
use std::sync::Arc;

use super::frequency_model::FrequencyModel;

/// Ranks likely next words for a typed context.
///
/// # Responsibilities
/// - Select the bigram or trigram table from the context word count
/// - Return up to `n` followers, most frequent first
/// - Serve the zero-context fallback from a ranking memoized at
///   construction time
///
/// # Notes
/// - Holds a shared read-only handle to the model; a `Predictor` can be
///   queried concurrently without locking.
/// - All rankings break count ties lexicographically, so results are
///   stable across runs.
pub struct Predictor {
	model: Arc<FrequencyModel>,
	/// Entire vocabulary ordered by total bigram-follower occurrences
	/// (descending), computed once. Equivalent to recomputing the fallback
	/// ranking per request, since the model never changes after training.
	fallback_ranking: Vec<String>,
}

impl Predictor {
	/// Default number of predictions returned to callers.
	pub const DEFAULT_COUNT: usize = 5;

	/// Creates a predictor over a trained model.
	///
	/// Memoizes the zero-context fallback ranking: every vocabulary token
	/// scored by the total number of times it appears as a follower across
	/// all bigram entries, ordered descending, ties broken
	/// lexicographically.
	pub fn new(model: Arc<FrequencyModel>) -> Self {
		let fallback_ranking = Self::rank_vocabulary(&model);
		Self { model, fallback_ranking }
	}

	/// Orders the whole vocabulary by total bigram-follower occurrences.
	fn rank_vocabulary(model: &FrequencyModel) -> Vec<String> {
		let mut totals: HashMap<&str, usize> = HashMap::new();
		for entry in model.bigram_entries() {
			for (follower, count) in entry.iter() {
				*totals.entry(follower).or_insert(0) += count;
			}
		}

		let mut ranked: Vec<(&str, usize)> = model
			.vocabulary()
			.map(|token| (token, totals.get(token).copied().unwrap_or(0)))
			.collect();
		ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

		ranked.into_iter().map(|(token, _)| token.to_owned()).collect()
	}

	/// Predicts up to `n` next words for `context`, most likely first.
	///
	/// # Behavior
	/// By word count of the lowercased, whitespace-split context:
	/// - zero words: the memoized whole-vocabulary fallback ranking;
	/// - one word `w`: the most frequent followers of `w` in the bigram table;
	/// - two or more: the most frequent followers of the last two words in
	///   the trigram table.
	///
	/// # Notes
	/// - The result has at most `n` entries and may be shorter or empty.
	/// - Unseen context yields an empty result, never an error.
	pub fn predict_next(&self, context: &str, n: usize) -> Vec<String> {
		let words: Vec<String> = context
			.to_lowercase()
			.split_whitespace()
			.map(str::to_owned)
			.collect();

		match words.as_slice() {
			[] => self.fallback_ranking.iter().take(n).cloned().collect(),
			[w] => self
				.model
				.bigram_followers(w)
				.map(|followers| followers.top_n(n))
				.unwrap_or_default(),
			[.., w1, w2] => self
				.model
				.trigram_followers(w1, w2)
				.map(|followers| followers.top_n(n))
				.unwrap_or_default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::trainer::Trainer;

	fn predictor(sentences: &[&str]) -> Predictor {
		Predictor::new(Arc::new(Trainer::train(sentences)))
	}

	#[test]
	fn test_trigram_branch_uses_last_two_words() {
		let p = predictor(&["the cat sat", "the cat ran"]);

		let two = p.predict_next("the cat", 2);
		assert_eq!(two.len(), 2);
		assert!(two.contains(&"ran".to_owned()));
		assert!(two.contains(&"sat".to_owned()));

		// Longer context still keys on the trailing pair.
		assert_eq!(p.predict_next("once more the cat", 2), two);

		let one = p.predict_next("the cat", 1);
		assert_eq!(one.len(), 1);
		assert!(two.contains(&one[0]));
	}

	#[test]
	fn test_bigram_branch_ranks_by_count() {
		let p = predictor(&["the cat sat", "the cat ran", "the dog sat"]);
		assert_eq!(p.predict_next("the", 2), vec!["cat", "dog"]);
		assert_eq!(p.predict_next("The", 1), vec!["cat"]);
	}

	#[test]
	fn test_empty_and_whitespace_context_share_the_fallback() {
		let p = predictor(&["the cat sat", "the cat ran"]);
		let from_empty = p.predict_next("", 3);
		assert_eq!(from_empty, p.predict_next(" ", 3));
		// "cat" follows "the" twice; every other follower appears once.
		assert_eq!(from_empty[0], "cat");
	}

	#[test]
	fn test_result_never_exceeds_n() {
		let p = predictor(&["the cat sat", "the cat ran"]);
		assert!(p.predict_next("", 2).len() <= 2);
		assert!(p.predict_next("the", 1).len() <= 1);
		assert!(p.predict_next("the cat", 10).len() <= 10);
	}

	#[test]
	fn test_unseen_context_yields_empty_result() {
		let p = predictor(&["the cat sat"]);
		assert!(p.predict_next("zebra", 5).is_empty());
		assert!(p.predict_next("purple zebra", 5).is_empty());
	}
}
