use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Represents one entry of a bigram or trigram table.
///
/// A `FollowerCounts` belongs to a fixed preceding context (a single word
/// for the bigram table, an ordered word pair for the trigram table) and
/// stores how often each follower word was observed after that context.
///
/// ## Responsibilities:
/// - Accumulate follower occurrences during training
/// - Rank followers deterministically by observed frequency
/// - Merge with another table entry for the same context (parallel training support)
///
/// ## Invariants
/// - Each follower occurrence count is strictly positive
/// - An absent follower means a count of zero
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct FollowerCounts {
	/// Observed followers indexed by word.
	/// The value represents how many times this follower was observed.
	/// Example: { "sat" => 42, "ran" => 3 }
	counts: HashMap<String, usize>,
}

impl FollowerCounts {
	/// Creates a new empty table entry.
	pub fn new() -> Self {
		Self { counts: HashMap::new() }
	}

	/// Records an occurrence of `follower`.
	///
	/// - If the follower already exists, its occurrence count is increased.
	/// - Otherwise, a new follower is created with an initial count of 1.
	pub fn record(&mut self, follower: &str) {
		*self.counts.entry(follower.to_owned()).or_insert(0) += 1;
	}

	/// Returns the occurrence count for `follower` (zero if never observed).
	pub fn count(&self, follower: &str) -> usize {
		self.counts.get(follower).copied().unwrap_or(0)
	}

	/// Returns an iterator over `(follower, count)` pairs.
	///
	/// Iteration order is not meaningful; use [`top_n`](Self::top_n) for
	/// ranked access.
	pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
		self.counts.iter().map(|(word, count)| (word.as_str(), *count))
	}

	/// Returns up to `n` followers, most frequent first.
	///
	/// Followers with equal counts are ordered lexicographically so the
	/// ranking is stable across runs and across map iteration orders.
	pub fn top_n(&self, n: usize) -> Vec<String> {
		let mut ranked: Vec<(&String, usize)> =
			self.counts.iter().map(|(word, count)| (word, *count)).collect();

		ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
		ranked.truncate(n);

		ranked.into_iter().map(|(word, _)| word.to_owned()).collect()
	}

	/// Merges another table entry into this one.
	///
	/// Both entries must belong to the same preceding context; the caller
	/// (the owning table) guarantees this. Follower occurrence counts are
	/// summed.
	///
	/// This method is intended for parallel training, where multiple
	/// partial models are combined into a single one.
	pub fn merge(&mut self, other: &Self) {
		for (follower, occurrence) in &other.counts {
			*self.counts.entry(follower.clone()).or_insert(0) += *occurrence;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_record_accumulates() {
		let mut entry = FollowerCounts::new();
		entry.record("sat");
		entry.record("sat");
		entry.record("ran");
		assert_eq!(entry.count("sat"), 2);
		assert_eq!(entry.count("ran"), 1);
		assert_eq!(entry.count("slept"), 0);
	}

	#[test]
	fn test_top_n_orders_by_count_then_word() {
		let mut entry = FollowerCounts::new();
		entry.record("ran");
		entry.record("sat");
		entry.record("sat");
		entry.record("ate");
		assert_eq!(entry.top_n(3), vec!["sat", "ate", "ran"]);
		assert_eq!(entry.top_n(1), vec!["sat"]);
		assert!(entry.top_n(0).is_empty());
	}

	#[test]
	fn test_merge_sums_counts() {
		let mut a = FollowerCounts::new();
		a.record("sat");
		let mut b = FollowerCounts::new();
		b.record("sat");
		b.record("ran");
		a.merge(&b);
		assert_eq!(a.count("sat"), 2);
		assert_eq!(a.count("ran"), 1);
	}
}
