use std::sync::Arc;

use rayon::prelude::*;

use super::frequency_model::FrequencyModel;

/// Computes the Levenshtein distance between `a` and `b`, bounded by `max_dist`.
///
/// Unit-cost insertions, deletions and substitutions. Any distance above
/// the bound is reported as `max_dist + 1`; cells outside the diagonal
/// band are never computed exactly.
fn bounded_levenshtein(a: &str, b: &str, max_dist: usize) -> usize {
	let a: Vec<char> = a.chars().collect();
	let b: Vec<char> = b.chars().collect();
	let (shorter, longer) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
	if longer.len() - shorter.len() > max_dist {
		return max_dist + 1;
	}

	let n = longer.len();
	let mut prev: Vec<usize> = (0..=n).collect();
	let mut curr = vec![0; n + 1];

	for (i, &sc) in shorter.iter().enumerate() {
		let row = i + 1;
		curr[0] = row;

		let col_min = if row > max_dist { row - max_dist } else { 1 };
		let col_max = (row + max_dist).min(n);

		for j in 1..=n {
			if j < col_min || j > col_max {
				curr[j] = max_dist + 1;
				continue;
			}
			let cost = if sc == longer[j - 1] { 0 } else { 1 };
			let ins = curr[j - 1] + 1;
			let del = prev[j] + 1;
			let sub = prev[j - 1] + cost;
			curr[j] = ins.min(del).min(sub);
		}
		std::mem::swap(&mut prev, &mut curr);
	}
	prev[n].min(max_dist + 1)
}

/// Corrects misspelled words to their nearest vocabulary entry.
///
/// # Responsibilities
/// - Short-circuit words already in the vocabulary
/// - Scan the vocabulary for the minimal-edit-distance match within a bound
/// - Fall back to the unchanged input when nothing is close enough
///
/// # Notes
/// - The scan is brute force over the whole vocabulary, parallelized over
///   entries. The comparator is a total order on `(distance, word)`, so
///   the selected match does not depend on scan order.
/// - Holds a shared read-only handle to the model; safe to query
///   concurrently without locking.
pub struct Corrector {
	model: Arc<FrequencyModel>,
}

impl Corrector {
	/// Default edit-distance bound for corrections.
	pub const DEFAULT_MAX_DISTANCE: usize = 2;

	/// Creates a corrector over a trained model.
	pub fn new(model: Arc<FrequencyModel>) -> Self {
		Self { model }
	}

	/// Corrects `word` to the closest vocabulary entry within `max_distance`.
	///
	/// # Behavior
	/// - The input is lowercased first.
	/// - A word already in the vocabulary is returned unchanged.
	/// - Otherwise the vocabulary entry with minimal Levenshtein distance
	///   within the bound wins; equal distances are broken by the
	///   lexicographically smallest candidate.
	/// - With no candidate within the bound, the lowercased input is
	///   returned unchanged. Correction never fails.
	pub fn autocorrect(&self, word: &str, max_distance: usize) -> String {
		let word = word.to_lowercase();
		if self.model.contains(&word) {
			return word;
		}

		let closest = self
			.model
			.vocabulary_set()
			.par_iter()
			.filter_map(|entry| {
				let dist = bounded_levenshtein(&word, entry, max_distance);
				if dist <= max_distance {
					Some((dist, entry.as_str()))
				} else {
					None
				}
			})
			.min_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

		match closest {
			Some((_, entry)) => entry.to_owned(),
			None => word,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::trainer::Trainer;

	fn corrector(words: &[&str]) -> Corrector {
		let mut model = FrequencyModel::new();
		for word in words {
			model.add_to_vocabulary(word);
		}
		Corrector::new(Arc::new(model))
	}

	#[test]
	fn test_bounded_levenshtein() {
		assert_eq!(bounded_levenshtein("kitten", "sitting", 3), 3);
		assert_eq!(bounded_levenshtein("flaw", "lawn", 2), 2);
		assert_eq!(bounded_levenshtein("same", "same", 0), 0);
		// real distance = 3, bound = 2  ⇒  function must bail out (> bound)
		assert!(bounded_levenshtein("kitten", "sitting", 2) > 2);
	}

	#[test]
	fn test_vocabulary_word_is_returned_unchanged() {
		let c = corrector(&["cat", "cap", "bat"]);
		assert_eq!(c.autocorrect("cat", 2), "cat");
		assert_eq!(c.autocorrect("CAT", 2), "cat");
	}

	#[test]
	fn test_equal_distances_break_lexicographically() {
		let c = corrector(&["cat", "cap", "bat"]);
		// "cot" is at distance 1 from all three entries.
		assert_eq!(c.autocorrect("cot", 1), "bat");
	}

	#[test]
	fn test_closer_candidate_beats_lexicographic_order() {
		let c = corrector(&["spelling", "spilling", "aspersion"]);
		assert_eq!(c.autocorrect("speling", 2), "spelling");
	}

	#[test]
	fn test_out_of_bound_input_is_returned_unchanged() {
		let c = corrector(&["cat", "cap", "bat"]);
		assert_eq!(c.autocorrect("cot", 0), "cot");
		assert_eq!(c.autocorrect("xylophone", 2), "xylophone");
	}

	#[test]
	fn test_autocorrect_is_idempotent() {
		let c = corrector(&["cat", "cap", "bat"]);
		for word in ["cot", "CAT", "xylophone"] {
			let once = c.autocorrect(word, 2);
			assert_eq!(c.autocorrect(&once, 2), once);
		}
	}

	#[test]
	fn test_corrector_over_trained_model() {
		let model = Arc::new(Trainer::train(["the cat sat on the mat"]));
		let c = Corrector::new(model);
		assert_eq!(c.autocorrect("mat", 2), "mat");
		assert_eq!(c.autocorrect("hat", 1), "cat");
	}
}
