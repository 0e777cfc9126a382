//! Sequence Similarity
//!
//! Fuzzy comparison of action sequences, for spotting near-miss variants
//! that exact mining cannot group. Sequences are flattened to their
//! display strings and compared with normalized Levenshtein distance.

use crate::label::{sequences_match, LabeledAction};

/// A pair of equally long subsequences that look alike
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarRegion {
    /// Half-open index range of the first subsequence
    pub first: (usize, usize),
    /// Half-open index range of the second subsequence
    pub second: (usize, usize),
    /// Similarity score in [0, 1]
    pub similarity: f64,
}

/// Similarity of two action sequences in [0, 1].
///
/// Either sequence being empty scores 0. Identical sequences score 1.
pub fn sequence_similarity(a: &[LabeledAction], b: &[LabeledAction]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let flat_a = flatten(a);
    let flat_b = flatten(b);
    strsim::normalized_levenshtein(&flat_a, &flat_b)
}

/// Whether two sequences are the same steps, position by position
pub fn exact_sequence_match(a: &[LabeledAction], b: &[LabeledAction]) -> bool {
    sequences_match(a, b)
}

/// Find all pairs of equally long, disjoint subsequences whose
/// similarity reaches `threshold`. The second window of a pair always
/// starts at or after the end of the first.
///
/// Window lengths range from `min_length` up to half the input.
pub fn find_similar_subsequences(
    actions: &[LabeledAction],
    min_length: usize,
    threshold: f64,
) -> Vec<SimilarRegion> {
    let n = actions.len();
    let mut regions = Vec::new();

    for length in min_length..=n / 2 {
        for i in 0..=(n - length) {
            for j in (i + length)..=(n - length) {
                let sim = sequence_similarity(&actions[i..i + length], &actions[j..j + length]);
                if sim >= threshold {
                    regions.push(SimilarRegion {
                        first: (i, i + length),
                        second: (j, j + length),
                        similarity: sim,
                    });
                }
            }
        }
    }

    regions
}

fn flatten(actions: &[LabeledAction]) -> String {
    actions
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join("|")
}
