//! Pattern Detection
//!
//! Finds repeated action sequences in a labeled session. Two detectors
//! are exposed:
//!
//! - [`PatternDetector::detect`]: general mining. Candidate lengths are
//!   tried longest first; each candidate greedily collects
//!   non-overlapping occurrences left to right, and positions consumed
//!   by an accepted pattern are off limits to every later candidate.
//!   Sequences already contained in an accepted longer pattern are
//!   suppressed.
//! - [`PatternDetector::detect_runs`]: consecutive repetition only.
//!   A maximal run of the same action key becomes a single-action
//!   pattern with one occurrence per position.
//!
//! Actions compare by [`ActionKey`](crate::label::ActionKey): the verb
//! and target, never context or prose. Detection is deterministic and
//! the accepted patterns never overlap each other.

use crate::label::{sequences_match, LabeledAction};
use crate::patterns::model::Pattern;

/// Configuration for pattern detection
#[derive(Debug, Clone, Copy)]
pub struct DetectorConfig {
    /// Shortest sequence length worth reporting
    pub min_length: usize,
    /// Minimum number of occurrences for a sequence to count as a pattern
    pub min_occurrences: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_length: 2,
            min_occurrences: 2,
        }
    }
}

impl DetectorConfig {
    /// Validate configuration values
    pub fn validate(&self) -> crate::Result<()> {
        if self.min_length < 1 {
            return Err(crate::Error::Config(format!(
                "Invalid min_length: {} (must be at least 1)",
                self.min_length
            )));
        }
        if self.min_occurrences < 1 {
            return Err(crate::Error::Config(format!(
                "Invalid min_occurrences: {} (must be at least 1)",
                self.min_occurrences
            )));
        }
        Ok(())
    }
}

/// Mines labeled action lists for repeated sequences
pub struct PatternDetector {
    config: DetectorConfig,
}

impl PatternDetector {
    /// Create a detector with default configuration
    pub fn new() -> Self {
        Self {
            config: DetectorConfig::default(),
        }
    }

    /// Create a detector with custom configuration
    pub fn with_config(config: DetectorConfig) -> crate::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the active configuration
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Find repeated sequences, longest first.
    ///
    /// Returned patterns never overlap: every labeled position belongs to
    /// at most one occurrence of one pattern. Repeats of a sequence that
    /// is already part of an accepted longer pattern are suppressed.
    pub fn detect(&self, actions: &[LabeledAction]) -> Vec<Pattern> {
        let n = actions.len();
        let min_len = self.config.min_length;
        let min_occ = self.config.min_occurrences;

        // Too short to fit even one minimal pattern the minimal number
        // of times
        if n < min_len.saturating_mul(min_occ) {
            return Vec::new();
        }

        let max_len = n / min_occ;
        let mut used = vec![false; n];
        let mut patterns: Vec<Pattern> = Vec::new();

        for length in (min_len..=max_len).rev() {
            for start in 0..=(n - length) {
                if !span_free(&used, start, length) {
                    continue;
                }
                let candidate = &actions[start..start + length];

                // Greedy left-to-right occurrence scan; a match consumes
                // its whole span so occurrences of one pattern cannot
                // overlap each other
                let mut occurrences = vec![start];
                let mut i = start + length;
                while i + length <= n {
                    if span_free(&used, i, length)
                        && sequences_match(candidate, &actions[i..i + length])
                    {
                        occurrences.push(i);
                        i += length;
                    } else {
                        i += 1;
                    }
                }

                if occurrences.len() < min_occ {
                    continue;
                }
                if is_subpattern(&patterns, candidate) {
                    continue;
                }

                for &occ in &occurrences {
                    mark_span(&mut used, occ, length);
                }
                tracing::debug!(
                    length,
                    occurrences = occurrences.len(),
                    start,
                    "Detected repeated sequence"
                );
                patterns.push(Pattern::new(candidate.to_vec(), occurrences));
            }
        }

        patterns
    }

    /// Find maximal runs of one action repeated back to back.
    ///
    /// A run of length >= `min_occurrences` becomes a single-action
    /// pattern whose start indices are every position in the run.
    /// `min_length` does not apply here; runs are length-1 by nature.
    pub fn detect_runs(&self, actions: &[LabeledAction]) -> Vec<Pattern> {
        let mut patterns = Vec::new();
        let n = actions.len();
        let mut i = 0;
        while i < n {
            let mut j = i + 1;
            while j < n && actions[j].matches(&actions[i]) {
                j += 1;
            }
            if j - i >= self.config.min_occurrences {
                patterns.push(Pattern::new(vec![actions[i].clone()], (i..j).collect()));
            }
            i = j;
        }
        patterns
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether none of the positions in `[start, start + length)` are consumed
fn span_free(used: &[bool], start: usize, length: usize) -> bool {
    used[start..start + length].iter().all(|&u| !u)
}

/// Consume every position in `[start, start + length)`
fn mark_span(used: &mut [bool], start: usize, length: usize) {
    for slot in &mut used[start..start + length] {
        *slot = true;
    }
}

/// Whether `candidate` appears as a contiguous window of a strictly
/// longer accepted pattern
fn is_subpattern(patterns: &[Pattern], candidate: &[LabeledAction]) -> bool {
    patterns.iter().any(|p| {
        p.actions.len() > candidate.len()
            && p.actions
                .windows(candidate.len())
                .any(|w| sequences_match(w, candidate))
    })
}
