//! Pattern Mining
//!
//! Detects repeated action sequences in labeled sessions, exactly and
//! fuzzily.

pub mod detector;
pub mod model;
pub mod similarity;

pub use detector::{DetectorConfig, PatternDetector};
pub use model::Pattern;
pub use similarity::{
    exact_sequence_match, find_similar_subsequences, sequence_similarity, SimilarRegion,
};
