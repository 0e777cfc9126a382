//! # Routine Miner
//!
//! Turns recorded desktop sessions (screen frames plus input events) into
//! candidate automation patterns: contiguous, semantically labeled action
//! sequences that repeat often enough to be worth automating.
//!
//! ## Overview
//!
//! A recording session hands over two time-ordered streams: captured frames
//! and input events. The keyframe synchronizer brackets every trigger event
//! (a mouse click, by default) with the frame just before it and the frame
//! showing its result. An external vision labeler turns each bracket into a
//! labeled action; the pattern detector then mines the action sequence for
//! repeated, non-overlapping subsequences.
//!
//! ## Quick Start
//!
//! ```
//! use routine_miner::label::LabeledAction;
//! use routine_miner::patterns::{DetectorConfig, PatternDetector};
//!
//! let save = LabeledAction::new("click", "Save button", "Editor", "Save the file");
//! let confirm = LabeledAction::new("click", "Confirm button", "Editor", "Confirm the dialog");
//!
//! // Three repetitions of the same two-step routine
//! let actions = vec![
//!     save.clone(), confirm.clone(),
//!     save.clone(), confirm.clone(),
//!     save.clone(), confirm.clone(),
//! ];
//!
//! let detector = PatternDetector::with_config(DetectorConfig {
//!     min_length: 2,
//!     min_occurrences: 3,
//! }).expect("valid config");
//!
//! let patterns = detector.detect(&actions);
//! assert_eq!(patterns.len(), 1);
//! assert_eq!(patterns[0].start_indices, vec![0, 2, 4]);
//! ```
//!
//! ## Architecture
//!
//! The system is organized into the following modules:
//!
//! - [`session`]: Frames, input events, keyframe pairs, and session files
//! - [`sync`]: Temporal keyframe synchronization (before/after brackets)
//! - [`label`]: Labeled actions and their restricted matching identity
//! - [`patterns`]: Repeated-sequence mining and sequence similarity
//! - [`workflow`]: Pipeline orchestration and the labeler seam
//! - [`app`]: CLI and configuration management
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐    ┌──────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Session   │───▶│   Keyframe   │───▶│  External   │───▶│   Pattern   │
//! │ (frames +   │    │ Synchronizer │    │   Labeler   │    │  Detector   │
//! │  events)    │    │ (pairs)      │    │ (actions)   │    │ (patterns)  │
//! └─────────────┘    └──────────────┘    └─────────────┘    └─────────────┘
//! ```
//!
//! Capture and labeling live outside this crate; both appear here only as
//! the data they hand over ([`session::RecordingSession`]) and the seam they
//! plug into ([`workflow::Labeler`]).

pub mod app;
pub mod label;
pub mod patterns;
pub mod session;
pub mod sync;
pub mod workflow;

// Re-export commonly used types
pub use label::{ActionKey, ActionType, LabeledAction};
pub use patterns::{DetectorConfig, Pattern, PatternDetector};
pub use session::{EventKind, Frame, KeyframePair, MouseButton, RecordingSession, TriggerEvent};
pub use sync::{KeyframeSynchronizer, SyncConfig};
pub use workflow::{Labeler, PipelineReport, ScriptedLabeler, SessionPipeline};

/// Result type alias for the routine miner
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the routine miner
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Labeling error: {0}")]
    Labeling(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
