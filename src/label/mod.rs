//! Action Labeling Model
//!
//! The vocabulary shared by labelers and the pattern miner: labeled
//! actions and their mining identity.

pub mod action;

pub use action::{sequences_match, ActionKey, ActionType, LabeledAction};
