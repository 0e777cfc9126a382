//! Pattern Model
//!
//! A pattern is a repeated action sequence together with every labeled
//! position it starts at.

use crate::label::LabeledAction;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A repeated action sequence found in a labeled session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pattern {
    /// The action sequence, taken from its first occurrence
    pub actions: Vec<LabeledAction>,
    /// Start index of every occurrence in the source action list,
    /// ascending
    pub start_indices: Vec<usize>,
}

impl Pattern {
    /// Create a pattern from a sequence and its occurrence positions
    pub fn new(actions: Vec<LabeledAction>, start_indices: Vec<usize>) -> Self {
        Self {
            actions,
            start_indices,
        }
    }

    /// Length of the repeated sequence
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the pattern has no actions
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// How many times the sequence occurs
    pub fn occurrences(&self) -> usize {
        self.start_indices.len()
    }

    /// Mining signature: the action keys joined as
    /// `"action:target-action:target-..."`
    pub fn signature(&self) -> String {
        self.actions
            .iter()
            .map(|a| format!("{}:{}", a.action, a.target))
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Stable identifier derived from the signature.
    ///
    /// The same sequence always hashes to the same id, so re-running
    /// detection on the same session reproduces identical ids.
    pub fn id(&self) -> String {
        let mut hasher = DefaultHasher::new();
        self.signature().hash(&mut hasher);
        format!("pattern-{:08x}", hasher.finish() & 0xFFFF_FFFF)
    }

    /// Applications involved, in first-seen order without duplicates
    pub fn apps(&self) -> Vec<String> {
        let mut apps: Vec<String> = Vec::new();
        for action in &self.actions {
            let app = action.app();
            if !apps.iter().any(|a| a == app) {
                apps.push(app.to_string());
            }
        }
        apps
    }

    /// Short human-readable name: the first app plus the first three
    /// action verbs
    pub fn name(&self) -> String {
        let app = self
            .apps()
            .into_iter()
            .next()
            .unwrap_or_else(|| "Unknown".to_string());
        let verbs = self
            .actions
            .iter()
            .take(3)
            .map(|a| a.action.as_str())
            .collect::<Vec<_>>()
            .join(" → ");
        if self.actions.len() > 3 {
            format!("{}: {}...", app, verbs)
        } else {
            format!("{}: {}", app, verbs)
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let steps = self
            .actions
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(" → ");
        write!(f, "[{}] x{}", steps, self.occurrences())
    }
}
