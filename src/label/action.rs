//! Labeled Action Model
//!
//! A labeled action is the semantic description of one keyframe pair:
//! what the user did, to what, and where. Pattern mining compares actions
//! through [`ActionKey`], which deliberately ignores context and prose so
//! that "Save in report.doc" and "Save in notes.doc" count as the same
//! step.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad classification of a labeled action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Click,
    Type,
    Copy,
    Paste,
    Scroll,
    Navigate,
    Select,
    Drag,
}

fn default_confidence() -> f32 {
    1.0
}

/// A semantically labeled user action derived from a keyframe pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledAction {
    /// Verb describing the action ("click", "type", ...)
    pub action: String,
    /// What the action operated on ("Save button", "search field", ...)
    pub target: String,
    /// Where it happened, as "app" or "app/window title"
    pub context: String,
    /// Free-form description of the action
    pub description: String,
    /// UI state before the action, when the labeler reports it
    #[serde(default)]
    pub before_state: Option<String>,
    /// UI state after the action
    #[serde(default)]
    pub after_state: Option<String>,
    /// What changed between the two states
    #[serde(default)]
    pub state_change: Option<String>,
    /// Labeler confidence in [0, 1]
    #[serde(default = "default_confidence")]
    pub confidence: f32,
}

impl LabeledAction {
    /// Create a new labeled action
    pub fn new(
        action: impl Into<String>,
        target: impl Into<String>,
        context: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            target: target.into(),
            context: context.into(),
            description: description.into(),
            before_state: None,
            after_state: None,
            state_change: None,
            confidence: 1.0,
        }
    }

    /// Attach before/after state descriptions
    pub fn with_states(
        mut self,
        before: impl Into<String>,
        after: impl Into<String>,
        change: impl Into<String>,
    ) -> Self {
        self.before_state = Some(before.into());
        self.after_state = Some(after.into());
        self.state_change = Some(change.into());
        self
    }

    /// Set the labeler confidence
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    /// The identity used by pattern mining: action verb and target only
    pub fn key(&self) -> ActionKey<'_> {
        ActionKey {
            action: &self.action,
            target: &self.target,
        }
    }

    /// Whether two actions are the same step for mining purposes
    pub fn matches(&self, other: &LabeledAction) -> bool {
        self.key() == other.key()
    }

    /// Classify the action verb. Unrecognized verbs fall back to `Click`,
    /// the most common desktop action.
    pub fn action_type(&self) -> ActionType {
        match self.action.to_lowercase().as_str() {
            "type" => ActionType::Type,
            "copy" => ActionType::Copy,
            "paste" => ActionType::Paste,
            "scroll" => ActionType::Scroll,
            "navigate" => ActionType::Navigate,
            "select" => ActionType::Select,
            "drag" => ActionType::Drag,
            _ => ActionType::Click,
        }
    }

    /// Application part of the context ("app" in "app/window title")
    pub fn app(&self) -> &str {
        match self.context.split_once('/') {
            Some((app, _)) => app,
            None => &self.context,
        }
    }

    /// Window part of the context, when present
    pub fn app_context(&self) -> Option<&str> {
        self.context.split_once('/').map(|(_, window)| window)
    }
}

impl fmt::Display for LabeledAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.action, self.target, self.context)
    }
}

/// Borrowed mining identity of an action.
///
/// Two actions with equal keys are interchangeable steps, regardless of
/// context, description, states, or confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionKey<'a> {
    pub action: &'a str,
    pub target: &'a str,
}

/// Whether two action sequences match position by position
pub fn sequences_match(a: &[LabeledAction], b: &[LabeledAction]) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.matches(y))
}
