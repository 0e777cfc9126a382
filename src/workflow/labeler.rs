//! Action Labeling Seam
//!
//! Labeling is the one pipeline stage this crate does not perform itself:
//! turning a before/after frame bracket into a semantic action requires a
//! vision model. The [`Labeler`] trait is the seam that stage plugs into,
//! and [`ScriptedLabeler`] is a deterministic implementation for demos
//! and tests.

use crate::label::LabeledAction;
use crate::session::{KeyframePair, TriggerEvent};

/// Turns keyframe pairs into labeled actions.
///
/// Implementations must return exactly one action per pair, in pair
/// order; the pipeline rejects any other shape.
pub trait Labeler {
    /// Label every keyframe pair
    fn label(&self, pairs: &[KeyframePair]) -> crate::Result<Vec<LabeledAction>>;
}

#[derive(Debug, Clone)]
struct ScriptStep {
    action: String,
    target: String,
    description: String,
}

/// A labeler that cycles through a fixed script of labels.
///
/// Each pair receives the next script entry, wrapping around at the end.
/// The action context is taken from the pair's trigger event when the
/// recorder captured one.
#[derive(Debug, Clone)]
pub struct ScriptedLabeler {
    script: Vec<ScriptStep>,
}

impl ScriptedLabeler {
    /// Create a labeler with the default save/confirm script
    pub fn new() -> Self {
        Self::with_script(&[
            ("click", "Save button", "Save the current document"),
            ("click", "Confirm button", "Confirm the save dialog"),
        ])
    }

    /// Create a labeler with a custom `(action, target, description)`
    /// script. An empty script falls back to the default.
    pub fn with_script(steps: &[(&str, &str, &str)]) -> Self {
        if steps.is_empty() {
            return Self::new();
        }
        Self {
            script: steps
                .iter()
                .map(|(action, target, description)| ScriptStep {
                    action: (*action).to_string(),
                    target: (*target).to_string(),
                    description: (*description).to_string(),
                })
                .collect(),
        }
    }

    fn context_of(event: &TriggerEvent) -> String {
        match (&event.app_name, &event.window_title) {
            (Some(app), Some(window)) => format!("{}/{}", app, window),
            (Some(app), None) => app.clone(),
            _ => "Desktop".to_string(),
        }
    }
}

impl Default for ScriptedLabeler {
    fn default() -> Self {
        Self::new()
    }
}

impl Labeler for ScriptedLabeler {
    fn label(&self, pairs: &[KeyframePair]) -> crate::Result<Vec<LabeledAction>> {
        Ok(pairs
            .iter()
            .enumerate()
            .map(|(i, pair)| {
                let step = &self.script[i % self.script.len()];
                LabeledAction::new(
                    step.action.as_str(),
                    step.target.as_str(),
                    Self::context_of(&pair.trigger),
                    step.description.as_str(),
                )
            })
            .collect())
    }
}
