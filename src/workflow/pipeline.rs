//! Session Analysis Pipeline
//!
//! Orchestrates the full pass over one recorded session:
//!
//! ```text
//! session → keyframe pairs → labeled actions → patterns → report
//! ```
//!
//! The labeler is injected through the [`Labeler`] trait; everything else
//! is owned by the pipeline. Sessions that produce no pairs or no
//! patterns yield an empty report rather than an error, so batch callers
//! can tell "nothing repeated" apart from "something broke".

use crate::app::Config;
use crate::label::LabeledAction;
use crate::patterns::{Pattern, PatternDetector};
use crate::session::RecordingSession;
use crate::sync::KeyframeSynchronizer;
use crate::workflow::labeler::Labeler;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

/// Result of one pipeline pass over a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    /// ID of the analyzed session
    pub session_id: Uuid,
    /// Name of the analyzed session
    pub session_name: String,
    /// When the analysis ran
    pub generated_at: DateTime<Utc>,
    /// Frames in the source session
    pub frame_count: usize,
    /// Input events in the source session
    pub event_count: usize,
    /// Keyframe pairs extracted
    pub pair_count: usize,
    /// Labeled actions, one per pair
    pub actions: Vec<LabeledAction>,
    /// Detected patterns
    pub patterns: Vec<Pattern>,
}

impl PipelineReport {
    /// Whether the pass found anything automatable
    pub fn has_patterns(&self) -> bool {
        !self.patterns.is_empty()
    }

    /// Multi-line human-readable summary
    pub fn summary(&self) -> String {
        let mut out = format!(
            "Session: {} ({})\n  Frames:   {}\n  Events:   {}\n  Pairs:    {}\n  Actions:  {}\n  Patterns: {}",
            self.session_name,
            self.session_id,
            self.frame_count,
            self.event_count,
            self.pair_count,
            self.actions.len(),
            self.patterns.len()
        );
        for pattern in &self.patterns {
            out.push_str(&format!("\n    {} {}", pattern.id(), pattern));
        }
        out
    }
}

/// Runs the session analysis stages in order
pub struct SessionPipeline {
    synchronizer: KeyframeSynchronizer,
    detector: PatternDetector,
}

impl SessionPipeline {
    /// Create a pipeline with default components
    pub fn new() -> Self {
        Self {
            synchronizer: KeyframeSynchronizer::new(),
            detector: PatternDetector::new(),
        }
    }

    /// Create a pipeline from explicit components
    pub fn with_components(synchronizer: KeyframeSynchronizer, detector: PatternDetector) -> Self {
        Self {
            synchronizer,
            detector,
        }
    }

    /// Create a pipeline from application configuration
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        Ok(Self {
            synchronizer: KeyframeSynchronizer::with_config(config.sync_config())?,
            detector: PatternDetector::with_config(config.detector_config())?,
        })
    }

    /// Analyze one session with the given labeler.
    ///
    /// Fails only when the labeler fails or returns the wrong number of
    /// actions; degenerate sessions produce an empty report.
    pub fn run(&self, session: &RecordingSession, labeler: &dyn Labeler) -> crate::Result<PipelineReport> {
        info!(
            session = %session.metadata.name,
            frames = session.frame_count(),
            events = session.event_count(),
            "Extracting keyframes"
        );
        let pairs = self.synchronizer.extract(session);
        info!(pairs = pairs.len(), "Keyframe extraction complete");

        if pairs.is_empty() {
            warn!(
                session = %session.metadata.name,
                "No keyframe pairs extracted; nothing to label"
            );
            return Ok(self.report(session, 0, Vec::new(), Vec::new()));
        }

        let actions = labeler.label(&pairs)?;
        if actions.len() != pairs.len() {
            return Err(crate::Error::Labeling(format!(
                "Labeler returned {} actions for {} pairs",
                actions.len(),
                pairs.len()
            )));
        }
        info!(actions = actions.len(), "Labeling complete");

        let patterns = self.detector.detect(&actions);
        info!(patterns = patterns.len(), "Pattern detection complete");

        Ok(self.report(session, pairs.len(), actions, patterns))
    }

    fn report(
        &self,
        session: &RecordingSession,
        pair_count: usize,
        actions: Vec<LabeledAction>,
        patterns: Vec<Pattern>,
    ) -> PipelineReport {
        PipelineReport {
            session_id: session.metadata.id,
            session_name: session.metadata.name.clone(),
            generated_at: Utc::now(),
            frame_count: session.frame_count(),
            event_count: session.event_count(),
            pair_count,
            actions,
            patterns,
        }
    }
}

impl Default for SessionPipeline {
    fn default() -> Self {
        Self::new()
    }
}
