//! Keyframe Synchronization
//!
//! Aligns the frame stream with the input event stream: for every trigger
//! event, pick the frame showing the screen as the user saw it when they
//! acted (before), and the frame showing the result once the UI settled
//! (after).
//!
//! Frame timestamps rarely coincide with event timestamps, so selection
//! is tolerance-based:
//!
//! - **before**: the frame closest to the trigger within `tolerance`
//!   seconds (earliest wins a tie), falling back to the most recent frame
//!   at or before the trigger. Events with no frame at or before them are
//!   skipped.
//! - **after**: the first frame at or past `trigger + after_delay`,
//!   falling back to the last frame if it is still past the trigger, and
//!   degenerating to the before frame otherwise.
//!
//! Both lookups binary-search the sorted frame stream, so a pass over a
//! session is O(events * log frames).

use crate::session::{EventKind, Frame, KeyframePair, RecordingSession, TriggerEvent};
use std::collections::HashSet;

/// Configuration for keyframe synchronization
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Event kinds that produce keyframe pairs
    pub trigger_kinds: HashSet<EventKind>,
    /// Maximum |frame - trigger| distance, in seconds, for the primary
    /// before-frame match
    pub tolerance: f64,
    /// How long after the trigger the UI is assumed to have settled,
    /// in seconds
    pub after_delay: f64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        let mut trigger_kinds = HashSet::new();
        trigger_kinds.insert(EventKind::MouseClick);
        Self {
            trigger_kinds,
            tolerance: 0.1,
            after_delay: 0.3,
        }
    }
}

impl SyncConfig {
    /// Validate configuration values
    pub fn validate(&self) -> crate::Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(crate::Error::Config(format!(
                "Invalid tolerance: {} (must be a non-negative number)",
                self.tolerance
            )));
        }
        if !self.after_delay.is_finite() || self.after_delay < 0.0 {
            return Err(crate::Error::Config(format!(
                "Invalid after_delay: {} (must be a non-negative number)",
                self.after_delay
            )));
        }
        Ok(())
    }
}

/// Pairs trigger events with their before/after frames.
///
/// Synchronization is pure: the same frames and events always produce the
/// same pairs, in trigger order, and never more pairs than trigger events.
pub struct KeyframeSynchronizer {
    config: SyncConfig,
}

impl KeyframeSynchronizer {
    /// Create a synchronizer with default configuration
    pub fn new() -> Self {
        Self {
            config: SyncConfig::default(),
        }
    }

    /// Create a synchronizer with custom configuration
    pub fn with_config(config: SyncConfig) -> crate::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the active configuration
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Pair every trigger event with its keyframes.
    ///
    /// `frames` and `events` must be in ascending timestamp order. Events
    /// whose kind is not in `trigger_kinds` are ignored; events with no
    /// frame at or before them are skipped.
    pub fn synchronize(&self, frames: &[Frame], events: &[TriggerEvent]) -> Vec<KeyframePair> {
        let mut pairs = Vec::new();
        if frames.is_empty() {
            return pairs;
        }

        for event in events {
            if !self.config.trigger_kinds.contains(&event.kind) {
                continue;
            }
            let Some(before) = self.before_frame(frames, event.timestamp) else {
                tracing::debug!(
                    timestamp = event.timestamp,
                    "No frame at or before trigger; skipping event"
                );
                continue;
            };
            let after = self.after_frame(frames, event.timestamp).unwrap_or(before);
            pairs.push(KeyframePair::new(
                before.clone(),
                after.clone(),
                event.clone(),
            ));
        }

        pairs
    }

    /// Extract keyframe pairs from a recorded session
    pub fn extract(&self, session: &RecordingSession) -> Vec<KeyframePair> {
        self.synchronize(&session.frames, &session.events)
    }

    /// The frame showing the screen when the user triggered: closest
    /// within tolerance (earliest on a tie), else most recent at or
    /// before the trigger.
    fn before_frame<'a>(&self, frames: &'a [Frame], ts: f64) -> Option<&'a Frame> {
        let tol = self.config.tolerance;
        let lo = frames.partition_point(|f| f.timestamp < ts - tol);
        let hi = frames.partition_point(|f| f.timestamp <= ts + tol);
        if lo < hi {
            let mut best = &frames[lo];
            for frame in &frames[lo + 1..hi] {
                if (frame.timestamp - ts).abs() < (best.timestamp - ts).abs() {
                    best = frame;
                }
            }
            return Some(best);
        }

        let prior = frames.partition_point(|f| f.timestamp <= ts);
        if prior > 0 {
            Some(&frames[prior - 1])
        } else {
            None
        }
    }

    /// The frame showing the settled result: first at or past
    /// `trigger + after_delay`, else the last frame if it is still past
    /// the trigger.
    fn after_frame<'a>(&self, frames: &'a [Frame], ts: f64) -> Option<&'a Frame> {
        let target = ts + self.config.after_delay;
        let at = frames.partition_point(|f| f.timestamp < target);
        if at < frames.len() {
            return Some(&frames[at]);
        }

        let past = frames.partition_point(|f| f.timestamp <= ts);
        if past < frames.len() {
            frames.last()
        } else {
            None
        }
    }
}

impl Default for KeyframeSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}
