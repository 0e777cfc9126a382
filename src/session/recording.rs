//! Recording Session Container
//!
//! Defines the serialization format for captured sessions: the two
//! time-ordered streams (frames, input events) plus metadata.

use crate::session::types::{EventKind, Frame, TriggerEvent};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Current session file format version
pub const CURRENT_FORMAT_VERSION: &str = "1.0";

/// Session metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionMetadata {
    /// Unique session ID
    pub id: Uuid,
    /// Session name
    pub name: String,
    /// Wall-clock creation time
    pub created_at: DateTime<Utc>,
    /// Capture source hint (host name, recorder id), when known
    pub source: Option<String>,
    /// Version of the session file format
    pub format_version: String,
}

impl SessionMetadata {
    /// Create new metadata for a session
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
            source: None,
            format_version: CURRENT_FORMAT_VERSION.to_string(),
        }
    }
}

impl Default for SessionMetadata {
    fn default() -> Self {
        Self::new("untitled")
    }
}

/// A complete recorded session: frames and input events on one clock.
///
/// Both streams are expected in ascending timestamp order; capture writes
/// them that way, and [`sort_by_timestamp`](Self::sort_by_timestamp)
/// restores the order for files from other tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingSession {
    /// Session metadata
    pub metadata: SessionMetadata,
    /// Captured frames, ascending by timestamp
    #[serde(default)]
    pub frames: Vec<Frame>,
    /// Input events, ascending by timestamp
    #[serde(default)]
    pub events: Vec<TriggerEvent>,
}

impl RecordingSession {
    /// Create a new empty session
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            metadata: SessionMetadata::new(name),
            frames: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Create a session from already-captured streams
    pub fn with_streams(
        name: impl Into<String>,
        frames: Vec<Frame>,
        events: Vec<TriggerEvent>,
    ) -> Self {
        Self {
            metadata: SessionMetadata::new(name),
            frames,
            events,
        }
    }

    /// Append a frame
    pub fn add_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Append an input event
    pub fn add_event(&mut self, event: TriggerEvent) {
        self.events.push(event);
    }

    /// Number of captured frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Number of input events
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Check if the session has no data at all
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty() && self.events.is_empty()
    }

    /// Session-clock span in seconds, from the earliest to the latest
    /// timestamp across both streams. Empty sessions have duration 0.
    pub fn duration(&self) -> f64 {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for t in self
            .frames
            .iter()
            .map(|f| f.timestamp)
            .chain(self.events.iter().map(|e| e.timestamp))
        {
            lo = lo.min(t);
            hi = hi.max(t);
        }
        if hi > lo {
            hi - lo
        } else {
            0.0
        }
    }

    /// Get events by kind filter
    pub fn events_of_kind(&self, kind: EventKind) -> Vec<&TriggerEvent> {
        self.events.iter().filter(|e| e.kind == kind).collect()
    }

    /// Get click events only
    pub fn click_events(&self) -> Vec<&TriggerEvent> {
        self.events_of_kind(EventKind::MouseClick)
    }

    /// Get keyboard events only
    pub fn keyboard_events(&self) -> Vec<&TriggerEvent> {
        self.events.iter().filter(|e| e.kind.is_keyboard()).collect()
    }

    /// Restore ascending timestamp order on both streams (stable sort)
    pub fn sort_by_timestamp(&mut self) {
        self.frames
            .sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
        self.events
            .sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
    }

    /// Save the session to a JSON file, creating parent directories
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a session from a JSON file.
    ///
    /// Logs a warning if the file was saved with an unknown format version,
    /// but still attempts to deserialize it (forward-compatible via
    /// `#[serde(default)]`).
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let session: RecordingSession = serde_json::from_str(&content)?;
        if session.metadata.format_version != CURRENT_FORMAT_VERSION {
            tracing::warn!(
                name = %session.metadata.name,
                found = %session.metadata.format_version,
                expected = CURRENT_FORMAT_VERSION,
                "Session has different format version; some fields may use default values"
            );
        }
        Ok(session)
    }
}

impl Default for RecordingSession {
    fn default() -> Self {
        Self::new("untitled")
    }
}
