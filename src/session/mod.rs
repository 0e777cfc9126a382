//! Session Data Model
//!
//! Types for recorded desktop sessions: timestamped frames, input
//! events, keyframe pairs, and the on-disk session container.

pub mod recording;
pub mod types;

pub use recording::{RecordingSession, SessionMetadata, CURRENT_FORMAT_VERSION};
pub use types::{EventKind, Frame, FrameImage, KeyframePair, MouseButton, TriggerEvent};
