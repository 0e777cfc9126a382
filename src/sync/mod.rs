//! Frame/Event Synchronization
//!
//! Turns the two raw session streams into keyframe pairs ready for
//! labeling.

pub mod keyframe;

pub use keyframe::{KeyframeSynchronizer, SyncConfig};
