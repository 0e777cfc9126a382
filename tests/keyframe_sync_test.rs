//! Integration tests for keyframe synchronization
//!
//! These tests verify the frame/event alignment stage:
//! - Before-frame selection (tolerance window, fallback, skip)
//! - After-frame selection (settle delay, fallback, degenerate pairs)
//! - Event filtering by trigger kind and order preservation

use routine_miner::session::{
    EventKind, Frame, MouseButton, RecordingSession, TriggerEvent,
};
use routine_miner::sync::{KeyframeSynchronizer, SyncConfig};
use std::collections::HashSet;

// ============================================================================
// Helper Functions
// ============================================================================

/// Create blank frames at the given timestamps
fn make_frames(timestamps: &[f64]) -> Vec<Frame> {
    timestamps.iter().map(|&t| Frame::blank(t)).collect()
}

/// Create a click event at the given timestamp
fn make_click(timestamp: f64) -> TriggerEvent {
    TriggerEvent::click(timestamp, 100, 200, MouseButton::Left)
}

/// Create a synchronizer with explicit tolerance and settle delay
fn make_synchronizer(tolerance: f64, after_delay: f64) -> KeyframeSynchronizer {
    let config = SyncConfig {
        tolerance,
        after_delay,
        ..Default::default()
    };
    KeyframeSynchronizer::with_config(config).unwrap()
}

// ============================================================================
// Before-Frame Selection
// ============================================================================

#[test]
fn test_before_frame_prefers_closest_within_tolerance() {
    let frames = make_frames(&[0.0, 1.0, 2.0, 3.0, 4.0]);
    let events = vec![make_click(2.05)];

    let sync = make_synchronizer(0.1, 0.3);
    let pairs = sync.synchronize(&frames, &events);

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].before.timestamp, 2.0);
    assert_eq!(pairs[0].after.timestamp, 3.0);
    assert!(!pairs[0].is_degenerate());
}

#[test]
fn test_before_frame_tie_prefers_earlier() {
    // Both frames are exactly 1.0s from the event
    let frames = make_frames(&[1.0, 3.0]);
    let events = vec![make_click(2.0)];

    let sync = make_synchronizer(1.0, 0.3);
    let pairs = sync.synchronize(&frames, &events);

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].before.timestamp, 1.0);
}

#[test]
fn test_before_frame_tolerance_boundary_is_inclusive() {
    let frames = make_frames(&[1.9, 2.1]);
    let events = vec![make_click(2.0)];

    let sync = make_synchronizer(0.1, 0.3);
    let pairs = sync.synchronize(&frames, &events);

    // Both frames sit exactly at the tolerance edge; the tie goes to 1.9
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].before.timestamp, 1.9);
}

#[test]
fn test_before_frame_falls_back_to_latest_at_or_before() {
    // No frame within tolerance of the event at 3.0
    let frames = make_frames(&[0.0, 5.0]);
    let events = vec![make_click(3.0)];

    let sync = make_synchronizer(0.1, 0.3);
    let pairs = sync.synchronize(&frames, &events);

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].before.timestamp, 0.0);
    assert_eq!(pairs[0].after.timestamp, 5.0);
}

#[test]
fn test_event_skipped_when_no_frame_at_or_before() {
    // Event fires before the first frame and outside tolerance
    let frames = make_frames(&[2.0, 3.0]);
    let events = vec![make_click(1.0)];

    let sync = make_synchronizer(0.5, 0.3);
    let pairs = sync.synchronize(&frames, &events);

    assert!(pairs.is_empty());
}

#[test]
fn test_event_before_first_frame_within_tolerance_pairs() {
    // Event fires just before the first frame but within tolerance
    let frames = make_frames(&[1.05, 2.0]);
    let events = vec![make_click(1.0)];

    let sync = make_synchronizer(0.1, 0.3);
    let pairs = sync.synchronize(&frames, &events);

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].before.timestamp, 1.05);
}

// ============================================================================
// After-Frame Selection
// ============================================================================

#[test]
fn test_after_frame_waits_for_settle_delay() {
    let frames = make_frames(&[0.0, 1.0, 1.1, 1.2, 1.3, 2.0]);
    let events = vec![make_click(1.0)];

    let sync = make_synchronizer(0.1, 0.3);
    let pairs = sync.synchronize(&frames, &events);

    // First frame at or past 1.0 + 0.3
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].after.timestamp, 1.3);
}

#[test]
fn test_after_frame_settle_boundary_is_inclusive() {
    let frames = make_frames(&[3.0, 3.3]);
    let events = vec![make_click(3.0)];

    let sync = make_synchronizer(0.1, 0.3);
    let pairs = sync.synchronize(&frames, &events);

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].after.timestamp, 3.3);
}

#[test]
fn test_after_frame_falls_back_to_latest_later_frame() {
    // No frame reaches the settle delay, but frames do follow the event
    let frames = make_frames(&[0.0, 0.1, 0.2]);
    let events = vec![make_click(0.05)];

    let sync = make_synchronizer(0.1, 0.3);
    let pairs = sync.synchronize(&frames, &events);

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].before.timestamp, 0.0);
    assert_eq!(pairs[0].after.timestamp, 0.2);
    assert!(!pairs[0].is_degenerate());
}

#[test]
fn test_sparse_capture_brackets_early_click() {
    // Two frames bracket a click near the session start
    let frames = make_frames(&[0.0, 0.3]);
    let events = vec![make_click(0.05)];

    let sync = make_synchronizer(0.1, 0.3);
    let pairs = sync.synchronize(&frames, &events);

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].before.timestamp, 0.0);
    assert_eq!(pairs[0].after.timestamp, 0.3);
}

#[test]
fn test_custom_after_delay_widens_settle_window() {
    let frames = make_frames(&[0.0, 1.0, 2.0, 3.0]);
    let events = vec![make_click(0.5)];

    let sync = make_synchronizer(0.1, 1.0);
    let pairs = sync.synchronize(&frames, &events);

    // First frame at or past 0.5 + 1.0
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].after.timestamp, 2.0);
}

#[test]
fn test_after_degenerates_to_before_at_session_end() {
    // Nothing follows the event at all
    let frames = make_frames(&[0.0, 1.0]);
    let events = vec![make_click(1.0)];

    let sync = make_synchronizer(0.1, 0.3);
    let pairs = sync.synchronize(&frames, &events);

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].before.timestamp, 1.0);
    assert_eq!(pairs[0].after.timestamp, 1.0);
    assert!(pairs[0].is_degenerate());
}

#[test]
fn test_single_frame_session_degenerates() {
    let frames = make_frames(&[0.0]);
    let events = vec![make_click(5.0)];

    let sync = make_synchronizer(0.1, 0.3);
    let pairs = sync.synchronize(&frames, &events);

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].before.timestamp, 0.0);
    assert_eq!(pairs[0].after.timestamp, 0.0);
    assert!(pairs[0].is_degenerate());
}

#[test]
fn test_event_past_all_frames_is_degenerate() {
    let frames = make_frames(&[0.0, 1.0]);
    let events = vec![make_click(5.0)];

    let sync = make_synchronizer(0.1, 0.3);
    let pairs = sync.synchronize(&frames, &events);

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].before.timestamp, 1.0);
    assert_eq!(pairs[0].after.timestamp, 1.0);
    assert!(pairs[0].is_degenerate());
}

// ============================================================================
// Filtering and Order
// ============================================================================

#[test]
fn test_non_trigger_events_ignored() {
    let frames = make_frames(&[0.0, 1.0, 2.0, 3.0]);
    let events = vec![
        make_click(1.0),
        TriggerEvent::key_press(1.5, "a"),
        TriggerEvent::mouse_move(1.8, 500, 500),
        make_click(2.0),
    ];

    // Default config pairs clicks only
    let sync = KeyframeSynchronizer::new();
    let pairs = sync.synchronize(&frames, &events);

    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].trigger.timestamp, 1.0);
    assert_eq!(pairs[1].trigger.timestamp, 2.0);
}

#[test]
fn test_custom_trigger_kinds() {
    let frames = make_frames(&[0.0, 1.0, 2.0, 3.0]);
    let events = vec![
        make_click(1.0),
        TriggerEvent::key_press(1.5, "Enter"),
        make_click(2.0),
    ];

    let mut trigger_kinds = HashSet::new();
    trigger_kinds.insert(EventKind::KeyPress);
    let config = SyncConfig {
        trigger_kinds,
        ..Default::default()
    };
    let sync = KeyframeSynchronizer::with_config(config).unwrap();
    let pairs = sync.synchronize(&frames, &events);

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].trigger.timestamp, 1.5);
    assert_eq!(pairs[0].trigger.kind, EventKind::KeyPress);
}

#[test]
fn test_pairs_follow_event_order() {
    let frames = make_frames(&[0.0, 1.0, 2.0, 3.0, 4.0]);
    let events = vec![make_click(0.5), make_click(1.5), make_click(2.5)];

    let sync = make_synchronizer(0.1, 0.3);
    let pairs = sync.synchronize(&frames, &events);

    let triggers: Vec<f64> = pairs.iter().map(|p| p.trigger.timestamp).collect();
    assert_eq!(triggers, vec![0.5, 1.5, 2.5]);
}

#[test]
fn test_empty_frames_yield_no_pairs() {
    let events = vec![make_click(1.0), make_click(2.0)];

    let sync = KeyframeSynchronizer::new();
    let pairs = sync.synchronize(&[], &events);

    assert!(pairs.is_empty());
}

#[test]
fn test_empty_events_yield_no_pairs() {
    let frames = make_frames(&[0.0, 1.0, 2.0]);

    let sync = KeyframeSynchronizer::new();
    let pairs = sync.synchronize(&frames, &[]);

    assert!(pairs.is_empty());
}

#[test]
fn test_skipped_events_do_not_disturb_later_pairs() {
    // First event has no frame at or before it; second pairs normally
    let frames = make_frames(&[2.0, 3.0, 4.0]);
    let events = vec![make_click(0.5), make_click(3.0)];

    let sync = make_synchronizer(0.1, 0.3);
    let pairs = sync.synchronize(&frames, &events);

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].trigger.timestamp, 3.0);
    assert_eq!(pairs[0].before.timestamp, 3.0);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_negative_tolerance_rejected() {
    let config = SyncConfig {
        tolerance: -0.1,
        ..Default::default()
    };
    let result = KeyframeSynchronizer::with_config(config);
    assert!(matches!(result, Err(routine_miner::Error::Config(_))));
}

#[test]
fn test_non_finite_after_delay_rejected() {
    let config = SyncConfig {
        after_delay: f64::NAN,
        ..Default::default()
    };
    assert!(KeyframeSynchronizer::with_config(config).is_err());

    let config = SyncConfig {
        after_delay: f64::INFINITY,
        ..Default::default()
    };
    assert!(KeyframeSynchronizer::with_config(config).is_err());
}

#[test]
fn test_zero_tolerance_and_delay_accepted() {
    let config = SyncConfig {
        tolerance: 0.0,
        after_delay: 0.0,
        ..Default::default()
    };
    let sync = KeyframeSynchronizer::with_config(config).unwrap();

    // Zero tolerance pairs only exact timestamp matches directly
    let frames = make_frames(&[1.0, 2.0]);
    let events = vec![make_click(1.0)];
    let pairs = sync.synchronize(&frames, &events);

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].before.timestamp, 1.0);
}

// ============================================================================
// Session Extraction
// ============================================================================

#[test]
fn test_extract_matches_synchronize() {
    let frames = make_frames(&[0.0, 1.0, 2.0, 3.0]);
    let events = vec![make_click(0.5), make_click(2.5)];
    let session = RecordingSession::with_streams("extract-test", frames.clone(), events.clone());

    let sync = KeyframeSynchronizer::new();
    let from_session = sync.extract(&session);
    let from_streams = sync.synchronize(&frames, &events);

    assert_eq!(from_session, from_streams);
    assert_eq!(from_session.len(), 2);
}
