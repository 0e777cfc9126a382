//! Demo Session Generator
//!
//! Builds a synthetic session with evenly spaced frames and click events,
//! for exercising the pipeline without a real recorder.

use crate::session::{Frame, MouseButton, RecordingSession, TriggerEvent};

/// Generate a synthetic session on a zero-based clock.
///
/// Frames are spaced evenly across `duration`; events are left clicks on
/// a moving grid position, all inside the same demo window so the
/// scripted labeler produces a repeating routine.
pub fn demo_session(frame_count: usize, event_count: usize, duration: f64) -> RecordingSession {
    let mut session = RecordingSession::new("demo");
    session.metadata.source = Some("demo generator".to_string());

    for i in 0..frame_count {
        let ts = i as f64 * duration / frame_count.max(1) as f64;
        session.add_frame(Frame::blank(ts));
    }

    for i in 0..event_count {
        let ts = i as f64 * duration / event_count.max(1) as f64;
        let event = TriggerEvent::click(
            ts,
            100 + (i as i32) * 50,
            200 + (i as i32) * 30,
            MouseButton::Left,
        )
        .with_window("DemoApp", "Main Window");
        session.add_event(event);
    }

    session
}
