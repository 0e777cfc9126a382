//! Core session data types
//!
//! Frames, input events, and the keyframe pairs that bracket trigger events.
//! These are the shapes the capture subsystem hands over; everything in this
//! crate consumes them as immutable, time-ordered slices.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Input event kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    MouseClick,
    MouseMove,
    MouseScroll,
    KeyPress,
    KeyRelease,
}

impl EventKind {
    /// Check if this is a click event
    pub fn is_click(&self) -> bool {
        matches!(self, EventKind::MouseClick)
    }

    /// Check if this is any mouse event
    pub fn is_mouse(&self) -> bool {
        matches!(
            self,
            EventKind::MouseClick | EventKind::MouseMove | EventKind::MouseScroll
        )
    }

    /// Check if this is a keyboard event
    pub fn is_keyboard(&self) -> bool {
        matches!(self, EventKind::KeyPress | EventKind::KeyRelease)
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// One input occurrence: a click, key press, scroll, or cursor move.
///
/// Only `timestamp` and `kind` matter to the synchronizer; the remaining
/// fields are payload carried through to the labeler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerEvent {
    /// Seconds on the session clock
    pub timestamp: f64,
    /// Event kind
    pub kind: EventKind,
    /// Cursor X position, for mouse events
    #[serde(default)]
    pub x: Option<i32>,
    /// Cursor Y position, for mouse events
    #[serde(default)]
    pub y: Option<i32>,
    /// Pressed button, for click events
    #[serde(default)]
    pub button: Option<MouseButton>,
    /// Key identifier, for keyboard events
    #[serde(default)]
    pub key: Option<String>,
    /// Horizontal scroll delta
    #[serde(default)]
    pub dx: Option<i32>,
    /// Vertical scroll delta
    #[serde(default)]
    pub dy: Option<i32>,
    /// Frontmost application at event time, when known
    #[serde(default)]
    pub app_name: Option<String>,
    /// Active window title at event time, when known
    #[serde(default)]
    pub window_title: Option<String>,
}

impl TriggerEvent {
    /// Create a mouse click event
    pub fn click(timestamp: f64, x: i32, y: i32, button: MouseButton) -> Self {
        Self {
            timestamp,
            kind: EventKind::MouseClick,
            x: Some(x),
            y: Some(y),
            button: Some(button),
            key: None,
            dx: None,
            dy: None,
            app_name: None,
            window_title: None,
        }
    }

    /// Create a mouse move event
    pub fn mouse_move(timestamp: f64, x: i32, y: i32) -> Self {
        Self {
            timestamp,
            kind: EventKind::MouseMove,
            x: Some(x),
            y: Some(y),
            button: None,
            key: None,
            dx: None,
            dy: None,
            app_name: None,
            window_title: None,
        }
    }

    /// Create a scroll event
    pub fn scroll(timestamp: f64, x: i32, y: i32, dx: i32, dy: i32) -> Self {
        Self {
            timestamp,
            kind: EventKind::MouseScroll,
            x: Some(x),
            y: Some(y),
            button: None,
            key: None,
            dx: Some(dx),
            dy: Some(dy),
            app_name: None,
            window_title: None,
        }
    }

    /// Create a key press event
    pub fn key_press(timestamp: f64, key: impl Into<String>) -> Self {
        Self {
            timestamp,
            kind: EventKind::KeyPress,
            x: None,
            y: None,
            button: None,
            key: Some(key.into()),
            dx: None,
            dy: None,
            app_name: None,
            window_title: None,
        }
    }

    /// Create a key release event
    pub fn key_release(timestamp: f64, key: impl Into<String>) -> Self {
        Self {
            kind: EventKind::KeyRelease,
            ..Self::key_press(timestamp, key)
        }
    }

    /// Attach active window information
    pub fn with_window(mut self, app_name: impl Into<String>, window_title: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self.window_title = Some(window_title.into());
        self
    }
}

/// Opaque pixel payload of one captured frame.
///
/// RGB bytes behind a shared buffer, so cloning a frame into a keyframe
/// pair never copies pixels. JSON serialization encodes the bytes as
/// base64 to keep session files text-safe.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameImage {
    inner: Arc<ImageData>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct ImageData {
    width: u32,
    height: u32,
    #[serde(with = "base64_bytes")]
    data: Vec<u8>,
}

impl FrameImage {
    /// Create an image from raw RGB bytes
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            inner: Arc::new(ImageData { width, height, data }),
        }
    }

    /// Zero-sized placeholder, used by synthetic sessions
    pub fn empty() -> Self {
        Self::new(0, 0, Vec::new())
    }

    /// Image width in pixels
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Image height in pixels
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Raw pixel bytes
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// True when both handles show the same pixels.
    /// Shared-buffer identity is checked first so the common case
    /// (clones of one captured frame) needs no byte comparison.
    pub fn same_buffer(&self, other: &FrameImage) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner == other.inner
    }
}

impl Serialize for FrameImage {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.inner.as_ref().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FrameImage {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        ImageData::deserialize(deserializer).map(|data| FrameImage {
            inner: Arc::new(data),
        })
    }
}

/// One captured screen frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Seconds on the session clock
    pub timestamp: f64,
    /// Pixel payload, opaque to the analysis layers
    pub image: FrameImage,
}

impl Frame {
    /// Create a frame
    pub fn new(timestamp: f64, image: FrameImage) -> Self {
        Self { timestamp, image }
    }

    /// Frame with an empty image, used by synthetic sessions and tests
    pub fn blank(timestamp: f64) -> Self {
        Self::new(timestamp, FrameImage::empty())
    }
}

/// Before/After frame pair bracketing one trigger event.
///
/// `before` shows the screen as the user acted; `after` shows the result
/// `after_delay` seconds later. The pair is the unit of work handed to the
/// external labeler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyframePair {
    /// Frame closest to the trigger event
    pub before: Frame,
    /// Frame showing the event's visual result
    pub after: Frame,
    /// The event that seeded this pair
    pub trigger: TriggerEvent,
}

impl KeyframePair {
    /// Create a pair
    pub fn new(before: Frame, after: Frame, trigger: TriggerEvent) -> Self {
        Self { before, after, trigger }
    }

    /// True when no later frame was available and both sides show the
    /// same capture.
    pub fn is_degenerate(&self) -> bool {
        self.before.timestamp == self.after.timestamp
            && self.before.image.same_buffer(&self.after.image)
    }

    /// Seconds between the before and after frames
    pub fn gap(&self) -> f64 {
        self.after.timestamp - self.before.timestamp
    }
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        STANDARD.encode(bytes).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
