//! Raw host events and the normalized events emitted by the tracker.

use crate::util::{Bounds, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a surface registered with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceId(pub u32);

impl SurfaceId {
    /// The whole-window surface.
    pub const WINDOW: SurfaceId = SurfaceId(0);
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::WINDOW {
            write!(f, "window")
        } else {
            write!(f, "surface#{}", self.0)
        }
    }
}

/// Host-assigned identity of a finger for the lifetime of its contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TouchId(pub i64);

/// One entry of a touch list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Touch {
    pub identifier: TouchId,
    pub client_x: f64,
    pub client_y: f64,
    /// Surface the touch originally started on, if the host knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<SurfaceId>,
}

impl Touch {
    pub fn new(identifier: i64, client_x: f64, client_y: f64) -> Self {
        Self {
            identifier: TouchId(identifier),
            client_x,
            client_y,
            target: None,
        }
    }

    /// Marks the surface this touch started on.
    pub fn on(mut self, target: SurfaceId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn client(&self) -> Point {
        Point::new(self.client_x, self.client_y)
    }
}

/// Device event as delivered by the host.
///
/// Mouse events carry one pointer position. Touch events carry the list of
/// touches that changed in this event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RawEvent {
    Mouse { client_x: f64, client_y: f64 },
    Touch { changed_touches: Vec<Touch> },
}

impl RawEvent {
    pub fn mouse(client_x: f64, client_y: f64) -> Self {
        RawEvent::Mouse { client_x, client_y }
    }

    pub fn touch(changed_touches: Vec<Touch>) -> Self {
        RawEvent::Touch { changed_touches }
    }
}

/// Host event channels a surface can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Channel {
    MouseDown,
    MouseMove,
    MouseUp,
    TouchStart,
    TouchMove,
    TouchEnd,
    DragStart,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::MouseDown => "mouse-down",
            Channel::MouseMove => "mouse-move",
            Channel::MouseUp => "mouse-up",
            Channel::TouchStart => "touch-start",
            Channel::TouchMove => "touch-move",
            Channel::TouchEnd => "touch-end",
            Channel::DragStart => "drag-start",
        };
        f.write_str(name)
    }
}

/// How a listener is registered with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListenMode {
    /// The listener promises not to block the host's default handling.
    Passive,
    /// The listener may suppress the host's default handling.
    Blocking,
}

/// The four semantic events emitted by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Down,
    Up,
    Move,
    Tap,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [EventKind::Down, EventKind::Up, EventKind::Move, EventKind::Tap];

    pub(crate) fn index(self) -> usize {
        match self {
            EventKind::Down => 0,
            EventKind::Up => 1,
            EventKind::Move => 2,
            EventKind::Tap => 3,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Down => "down",
            EventKind::Up => "up",
            EventKind::Move => "move",
            EventKind::Tap => "tap",
        };
        f.write_str(name)
    }
}

/// Normalized pointer event delivered to listeners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Drag state at the time the event was built.
    pub dragging: bool,
    /// Whether the pointer lies inside the target bounds.
    pub inside: bool,
    /// Position relative to the target's top-left corner.
    pub position: Point,
    /// Position normalized by the target size.
    pub uv: Point,
    /// Target bounds at the time of the event.
    pub bounds: Bounds,
    /// The host event this was derived from.
    pub event: RawEvent,
    /// The touch that was resolved, absent for mouse input.
    pub touch: Option<Touch>,
}

/// Result of handing one host event to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dispatch {
    /// At least one tracker subscription matched the event.
    pub handled: bool,
    /// The host's default handling should be suppressed.
    pub default_prevented: bool,
}
