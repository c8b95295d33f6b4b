//! Pointer input normalization.
//!
//! This module turns host mouse and touch events into a single stream of
//! `down`, `up`, `move` and `tap` events. It tracks one finger across
//! multi-touch input, derives surface-local and normalized coordinates, and
//! classifies press/release pairs as taps.

pub mod clock;
pub mod events;
pub mod listeners;
pub mod surface;
pub mod tracker;

// Re-export commonly used types at module level
pub use clock::{Clock, ManualClock, SystemClock};
pub use events::{
    Channel, Dispatch, EventKind, ListenMode, PointerEvent, RawEvent, SurfaceId, Touch, TouchId,
};
pub use listeners::ListenerId;
pub use surface::{Element, Surface, SurfaceError};
pub use tracker::{InputTracker, PressRecord, TrackerError, TrackerOptions};
