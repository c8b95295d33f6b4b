//! Unified pointer tracking for canvas surfaces.
//!
//! Normalizes mouse and touch input into `down`/`up`/`move`/`tap` events with
//! surface-local and normalized coordinates. Configuration and trace replay are
//! exposed alongside the tracker so tools can share them with the main binary.

pub mod config;
pub mod input;
pub mod replay;
pub mod util;

pub use config::Config;
pub use input::{EventKind, InputTracker, PointerEvent, TrackerOptions};
