mod core;
mod pointer;

pub use self::core::{InputTracker, PressRecord, TrackerError, TrackerOptions};
