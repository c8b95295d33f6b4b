//! Replays recorded host event traces through an [`InputTracker`].
//!
//! A trace is a JSON document describing the surfaces involved and an ordered
//! list of steps (host events, layout changes, enable/disable calls). Replaying
//! it drives a tracker with a manual clock and records every emitted event,
//! which makes tracker behavior easy to inspect and reproduce offline.
//!
//! ```json
//! {
//!   "surfaces": [{ "id": 1, "left": 0, "top": 0, "width": 500, "height": 500 }],
//!   "target": 1,
//!   "steps": [
//!     { "at_ms": 0, "action": "dispatch", "surface": 1, "channel": "mouse-down",
//!       "event": { "type": "mouse", "client_x": 100, "client_y": 100 } },
//!     { "at_ms": 50, "action": "dispatch", "channel": "mouse-up",
//!       "event": { "type": "mouse", "client_x": 102, "client_y": 101 } }
//!   ]
//! }
//! ```

use crate::config::{Config, TrackerConfig, ViewportConfig};
use crate::input::{
    Channel, Clock, Element, EventKind, InputTracker, ManualClock, PointerEvent, RawEvent,
    SurfaceId, TrackerOptions,
};
use crate::util::Bounds;
use anyhow::{Context, Result, anyhow, bail};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::rc::Rc;

pub const CURRENT_VERSION: u32 = 1;

/// Recorded input session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Window size; falls back to the configured viewport.
    #[serde(default)]
    pub viewport: Option<ViewportConfig>,
    /// Surfaces other than the window.
    #[serde(default)]
    pub surfaces: Vec<SurfaceSpec>,
    /// Surface receiving presses; the window if omitted.
    #[serde(default)]
    pub target: Option<SurfaceId>,
    /// Surface receiving moves and releases; the window if omitted.
    #[serde(default)]
    pub parent: Option<SurfaceId>,
    /// Tracker settings; falls back to the configured ones.
    #[serde(default)]
    pub tracker: Option<TrackerConfig>,
    pub steps: Vec<Step>,
}

fn default_version() -> u32 {
    CURRENT_VERSION
}

/// A surface declared by a trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceSpec {
    pub id: SurfaceId,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Surface refuses listener registration.
    #[serde(default)]
    pub inert: bool,
}

impl SurfaceSpec {
    fn bounds(&self) -> Bounds {
        Bounds::new(self.left, self.top, self.width, self.height)
    }
}

/// One entry of a trace. A missing `at_ms` keeps the previous time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_ms: Option<u64>,
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Action {
    /// Deliver a host event from `surface` (the window if omitted).
    Dispatch {
        #[serde(default = "window_id")]
        surface: SurfaceId,
        channel: Channel,
        event: RawEvent,
    },
    /// Move or resize a surface.
    Resize {
        surface: SurfaceId,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    },
    Enable,
    Disable,
}

fn window_id() -> SurfaceId {
    SurfaceId::WINDOW
}

impl Trace {
    /// Reads and parses a trace file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read trace from {}", path.display()))?;
        Self::parse(&data).with_context(|| format!("Failed to parse trace from {}", path.display()))
    }

    pub fn parse(data: &str) -> Result<Self> {
        let trace: Trace = serde_json::from_str(data)?;
        if trace.version > CURRENT_VERSION {
            bail!(
                "Unsupported trace version {} (newest supported is {})",
                trace.version,
                CURRENT_VERSION
            );
        }
        Ok(trace)
    }
}

/// An event emitted during replay.
#[derive(Debug, Clone, Serialize)]
pub struct Emitted {
    pub at_ms: u64,
    pub kind: EventKind,
    pub event: PointerEvent,
}

/// Outcome of a replay.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplayReport {
    pub events: Vec<Emitted>,
    /// Dispatches whose host default was suppressed.
    pub default_prevented: usize,
    /// Dispatches no subscription matched.
    pub unhandled: usize,
}

impl ReplayReport {
    pub fn kinds(&self) -> Vec<EventKind> {
        self.events.iter().map(|e| e.kind).collect()
    }
}

/// Replays `trace`, using `config` for anything the trace leaves unspecified.
pub fn run(trace: &Trace, config: &Config) -> Result<ReplayReport> {
    let viewport = trace.viewport.as_ref().unwrap_or(&config.viewport);
    let tracker_config = trace
        .tracker
        .clone()
        .unwrap_or_else(|| config.tracker.clone());

    let window = Rc::new(Element::window(viewport.width, viewport.height));
    let mut surfaces: HashMap<SurfaceId, Rc<Element>> = HashMap::new();
    surfaces.insert(SurfaceId::WINDOW, Rc::clone(&window));
    for spec in &trace.surfaces {
        if spec.id == SurfaceId::WINDOW {
            bail!("Surface id 0 is reserved for the window");
        }
        let element = if spec.inert {
            Element::inert(spec.id, spec.bounds())
        } else {
            Element::new(spec.id, spec.bounds())
        };
        if surfaces.insert(spec.id, Rc::new(element)).is_some() {
            bail!("Duplicate surface {}", spec.id);
        }
    }

    let lookup = |id: SurfaceId| -> Result<Rc<Element>> {
        surfaces
            .get(&id)
            .cloned()
            .ok_or_else(|| anyhow!("Unknown surface {id}"))
    };

    let mut options = TrackerOptions::new(tracker_config);
    if let Some(id) = trace.target {
        options = options.target(lookup(id).context("Invalid target")?);
    }
    if let Some(id) = trace.parent {
        options = options.parent(lookup(id).context("Invalid parent")?);
    }

    let clock = ManualClock::new();
    let mut tracker = InputTracker::with_clock(window, options, Box::new(clock.clone()))
        .context("Failed to attach tracker")?;

    let recorded: Rc<RefCell<Vec<Emitted>>> = Rc::new(RefCell::new(Vec::new()));
    for kind in EventKind::ALL {
        let recorded = Rc::clone(&recorded);
        let clock = clock.clone();
        tracker.on(kind, move |event| {
            recorded.borrow_mut().push(Emitted {
                at_ms: clock.now_ms(),
                kind,
                event: event.clone(),
            });
        });
    }

    let mut report = ReplayReport::default();
    for (index, step) in trace.steps.iter().enumerate() {
        if let Some(at) = step.at_ms {
            if at < clock.now_ms() {
                bail!(
                    "Step {index}: time {at}ms is before {}ms",
                    clock.now_ms()
                );
            }
            clock.set(at);
        }

        match &step.action {
            Action::Dispatch {
                surface,
                channel,
                event,
            } => {
                let outcome = tracker.dispatch(*surface, *channel, event);
                if !outcome.handled {
                    debug!("Step {index}: {channel} on {surface} not handled");
                    report.unhandled += 1;
                }
                if outcome.default_prevented {
                    report.default_prevented += 1;
                }
            }
            Action::Resize {
                surface,
                left,
                top,
                width,
                height,
            } => {
                lookup(*surface)
                    .with_context(|| format!("Step {index}: cannot resize"))?
                    .set_bounds(Bounds::new(*left, *top, *width, *height));
            }
            Action::Enable => tracker
                .enable()
                .with_context(|| format!("Step {index}: failed to enable tracker"))?,
            Action::Disable => tracker.disable(),
        }
    }

    report.events = recorded.take();
    info!(
        "Replayed {} steps: {} events emitted",
        trace.steps.len(),
        report.events.len()
    );
    Ok(report)
}
