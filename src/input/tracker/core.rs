//! Tracker construction, host subscriptions, and event routing.

use crate::config::TrackerConfig;
use crate::input::clock::{Clock, SystemClock};
use crate::input::events::{Channel, Dispatch, EventKind, ListenMode, PointerEvent, RawEvent, SurfaceId, TouchId};
use crate::input::listeners::{ListenerId, Listeners};
use crate::input::surface::{Surface, SurfaceError};
use crate::util::Point;
use log::{debug, trace};
use std::rc::Rc;
use thiserror::Error;

/// Errors raised while attaching the tracker to its surfaces.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("failed to register {channel} listener on {surface}")]
    Subscribe {
        surface: SurfaceId,
        channel: Channel,
        #[source]
        source: SurfaceError,
    },
}

/// Construction options.
///
/// `target` receives press channels; `parent` receives move and release
/// channels so a drag can be followed after the pointer leaves the target.
/// Both default to the window passed to [`InputTracker::new`].
#[derive(Clone, Default)]
pub struct TrackerOptions {
    pub target: Option<Rc<dyn Surface>>,
    pub parent: Option<Rc<dyn Surface>>,
    pub config: TrackerConfig,
}

impl TrackerOptions {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn target<S: Surface + 'static>(mut self, target: Rc<S>) -> Self {
        self.target = Some(target);
        self
    }

    pub fn parent<S: Surface + 'static>(mut self, parent: Rc<S>) -> Self {
        self.parent = Some(parent);
        self
    }
}

impl From<Rc<dyn Surface>> for TrackerOptions {
    fn from(target: Rc<dyn Surface>) -> Self {
        Self {
            target: Some(target),
            ..Self::default()
        }
    }
}

impl From<TrackerConfig> for TrackerOptions {
    fn from(config: TrackerConfig) -> Self {
        Self::new(config)
    }
}

/// Position and time captured when a press is accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressRecord {
    pub position: Point,
    pub at_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Handler {
    Press,
    Move,
    Release,
    SuppressDefault,
}

struct Subscription {
    surface: Rc<dyn Surface>,
    surface_id: SurfaceId,
    channel: Channel,
    mode: ListenMode,
    handler: Handler,
}

/// Normalizes mouse and touch input from a target surface into
/// `down`/`up`/`move`/`tap` events.
///
/// The host forwards every event it delivers on a subscribed channel to
/// [`dispatch`](Self::dispatch); the tracker filters, derives geometry, and
/// calls the listeners registered with [`on`](Self::on).
pub struct InputTracker {
    target: Rc<dyn Surface>,
    parent: Rc<dyn Surface>,
    window: Rc<dyn Surface>,
    pub(super) config: TrackerConfig,
    pub(super) clock: Box<dyn Clock>,
    listeners: Listeners,
    subscriptions: Vec<Subscription>,
    attached: bool,
    /// Finger followed in filtered touch mode
    pub(super) tracked: Option<TouchId>,
    /// True between an accepted press and its release
    pub(super) dragging: bool,
    /// Pending press used for tap classification
    pub(super) last_press: Option<PressRecord>,
}

impl InputTracker {
    /// Creates a tracker using the system clock and attaches it immediately.
    ///
    /// `options` may be a full [`TrackerOptions`], a bare target surface, or a
    /// [`TrackerConfig`] (tracking the whole window).
    ///
    /// # Errors
    /// Returns [`TrackerError`] if any surface refuses a listener registration.
    pub fn new(
        window: Rc<dyn Surface>,
        options: impl Into<TrackerOptions>,
    ) -> Result<Self, TrackerError> {
        Self::with_clock(window, options, Box::new(SystemClock::new()))
    }

    /// Same as [`new`](Self::new) with an explicit time source.
    pub fn with_clock(
        window: Rc<dyn Surface>,
        options: impl Into<TrackerOptions>,
        clock: Box<dyn Clock>,
    ) -> Result<Self, TrackerError> {
        let options = options.into();
        let target = options.target.unwrap_or_else(|| Rc::clone(&window));
        let parent = options.parent.unwrap_or_else(|| Rc::clone(&window));

        let mut tracker = Self {
            target,
            parent,
            window,
            config: options.config,
            clock,
            listeners: Listeners::default(),
            subscriptions: Vec::new(),
            attached: false,
            tracked: None,
            dragging: false,
            last_press: None,
        };
        tracker.enable()?;
        Ok(tracker)
    }

    /// Subscribes to the host channels. Does nothing if already enabled.
    ///
    /// On failure every registration made by this call is rolled back.
    pub fn enable(&mut self) -> Result<(), TrackerError> {
        if self.attached {
            return Ok(());
        }

        let mode = if self.config.passive {
            ListenMode::Passive
        } else {
            ListenMode::Blocking
        };

        let mut plan = vec![
            (Rc::clone(&self.target), Channel::TouchStart, mode, Handler::Press),
            (Rc::clone(&self.parent), Channel::TouchEnd, mode, Handler::Release),
            (Rc::clone(&self.parent), Channel::TouchMove, mode, Handler::Move),
            (Rc::clone(&self.target), Channel::MouseDown, mode, Handler::Press),
            (Rc::clone(&self.parent), Channel::MouseUp, mode, Handler::Release),
            (Rc::clone(&self.parent), Channel::MouseMove, mode, Handler::Move),
        ];
        if self.config.prevent_default {
            // Suppression has to be able to block, whatever `passive` says.
            plan.push((
                Rc::clone(&self.window),
                Channel::DragStart,
                ListenMode::Blocking,
                Handler::SuppressDefault,
            ));
            plan.push((
                Rc::clone(&self.window),
                Channel::TouchMove,
                ListenMode::Blocking,
                Handler::SuppressDefault,
            ));
        }

        for (surface, channel, mode, handler) in plan {
            let surface_id = surface.id();
            if let Err(source) = surface.add_listener(channel, mode) {
                self.release_subscriptions();
                return Err(TrackerError::Subscribe {
                    surface: surface_id,
                    channel,
                    source,
                });
            }
            self.subscriptions.push(Subscription {
                surface,
                surface_id,
                channel,
                mode,
                handler,
            });
        }

        self.attached = true;
        debug!(
            "Tracker enabled: target={} parent={} ({} subscriptions)",
            self.target.id(),
            self.parent.id(),
            self.subscriptions.len()
        );
        Ok(())
    }

    /// Removes every host subscription. Does nothing if already disabled.
    ///
    /// Any in-progress drag, tracked touch and pending press are dropped.
    pub fn disable(&mut self) {
        if !self.attached {
            return;
        }
        self.release_subscriptions();
        self.attached = false;
        self.tracked = None;
        self.dragging = false;
        self.last_press = None;
        debug!("Tracker disabled: target={}", self.target.id());
    }

    fn release_subscriptions(&mut self) {
        for sub in self.subscriptions.drain(..) {
            sub.surface.remove_listener(sub.channel, sub.mode);
        }
    }

    /// Handles one host event delivered on `channel` by the surface `origin`.
    ///
    /// Events on channels the tracker is not subscribed to are ignored.
    pub fn dispatch(&mut self, origin: SurfaceId, channel: Channel, event: &RawEvent) -> Dispatch {
        let handlers: Vec<Handler> = self
            .subscriptions
            .iter()
            .filter(|sub| sub.surface_id == origin && sub.channel == channel)
            .map(|sub| sub.handler)
            .collect();

        if handlers.is_empty() {
            trace!("No subscription for {channel} on {origin}");
            return Dispatch::default();
        }

        let mut outcome = Dispatch {
            handled: true,
            default_prevented: false,
        };
        for handler in handlers {
            match handler {
                Handler::Press => self.on_press(event),
                Handler::Move => self.on_move(event),
                Handler::Release => self.on_release(event),
                Handler::SuppressDefault => outcome.default_prevented = true,
            }
        }
        outcome
    }

    /// Registers a listener for one event kind.
    pub fn on<F>(&mut self, kind: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(&PointerEvent) + 'static,
    {
        self.listeners.add(kind, Box::new(listener))
    }

    /// Unregisters a listener. Returns false if it was already removed.
    pub fn off(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.count(kind)
    }

    pub(super) fn emit(&mut self, kind: EventKind, event: &PointerEvent) {
        trace!(
            "Emitting {kind} at ({:.1}, {:.1}) inside={} dragging={}",
            event.position.x, event.position.y, event.inside, event.dragging
        );
        self.listeners.emit(kind, event);
    }

    pub fn target(&self) -> &Rc<dyn Surface> {
        &self.target
    }

    pub fn parent(&self) -> &Rc<dyn Surface> {
        &self.parent
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.attached
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn tracked_touch(&self) -> Option<TouchId> {
        self.tracked
    }

    pub fn pending_press(&self) -> Option<PressRecord> {
        self.last_press
    }

    /// Active host registrations as `(surface, channel, mode)`.
    pub fn subscriptions(&self) -> Vec<(SurfaceId, Channel, ListenMode)> {
        self.subscriptions
            .iter()
            .map(|sub| (sub.surface_id, sub.channel, sub.mode))
            .collect()
    }
}

impl Drop for InputTracker {
    fn drop(&mut self) {
        self.disable();
    }
}
