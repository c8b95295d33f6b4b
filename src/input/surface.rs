//! Host surface abstraction.
//!
//! A surface is anything the host can report bounds for and deliver channel
//! events from: the whole window, a canvas element, a layer. The tracker only
//! registers interest through this trait; the host stays responsible for
//! actually routing events to [`InputTracker::dispatch`](super::InputTracker::dispatch).

use super::events::{Channel, ListenMode, SurfaceId};
use crate::util::Bounds;
use std::cell::{Cell, RefCell};
use thiserror::Error;

/// Errors a host may report when a listener cannot be registered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("{surface} does not deliver {channel} events")]
    Unsupported { surface: SurfaceId, channel: Channel },
}

/// Capabilities the tracker needs from a host surface.
pub trait Surface {
    fn id(&self) -> SurfaceId;

    /// Current rectangle in client coordinates. Queried on every event.
    fn bounds(&self) -> Bounds;

    /// Registers interest in a channel.
    fn add_listener(&self, channel: Channel, mode: ListenMode) -> Result<(), SurfaceError>;

    /// Removes one registration previously made with the same channel and mode.
    fn remove_listener(&self, channel: Channel, mode: ListenMode);
}

/// In-memory surface with mutable bounds that records its registrations.
///
/// Used as the window stand-in and by the replay tool; hosts with a real
/// windowing layer implement [`Surface`] themselves.
#[derive(Debug)]
pub struct Element {
    id: SurfaceId,
    bounds: Cell<Bounds>,
    listeners: RefCell<Vec<(Channel, ListenMode)>>,
    accepts_listeners: bool,
}

impl Element {
    pub fn new(id: SurfaceId, bounds: Bounds) -> Self {
        Self {
            id,
            bounds: Cell::new(bounds),
            listeners: RefCell::new(Vec::new()),
            accepts_listeners: true,
        }
    }

    /// The whole-window surface: a viewport of the given size at the client origin.
    pub fn window(width: f64, height: f64) -> Self {
        Self::new(SurfaceId::WINDOW, Bounds::viewport(width, height))
    }

    /// A surface that refuses every registration, such as a detached node.
    pub fn inert(id: SurfaceId, bounds: Bounds) -> Self {
        Self {
            accepts_listeners: false,
            ..Self::new(id, bounds)
        }
    }

    /// Moves or resizes the surface (layout change, scroll).
    pub fn set_bounds(&self, bounds: Bounds) {
        self.bounds.set(bounds);
    }

    /// Snapshot of active registrations in registration order.
    pub fn listeners(&self) -> Vec<(Channel, ListenMode)> {
        self.listeners.borrow().clone()
    }

    pub fn listener_count(&self, channel: Channel) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(c, _)| *c == channel)
            .count()
    }
}

impl Surface for Element {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn bounds(&self) -> Bounds {
        self.bounds.get()
    }

    fn add_listener(&self, channel: Channel, mode: ListenMode) -> Result<(), SurfaceError> {
        if !self.accepts_listeners {
            return Err(SurfaceError::Unsupported {
                surface: self.id,
                channel,
            });
        }
        self.listeners.borrow_mut().push((channel, mode));
        Ok(())
    }

    fn remove_listener(&self, channel: Channel, mode: ListenMode) {
        let mut listeners = self.listeners.borrow_mut();
        if let Some(pos) = listeners
            .iter()
            .position(|entry| *entry == (channel, mode))
        {
            listeners.remove(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_anchored_at_origin() {
        let window = Element::window(800.0, 600.0);
        assert_eq!(window.id(), SurfaceId::WINDOW);
        assert_eq!(window.bounds(), Bounds::new(0.0, 0.0, 800.0, 600.0));
    }

    #[test]
    fn remove_listener_drops_single_matching_entry() {
        let el = Element::new(SurfaceId(1), Bounds::viewport(10.0, 10.0));
        el.add_listener(Channel::TouchMove, ListenMode::Passive).unwrap();
        el.add_listener(Channel::TouchMove, ListenMode::Blocking).unwrap();

        el.remove_listener(Channel::TouchMove, ListenMode::Blocking);
        assert_eq!(
            el.listeners(),
            vec![(Channel::TouchMove, ListenMode::Passive)]
        );

        // Removing something never registered is a no-op.
        el.remove_listener(Channel::DragStart, ListenMode::Blocking);
        assert_eq!(el.listener_count(Channel::TouchMove), 1);
    }

    #[test]
    fn inert_surface_rejects_registration() {
        let el = Element::inert(SurfaceId(3), Bounds::viewport(10.0, 10.0));
        let err = el
            .add_listener(Channel::MouseDown, ListenMode::Passive)
            .unwrap_err();
        assert_eq!(
            err,
            SurfaceError::Unsupported {
                surface: SurfaceId(3),
                channel: Channel::MouseDown
            }
        );
        assert_eq!(err.to_string(), "surface#3 does not deliver mouse-down events");
        assert!(el.listeners().is_empty());
    }
}
