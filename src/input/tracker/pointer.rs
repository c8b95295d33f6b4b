use crate::input::events::{EventKind, PointerEvent, RawEvent, Touch};
use crate::util::{self, Point};
use log::{debug, trace};

use super::{InputTracker, PressRecord};

/// The pointer a raw event resolved to.
struct Contact {
    client: Point,
    touch: Option<Touch>,
}

impl InputTracker {
    /// Handles a press on the target.
    ///
    /// Starts a drag, remembers the press for tap classification and emits
    /// `down`. In filtered touch mode a press from a finger other than the
    /// tracked one is dropped.
    pub(super) fn on_press(&mut self, event: &RawEvent) {
        let Some(contact) = self.resolve_contact(event) else {
            trace!("Press ignored: tracked touch not in event");
            return;
        };

        self.dragging = true;
        let result = self.build_event(event, contact);
        self.last_press = Some(PressRecord {
            position: result.position,
            at_ms: self.clock.now_ms(),
        });
        self.emit(EventKind::Down, &result);
    }

    /// Handles pointer motion on the parent.
    ///
    /// `move` is emitted while dragging, or while hovering inside the target.
    pub(super) fn on_move(&mut self, event: &RawEvent) {
        let Some(contact) = self.resolve_contact(event) else {
            trace!("Move ignored: tracked touch not in event");
            return;
        };

        // A tracked finger inside the target counts as a drag even if its
        // press landed elsewhere.
        if self.config.filtered
            && contact.touch.is_some()
            && self.target().bounds().contains(contact.client)
        {
            self.dragging = true;
        }

        let result = self.build_event(event, contact);
        if self.dragging || result.inside {
            self.emit(EventKind::Move, &result);
        }
    }

    /// Handles a release on the parent.
    ///
    /// Ends the drag, emits `up` when the interaction was a drag or ended
    /// inside the target, then emits `tap` if the press was close enough in
    /// both time and space. A release from a finger other than the tracked
    /// one leaves all state untouched.
    pub(super) fn on_release(&mut self, event: &RawEvent) {
        let was_dragging = self.dragging;
        let Some(contact) = self.resolve_contact(event) else {
            trace!("Release ignored: tracked touch not in event");
            return;
        };

        let result = self.build_event(event, contact);
        self.tracked = None;
        self.dragging = false;

        if was_dragging || result.inside {
            self.emit(EventKind::Up, &result);
        }

        if let Some(press) = self.last_press.take() {
            let elapsed = self.clock.now_ms().saturating_sub(press.at_ms);
            let dist = util::distance(result.position, press.position);
            if elapsed <= self.config.tap_delay_ms && dist < self.config.tap_distance_threshold {
                let tap = PointerEvent {
                    dragging: false,
                    ..result
                };
                self.emit(EventKind::Tap, &tap);
            } else {
                trace!("No tap: {elapsed}ms, {dist:.1}px");
            }
        }
    }

    /// Picks the pointer this tracker follows out of a raw event.
    ///
    /// Mouse events always resolve. Touch events resolve to the tracked finger
    /// in filtered mode (adopting one if none is tracked yet), or to the first
    /// listed touch otherwise.
    fn resolve_contact(&mut self, event: &RawEvent) -> Option<Contact> {
        let touches = match event {
            RawEvent::Mouse { client_x, client_y } => {
                return Some(Contact {
                    client: Point::new(*client_x, *client_y),
                    touch: None,
                });
            }
            RawEvent::Touch { changed_touches } => changed_touches,
        };

        let touch = if !self.config.filtered {
            touches.first()
        } else if let Some(id) = self.tracked {
            touches.iter().find(|t| t.identifier == id)
        } else {
            let target = self.target().id();
            let first = touches
                .iter()
                .find(|t| t.target == Some(target))
                .or_else(|| touches.first());
            if let Some(t) = first {
                debug!("Tracking touch {:?}", t.identifier);
                self.tracked = Some(t.identifier);
            }
            first
        };

        touch.map(|t| Contact {
            client: t.client(),
            touch: Some(t.clone()),
        })
    }

    /// Derives geometry against the target's current bounds.
    fn build_event(&self, event: &RawEvent, contact: Contact) -> PointerEvent {
        let bounds = self.target().bounds();
        let position = bounds.to_local(contact.client);
        PointerEvent {
            dragging: self.dragging,
            inside: bounds.contains(contact.client),
            position,
            uv: bounds.to_uv(position),
            bounds,
            event: event.clone(),
            touch: contact.touch,
        }
    }
}
