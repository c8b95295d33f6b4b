//! Per-kind listener registry backing [`InputTracker::on`](super::InputTracker::on).

use super::events::{EventKind, PointerEvent};

/// Callback invoked with each emitted event.
pub type Listener = Box<dyn FnMut(&PointerEvent)>;

/// Handle returned by registration, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId {
    kind: EventKind,
    seq: u64,
}

impl ListenerId {
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

#[derive(Default)]
pub(crate) struct Listeners {
    next_seq: u64,
    slots: [Vec<(u64, Listener)>; 4],
}

impl Listeners {
    pub fn add(&mut self, kind: EventKind, listener: Listener) -> ListenerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.slots[kind.index()].push((seq, listener));
        ListenerId { kind, seq }
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let slot = &mut self.slots[id.kind.index()];
        match slot.iter().position(|(seq, _)| *seq == id.seq) {
            Some(pos) => {
                slot.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.slots[kind.index()].len()
    }

    /// Calls every listener of `kind` in registration order.
    pub fn emit(&mut self, kind: EventKind, event: &PointerEvent) {
        for (_, listener) in self.slots[kind.index()].iter_mut() {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::events::RawEvent;
    use crate::util::{Bounds, Point};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn sample_event() -> PointerEvent {
        PointerEvent {
            dragging: false,
            inside: true,
            position: Point::new(1.0, 2.0),
            uv: Point::new(0.1, 0.2),
            bounds: Bounds::viewport(10.0, 10.0),
            event: RawEvent::mouse(1.0, 2.0),
            touch: None,
        }
    }

    #[test]
    fn emit_runs_listeners_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::default();
        for tag in ["first", "second"] {
            let log = Rc::clone(&log);
            listeners.add(EventKind::Down, Box::new(move |_| log.borrow_mut().push(tag)));
        }

        listeners.emit(EventKind::Down, &sample_event());
        listeners.emit(EventKind::Up, &sample_event());
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn remove_only_affects_matching_listener() {
        let mut listeners = Listeners::default();
        let a = listeners.add(EventKind::Tap, Box::new(|_| {}));
        let b = listeners.add(EventKind::Tap, Box::new(|_| {}));
        assert_eq!(a.kind(), EventKind::Tap);

        assert!(listeners.remove(a));
        assert!(!listeners.remove(a));
        assert_eq!(listeners.count(EventKind::Tap), 1);
        assert!(listeners.remove(b));
        assert_eq!(listeners.count(EventKind::Tap), 0);
    }
}
