// Subscriber registry keyed by (event type, direction)
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::model::{Direction, EventType, SwipeEvent};

pub type Handler = Rc<dyn Fn(&SwipeEvent)>;

struct Subscription {
    id: u64,
    kind: EventType,
    direction: Direction,
    handler: Handler,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

#[derive(Clone, Default)]
pub struct Dispatcher {
    registry: Rc<RefCell<Registry>>,
}

/// Returned by [`Dispatcher::subscribe`]; removes exactly the subscriptions it created.
#[must_use = "dropping the handle keeps the handler subscribed"]
pub struct Unsubscribe {
    registry: Weak<RefCell<Registry>>,
    ids: Vec<u64>,
}

impl Unsubscribe {
    pub fn unsubscribe(self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .subscriptions
                .retain(|s| !self.ids.contains(&s.id));
        }
    }
}

fn same_handler(a: &Handler, b: &Handler) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, kind: EventType, direction: Direction, handler: Handler) -> Unsubscribe {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.subscriptions.push(Subscription {
            id,
            kind,
            direction,
            handler,
        });
        Unsubscribe {
            registry: Rc::downgrade(&self.registry),
            ids: vec![id],
        }
    }

    /// Registers `handler` for all four directions behind a single unsubscribe.
    pub fn subscribe_all(&self, kind: EventType, handler: Handler) -> Unsubscribe {
        let ids = Direction::ALL
            .iter()
            .flat_map(|&direction| self.subscribe(kind, direction, handler.clone()).ids)
            .collect();
        Unsubscribe {
            registry: Rc::downgrade(&self.registry),
            ids,
        }
    }

    /// Removes every subscription matching all three of type, direction and handler.
    pub fn off(&self, kind: EventType, direction: Direction, handler: &Handler) {
        self.registry.borrow_mut().subscriptions.retain(|s| {
            s.kind != kind || s.direction != direction || !same_handler(&s.handler, handler)
        });
    }

    /// Calls matching handlers in registration order. The matching set is captured
    /// before the first call, so handlers may subscribe or unsubscribe freely.
    pub fn emit(&self, event: &SwipeEvent) {
        let matching: Vec<Handler> = self
            .registry
            .borrow()
            .subscriptions
            .iter()
            .filter(|s| s.kind == event.kind && s.direction == event.direction)
            .map(|s| s.handler.clone())
            .collect();
        for handler in matching {
            handler(event);
        }
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.registry.borrow_mut().subscriptions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    fn event(kind: EventType, direction: Direction) -> SwipeEvent {
        SwipeEvent::new(kind, direction, 10.0, 100.0)
    }

    #[test]
    fn emits_only_to_matching_pairs_in_order() {
        let dispatcher = Dispatcher::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for tag in ["a", "b"] {
            let log = log.clone();
            let _sub = dispatcher.subscribe(
                EventType::Swipe,
                Direction::Up,
                Rc::new(move |_: &SwipeEvent| log.borrow_mut().push(tag)),
            );
        }
        let other = log.clone();
        let _sub = dispatcher.subscribe(
            EventType::Progress,
            Direction::Up,
            Rc::new(move |_: &SwipeEvent| other.borrow_mut().push("progress")),
        );

        dispatcher.emit(&event(EventType::Swipe, Direction::Up));
        dispatcher.emit(&event(EventType::Swipe, Direction::Down));
        assert_eq!(*log.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn subscribe_all_covers_every_direction() {
        let dispatcher = Dispatcher::new();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let unsub = dispatcher.subscribe_all(
            EventType::Cancel,
            Rc::new(move |_: &SwipeEvent| counter.set(counter.get() + 1)),
        );
        assert_eq!(dispatcher.len(), 4);
        for direction in Direction::ALL {
            dispatcher.emit(&event(EventType::Cancel, direction));
        }
        assert_eq!(hits.get(), 4);

        unsub.unsubscribe();
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn off_matches_by_handler_identity() {
        let dispatcher = Dispatcher::new();
        let first: Handler = Rc::new(|_: &SwipeEvent| {});
        let second: Handler = Rc::new(|_: &SwipeEvent| {});
        let _a = dispatcher.subscribe(EventType::Swipe, Direction::Left, first.clone());
        let _b = dispatcher.subscribe(EventType::Swipe, Direction::Left, second.clone());
        dispatcher.off(EventType::Swipe, Direction::Left, &first);
        assert_eq!(dispatcher.len(), 1);
        dispatcher.off(EventType::Swipe, Direction::Right, &second);
        assert_eq!(dispatcher.len(), 1);
    }

    #[test]
    fn unsubscribing_mid_emit_keeps_the_snapshot() {
        let dispatcher = Dispatcher::new();
        let hits = Rc::new(Cell::new(0));
        let later: Rc<RefCell<Option<Unsubscribe>>> = Rc::new(RefCell::new(None));

        let slot = later.clone();
        let _first = dispatcher.subscribe(
            EventType::Progress,
            Direction::Down,
            Rc::new(move |_: &SwipeEvent| {
                if let Some(unsub) = slot.borrow_mut().take() {
                    unsub.unsubscribe();
                }
            }),
        );
        let counter = hits.clone();
        *later.borrow_mut() = Some(dispatcher.subscribe(
            EventType::Progress,
            Direction::Down,
            Rc::new(move |_: &SwipeEvent| counter.set(counter.get() + 1)),
        ));

        dispatcher.emit(&event(EventType::Progress, Direction::Down));
        assert_eq!(hits.get(), 1, "already captured for this pass");
        dispatcher.emit(&event(EventType::Progress, Direction::Down));
        assert_eq!(hits.get(), 1);
    }
}
