#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use yew_overswipe::model::Edges;
use yew_overswipe::{EventType, Host, SwipeEvent, Tracker, Unsubscribe};

/// Element sitting at the bottom edge of a tall page, inside the default margin.
pub const AT_BOTTOM: Edges<f64> = Edges {
    top: -2000.0,
    left: 0.0,
    right: 0.0,
    bottom: 10.0,
};

/// Element scrolled somewhere in the middle; no edge is reachable.
pub const MID_PAGE: Edges<f64> = Edges {
    top: -900.0,
    left: -400.0,
    right: 400.0,
    bottom: 900.0,
};

struct Scheduled {
    due: f64,
    cancelled: Rc<Cell<bool>>,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct FakeState {
    now: Cell<f64>,
    offsets: Cell<Edges<f64>>,
    timers: RefCell<Vec<Scheduled>>,
}

/// Host with a manual clock. Timers only fire from [`FakeHost::advance`].
#[derive(Clone, Default)]
pub struct FakeHost {
    state: Rc<FakeState>,
}

pub struct FakeTimer {
    cancelled: Rc<Cell<bool>>,
}

impl Drop for FakeTimer {
    fn drop(&mut self) {
        self.cancelled.set(true);
    }
}

impl FakeHost {
    pub fn with_offsets(offsets: Edges<f64>) -> Self {
        let host = Self::default();
        host.set_offsets(offsets);
        host
    }

    pub fn set_offsets(&self, offsets: Edges<f64>) {
        self.state.offsets.set(offsets);
    }

    pub fn now(&self) -> f64 {
        self.state.now.get()
    }

    /// Timers that are neither fired nor cancelled.
    pub fn pending_timers(&self) -> usize {
        self.state
            .timers
            .borrow()
            .iter()
            .filter(|t| !t.cancelled.get())
            .count()
    }

    /// Moves the clock forward, firing due timers in order.
    pub fn advance(&self, ms: f64) {
        let target = self.state.now.get() + ms;
        loop {
            let next = {
                let mut timers = self.state.timers.borrow_mut();
                timers.retain(|t| !t.cancelled.get());
                let earliest = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due))
                    .map(|(at, _)| at);
                earliest.map(|at| timers.remove(at))
            };
            let Some(timer) = next else { break };
            self.state.now.set(timer.due);
            timer.cancelled.set(true);
            (timer.callback)();
        }
        self.state.now.set(target);
    }
}

impl Host for FakeHost {
    type Timer = FakeTimer;

    fn relative_offsets(&self) -> Edges<f64> {
        self.state.offsets.get()
    }

    fn set_timer(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> FakeTimer {
        let cancelled = Rc::new(Cell::new(false));
        self.state.timers.borrow_mut().push(Scheduled {
            due: self.state.now.get() + delay_ms as f64,
            cancelled: cancelled.clone(),
            callback,
        });
        FakeTimer { cancelled }
    }

    fn now_ms(&self) -> f64 {
        self.state.now.get()
    }
}

/// Collects every event the tracker emits.
pub struct Recorder {
    events: Rc<RefCell<Vec<SwipeEvent>>>,
    _subscriptions: Vec<Unsubscribe>,
}

impl Recorder {
    pub fn attach(tracker: &Tracker<FakeHost>) -> Self {
        let events = Rc::new(RefCell::new(Vec::new()));
        let subscriptions = [EventType::Progress, EventType::Swipe, EventType::Cancel]
            .into_iter()
            .map(|kind| {
                let events = events.clone();
                tracker.on_all(
                    kind,
                    Rc::new(move |event: &SwipeEvent| events.borrow_mut().push(*event)),
                )
            })
            .collect();
        Self {
            events,
            _subscriptions: subscriptions,
        }
    }

    pub fn events(&self) -> Vec<SwipeEvent> {
        self.events.borrow().clone()
    }

    pub fn kinds(&self) -> Vec<EventType> {
        self.events.borrow().iter().map(|e| e.kind).collect()
    }

    pub fn count(&self, kind: EventType) -> usize {
        self.events.borrow().iter().filter(|e| e.kind == kind).count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}
