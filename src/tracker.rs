//! Owning controller around [`GestureState`].
//!
//! The tracker gates input on visibility, throttles touch moves, executes the
//! machine's effects (emit, prevent-default, delayed re-arm) and owns every
//! pending timer so `disconnect` can silence it completely.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, trace};

use crate::host::Host;
use crate::model::{AllowedSides, Direction, EventType, Settings, TOUCH_MOVE_THROTTLE_MS};
use crate::state::dispatcher::{Dispatcher, Handler, Unsubscribe};
use crate::state::geometry::allowed_sides;
use crate::state::gesture::{Effect, GestureState, Phase, TouchInput, WheelInput};
use crate::timing::{Throttle, Throttled};

struct Inner<H: Host> {
    host: H,
    settings: Settings,
    gesture: RefCell<GestureState>,
    dispatcher: Dispatcher,
    on_screen: Cell<bool>,
    connected: Cell<bool>,
    next_timer_id: Cell<u64>,
    // Not cancelled by new gestures, only by disconnect.
    rearm_timers: RefCell<Vec<(u64, H::Timer)>>,
    scroll_timer: RefCell<Option<H::Timer>>,
    move_throttle: RefCell<Throttle<TouchInput>>,
    move_timer: RefCell<Option<H::Timer>>,
}

pub struct Tracker<H: Host> {
    inner: Rc<Inner<H>>,
}

impl<H: Host> Clone for Tracker<H> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<H: Host> Inner<H> {
    fn active(&self) -> bool {
        self.connected.get() && self.on_screen.get()
    }

    fn apply(self: &Rc<Self>, effects: Vec<Effect>) -> bool {
        let mut prevented = false;
        for effect in effects {
            match effect {
                Effect::Emit(event) => {
                    match event.kind {
                        EventType::Progress => {
                            trace!("overswipe progress {} {:.1}", event.direction, event.distance)
                        }
                        _ => debug!("overswipe {} {}", event.kind, event.direction),
                    }
                    self.dispatcher.emit(&event);
                }
                Effect::PreventDefault => prevented = true,
                Effect::ScheduleRearm => self.schedule_rearm(),
            }
        }
        prevented
    }

    fn rearm(self: &Rc<Self>) {
        let effects = self.gesture.borrow_mut().reset();
        self.apply(effects);
        if !self.connected.get() {
            return;
        }
        // Read geometry after cancel handlers had their chance to move things.
        let offsets = self.host.relative_offsets();
        let allowed = allowed_sides(&offsets, self.settings.bounds_margin);
        debug!("overswipe rearmed {:?}", allowed);
        self.gesture.borrow_mut().arm(allowed);
    }

    fn next_timer_id(&self) -> u64 {
        let id = self.next_timer_id.get();
        self.next_timer_id.set(id + 1);
        id
    }

    fn schedule_rearm(self: &Rc<Self>) {
        if !self.connected.get() {
            return;
        }
        let id = self.next_timer_id();
        let weak = Rc::downgrade(self);
        let timer = self.host.set_timer(
            self.settings.reset_timeout,
            Box::new(move || {
                let Some(inner) = weak.upgrade() else { return };
                let fired = {
                    let mut timers = inner.rearm_timers.borrow_mut();
                    timers
                        .iter()
                        .position(|(timer_id, _)| *timer_id == id)
                        .map(|at| timers.remove(at))
                };
                if fired.is_some() && inner.connected.get() {
                    inner.rearm();
                }
            }),
        );
        self.rearm_timers.borrow_mut().push((id, timer));
    }

    fn deliver_move(self: &Rc<Self>, input: TouchInput) -> bool {
        let effects = self.gesture.borrow_mut().touch_move(input);
        self.apply(effects)
    }

    fn flush_move(self: &Rc<Self>) {
        let now = self.host.now_ms();
        let pending = self.move_throttle.borrow_mut().flush(now);
        self.move_timer.borrow_mut().take();
        if let Some(input) = pending {
            // The source event has already been dispatched.
            self.deliver_move(TouchInput {
                cancelable: false,
                ..input
            });
        }
    }
}

impl<H: Host> Tracker<H> {
    /// Creates the tracker and performs the initial boundary evaluation.
    /// The element counts as off-screen until [`Tracker::set_visible`] says otherwise.
    pub fn new(host: H, settings: Settings) -> Self {
        let inner = Rc::new(Inner {
            host,
            settings,
            gesture: RefCell::new(GestureState::new(settings)),
            dispatcher: Dispatcher::new(),
            on_screen: Cell::new(false),
            connected: Cell::new(true),
            next_timer_id: Cell::new(0),
            rearm_timers: RefCell::new(Vec::new()),
            scroll_timer: RefCell::new(None),
            move_throttle: RefCell::new(Throttle::new(TOUCH_MOVE_THROTTLE_MS)),
            move_timer: RefCell::new(None),
        });
        inner.rearm();
        Self { inner }
    }

    pub fn phase(&self) -> Phase {
        self.inner.gesture.borrow().phase()
    }

    pub fn distance(&self) -> f64 {
        self.inner.gesture.borrow().distance()
    }

    pub fn allowed_sides(&self) -> AllowedSides {
        self.inner.gesture.borrow().allowed_sides()
    }

    pub fn is_visible(&self) -> bool {
        self.inner.on_screen.get()
    }

    pub fn is_connected(&self) -> bool {
        self.inner.connected.get()
    }

    /// Subscriptions across all event types and directions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.dispatcher.len()
    }

    /// Number of delayed re-arms still waiting to fire.
    pub fn pending_rearms(&self) -> usize {
        self.inner.rearm_timers.borrow().len()
    }

    pub fn on(&self, kind: EventType, direction: Direction, handler: Handler) -> Unsubscribe {
        self.inner.dispatcher.subscribe(kind, direction, handler)
    }

    pub fn on_all(&self, kind: EventType, handler: Handler) -> Unsubscribe {
        self.inner.dispatcher.subscribe_all(kind, handler)
    }

    pub fn off(&self, kind: EventType, direction: Direction, handler: &Handler) {
        self.inner.dispatcher.off(kind, direction, handler);
    }

    pub fn set_visible(&self, visible: bool) {
        if self.inner.on_screen.replace(visible) != visible {
            debug!("overswipe element visible: {visible}");
        }
    }

    /// Boundary re-evaluation: cancels a tracked gesture, then recomputes allowed sides.
    pub fn rearm(&self) {
        if self.inner.connected.get() {
            self.inner.rearm();
        }
    }

    /// Container scrolled: re-arm once scrolling has been quiet for `reset_timeout`.
    pub fn scroll(&self) {
        if !self.inner.active() {
            return;
        }
        let weak = Rc::downgrade(&self.inner);
        let timer = self.inner.host.set_timer(
            self.inner.settings.reset_timeout,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    if inner.connected.get() {
                        inner.rearm();
                    }
                }
            }),
        );
        // Replacing the previous timer cancels it.
        *self.inner.scroll_timer.borrow_mut() = Some(timer);
    }

    /// Returns `true` when the event's default action should be prevented.
    pub fn wheel(&self, input: WheelInput) -> bool {
        if !self.inner.active() {
            return false;
        }
        let effects = self.inner.gesture.borrow_mut().wheel(input);
        self.inner.apply(effects)
    }

    pub fn touch_start(&self, input: TouchInput) {
        if !self.inner.active() {
            return;
        }
        self.inner.move_throttle.borrow_mut().cancel();
        self.inner.move_timer.borrow_mut().take();
        self.inner.gesture.borrow_mut().touch_start(input);
    }

    /// Moves are throttled to one per `TOUCH_MOVE_THROTTLE_MS`; a held-back move is
    /// delivered when the window closes or the touch ends.
    pub fn touch_move(&self, input: TouchInput) -> bool {
        if !self.inner.active() {
            return false;
        }
        let now = self.inner.host.now_ms();
        let decision = self.inner.move_throttle.borrow_mut().call(now, input);
        match decision {
            Throttled::Run(input) => self.inner.deliver_move(input),
            Throttled::Deferred {
                trailing_in: Some(delay),
            } => {
                let weak = Rc::downgrade(&self.inner);
                let timer = self.inner.host.set_timer(
                    delay,
                    Box::new(move || {
                        if let Some(inner) = weak.upgrade() {
                            if inner.connected.get() {
                                inner.flush_move();
                            }
                        }
                    }),
                );
                *self.inner.move_timer.borrow_mut() = Some(timer);
                false
            }
            Throttled::Deferred { trailing_in: None } => false,
        }
    }

    pub fn touch_end(&self) {
        if !self.inner.active() {
            return;
        }
        self.inner.flush_move();
        let effects = self.inner.gesture.borrow_mut().touch_end();
        self.inner.apply(effects);
    }

    /// Drops every subscriber and pending timer; later input is ignored. Idempotent.
    pub fn disconnect(&self) {
        if !self.inner.connected.replace(false) {
            return;
        }
        let timers = std::mem::take(&mut *self.inner.rearm_timers.borrow_mut());
        drop(timers);
        self.inner.scroll_timer.borrow_mut().take();
        self.inner.move_timer.borrow_mut().take();
        self.inner.move_throttle.borrow_mut().cancel();
        self.inner.dispatcher.clear();
        debug!("overswipe tracker disconnected");
    }
}
