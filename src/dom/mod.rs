//! Browser side of the tracker.
//!
//! [`attach`] wires a [`Tracker`] to a real element: visibility through an
//! IntersectionObserver, a debounced scroll listener that re-arms boundaries,
//! and opt-in wheel/touch listeners on the container.

pub mod listeners;
pub mod visibility;

use std::cell::{Cell, RefCell};

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, TouchEvent, WheelEvent};

use crate::error::OverswipeError;
use crate::host::Host;
use crate::model::{Bounds, Direction, Edges, EventType, Options, Settings};
use crate::state::dispatcher::{Handler, Unsubscribe};
use crate::state::geometry::{ContainerBounds, relative_offsets};
use crate::state::gesture::{TouchInput, WheelInput};
use crate::state::touch::TouchSample;
use crate::tracker::Tracker;

use listeners::ListenerList;
use visibility::VisibilityObserver;

/// Scroll container of the tracked element.
#[derive(Clone, Debug, PartialEq)]
pub enum Container {
    Viewport,
    Element(Element),
}

impl Container {
    fn event_target(&self) -> Result<EventTarget, OverswipeError> {
        match self {
            Container::Viewport => Ok(web_sys::window().ok_or(OverswipeError::NoWindow)?.into()),
            Container::Element(el) => Ok(el.clone().into()),
        }
    }

    fn observer_root(&self) -> Option<&Element> {
        match self {
            Container::Viewport => None,
            Container::Element(el) => Some(el),
        }
    }

    fn bounds(&self) -> ContainerBounds {
        match self {
            Container::Viewport => {
                let window = web_sys::window();
                let size = |v: Option<wasm_bindgen::JsValue>| v.and_then(|v| v.as_f64()).unwrap_or(0.0);
                ContainerBounds::Viewport {
                    width: size(window.as_ref().and_then(|w| w.inner_width().ok())),
                    height: size(window.as_ref().and_then(|w| w.inner_height().ok())),
                }
            }
            Container::Element(el) => ContainerBounds::Element(bounds_of(el)),
        }
    }
}

pub fn bounds_of(el: &Element) -> Bounds {
    let rect = el.get_bounding_client_rect();
    Bounds {
        top: rect.top(),
        left: rect.left(),
        right: rect.right(),
        bottom: rect.bottom(),
        width: rect.width(),
        height: rect.height(),
    }
}

pub fn is_in_path(event: &Event, el: &Element) -> bool {
    event.composed_path().includes(el, 0)
}

/// First contact point of a touch event.
pub fn touch_sample(event: &TouchEvent) -> Option<TouchSample> {
    let touch = event.touches().item(0)?;
    Some(TouchSample {
        x: touch.client_x() as f64,
        y: touch.client_y() as f64,
        time_ms: event.time_stamp(),
    })
}

pub struct DomHost {
    element: Element,
    container: Container,
}

impl Host for DomHost {
    type Timer = Timeout;

    fn relative_offsets(&self) -> Edges<f64> {
        relative_offsets(&bounds_of(&self.element), &self.container.bounds())
    }

    fn set_timer(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, callback)
    }

    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

pub struct Overswipe {
    element: Element,
    tracker: Tracker<DomHost>,
    listeners: RefCell<ListenerList>,
    visibility: RefCell<Option<VisibilityObserver>>,
    wheel_on: Cell<bool>,
    touch_on: Cell<bool>,
}

/// Starts tracking `element` inside `container` and enables the input kinds named in `options`.
pub fn attach(element: &Element, container: Container, options: &Options) -> Result<Overswipe, OverswipeError> {
    let overswipe = Overswipe::new(element, container, options.settings())?;
    if options.touch_enabled() {
        overswipe.listen_touch()?;
    }
    if options.wheel {
        overswipe.listen_wheel()?;
    }
    Ok(overswipe)
}

impl Overswipe {
    /// Visibility and scroll wiring only; wheel and touch are opt-in.
    pub fn new(element: &Element, container: Container, settings: Settings) -> Result<Self, OverswipeError> {
        let target = container.event_target()?;
        let tracker = Tracker::new(
            DomHost {
                element: element.clone(),
                container: container.clone(),
            },
            settings,
        );

        let observer = {
            let tracker = tracker.clone();
            VisibilityObserver::observe(
                container.observer_root(),
                element,
                settings.bounds_margin,
                move |visible| tracker.set_visible(visible),
            )?
        };

        let mut listeners = ListenerList::new(target);
        {
            let tracker = tracker.clone();
            listeners.listen("scroll", None, move |_| tracker.scroll())?;
        }

        Ok(Self {
            element: element.clone(),
            tracker,
            listeners: RefCell::new(listeners),
            visibility: RefCell::new(Some(observer)),
            wheel_on: Cell::new(false),
            touch_on: Cell::new(false),
        })
    }

    pub fn tracker(&self) -> &Tracker<DomHost> {
        &self.tracker
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    /// DOM listeners currently registered on the container.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_listening(&self) -> bool {
        !self.listeners.borrow().is_empty()
    }

    pub fn listen_wheel(&self) -> Result<(), OverswipeError> {
        if self.wheel_on.replace(true) {
            return Ok(());
        }
        let tracker = self.tracker.clone();
        let element = self.element.clone();
        self.listeners
            .borrow_mut()
            .listen("wheel", Some(false), move |event: Event| {
                let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                    return;
                };
                let input = WheelInput {
                    delta_y: wheel.delta_y(),
                    in_path: is_in_path(&event, &element),
                    cancelable: event.cancelable(),
                };
                if tracker.wheel(input) {
                    event.prevent_default();
                }
            })
    }

    pub fn listen_touch(&self) -> Result<(), OverswipeError> {
        if self.touch_on.replace(true) {
            return Ok(());
        }
        let mut listeners = self.listeners.borrow_mut();
        {
            let tracker = self.tracker.clone();
            let element = self.element.clone();
            listeners.listen("touchstart", None, move |event: Event| {
                let Some(sample) = event.dyn_ref::<TouchEvent>().and_then(touch_sample) else {
                    return;
                };
                tracker.touch_start(TouchInput {
                    sample,
                    in_path: is_in_path(&event, &element),
                    cancelable: event.cancelable(),
                });
            })?;
        }
        {
            let tracker = self.tracker.clone();
            let element = self.element.clone();
            listeners.listen("touchmove", Some(false), move |event: Event| {
                let Some(sample) = event.dyn_ref::<TouchEvent>().and_then(touch_sample) else {
                    return;
                };
                let input = TouchInput {
                    sample,
                    in_path: is_in_path(&event, &element),
                    cancelable: event.cancelable(),
                };
                if tracker.touch_move(input) {
                    event.prevent_default();
                }
            })?;
        }
        for kind in ["touchend", "touchcancel"] {
            let tracker = self.tracker.clone();
            listeners.listen(kind, None, move |_| tracker.touch_end())?;
        }
        Ok(())
    }

    pub fn on(&self, kind: EventType, direction: Direction, handler: Handler) -> Unsubscribe {
        self.tracker.on(kind, direction, handler)
    }

    pub fn on_all(&self, kind: EventType, handler: Handler) -> Unsubscribe {
        self.tracker.on_all(kind, handler)
    }

    pub fn off(&self, kind: EventType, direction: Direction, handler: &Handler) {
        self.tracker.off(kind, direction, handler);
    }

    /// Removes every listener, stops observing and cancels pending timers.
    pub fn disconnect(&self) {
        self.listeners.borrow_mut().clear();
        if let Some(observer) = self.visibility.borrow_mut().take() {
            observer.disconnect();
        }
        self.tracker.disconnect();
    }
}

impl Drop for Overswipe {
    fn drop(&mut self) {
        self.disconnect();
    }
}
