//! JavaScript entry point: `observeElement(el, container?, options?)` returning an
//! object with `on` / `off` / `disconnect`.

use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{Container, DomHost, Overswipe, attach};
use crate::model::{Direction, EventType, Options, SwipeEvent};
use crate::state::dispatcher::Handler;
use crate::tracker::Tracker;

struct JsSubscription {
    kind: EventType,
    direction: Direction,
    function: js_sys::Function,
    handler: Handler,
}

struct Bindings {
    tracker: Tracker<DomHost>,
    subscriptions: RefCell<Vec<JsSubscription>>,
}

impl Bindings {
    fn add(&self, kind: EventType, direction: Direction, function: js_sys::Function) {
        let callee = function.clone();
        let handler: Handler = Rc::new(move |event: &SwipeEvent| match to_js(event) {
            Ok(payload) => {
                if let Err(err) = callee.call1(&JsValue::NULL, &payload) {
                    warn!("overswipe handler threw: {err:?}");
                }
            }
            Err(err) => warn!("overswipe payload not serializable: {err:?}"),
        });
        // Removed through `off` with the stored handler, so the handle is not kept.
        let _ = self.tracker.on(kind, direction, handler.clone());
        self.subscriptions.borrow_mut().push(JsSubscription {
            kind,
            direction,
            function,
            handler,
        });
    }

    fn remove(&self, kind: EventType, direction: Direction, function: &js_sys::Function) {
        let removed: Vec<JsSubscription> = {
            let mut subscriptions = self.subscriptions.borrow_mut();
            let (removed, kept) = subscriptions.drain(..).partition(|s| {
                s.kind == kind && s.direction == direction && s.function == *function
            });
            *subscriptions = kept;
            removed
        };
        for sub in removed {
            self.tracker.off(sub.kind, sub.direction, &sub.handler);
        }
    }
}

fn to_js(event: &SwipeEvent) -> Result<JsValue, JsValue> {
    let raw = serde_json::to_string(event).map_err(|err| JsValue::from_str(&err.to_string()))?;
    js_sys::JSON::parse(&raw)
}

fn parse_options(options: &JsValue) -> Result<Options, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(Options::default());
    }
    let raw = js_sys::JSON::stringify(options)?
        .as_string()
        .unwrap_or_default();
    Ok(Options::from_json(&raw)?)
}

#[wasm_bindgen(js_name = Overswipe)]
pub struct JsOverswipe {
    overswipe: Overswipe,
    bindings: Rc<Bindings>,
}

/// Tracks `element` inside `container` (the viewport when omitted).
#[wasm_bindgen(js_name = observeElement)]
pub fn observe_element(
    element: Element,
    container: Option<Element>,
    options: JsValue,
) -> Result<JsOverswipe, JsValue> {
    let options = parse_options(&options)?;
    let container = container.map_or(Container::Viewport, Container::Element);
    let overswipe = attach(&element, container, &options)?;
    let bindings = Rc::new(Bindings {
        tracker: overswipe.tracker().clone(),
        subscriptions: RefCell::new(Vec::new()),
    });
    Ok(JsOverswipe {
        overswipe,
        bindings,
    })
}

impl JsOverswipe {
    pub fn overswipe(&self) -> &Overswipe {
        &self.overswipe
    }
}

#[wasm_bindgen(js_class = Overswipe)]
impl JsOverswipe {
    /// `on(type, direction, handler)` or `on(type, handler)` for all directions.
    /// Returns a function that removes what this call registered.
    pub fn on(
        &self,
        kind: &str,
        direction_or_handler: JsValue,
        handler: Option<js_sys::Function>,
    ) -> Result<js_sys::Function, JsValue> {
        let kind: EventType = kind.parse()?;
        let (directions, function) = match direction_or_handler.dyn_into::<js_sys::Function>() {
            Ok(function) => (Direction::ALL.to_vec(), function),
            Err(value) => {
                let direction: Direction = value.as_string().unwrap_or_default().parse()?;
                let function = handler.ok_or_else(|| JsValue::from_str("missing handler"))?;
                (vec![direction], function)
            }
        };
        for &direction in &directions {
            self.bindings.add(kind, direction, function.clone());
        }

        let bindings = Rc::downgrade(&self.bindings);
        let unsubscribe = Closure::wrap(Box::new(move || {
            if let Some(bindings) = bindings.upgrade() {
                for &direction in &directions {
                    bindings.remove(kind, direction, &function);
                }
            }
        }) as Box<dyn FnMut()>);
        Ok(unsubscribe.into_js_value().unchecked_into())
    }

    pub fn off(&self, kind: &str, direction: &str, handler: &js_sys::Function) -> Result<(), JsValue> {
        let kind: EventType = kind.parse()?;
        let direction: Direction = direction.parse()?;
        self.bindings.remove(kind, direction, handler);
        Ok(())
    }

    #[wasm_bindgen(js_name = listenWheel)]
    pub fn listen_wheel(&self) -> Result<(), JsValue> {
        Ok(self.overswipe.listen_wheel()?)
    }

    #[wasm_bindgen(js_name = listenTouch)]
    pub fn listen_touch(&self) -> Result<(), JsValue> {
        Ok(self.overswipe.listen_touch()?)
    }

    pub fn disconnect(&self) {
        self.bindings.subscriptions.borrow_mut().clear();
        self.overswipe.disconnect();
    }
}
