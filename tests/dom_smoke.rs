#![cfg(target_arch = "wasm32")]

use std::rc::Rc;

use js_sys::{Function, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use web_sys::Element;
use yew_overswipe::js::observe_element;
use yew_overswipe::{Container, EventType, Options, SwipeEvent, WheelInput, attach};

wasm_bindgen_test_configure!(run_in_browser);

fn mounted_div(style: &str) -> Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let el = document.create_element("div").unwrap();
    el.set_attribute("style", style).unwrap();
    document.body().unwrap().append_child(&el).unwrap();
    el
}

#[wasm_bindgen_test]
fn attach_and_disconnect() {
    let el = mounted_div("height:3000px;");
    let options = Options::from_json(r#"{"touch": true, "wheel": true}"#).unwrap();
    let overswipe = attach(&el, Container::Viewport, &options).unwrap();
    let _ = overswipe.on_all(EventType::Swipe, Rc::new(|_: &SwipeEvent| {}));

    // scroll, wheel, touchstart, touchmove, touchend, touchcancel
    assert_eq!(overswipe.listener_count(), 6);
    assert_eq!(overswipe.tracker().subscriber_count(), 4);
    assert!(overswipe.tracker().is_connected());

    overswipe.disconnect();
    assert!(!overswipe.is_listening());
    assert_eq!(overswipe.tracker().subscriber_count(), 0);
    assert!(!overswipe.tracker().is_connected());
    overswipe.disconnect();
    el.remove();
}

#[wasm_bindgen_test]
fn element_container_is_accepted() {
    let container = mounted_div("height:400px;");
    let el = mounted_div("height:1200px;");
    let overswipe = attach(&el, Container::Element(container.clone()), &Options::default()).unwrap();
    assert_eq!(overswipe.element(), &el);
    assert_eq!(overswipe.listener_count(), 1, "scroll only");
    drop(overswipe);
    el.remove();
    container.remove();
}

#[wasm_bindgen_test]
fn js_on_and_off_manage_subscriptions() {
    let el = mounted_div("height:3000px;");
    let handle = observe_element(el.clone(), None, JsValue::UNDEFINED).unwrap();
    let tracker = handle.overswipe().tracker();
    let handler = Function::new_no_args("");
    assert_eq!(tracker.subscriber_count(), 0);

    handle
        .on("swipe", JsValue::from_str("up"), Some(handler.clone()))
        .unwrap();
    assert_eq!(tracker.subscriber_count(), 1);

    let unsubscribe = handle.on("progress", handler.clone().into(), None).unwrap();
    assert_eq!(tracker.subscriber_count(), 5);

    // Same function, other type: progress subscriptions stay.
    handle.off("swipe", "up", &handler).unwrap();
    assert_eq!(tracker.subscriber_count(), 4);

    unsubscribe.call0(&JsValue::NULL).unwrap();
    assert_eq!(tracker.subscriber_count(), 0);

    handle.disconnect();
    el.remove();
}

#[wasm_bindgen_test]
fn js_on_rejects_unknown_names() {
    let el = mounted_div("height:3000px;");
    let handle = observe_element(el.clone(), None, JsValue::UNDEFINED).unwrap();
    let handler = Function::new_no_args("");

    assert!(handle
        .on("bogus", JsValue::from_str("up"), Some(handler.clone()))
        .is_err());
    assert!(handle
        .on("swipe", JsValue::from_str("sideways"), Some(handler.clone()))
        .is_err());
    assert!(handle.on("swipe", JsValue::from_str("up"), None).is_err());
    assert!(handle.off("cancel", "sideways", &handler).is_err());
    assert_eq!(handle.overswipe().tracker().subscriber_count(), 0);

    handle.disconnect();
    el.remove();
}

#[wasm_bindgen_test]
fn js_handler_receives_payload_object() {
    // Pinned to the top-left corner, so the top and left edges are reached.
    let el = mounted_div("position:fixed; top:0; left:0; width:100px; height:100px;");
    let handle = observe_element(el.clone(), None, JsValue::UNDEFINED).unwrap();
    let record = Function::new_with_args(
        "e",
        "globalThis.__overswipeSeen = e.type + ':' + e.direction + ':' + e.capedProgress",
    );
    handle.on("swipe", record.into(), None).unwrap();

    let tracker = handle.overswipe().tracker();
    tracker.rearm();
    assert!(tracker.allowed_sides().down);
    tracker.set_visible(true);
    tracker.wheel(WheelInput {
        delta_y: -400.0,
        in_path: true,
        cancelable: false,
    });

    let seen = Reflect::get(&js_sys::global(), &JsValue::from_str("__overswipeSeen")).unwrap();
    assert_eq!(seen.as_string().as_deref(), Some("swipe:down:1"));

    handle.disconnect();
    el.remove();
}
