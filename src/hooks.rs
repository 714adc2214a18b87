use std::rc::Rc;

use log::warn;
use web_sys::Element;
use yew::prelude::*;

use crate::dom::{Container, attach};
use crate::model::{EventType, Options, SwipeEvent};

/// Tracks the element behind `target` against the viewport and forwards every
/// progress/swipe/cancel event to `on_event`.
///
/// Attaches after mount, re-attaches when `options` change and detaches on
/// unmount. `on_event` may change between renders; the latest one is called.
#[hook]
pub fn use_overswipe(target: NodeRef, options: Options, on_event: Callback<SwipeEvent>) {
    let latest = use_mut_ref(|| on_event.clone());
    *latest.borrow_mut() = on_event;

    use_effect_with((target, options), move |(target, options)| {
        let attached = target.cast::<Element>().and_then(|element| {
            attach(&element, Container::Viewport, options)
                .map_err(|err| warn!("overswipe attach failed: {err}"))
                .ok()
        });
        let subscriptions = attached.as_ref().map(|overswipe| {
            [EventType::Progress, EventType::Swipe, EventType::Cancel].map(|kind| {
                let latest = latest.clone();
                overswipe.on_all(
                    kind,
                    Rc::new(move |event: &SwipeEvent| {
                        // Emitting may re-render and replace the stored callback.
                        let callback = latest.borrow().clone();
                        callback.emit(*event);
                    }),
                )
            })
        });
        move || {
            if let Some(subscriptions) = subscriptions {
                subscriptions.into_iter().for_each(|s| s.unsubscribe());
            }
            drop(attached);
        }
    });
}
