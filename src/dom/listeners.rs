// Bundle of DOM listeners sharing one target, removed together
use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

use crate::error::{OverswipeError, js_message};

struct Listener {
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

pub struct ListenerList {
    target: EventTarget,
    listeners: Vec<Listener>,
}

impl ListenerList {
    pub fn new(target: EventTarget) -> Self {
        Self {
            target,
            listeners: Vec::new(),
        }
    }

    /// `passive: Some(false)` is needed for handlers that call `prevent_default`.
    pub fn listen<F>(&mut self, kind: &'static str, passive: Option<bool>, handler: F) -> Result<(), OverswipeError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let added = match passive {
            Some(passive) => {
                let options = AddEventListenerOptions::new();
                options.set_passive(passive);
                self.target
                    .add_event_listener_with_callback_and_add_event_listener_options(
                        kind,
                        callback.as_ref().unchecked_ref(),
                        &options,
                    )
            }
            None => self
                .target
                .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref()),
        };
        added.map_err(|err| OverswipeError::Listen {
            event: kind,
            message: js_message(&err),
        })?;
        self.listeners.push(Listener { kind, callback });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn clear(&mut self) {
        for listener in self.listeners.drain(..) {
            if let Err(err) = self.target.remove_event_listener_with_callback(
                listener.kind,
                listener.callback.as_ref().unchecked_ref(),
            ) {
                warn!("failed to remove `{}` listener: {}", listener.kind, js_message(&err));
            }
        }
    }
}

impl Drop for ListenerList {
    fn drop(&mut self) {
        self.clear();
    }
}
