// IntersectionObserver wrapper reporting whether the element is on screen
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::error::{OverswipeError, js_message};

pub struct VisibilityObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array)>,
}

impl VisibilityObserver {
    /// `root` of `None` observes against the viewport. The root box is shrunk by
    /// `margin` px on every side before intersecting.
    pub fn observe<F>(root: Option<&Element>, element: &Element, margin: f64, mut on_change: F) -> Result<Self, OverswipeError>
    where
        F: FnMut(bool) + 'static,
    {
        let callback = Closure::wrap(Box::new(move |entries: js_sys::Array| {
            let latest = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .last();
            if let Some(entry) = latest {
                on_change(entry.is_intersecting());
            }
        }) as Box<dyn FnMut(js_sys::Array)>);

        let init = IntersectionObserverInit::new();
        init.set_root_margin(&format!("-{margin}px"));
        if let Some(root) = root {
            init.set_root(Some(root.unchecked_ref()));
        }
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .map_err(|err| OverswipeError::Observer(js_message(&err)))?;
        observer.observe(element);
        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl Drop for VisibilityObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
