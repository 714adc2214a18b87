use wasm_bindgen::JsValue;

/// Failures of the DOM/JS surface. The gesture core itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum OverswipeError {
    #[error("no global `window` exists")]
    NoWindow,
    #[error("failed to listen for `{event}`: {message}")]
    Listen { event: &'static str, message: String },
    #[error("intersection observer unavailable: {0}")]
    Observer(String),
    #[error("invalid options: {0}")]
    Options(#[from] serde_json::Error),
    #[error("unknown swipe direction `{0}`")]
    UnknownDirection(String),
    #[error("unknown event type `{0}`")]
    UnknownEventType(String),
}

pub(crate) fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

impl From<OverswipeError> for JsValue {
    fn from(err: OverswipeError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
