//! Overswipe detection for yew/web-sys apps.
//!
//! Reports `progress`, `swipe` and `cancel` events when the user drags, flicks
//! or wheel-scrolls past the edge of a tracked element, e.g. to move to the next
//! page once the reader hits the bottom of the current one.
//!
//! The gesture logic ([`state`], [`tracker`]) runs against the [`host::Host`]
//! trait and has no DOM dependency; [`dom`] provides the browser host and
//! [`dom::attach`] wires everything to a real element.

pub mod dom;
pub mod error;
pub mod hooks;
pub mod host;
pub mod js;
pub mod model;
pub mod state;
pub mod timing;
pub mod tracker;
pub mod util;

pub use dom::{Container, Overswipe, attach};
pub use error::OverswipeError;
pub use hooks::use_overswipe;
pub use host::Host;
pub use model::{AllowedSides, Direction, EventType, Options, Settings, SwipeEvent, TouchOption};
pub use state::{Handler, Phase, TouchInput, TouchSample, Unsubscribe, WheelInput};
pub use tracker::Tracker;
