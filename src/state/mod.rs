pub mod dispatcher;
pub mod geometry;
pub mod gesture;
pub mod touch;

pub use dispatcher::{Dispatcher, Handler, Unsubscribe};
pub use geometry::{ContainerBounds, allowed_sides, relative_offsets};
pub use gesture::{Effect, GestureState, Phase, TouchInput, WheelInput};
pub use touch::{TouchDelta, TouchSample, TouchState};
