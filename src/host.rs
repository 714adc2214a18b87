// Environment the tracker needs: element geometry, one-shot timers and a clock
use crate::model::Edges;

pub trait Host: 'static {
    /// Pending timer; dropping it cancels the callback.
    type Timer: 'static;

    /// Signed offsets of the tracked element past its container edges,
    /// read fresh on every call.
    fn relative_offsets(&self) -> Edges<f64>;

    fn set_timer(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Timer;

    fn now_ms(&self) -> f64;
}
