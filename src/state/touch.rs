// Touch sample normalization and per-sample motion deltas
use crate::model::Axis;

/// First contact point of a touch event plus the event timestamp.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TouchSample {
    pub x: f64,
    pub y: f64,
    pub time_ms: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TouchDelta {
    /// px/ms, signed.
    pub x_velocity: f64,
    pub y_velocity: f64,
    pub x_delta: f64,
    pub y_delta: f64,
}

/// Velocity between two readings; a zero (or non-finite) result is reported as 0.
pub fn velocity(from: f64, to: f64, time_from: f64, time_to: f64) -> f64 {
    let elapsed = time_to - time_from;
    if elapsed == 0.0 {
        return 0.0;
    }
    let v = (to - from) / elapsed;
    if v.is_finite() { v } else { 0.0 }
}

pub fn touch_delta(prev: &TouchSample, curr: &TouchSample) -> TouchDelta {
    TouchDelta {
        x_velocity: velocity(prev.x, curr.x, prev.time_ms, curr.time_ms),
        y_velocity: velocity(prev.y, curr.y, prev.time_ms, curr.time_ms),
        x_delta: curr.x - prev.x,
        y_delta: curr.y - prev.y,
    }
}

/// Dominant axis of a motion; one axis must be at least twice as fast as the other.
/// Diagonal motion yields `None`.
pub fn classify_axis(x_velocity: f64, y_velocity: f64) -> Option<Axis> {
    let (x, y) = (x_velocity.abs(), y_velocity.abs());
    if x == 0.0 && y == 0.0 {
        return None;
    }
    if x >= 2.0 * y {
        Some(Axis::Horizontal)
    } else if y >= 2.0 * x {
        Some(Axis::Vertical)
    } else {
        None
    }
}

// Last touch reading, kept between move events
#[derive(Default, Debug, Clone)]
pub struct TouchState {
    pub last: TouchSample,
}

impl TouchState {
    pub fn start(&mut self, sample: TouchSample) {
        self.last = sample;
    }

    /// Motion since the previous sample; `sample` becomes the new reference.
    pub fn advance(&mut self, sample: TouchSample) -> TouchDelta {
        let delta = touch_delta(&self.last, &sample);
        self.last = sample;
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_is_px_per_ms() {
        let a = TouchSample { x: 0.0, y: 0.0, time_ms: 0.0 };
        let b = TouchSample { x: 100.0, y: -20.0, time_ms: 50.0 };
        let d = touch_delta(&a, &b);
        assert_eq!(d.x_velocity, 2.0);
        assert_eq!(d.y_velocity, -0.4);
        assert_eq!(d.x_delta, 100.0);
        assert_eq!(d.y_delta, -20.0);
    }

    #[test]
    fn same_timestamp_gives_zero_velocity() {
        let a = TouchSample { x: 0.0, y: 0.0, time_ms: 10.0 };
        let b = TouchSample { x: 30.0, y: 5.0, time_ms: 10.0 };
        let d = touch_delta(&a, &b);
        assert_eq!(d.x_velocity, 0.0);
        assert_eq!(d.y_velocity, 0.0);
        assert_eq!(d.x_delta, 30.0);
    }

    #[test]
    fn axis_needs_a_two_to_one_ratio() {
        assert_eq!(classify_axis(10.0, 2.0), Some(Axis::Horizontal));
        assert_eq!(classify_axis(-1.0, 6.0), Some(Axis::Vertical));
        assert_eq!(classify_axis(4.0, 0.0), Some(Axis::Horizontal));
        assert_eq!(classify_axis(3.0, 3.0), None);
        assert_eq!(classify_axis(3.0, 2.0), None);
        assert_eq!(classify_axis(0.0, 0.0), None);
    }

    #[test]
    fn state_tracks_last_sample() {
        let mut state = TouchState::default();
        state.start(TouchSample { x: 5.0, y: 5.0, time_ms: 0.0 });
        let d = state.advance(TouchSample { x: 5.0, y: 65.0, time_ms: 20.0 });
        assert_eq!(d.y_velocity, 3.0);
        assert_eq!(state.last.y, 65.0);
    }
}
