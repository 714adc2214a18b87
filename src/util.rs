// Small numeric helpers shared by the geometry and payload code

/// Mirrors `value` inside `[min, max]`; used when a range is given reversed.
pub fn flip_value(value: f64, min: f64, max: f64) -> f64 {
    let sign = if value == 0.0 { 1.0 } else { value.signum() };
    (value * sign - max).abs() + min
}

/// Linear position of `value` inside `[min, max]` (0 at `min`, 1 at `max`).
/// Not clamped: values outside the range map below 0 or above 1.
pub fn value_to_progress(value: f64, min: f64, max: f64) -> f64 {
    if min > max {
        return value_to_progress(flip_value(value, max, min), max, min);
    }
    (value - min) / (max - min)
}

pub fn is_in_range(n: f64, min: f64, max: f64, exclusive: bool) -> bool {
    let (lo, hi) = if min > max { (max, min) } else { (min, max) };
    if exclusive {
        n > lo && n < hi
    } else {
        n >= lo && n <= hi
    }
}

pub fn is_close(n: f64, goal: f64, range: f64) -> bool {
    is_in_range(n, goal - range, goal + range, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_linear_and_unclamped() {
        assert_eq!(value_to_progress(125.0, 0.0, 250.0), 0.5);
        assert_eq!(value_to_progress(500.0, 0.0, 250.0), 2.0);
        assert_eq!(value_to_progress(-125.0, 0.0, 250.0), -0.5);
    }

    #[test]
    fn reversed_range_is_flipped() {
        // 10 of [0, 100] read from the far end is 90.
        assert_eq!(value_to_progress(10.0, 100.0, 0.0), 0.9);
    }

    #[test]
    fn closeness_is_inclusive() {
        assert!(is_close(50.0, 0.0, 50.0));
        assert!(is_close(-50.0, 0.0, 50.0));
        assert!(!is_close(50.1, 0.0, 50.0));
        assert!(is_in_range(5.0, 10.0, 0.0, true));
        assert!(!is_in_range(10.0, 10.0, 0.0, true));
    }
}
