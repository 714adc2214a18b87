// Leading + trailing throttle, clock-agnostic so it can run off host time

#[derive(Debug, PartialEq)]
pub enum Throttled<T> {
    /// Deliver now.
    Run(T),
    /// Held back; `trailing_in` is set when the caller must arm a trailing timer.
    Deferred { trailing_in: Option<u32> },
}

#[derive(Debug)]
pub struct Throttle<T> {
    wait_ms: f64,
    last_run: Option<f64>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    pub fn new(wait_ms: u32) -> Self {
        Self {
            wait_ms: wait_ms as f64,
            last_run: None,
            pending: None,
        }
    }

    pub fn call(&mut self, now: f64, value: T) -> Throttled<T> {
        if let Some(last) = self.last_run {
            let elapsed = now - last;
            if (0.0..self.wait_ms).contains(&elapsed) {
                let first = self.pending.replace(value).is_none();
                return Throttled::Deferred {
                    trailing_in: first.then(|| (self.wait_ms - elapsed).ceil() as u32),
                };
            }
        }
        self.last_run = Some(now);
        self.pending = None;
        Throttled::Run(value)
    }

    /// Takes the latest held-back value, counting it as a delivery at `now`.
    pub fn flush(&mut self, now: f64) -> Option<T> {
        let value = self.pending.take()?;
        self.last_run = Some(now);
        Some(value)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
