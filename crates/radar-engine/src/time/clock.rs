use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic time source, in seconds since an arbitrary epoch.
///
/// Successive calls on the same clock never return a smaller value.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Wall clock backed by `Instant`.
///
/// The last reading is remembered so that a platform timer stepping backwards
/// can never make `now()` decrease.
#[derive(Debug)]
pub struct MonotonicClock {
    epoch: Instant,
    last: Cell<f64>,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            last: Cell::new(0.0),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        let reading = self.epoch.elapsed().as_secs_f64();
        let now = reading.max(self.last.get());
        self.last.set(now);
        now
    }
}

/// Hand-driven clock for tests and headless hosts.
///
/// Clones share the same reading, so a test can keep one handle while the
/// controller owns another. Unlike `MonotonicClock` it can be set backwards,
/// which is how clock skew is simulated.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, seconds: f64) {
        self.now.set(seconds);
    }

    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}
