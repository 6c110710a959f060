/// Host primitive that runs the next tick at the next display refresh.
///
/// One call requests exactly one future tick. The controller never requests a
/// second refresh while one is outstanding.
pub trait RefreshScheduler {
    fn request_refresh(&mut self);
}

/// Scheduler that only counts requests.
///
/// Useful for headless hosts that drive `tick()` themselves, and in tests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CountingScheduler {
    pub requests: usize,
}

impl RefreshScheduler for CountingScheduler {
    fn request_refresh(&mut self) {
        self.requests += 1;
    }
}
