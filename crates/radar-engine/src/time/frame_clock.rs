use super::clock::Clock;
use super::delta::delta_between;
use super::warp::TimeWarp;

/// Default FPS measurement window, in seconds.
pub const DEFAULT_FRAME_DELAY: f64 = 1.0;

/// Frame timing snapshot handed to per-tick hooks.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FrameTime {
    /// Warped seconds between the two most recent tick boundaries.
    pub dt: f64,

    /// Clock reading at the most recent tick boundary.
    pub now: f64,

    /// Frames completed so far.
    pub frame_index: u64,

    /// Most recent FPS measurement.
    pub fps: f64,
}

/// Rolling measurement window for the current frame batch.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameWindow {
    /// Clock reading when the window opened.
    pub start_time: f64,

    /// Window length; FPS is recomputed once the window is older than this.
    pub delay_threshold: f64,

    /// Frames counted since the window opened.
    pub count_since_window: u64,

    /// Clock reading at the last tick. Never decreases.
    pub last_tick_time: f64,

    /// Warped seconds computed at the last tick. Never negative.
    pub delta: f64,
}

/// Frame counters, delta time, and windowed FPS.
///
/// FPS is recomputed once per `delay_threshold` window rather than every frame,
/// which keeps the estimate free of single-frame jitter.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameAccounting {
    pub start_time: f64,
    pub frame_count: u64,
    pub current_frame: FrameWindow,
    pub measured_fps: f64,
}

impl FrameAccounting {
    /// Starts accounting at `now`.
    ///
    /// A non-positive or non-finite `delay_threshold` falls back to
    /// `DEFAULT_FRAME_DELAY`.
    pub fn new(now: f64, delay_threshold: f64) -> Self {
        let delay_threshold = if delay_threshold.is_finite() && delay_threshold > 0.0 {
            delay_threshold
        } else {
            log::warn!("frame delay {delay_threshold} is not a positive duration; using {DEFAULT_FRAME_DELAY}s");
            DEFAULT_FRAME_DELAY
        };

        Self {
            start_time: now,
            frame_count: 0,
            current_frame: FrameWindow {
                start_time: now,
                delay_threshold,
                count_since_window: 0,
                last_tick_time: now,
                delta: 0.0,
            },
            measured_fps: 0.0,
        }
    }

    /// Records one rendered frame and returns the resulting snapshot.
    pub fn tick(&mut self, clock: &dyn Clock, warp: &TimeWarp) -> FrameTime {
        self.frame_count += 1;

        let now = clock.now();
        let frame = &mut self.current_frame;
        frame.count_since_window += 1;

        let elapsed = now - frame.start_time;
        if elapsed > frame.delay_threshold {
            self.measured_fps = frame.count_since_window as f64 / elapsed;
            frame.count_since_window = 0;
            frame.start_time = now;
            log::trace!("fps {:.1} over {:.3}s", self.measured_fps, elapsed);
        }

        frame.delta = delta_between(now, frame.last_tick_time, warp);
        frame.last_tick_time = frame.last_tick_time.max(now);

        self.frame_time()
    }

    /// Resets the delta baseline and opens a new FPS window at `now`.
    ///
    /// Used when the loop resumes after a pause or starts after loading, so the
    /// idle interval is neither simulated nor averaged into the FPS estimate.
    /// Frame counters and the last FPS measurement are kept.
    pub fn reset(&mut self, now: f64) {
        let frame = &mut self.current_frame;
        frame.start_time = now;
        frame.count_since_window = 0;
        frame.last_tick_time = frame.last_tick_time.max(now);
        frame.delta = 0.0;
    }

    pub fn frame_time(&self) -> FrameTime {
        FrameTime {
            dt: self.current_frame.delta,
            now: self.current_frame.last_tick_time,
            frame_index: self.frame_count,
            fps: self.measured_fps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualClock;

    fn accounting(clock: &ManualClock) -> FrameAccounting {
        FrameAccounting::new(clock.now(), DEFAULT_FRAME_DELAY)
    }

    // ── fps window ────────────────────────────────────────────────────────

    #[test]
    fn fps_unchanged_until_window_elapses() {
        let clock = ManualClock::new(0.0);
        let mut acc = accounting(&clock);

        for frame in 1..=59 {
            clock.set(frame as f64 * 0.98 / 59.0);
            acc.tick(&clock, &TimeWarp::default());
        }
        assert!(clock.now() <= 0.98 + 1e-9);
        assert_eq!(acc.measured_fps, 0.0);
        assert_eq!(acc.current_frame.count_since_window, 59);

        clock.set(1.001);
        acc.tick(&clock, &TimeWarp::default());
        assert!((acc.measured_fps - 60.0).abs() < 0.1);
        assert_eq!(acc.current_frame.count_since_window, 0);
        assert_eq!(acc.current_frame.start_time, 1.001);
    }

    #[test]
    fn window_boundary_is_exclusive() {
        let clock = ManualClock::new(0.0);
        let mut acc = accounting(&clock);
        clock.set(1.0);
        acc.tick(&clock, &TimeWarp::default());
        assert_eq!(acc.measured_fps, 0.0);
        assert_eq!(acc.current_frame.count_since_window, 1);
    }

    #[test]
    fn recomputes_at_most_once_per_window() {
        let clock = ManualClock::new(0.0);
        let mut acc = accounting(&clock);
        let mut recomputes = 0;
        let mut last_reset = 0.0;

        // 200 frames at 120fps
        for _ in 0..200 {
            clock.advance(1.0 / 120.0);
            let before = acc.current_frame.start_time;
            acc.tick(&clock, &TimeWarp::default());
            if acc.current_frame.start_time != before {
                assert_eq!(acc.current_frame.count_since_window, 0);
                assert!(clock.now() - last_reset > DEFAULT_FRAME_DELAY);
                last_reset = clock.now();
                recomputes += 1;
            }
        }
        assert_eq!(recomputes, 1);
        assert_eq!(acc.frame_count, 200);
    }

    #[test]
    fn invalid_threshold_falls_back_to_default() {
        for threshold in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let acc = FrameAccounting::new(0.0, threshold);
            assert_eq!(acc.current_frame.delay_threshold, DEFAULT_FRAME_DELAY);
        }
    }

    // ── delta ─────────────────────────────────────────────────────────────

    #[test]
    fn delta_tracks_warped_interval_between_ticks() {
        let clock = ManualClock::new(0.0);
        let mut acc = accounting(&clock);
        let mut warp = TimeWarp::default();
        warp.set(2.0).unwrap();

        clock.advance(0.5);
        let ft = acc.tick(&clock, &warp);
        assert_eq!(ft.dt, 1.0);
        assert_eq!(ft.frame_index, 1);
        assert_eq!(acc.current_frame.last_tick_time, 0.5);
    }

    #[test]
    fn clock_skew_yields_zero_delta_and_keeps_last_tick() {
        let clock = ManualClock::new(10.0);
        let mut acc = accounting(&clock);

        clock.set(9.5);
        let ft = acc.tick(&clock, &TimeWarp::default());
        assert_eq!(ft.dt, 0.0);
        assert_eq!(acc.current_frame.last_tick_time, 10.0);

        clock.set(10.25);
        let ft = acc.tick(&clock, &TimeWarp::default());
        assert_eq!(ft.dt, 0.25);
    }

    // ── reset ─────────────────────────────────────────────────────────────

    #[test]
    fn reset_rebases_delta_and_window() {
        let clock = ManualClock::new(0.0);
        let mut acc = accounting(&clock);
        for _ in 0..10 {
            clock.advance(0.02);
            acc.tick(&clock, &TimeWarp::default());
        }

        clock.advance(300.0);
        acc.reset(clock.now());
        assert_eq!(acc.frame_time().dt, 0.0);
        assert_eq!(acc.current_frame.count_since_window, 0);
        assert_eq!(acc.current_frame.start_time, clock.now());

        clock.advance(0.02);
        let ft = acc.tick(&clock, &TimeWarp::default());
        assert!((ft.dt - 0.02).abs() < 1e-9);
        assert_eq!(ft.frame_index, 11);
        assert_eq!(acc.measured_fps, 0.0);
    }

    #[test]
    fn reset_never_moves_last_tick_backwards() {
        let clock = ManualClock::new(10.0);
        let mut acc = accounting(&clock);
        acc.reset(9.0);
        assert_eq!(acc.current_frame.last_tick_time, 10.0);
    }
}
