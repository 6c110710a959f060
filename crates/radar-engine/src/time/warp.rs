use std::fmt;

/// Fast-forward factors cycled by `TimeWarp::toggle`.
pub const TIME_WARP_STEPS: [f64; 3] = [1.0, 2.0, 5.0];

/// Multiplier applied to real elapsed time before any subsystem sees it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TimeWarp {
    factor: f64,
}

impl TimeWarp {
    #[inline]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Sets an explicit factor. Zero, negative, and non-finite factors are rejected.
    pub fn set(&mut self, factor: f64) -> Result<(), TimeWarpError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(TimeWarpError::NotPositive(factor));
        }
        self.factor = factor;
        Ok(())
    }

    /// Steps the fast-forward button: 1 → 2 → 5 → 1.
    ///
    /// A factor set to anything else through `set` jumps to 5.
    pub fn toggle(&mut self) -> f64 {
        self.factor = if self.factor == 5.0 {
            1.0
        } else if self.factor == 1.0 {
            2.0
        } else {
            5.0
        };
        self.factor
    }

    pub fn reset(&mut self) {
        self.factor = 1.0;
    }
}

impl Default for TimeWarp {
    fn default() -> Self {
        Self { factor: 1.0 }
    }
}

/// Rejected time-warp factor.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TimeWarpError {
    NotPositive(f64),
}

impl fmt::Display for TimeWarpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPositive(v) => write!(f, "time warp factor must be positive and finite, got {v}"),
        }
    }
}

impl std::error::Error for TimeWarpError {}
