use super::clock::Clock;
use super::warp::TimeWarp;

/// Warped seconds between `last` and `now`.
///
/// A `last` in the future (clock skew) yields zero rather than a negative delta,
/// so nothing ever moves backwards in simulated time. NaN also collapses to zero.
#[inline]
pub fn delta_between(now: f64, last: f64, warp: &TimeWarp) -> f64 {
    ((now - last) * warp.factor()).max(0.0)
}

/// Warped seconds elapsed since `last`, read from `clock`.
///
/// Does not update `last`; the caller owns its own marker.
pub fn elapsed_since(clock: &dyn Clock, warp: &TimeWarp, last: f64) -> f64 {
    delta_between(clock.now(), last, warp)
}
