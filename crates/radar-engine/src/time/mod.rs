//! Time subsystem.
//!
//! Provides stable, testable simulation timing without coupling to the runtime.
//! Intended usage:
//! - one `Clock` per controller, injected so tests can substitute `ManualClock`
//! - `elapsed_since` for warped delta time
//! - `FrameAccounting::tick()` once per presented frame

mod clock;
mod delta;
mod frame_clock;
mod warp;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use delta::{delta_between, elapsed_since};
pub use frame_clock::{FrameAccounting, FrameTime, FrameWindow, DEFAULT_FRAME_DELAY};
pub use warp::{TimeWarp, TimeWarpError, TIME_WARP_STEPS};
