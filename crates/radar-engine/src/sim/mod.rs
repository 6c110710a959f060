//! Simulation loop body.
//!
//! `Simulation` owns the clock, time-warp, frame accounting, and run flags.
//! Its `tick` is a plain synchronous function; the host re-invokes it through a
//! `RefreshScheduler`, so it can be driven by hand in tests.

mod state;
mod tick;

pub use state::RunState;
pub use tick::{Simulation, TickOutcome};
