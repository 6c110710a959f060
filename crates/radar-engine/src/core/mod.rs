//! Core engine-facing contracts.
//!
//! This module defines the stable interface between the simulation loop and the
//! collaborators it drives (game, aircraft, airport, canvas, ...). Collaborators
//! see a `SimCtx` per hook call and never reach into loop internals.

mod ctx;
mod refresh;
mod subsystem;
mod table;

pub use ctx::{Control, ControlCtx, SimCtx, Viewport};
pub use refresh::{CountingScheduler, RefreshScheduler};
pub use subsystem::{Hook, Subsystem, SubsystemId};
pub use table::SubsystemTable;
