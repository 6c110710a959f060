//! Application lifecycle.
//!
//! `LifecycleController` walks the collaborators through their one-time phases
//! (pre-init, init, ready) and then owns the running loop. Startup is
//! fail-fast: the first hook error aborts the sequence for good.

mod config;
mod controller;
mod error;
mod phase;

pub use config::EngineConfig;
pub use controller::LifecycleController;
pub use error::LifecycleError;
pub use phase::LifecyclePhase;
