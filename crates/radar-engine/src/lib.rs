//! Radar engine crate.
//!
//! This crate owns the simulation loop of the air-traffic-control client: timing,
//! the subsystem hook contract, the lifecycle controller, and the winit host
//! that drives ticks from display refreshes.

pub mod time;
pub mod core;
pub mod content;
pub mod lifecycle;
pub mod sim;
pub mod window;

pub mod logging;

#[cfg(test)]
mod testing;
