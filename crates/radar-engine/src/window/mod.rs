//! Window + host loop.
//!
//! Owns the `winit` EventLoop and Window and wires display refreshes to the
//! lifecycle controller.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
