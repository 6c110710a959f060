/// Loop run flags.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct RunState {
    /// Whether the loop re-arms itself each tick.
    pub running: bool,

    /// Set once, on the first tick, after the completion hooks ran.
    pub completed_bootstrap: bool,

    /// A refresh has been requested and its tick has not run yet.
    pub armed: bool,
}

impl RunState {
    pub fn new(running: bool) -> Self {
        Self {
            running,
            completed_bootstrap: false,
            armed: false,
        }
    }
}
