use std::fmt;

/// Controller states, in the order they are entered.
///
/// `Disposed` is reachable from every state.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LifecyclePhase {
    Constructed,
    ChildrenWired,
    PreInitialized,
    Initialized,
    Ready,
    Running,
    Disposed,
}

impl LifecyclePhase {
    /// Whether display refreshes drive ticks in this phase.
    pub fn is_live(self) -> bool {
        matches!(self, LifecyclePhase::Ready | LifecyclePhase::Running)
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecyclePhase::Constructed => "constructed",
            LifecyclePhase::ChildrenWired => "children-wired",
            LifecyclePhase::PreInitialized => "pre-initialized",
            LifecyclePhase::Initialized => "initialized",
            LifecyclePhase::Ready => "ready",
            LifecyclePhase::Running => "running",
            LifecyclePhase::Disposed => "disposed",
        };
        f.write_str(name)
    }
}
