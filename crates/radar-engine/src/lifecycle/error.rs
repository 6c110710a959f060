use std::fmt;

use super::phase::LifecyclePhase;
use crate::core::SubsystemId;

/// Startup and wiring errors raised by the controller itself.
///
/// Hook failures are reported as `anyhow::Error` with the subsystem named in
/// the context chain; these variants cover the controller's own checks.
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleError {
    /// A lifecycle step was called out of order.
    InvalidTransition { from: LifecyclePhase, to: LifecyclePhase },
    /// A hook order names a subsystem the table does not contain.
    MissingSubsystem(SubsystemId),
    /// A queued content item failed to load.
    ContentFailed { label: String, reason: String },
    /// An earlier startup step failed; the controller will not continue.
    Aborted,
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTransition { from, to } => {
                write!(f, "invalid lifecycle transition {from} -> {to}")
            }
            Self::MissingSubsystem(id) => write!(f, "subsystem '{id}' is not registered"),
            Self::ContentFailed { label, reason } => {
                write!(f, "content '{label}' failed to load: {reason}")
            }
            Self::Aborted => f.write_str("startup was aborted by an earlier error"),
        }
    }
}

impl std::error::Error for LifecycleError {}
