//! Content loading.
//!
//! Loads run off the main thread and hand their bytes back over a channel.
//! The controller drains those handoffs only at lifecycle and tick boundaries,
//! so collaborators never observe a load completing mid-phase.

mod loading;
mod queue;

pub use loading::LoadingView;
pub use queue::{ContentHandle, ContentId, ContentQueue, ContentRequest, ContentSource, LoadedContent};
