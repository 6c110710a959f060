use crate::content::{ContentHandle, ContentQueue, ContentRequest};
use crate::time::FrameTime;

/// Viewport size in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}

/// Run-control request raised by a hook.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Control {
    SetRunning(bool),
    ToggleRunning,
    SetTimeWarp(f64),
    ToggleTimeWarp,
}

/// Run-control commands raised during a hook phase.
///
/// Commands are buffered and applied by the controller after the current
/// phase returns.
#[derive(Debug, Default)]
pub struct ControlCtx {
    commands: Vec<Control>,
}

impl ControlCtx {
    pub fn pause(&mut self) {
        self.commands.push(Control::SetRunning(false));
    }

    pub fn resume(&mut self) {
        self.commands.push(Control::SetRunning(true));
    }

    pub fn set_running(&mut self, running: bool) {
        self.commands.push(Control::SetRunning(running));
    }

    pub fn toggle_running(&mut self) {
        self.commands.push(Control::ToggleRunning);
    }

    pub fn set_time_warp(&mut self, factor: f64) {
        self.commands.push(Control::SetTimeWarp(factor));
    }

    pub fn toggle_time_warp(&mut self) {
        self.commands.push(Control::ToggleTimeWarp);
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub(crate) fn take(&mut self) -> Vec<Control> {
        std::mem::take(&mut self.commands)
    }
}

/// Per-call context passed to every `Subsystem` hook.
///
/// Lifetimes:
/// - `'a` is the duration of the hook phase
pub struct SimCtx<'a> {
    /// Timing snapshot from the most recent tick boundary.
    pub time: FrameTime,
    pub viewport: Viewport,
    pub time_warp: f64,
    pub running: bool,
    pub control: &'a mut ControlCtx,
    pub(crate) content: Option<&'a mut ContentQueue>,
}

impl<'a> SimCtx<'a> {
    /// Queues a content load.
    ///
    /// Returns `None` once the queue has been released by `dispose`.
    pub fn load_asset(&mut self, request: ContentRequest) -> Option<ContentHandle> {
        self.content.as_deref_mut().map(|queue| queue.add(request))
    }

    /// Number of content loads not yet handed back.
    pub fn pending_content(&self) -> usize {
        self.content.as_deref().map_or(0, ContentQueue::pending)
    }
}
