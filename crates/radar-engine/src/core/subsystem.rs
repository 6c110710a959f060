use std::fmt;

use anyhow::Result;

use super::ctx::SimCtx;

/// Named collaborators known to the lifecycle controller.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum SubsystemId {
    Tutorial,
    Game,
    Input,
    Airline,
    Aircraft,
    Airport,
    Canvas,
    Ui,
    Speech,
}

impl SubsystemId {
    pub const ALL: [SubsystemId; 9] = [
        SubsystemId::Tutorial,
        SubsystemId::Game,
        SubsystemId::Input,
        SubsystemId::Airline,
        SubsystemId::Aircraft,
        SubsystemId::Airport,
        SubsystemId::Canvas,
        SubsystemId::Ui,
        SubsystemId::Speech,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SubsystemId::Tutorial => "tutorial",
            SubsystemId::Game => "game",
            SubsystemId::Input => "input",
            SubsystemId::Airline => "airline",
            SubsystemId::Aircraft => "aircraft",
            SubsystemId::Airport => "airport",
            SubsystemId::Canvas => "canvas",
            SubsystemId::Ui => "ui",
            SubsystemId::Speech => "speech",
        }
    }
}

impl fmt::Display for SubsystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Extension points invoked by the controller.
///
/// Each hook has a fixed subsystem order, see [`Hook::order`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Hook {
    PreInit,
    Init,
    Ready,
    Complete,
    UpdatePre,
    Update,
    UpdatePost,
    Resize,
}

impl Hook {
    /// Subsystems invoked for this hook, in call order.
    ///
    /// Later entries may rely on state allocated by earlier ones (canvas and ui
    /// read what game and airport set up during pre-init).
    pub fn order(self) -> &'static [SubsystemId] {
        use SubsystemId::*;

        match self {
            Hook::PreInit => &[Tutorial, Game, Input, Airline, Aircraft, Airport, Canvas, Ui],
            Hook::Init => &[Speech, Tutorial, Input, Aircraft, Airport, Canvas, Ui],
            Hook::Ready => &[Airport],
            Hook::Complete => &[Game, Canvas, Ui],
            Hook::UpdatePre => &[Game],
            Hook::Update => &[Aircraft],
            Hook::UpdatePost => &[Canvas],
            Hook::Resize => &[Canvas],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Hook::PreInit => "pre-init",
            Hook::Init => "init",
            Hook::Ready => "ready",
            Hook::Complete => "complete",
            Hook::UpdatePre => "update-pre",
            Hook::Update => "update",
            Hook::UpdatePost => "update-post",
            Hook::Resize => "resize",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Collaborator contract implemented by higher layers.
///
/// Every hook defaults to a no-op, so a collaborator only implements the phases
/// it takes part in. Errors are fatal during startup and during the one-time
/// `complete` pass; errors from the per-tick hooks are logged and the frame
/// is skipped.
pub trait Subsystem {
    /// First initialization pass. Allocate owned state here.
    fn pre_init(&mut self, ctx: &mut SimCtx<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Second initialization pass; every collaborator has finished `pre_init`.
    fn init(&mut self, ctx: &mut SimCtx<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Called once content has loaded and the first layout pass ran.
    fn ready(&mut self, ctx: &mut SimCtx<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Deferred one-time setup, run on the first tick.
    fn complete(&mut self, ctx: &mut SimCtx<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Runs before aircraft state is advanced.
    fn update_pre(&mut self, ctx: &mut SimCtx<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Advances state by `ctx.time.dt`.
    fn update(&mut self, ctx: &mut SimCtx<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Runs after aircraft state is final for the frame.
    fn update_post(&mut self, ctx: &mut SimCtx<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Called when the viewport changes; `ctx.viewport` holds the new size.
    fn resize(&mut self, ctx: &mut SimCtx<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }
}

pub(crate) fn dispatch(subsystem: &mut dyn Subsystem, hook: Hook, ctx: &mut SimCtx<'_>) -> Result<()> {
    match hook {
        Hook::PreInit => subsystem.pre_init(ctx),
        Hook::Init => subsystem.init(ctx),
        Hook::Ready => subsystem.ready(ctx),
        Hook::Complete => subsystem.complete(ctx),
        Hook::UpdatePre => subsystem.update_pre(ctx),
        Hook::Update => subsystem.update(ctx),
        Hook::UpdatePost => subsystem.update_post(ctx),
        Hook::Resize => subsystem.resize(ctx),
    }
}
