//! Test doubles shared by the unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use anyhow::{bail, Result};

use crate::core::{Control, ControlCtx, Hook, SimCtx, Subsystem, SubsystemId, SubsystemTable, Viewport};
use crate::time::FrameTime;

#[derive(Default)]
struct Inner {
    calls: Vec<String>,
    fail: HashSet<String>,
    controls: HashMap<String, Control>,
    frame_times: Vec<FrameTime>,
}

/// Shared record of `"<subsystem>.<hook>"` calls.
#[derive(Clone, Default)]
pub(crate) struct CallLog(Rc<RefCell<Inner>>);

impl CallLog {
    pub fn recorder(&self, id: SubsystemId) -> Recorder {
        Recorder { id, log: self.clone() }
    }

    /// Makes the named call return an error.
    pub fn fail_on(&self, call: &str) {
        self.0.borrow_mut().fail.insert(call.to_string());
    }

    pub fn succeed_on(&self, call: &str) {
        self.0.borrow_mut().fail.remove(call);
    }

    /// Makes the named call raise `control`.
    pub fn control_on(&self, call: &str, control: Control) {
        self.0.borrow_mut().controls.insert(call.to_string(), control);
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut self.0.borrow_mut().calls)
    }

    pub fn count(&self, call: &str) -> usize {
        self.0.borrow().calls.iter().filter(|c| *c == call).count()
    }

    /// Frame times seen by the aircraft `update` hook.
    pub fn frame_times(&self) -> Vec<FrameTime> {
        self.0.borrow().frame_times.clone()
    }
}

pub(crate) struct Recorder {
    id: SubsystemId,
    log: CallLog,
}

impl Recorder {
    fn record(&mut self, hook: Hook, ctx: &mut SimCtx<'_>) -> Result<()> {
        let call = format!("{}.{}", self.id, hook);
        let mut inner = self.log.0.borrow_mut();
        inner.calls.push(call.clone());
        if hook == Hook::Update {
            inner.frame_times.push(ctx.time);
        }

        match inner.controls.get(&call) {
            Some(Control::SetRunning(running)) => ctx.control.set_running(*running),
            Some(Control::ToggleRunning) => ctx.control.toggle_running(),
            Some(Control::SetTimeWarp(factor)) => ctx.control.set_time_warp(*factor),
            Some(Control::ToggleTimeWarp) => ctx.control.toggle_time_warp(),
            None => {}
        }

        if inner.fail.contains(&call) {
            bail!("{call} failed");
        }
        Ok(())
    }
}

impl Subsystem for Recorder {
    fn pre_init(&mut self, ctx: &mut SimCtx<'_>) -> Result<()> {
        self.record(Hook::PreInit, ctx)
    }

    fn init(&mut self, ctx: &mut SimCtx<'_>) -> Result<()> {
        self.record(Hook::Init, ctx)
    }

    fn ready(&mut self, ctx: &mut SimCtx<'_>) -> Result<()> {
        self.record(Hook::Ready, ctx)
    }

    fn complete(&mut self, ctx: &mut SimCtx<'_>) -> Result<()> {
        self.record(Hook::Complete, ctx)
    }

    fn update_pre(&mut self, ctx: &mut SimCtx<'_>) -> Result<()> {
        self.record(Hook::UpdatePre, ctx)
    }

    fn update(&mut self, ctx: &mut SimCtx<'_>) -> Result<()> {
        self.record(Hook::Update, ctx)
    }

    fn update_post(&mut self, ctx: &mut SimCtx<'_>) -> Result<()> {
        self.record(Hook::UpdatePost, ctx)
    }

    fn resize(&mut self, ctx: &mut SimCtx<'_>) -> Result<()> {
        self.record(Hook::Resize, ctx)
    }
}

/// Table with a recorder registered for every subsystem.
pub(crate) fn full_table(log: &CallLog) -> SubsystemTable {
    SubsystemId::ALL
        .into_iter()
        .fold(SubsystemTable::new(), |table, id| table.with(id, log.recorder(id)))
}

/// Bare context with no content queue.
pub(crate) fn ctx(control: &mut ControlCtx) -> SimCtx<'_> {
    SimCtx {
        time: FrameTime::default(),
        viewport: Viewport::default(),
        time_warp: 1.0,
        running: true,
        control,
        content: None,
    }
}
