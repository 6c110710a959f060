use anyhow::Result;

use super::state::RunState;
use crate::content::{ContentQueue, LoadingView};
use crate::core::{Control, ControlCtx, Hook, RefreshScheduler, SimCtx, SubsystemTable, Viewport};
use crate::time::{Clock, FrameAccounting, FrameTime, TimeWarp, TimeWarpError};

/// What a single `tick()` call did.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TickOutcome {
    /// The frame ran and the next tick is armed.
    Advanced,
    /// A per-tick hook failed; the rest of the frame was skipped, the next tick is armed.
    Recovered,
    /// The loop is paused; nothing ran and nothing was re-armed.
    Halted,
    /// The controller is not in a ticking phase.
    Idle,
}

/// Per-frame hooks, in the order they must run.
const FRAME_HOOKS: [Hook; 3] = [Hook::UpdatePre, Hook::Update, Hook::UpdatePost];

/// Simulation clock, time-warp, frame accounting, and run flags.
pub struct Simulation {
    clock: Box<dyn Clock>,
    warp: TimeWarp,
    accounting: FrameAccounting,
    run: RunState,
    viewport: Viewport,
    skipped_frames: u64,
}

impl Simulation {
    pub fn new(clock: Box<dyn Clock>, frame_delay: f64, running: bool) -> Self {
        let accounting = FrameAccounting::new(clock.now(), frame_delay);
        Self {
            clock,
            warp: TimeWarp::default(),
            accounting,
            run: RunState::new(running),
            viewport: Viewport::default(),
            skipped_frames: 0,
        }
    }

    /// Builds the context for one hook phase.
    pub fn ctx<'a>(
        &self,
        control: &'a mut ControlCtx,
        content: Option<&'a mut ContentQueue>,
    ) -> SimCtx<'a> {
        SimCtx {
            time: self.accounting.frame_time(),
            viewport: self.viewport,
            time_warp: self.warp.factor(),
            running: self.run.running,
            control,
            content,
        }
    }

    /// Requests the next refresh unless one is already outstanding.
    pub fn arm(&mut self, scheduler: &mut dyn RefreshScheduler) -> bool {
        if self.run.armed {
            return false;
        }
        self.run.armed = true;
        scheduler.request_refresh();
        true
    }

    /// Flips the run flag.
    ///
    /// Resuming rebases the frame timing and re-arms immediately when a scheduler
    /// is given; without one (the loop is not live yet) nothing is armed. Pausing never aborts a tick
    /// already in progress; the next tick simply does not re-arm.
    pub fn set_running(&mut self, running: bool, scheduler: Option<&mut dyn RefreshScheduler>) {
        let was_running = self.run.running;
        self.run.running = running;

        if was_running == running {
            return;
        }
        log::info!("simulation {}", if running { "resumed" } else { "paused" });

        if running {
            // Time spent paused is not simulated.
            self.rebase();
            if let Some(scheduler) = scheduler {
                self.arm(scheduler);
            }
        }
    }

    /// Restarts delta and FPS measurement from the current clock reading.
    pub fn rebase(&mut self) {
        self.accounting.reset(self.clock.now());
    }

    pub fn set_time_warp(&mut self, factor: f64) -> Result<(), TimeWarpError> {
        self.warp.set(factor)?;
        log::info!("time warp x{factor}");
        Ok(())
    }

    pub fn toggle_time_warp(&mut self) -> f64 {
        let factor = self.warp.toggle();
        log::info!("time warp x{factor}");
        factor
    }

    /// Applies run-control commands buffered by a hook phase.
    pub fn apply(&mut self, control: &mut ControlCtx, mut scheduler: Option<&mut dyn RefreshScheduler>) {
        for command in control.take() {
            let scheduler = scheduler.as_mut().map(|s| &mut **s as &mut dyn RefreshScheduler);
            match command {
                Control::SetRunning(running) => self.set_running(running, scheduler),
                Control::ToggleRunning => {
                    let running = !self.run.running;
                    self.set_running(running, scheduler);
                }
                Control::SetTimeWarp(factor) => {
                    if let Err(e) = self.set_time_warp(factor) {
                        log::warn!("ignoring time warp request: {e}");
                    }
                }
                Control::ToggleTimeWarp => {
                    self.toggle_time_warp();
                }
            }
        }
    }

    /// One loop iteration, invoked once per display refresh.
    ///
    /// Order: one-time completion hooks (first call only), run gate, re-arm,
    /// update-pre, update, update-post, frame accounting.
    ///
    /// Errors from the completion hooks are returned. Errors from the per-frame
    /// hooks are logged, skip the rest of the frame, and leave the next tick armed.
    pub fn tick(
        &mut self,
        subsystems: &mut SubsystemTable,
        mut content: Option<&mut ContentQueue>,
        loading: Option<&mut LoadingView>,
        scheduler: &mut dyn RefreshScheduler,
    ) -> Result<TickOutcome> {
        // The refresh that invoked us is consumed.
        self.run.armed = false;

        if !self.run.completed_bootstrap {
            let mut control = ControlCtx::default();
            subsystems.run(Hook::Complete, &mut self.ctx(&mut control, content.as_deref_mut()))?;
            if let Some(view) = loading {
                view.complete();
            }
            self.run.completed_bootstrap = true;
            self.apply(&mut control, None);
            log::debug!("bootstrap complete");
        }

        if !self.run.running {
            log::debug!("loop halted at frame {}", self.accounting.frame_count);
            return Ok(TickOutcome::Halted);
        }

        // Re-arm before the heavy work so a slow frame does not delay scheduling.
        self.arm(scheduler);

        let mut control = ControlCtx::default();
        let result = {
            let mut ctx = self.ctx(&mut control, content.as_deref_mut());
            FRAME_HOOKS
                .into_iter()
                .try_for_each(|hook| subsystems.run(hook, &mut ctx))
        };

        let outcome = match result {
            Ok(()) => TickOutcome::Advanced,
            Err(e) => {
                self.skipped_frames += 1;
                log::error!("frame {} skipped: {e:#}", self.accounting.frame_count + 1);
                TickOutcome::Recovered
            }
        };

        self.apply(&mut control, Some(scheduler));
        self.accounting.tick(self.clock.as_ref(), &self.warp);

        Ok(outcome)
    }

    /// Stops the loop for good: clears the run flag and forgets any outstanding refresh.
    pub fn halt(&mut self) {
        self.run.running = false;
        self.run.armed = false;
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn run_state(&self) -> RunState {
        self.run
    }

    pub fn is_running(&self) -> bool {
        self.run.running
    }

    pub fn time_warp(&self) -> f64 {
        self.warp.factor()
    }

    pub fn accounting(&self) -> &FrameAccounting {
        &self.accounting
    }

    pub fn frame_time(&self) -> FrameTime {
        self.accounting.frame_time()
    }

    pub fn skipped_frames(&self) -> u64 {
        self.skipped_frames
    }
}
