use anyhow::Result;

use super::config::EngineConfig;
use super::error::LifecycleError;
use super::phase::LifecyclePhase::{self, *};
use crate::content::{ContentQueue, LoadingView};
use crate::core::{ControlCtx, Hook, RefreshScheduler, SubsystemTable, Viewport};
use crate::sim::{RunState, Simulation, TickOutcome};
use crate::time::{Clock, FrameAccounting, FrameTime, TimeWarpError};

/// Owns the collaborators and the simulation, and sequences their lifecycle.
///
/// Typical host flow:
/// 1. `enable()` once (children, pre-init, init)
/// 2. `poll_ready()` until it returns `true` (waits for queued content)
/// 3. `tick()` on every display refresh the controller requested
/// 4. `dispose()` on shutdown
pub struct LifecycleController {
    config: EngineConfig,
    phase: LifecyclePhase,
    subsystems: SubsystemTable,
    sim: Simulation,
    loading: Option<LoadingView>,
    content: Option<ContentQueue>,
    loaded: bool,
    aborted: bool,
}

impl LifecycleController {
    pub fn new(config: EngineConfig, subsystems: SubsystemTable, clock: impl Clock + 'static) -> Self {
        let sim = Simulation::new(Box::new(clock), config.frame_delay, config.run_on_start);

        Self {
            config,
            phase: Constructed,
            subsystems,
            sim,
            loading: None,
            content: None,
            loaded: false,
            aborted: false,
        }
    }

    // ── startup ───────────────────────────────────────────────────────────

    /// Runs every startup step that does not need the host: children, pre-init, init.
    pub fn enable(&mut self) -> Result<()> {
        self.setup_children()?;
        log::info!("Version v{}", self.config.version);
        self.pre_init()?;
        self.init()
    }

    /// Creates the loading view and the content queue.
    pub fn setup_children(&mut self) -> Result<()> {
        self.check(Constructed, ChildrenWired)?;
        self.loading = Some(LoadingView::new());
        self.content = Some(ContentQueue::new());
        self.enter(ChildrenWired);
        Ok(())
    }

    pub fn pre_init(&mut self) -> Result<()> {
        self.check(ChildrenWired, PreInitialized)?;
        if let Err(e) = self.subsystems.validate() {
            self.aborted = true;
            return Err(e.into());
        }
        self.run_startup_hook(Hook::PreInit)?;
        self.enter(PreInitialized);
        Ok(())
    }

    pub fn init(&mut self) -> Result<()> {
        self.check(PreInitialized, Initialized)?;
        self.run_startup_hook(Hook::Init)?;
        self.enter(Initialized);
        Ok(())
    }

    /// Moves to `Ready` once no queued content is outstanding.
    ///
    /// Returns `Ok(false)` while loads are pending. On the transition it runs the
    /// initial resize pass and the ready hooks, then arms the first tick if the
    /// loop is running. Already-live controllers return `Ok(true)`.
    pub fn poll_ready(&mut self, scheduler: &mut dyn RefreshScheduler) -> Result<bool> {
        if self.phase.is_live() {
            return Ok(true);
        }
        self.check(Initialized, Ready)?;

        if let Err(e) = self.drain_content() {
            self.aborted = true;
            return Err(e.into());
        }
        let pending = self.content.as_ref().map_or(0, ContentQueue::pending);
        if pending > 0 {
            log::trace!("waiting on {pending} content item(s)");
            return Ok(false);
        }

        self.run_startup_hook(Hook::Resize)?;
        self.loaded = true;
        self.run_startup_hook(Hook::Ready)?;
        self.enter(Ready);

        // Loading time is not simulated.
        self.sim.rebase();

        if self.sim.is_running() {
            self.sim.arm(scheduler);
        }
        Ok(true)
    }

    // ── loop ──────────────────────────────────────────────────────────────

    /// Runs one loop iteration. Call once per refresh the controller requested.
    ///
    /// Ticks outside `Ready`/`Running` are ignored. The first tick moves the
    /// controller to `Running`. Once a fatal error has stopped the loop every
    /// further tick returns `LifecycleError::Aborted`.
    pub fn tick(&mut self, scheduler: &mut dyn RefreshScheduler) -> Result<TickOutcome> {
        if self.aborted {
            return Err(LifecycleError::Aborted.into());
        }

        match self.phase {
            Ready => self.enter(Running),
            Running => {}
            other => {
                log::debug!("tick ignored while {other}");
                return Ok(TickOutcome::Idle);
            }
        }

        // Late loads are not fatal once the loop is live.
        if let Err(e) = self.drain_content() {
            log::error!("{e}");
        }

        let outcome = self.sim.tick(
            &mut self.subsystems,
            self.content.as_mut(),
            self.loading.as_mut(),
            scheduler,
        );
        if outcome.is_err() {
            self.aborted = true;
            self.sim.halt();
        }
        outcome
    }

    /// Global run-control toggle.
    ///
    /// Resuming a live loop re-arms the next refresh immediately; pausing takes
    /// effect at the next tick boundary. Ignored once the controller has aborted.
    pub fn set_running(&mut self, running: bool, scheduler: &mut dyn RefreshScheduler) {
        if self.aborted {
            log::warn!("run control ignored: controller aborted");
            return;
        }
        let scheduler = self.phase.is_live().then_some(scheduler);
        self.sim.set_running(running, scheduler);
    }

    pub fn toggle_running(&mut self, scheduler: &mut dyn RefreshScheduler) {
        let running = !self.sim.is_running();
        self.set_running(running, scheduler);
    }

    pub fn set_time_warp(&mut self, factor: f64) -> Result<(), TimeWarpError> {
        self.sim.set_time_warp(factor)
    }

    pub fn toggle_time_warp(&mut self) -> f64 {
        self.sim.toggle_time_warp()
    }

    /// Records the new viewport and, once loaded, runs the resize hooks.
    ///
    /// Before `Ready` only the size is stored; the initial layout pass happens
    /// in `poll_ready`.
    pub fn resize(&mut self, viewport: Viewport, scheduler: &mut dyn RefreshScheduler) -> Result<()> {
        if !viewport.is_valid() {
            log::debug!("ignoring degenerate viewport {viewport:?}");
            return Ok(());
        }
        self.sim.set_viewport(viewport);

        if !self.phase.is_live() {
            return Ok(());
        }
        self.run_hook(Hook::Resize, Some(scheduler))
    }

    /// Releases the collaborators, the loading view, and the content queue.
    ///
    /// Idempotent.
    pub fn dispose(&mut self) {
        if self.phase == Disposed {
            return;
        }
        self.sim.halt();
        self.subsystems.clear();
        self.loading = None;
        self.content = None;
        self.enter(Disposed);
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_running(&self) -> bool {
        self.sim.is_running()
    }

    pub fn run_state(&self) -> RunState {
        self.sim.run_state()
    }

    pub fn time_warp(&self) -> f64 {
        self.sim.time_warp()
    }

    pub fn measured_fps(&self) -> f64 {
        self.sim.accounting().measured_fps
    }

    pub fn frame_count(&self) -> u64 {
        self.sim.accounting().frame_count
    }

    pub fn frame_time(&self) -> FrameTime {
        self.sim.frame_time()
    }

    pub fn accounting(&self) -> &FrameAccounting {
        self.sim.accounting()
    }

    pub fn skipped_frames(&self) -> u64 {
        self.sim.skipped_frames()
    }

    pub fn viewport(&self) -> Viewport {
        self.sim.viewport()
    }

    pub fn loading(&self) -> Option<&LoadingView> {
        self.loading.as_ref()
    }

    /// Queue for host-side loads (URL fetches completed through their handles).
    pub fn content_mut(&mut self) -> Option<&mut ContentQueue> {
        self.content.as_mut()
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn check(&self, from: LifecyclePhase, to: LifecyclePhase) -> Result<(), LifecycleError> {
        if self.aborted {
            return Err(LifecycleError::Aborted);
        }
        if self.phase != from {
            return Err(LifecycleError::InvalidTransition { from: self.phase, to });
        }
        Ok(())
    }

    fn enter(&mut self, phase: LifecyclePhase) {
        log::debug!("lifecycle {} -> {phase}", self.phase);
        self.phase = phase;
    }

    fn run_hook(&mut self, hook: Hook, scheduler: Option<&mut dyn RefreshScheduler>) -> Result<()> {
        let mut control = ControlCtx::default();
        let result = self
            .subsystems
            .run(hook, &mut self.sim.ctx(&mut control, self.content.as_mut()));
        self.sim.apply(&mut control, scheduler);
        result
    }

    /// Startup hooks abort the controller on failure.
    fn run_startup_hook(&mut self, hook: Hook) -> Result<()> {
        let result = self.run_hook(hook, None);
        if result.is_err() {
            self.aborted = true;
        }
        result
    }

    fn drain_content(&mut self) -> Result<usize, LifecycleError> {
        let Some(queue) = self.content.as_mut() else {
            return Ok(0);
        };
        let drained = queue.drain();
        if let Some(view) = self.loading.as_mut() {
            let (loaded, total) = queue.progress();
            view.set_progress(loaded, total);
        }
        drained
    }
}
