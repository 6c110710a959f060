use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;

use radar_engine::core::{CountingScheduler, Hook, SimCtx, Subsystem, SubsystemId, SubsystemTable};
use radar_engine::lifecycle::{EngineConfig, LifecycleController, LifecyclePhase};
use radar_engine::sim::TickOutcome;
use radar_engine::time::{elapsed_since, Clock, ManualClock, TimeWarp};

type Trace = Rc<RefCell<Vec<(SubsystemId, Hook, f64)>>>;

/// Records every hook call together with the delta it saw.
struct HookTrace {
    id: SubsystemId,
    trace: Trace,
}

impl HookTrace {
    fn record(&self, hook: Hook, ctx: &SimCtx<'_>) -> Result<()> {
        self.trace.borrow_mut().push((self.id, hook, ctx.time.dt));
        Ok(())
    }
}

impl Subsystem for HookTrace {
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
}

fn live_controller(clock: &ManualClock, trace: &Trace) -> (LifecycleController, CountingScheduler) {
    let table = SubsystemId::ALL.into_iter().fold(SubsystemTable::new(), |table, id| {
        table.with(id, HookTrace { id, trace: Rc::clone(trace) })
    });

    let mut controller = LifecycleController::new(EngineConfig::default(), table, clock.clone());
    let mut refresh = CountingScheduler::default();
    controller.enable().unwrap();
    assert!(controller.poll_ready(&mut refresh).unwrap());
    assert_eq!(controller.phase(), LifecyclePhase::Ready);
    (controller, refresh)
}

fn hooks(trace: &Trace) -> Vec<Hook> {
    trace.borrow().iter().map(|(_, hook, _)| *hook).collect()
}

#[test]
fn fps_window_recomputes_after_one_second() {
    let clock = ManualClock::new(100.0);
    let trace = Trace::default();
    let (mut controller, mut refresh) = live_controller(&clock, &trace);

    for frame in 1..=59 {
        clock.set(100.0 + frame as f64 * 0.98 / 59.0);
        controller.tick(&mut refresh).unwrap();
    }
    assert_eq!(controller.measured_fps(), 0.0);

    clock.set(101.001);
    controller.tick(&mut refresh).unwrap();
    assert!((controller.measured_fps() - 60.0).abs() < 0.1);
    assert_eq!(controller.accounting().current_frame.count_since_window, 0);
}

#[test]
fn time_warp_doubles_delta() {
    let clock = ManualClock::new(0.0);
    let trace = Trace::default();
    let (mut controller, mut refresh) = live_controller(&clock, &trace);
    controller.set_time_warp(2.0).unwrap();

    controller.tick(&mut refresh).unwrap();
    clock.advance(0.5);
    controller.tick(&mut refresh).unwrap();

    assert_eq!(controller.frame_time().dt, 1.0);

    let mut warp = TimeWarp::default();
    warp.set(2.0).unwrap();
    let last = controller.accounting().current_frame.last_tick_time;
    clock.advance(0.5);
    assert_eq!(elapsed_since(&clock, &warp, last), 1.0);
}

#[test]
fn clock_skew_never_produces_negative_delta() {
    let clock = ManualClock::new(50.0);
    let trace = Trace::default();
    let (mut controller, mut refresh) = live_controller(&clock, &trace);

    controller.tick(&mut refresh).unwrap();
    clock.set(49.0);
    controller.tick(&mut refresh).unwrap();
    assert_eq!(controller.frame_time().dt, 0.0);

    controller.tick(&mut refresh).unwrap();
    assert!(trace.borrow().iter().all(|(_, _, dt)| *dt >= 0.0));
    assert!(controller.accounting().current_frame.last_tick_time <= clock.now().max(50.0));
}

#[test]
fn pause_and_resume_schedule_exactly_one_tick() {
    let clock = ManualClock::new(0.0);
    let trace = Trace::default();
    let (mut controller, mut refresh) = live_controller(&clock, &trace);
    assert_eq!(refresh.requests, 1);

    controller.tick(&mut refresh).unwrap();
    assert_eq!(refresh.requests, 2);

    controller.set_running(false, &mut refresh);
    // The refresh armed by the previous tick still fires, but does not re-arm.
    assert_eq!(controller.tick(&mut refresh).unwrap(), TickOutcome::Halted);
    assert_eq!(refresh.requests, 2);

    controller.set_running(true, &mut refresh);
    controller.set_running(true, &mut refresh);
    assert_eq!(refresh.requests, 3);

    assert_eq!(controller.tick(&mut refresh).unwrap(), TickOutcome::Advanced);
    assert_eq!(refresh.requests, 4);
}

#[test]
fn completion_once_then_strict_frame_order() {
    let clock = ManualClock::new(0.0);
    let trace = Trace::default();
    let (mut controller, mut refresh) = live_controller(&clock, &trace);

    for _ in 0..10 {
        clock.advance(1.0 / 60.0);
        controller.tick(&mut refresh).unwrap();
    }

    let recorded = hooks(&trace);
    assert_eq!(recorded.iter().filter(|h| **h == Hook::Complete).count(), 3);
    assert!(recorded[..3].iter().all(|h| *h == Hook::Complete));

    for frame in recorded[3..].chunks(3) {
        assert_eq!(frame, [Hook::UpdatePre, Hook::Update, Hook::UpdatePost]);
    }
    assert_eq!(controller.frame_count(), 10);
    assert!(controller.run_state().completed_bootstrap);
}
