use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::core::{RefreshScheduler, Viewport};
use crate::lifecycle::{LifecycleController, LifecyclePhase};
use crate::sim::TickOutcome;

/// How often pending content is polled before the controller is ready.
const CONTENT_POLL: Duration = Duration::from_millis(16);

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "radar".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Display refresh provider backed by `Window::request_redraw`.
struct WindowRefresh<'a>(&'a Window);

impl RefreshScheduler for WindowRefresh<'_> {
    fn request_refresh(&mut self) {
        self.0.request_redraw();
    }
}

/// Entry point for the host loop.
pub struct Runtime;

impl Runtime {
    /// Runs `controller` until the window closes or a fatal error occurs.
    ///
    /// Startup and completion errors are logged and returned once the event
    /// loop has exited.
    pub fn run(config: RuntimeConfig, controller: LifecycleController) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut host = HostState::new(config, controller);

        event_loop
            .run_app(&mut host)
            .context("winit event loop terminated with error")?;

        match host.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct HostState {
    config: RuntimeConfig,
    controller: LifecycleController,
    window: Option<Window>,
    failure: Option<anyhow::Error>,
}

impl HostState {
    fn new(config: RuntimeConfig, controller: LifecycleController) -> Self {
        Self {
            config,
            controller,
            window: None,
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure.get_or_insert(err);
        self.controller.dispose();
        event_loop.exit();
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        self.controller.enable()?;
        self.controller
            .resize(logical_viewport(&window), &mut WindowRefresh(&window))?;
        self.window = Some(window);

        self.poll_ready()?;
        Ok(())
    }

    fn poll_ready(&mut self) -> Result<bool> {
        let Some(window) = self.window.as_ref() else {
            return Ok(false);
        };
        self.controller.poll_ready(&mut WindowRefresh(window))
    }

    fn on_key(&mut self, event_loop: &ActiveEventLoop, key: KeyCode) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        let mut refresh = WindowRefresh(window);

        match key {
            KeyCode::KeyP => self.controller.toggle_running(&mut refresh),
            KeyCode::KeyF => {
                self.controller.toggle_time_warp();
            }
            KeyCode::Escape => {
                self.controller.dispose();
                event_loop.exit();
            }
            _ => {}
        }
    }
}

impl ApplicationHandler for HostState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.start(event_loop) {
            self.fail(event_loop, e.context("startup failed"));
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.controller.phase() != LifecyclePhase::Initialized {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        }

        match self.poll_ready() {
            Ok(true) => event_loop.set_control_flow(ControlFlow::Wait),
            Ok(false) => {
                event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + CONTENT_POLL));
            }
            Err(e) => self.fail(event_loop, e.context("startup failed")),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        let result = match &event {
            WindowEvent::CloseRequested => {
                self.controller.dispose();
                event_loop.exit();
                Ok(())
            }

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => self
                .controller
                .resize(logical_viewport(window), &mut WindowRefresh(window)),

            WindowEvent::RedrawRequested => {
                match self.controller.tick(&mut WindowRefresh(window)) {
                    Ok(TickOutcome::Recovered) => {
                        log::debug!("{} frame(s) skipped so far", self.controller.skipped_frames());
                        Ok(())
                    }
                    Ok(_) => Ok(()),
                    Err(e) => Err(e),
                }
            }

            WindowEvent::KeyboardInput { event: key, .. } => {
                if key.state == ElementState::Pressed && !key.repeat {
                    if let PhysicalKey::Code(code) = key.physical_key {
                        self.on_key(event_loop, code);
                    }
                }
                Ok(())
            }

            _ => Ok(()),
        };

        if let Err(e) = result {
            self.fail(event_loop, e);
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.controller.dispose();
    }
}

fn logical_viewport(window: &Window) -> Viewport {
    let logical: LogicalSize<f64> = window.inner_size().to_logical(window.scale_factor());
    Viewport::new(logical.width, logical.height)
}
