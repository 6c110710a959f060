use crate::time::DEFAULT_FRAME_DELAY;

/// Controller configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Version string logged once when the controller is enabled.
    pub version: String,

    /// FPS measurement window, in seconds.
    pub frame_delay: f64,

    /// Whether the loop starts running as soon as it is ready.
    ///
    /// With `false`, the loop stays idle until `set_running(true)`.
    pub run_on_start: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            frame_delay: DEFAULT_FRAME_DELAY,
            run_on_start: true,
        }
    }
}
