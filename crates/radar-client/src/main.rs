use anyhow::Result;

use radar_engine::lifecycle::{EngineConfig, LifecycleController};
use radar_engine::logging::{init_logging, LoggingConfig};
use radar_engine::time::MonotonicClock;
use radar_engine::window::{Runtime, RuntimeConfig};

mod subsystems;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = EngineConfig {
        version: env!("CARGO_PKG_VERSION").to_string(),
        ..EngineConfig::default()
    };
    let controller = LifecycleController::new(config, subsystems::table(), MonotonicClock::new());

    Runtime::run(
        RuntimeConfig {
            title: "Radar".to_string(),
            ..RuntimeConfig::default()
        },
        controller,
    )
}
