use anyhow::Result;

use radar_engine::core::{SimCtx, Subsystem};

/// Game clock: accumulates simulated time and reports each elapsed minute.
#[derive(Debug, Default)]
pub struct Game {
    elapsed: f64,
    minutes: u64,
}

impl Subsystem for Game {
    fn pre_init(&mut self, _ctx: &mut SimCtx<'_>) -> Result<()> {
        self.elapsed = 0.0;
        self.minutes = 0;
        Ok(())
    }

    fn complete(&mut self, ctx: &mut SimCtx<'_>) -> Result<()> {
        log::info!("session started at x{} time warp", ctx.time_warp);
        Ok(())
    }

    fn update_pre(&mut self, ctx: &mut SimCtx<'_>) -> Result<()> {
        self.elapsed += ctx.time.dt;

        let minutes = (self.elapsed / 60.0) as u64;
        if minutes > self.minutes {
            self.minutes = minutes;
            log::info!("game time {minutes} min ({:.0} fps)", ctx.time.fps);
        }
        Ok(())
    }
}
