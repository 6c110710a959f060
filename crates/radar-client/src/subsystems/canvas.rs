use anyhow::Result;

use radar_engine::core::{SimCtx, Subsystem, Viewport};

/// Radar scope. Redraws whenever a frame marks it dirty.
#[derive(Debug, Default)]
pub struct Canvas {
    viewport: Viewport,
    dirty: bool,
    frames_drawn: u64,
}

impl Canvas {
    /// Draws the scope if anything changed since the last draw.
    fn draw(&mut self) {
        if !self.dirty {
            return;
        }
        self.dirty = false;
        self.frames_drawn += 1;
        log::trace!(
            "draw #{} at {}x{}",
            self.frames_drawn,
            self.viewport.width,
            self.viewport.height,
        );
    }
}

impl Subsystem for Canvas {
    fn init(&mut self, ctx: &mut SimCtx<'_>) -> Result<()> {
        self.viewport = ctx.viewport;
        Ok(())
    }

    fn complete(&mut self, _ctx: &mut SimCtx<'_>) -> Result<()> {
        self.dirty = true;
        self.draw();
        Ok(())
    }

    fn update_post(&mut self, _ctx: &mut SimCtx<'_>) -> Result<()> {
        self.dirty = true;
        self.draw();
        Ok(())
    }

    fn resize(&mut self, ctx: &mut SimCtx<'_>) -> Result<()> {
        self.viewport = ctx.viewport;
        self.dirty = true;
        Ok(())
    }
}
