use anyhow::Result;

use radar_engine::core::{SimCtx, Subsystem};

/// Collaborator with no simulation role; only reports its phases.
pub struct Passive {
    name: &'static str,
}

impl Passive {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl Subsystem for Passive {
    fn init(&mut self, _ctx: &mut SimCtx<'_>) -> Result<()> {
        log::debug!("{} initialized", self.name);
        Ok(())
    }

    fn complete(&mut self, _ctx: &mut SimCtx<'_>) -> Result<()> {
        log::debug!("{} complete", self.name);
        Ok(())
    }
}
