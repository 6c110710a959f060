use anyhow::{ensure, Result};

use radar_engine::core::{SimCtx, Subsystem};

/// Knots to kilometres per second.
const KTS_TO_KMS: f64 = 1.852 / 3600.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Aircraft {
    pub callsign: String,
    /// Position relative to the airport reference point, in km.
    pub position: (f64, f64),
    /// Track in radians, clockwise from north.
    pub heading: f64,
    pub ground_speed_kts: f64,
}

impl Aircraft {
    fn advance(&mut self, dt: f64) {
        let distance = self.ground_speed_kts * KTS_TO_KMS * dt;
        self.position.0 += distance * self.heading.sin();
        self.position.1 += distance * self.heading.cos();
    }
}

/// Traffic in the sector, advanced once per tick.
#[derive(Debug, Default)]
pub struct Traffic {
    aircraft: Vec<Aircraft>,
}

impl Subsystem for Traffic {
    fn pre_init(&mut self, _ctx: &mut SimCtx<'_>) -> Result<()> {
        self.aircraft = vec![
            Aircraft {
                callsign: "UAL123".to_string(),
                position: (-40.0, 12.0),
                heading: 90f64.to_radians(),
                ground_speed_kts: 250.0,
            },
            Aircraft {
                callsign: "ASA456".to_string(),
                position: (25.0, -30.0),
                heading: 330f64.to_radians(),
                ground_speed_kts: 210.0,
            },
        ];
        Ok(())
    }

    fn update(&mut self, ctx: &mut SimCtx<'_>) -> Result<()> {
        ensure!(ctx.time.dt >= 0.0, "negative delta {}", ctx.time.dt);
        for aircraft in &mut self.aircraft {
            aircraft.advance(ctx.time.dt);
        }
        Ok(())
    }
}
