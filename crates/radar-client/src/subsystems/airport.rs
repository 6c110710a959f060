use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{bail, Context, Result};

use radar_engine::content::ContentRequest;
use radar_engine::core::{SimCtx, Subsystem};

#[derive(Debug, Clone, PartialEq)]
pub struct AirportInfo {
    pub icao: String,
    pub name: String,
}

impl AirportInfo {
    /// Parses `ICAO|Name`.
    fn parse(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes).context("airport definition is not UTF-8")?;
        let Some((icao, name)) = text.trim().split_once('|') else {
            bail!("malformed airport definition {text:?}");
        };
        Ok(Self {
            icao: icao.to_string(),
            name: name.to_string(),
        })
    }
}

/// Active airport. Its definition is loaded through the content queue.
pub struct Airport {
    icao: &'static str,
    info: Rc<RefCell<Option<AirportInfo>>>,
}

impl Airport {
    pub fn new(icao: &'static str) -> Self {
        Self {
            icao,
            info: Rc::default(),
        }
    }
}

impl Subsystem for Airport {
    fn pre_init(&mut self, ctx: &mut SimCtx<'_>) -> Result<()> {
        let icao = self.icao;
        let sink = Rc::clone(&self.info);

        let request = ContentRequest::generator(format!("airport {icao}"), move || {
            Ok(format!("{icao}|{icao} demo field").into_bytes())
        })
        .on_load(move |content| {
            *sink.borrow_mut() = Some(AirportInfo::parse(&content.bytes)?);
            Ok(())
        });

        if ctx.load_asset(request).is_none() {
            bail!("content queue is not available");
        }
        Ok(())
    }

    fn ready(&mut self, _ctx: &mut SimCtx<'_>) -> Result<()> {
        match self.info.borrow().as_ref() {
            Some(info) => log::info!("airport {} ({}) ready", info.icao, info.name),
            None => bail!("airport {} has no definition", self.icao),
        }
        Ok(())
    }
}
