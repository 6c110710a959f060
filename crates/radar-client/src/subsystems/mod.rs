//! Demonstration collaborators wired into the engine.

mod aircraft;
mod airport;
mod canvas;
mod game;
mod passive;

use radar_engine::core::{SubsystemId, SubsystemTable};

use aircraft::Traffic;
use airport::Airport;
use canvas::Canvas;
use game::Game;
use passive::Passive;

pub fn table() -> SubsystemTable {
    SubsystemTable::new()
        .with(SubsystemId::Tutorial, Passive::new("tutorial"))
        .with(SubsystemId::Game, Game::default())
        .with(SubsystemId::Input, Passive::new("input"))
        .with(SubsystemId::Airline, Passive::new("airline"))
        .with(SubsystemId::Aircraft, Traffic::default())
        .with(SubsystemId::Airport, Airport::new("KSFO"))
        .with(SubsystemId::Canvas, Canvas::default())
        .with(SubsystemId::Ui, Passive::new("ui"))
        .with(SubsystemId::Speech, Passive::new("speech"))
}
