//! Shared fixtures for unit tests

use crate::SQUELCH_MAX;
use crate::config::SimConfig;
use crate::dungeon::{ArenaBuilder, Direction, Point};
use crate::monster::{Enemy, MonsterId, Species, add_monster};
use crate::sim::Simulation;
use crate::world::{Player, PlayerId};

/// A lit 30x30 room at (10, 10), every tile visible
pub fn arena_with(config: SimConfig) -> Simulation {
    let level = ArenaBuilder {
        origin: Point::new(10, 10),
        width: 30,
        height: 30,
        ..ArenaBuilder::default()
    }
    .build();
    Simulation::new(config, level)
}

pub fn arena() -> Simulation {
    arena_with(SimConfig::default())
}

pub fn spawn(sim: &mut Simulation, species: Species, at: Point) -> MonsterId {
    let t = match sim.monsters.type_index(species) {
        Some(t) => t,
        None => sim.monsters.add_type(species, Default::default()).unwrap(),
    };
    add_monster(sim, at, Direction::South, t, true).unwrap()
}

/// Put player 0 on `at` and make `id` fully aware of them
pub fn hunt_player(sim: &mut Simulation, id: MonsterId, at: Point) -> PlayerId {
    let pid = PlayerId(0);
    if !sim.players[0].active {
        sim.add_player(pid, Player::new("hero", at));
    } else {
        sim.move_player(pid, at);
    }
    let m = &mut sim.monsters[id];
    m.enemy = Some(Enemy::Player(pid));
    m.enemy_position = at;
    m.last = at;
    m.squelch = SQUELCH_MAX;
    pid
}
