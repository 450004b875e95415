//! dv-core: monster AI and combat simulation core
//!
//! Owns one dungeon level's monsters: their placement, the per-tick AI and
//! mode machine, pack coordination and combat against players and each
//! other. Rendering, networking, items and saving live elsewhere; the core
//! talks to them through [`world::SimEvent`]s and the collaborator state in
//! [`world`].
//!
//! A host drives it like this:
//!
//! ```no_run
//! use dv_core::{ArenaBuilder, SimConfig, Simulation};
//!
//! let config = SimConfig::default();
//! let arena = ArenaBuilder::new(config.dungeon_level).lit(false);
//! let mut sim = Simulation::new(config, arena.build());
//! sim.init_monsters().expect("level populated");
//! arena.light(&mut sim.level);
//! for _ in 0..100 {
//!     sim.process_monsters();
//!     for _event in sim.drain_events() {}
//! }
//! ```

pub mod combat;
pub mod config;
pub mod dungeon;
pub mod error;
pub mod monster;
pub mod path;
pub mod sim;
pub mod world;

mod consts;
#[cfg(test)]
mod testing;

pub use config::{Difficulty, DifficultyScaling, DifficultyTable, FlinchRules, SimConfig};
pub use consts::*;
pub use dungeon::{ArenaBuilder, Direction, Level, Point};
pub use error::{ConfigError, SpawnError};
pub use monster::{Monster, MonsterId};
pub use sim::Simulation;
pub use world::{Player, PlayerId, SimEvent};
