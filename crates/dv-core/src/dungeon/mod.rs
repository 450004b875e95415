//! Dungeon geometry and the per-level spatial index

mod arena;
mod grid;
mod level;
mod point;

pub use arena::ArenaBuilder;
pub use grid::Grid;
pub use level::{Corpse, HazardFlags, Level, MonsterCell, Occupant, TileFlags};
pub use point::{Direction, Displacement, Point};
