//! Core simulation constants
//!
//! Grid sizes, capacities and difficulty bonuses shared by every module.

/// Dungeon grid dimensions
pub const DMAXX: usize = 112;
pub const DMAXY: usize = 112;

/// Instance slots per level
pub const MAX_MONSTERS: usize = 200;
/// Distinct species that can be loaded on one level
pub const MAX_LVL_MTYPES: usize = 24;
/// Player slots; also the number of reserved golem slots
pub const MAX_PLRS: usize = 4;

/// Longest path `find_path` returns
pub const MAX_PATH_LENGTH: usize = 25;

/// Fixed-point shift for hit points (1 HP == 64 units)
pub const HP_SHIFT: u32 = 6;
/// One whole hit point in fixed-point units
pub const HP_UNIT: i32 = 1 << HP_SHIFT;

/// Where unused golem slots are parked
pub const GOLEM_HOLDING_CELL: (i32, i32) = (1, 0);

/// Fully alert squelch value
pub const SQUELCH_MAX: u8 = 255;
/// Darkest light level; sneaking monsters only ambush from total darkness
pub const LIGHTS_MAX: u8 = 15;

/// Difficulty to-hit and armour bonuses
pub const NIGHTMARE_TO_HIT_BONUS: i32 = 85;
pub const NIGHTMARE_AC_BONUS: i32 = 50;
pub const HELL_TO_HIT_BONUS: i32 = 120;
pub const HELL_AC_BONUS: i32 = 80;

/// Highest dungeon level a monster table entry may target
pub const MAX_DUNGEON_LEVEL: u8 = 24;
