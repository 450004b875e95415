//! Simulation configuration and difficulty scaling
//!
//! Loaded once per game from JSON. Difficulty constants are applied when a
//! monster is created and never re-applied to live monsters.

use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::error::ConfigError;
use crate::monster::Species;
use crate::{
    HELL_AC_BONUS, HELL_TO_HIT_BONUS, HP_UNIT, MAX_DUNGEON_LEVEL, NIGHTMARE_AC_BONUS,
    NIGHTMARE_TO_HIT_BONUS,
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Difficulty {
    #[default]
    Normal,
    Nightmare,
    Hell,
}

/// Stat changes one difficulty applies at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyScaling {
    pub hp_multiplier: i32,
    /// Fixed-point HP added in the classic game
    pub hp_bonus: i32,
    /// Fixed-point HP added under Hellfire rules, single player
    pub hp_bonus_hellfire: i32,
    /// Fixed-point HP added under Hellfire rules, multiplayer
    pub hp_bonus_hellfire_multiplayer: i32,
    pub level_bonus: i32,
    /// Experience becomes `exp_multiplier * (exp + exp_offset)`
    pub exp_multiplier: i32,
    pub exp_offset: i32,
    pub to_hit_bonus: i32,
    pub armor_bonus: i32,
    /// Damage becomes `damage_multiplier * dmg + damage_offset`
    pub damage_multiplier: i32,
    pub damage_offset: i32,
    /// Switch to the species' second resistance set
    pub hell_resistances: bool,
}

impl DifficultyScaling {
    pub const NORMAL: Self = Self {
        hp_multiplier: 1,
        hp_bonus: 0,
        hp_bonus_hellfire: 0,
        hp_bonus_hellfire_multiplayer: 0,
        level_bonus: 0,
        exp_multiplier: 1,
        exp_offset: 0,
        to_hit_bonus: 0,
        armor_bonus: 0,
        damage_multiplier: 1,
        damage_offset: 0,
        hell_resistances: false,
    };

    pub const NIGHTMARE: Self = Self {
        hp_multiplier: 3,
        hp_bonus: HP_UNIT,
        hp_bonus_hellfire: 50 * HP_UNIT,
        hp_bonus_hellfire_multiplayer: 100 * HP_UNIT,
        level_bonus: 15,
        exp_multiplier: 2,
        exp_offset: 1000,
        to_hit_bonus: NIGHTMARE_TO_HIT_BONUS,
        armor_bonus: NIGHTMARE_AC_BONUS,
        damage_multiplier: 2,
        damage_offset: 4,
        hell_resistances: false,
    };

    pub const HELL: Self = Self {
        hp_multiplier: 4,
        hp_bonus: 3 * HP_UNIT,
        hp_bonus_hellfire: 100 * HP_UNIT,
        hp_bonus_hellfire_multiplayer: 200 * HP_UNIT,
        level_bonus: 30,
        exp_multiplier: 4,
        exp_offset: 1000,
        to_hit_bonus: HELL_TO_HIT_BONUS,
        armor_bonus: HELL_AC_BONUS,
        damage_multiplier: 4,
        damage_offset: 6,
        hell_resistances: true,
    };

    pub fn max_hit_points(&self, base: i32, hellfire: bool, multiplayer: bool) -> i32 {
        let bonus = match (hellfire, multiplayer) {
            (false, _) => self.hp_bonus,
            (true, false) => self.hp_bonus_hellfire,
            (true, true) => self.hp_bonus_hellfire_multiplayer,
        };
        self.hp_multiplier * base + bonus
    }

    pub fn experience(&self, base: i32) -> i32 {
        self.exp_multiplier * (base + self.exp_offset)
    }

    pub fn damage(&self, base: i32) -> i32 {
        self.damage_multiplier * base + self.damage_offset
    }
}

/// Scaling per difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyTable {
    pub normal: DifficultyScaling,
    pub nightmare: DifficultyScaling,
    pub hell: DifficultyScaling,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            normal: DifficultyScaling::NORMAL,
            nightmare: DifficultyScaling::NIGHTMARE,
            hell: DifficultyScaling::HELL,
        }
    }
}

impl DifficultyTable {
    pub fn get(&self, difficulty: Difficulty) -> &DifficultyScaling {
        match difficulty {
            Difficulty::Normal => &self.normal,
            Difficulty::Nightmare => &self.nightmare,
            Difficulty::Hell => &self.hell,
        }
    }
}

/// When a hit interrupts the target's current action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlinchRules {
    /// A hit flinches when `damage >> 6 >= level + level_offset`
    pub level_offset: i32,
    /// Species that flinch from every hit
    pub always_flinch: Vec<Species>,
}

impl Default for FlinchRules {
    fn default() -> Self {
        Self {
            level_offset: 3,
            always_flinch: vec![
                Species::Sneak,
                Species::Stalker,
                Species::Unseen,
                Species::IllusionWeaver,
            ],
        }
    }
}

/// Game-wide simulation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub difficulty: Difficulty,
    pub multiplayer: bool,
    /// Expansion rules (changed death, resistances and hit point bonuses)
    pub hellfire: bool,
    pub dungeon_level: u8,
    pub seed: u32,
    pub flinch: FlinchRules,
    /// A leashed minion stays within this many tiles of its leader
    pub leash_radius: i32,
    /// A separated minion rejoins when closer than this
    pub pack_regroup_radius: i32,
    /// Fallen flee radius is `fear_radius_base + fear_radius_step * int`
    pub fear_radius_base: i32,
    pub fear_radius_step: i32,
    pub difficulty_table: DifficultyTable,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            multiplayer: false,
            hellfire: false,
            dungeon_level: 1,
            seed: 0,
            flinch: FlinchRules::default(),
            leash_radius: 4,
            pack_regroup_radius: 3,
            fear_radius_base: 4,
            fear_radius_step: 2,
            difficulty_table: DifficultyTable::default(),
        }
    }
}

impl SimConfig {
    /// Load and validate a JSON config file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dungeon_level == 0 || self.dungeon_level > MAX_DUNGEON_LEVEL {
            return Err(ConfigError::OutOfRange {
                field: "dungeon_level",
                value: i64::from(self.dungeon_level),
                reason: "must be between 1 and 24",
            });
        }
        if self.leash_radius < 1 {
            return Err(ConfigError::OutOfRange {
                field: "leash_radius",
                value: i64::from(self.leash_radius),
                reason: "must be at least 1",
            });
        }
        if self.pack_regroup_radius < 1 || self.pack_regroup_radius > self.leash_radius {
            return Err(ConfigError::OutOfRange {
                field: "pack_regroup_radius",
                value: i64::from(self.pack_regroup_radius),
                reason: "must be between 1 and leash_radius",
            });
        }
        if self.fear_radius_base < 0 || self.fear_radius_step < 0 {
            return Err(ConfigError::OutOfRange {
                field: "fear_radius_base",
                value: i64::from(self.fear_radius_base.min(self.fear_radius_step)),
                reason: "fear radii cannot be negative",
            });
        }
        if self.flinch.level_offset < 0 {
            return Err(ConfigError::OutOfRange {
                field: "flinch.level_offset",
                value: i64::from(self.flinch.level_offset),
                reason: "cannot be negative",
            });
        }
        Ok(())
    }

    /// Scaling for the configured difficulty
    pub fn scaling(&self) -> &DifficultyScaling {
        self.difficulty_table.get(self.difficulty)
    }

    pub fn fear_radius(&self, intelligence: i32) -> i32 {
        self.fear_radius_base + self.fear_radius_step * intelligence
    }

    pub fn always_flinches(&self, species: Species) -> bool {
        self.flinch.always_flinch.contains(&species)
    }
}
