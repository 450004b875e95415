//! The slice of player state the monster simulation reads and writes.
//!
//! The host owns the player component; it copies position, stats and item
//! effects in before a tick and reads hit points, mode and position back out.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::dungeon::{Direction, Point};
use crate::{HP_SHIFT, HP_UNIT, MAX_PLRS};

/// Index of a player slot
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Bit for this player in a who-hit mask
    pub fn bit(self) -> u8 {
        1 << self.0
    }

    pub fn all() -> impl Iterator<Item = PlayerId> {
        (0..MAX_PLRS as u8).map(PlayerId)
    }
}

impl core::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "P{}", self.0 + 1)
    }
}

/// What the player is doing; decides whether a block roll is allowed
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum PlayerMode {
    #[default]
    Stand,
    Walk,
    Attack,
    RangedAttack,
    Block,
    GotHit,
    SpellCast,
    Death,
}

/// Main-hand weapon family, for weapon-versus-class damage matchups
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum WeaponClass {
    #[default]
    Unarmed,
    Sword,
    Axe,
    Mace,
    Bow,
    Staff,
}

bitflags! {
    /// Item-granted combat effects
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ItemEffects: u32 {
        /// Attackers take 1..=3 damage back
        const THORNS = 0x0001;
        const KNOCKBACK = 0x0002;
        /// +40 armour against demons
        const AC_AGAINST_DEMONS = 0x0004;
        /// +20 armour against undead
        const AC_AGAINST_UNDEAD = 0x0008;
        const STEAL_LIFE_3 = 0x0010;
        const STEAL_LIFE_5 = 0x0020;
        const STEAL_MANA_3 = 0x0040;
        const STEAL_MANA_5 = 0x0080;
        const TRIPLE_DEMON_DAMAGE = 0x0100;
    }
}

/// Quest items a talker may take from the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum QuestItem {
    /// The tavern sign Snotspil wants back
    Banner,
    /// The golden elixir Lachdanan asks for
    GoldenElixir,
}

/// Player view used by monster AI and combat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub active: bool,
    pub name: String,
    pub tile: Point,
    /// Destination of the current walk, or `tile` when standing
    pub future: Point,
    pub direction: Direction,
    pub mode: PlayerMode,
    /// Character level
    pub level: i32,
    /// Fixed-point hit points
    pub hit_points: i32,
    pub max_hit_points: i32,
    /// Fixed-point mana
    pub mana: i32,
    pub max_mana: i32,
    pub armor_class: i32,
    /// Melee to-hit before the target's armour is subtracted
    pub to_hit: i32,
    pub min_damage: i32,
    pub max_damage: i32,
    pub weapon: WeaponClass,
    /// Shield block chance; zero without a shield
    pub block_chance: i32,
    /// Flat damage taken modifier from items
    pub get_hit: i32,
    /// Remaining reflect charges
    pub reflections: i32,
    pub effects: ItemEffects,
    pub invincible: bool,
    pub ethereal: bool,
    pub experience: u32,
    pub quest_items: Vec<QuestItem>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            active: false,
            name: String::new(),
            tile: Point::default(),
            future: Point::default(),
            direction: Direction::South,
            mode: PlayerMode::Stand,
            level: 1,
            hit_points: 70 * HP_UNIT,
            max_hit_points: 70 * HP_UNIT,
            mana: 0,
            max_mana: 0,
            armor_class: 0,
            to_hit: 70,
            min_damage: 1,
            max_damage: 4,
            weapon: WeaponClass::Unarmed,
            block_chance: 0,
            get_hit: 0,
            reflections: 0,
            effects: ItemEffects::empty(),
            invincible: false,
            ethereal: false,
            experience: 0,
            quest_items: Vec::new(),
        }
    }
}

impl Player {
    /// An active player standing on `tile`
    pub fn new(name: impl Into<String>, tile: Point) -> Self {
        Self {
            active: true,
            name: name.into(),
            tile,
            future: tile,
            ..Self::default()
        }
    }

    pub fn is_dead(&self) -> bool {
        self.mode == PlayerMode::Death || self.hit_points >> HP_SHIFT <= 0
    }

    /// Standing or swinging with a shield lets the player roll to block
    pub fn can_block(&self) -> bool {
        self.block_chance > 0 && matches!(self.mode, PlayerMode::Stand | PlayerMode::Attack)
    }

    /// Subtract fixed-point damage. Returns true when this killed the player.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if self.is_dead() {
            return false;
        }
        self.hit_points = (self.hit_points - amount).max(0);
        if self.hit_points >> HP_SHIFT <= 0 {
            self.hit_points = 0;
            self.mode = PlayerMode::Death;
            return true;
        }
        false
    }

    pub fn heal(&mut self, amount: i32) {
        self.hit_points = (self.hit_points + amount).min(self.max_hit_points);
    }

    pub fn restore_mana(&mut self, amount: i32) {
        self.mana = (self.mana + amount).min(self.max_mana);
    }

    /// Permanently lower maximum life, as a plague touch does
    pub fn drain_max_hit_points(&mut self, amount: i32) {
        self.max_hit_points = (self.max_hit_points - amount).max(HP_UNIT);
        self.hit_points = self.hit_points.min(self.max_hit_points);
    }

    /// Experience for killing a monster of `monster_level`, scaled by the
    /// level gap and capped in multiplayer against power levelling.
    pub fn add_experience(&mut self, monster_level: i32, exp: i32, multiplayer: bool) -> u32 {
        let scaled = (i64::from(exp) * i64::from(10 + monster_level - self.level) / 10).max(0);
        let mut gained = u32::try_from(scaled).unwrap_or(u32::MAX);
        if multiplayer {
            gained = gained.min(200 * self.level.max(1) as u32);
        }
        self.experience = self.experience.saturating_add(gained);
        gained
    }

    pub fn has_item(&self, item: QuestItem) -> bool {
        self.quest_items.contains(&item)
    }

    /// Remove one copy of `item`; false when the player did not carry it
    pub fn take_item(&mut self, item: QuestItem) -> bool {
        match self.quest_items.iter().position(|&i| i == item) {
            Some(pos) => {
                self.quest_items.swap_remove(pos);
                true
            }
            None => false,
        }
    }
}
