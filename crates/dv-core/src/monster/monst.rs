//! Monster instances
//!
//! One [`Monster`] per slot of the level's fixed-capacity array. Instances
//! are referenced by [`MonsterId`] everywhere; deletion swaps slots around
//! in the active list, so ids stay valid but list positions do not.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumDiscriminants};

use super::{AiKind, MonsterData, MonsterFlags, MonsterGraphic, Resistances, Species, UniqueMonster};
use crate::combat::MissileKind;
use crate::dungeon::{Direction, Point};
use crate::world::{PlayerId, Speech};
use crate::{HP_SHIFT, MAX_PLRS};

/// Index of a monster slot
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct MonsterId(pub u16);

impl MonsterId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The reserved slot holding `player`'s golem
    pub fn golem_of(player: PlayerId) -> MonsterId {
        MonsterId(u16::from(player.0))
    }

    /// Owner of a golem slot, `None` for ordinary slots
    pub fn golem_owner(self) -> Option<PlayerId> {
        (self.index() < MAX_PLRS).then(|| PlayerId(self.0 as u8))
    }
}

impl core::fmt::Display for MonsterId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the monster's body is doing right now.
///
/// Each variant carries the scratch state its step function needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumDiscriminants)]
#[strum_discriminants(name(ModeKind), derive(Hash, Display, Serialize, Deserialize))]
pub enum Mode {
    Stand {
        /// Mode that ended when the monster last stood up
        previous: ModeKind,
        /// Ticks spent idle since then
        idle: i32,
    },
    /// North, north-east or north-west; the destination cell is marked walking
    WalkNorth { step: Direction },
    /// South-east, south or south-west; `tile` already moved, `from` is vacated on arrival
    WalkSouth { from: Point },
    /// East or west; `tile` moves to `to` on arrival
    WalkSideways { to: Point },
    MeleeAttack,
    RangedAttack {
        missile: Option<MissileKind>,
        damage: i32,
    },
    SpecialMeleeAttack,
    SpecialRangedAttack {
        missile: MissileKind,
        /// Frames spent on the release frame (flame waves)
        ticks: i32,
        damage: i32,
    },
    HitRecovery,
    Death { ticks: i32 },
    FadeIn,
    FadeOut,
    SpecialStand,
    Delay { remaining: i32 },
    /// Travelling as a charge missile; the tick driver leaves it alone
    Charge,
    Petrified,
    Heal { amount: i32 },
    Talk,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Stand {
            previous: ModeKind::Stand,
            idle: 0,
        }
    }
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        ModeKind::from(self)
    }

    pub fn is_walking(&self) -> bool {
        matches!(
            self,
            Mode::WalkNorth { .. } | Mode::WalkSouth { .. } | Mode::WalkSideways { .. }
        )
    }
}

/// Longer-lived intent, kept across several actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
pub enum Goal {
    #[default]
    Normal,
    /// Circling towards the enemy
    Move { steps: i32, turn_left: bool },
    /// Running away; `direction` is only used by the fallen
    Retreat { steps: i32, direction: Direction },
    /// Scavengers looking for (or eating) a corpse
    Healing {
        remaining: i32,
        corpse: Option<Point>,
    },
    /// Fallen counter-attack after fleeing
    Attack2 { remaining: i32 },
    Talking,
    /// Waiting for a player to come and listen
    Inquiring,
    /// Dead
    None,
}

/// Who a monster is fighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Enemy {
    Player(PlayerId),
    Monster(MonsterId),
}

/// Pack membership of a minion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LeaderRelation {
    #[default]
    None,
    /// Bound to stay near the leader
    Leashed(MonsterId),
    /// Lost sight of the leader, still part of the pack
    Separated(MonsterId),
}

impl LeaderRelation {
    pub fn leader(self) -> Option<MonsterId> {
        match self {
            LeaderRelation::None => None,
            LeaderRelation::Leashed(id) | LeaderRelation::Separated(id) => Some(id),
        }
    }

    pub fn is_leashed(self) -> bool {
        matches!(self, LeaderRelation::Leashed(_))
    }
}

/// Current animation of an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimState {
    pub graphic: MonsterGraphic,
    /// Zero-based frame index
    pub frame: i32,
    pub frames: i32,
    /// Ticks each frame is shown
    pub rate: i32,
    /// Ticks spent on the current frame
    pub tick: i32,
}

impl Default for AnimState {
    fn default() -> Self {
        Self {
            graphic: MonsterGraphic::Stand,
            frame: 0,
            frames: 1,
            rate: 1,
            tick: 0,
        }
    }
}

impl AnimState {
    pub fn last_frame(&self) -> i32 {
        self.frames - 1
    }

    pub fn is_last_frame(&self) -> bool {
        self.frame == self.frames - 1
    }
}

/// Snake weaving pattern position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Serpentine {
    pub step: usize,
    pub heading: Direction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub id: MonsterId,
    /// Index into the level's type table
    pub type_index: usize,
    pub species: Species,
    pub unique: Option<UniqueMonster>,

    pub tile: Point,
    /// Where the monster is heading; equals `tile` when settled
    pub future: Point,
    /// Where the current action started
    pub old: Point,
    /// Last place the enemy was seen
    pub last: Point,
    /// Snapshot of the enemy's position, refreshed every tick
    pub enemy_position: Point,
    pub direction: Direction,

    pub mode: Mode,
    pub goal: Goal,
    pub anim: AnimState,
    pub ai: AiKind,
    pub intelligence: i32,

    /// Fixed-point
    pub hit_points: i32,
    pub max_hit_points: i32,
    pub level: i32,
    pub exp: i32,
    pub to_hit: i32,
    pub min_damage: i32,
    pub max_damage: i32,
    pub to_hit_special: i32,
    pub min_damage_special: i32,
    pub max_damage_special: i32,
    pub armor_class: i32,
    pub resistances: Resistances,
    pub flags: MonsterFlags,

    pub enemy: Option<Enemy>,
    /// Alertness; 0 asleep, 255 fully aware
    pub squelch: u8,
    pub leader: LeaderRelation,
    /// Leashed minions still with a leader
    pub pack_size: i32,
    pub talk: Option<Speech>,
    /// Bit mask of players that damaged this monster
    pub who_hit: u8,
    pub ai_seed: u32,
    pub loot_seed: u32,
    /// Blocked line checks in a row
    pub path_count: i32,
    pub delete_pending: bool,
    pub serpentine: Serpentine,
}

impl Default for Monster {
    fn default() -> Self {
        let holding = Point::from(crate::GOLEM_HOLDING_CELL);
        Self {
            id: MonsterId(0),
            type_index: 0,
            species: Species::Zombie,
            unique: None,
            tile: holding,
            future: Point::default(),
            old: Point::default(),
            last: Point::default(),
            enemy_position: Point::default(),
            direction: Direction::South,
            mode: Mode::default(),
            goal: Goal::Normal,
            anim: AnimState::default(),
            ai: AiKind::Zombie,
            intelligence: 0,
            hit_points: 0,
            max_hit_points: 0,
            level: 0,
            exp: 0,
            to_hit: 0,
            min_damage: 0,
            max_damage: 0,
            to_hit_special: 0,
            min_damage_special: 0,
            max_damage_special: 0,
            armor_class: 0,
            resistances: Resistances::empty(),
            flags: MonsterFlags::empty(),
            enemy: None,
            squelch: 0,
            leader: LeaderRelation::None,
            pack_size: 0,
            talk: None,
            who_hit: 0,
            ai_seed: 0,
            loot_seed: 0,
            path_count: 0,
            delete_pending: false,
            serpentine: Serpentine::default(),
        }
    }
}

impl Monster {
    pub fn data(&self) -> &'static MonsterData {
        self.species.data()
    }

    pub fn name(&self) -> &'static str {
        match self.unique {
            Some(u) => u.name(),
            None => self.species.name(),
        }
    }

    pub fn is_unique(&self) -> bool {
        self.unique.is_some()
    }

    pub fn is_alive(&self) -> bool {
        self.hit_points >> HP_SHIFT > 0
    }

    pub fn is_walking(&self) -> bool {
        self.mode.is_walking()
    }

    pub fn is_golem(&self) -> bool {
        self.species == Species::Golem
    }

    /// Parked in the golem holding cell
    pub fn is_parked(&self) -> bool {
        self.tile == Point::from(crate::GOLEM_HOLDING_CELL)
    }

    /// Scripted uniques that may hold a conversation
    pub fn is_talker(&self) -> bool {
        matches!(
            self.ai,
            AiKind::Lazarus
                | AiKind::Warlord
                | AiKind::Gharbad
                | AiKind::Zhar
                | AiKind::Snotspil
                | AiKind::Lachdanan
                | AiKind::LazarusMinion
        )
    }

    /// A player clicking this monster starts a conversation
    pub fn can_talk(&self) -> bool {
        matches!(self.goal, Goal::Inquiring | Goal::Talking)
    }

    pub fn targets_monster(&self) -> bool {
        matches!(self.enemy, Some(Enemy::Monster(_)))
    }

    /// Facing towards the cached enemy position
    pub fn enemy_direction(&self) -> Direction {
        self.tile.direction_to(self.enemy_position)
    }

    /// Previous mode and idle ticks while standing
    pub fn stand_state(&self) -> Option<(ModeKind, i32)> {
        match self.mode {
            Mode::Stand { previous, idle } => Some((previous, idle)),
            _ => None,
        }
    }

    /// Attacks against this monster are rejected outright
    pub fn is_possible_to_hit(&self) -> bool {
        !(self.hit_points >> HP_SHIFT <= 0
            || self.talk.is_some()
            || (self.species == Species::IllusionWeaver
                && matches!(self.goal, Goal::Retreat { .. }))
            || self.mode == Mode::Charge
            || self.mode.kind() == ModeKind::Death
            || (self.species.is_counselor() && self.goal != Goal::Normal))
    }

    /// A perched gargoyle struck by anything wakes up instead of taking damage
    pub fn try_lift_gargoyle(&mut self) -> bool {
        if self.ai == AiKind::Gargoyle && self.flags.contains(MonsterFlags::ALLOW_SPECIAL) {
            self.flags.remove(MonsterFlags::ALLOW_SPECIAL);
            self.mode = Mode::SpecialMeleeAttack;
            return true;
        }
        false
    }
}
