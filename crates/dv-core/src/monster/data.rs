//! Species and unique monster templates (monstdat)
//!
//! Immutable stat tables. A level loads the species it needs into its type
//! table; instances copy the numbers they mutate and look the rest up here.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, IntoEnumIterator};

use super::MonsterFlags;
use super::ai::AiKind;
use crate::world::{QuestId, Speech};

/// Broad creature family; decides weapon matchups and lore text
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum MonsterClass {
    #[default]
    Undead,
    Demon,
    Animal,
}

bitflags! {
    /// Elemental resistances and immunities
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Resistances: u8 {
        const RESIST_MAGIC = 0x01;
        const RESIST_FIRE = 0x02;
        const RESIST_LIGHTNING = 0x04;
        const IMMUNE_MAGIC = 0x08;
        const IMMUNE_FIRE = 0x10;
        const IMMUNE_LIGHTNING = 0x20;
        const IMMUNE_ACID = 0x80;
    }
}

/// Sprite sheet selector; also the index into [`MonsterData::anims`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumCount)]
pub enum MonsterGraphic {
    Stand,
    Walk,
    Attack,
    GotHit,
    Death,
    Special,
}

/// Frame count and ticks per frame of one animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnimData {
    pub frames: i32,
    pub rate: i32,
}

const fn anims(frames: [i32; 6], rates: [i32; 6]) -> [AnimData; MonsterGraphic::COUNT] {
    let mut out = [AnimData { frames: 0, rate: 0 }; MonsterGraphic::COUNT];
    let mut i = 0;
    while i < MonsterGraphic::COUNT {
        out[i] = AnimData {
            frames: frames[i],
            rate: rates[i],
        };
        i += 1;
    }
    out
}

/// Species template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonsterData {
    pub name: &'static str,
    pub class: MonsterClass,
    pub ai: AiKind,
    /// 0..=3, raises most AI decision thresholds
    pub intelligence: i32,
    pub level: i32,
    /// Shallowest and deepest dungeon level for random population
    pub min_dlvl: u8,
    pub max_dlvl: u8,
    /// Whole hit points
    pub min_hp: i32,
    pub max_hp: i32,
    pub to_hit: i32,
    /// Frame (1-based) on which the melee attack lands
    pub attack_frame: i32,
    pub min_damage: i32,
    pub max_damage: i32,
    pub to_hit_special: i32,
    /// Frame (1-based) of the special attack or spell release
    pub special_frame: i32,
    pub min_damage_special: i32,
    pub max_damage_special: i32,
    pub armor_class: i32,
    pub exp: i32,
    pub resistances: Resistances,
    /// Resistances on Hell difficulty
    pub resistances_hell: Resistances,
    pub flags: MonsterFlags,
    pub anims: [AnimData; MonsterGraphic::COUNT],
    /// Rolled by random level population
    pub random_spawn: bool,
    /// Only exists under expansion rules
    pub hellfire_only: bool,
}

impl MonsterData {
    pub fn anim(&self, graphic: MonsterGraphic) -> AnimData {
        self.anims[graphic as usize]
    }
}

const BASE: MonsterData = MonsterData {
    name: "",
    class: MonsterClass::Undead,
    ai: AiKind::Skeleton,
    intelligence: 0,
    level: 1,
    min_dlvl: 1,
    max_dlvl: 2,
    min_hp: 1,
    max_hp: 1,
    to_hit: 10,
    attack_frame: 8,
    min_damage: 1,
    max_damage: 2,
    to_hit_special: 0,
    special_frame: 0,
    min_damage_special: 0,
    max_damage_special: 0,
    armor_class: 0,
    exp: 1,
    resistances: Resistances::empty(),
    resistances_hell: Resistances::empty(),
    flags: MonsterFlags::empty(),
    anims: anims([12, 16, 12, 6, 16, 0], [4, 1, 1, 1, 1, 0]),
    random_spawn: true,
    hellfire_only: false,
};

/// Every species the simulation knows
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumCount,
)]
pub enum Species {
    Zombie,
    Ghoul,
    RottingCarcass,
    BlackDeath,
    FallenSpear,
    Carver,
    DevilKin,
    DarkOne,
    FallenSword,
    Skeleton,
    CorpseAxe,
    BurningDeadAxe,
    Horror,
    SkeletonArcher,
    CorpseBow,
    BurningDeadArcher,
    HorrorArcher,
    SkeletonCaptain,
    CorpseCaptain,
    BurningDeadCaptain,
    HorrorCaptain,
    Scavenger,
    PlagueEater,
    ShadowBeast,
    BoneGasher,
    HornedDemon,
    FleshClan,
    StoneClan,
    FireClan,
    NightClan,
    FleshClanArcher,
    StoneClanArcher,
    FireClanArcher,
    NightClanArcher,
    MagmaDemon,
    BloodStone,
    HellStone,
    LavaLord,
    SkeletonKing,
    Fiend,
    Blink,
    Gloom,
    Familiar,
    Gargoyle,
    Butcher,
    Succubus,
    SnowWitch,
    HellSpawn,
    SoulBurner,
    Sneak,
    Stalker,
    Unseen,
    IllusionWeaver,
    StormRider,
    StormLord,
    Maelstrom,
    AcidBeast,
    PoisonSpitter,
    PitBeast,
    LavaMaw,
    SpiderLord,
    Golem,
    CaveViper,
    FireDrake,
    GoldViper,
    AzureDrake,
    BlackKnight,
    DoomGuard,
    SteelLord,
    BloodKnight,
    Counselor,
    Magistrate,
    Cabalist,
    Advocate,
    Balrog,
    Overlord,
    MudMan,
    Diablo,
    Gravedigger,
    FireBat,
    Torchant,
    HorkSpawn,
    HorkDemon,
    Lich,
    ArchLich,
    Psychorb,
    Necromorb,
    BoneDemon,
}

impl Species {
    pub fn data(self) -> &'static MonsterData {
        &MONSTER_DATA[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.data().name
    }

    /// Skeletons that Leoric and skeleton spawners can raise
    pub fn is_skeleton(self) -> bool {
        matches!(
            self,
            Species::Skeleton
                | Species::CorpseAxe
                | Species::BurningDeadAxe
                | Species::Horror
                | Species::SkeletonArcher
                | Species::CorpseBow
                | Species::BurningDeadArcher
                | Species::HorrorArcher
                | Species::SkeletonCaptain
                | Species::CorpseCaptain
                | Species::BurningDeadCaptain
                | Species::HorrorCaptain
        )
    }

    /// The magma demons land a second blow on frame 8
    pub fn is_magma(self) -> bool {
        matches!(
            self,
            Species::MagmaDemon | Species::BloodStone | Species::HellStone | Species::LavaLord
        )
    }

    /// Storm demons land a second blow on frame 12
    pub fn is_storm(self) -> bool {
        matches!(
            self,
            Species::StormRider | Species::StormLord | Species::Maelstrom
        )
    }

    /// Leave an acid puddle on death
    pub fn is_acid(self) -> bool {
        matches!(
            self,
            Species::AcidBeast
                | Species::PoisonSpitter
                | Species::PitBeast
                | Species::LavaMaw
                | Species::SpiderLord
        )
    }

    /// Carrion eaters that drop their meal when struck hard
    pub fn is_scavenger(self) -> bool {
        matches!(
            self,
            Species::Scavenger
                | Species::PlagueEater
                | Species::ShadowBeast
                | Species::BoneGasher
                | Species::Gravedigger
        )
    }

    /// Counselor family, untargetable while not in their normal goal
    pub fn is_counselor(self) -> bool {
        matches!(
            self,
            Species::Counselor | Species::Magistrate | Species::Cabalist | Species::Advocate
        )
    }

    /// Species eligible for random population at `dlvl`
    pub fn for_level(dlvl: u8, hellfire: bool) -> impl Iterator<Item = Species> {
        Species::iter().filter(move |s| {
            let d = s.data();
            d.random_spawn
                && (hellfire || !d.hellfire_only)
                && d.min_dlvl <= dlvl
                && dlvl <= d.max_dlvl
        })
    }
}

use AiKind as A;
use MonsterClass::{Animal, Demon, Undead};
use Resistances as R;

const OPEN: MonsterFlags = MonsterFlags::CAN_OPEN_DOOR;

const ZOMBIE_ANIMS: [AnimData; 6] = anims([11, 24, 12, 6, 16, 0], [4, 1, 1, 1, 1, 0]);
const FALLEN_ANIMS: [AnimData; 6] = anims([11, 11, 13, 7, 18, 17], [3, 1, 1, 1, 1, 1]);
const SKELETON_ANIMS: [AnimData; 6] = anims([12, 8, 13, 6, 17, 16], [5, 1, 1, 1, 1, 1]);
const ARCHER_ANIMS: [AnimData; 6] = anims([12, 8, 16, 6, 16, 16], [5, 1, 1, 1, 1, 1]);
const SCAVENGER_ANIMS: [AnimData; 6] = anims([12, 8, 12, 6, 20, 11], [4, 1, 1, 1, 1, 1]);
const GOAT_ANIMS: [AnimData; 6] = anims([12, 8, 12, 6, 16, 15], [4, 1, 1, 1, 1, 1]);
const MAGMA_ANIMS: [AnimData; 6] = anims([13, 7, 14, 2, 18, 14], [3, 1, 1, 1, 1, 1]);
const BAT_ANIMS: [AnimData; 6] = anims([9, 13, 10, 9, 13, 0], [1, 1, 1, 1, 1, 0]);
const SUCCUBUS_ANIMS: [AnimData; 6] = anims([14, 8, 16, 7, 24, 0], [3, 1, 1, 1, 1, 0]);
const SNEAK_ANIMS: [AnimData; 6] = anims([16, 8, 12, 8, 24, 15], [3, 1, 1, 1, 1, 1]);
const STORM_ANIMS: [AnimData; 6] = anims([18, 8, 18, 6, 17, 15], [3, 1, 1, 1, 1, 1]);
const ACID_ANIMS: [AnimData; 6] = anims([13, 8, 12, 8, 19, 0], [3, 1, 1, 1, 1, 0]);
const SNAKE_ANIMS: [AnimData; 6] = anims([12, 11, 13, 5, 18, 0], [2, 1, 1, 1, 1, 0]);
const KNIGHT_ANIMS: [AnimData; 6] = anims([13, 9, 16, 4, 22, 0], [3, 1, 1, 1, 1, 0]);
const COUNSELOR_ANIMS: [AnimData; 6] = anims([8, 8, 16, 4, 28, 0], [3, 1, 1, 1, 1, 0]);
const COUNSELOR_FADE: [AnimData; 6] = anims([8, 8, 16, 4, 28, 8], [3, 1, 1, 1, 1, 1]);
const OVERLORD_ANIMS: [AnimData; 6] = anims([10, 8, 12, 6, 16, 0], [4, 1, 1, 1, 1, 0]);
const HF_RANGED_ANIMS: [AnimData; 6] = anims([12, 10, 14, 6, 16, 12], [3, 1, 1, 1, 1, 1]);

static MONSTER_DATA: [MonsterData; Species::COUNT] = [
    // Zombies
    MonsterData {
        name: "Zombie",
        ai: A::Zombie,
        level: 1,
        min_dlvl: 1,
        max_dlvl: 3,
        min_hp: 4,
        max_hp: 7,
        to_hit: 10,
        min_damage: 2,
        max_damage: 5,
        armor_class: 5,
        exp: 54,
        anims: ZOMBIE_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Ghoul",
        ai: A::Zombie,
        intelligence: 1,
        level: 2,
        min_dlvl: 2,
        max_dlvl: 4,
        min_hp: 7,
        max_hp: 11,
        to_hit: 10,
        min_damage: 3,
        max_damage: 10,
        armor_class: 10,
        exp: 58,
        anims: ZOMBIE_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Rotting Carcass",
        ai: A::Zombie,
        intelligence: 2,
        level: 4,
        min_dlvl: 4,
        max_dlvl: 6,
        min_hp: 15,
        max_hp: 25,
        to_hit: 25,
        min_damage: 5,
        max_damage: 15,
        armor_class: 15,
        exp: 136,
        resistances: R::RESIST_MAGIC,
        resistances_hell: R::RESIST_MAGIC.union(R::IMMUNE_ACID),
        anims: ZOMBIE_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Black Death",
        ai: A::Zombie,
        intelligence: 3,
        level: 6,
        min_dlvl: 6,
        max_dlvl: 8,
        min_hp: 17,
        max_hp: 22,
        to_hit: 30,
        min_damage: 6,
        max_damage: 22,
        armor_class: 20,
        exp: 240,
        resistances: R::RESIST_MAGIC,
        resistances_hell: R::IMMUNE_MAGIC.union(R::RESIST_FIRE),
        anims: ZOMBIE_ANIMS,
        ..BASE
    },
    // Fallen ones
    MonsterData {
        name: "Fallen One",
        class: Animal,
        ai: A::Fallen,
        level: 1,
        min_dlvl: 1,
        max_dlvl: 3,
        min_hp: 1,
        max_hp: 4,
        to_hit: 15,
        attack_frame: 7,
        min_damage: 1,
        max_damage: 3,
        exp: 46,
        flags: OPEN,
        anims: FALLEN_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Carver",
        class: Animal,
        ai: A::Fallen,
        intelligence: 2,
        level: 3,
        min_dlvl: 2,
        max_dlvl: 5,
        min_hp: 4,
        max_hp: 8,
        to_hit: 20,
        attack_frame: 7,
        min_damage: 2,
        max_damage: 5,
        armor_class: 5,
        exp: 80,
        flags: OPEN,
        anims: FALLEN_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Devil Kin",
        class: Animal,
        ai: A::Fallen,
        intelligence: 2,
        level: 5,
        min_dlvl: 4,
        max_dlvl: 7,
        min_hp: 12,
        max_hp: 24,
        to_hit: 25,
        attack_frame: 7,
        min_damage: 3,
        max_damage: 7,
        armor_class: 10,
        exp: 155,
        resistances_hell: R::RESIST_MAGIC,
        flags: OPEN,
        anims: FALLEN_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Dark One",
        class: Animal,
        ai: A::Fallen,
        intelligence: 3,
        level: 7,
        min_dlvl: 6,
        max_dlvl: 9,
        min_hp: 20,
        max_hp: 36,
        to_hit: 30,
        attack_frame: 7,
        min_damage: 4,
        max_damage: 8,
        armor_class: 15,
        exp: 255,
        resistances: R::RESIST_MAGIC,
        resistances_hell: R::RESIST_MAGIC.union(R::RESIST_FIRE),
        flags: OPEN,
        anims: FALLEN_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Fallen One",
        class: Animal,
        ai: A::Fallen,
        level: 1,
        min_dlvl: 1,
        max_dlvl: 3,
        min_hp: 2,
        max_hp: 5,
        to_hit: 15,
        attack_frame: 8,
        min_damage: 1,
        max_damage: 4,
        armor_class: 10,
        exp: 52,
        flags: OPEN,
        anims: FALLEN_ANIMS,
        ..BASE
    },
    // Skeletons
    MonsterData {
        name: "Skeleton",
        level: 1,
        min_dlvl: 1,
        max_dlvl: 2,
        min_hp: 2,
        max_hp: 4,
        to_hit: 20,
        min_damage: 1,
        max_damage: 4,
        exp: 64,
        resistances_hell: R::IMMUNE_MAGIC,
        flags: OPEN,
        anims: SKELETON_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Corpse Axe",
        intelligence: 1,
        level: 2,
        min_dlvl: 2,
        max_dlvl: 3,
        min_hp: 4,
        max_hp: 7,
        to_hit: 25,
        min_damage: 3,
        max_damage: 5,
        exp: 68,
        resistances_hell: R::IMMUNE_MAGIC,
        flags: OPEN,
        anims: SKELETON_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Burning Dead",
        intelligence: 2,
        level: 4,
        min_dlvl: 3,
        max_dlvl: 5,
        min_hp: 8,
        max_hp: 12,
        to_hit: 30,
        min_damage: 3,
        max_damage: 7,
        armor_class: 5,
        exp: 154,
        resistances: R::IMMUNE_FIRE,
        resistances_hell: R::IMMUNE_MAGIC.union(R::IMMUNE_FIRE),
        flags: OPEN,
        anims: SKELETON_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Horror",
        intelligence: 3,
        level: 6,
        min_dlvl: 5,
        max_dlvl: 7,
        min_hp: 12,
        max_hp: 20,
        to_hit: 35,
        min_damage: 4,
        max_damage: 9,
        armor_class: 15,
        exp: 264,
        resistances: R::RESIST_MAGIC.union(R::RESIST_LIGHTNING),
        resistances_hell: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::RESIST_LIGHTNING),
        flags: OPEN,
        anims: SKELETON_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Skeleton Archer",
        ai: A::SkeletonBow,
        level: 3,
        min_dlvl: 2,
        max_dlvl: 4,
        min_hp: 8,
        max_hp: 12,
        to_hit: 15,
        attack_frame: 16,
        min_damage: 1,
        max_damage: 2,
        exp: 110,
        resistances_hell: R::IMMUNE_MAGIC,
        flags: OPEN,
        anims: ARCHER_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Corpse Bow",
        ai: A::SkeletonBow,
        intelligence: 1,
        level: 5,
        min_dlvl: 4,
        max_dlvl: 6,
        min_hp: 10,
        max_hp: 15,
        to_hit: 25,
        attack_frame: 16,
        min_damage: 1,
        max_damage: 4,
        exp: 210,
        resistances_hell: R::IMMUNE_MAGIC,
        flags: OPEN,
        anims: ARCHER_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Burning Dead Archer",
        ai: A::SkeletonBow,
        intelligence: 2,
        level: 7,
        min_dlvl: 5,
        max_dlvl: 8,
        min_hp: 15,
        max_hp: 20,
        to_hit: 30,
        attack_frame: 16,
        min_damage: 1,
        max_damage: 6,
        armor_class: 5,
        exp: 364,
        resistances: R::IMMUNE_FIRE,
        resistances_hell: R::IMMUNE_MAGIC.union(R::IMMUNE_FIRE),
        flags: OPEN,
        anims: ARCHER_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Horror Archer",
        ai: A::SkeletonBow,
        intelligence: 3,
        level: 9,
        min_dlvl: 7,
        max_dlvl: 9,
        min_hp: 18,
        max_hp: 26,
        to_hit: 35,
        attack_frame: 16,
        min_damage: 2,
        max_damage: 9,
        armor_class: 15,
        exp: 594,
        resistances: R::RESIST_MAGIC.union(R::RESIST_LIGHTNING),
        resistances_hell: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::RESIST_LIGHTNING),
        flags: OPEN,
        anims: ARCHER_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Skeleton Captain",
        intelligence: 1,
        level: 2,
        min_dlvl: 1,
        max_dlvl: 3,
        min_hp: 3,
        max_hp: 6,
        to_hit: 20,
        min_damage: 2,
        max_damage: 7,
        armor_class: 10,
        exp: 90,
        resistances_hell: R::IMMUNE_MAGIC,
        flags: OPEN,
        anims: SKELETON_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Corpse Captain",
        intelligence: 1,
        level: 4,
        min_dlvl: 2,
        max_dlvl: 5,
        min_hp: 12,
        max_hp: 17,
        to_hit: 30,
        min_damage: 3,
        max_damage: 9,
        armor_class: 5,
        exp: 200,
        resistances_hell: R::IMMUNE_MAGIC,
        flags: OPEN,
        anims: SKELETON_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Burning Dead Captain",
        intelligence: 2,
        level: 6,
        min_dlvl: 4,
        max_dlvl: 7,
        min_hp: 16,
        max_hp: 23,
        to_hit: 35,
        min_damage: 4,
        max_damage: 10,
        armor_class: 15,
        exp: 393,
        resistances: R::IMMUNE_FIRE,
        resistances_hell: R::IMMUNE_MAGIC.union(R::IMMUNE_FIRE),
        flags: OPEN,
        anims: SKELETON_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Horror Captain",
        intelligence: 3,
        level: 8,
        min_dlvl: 6,
        max_dlvl: 9,
        min_hp: 35,
        max_hp: 50,
        to_hit: 40,
        min_damage: 5,
        max_damage: 14,
        armor_class: 30,
        exp: 604,
        resistances: R::RESIST_MAGIC.union(R::RESIST_LIGHTNING),
        resistances_hell: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::RESIST_LIGHTNING),
        flags: OPEN.union(MonsterFlags::SEARCH),
        anims: SKELETON_ANIMS,
        ..BASE
    },
    // Scavengers
    MonsterData {
        name: "Scavenger",
        class: Animal,
        ai: A::Scavenger,
        level: 3,
        min_dlvl: 2,
        max_dlvl: 4,
        min_hp: 3,
        max_hp: 6,
        to_hit: 20,
        min_damage: 1,
        max_damage: 5,
        armor_class: 10,
        exp: 80,
        resistances_hell: R::RESIST_FIRE,
        anims: SCAVENGER_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Plague Eater",
        class: Animal,
        ai: A::Scavenger,
        intelligence: 1,
        level: 5,
        min_dlvl: 4,
        max_dlvl: 6,
        min_hp: 12,
        max_hp: 24,
        to_hit: 30,
        min_damage: 1,
        max_damage: 8,
        armor_class: 20,
        exp: 188,
        resistances_hell: R::RESIST_LIGHTNING,
        anims: SCAVENGER_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Shadow Beast",
        class: Animal,
        ai: A::Scavenger,
        intelligence: 2,
        level: 7,
        min_dlvl: 5,
        max_dlvl: 8,
        min_hp: 24,
        max_hp: 36,
        to_hit: 35,
        min_damage: 3,
        max_damage: 12,
        armor_class: 25,
        exp: 375,
        resistances: R::RESIST_FIRE,
        resistances_hell: R::RESIST_MAGIC.union(R::RESIST_FIRE),
        anims: SCAVENGER_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Bone Gasher",
        class: Animal,
        ai: A::Scavenger,
        intelligence: 3,
        level: 9,
        min_dlvl: 7,
        max_dlvl: 10,
        min_hp: 28,
        max_hp: 40,
        to_hit: 35,
        min_damage: 5,
        max_damage: 15,
        armor_class: 30,
        exp: 552,
        resistances: R::RESIST_MAGIC.union(R::RESIST_LIGHTNING),
        resistances_hell: R::RESIST_MAGIC.union(R::RESIST_LIGHTNING).union(R::IMMUNE_ACID),
        flags: MonsterFlags::SEARCH,
        anims: SCAVENGER_ANIMS,
        ..BASE
    },
    // Horned demon charges
    MonsterData {
        name: "Horned Demon",
        class: Animal,
        ai: A::Rhino,
        intelligence: 2,
        level: 7,
        min_dlvl: 5,
        max_dlvl: 9,
        min_hp: 20,
        max_hp: 40,
        to_hit: 60,
        attack_frame: 7,
        min_damage: 2,
        max_damage: 16,
        to_hit_special: 100,
        special_frame: 0,
        min_damage_special: 2,
        max_damage_special: 16,
        armor_class: 40,
        exp: 509,
        resistances_hell: R::RESIST_FIRE,
        flags: MonsterFlags::KNOCKBACK,
        anims: anims([13, 9, 11, 6, 16, 4], [2, 1, 1, 1, 1, 1]),
        ..BASE
    },
    // Goatmen
    MonsterData {
        name: "Flesh Clan",
        class: Demon,
        ai: A::GoatMace,
        level: 3,
        min_dlvl: 2,
        max_dlvl: 5,
        min_hp: 8,
        max_hp: 24,
        to_hit: 50,
        min_damage: 1,
        max_damage: 12,
        to_hit_special: 50,
        special_frame: 9,
        min_damage_special: 2,
        max_damage_special: 15,
        armor_class: 40,
        exp: 460,
        resistances_hell: R::RESIST_MAGIC,
        flags: OPEN,
        anims: GOAT_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Stone Clan",
        class: Demon,
        ai: A::GoatMace,
        intelligence: 1,
        level: 5,
        min_dlvl: 4,
        max_dlvl: 6,
        min_hp: 20,
        max_hp: 30,
        to_hit: 50,
        min_damage: 4,
        max_damage: 14,
        to_hit_special: 55,
        special_frame: 9,
        min_damage_special: 4,
        max_damage_special: 16,
        armor_class: 40,
        exp: 685,
        resistances: R::RESIST_MAGIC,
        resistances_hell: R::IMMUNE_MAGIC,
        flags: OPEN,
        anims: GOAT_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Fire Clan",
        class: Demon,
        ai: A::GoatMace,
        intelligence: 2,
        level: 7,
        min_dlvl: 5,
        max_dlvl: 8,
        min_hp: 25,
        max_hp: 35,
        to_hit: 55,
        min_damage: 6,
        max_damage: 16,
        to_hit_special: 60,
        special_frame: 9,
        min_damage_special: 6,
        max_damage_special: 18,
        armor_class: 45,
        exp: 906,
        resistances: R::RESIST_FIRE,
        resistances_hell: R::RESIST_MAGIC.union(R::IMMUNE_FIRE),
        flags: OPEN,
        anims: GOAT_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Night Clan",
        class: Demon,
        ai: A::GoatMace,
        intelligence: 3,
        level: 9,
        min_dlvl: 7,
        max_dlvl: 10,
        min_hp: 27,
        max_hp: 40,
        to_hit: 65,
        min_damage: 8,
        max_damage: 20,
        to_hit_special: 70,
        special_frame: 9,
        min_damage_special: 8,
        max_damage_special: 22,
        armor_class: 50,
        exp: 1190,
        resistances: R::RESIST_MAGIC,
        resistances_hell: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::RESIST_LIGHTNING),
        flags: OPEN,
        anims: GOAT_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Flesh Clan Archer",
        class: Demon,
        ai: A::GoatBow,
        level: 4,
        min_dlvl: 3,
        max_dlvl: 5,
        min_hp: 10,
        max_hp: 22,
        to_hit: 35,
        attack_frame: 13,
        min_damage: 1,
        max_damage: 7,
        armor_class: 35,
        exp: 448,
        flags: OPEN,
        anims: anims([13, 8, 16, 6, 16, 0], [3, 1, 1, 1, 1, 0]),
        ..BASE
    },
    MonsterData {
        name: "Stone Clan Archer",
        class: Demon,
        ai: A::GoatBow,
        intelligence: 1,
        level: 6,
        min_dlvl: 4,
        max_dlvl: 7,
        min_hp: 18,
        max_hp: 30,
        to_hit: 40,
        attack_frame: 13,
        min_damage: 2,
        max_damage: 9,
        armor_class: 35,
        exp: 645,
        resistances: R::RESIST_MAGIC,
        resistances_hell: R::IMMUNE_MAGIC,
        flags: OPEN,
        anims: anims([13, 8, 16, 6, 16, 0], [3, 1, 1, 1, 1, 0]),
        ..BASE
    },
    MonsterData {
        name: "Fire Clan Archer",
        class: Demon,
        ai: A::GoatBow,
        intelligence: 2,
        level: 8,
        min_dlvl: 6,
        max_dlvl: 9,
        min_hp: 22,
        max_hp: 36,
        to_hit: 45,
        attack_frame: 13,
        min_damage: 3,
        max_damage: 11,
        armor_class: 35,
        exp: 822,
        resistances: R::RESIST_FIRE,
        resistances_hell: R::RESIST_MAGIC.union(R::IMMUNE_FIRE),
        flags: OPEN,
        anims: anims([13, 8, 16, 6, 16, 0], [3, 1, 1, 1, 1, 0]),
        ..BASE
    },
    MonsterData {
        name: "Night Clan Archer",
        class: Demon,
        ai: A::GoatBow,
        intelligence: 3,
        level: 10,
        min_dlvl: 8,
        max_dlvl: 11,
        min_hp: 30,
        max_hp: 40,
        to_hit: 50,
        attack_frame: 13,
        min_damage: 4,
        max_damage: 13,
        armor_class: 40,
        exp: 1092,
        resistances: R::RESIST_MAGIC,
        resistances_hell: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::RESIST_LIGHTNING),
        flags: OPEN,
        anims: anims([13, 8, 16, 6, 16, 0], [3, 1, 1, 1, 1, 0]),
        ..BASE
    },
    // Magma demons
    MonsterData {
        name: "Magma Demon",
        class: Demon,
        ai: A::Magma,
        intelligence: 1,
        level: 9,
        min_dlvl: 8,
        max_dlvl: 11,
        min_hp: 50,
        max_hp: 70,
        to_hit: 45,
        attack_frame: 4,
        min_damage: 2,
        max_damage: 10,
        to_hit_special: 50,
        special_frame: 13,
        armor_class: 45,
        exp: 1076,
        resistances: R::IMMUNE_MAGIC.union(R::RESIST_FIRE),
        resistances_hell: R::IMMUNE_MAGIC.union(R::IMMUNE_FIRE),
        anims: MAGMA_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Blood Stone",
        class: Demon,
        ai: A::Magma,
        intelligence: 1,
        level: 10,
        min_dlvl: 8,
        max_dlvl: 12,
        min_hp: 55,
        max_hp: 75,
        to_hit: 50,
        attack_frame: 4,
        min_damage: 2,
        max_damage: 12,
        to_hit_special: 50,
        special_frame: 13,
        armor_class: 45,
        exp: 1309,
        resistances: R::IMMUNE_MAGIC.union(R::IMMUNE_FIRE),
        resistances_hell: R::IMMUNE_MAGIC.union(R::IMMUNE_FIRE).union(R::RESIST_LIGHTNING),
        anims: MAGMA_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Hell Stone",
        class: Demon,
        ai: A::Magma,
        intelligence: 1,
        level: 11,
        min_dlvl: 9,
        max_dlvl: 13,
        min_hp: 60,
        max_hp: 80,
        to_hit: 60,
        attack_frame: 4,
        min_damage: 2,
        max_damage: 20,
        to_hit_special: 60,
        special_frame: 13,
        armor_class: 50,
        exp: 1680,
        resistances: R::IMMUNE_MAGIC.union(R::IMMUNE_FIRE),
        resistances_hell: R::IMMUNE_MAGIC.union(R::IMMUNE_FIRE).union(R::RESIST_LIGHTNING),
        anims: MAGMA_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Lava Lord",
        class: Demon,
        ai: A::Magma,
        intelligence: 1,
        level: 13,
        min_dlvl: 10,
        max_dlvl: 14,
        min_hp: 70,
        max_hp: 90,
        to_hit: 75,
        attack_frame: 4,
        min_damage: 4,
        max_damage: 24,
        to_hit_special: 60,
        special_frame: 13,
        armor_class: 60,
        exp: 2124,
        resistances: R::IMMUNE_MAGIC.union(R::IMMUNE_FIRE),
        resistances_hell: R::IMMUNE_MAGIC.union(R::IMMUNE_FIRE).union(R::RESIST_LIGHTNING),
        anims: MAGMA_ANIMS,
        ..BASE
    },
    // The Skeleton King
    MonsterData {
        name: "The Skeleton King",
        ai: A::SkeletonKing,
        intelligence: 3,
        level: 9,
        min_dlvl: 3,
        max_dlvl: 3,
        min_hp: 140,
        max_hp: 140,
        to_hit: 60,
        min_damage: 6,
        max_damage: 16,
        special_frame: 8,
        armor_class: 70,
        exp: 570,
        resistances: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::RESIST_LIGHTNING),
        resistances_hell: R::IMMUNE_MAGIC.union(R::IMMUNE_FIRE).union(R::IMMUNE_LIGHTNING),
        flags: OPEN.union(MonsterFlags::SEARCH),
        anims: anims([8, 16, 16, 6, 16, 16], [3, 1, 1, 1, 2, 1]),
        random_spawn: false,
        ..BASE
    },
    // Bats
    MonsterData {
        name: "Fiend",
        class: Animal,
        ai: A::Bat,
        level: 2,
        min_dlvl: 2,
        max_dlvl: 5,
        min_hp: 3,
        max_hp: 6,
        to_hit: 35,
        attack_frame: 5,
        min_damage: 1,
        max_damage: 6,
        exp: 102,
        anims: BAT_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Blink",
        class: Animal,
        ai: A::Bat,
        intelligence: 1,
        level: 6,
        min_dlvl: 5,
        max_dlvl: 8,
        min_hp: 12,
        max_hp: 28,
        to_hit: 45,
        attack_frame: 5,
        min_damage: 1,
        max_damage: 8,
        armor_class: 15,
        exp: 340,
        resistances_hell: R::RESIST_FIRE,
        anims: BAT_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Gloom",
        class: Animal,
        ai: A::Bat,
        intelligence: 2,
        level: 8,
        min_dlvl: 7,
        max_dlvl: 10,
        min_hp: 28,
        max_hp: 36,
        to_hit: 70,
        attack_frame: 5,
        min_damage: 4,
        max_damage: 12,
        armor_class: 35,
        exp: 509,
        resistances: R::RESIST_MAGIC,
        resistances_hell: R::RESIST_MAGIC.union(R::RESIST_FIRE),
        anims: BAT_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Familiar",
        class: Demon,
        ai: A::Bat,
        intelligence: 3,
        level: 10,
        min_dlvl: 9,
        max_dlvl: 12,
        min_hp: 20,
        max_hp: 35,
        to_hit: 50,
        attack_frame: 5,
        min_damage: 4,
        max_damage: 16,
        armor_class: 35,
        exp: 448,
        resistances: R::RESIST_MAGIC.union(R::IMMUNE_LIGHTNING),
        resistances_hell: R::RESIST_MAGIC.union(R::RESIST_FIRE).union(R::IMMUNE_LIGHTNING),
        anims: BAT_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Winged Demon",
        class: Demon,
        ai: A::Gargoyle,
        level: 9,
        min_dlvl: 5,
        max_dlvl: 9,
        min_hp: 45,
        max_hp: 60,
        to_hit: 45,
        attack_frame: 7,
        min_damage: 1,
        max_damage: 10,
        armor_class: 45,
        exp: 662,
        resistances: R::IMMUNE_MAGIC.union(R::RESIST_LIGHTNING),
        resistances_hell: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::RESIST_LIGHTNING),
        anims: anims([14, 14, 14, 10, 18, 14], [3, 1, 1, 1, 1, 1]),
        ..BASE
    },
    MonsterData {
        name: "The Butcher",
        class: Demon,
        ai: A::Butcher,
        intelligence: 3,
        level: 10,
        min_dlvl: 2,
        max_dlvl: 2,
        min_hp: 320,
        max_hp: 320,
        to_hit: 50,
        min_damage: 4,
        max_damage: 24,
        armor_class: 50,
        exp: 710,
        resistances: R::RESIST_FIRE.union(R::RESIST_LIGHTNING),
        resistances_hell: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::RESIST_LIGHTNING),
        anims: anims([10, 8, 12, 6, 16, 0], [4, 1, 1, 1, 1, 0]),
        random_spawn: false,
        ..BASE
    },
    // Succubi
    MonsterData {
        name: "Succubus",
        class: Demon,
        ai: A::Succubus,
        intelligence: 1,
        level: 12,
        min_dlvl: 10,
        max_dlvl: 13,
        min_hp: 60,
        max_hp: 75,
        to_hit: 100,
        attack_frame: 10,
        min_damage: 1,
        max_damage: 20,
        armor_class: 60,
        exp: 2890,
        resistances: R::RESIST_MAGIC,
        resistances_hell: R::IMMUNE_MAGIC.union(R::RESIST_FIRE),
        flags: OPEN,
        anims: SUCCUBUS_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Snow Witch",
        class: Demon,
        ai: A::Succubus,
        intelligence: 1,
        level: 13,
        min_dlvl: 11,
        max_dlvl: 14,
        min_hp: 68,
        max_hp: 85,
        to_hit: 110,
        attack_frame: 10,
        min_damage: 1,
        max_damage: 24,
        armor_class: 65,
        exp: 3150,
        resistances: R::RESIST_LIGHTNING,
        resistances_hell: R::IMMUNE_MAGIC.union(R::RESIST_LIGHTNING),
        flags: OPEN,
        anims: SUCCUBUS_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Hell Spawn",
        class: Demon,
        ai: A::Succubus,
        intelligence: 3,
        level: 14,
        min_dlvl: 12,
        max_dlvl: 15,
        min_hp: 80,
        max_hp: 100,
        to_hit: 115,
        attack_frame: 10,
        min_damage: 1,
        max_damage: 30,
        armor_class: 75,
        exp: 3408,
        resistances: R::RESIST_MAGIC.union(R::IMMUNE_LIGHTNING),
        resistances_hell: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::IMMUNE_LIGHTNING),
        flags: OPEN,
        anims: SUCCUBUS_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Soul Burner",
        class: Demon,
        ai: A::Succubus,
        intelligence: 3,
        level: 15,
        min_dlvl: 13,
        max_dlvl: 16,
        min_hp: 88,
        max_hp: 112,
        to_hit: 120,
        attack_frame: 10,
        min_damage: 1,
        max_damage: 35,
        armor_class: 85,
        exp: 3500,
        resistances: R::RESIST_MAGIC.union(R::IMMUNE_FIRE).union(R::RESIST_LIGHTNING),
        resistances_hell: R::IMMUNE_MAGIC.union(R::IMMUNE_FIRE).union(R::IMMUNE_LIGHTNING),
        flags: OPEN,
        anims: SUCCUBUS_ANIMS,
        ..BASE
    },
    // Sneaks
    MonsterData {
        name: "Hidden",
        class: Demon,
        ai: A::Sneak,
        level: 5,
        min_dlvl: 4,
        max_dlvl: 7,
        min_hp: 8,
        max_hp: 24,
        to_hit: 35,
        min_damage: 3,
        max_damage: 6,
        armor_class: 25,
        exp: 278,
        resistances_hell: R::RESIST_MAGIC,
        flags: MonsterFlags::HIDDEN,
        anims: SNEAK_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Stalker",
        class: Demon,
        ai: A::Sneak,
        intelligence: 1,
        level: 9,
        min_dlvl: 7,
        max_dlvl: 10,
        min_hp: 30,
        max_hp: 45,
        to_hit: 40,
        min_damage: 8,
        max_damage: 16,
        armor_class: 30,
        exp: 630,
        resistances_hell: R::RESIST_MAGIC.union(R::RESIST_FIRE),
        flags: MonsterFlags::HIDDEN.union(MonsterFlags::SEARCH),
        anims: SNEAK_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Unseen",
        class: Demon,
        ai: A::Sneak,
        intelligence: 2,
        level: 11,
        min_dlvl: 9,
        max_dlvl: 12,
        min_hp: 35,
        max_hp: 50,
        to_hit: 45,
        min_damage: 12,
        max_damage: 20,
        armor_class: 30,
        exp: 935,
        resistances: R::RESIST_MAGIC.union(R::RESIST_LIGHTNING),
        resistances_hell: R::IMMUNE_MAGIC.union(R::RESIST_LIGHTNING),
        flags: MonsterFlags::HIDDEN,
        anims: SNEAK_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Illusion Weaver",
        class: Demon,
        ai: A::Sneak,
        intelligence: 3,
        level: 13,
        min_dlvl: 11,
        max_dlvl: 14,
        min_hp: 40,
        max_hp: 60,
        to_hit: 60,
        min_damage: 16,
        max_damage: 24,
        armor_class: 30,
        exp: 1500,
        resistances: R::RESIST_MAGIC.union(R::RESIST_FIRE),
        resistances_hell: R::IMMUNE_MAGIC.union(R::IMMUNE_FIRE),
        flags: MonsterFlags::HIDDEN,
        anims: SNEAK_ANIMS,
        ..BASE
    },
    // Storm demons
    MonsterData {
        name: "Storm Rider",
        class: Demon,
        ai: A::Storm,
        intelligence: 3,
        level: 14,
        min_dlvl: 12,
        max_dlvl: 15,
        min_hp: 60,
        max_hp: 80,
        to_hit: 80,
        attack_frame: 13,
        min_damage: 4,
        max_damage: 16,
        to_hit_special: 100,
        special_frame: 8,
        armor_class: 60,
        exp: 2160,
        resistances: R::RESIST_MAGIC.union(R::IMMUNE_LIGHTNING),
        resistances_hell: R::IMMUNE_MAGIC.union(R::IMMUNE_LIGHTNING),
        flags: OPEN,
        anims: STORM_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Storm Lord",
        class: Demon,
        ai: A::Storm,
        intelligence: 3,
        level: 16,
        min_dlvl: 13,
        max_dlvl: 16,
        min_hp: 75,
        max_hp: 90,
        to_hit: 85,
        attack_frame: 13,
        min_damage: 6,
        max_damage: 18,
        to_hit_special: 100,
        special_frame: 8,
        armor_class: 70,
        exp: 2391,
        resistances: R::RESIST_MAGIC.union(R::IMMUNE_LIGHTNING),
        resistances_hell: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::IMMUNE_LIGHTNING),
        flags: OPEN,
        anims: STORM_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Maelstrom",
        class: Demon,
        ai: A::Storm,
        intelligence: 3,
        level: 18,
        min_dlvl: 14,
        max_dlvl: 16,
        min_hp: 90,
        max_hp: 110,
        to_hit: 90,
        attack_frame: 13,
        min_damage: 8,
        max_damage: 20,
        to_hit_special: 100,
        special_frame: 8,
        armor_class: 75,
        exp: 2775,
        resistances: R::RESIST_MAGIC.union(R::IMMUNE_LIGHTNING),
        resistances_hell: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::IMMUNE_LIGHTNING),
        flags: OPEN,
        anims: STORM_ANIMS,
        ..BASE
    },
    // Acid beasts
    MonsterData {
        name: "Acid Beast",
        class: Animal,
        ai: A::Acid,
        intelligence: 1,
        level: 11,
        min_dlvl: 9,
        max_dlvl: 12,
        min_hp: 40,
        max_hp: 66,
        to_hit: 40,
        min_damage: 4,
        max_damage: 12,
        to_hit_special: 0,
        special_frame: 8,
        armor_class: 30,
        exp: 846,
        resistances: R::IMMUNE_ACID,
        resistances_hell: R::RESIST_MAGIC.union(R::IMMUNE_ACID),
        anims: ACID_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Poison Spitter",
        class: Animal,
        ai: A::Acid,
        intelligence: 1,
        level: 13,
        min_dlvl: 10,
        max_dlvl: 14,
        min_hp: 60,
        max_hp: 85,
        to_hit: 45,
        min_damage: 4,
        max_damage: 16,
        special_frame: 8,
        armor_class: 30,
        exp: 1248,
        resistances: R::IMMUNE_ACID,
        resistances_hell: R::RESIST_MAGIC.union(R::IMMUNE_ACID),
        anims: ACID_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Pit Beast",
        class: Animal,
        ai: A::Acid,
        intelligence: 2,
        level: 15,
        min_dlvl: 12,
        max_dlvl: 15,
        min_hp: 80,
        max_hp: 110,
        to_hit: 55,
        min_damage: 8,
        max_damage: 18,
        special_frame: 8,
        armor_class: 35,
        exp: 2060,
        resistances: R::RESIST_MAGIC.union(R::IMMUNE_ACID),
        resistances_hell: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::IMMUNE_ACID),
        anims: ACID_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Lava Maw",
        class: Animal,
        ai: A::Acid,
        intelligence: 3,
        level: 17,
        min_dlvl: 13,
        max_dlvl: 16,
        min_hp: 100,
        max_hp: 150,
        to_hit: 65,
        min_damage: 10,
        max_damage: 20,
        special_frame: 8,
        armor_class: 40,
        exp: 2940,
        resistances: R::RESIST_MAGIC.union(R::IMMUNE_FIRE).union(R::IMMUNE_ACID),
        resistances_hell: R::IMMUNE_MAGIC.union(R::IMMUNE_FIRE).union(R::IMMUNE_ACID),
        anims: ACID_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Spider Lord",
        class: Animal,
        ai: A::AcidUnique,
        intelligence: 3,
        level: 16,
        min_dlvl: 12,
        max_dlvl: 15,
        min_hp: 140,
        max_hp: 160,
        to_hit: 75,
        min_damage: 12,
        max_damage: 26,
        special_frame: 8,
        armor_class: 50,
        exp: 3200,
        resistances: R::RESIST_MAGIC.union(R::RESIST_LIGHTNING).union(R::IMMUNE_ACID),
        resistances_hell: R::IMMUNE_MAGIC.union(R::RESIST_LIGHTNING).union(R::IMMUNE_ACID),
        anims: anims([12, 8, 16, 6, 20, 12], [3, 1, 1, 1, 1, 1]),
        random_spawn: false,
        ..BASE
    },
    MonsterData {
        name: "Golem",
        class: Demon,
        ai: A::Golem,
        level: 12,
        min_dlvl: 1,
        max_dlvl: 16,
        min_hp: 1,
        max_hp: 1,
        to_hit: 0,
        attack_frame: 7,
        min_damage: 1,
        max_damage: 1,
        exp: 0,
        flags: MonsterFlags::GOLEM,
        anims: anims([1, 16, 12, 6, 12, 16], [1, 1, 1, 1, 1, 1]),
        random_spawn: false,
        ..BASE
    },
    // Snakes
    MonsterData {
        name: "Cave Viper",
        class: Demon,
        ai: A::Snake,
        intelligence: 1,
        level: 11,
        min_dlvl: 8,
        max_dlvl: 11,
        min_hp: 50,
        max_hp: 75,
        to_hit: 60,
        attack_frame: 5,
        min_damage: 5,
        max_damage: 15,
        armor_class: 45,
        exp: 1063,
        resistances: R::IMMUNE_MAGIC,
        resistances_hell: R::IMMUNE_MAGIC.union(R::RESIST_FIRE),
        anims: SNAKE_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Fire Drake",
        class: Demon,
        ai: A::Snake,
        intelligence: 2,
        level: 13,
        min_dlvl: 10,
        max_dlvl: 13,
        min_hp: 60,
        max_hp: 85,
        to_hit: 65,
        attack_frame: 5,
        min_damage: 1,
        max_damage: 30,
        armor_class: 55,
        exp: 1517,
        resistances: R::RESIST_MAGIC.union(R::IMMUNE_FIRE),
        resistances_hell: R::IMMUNE_MAGIC.union(R::IMMUNE_FIRE),
        anims: SNAKE_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Gold Viper",
        class: Demon,
        ai: A::Snake,
        intelligence: 2,
        level: 15,
        min_dlvl: 11,
        max_dlvl: 14,
        min_hp: 70,
        max_hp: 100,
        to_hit: 70,
        attack_frame: 5,
        min_damage: 8,
        max_damage: 20,
        armor_class: 65,
        exp: 2107,
        resistances: R::RESIST_MAGIC.union(R::RESIST_LIGHTNING),
        resistances_hell: R::IMMUNE_MAGIC.union(R::RESIST_LIGHTNING),
        anims: SNAKE_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Azure Drake",
        class: Animal,
        ai: A::Snake,
        intelligence: 3,
        level: 17,
        min_dlvl: 13,
        max_dlvl: 16,
        min_hp: 80,
        max_hp: 110,
        to_hit: 75,
        attack_frame: 5,
        min_damage: 12,
        max_damage: 24,
        armor_class: 70,
        exp: 2540,
        resistances: R::RESIST_FIRE.union(R::RESIST_LIGHTNING),
        resistances_hell: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::IMMUNE_LIGHTNING),
        anims: SNAKE_ANIMS,
        ..BASE
    },
    // Knights
    MonsterData {
        name: "Black Knight",
        class: Demon,
        intelligence: 0,
        level: 12,
        min_dlvl: 11,
        max_dlvl: 13,
        min_hp: 120,
        max_hp: 150,
        to_hit: 110,
        attack_frame: 8,
        min_damage: 15,
        max_damage: 20,
        armor_class: 75,
        exp: 1600,
        resistances: R::RESIST_MAGIC.union(R::RESIST_LIGHTNING),
        resistances_hell: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::RESIST_LIGHTNING),
        flags: OPEN.union(MonsterFlags::SEARCH),
        anims: KNIGHT_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Doom Guard",
        class: Demon,
        intelligence: 0,
        level: 13,
        min_dlvl: 12,
        max_dlvl: 14,
        min_hp: 130,
        max_hp: 200,
        to_hit: 130,
        attack_frame: 8,
        min_damage: 18,
        max_damage: 25,
        armor_class: 75,
        exp: 2300,
        resistances: R::RESIST_MAGIC.union(R::RESIST_FIRE),
        resistances_hell: R::IMMUNE_MAGIC.union(R::IMMUNE_FIRE).union(R::RESIST_LIGHTNING),
        flags: OPEN.union(MonsterFlags::SEARCH),
        anims: KNIGHT_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Steel Lord",
        class: Demon,
        intelligence: 1,
        level: 14,
        min_dlvl: 13,
        max_dlvl: 15,
        min_hp: 120,
        max_hp: 180,
        to_hit: 120,
        attack_frame: 8,
        min_damage: 20,
        max_damage: 30,
        armor_class: 80,
        exp: 2720,
        resistances: R::RESIST_MAGIC.union(R::RESIST_FIRE).union(R::RESIST_LIGHTNING),
        resistances_hell: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::IMMUNE_LIGHTNING),
        flags: OPEN.union(MonsterFlags::SEARCH),
        anims: KNIGHT_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Blood Knight",
        class: Demon,
        intelligence: 1,
        level: 15,
        min_dlvl: 13,
        max_dlvl: 16,
        min_hp: 160,
        max_hp: 200,
        to_hit: 130,
        attack_frame: 8,
        min_damage: 25,
        max_damage: 35,
        armor_class: 85,
        exp: 3360,
        resistances: R::RESIST_MAGIC.union(R::IMMUNE_FIRE).union(R::RESIST_LIGHTNING),
        resistances_hell: R::IMMUNE_MAGIC.union(R::IMMUNE_FIRE).union(R::IMMUNE_LIGHTNING),
        flags: OPEN.union(MonsterFlags::SEARCH),
        anims: KNIGHT_ANIMS,
        ..BASE
    },
    // Counselors
    MonsterData {
        name: "Counselor",
        class: Demon,
        ai: A::Counselor,
        intelligence: 0,
        level: 14,
        min_dlvl: 13,
        max_dlvl: 14,
        min_hp: 70,
        max_hp: 70,
        to_hit: 30,
        attack_frame: 8,
        min_damage: 8,
        max_damage: 20,
        armor_class: 0,
        exp: 4070,
        resistances: R::RESIST_MAGIC.union(R::RESIST_FIRE).union(R::RESIST_LIGHTNING),
        resistances_hell: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::RESIST_LIGHTNING),
        flags: OPEN,
        anims: COUNSELOR_FADE,
        ..BASE
    },
    MonsterData {
        name: "Magistrate",
        class: Demon,
        ai: A::Counselor,
        intelligence: 1,
        level: 15,
        min_dlvl: 13,
        max_dlvl: 15,
        min_hp: 85,
        max_hp: 85,
        to_hit: 25,
        attack_frame: 8,
        min_damage: 10,
        max_damage: 24,
        exp: 4478,
        resistances: R::RESIST_MAGIC.union(R::IMMUNE_FIRE).union(R::RESIST_LIGHTNING),
        resistances_hell: R::IMMUNE_MAGIC.union(R::IMMUNE_FIRE).union(R::RESIST_LIGHTNING),
        flags: OPEN,
        anims: COUNSELOR_FADE,
        ..BASE
    },
    MonsterData {
        name: "Cabalist",
        class: Demon,
        ai: A::Counselor,
        intelligence: 2,
        level: 16,
        min_dlvl: 14,
        max_dlvl: 16,
        min_hp: 120,
        max_hp: 120,
        to_hit: 25,
        attack_frame: 8,
        min_damage: 14,
        max_damage: 30,
        exp: 4929,
        resistances: R::RESIST_MAGIC.union(R::RESIST_FIRE).union(R::IMMUNE_LIGHTNING),
        resistances_hell: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::IMMUNE_LIGHTNING),
        flags: OPEN,
        anims: COUNSELOR_FADE,
        ..BASE
    },
    MonsterData {
        name: "Advocate",
        class: Demon,
        ai: A::Counselor,
        intelligence: 3,
        level: 17,
        min_dlvl: 15,
        max_dlvl: 16,
        min_hp: 145,
        max_hp: 145,
        to_hit: 30,
        attack_frame: 8,
        min_damage: 15,
        max_damage: 25,
        exp: 4968,
        resistances: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::IMMUNE_LIGHTNING),
        resistances_hell: R::IMMUNE_MAGIC.union(R::IMMUNE_FIRE).union(R::IMMUNE_LIGHTNING),
        flags: OPEN,
        anims: COUNSELOR_FADE,
        ..BASE
    },
    MonsterData {
        name: "Balrog",
        class: Demon,
        ai: A::Mega,
        intelligence: 1,
        level: 20,
        min_dlvl: 14,
        max_dlvl: 16,
        min_hp: 180,
        max_hp: 200,
        to_hit: 130,
        attack_frame: 8,
        min_damage: 12,
        max_damage: 25,
        to_hit_special: 130,
        special_frame: 8,
        armor_class: 70,
        exp: 2200,
        resistances: R::RESIST_MAGIC.union(R::IMMUNE_FIRE).union(R::RESIST_LIGHTNING),
        resistances_hell: R::IMMUNE_MAGIC.union(R::IMMUNE_FIRE).union(R::RESIST_LIGHTNING),
        flags: MonsterFlags::SEARCH,
        anims: anims([12, 8, 16, 6, 20, 12], [3, 1, 1, 1, 1, 1]),
        ..BASE
    },
    MonsterData {
        name: "Overlord",
        class: Demon,
        ai: A::Overlord,
        level: 8,
        min_dlvl: 6,
        max_dlvl: 10,
        min_hp: 60,
        max_hp: 80,
        to_hit: 55,
        attack_frame: 8,
        min_damage: 6,
        max_damage: 12,
        to_hit_special: 0,
        special_frame: 8,
        min_damage_special: 10,
        max_damage_special: 18,
        armor_class: 55,
        exp: 635,
        resistances_hell: R::RESIST_FIRE,
        anims: OVERLORD_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Mud Man",
        class: Demon,
        ai: A::Overlord,
        intelligence: 1,
        level: 10,
        min_dlvl: 8,
        max_dlvl: 11,
        min_hp: 100,
        max_hp: 125,
        to_hit: 60,
        attack_frame: 8,
        min_damage: 8,
        max_damage: 16,
        to_hit_special: 60,
        special_frame: 8,
        min_damage_special: 14,
        max_damage_special: 22,
        armor_class: 60,
        exp: 1165,
        resistances: R::RESIST_LIGHTNING,
        resistances_hell: R::IMMUNE_MAGIC.union(R::RESIST_LIGHTNING),
        anims: OVERLORD_ANIMS,
        ..BASE
    },
    MonsterData {
        name: "Diablo",
        class: Demon,
        ai: A::Diablo,
        intelligence: 3,
        level: 45,
        min_dlvl: 16,
        max_dlvl: 16,
        min_hp: 3333,
        max_hp: 3333,
        to_hit: 220,
        attack_frame: 4,
        min_damage: 30,
        max_damage: 60,
        to_hit_special: 0,
        special_frame: 11,
        armor_class: 90,
        exp: 31666,
        resistances: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::RESIST_LIGHTNING),
        resistances_hell: R::IMMUNE_MAGIC.union(R::IMMUNE_FIRE).union(R::IMMUNE_LIGHTNING),
        flags: OPEN.union(MonsterFlags::KNOCKBACK).union(MonsterFlags::SEARCH),
        anims: anims([16, 6, 16, 6, 16, 16], [2, 1, 1, 1, 2, 1]),
        random_spawn: false,
        ..BASE
    },
    // Expansion
    MonsterData {
        name: "Gravedigger",
        ai: A::Scavenger,
        intelligence: 3,
        level: 12,
        min_dlvl: 2,
        max_dlvl: 4,
        min_hp: 120,
        max_hp: 240,
        to_hit: 70,
        min_damage: 6,
        max_damage: 12,
        armor_class: 20,
        exp: 1964,
        resistances: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::RESIST_LIGHTNING),
        resistances_hell: R::IMMUNE_MAGIC.union(R::IMMUNE_FIRE).union(R::IMMUNE_LIGHTNING),
        flags: OPEN,
        anims: SCAVENGER_ANIMS,
        hellfire_only: true,
        ..BASE
    },
    MonsterData {
        name: "Hellbat",
        class: Demon,
        ai: A::FireBat,
        intelligence: 2,
        level: 21,
        min_dlvl: 17,
        max_dlvl: 20,
        min_hp: 160,
        max_hp: 180,
        to_hit: 100,
        attack_frame: 5,
        min_damage: 18,
        max_damage: 22,
        armor_class: 60,
        exp: 3791,
        resistances: R::RESIST_MAGIC.union(R::IMMUNE_FIRE),
        resistances_hell: R::IMMUNE_MAGIC.union(R::IMMUNE_FIRE).union(R::RESIST_LIGHTNING),
        anims: BAT_ANIMS,
        hellfire_only: true,
        ..BASE
    },
    MonsterData {
        name: "Torchant",
        class: Demon,
        ai: A::Torchant,
        intelligence: 2,
        level: 22,
        min_dlvl: 18,
        max_dlvl: 21,
        min_hp: 120,
        max_hp: 150,
        to_hit: 100,
        attack_frame: 8,
        min_damage: 30,
        max_damage: 40,
        armor_class: 70,
        exp: 4000,
        resistances: R::IMMUNE_MAGIC.union(R::IMMUNE_FIRE),
        resistances_hell: R::IMMUNE_MAGIC.union(R::IMMUNE_FIRE).union(R::RESIST_LIGHTNING),
        anims: HF_RANGED_ANIMS,
        hellfire_only: true,
        ..BASE
    },
    MonsterData {
        name: "Hork Spawn",
        class: Demon,
        ai: A::Skeleton,
        intelligence: 0,
        level: 18,
        min_dlvl: 17,
        max_dlvl: 20,
        min_hp: 30,
        max_hp: 30,
        to_hit: 70,
        attack_frame: 7,
        min_damage: 10,
        max_damage: 14,
        armor_class: 60,
        exp: 1000,
        resistances: R::RESIST_MAGIC.union(R::RESIST_FIRE).union(R::IMMUNE_LIGHTNING),
        resistances_hell: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::IMMUNE_LIGHTNING),
        anims: anims([15, 8, 14, 6, 16, 0], [3, 1, 1, 1, 1, 0]),
        random_spawn: false,
        hellfire_only: true,
        ..BASE
    },
    MonsterData {
        name: "Hork Demon",
        class: Demon,
        ai: A::HorkDemon,
        intelligence: 3,
        level: 21,
        min_dlvl: 17,
        max_dlvl: 20,
        min_hp: 300,
        max_hp: 320,
        to_hit: 110,
        attack_frame: 7,
        min_damage: 30,
        max_damage: 35,
        special_frame: 8,
        armor_class: 80,
        exp: 7000,
        resistances: R::RESIST_MAGIC.union(R::RESIST_LIGHTNING).union(R::IMMUNE_ACID),
        resistances_hell: R::IMMUNE_MAGIC.union(R::RESIST_LIGHTNING).union(R::IMMUNE_ACID),
        anims: anims([12, 8, 14, 6, 17, 14], [3, 1, 1, 1, 1, 1]),
        hellfire_only: true,
        ..BASE
    },
    MonsterData {
        name: "Lich",
        ai: A::Lich,
        intelligence: 3,
        level: 22,
        min_dlvl: 19,
        max_dlvl: 22,
        min_hp: 300,
        max_hp: 325,
        to_hit: 120,
        attack_frame: 10,
        min_damage: 30,
        max_damage: 40,
        armor_class: 75,
        exp: 4500,
        resistances: R::RESIST_MAGIC.union(R::RESIST_FIRE).union(R::IMMUNE_ACID),
        resistances_hell: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::IMMUNE_ACID),
        flags: OPEN,
        anims: HF_RANGED_ANIMS,
        hellfire_only: true,
        ..BASE
    },
    MonsterData {
        name: "Arch Lich",
        ai: A::ArchLich,
        intelligence: 3,
        level: 23,
        min_dlvl: 20,
        max_dlvl: 23,
        min_hp: 300,
        max_hp: 325,
        to_hit: 120,
        attack_frame: 10,
        min_damage: 30,
        max_damage: 40,
        armor_class: 80,
        exp: 5000,
        resistances: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::RESIST_LIGHTNING),
        resistances_hell: R::IMMUNE_MAGIC.union(R::IMMUNE_FIRE).union(R::RESIST_LIGHTNING),
        flags: OPEN,
        anims: HF_RANGED_ANIMS,
        hellfire_only: true,
        ..BASE
    },
    MonsterData {
        name: "Psychorb",
        class: Animal,
        ai: A::Psychorb,
        intelligence: 3,
        level: 21,
        min_dlvl: 17,
        max_dlvl: 20,
        min_hp: 200,
        max_hp: 200,
        to_hit: 80,
        attack_frame: 9,
        min_damage: 20,
        max_damage: 24,
        armor_class: 75,
        exp: 3500,
        resistances: R::RESIST_MAGIC.union(R::RESIST_FIRE).union(R::RESIST_LIGHTNING),
        resistances_hell: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::RESIST_LIGHTNING),
        anims: HF_RANGED_ANIMS,
        hellfire_only: true,
        ..BASE
    },
    MonsterData {
        name: "Necromorb",
        class: Animal,
        ai: A::Necromorb,
        intelligence: 3,
        level: 22,
        min_dlvl: 18,
        max_dlvl: 21,
        min_hp: 220,
        max_hp: 220,
        to_hit: 80,
        attack_frame: 9,
        min_damage: 22,
        max_damage: 25,
        armor_class: 80,
        exp: 4000,
        resistances: R::RESIST_MAGIC.union(R::IMMUNE_FIRE).union(R::RESIST_LIGHTNING),
        resistances_hell: R::IMMUNE_MAGIC.union(R::IMMUNE_FIRE).union(R::RESIST_LIGHTNING),
        anims: HF_RANGED_ANIMS,
        hellfire_only: true,
        ..BASE
    },
    MonsterData {
        name: "Bone Demon",
        class: Undead,
        ai: A::BoneDemon,
        intelligence: 3,
        level: 24,
        min_dlvl: 21,
        max_dlvl: 24,
        min_hp: 500,
        max_hp: 500,
        to_hit: 150,
        attack_frame: 8,
        min_damage: 40,
        max_damage: 50,
        special_frame: 12,
        armor_class: 90,
        exp: 10000,
        resistances: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::RESIST_LIGHTNING),
        resistances_hell: R::IMMUNE_MAGIC.union(R::IMMUNE_FIRE).union(R::IMMUNE_LIGHTNING),
        flags: MonsterFlags::SEARCH,
        anims: anims([12, 8, 16, 6, 16, 16], [3, 1, 1, 1, 1, 1]),
        random_spawn: false,
        hellfire_only: true,
        ..BASE
    },
];

/// Pack behaviour of a unique's minions
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum UniqueMonsterPack {
    #[default]
    None,
    /// Minions roam freely
    Independent,
    /// Minions stay leashed to the unique
    Leashed,
}

/// Named unique monsters
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumCount,
)]
pub enum UniqueMonster {
    Gharbad,
    SkeletonKing,
    Zhar,
    Snotspil,
    Lazarus,
    RedVex,
    BlackJade,
    Lachdanan,
    Warlord,
    Butcher,
    Bonehead,
    Gutshank,
    Shadowcrow,
}

/// Unique template; overrides the species stats it names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniqueData {
    pub name: &'static str,
    pub species: Species,
    /// Dungeon level it haunts; the monster level is twice this. Zero for
    /// quest-placed uniques, which get the species level + 5
    pub level: i32,
    /// Whole hit points
    pub max_hp: i32,
    pub ai: AiKind,
    pub intelligence: i32,
    pub min_damage: i32,
    pub max_damage: i32,
    pub resistances: Resistances,
    pub pack: UniqueMonsterPack,
    /// Zero keeps the species value
    pub custom_to_hit: i32,
    pub custom_armor_class: i32,
    pub talk: Option<Speech>,
    /// Quest completed by killing this unique
    pub quest: Option<QuestId>,
}

impl UniqueMonster {
    pub fn data(self) -> &'static UniqueData {
        &UNIQUE_DATA[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.data().name
    }
}

const UNIQUE_BASE: UniqueData = UniqueData {
    name: "",
    species: Species::Zombie,
    level: 0,
    max_hp: 1,
    ai: AiKind::Skeleton,
    intelligence: 0,
    min_damage: 1,
    max_damage: 1,
    resistances: Resistances::empty(),
    pack: UniqueMonsterPack::None,
    custom_to_hit: 0,
    custom_armor_class: 0,
    talk: None,
    quest: None,
};

static UNIQUE_DATA: [UniqueData; UniqueMonster::COUNT] = [
    UniqueData {
        name: "Gharbad the Weak",
        species: Species::FleshClan,
        level: 4,
        max_hp: 120,
        ai: A::Gharbad,
        intelligence: 3,
        min_damage: 8,
        max_damage: 16,
        resistances: R::RESIST_LIGHTNING,
        talk: Some(Speech::Garbud1),
        quest: Some(QuestId::Garbud),
        ..UNIQUE_BASE
    },
    UniqueData {
        name: "Skeleton King",
        species: Species::SkeletonKing,
        max_hp: 240,
        ai: A::SkeletonKing,
        intelligence: 3,
        min_damage: 6,
        max_damage: 16,
        resistances: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::RESIST_LIGHTNING),
        pack: UniqueMonsterPack::Independent,
        quest: Some(QuestId::SkeletonKing),
        ..UNIQUE_BASE
    },
    UniqueData {
        name: "Zhar the Mad",
        species: Species::Counselor,
        level: 8,
        max_hp: 360,
        ai: A::Zhar,
        intelligence: 3,
        min_damage: 16,
        max_damage: 40,
        resistances: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::RESIST_LIGHTNING),
        talk: Some(Speech::Zhar1),
        quest: Some(QuestId::Zhar),
        ..UNIQUE_BASE
    },
    UniqueData {
        name: "Snotspill",
        species: Species::Carver,
        level: 4,
        max_hp: 220,
        ai: A::Snotspil,
        intelligence: 3,
        min_damage: 10,
        max_damage: 18,
        resistances: R::RESIST_LIGHTNING,
        talk: Some(Speech::Banner10),
        ..UNIQUE_BASE
    },
    UniqueData {
        name: "Arch-Bishop Lazarus",
        species: Species::Advocate,
        max_hp: 600,
        ai: A::Lazarus,
        intelligence: 3,
        min_damage: 30,
        max_damage: 50,
        resistances: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::RESIST_LIGHTNING),
        talk: Some(Speech::Vile13),
        quest: Some(QuestId::Betrayer),
        ..UNIQUE_BASE
    },
    UniqueData {
        name: "Red Vex",
        species: Species::HellSpawn,
        max_hp: 400,
        ai: A::LazarusMinion,
        intelligence: 3,
        min_damage: 30,
        max_damage: 50,
        resistances: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::RESIST_LIGHTNING),
        talk: Some(Speech::Vile13),
        ..UNIQUE_BASE
    },
    UniqueData {
        name: "Black Jade",
        species: Species::HellSpawn,
        max_hp: 400,
        ai: A::LazarusMinion,
        intelligence: 3,
        min_damage: 30,
        max_damage: 50,
        resistances: R::IMMUNE_MAGIC.union(R::RESIST_FIRE).union(R::RESIST_LIGHTNING),
        talk: Some(Speech::Vile13),
        ..UNIQUE_BASE
    },
    UniqueData {
        name: "Lachdanan",
        species: Species::BlackKnight,
        level: 14,
        max_hp: 500,
        ai: A::Lachdanan,
        intelligence: 3,
        min_damage: 0,
        max_damage: 0,
        talk: Some(Speech::Veil9),
        quest: Some(QuestId::Veil),
        ..UNIQUE_BASE
    },
    UniqueData {
        name: "Warlord of Blood",
        species: Species::BloodKnight,
        level: 13,
        max_hp: 850,
        ai: A::Warlord,
        intelligence: 3,
        min_damage: 35,
        max_damage: 50,
        resistances: R::IMMUNE_MAGIC.union(R::IMMUNE_FIRE).union(R::IMMUNE_LIGHTNING),
        talk: Some(Speech::Warlord9),
        quest: Some(QuestId::Warlord),
        ..UNIQUE_BASE
    },
    UniqueData {
        name: "The Butcher",
        species: Species::Butcher,
        max_hp: 220,
        ai: A::Butcher,
        intelligence: 3,
        min_damage: 6,
        max_damage: 12,
        resistances: R::RESIST_FIRE.union(R::RESIST_LIGHTNING),
        quest: Some(QuestId::Butcher),
        ..UNIQUE_BASE
    },
    UniqueData {
        name: "Bonehead Keenaxe",
        species: Species::CorpseAxe,
        level: 2,
        max_hp: 91,
        ai: A::Skeleton,
        intelligence: 2,
        min_damage: 4,
        max_damage: 10,
        resistances: R::IMMUNE_MAGIC,
        pack: UniqueMonsterPack::Leashed,
        custom_to_hit: 100,
        custom_armor_class: 50,
        ..UNIQUE_BASE
    },
    UniqueData {
        name: "Gutshank the Quick",
        species: Species::Carver,
        level: 3,
        max_hp: 66,
        ai: A::Fallen,
        intelligence: 2,
        min_damage: 6,
        max_damage: 16,
        resistances: R::RESIST_FIRE,
        pack: UniqueMonsterPack::Independent,
        ..UNIQUE_BASE
    },
    UniqueData {
        name: "Shadowcrow",
        species: Species::Sneak,
        level: 5,
        max_hp: 270,
        ai: A::Sneak,
        intelligence: 2,
        min_damage: 12,
        max_damage: 25,
        pack: UniqueMonsterPack::None,
        ..UNIQUE_BASE
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lengths_match_enums() {
        assert_eq!(MONSTER_DATA.len(), Species::COUNT);
        assert_eq!(UNIQUE_DATA.len(), UniqueMonster::COUNT);
    }

    #[test]
    fn test_species_lookup() {
        assert_eq!(Species::Zombie.name(), "Zombie");
        assert_eq!(Species::Diablo.name(), "Diablo");
        assert_eq!(Species::BoneDemon.name(), "Bone Demon");
        assert_eq!(Species::Gargoyle.data().ai, AiKind::Gargoyle);
        assert_eq!(Species::Golem.data().ai, AiKind::Golem);
    }

    #[test]
    fn test_hp_ranges_are_ordered() {
        for s in Species::iter() {
            let d = s.data();
            assert!(d.min_hp <= d.max_hp, "{s}");
            assert!(d.min_damage <= d.max_damage, "{s}");
            assert!(d.min_dlvl <= d.max_dlvl, "{s}");
        }
    }

    #[test]
    fn test_skeleton_family() {
        assert!(Species::Skeleton.is_skeleton());
        assert!(Species::HorrorArcher.is_skeleton());
        assert!(!Species::SkeletonKing.is_skeleton());
        assert_eq!(Species::iter().filter(|s| s.is_skeleton()).count(), 12);
    }

    #[test]
    fn test_for_level_filters() {
        let lvl1: Vec<_> = Species::for_level(1, false).collect();
        assert!(lvl1.contains(&Species::Zombie));
        assert!(!lvl1.contains(&Species::Butcher));
        assert!(!lvl1.contains(&Species::Golem));
        assert!(!Species::for_level(3, false).any(|s| s == Species::Gravedigger));
        assert!(Species::for_level(3, true).any(|s| s == Species::Gravedigger));
    }

    #[test]
    fn test_uniques_point_at_sensible_species() {
        assert_eq!(UniqueMonster::Lazarus.data().species, Species::Advocate);
        assert_eq!(UniqueMonster::Bonehead.data().pack, UniqueMonsterPack::Leashed);
        assert_eq!(UniqueMonster::Zhar.data().talk, Some(Speech::Zhar1));
        assert_eq!(UniqueMonster::Butcher.data().quest, Some(QuestId::Butcher));
    }
}
