//! Monsters: templates, live instances and everything that drives them

pub mod ai;
mod data;
mod group;
mod history;
mod mode;
mod monst;
mod movement;
mod registry;
mod spawn;
mod targeting;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

pub use ai::{AiKind, talk_to_monster};
pub use data::{
    AnimData, MonsterClass, MonsterData, MonsterGraphic, Resistances, Species, UniqueData,
    UniqueMonster, UniqueMonsterPack,
};
pub use group::{fallen_fear, follow_the_leader, group_unity, update_leader};
pub use history::{KillCounts, monster_history, unique_history};
pub use mode::{
    ai_delay, check_stand_animation, new_monster_anim, petrify, process_animation, start_attack,
    start_eating, start_fade_in, start_fade_out, start_got_hit, start_heal,
    start_ranged_attack, start_ranged_special_attack, start_special_attack, start_special_stand,
    start_stand, step_mode,
};
pub use monst::{
    AnimState, Enemy, Goal, LeaderRelation, Mode, ModeKind, Monster, MonsterId, Serpentine,
};
pub use movement::{
    check_doors, dir_ok, dumb_walk, is_relative_move_ok, is_tile_safe, plan_path, plan_walk,
    random_walk, random_walk2, round_walk, walk,
};
pub(crate) use movement::is_tile_available_for;
pub use registry::{LevelMonsterType, MonsterRegistry, Placement};
pub use spawn::{
    activate_spawn, add_doppelganger, add_monster, add_skeleton, can_place_monster,
    choose_level_types, init_golems, init_monster, place_group, place_quest_monsters,
    place_unique, place_unique_monsters, populate_level, pre_spawn_skeleton, prepare_unique,
    spawn_golem, spawn_skeleton, spawn_skeleton_near,
};
pub use targeting::{refresh_enemy, update_enemy};

bitflags! {
    /// Per-instance behaviour switches
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct MonsterFlags: u16 {
        /// Invisible until it fades in
        const HIDDEN = 0x0001;
        /// Play the current animation backwards
        const LOCK_ANIMATION = 0x0002;
        /// Hold the current frame
        const ALLOW_SPECIAL = 0x0004;
        /// No passive regeneration
        const NO_HEAL = 0x0008;
        const GOLEM = 0x0010;
        /// A scripted drop or quest step already happened
        const QUEST_COMPLETE = 0x0020;
        /// Melee hits push the player back a tile
        const KNOCKBACK = 0x0040;
        /// Plans real paths around obstacles
        const SEARCH = 0x0080;
        const CAN_OPEN_DOOR = 0x0100;
        /// Attacks anything, other monsters included
        const BERSERK = 0x0200;
        const NO_LIFESTEAL = 0x0400;
    }
}
