//! Monster AI
//!
//! Every tick each monster runs the routine named by its [`AiKind`]. A
//! routine only decides: it looks at the enemy snapshot, rolls the shared
//! game RNG and puts the monster into a mode (walk, attack, shoot, charge,
//! delay). The mode machine in `mode.rs` plays the action out.
//!
//! Most routines bail out unless the monster is standing and has noticed
//! something (`squelch != 0`).

mod charge;
mod golem;
mod melee;
mod ranged;
mod talker;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter};
use tracing::trace;

use super::{Goal, ModeKind, Monster, MonsterId, round_walk};
use crate::SQUELCH_MAX;
use crate::combat::MissileKind;
use crate::dungeon::Direction;
use crate::sim::Simulation;

pub use talker::{step_talk, talk_to_monster};

/// Behaviour archetype selecting the per-tick decision routine
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumCount,
)]
pub enum AiKind {
    #[default]
    Zombie,
    /// Slow heavy hitters with a second, stronger swing
    Overlord,
    Skeleton,
    SkeletonBow,
    /// Carrion eaters that feed on corpses to heal
    Scavenger,
    /// Charges from a distance
    Rhino,
    /// Circles its enemy, hits hard when cornered
    GoatMace,
    GoatBow,
    /// Cowardly packs that rally and flee together
    Fallen,
    Magma,
    SkeletonKing,
    Bat,
    Gargoyle,
    Butcher,
    Succubus,
    /// Fades in and out of the shadows
    Sneak,
    Storm,
    FireBat,
    Gharbad,
    Acid,
    AcidUnique,
    Golem,
    Zhar,
    Snotspil,
    Snake,
    Counselor,
    Mega,
    Diablo,
    Lazarus,
    LazarusMinion,
    Lachdanan,
    Warlord,
    Torchant,
    HorkDemon,
    Lich,
    ArchLich,
    Psychorb,
    Necromorb,
    BoneDemon,
}

/// Run one tick of `id`'s AI routine
pub fn run_ai(sim: &mut Simulation, id: MonsterId) {
    let ai = sim.monsters[id].ai;
    trace!(%id, %ai, "ai");
    match ai {
        AiKind::Zombie => melee::zombie(sim, id),
        AiKind::Overlord => melee::overlord(sim, id),
        AiKind::Skeleton => melee::skeleton(sim, id),
        AiKind::SkeletonBow => melee::skeleton_bow(sim, id),
        AiKind::Scavenger => melee::scavenger(sim, id),
        AiKind::Rhino => charge::rhino(sim, id),
        AiKind::GoatMace => melee::avoidance(sim, id),
        AiKind::GoatBow => ranged::ranged(sim, id),
        AiKind::Fallen => melee::fallen(sim, id),
        AiKind::SkeletonKing => melee::leoric(sim, id),
        AiKind::Bat => charge::bat(sim, id),
        AiKind::Gargoyle => melee::gargoyle(sim, id),
        AiKind::Butcher => melee::butcher(sim, id),
        AiKind::Sneak => melee::sneak(sim, id),
        AiKind::Gharbad => talker::gharbad(sim, id),
        AiKind::Golem => golem::golem(sim, id),
        AiKind::Zhar => talker::zhar(sim, id),
        AiKind::Snotspil => talker::snotspil(sim, id),
        AiKind::Snake => charge::snake(sim, id),
        AiKind::Counselor => ranged::counselor(sim, id),
        AiKind::Mega => ranged::mega(sim, id),
        AiKind::Lazarus => talker::lazarus(sim, id),
        AiKind::LazarusMinion => talker::lazarus_minion(sim, id),
        AiKind::Lachdanan => talker::lachdanan(sim, id),
        AiKind::Warlord => talker::warlord(sim, id),
        AiKind::HorkDemon => ranged::hork_demon(sim, id),
        AiKind::Magma | AiKind::Storm | AiKind::Acid | AiKind::Diablo | AiKind::BoneDemon => {
            ranged::ranged_avoidance(sim, id)
        }
        AiKind::Succubus
        | AiKind::AcidUnique
        | AiKind::FireBat
        | AiKind::Torchant
        | AiKind::Lich
        | AiKind::ArchLich
        | AiKind::Psychorb
        | AiKind::Necromorb => ranged::ranged(sim, id),
    }
}

/// Shooters that will pick a golem as a target from afar
pub fn is_ranged(ai: AiKind) -> bool {
    matches!(
        ai,
        AiKind::SkeletonBow | AiKind::GoatBow | AiKind::Succubus | AiKind::LazarusMinion
    )
}

/// Missile a ranged archetype fires
pub fn missile_for(ai: AiKind) -> MissileKind {
    match ai {
        AiKind::Succubus | AiKind::LazarusMinion => MissileKind::Flare,
        AiKind::Acid | AiKind::AcidUnique => MissileKind::Acid,
        AiKind::FireBat => MissileKind::Firebolt,
        AiKind::Torchant => MissileKind::Fireball,
        AiKind::Lich => MissileKind::Lich,
        AiKind::ArchLich => MissileKind::ArchLich,
        AiKind::Psychorb => MissileKind::Psychorb,
        AiKind::Necromorb => MissileKind::Necromorb,
        AiKind::Magma => MissileKind::MagmaBall,
        AiKind::Storm => MissileKind::LightningControl2,
        AiKind::Diablo => MissileKind::Apocalypse,
        AiKind::BoneDemon => MissileKind::BoneDemon,
        _ => MissileKind::Arrow,
    }
}

fn is_standing(m: &Monster) -> bool {
    m.mode.kind() == ModeKind::Stand
}

/// Standing and has noticed something
fn is_active(m: &Monster) -> bool {
    is_standing(m) && m.squelch != 0
}

fn is_aware(m: &Monster) -> bool {
    m.squelch == SQUELCH_MAX
}

/// Axis offsets from the enemy snapshot to the monster
fn enemy_offset(m: &Monster) -> (i32, i32) {
    let d = m.tile - m.enemy_position;
    (d.dx.abs(), d.dy.abs())
}

/// Chessboard distance to the enemy snapshot
fn enemy_distance(m: &Monster) -> i32 {
    let (dx, dy) = enemy_offset(m);
    dx.max(dy)
}

fn previous_mode(m: &Monster) -> Option<ModeKind> {
    m.stand_state().map(|(previous, _)| previous)
}

/// Stood around for a while since the last action
fn is_restless(m: &Monster) -> bool {
    m.stand_state().is_some_and(|(_, idle)| idle > 20)
}

/// Arrived from a walk on this very tick
fn just_walked(m: &Monster) -> bool {
    matches!(
        m.stand_state(),
        Some((
            ModeKind::WalkNorth | ModeKind::WalkSouth | ModeKind::WalkSideways,
            0
        ))
    )
}

/// Facing towards the last place the enemy was noticed
fn toward_last(m: &Monster) -> Direction {
    m.tile.direction_to(m.last)
}

fn shares_room_with_enemy(sim: &Simulation, m: &Monster) -> bool {
    sim.level.room(m.tile) == sim.level.room(m.enemy_position)
}

/// Switch to the circling goal, picking a side on entry
fn start_circling(sim: &mut Simulation, id: MonsterId) {
    if !matches!(sim.monsters[id].goal, Goal::Move { .. }) {
        let turn_left = sim.rng.generate(2) != 0;
        sim.monsters[id].goal = Goal::Move {
            steps: 0,
            turn_left,
        };
    }
}

/// Count a circling step, returning the count before it
fn next_circle_step(m: &mut Monster) -> i32 {
    match &mut m.goal {
        Goal::Move { steps, .. } => {
            let taken = *steps;
            *steps += 1;
            taken
        }
        _ => 0,
    }
}

/// One step around the enemy on the circling side
fn circle(sim: &mut Simulation, id: MonsterId, dir: Direction) -> bool {
    let Goal::Move { turn_left, .. } = sim.monsters[id].goal else {
        return false;
    };
    let mut side = turn_left;
    let walked = round_walk(sim, id, dir, &mut side);
    if let Goal::Move { turn_left, .. } = &mut sim.monsters[id].goal {
        *turn_left = side;
    }
    walked
}
