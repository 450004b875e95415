//! Stepping from tile to tile
//!
//! Every move goes through [`dir_ok`], which checks the destination tile,
//! the wall corners a diagonal-ish step would clip, hazards the monster is
//! afraid of, and the pack leash.

use tracing::trace;

use super::mode::new_monster_anim;
use super::{Goal, LeaderRelation, Mode, Monster, MonsterFlags, MonsterGraphic, MonsterId};
use super::{Species, UniqueMonsterPack};
use crate::dungeon::{Direction, HazardFlags, Level, MonsterCell, Point};
use crate::path::{find_path, line_clear};
use crate::sim::Simulation;
use crate::world::SimEvent;

/// Blocked line checks before a searching monster plans a real path
pub(crate) const PATH_COUNT_PLAN: i32 = 5;
/// Path count at which planning gives up and line checks resume
pub(crate) const PATH_COUNT_RESET: i32 = 8;

/// The tile holds no fire or lightning wall this monster would walk into
pub fn is_tile_safe(level: &Level, m: &Monster, p: Point) -> bool {
    let hazards = level.hazards(p);
    if hazards.is_empty() {
        return true;
    }
    let diablo = m.species == Species::Diablo;
    let fears_fire = diablo || !m.resistances.contains(super::Resistances::IMMUNE_FIRE);
    let fears_lightning =
        diablo || !m.resistances.contains(super::Resistances::IMMUNE_LIGHTNING);
    !((fears_fire && hazards.contains(HazardFlags::FIRE_WALL))
        || (fears_lightning && hazards.contains(HazardFlags::LIGHTNING_WALL)))
}

/// Free, walkable and safe for `m`
pub(crate) fn is_tile_available_for(level: &Level, m: &Monster, p: Point) -> bool {
    level.is_tile_available(p) && is_tile_safe(level, m, p)
}

/// Like [`is_tile_available_for`], but closed doors count as open for
/// monsters that can open them
fn is_tile_accessible(level: &Level, m: &Monster, p: Point) -> bool {
    if level.player_at(p).is_some() || !level.monster_cell(p).is_empty() {
        return false;
    }
    level.is_tile_walkable(p, m.flags.contains(MonsterFlags::CAN_OPEN_DOOR))
        && is_tile_safe(level, m, p)
}

/// `m` could step from `from` towards `dir` without clipping a wall corner
pub fn is_relative_move_ok(level: &Level, m: &Monster, from: Point, dir: Direction) -> bool {
    let to = from + dir;
    if !to.in_bounds() || !is_tile_available_for(level, m, to) {
        return false;
    }
    let solid = |d: Direction| level.is_solid(from + d);
    match dir {
        Direction::East => !solid(Direction::SouthEast),
        Direction::West => !solid(Direction::SouthWest),
        Direction::North => !solid(Direction::NorthEast) && !solid(Direction::NorthWest),
        Direction::South => !solid(Direction::SouthWest) && !solid(Direction::SouthEast),
        _ => true,
    }
}

/// The move is legal and keeps the pack together
pub fn dir_ok(sim: &Simulation, id: MonsterId, dir: Direction) -> bool {
    let m = &sim.monsters[id];
    if !is_relative_move_ok(&sim.level, m, m.tile, dir) {
        return false;
    }
    let to = m.tile + dir;
    if let LeaderRelation::Leashed(leader) = m.leader {
        return to.walking_distance(sim.monsters[leader].future) < sim.config.leash_radius;
    }
    let leashed_pack = m
        .unique
        .is_some_and(|u| u.data().pack == UniqueMonsterPack::Leashed);
    if !leashed_pack {
        return true;
    }
    // a leashed pack leader may not walk away from any of its minions
    let mut count = 0;
    for y in to.y - 3..=to.y + 3 {
        for x in to.x - 3..=to.x + 3 {
            let p = Point::new(x, y);
            if let MonsterCell::Standing(other) = sim.level.monster_cell(p) {
                if sim.monsters[other].leader == LeaderRelation::Leashed(id) {
                    count += 1;
                }
            }
        }
    }
    count == m.pack_size
}

/// Begin walking one tile towards `dir`
pub fn walk(sim: &mut Simulation, id: MonsterId, dir: Direction) {
    let m = &mut sim.monsters[id];
    let from = m.tile;
    let to = from + dir;
    new_monster_anim(m, MonsterGraphic::Walk, dir);
    m.old = from;
    m.future = to;
    match dir {
        Direction::North | Direction::NorthEast | Direction::NorthWest => {
            sim.level.set_monster(to, MonsterCell::Walking(id));
            m.mode = Mode::WalkNorth { step: dir };
        }
        Direction::South | Direction::SouthEast | Direction::SouthWest => {
            sim.level.set_monster(from, MonsterCell::Walking(id));
            sim.level.set_monster(to, MonsterCell::Standing(id));
            m.tile = to;
            m.mode = Mode::WalkSouth { from };
        }
        Direction::East | Direction::West => {
            sim.level.set_monster(from, MonsterCell::Walking(id));
            sim.level.set_monster(to, MonsterCell::Standing(id));
            m.mode = Mode::WalkSideways { to };
        }
    }
    trace!(%id, ?dir, "walk");
}

/// Walk straight if possible, else try 45° then 90° off course, with a coin
/// flip deciding which side is tried first at each width
pub fn random_walk(sim: &mut Simulation, id: MonsterId, dir: Direction) -> bool {
    let mut chosen = dir_ok(sim, id, dir).then_some(dir);

    let (first, second) = if sim.rng.generate(2) != 0 {
        (dir.left(), dir.right())
    } else {
        (dir.right(), dir.left())
    };
    if chosen.is_none() {
        chosen = [first, second].into_iter().find(|&d| dir_ok(sim, id, d));
    }

    let (first, second) = if sim.rng.generate(2) != 0 {
        (dir.right().right(), dir.left().left())
    } else {
        (dir.left().left(), dir.right().right())
    };
    if chosen.is_none() {
        chosen = [first, second].into_iter().find(|&d| dir_ok(sim, id, d));
    }

    match chosen {
        Some(d) => {
            walk(sim, id, d);
            true
        }
        None => false,
    }
}

/// Straight or 45° either side
pub fn random_walk2(sim: &mut Simulation, id: MonsterId, dir: Direction) -> bool {
    let mut chosen = dir_ok(sim, id, dir).then_some(dir);
    let sides = if sim.rng.generate(2) != 0 {
        [dir.left(), dir.right()]
    } else {
        [dir.right(), dir.left()]
    };
    if chosen.is_none() {
        chosen = sides.into_iter().find(|&d| dir_ok(sim, id, d));
    }
    match chosen {
        Some(d) => {
            walk(sim, id, d);
            true
        }
        None => false,
    }
}

/// Straight ahead or nothing
pub fn dumb_walk(sim: &mut Simulation, id: MonsterId, dir: Direction) -> bool {
    if !dir_ok(sim, id, dir) {
        return false;
    }
    walk(sim, id, dir);
    true
}

/// Circle around the enemy: prefer a 90° turn, then 45°, then straight.
/// When all three are blocked the circling side flips and the monster
/// tries to back off the other way.
pub fn round_walk(sim: &mut Simulation, id: MonsterId, dir: Direction, turn_left: &mut bool) -> bool {
    let turn45 = dir.turn(*turn_left);
    let turn90 = turn45.turn(*turn_left);

    for candidate in [turn90, turn45, dir] {
        if dir_ok(sim, id, candidate) {
            walk(sim, id, candidate);
            return true;
        }
    }

    *turn_left = !*turn_left;
    random_walk(sim, id, turn90.opposite())
}

/// Open any closed door next to the monster
pub fn check_doors(sim: &mut Simulation, id: MonsterId) {
    let tile = sim.monsters[id].tile;
    for dir in Direction::ALL {
        let p = tile + dir;
        if p.in_bounds() && sim.level.is_closed_door(p) && sim.level.open_door(p) {
            sim.emit(SimEvent::DoorOpened { tile: p });
        }
    }
}

/// Take the first step of a real path to the enemy
pub fn plan_walk(sim: &mut Simulation, id: MonsterId) -> bool {
    let m = &sim.monsters[id];
    let level = &sim.level;
    let Some(path) = find_path(
        level,
        |p| is_tile_accessible(level, m, p),
        m.tile,
        m.enemy_position,
    ) else {
        return false;
    };
    let Some(&first) = path.first() else {
        return false;
    };
    random_walk(sim, id, first);
    true
}

/// Searching monsters path around obstacles once straight-line approaches
/// have failed a few times. Returns true when this tick's move is taken.
pub fn plan_path(sim: &mut Simulation, id: MonsterId) -> bool {
    let m = &sim.monsters[id];
    let golem = m.is_golem();
    if !golem {
        if m.squelch == 0
            || m.mode.kind() != super::ModeKind::Stand
            || !matches!(m.goal, Goal::Normal | Goal::Move { .. } | Goal::Attack2 { .. })
            || m.is_parked()
        {
            return false;
        }
    }

    let clear = line_clear(
        |p| is_tile_available_for(&sim.level, m, p),
        m.tile,
        m.enemy_position,
    );
    let path_count = m.path_count;
    if !clear || (PATH_COUNT_PLAN..PATH_COUNT_RESET).contains(&path_count) {
        if sim.monsters[id].flags.contains(MonsterFlags::CAN_OPEN_DOOR) {
            check_doors(sim, id);
        }
        sim.monsters[id].path_count += 1;
        if sim.monsters[id].path_count < PATH_COUNT_PLAN {
            return false;
        }
        if plan_walk(sim, id) {
            return true;
        }
    }

    if !golem {
        sim.monsters[id].path_count = 0;
    }
    false
}
