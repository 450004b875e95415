//! Taking damage: the flinch gate, hit recovery, knockback and blink
//! teleports

use tracing::{debug, trace};

use super::{MissileKind, start_death_from_monster, start_kill};
use crate::HP_SHIFT;
use crate::config::SimConfig;
use crate::dungeon::{MonsterCell, Point};
use crate::monster::{
    Enemy, Goal, Mode, Monster, MonsterId, Species, is_relative_move_ok, is_tile_available_for,
    start_got_hit,
};
use crate::sim::Simulation;
use crate::world::{MonsterSound, PlayerId, SimEvent};

/// Who dealt a blow, for flinch facing and kill credit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageSource {
    Player(PlayerId),
    Monster(MonsterId),
    /// Traps, hazards and anything else without an owner
    World,
}

/// A blow strong enough to interrupt the current action
fn flinches(config: &SimConfig, m: &Monster, damage: i32) -> bool {
    config.always_flinches(m.species)
        || damage >> HP_SHIFT >= m.level + config.flinch.level_offset
}

/// Subtract fixed-point damage and report it. True when it was lethal.
pub(super) fn wound(sim: &mut Simulation, id: MonsterId, amount: i32) -> bool {
    let m = &mut sim.monsters[id];
    m.hit_points = (m.hit_points - amount).max(0);
    let hit_points = m.hit_points;
    trace!(%id, amount, hit_points, "monster wounded");
    sim.emit(SimEvent::MonsterDamaged {
        id,
        amount,
        hit_points,
    });
    hit_points >> HP_SHIFT <= 0
}

/// Kill or stagger a monster that was just wounded by `source`
pub(super) fn react_to_wound(
    sim: &mut Simulation,
    id: MonsterId,
    source: DamageSource,
    amount: i32,
    dead: bool,
) {
    match (source, dead) {
        (DamageSource::Player(pid), true) => {
            sim.monsters[id].who_hit |= pid.bit();
            start_kill(sim, id, Some(pid));
        }
        (DamageSource::Player(pid), false) => start_hit_by_player(sim, id, pid, amount),
        (DamageSource::Monster(attacker), true) => start_death_from_monster(sim, attacker, id),
        (DamageSource::Monster(attacker), false) => monster_hit_monster(sim, id, attacker, amount),
        (DamageSource::World, true) => start_kill(sim, id, None),
        (DamageSource::World, false) => start_hit(sim, id, amount),
    }
}

/// Deal `amount` of fixed-point damage, optionally carried by a missile
/// whose element the monster may shrug off. Returns the damage actually
/// taken.
pub fn apply_damage(
    sim: &mut Simulation,
    id: MonsterId,
    source: DamageSource,
    amount: i32,
    missile: Option<MissileKind>,
) -> i32 {
    let hellfire = sim.config.hellfire;
    let m = &mut sim.monsters[id];
    if amount <= 0 || !m.is_possible_to_hit() || m.try_lift_gargoyle() {
        return 0;
    }
    let amount = match missile {
        Some(kind) if m.is_immune(kind) => 0,
        Some(kind) if m.is_resistant(kind, hellfire) => amount >> 2,
        _ => amount,
    };
    if amount <= 0 {
        return 0;
    }
    let dead = wound(sim, id, amount);
    react_to_wound(sim, id, source, amount, dead);
    amount
}

/// Play the pain sound and, for a hard enough blow, interrupt the monster
pub fn start_hit(sim: &mut Simulation, id: MonsterId, damage: i32) {
    sim.play_effect(id, MonsterSound::GotHit);

    let m = &sim.monsters[id];
    if !flinches(&sim.config, m, damage) {
        return;
    }
    let species = m.species;
    if species == Species::Blink {
        teleport(sim, id);
    } else if species.is_scavenger() {
        sim.monsters[id].goal = Goal::Normal;
    }
    if sim.monsters[id].mode != Mode::Petrified {
        start_got_hit(sim, id);
    }
}

/// A player's blow: remember who hit, and turn on them if it hurt
pub fn start_hit_by_player(sim: &mut Simulation, id: MonsterId, player: PlayerId, damage: i32) {
    let target = sim.players[player.index()].future;
    let hard = flinches(&sim.config, &sim.monsters[id], damage);
    let m = &mut sim.monsters[id];
    m.who_hit |= player.bit();
    if hard {
        m.enemy = Some(Enemy::Player(player));
        m.enemy_position = target;
        m.direction = m.enemy_direction();
    }
    start_hit(sim, id, damage);
}

/// Another monster's blow. A golem's hits count for its owner.
pub fn monster_hit_monster(sim: &mut Simulation, id: MonsterId, attacker: MonsterId, damage: i32) {
    let attacker_dir = sim.monsters[attacker].direction;
    let owner = sim.monsters[attacker]
        .is_golem()
        .then(|| attacker.golem_owner())
        .flatten();
    let hard = flinches(&sim.config, &sim.monsters[id], damage);
    let m = &mut sim.monsters[id];
    if let Some(owner) = owner {
        m.who_hit |= owner.bit();
    }
    if hard {
        m.direction = attacker_dir.opposite();
    }
    start_hit(sim, id, damage);
}

/// Shove the monster one tile back from where it faces
pub fn get_knockback(sim: &mut Simulation, id: MonsterId) {
    let m = &sim.monsters[id];
    let dir = m.direction.opposite();
    if !is_relative_move_ok(&sim.level, m, m.old, dir) {
        return;
    }
    let old = m.old;
    sim.level.clear_monster_squares(id, old);
    sim.monsters[id].old = old + dir;
    start_got_hit(sim, id);
}

/// Blink next to the enemy, on a tile sharing neither row nor column with
/// the current one. False when no tile qualified.
pub fn teleport(sim: &mut Simulation, id: MonsterId) -> bool {
    let m = &sim.monsters[id];
    if m.mode == Mode::Petrified {
        return false;
    }
    let target = m.enemy_position;
    let rx = 2 * sim.rng.generate(2) - 1;
    let ry = 2 * sim.rng.generate(2) - 1;

    let m = &sim.monsters[id];
    let mut landing = None;
    'search: for j in -1..=1 {
        for k in -1..1 {
            if j == 0 && k == 0 {
                continue;
            }
            let p = Point::new(target.x + rx * j, target.y + ry * k);
            if p.in_bounds()
                && p.x != m.tile.x
                && p.y != m.tile.y
                && is_tile_available_for(&sim.level, m, p)
            {
                landing = Some(p);
                break 'search;
            }
        }
    }
    let Some(to) = landing else {
        return false;
    };

    let tile = m.tile;
    sim.level.clear_monster_squares(id, tile);
    sim.level.set_monster(to, MonsterCell::Standing(id));
    let m = &mut sim.monsters[id];
    m.tile = to;
    m.future = to;
    m.old = to;
    m.direction = m.enemy_direction();
    debug!(%id, from = %tile, %to, "teleported");
    sim.emit(SimEvent::Teleported { id, to });
    true
}
