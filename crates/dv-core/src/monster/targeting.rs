//! Enemy selection and the per-tick enemy snapshot

use tracing::trace;

use super::{Enemy, Monster, MonsterFlags, MonsterId, Species, ai};
use crate::dungeon::Point;
use crate::sim::Simulation;
use crate::world::{GlobalSound, PlayerId, SimEvent};
use crate::HP_SHIFT;

struct Candidate {
    enemy: Enemy,
    target: Point,
    distance: i32,
    same_room: bool,
}

/// Rooms win over distance: a candidate sharing the monster's room beats any
/// that does not, otherwise the nearer one wins.
fn prefer(best: &Option<Candidate>, distance: i32, same_room: bool) -> bool {
    match best {
        None => true,
        Some(b) => {
            (same_room && !b.same_room) || ((same_room || !b.same_room) && distance < b.distance)
        }
    }
}

fn ignores_monster(m: &Monster, other: &Monster, distance: i32) -> bool {
    if other.id == m.id || other.hit_points >> HP_SHIFT <= 0 || other.is_parked() {
        return true;
    }
    if other.is_talker() && other.talk.is_some() {
        return true;
    }
    let self_golem = m.flags.contains(MonsterFlags::GOLEM);
    let self_berserk = m.flags.contains(MonsterFlags::BERSERK);
    let berserk = self_berserk || other.flags.contains(MonsterFlags::BERSERK);
    if self_golem && other.flags.contains(MonsterFlags::GOLEM) && !berserk {
        return true;
    }
    // ordinary monsters only turn on golems, and only from up close unless
    // they shoot
    let ordinary = !self_golem && !self_berserk;
    (ordinary && distance >= 2 && !ai::is_ranged(m.ai))
        || (ordinary && !other.flags.contains(MonsterFlags::GOLEM))
}

/// Pick the best target among players and hostile monsters
pub fn update_enemy(sim: &mut Simulation, id: MonsterId) {
    let m = &sim.monsters[id];
    let position = m.tile;
    let room = sim.level.room(position);
    let mut best: Option<Candidate> = None;

    if m.flags.contains(MonsterFlags::BERSERK) || !m.flags.contains(MonsterFlags::GOLEM) {
        for pid in PlayerId::all() {
            let player = &sim.players[pid.index()];
            if !player.active || (player.hit_points >> HP_SHIFT == 0 && sim.config.multiplayer) {
                continue;
            }
            let same_room = room == sim.level.room(player.tile);
            let distance = position.walking_distance(player.tile);
            if prefer(&best, distance, same_room) {
                best = Some(Candidate {
                    enemy: Enemy::Player(pid),
                    target: player.future,
                    distance,
                    same_room,
                });
            }
        }
    }

    for other in sim.monsters.iter_active() {
        let distance = other.tile.walking_distance(position);
        if ignores_monster(m, other, distance) {
            continue;
        }
        let same_room = room == sim.level.room(other.tile);
        if prefer(&best, distance, same_room) {
            best = Some(Candidate {
                enemy: Enemy::Monster(other.id),
                target: other.future,
                distance,
                same_room,
            });
        }
    }

    let m = &mut sim.monsters[id];
    match best {
        Some(c) => {
            if m.enemy != Some(c.enemy) {
                trace!(%id, enemy = ?c.enemy, "new enemy");
            }
            m.enemy = Some(c.enemy);
            m.enemy_position = c.target;
        }
        None => m.enemy = None,
    }
}

/// Start-of-tick bookkeeping: wake up when seen, then snapshot where the
/// enemy is heading and let alertness decay when out of sight
pub fn refresh_enemy(sim: &mut Simulation, id: MonsterId) {
    let tile = sim.monsters[id].tile;
    let visible = sim.level.is_visible(tile);

    if visible && sim.monsters[id].squelch == 0 {
        if sim.monsters[id].species == Species::Butcher {
            sim.emit(SimEvent::GlobalSound(GlobalSound::ButcherIntro));
        }
        update_enemy(sim, id);
    }

    let enemy = sim.monsters[id].enemy;
    let enemy_future = match enemy {
        Some(Enemy::Monster(other)) => Some(sim.monsters[other].future),
        Some(Enemy::Player(pid)) => Some(sim.players[pid.index()].future),
        None => None,
    };

    let m = &mut sim.monsters[id];
    match (enemy, enemy_future) {
        (Some(Enemy::Monster(_)), Some(future)) => {
            m.last = future;
            m.enemy_position = future;
        }
        (Some(Enemy::Player(_)), Some(future)) => {
            m.enemy_position = future;
            if visible {
                m.squelch = u8::MAX;
                m.last = future;
            } else if m.squelch != 0 && m.species != Species::Diablo {
                m.squelch -= 1;
            }
        }
        _ => {
            if !visible && m.squelch != 0 && m.species != Species::Diablo {
                m.squelch -= 1;
            }
        }
    }
}
