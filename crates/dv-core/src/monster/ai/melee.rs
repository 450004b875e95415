//! Melee archetypes: shamblers, skeletons, packs, ambushers

use tracing::debug;

use super::{
    circle, enemy_distance, enemy_offset, is_active, is_aware, is_restless, is_standing,
    just_walked, next_circle_step, previous_mode, shares_room_with_enemy, start_circling,
    toward_last,
};
use crate::combat::MissileKind;
use crate::dungeon::{Direction, Level, MonsterCell, Point};
use crate::monster::movement::is_tile_available_for;
use crate::monster::{
    AiKind, Enemy, Goal, LeaderRelation, ModeKind, MonsterFlags, MonsterId, Species, ai_delay,
    check_doors, check_stand_animation, dir_ok, dumb_walk, random_walk, spawn_skeleton,
    start_attack, start_eating, start_fade_in, start_fade_out, start_heal, start_ranged_attack,
    start_special_attack, start_special_stand, update_enemy,
};
use crate::path::{is_line_not_solid, line_clear_missile};
use crate::sim::Simulation;
use crate::{LIGHTS_MAX, SQUELCH_MAX};

/// Radius a scavenger searches for something to eat
const CORPSE_SEARCH_RADIUS: i32 = 4;
/// Ticks a scavenger keeps trying to heal
const HEALING_PATIENCE: i32 = 10;

fn rnd(sim: &mut Simulation, n: i32) -> i32 {
    sim.rng.generate(n)
}

fn face_and_idle(sim: &mut Simulation, id: MonsterId, dir: Direction) {
    check_stand_animation(&mut sim.monsters[id], dir);
}

/// Shambles towards visible enemies and hits them when adjacent
pub(super) fn zombie(sim: &mut Simulation, id: MonsterId) {
    let m = &sim.monsters[id];
    if !is_standing(m) || !sim.level.is_visible(m.tile) {
        return;
    }
    let dist = enemy_distance(m);
    let int = m.intelligence;
    let toward = m.enemy_direction();
    let mut dir = m.direction;

    if rnd(sim, 100) < 2 * int + 10 {
        if dist >= 2 {
            if dist >= 2 * int + 4 {
                if rnd(sim, 100) < 2 * int + 20 {
                    dir = Direction::from_index(rnd(sim, 8));
                }
                dumb_walk(sim, id, dir);
            } else {
                random_walk(sim, id, toward);
            }
        } else {
            start_attack(&mut sim.monsters[id]);
        }
    }
    let dir = sim.monsters[id].direction;
    face_and_idle(sim, id, dir);
}

pub(super) fn overlord(sim: &mut Simulation, id: MonsterId) {
    let m = &sim.monsters[id];
    if !is_active(m) {
        return;
    }
    let md = m.enemy_direction();
    let int = m.intelligence;
    let dist = enemy_distance(m);
    let (restless, walked) = (is_restless(m), just_walked(m));
    sim.monsters[id].direction = md;

    let v = rnd(sim, 100);
    if dist >= 2 {
        if (restless && v < 4 * int + 20) || (walked && v < 4 * int + 70) {
            random_walk(sim, id, md);
        }
    } else if v < 4 * int + 15 {
        start_attack(&mut sim.monsters[id]);
    } else if v < 4 * int + 20 {
        start_special_attack(&mut sim.monsters[id]);
    }
    face_and_idle(sim, id, md);
}

/// Walk in on the last known position and trade blows, pausing between
/// actions. Several other archetypes fall back to this.
pub(super) fn skeleton(sim: &mut Simulation, id: MonsterId) {
    let m = &sim.monsters[id];
    if !is_active(m) {
        return;
    }
    let md = toward_last(m);
    let int = m.intelligence;
    let dist = enemy_distance(m);
    let after_delay = previous_mode(m) == Some(ModeKind::Delay);
    sim.monsters[id].direction = md;

    if dist >= 2 {
        if after_delay || rnd(sim, 100) >= 35 - 4 * int {
            random_walk(sim, id, md);
        } else {
            let len = 15 - 2 * int + rnd(sim, 10);
            ai_delay(&mut sim.monsters[id], len);
        }
    } else if after_delay || rnd(sim, 100) < 2 * int + 20 {
        start_attack(&mut sim.monsters[id]);
    } else {
        let len = 2 * (5 - int) + rnd(sim, 10);
        ai_delay(&mut sim.monsters[id], len);
    }
    face_and_idle(sim, id, md);
}

/// Backs off when crowded and looses arrows along clear lines
pub(super) fn skeleton_bow(sim: &mut Simulation, id: MonsterId) {
    let m = &sim.monsters[id];
    if !is_active(m) {
        return;
    }
    let md = m.enemy_direction();
    let int = m.intelligence;
    let dist = enemy_distance(m);
    let (restless, walked) = (is_restless(m), just_walked(m));
    sim.monsters[id].direction = md;

    let v = rnd(sim, 100);
    let mut walking = false;
    if dist < 4 && ((restless && v < 2 * int + 13) || (walked && v < 2 * int + 63)) {
        walking = dumb_walk(sim, id, md.opposite());
    }

    if !walking && rnd(sim, 100) < 2 * int + 3 {
        let m = &sim.monsters[id];
        if line_clear_missile(&sim.level, m.tile, m.enemy_position) {
            start_ranged_attack(&mut sim.monsters[id], Some(MissileKind::Arrow), 4);
        }
    }
    face_and_idle(sim, id, md);
}

/// Nearest corpse on a clear line, scanning outwards from one corner of the
/// search square or the other
fn find_corpse(level: &Level, from: Point, from_top: bool) -> Option<Point> {
    let r = CORPSE_SEARCH_RADIUS;
    let offsets: Vec<i32> = if from_top {
        (-r..=r).collect()
    } else {
        (-r..=r).rev().collect()
    };
    for &dy in &offsets {
        for &dx in &offsets {
            let p = Point::new(from.x + dx, from.y + dy);
            if p.in_bounds() && level.corpse(p).is_some() && is_line_not_solid(level, from, p) {
                return Some(p);
            }
        }
    }
    None
}

/// Below half health, leaves its pack to find a corpse and eat it
pub(super) fn scavenger(sim: &mut Simulation, id: MonsterId) {
    if !is_standing(&sim.monsters[id]) {
        return;
    }
    let hellfire = sim.config.hellfire;

    let m = &mut sim.monsters[id];
    if m.hit_points < m.max_hit_points / 2 && !matches!(m.goal, Goal::Healing { .. }) {
        let relation = m.leader;
        m.leader = LeaderRelation::None;
        m.goal = Goal::Healing {
            remaining: HEALING_PATIENCE,
            corpse: None,
        };
        if let LeaderRelation::Leashed(leader) = relation {
            sim.monsters[leader].pack_size -= 1;
        }
        debug!(%id, "scavenger looks for food");
    }

    let m = &mut sim.monsters[id];
    if let Goal::Healing { remaining, corpse } = m.goal {
        if remaining != 0 {
            let remaining = remaining - 1;
            let tile = m.tile;
            if sim.level.corpse(tile).is_some() {
                start_eating(m);
                if !m.flags.contains(MonsterFlags::NO_HEAL) {
                    if hellfire {
                        m.hit_points = (m.hit_points + m.max_hit_points / 8).min(m.max_hit_points);
                        if remaining <= 0 || m.hit_points == m.max_hit_points {
                            sim.level.remove_corpse(tile);
                        }
                    } else {
                        m.hit_points += crate::HP_UNIT;
                    }
                }
                let full = if hellfire {
                    m.max_hit_points
                } else {
                    m.max_hit_points / 2 + m.max_hit_points / 4
                };
                m.goal = if m.hit_points >= full {
                    Goal::Normal
                } else {
                    Goal::Healing { remaining, corpse }
                };
            } else {
                let corpse = match corpse {
                    Some(p) => Some(p),
                    None => {
                        let from_top = sim.rng.generate(2) != 0;
                        find_corpse(&sim.level, tile, from_top)
                    }
                };
                sim.monsters[id].goal = Goal::Healing { remaining, corpse };
                if let Some(target) = corpse {
                    let dir = tile.direction_to(target);
                    sim.monsters[id].direction = dir;
                    random_walk(sim, id, dir);
                }
            }
        }
    }

    if is_standing(&sim.monsters[id]) {
        skeleton(sim, id);
    }
}

/// Cowardly packs: flee after a death, then rally every fallen nearby into
/// a furious rush
pub(super) fn fallen(sim: &mut Simulation, id: MonsterId) {
    let m = &mut sim.monsters[id];
    if let Goal::Attack2 { remaining } = m.goal {
        m.goal = if remaining != 0 {
            Goal::Attack2 {
                remaining: remaining - 1,
            }
        } else {
            Goal::Normal
        };
    }
    if !is_active(m) {
        return;
    }

    if let Goal::Retreat { steps, direction } = m.goal {
        if steps == 0 {
            m.goal = Goal::Normal;
            crate::monster::start_stand(sim, id, direction.opposite());
        } else {
            m.goal = Goal::Retreat {
                steps: steps - 1,
                direction,
            };
        }
    }

    let m = &mut sim.monsters[id];
    if m.anim.is_last_frame() {
        if rnd(sim, 4) != 0 {
            return;
        }
        let m = &mut sim.monsters[id];
        if !m.flags.contains(MonsterFlags::NO_HEAL) {
            let dir = m.direction;
            start_special_stand(m, dir);
            let boost = 2 * m.intelligence + 2;
            m.hit_points = (m.hit_points + boost).min(m.max_hit_points);
        }
        rally_fallen(sim, id);
    } else {
        match m.goal {
            Goal::Retreat { direction, .. } => {
                m.direction = direction;
                random_walk(sim, id, direction);
            }
            Goal::Attack2 { .. } => {
                if enemy_distance(m) < 2 {
                    start_attack(m);
                } else {
                    let dir = m.enemy_direction();
                    random_walk(sim, id, dir);
                }
            }
            _ => skeleton(sim, id),
        }
    }
}

/// Every standing fallen around `id` joins the rush
fn rally_fallen(sim: &mut Simulation, id: MonsterId) {
    let m = &sim.monsters[id];
    let (tile, int) = (m.tile, m.intelligence);
    let rad = 2 * int + 4;
    let rush = 30 * int + 105;
    for y in -rad..=rad {
        for x in -rad..=rad {
            let p = Point::new(tile.x + x, tile.y + y);
            if !p.in_bounds() {
                continue;
            }
            let MonsterCell::Standing(other) = sim.level.monster_cell(p) else {
                continue;
            };
            let o = &mut sim.monsters[other];
            if o.ai == AiKind::Fallen {
                o.goal = Goal::Attack2 { remaining: rush };
            }
        }
    }
    debug!(%id, radius = rad, "fallen rally");
}

/// Walks straight at the last known position and chops
pub(super) fn butcher(sim: &mut Simulation, id: MonsterId) {
    let m = &sim.monsters[id];
    if !is_active(m) {
        return;
    }
    let md = toward_last(m);
    let dist = enemy_distance(m);
    sim.monsters[id].direction = md;
    if dist >= 2 {
        random_walk(sim, id, md);
    } else {
        start_attack(&mut sim.monsters[id]);
    }
    face_and_idle(sim, id, md);
}

fn retreat_steps(goal: Goal) -> i32 {
    match goal {
        Goal::Retreat { steps, .. } => steps,
        _ => 0,
    }
}

/// Hides in the dark, fades in to strike, fades out and backs off when hurt
pub(super) fn sneak(sim: &mut Simulation, id: MonsterId) {
    let m = &sim.monsters[id];
    if !is_standing(m) || sim.level.light(m.tile) == LIGHTS_MAX {
        return;
    }
    let int = m.intelligence;
    let (mx, my) = enemy_offset(m);
    let range = 5 - int;

    let m = &mut sim.monsters[id];
    if previous_mode(m) == Some(ModeKind::HitRecovery) {
        m.goal = Goal::Retreat {
            steps: 0,
            direction: m.direction,
        };
    } else if mx >= range + 3 || my >= range + 3 || retreat_steps(m.goal) > 8 {
        m.goal = Goal::Normal;
    }

    let retreating = matches!(m.goal, Goal::Retreat { .. });
    let mut md = m.enemy_direction();
    if retreating {
        let enemy = m.enemy;
        let from = match enemy {
            Some(Enemy::Monster(other)) => Some(sim.monsters[other].tile),
            Some(Enemy::Player(pid)) => Some(sim.players[pid.index()].tile),
            None => None,
        };
        if let Some(from) = from {
            let m = &sim.monsters[id];
            md = m.tile.direction_to(from).opposite();
            if m.species == Species::Unseen {
                md = if rnd(sim, 2) != 0 { md.left() } else { md.right() };
            }
        }
    }
    let m = &mut sim.monsters[id];
    m.direction = md;
    let hidden = m.flags.contains(MonsterFlags::HIDDEN);
    let (restless, walked) = (is_restless(m), just_walked(m));

    let v = rnd(sim, 100);
    let far = mx >= 2 || my >= 2;
    if mx < range && my < range && hidden {
        start_fade_in(&mut sim.monsters[id], md, false);
    } else if (mx >= range + 1 || my >= range + 1) && !hidden {
        start_fade_out(&mut sim.monsters[id], md, true);
    } else if retreating
        || (far && ((restless && v < 4 * int + 14) || (walked && v < 4 * int + 64)))
    {
        if let Goal::Retreat { steps, direction } = sim.monsters[id].goal {
            sim.monsters[id].goal = Goal::Retreat {
                steps: steps + 1,
                direction,
            };
        }
        random_walk(sim, id, md);
    }

    let m = &mut sim.monsters[id];
    if is_standing(m) {
        if far || v >= 4 * int + 10 {
            check_stand_animation(m, md);
        } else {
            start_attack(m);
        }
    }
}

/// Perches until something comes close, then fights; flies off to heal
/// when badly hurt
pub(super) fn gargoyle(sim: &mut Simulation, id: MonsterId) {
    let m = &sim.monsters[id];
    let (mx, my) = enemy_offset(m);
    let int = m.intelligence;
    let md = m.enemy_direction();

    if m.squelch != 0 && m.flags.contains(MonsterFlags::ALLOW_SPECIAL) {
        update_enemy(sim, id);
        if mx < int + 2 && my < int + 2 {
            sim.monsters[id].flags.remove(MonsterFlags::ALLOW_SPECIAL);
            debug!(%id, "gargoyle wakes");
        }
        return;
    }
    if !is_active(m) {
        return;
    }

    let m = &mut sim.monsters[id];
    if m.hit_points < m.max_hit_points / 2 && !m.flags.contains(MonsterFlags::NO_HEAL) {
        m.goal = Goal::Retreat {
            steps: 0,
            direction: md.opposite(),
        };
    }
    if matches!(m.goal, Goal::Retreat { .. }) {
        let fled = m.tile - m.last;
        if fled.dx.abs().max(fled.dy.abs()) >= int + 2 {
            m.goal = Goal::Normal;
            start_heal(&mut sim.monsters[id], &mut sim.rng);
        } else if !random_walk(sim, id, md.opposite()) {
            sim.monsters[id].goal = Goal::Normal;
        }
    }
    avoidance(sim, id);
}

/// Circles the enemy at a distance, closing in for the occasional hit. Goat
/// men with maces swing harder when wounded.
pub(super) fn avoidance(sim: &mut Simulation, id: MonsterId) {
    let m = &sim.monsters[id];
    if !is_active(m) {
        return;
    }
    let md = toward_last(m);
    if m.squelch < SQUELCH_MAX {
        check_doors(sim, id);
    }
    let v = rnd(sim, 100);

    let m = &sim.monsters[id];
    let (mx, my) = enemy_offset(m);
    let dist = enemy_distance(m);
    let int = m.intelligence;
    let same_room = shares_room_with_enemy(sim, m);
    let (restless, walked) = (is_restless(m), just_walked(m));

    if (mx >= 2 || my >= 2) && is_aware(m) && same_room {
        let circling = matches!(m.goal, Goal::Move { .. });
        if circling || ((mx >= 4 || my >= 4) && rnd(sim, 4) == 0) {
            start_circling(sim, id);
            let done = next_circle_step(&mut sim.monsters[id]) >= 2 * dist;
            if (done && dir_ok(sim, id, md)) || !same_room {
                sim.monsters[id].goal = Goal::Normal;
            } else if !circle(sim, id, md) {
                let len = rnd(sim, 10) + 10;
                ai_delay(&mut sim.monsters[id], len);
            }
        }
    } else {
        sim.monsters[id].goal = Goal::Normal;
    }

    if sim.monsters[id].goal == Goal::Normal {
        if dist >= 2 {
            if (restless && v < 2 * int + 28) || (walked && v < 2 * int + 78) {
                random_walk(sim, id, md);
            }
        } else if v < 2 * int + 23 {
            let m = &sim.monsters[id];
            let wounded = matches!(m.ai, AiKind::GoatMace | AiKind::Gharbad)
                && m.hit_points < m.max_hit_points / 2;
            sim.monsters[id].direction = md;
            if wounded && rnd(sim, 2) != 0 {
                start_special_attack(&mut sim.monsters[id]);
            } else {
                start_attack(&mut sim.monsters[id]);
            }
        }
    }
    face_and_idle(sim, id, md);
}

/// The Skeleton King circles and raises skeletons in single player games
pub(super) fn leoric(sim: &mut Simulation, id: MonsterId) {
    let m = &sim.monsters[id];
    if !is_active(m) {
        return;
    }
    let md = toward_last(m);
    if m.squelch < SQUELCH_MAX {
        check_doors(sim, id);
    }
    let v = rnd(sim, 100);

    let m = &sim.monsters[id];
    let (mx, my) = enemy_offset(m);
    let dist = enemy_distance(m);
    let int = m.intelligence;
    let same_room = shares_room_with_enemy(sim, m);
    let walked = just_walked(m);

    if dist >= 2 && is_aware(m) && same_room {
        let circling = matches!(m.goal, Goal::Move { .. });
        if circling || ((mx >= 3 || my >= 3) && rnd(sim, 4) == 0) {
            start_circling(sim, id);
            let done = next_circle_step(&mut sim.monsters[id]) >= 2 * dist;
            if (done && dir_ok(sim, id, md)) || !same_room {
                sim.monsters[id].goal = Goal::Normal;
            } else if !circle(sim, id, md) {
                let len = rnd(sim, 10) + 10;
                ai_delay(&mut sim.monsters[id], len);
            }
        }
    } else {
        sim.monsters[id].goal = Goal::Normal;
    }

    if sim.monsters[id].goal == Goal::Normal {
        let m = &sim.monsters[id];
        let wants_raise = !sim.config.multiplayer
            && ((dist >= 3 && v < 4 * int + 35) || v < 6)
            && line_clear_missile(&sim.level, m.tile, m.enemy_position);
        if wants_raise {
            let target = m.tile + md;
            if target.in_bounds()
                && is_tile_available_for(&sim.level, m, target)
                && !sim.monsters.is_full()
            {
                if let Some(raised) = spawn_skeleton(sim, target, md) {
                    debug!(%id, %raised, "skeleton raised");
                }
                start_special_stand(&mut sim.monsters[id], md);
            }
        } else if dist >= 2 {
            let v = rnd(sim, 100);
            if v >= int + 25 && (!walked || v >= int + 75) {
                let len = rnd(sim, 10) + 10;
                ai_delay(&mut sim.monsters[id], len);
            } else {
                random_walk(sim, id, md);
            }
        } else if v < int + 20 {
            sim.monsters[id].direction = md;
            start_attack(&mut sim.monsters[id]);
        }
    }
    face_and_idle(sim, id, md);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Corpse;
    use crate::monster::{Mode, start_stand};
    use crate::testing::{arena, hunt_player, spawn};
    use crate::HP_UNIT;

    fn reset(sim: &mut Simulation, id: MonsterId) {
        let dir = sim.monsters[id].direction;
        start_stand(sim, id, dir);
    }

    #[test]
    fn test_zombie_ignores_hidden_tiles() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::Zombie, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(21, 20));
        sim.level.set_visible(Point::new(20, 20), false);
        for _ in 0..100 {
            zombie(&mut sim, id);
        }
        assert_eq!(sim.monsters[id].mode.kind(), ModeKind::Stand);
    }

    #[test]
    fn test_zombie_hits_adjacent_enemy_eventually() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::Zombie, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(21, 20));
        let mut attacked = false;
        for _ in 0..200 {
            zombie(&mut sim, id);
            if sim.monsters[id].mode == Mode::MeleeAttack {
                attacked = true;
                break;
            }
        }
        assert!(attacked);
    }

    #[test]
    fn test_skeleton_attacks_right_after_delay() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::Skeleton, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(20, 21));
        sim.monsters[id].mode = Mode::Stand {
            previous: ModeKind::Delay,
            idle: 0,
        };
        skeleton(&mut sim, id);
        assert_eq!(sim.monsters[id].mode, Mode::MeleeAttack);
        assert_eq!(sim.monsters[id].direction, Direction::SouthWest);
    }

    #[test]
    fn test_skeleton_walks_towards_last_seen_after_delay() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::Skeleton, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(20, 26));
        sim.monsters[id].mode = Mode::Stand {
            previous: ModeKind::Delay,
            idle: 0,
        };
        skeleton(&mut sim, id);
        assert!(sim.monsters[id].is_walking());
    }

    #[test]
    fn test_unaware_skeleton_does_nothing() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::Skeleton, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(20, 21));
        sim.monsters[id].squelch = 0;
        skeleton(&mut sim, id);
        assert_eq!(sim.monsters[id].mode.kind(), ModeKind::Stand);
    }

    #[test]
    fn test_scavenger_goes_looking_for_corpse_when_hurt() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::Scavenger, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(30, 30));
        sim.level.add_corpse(
            Point::new(22, 20),
            Corpse {
                kind: 0,
                direction: Direction::South,
            },
        );
        let m = &mut sim.monsters[id];
        m.hit_points = m.max_hit_points / 4;
        scavenger(&mut sim, id);
        let m = &sim.monsters[id];
        assert_eq!(
            m.goal,
            Goal::Healing {
                remaining: HEALING_PATIENCE - 1,
                corpse: Some(Point::new(22, 20)),
            }
        );
        assert!(m.is_walking());
        assert_eq!(m.direction, Direction::SouthEast);
    }

    #[test]
    fn test_scavenger_eats_until_healthy() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::Scavenger, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(30, 30));
        sim.level.add_corpse(
            Point::new(20, 20),
            Corpse {
                kind: 0,
                direction: Direction::South,
            },
        );
        let m = &mut sim.monsters[id];
        m.max_hit_points = 8 * HP_UNIT;
        m.hit_points = 3 * HP_UNIT;
        for _ in 0..3 {
            reset(&mut sim, id);
            scavenger(&mut sim, id);
        }
        let m = &sim.monsters[id];
        assert_eq!(m.hit_points, 6 * HP_UNIT);
        assert_eq!(m.goal, Goal::Normal);
    }

    #[test]
    fn test_scavenger_leaves_pack_to_heal() {
        let mut sim = arena();
        let leader = spawn(&mut sim, Species::Scavenger, Point::new(25, 25));
        let id = spawn(&mut sim, Species::Scavenger, Point::new(20, 20));
        sim.monsters[id].leader = LeaderRelation::Leashed(leader);
        sim.monsters[leader].pack_size = 1;
        let m = &mut sim.monsters[id];
        m.hit_points = m.max_hit_points / 4;
        scavenger(&mut sim, id);
        assert_eq!(sim.monsters[id].leader, LeaderRelation::None);
        assert_eq!(sim.monsters[leader].pack_size, 0);
    }

    #[test]
    fn test_fallen_rally_spreads_attack_goal() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::FallenSpear, Point::new(20, 20));
        let ally = spawn(&mut sim, Species::FallenSword, Point::new(22, 21));
        let zombie = spawn(&mut sim, Species::Zombie, Point::new(21, 20));
        rally_fallen(&mut sim, id);
        let int = sim.monsters[id].intelligence;
        assert_eq!(
            sim.monsters[ally].goal,
            Goal::Attack2 {
                remaining: 30 * int + 105
            }
        );
        assert_eq!(sim.monsters[zombie].goal, Goal::Normal);
    }

    #[test]
    fn test_fallen_rush_winds_down() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::FallenSpear, Point::new(20, 20));
        sim.monsters[id].goal = Goal::Attack2 { remaining: 1 };
        sim.monsters[id].mode = Mode::MeleeAttack;
        fallen(&mut sim, id);
        assert_eq!(sim.monsters[id].goal, Goal::Attack2 { remaining: 0 });
        fallen(&mut sim, id);
        assert_eq!(sim.monsters[id].goal, Goal::Normal);
    }

    #[test]
    fn test_fallen_retreat_runs_then_turns() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::FallenSpear, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(21, 20));
        sim.monsters[id].goal = Goal::Retreat {
            steps: 0,
            direction: Direction::West,
        };
        fallen(&mut sim, id);
        assert_ne!(
            sim.monsters[id].goal,
            Goal::Retreat {
                steps: 0,
                direction: Direction::West
            }
        );
    }

    #[test]
    fn test_butcher_chops_adjacent() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::Butcher, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(21, 21));
        butcher(&mut sim, id);
        assert_eq!(sim.monsters[id].mode, Mode::MeleeAttack);
        assert_eq!(sim.monsters[id].direction, Direction::South);
    }

    #[test]
    fn test_sneak_stays_put_in_darkness() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::Sneak, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(21, 20));
        sim.level.set_light(Point::new(20, 20), LIGHTS_MAX);
        sneak(&mut sim, id);
        assert_eq!(sim.monsters[id].mode.kind(), ModeKind::Stand);
    }

    #[test]
    fn test_hidden_sneak_fades_in_close_up() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::Sneak, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(21, 20));
        sim.monsters[id].flags.insert(MonsterFlags::HIDDEN);
        sneak(&mut sim, id);
        assert_eq!(sim.monsters[id].mode, Mode::FadeIn);
    }

    #[test]
    fn test_visible_sneak_fades_out_far_away() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::Sneak, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(30, 20));
        sim.monsters[id].flags.remove(MonsterFlags::HIDDEN);
        sneak(&mut sim, id);
        assert_eq!(sim.monsters[id].mode, Mode::FadeOut);
    }

    #[test]
    fn test_perched_gargoyle_wakes_when_enemy_close() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::Gargoyle, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(21, 20));
        sim.monsters[id].flags.insert(MonsterFlags::ALLOW_SPECIAL);
        gargoyle(&mut sim, id);
        assert!(!sim.monsters[id].flags.contains(MonsterFlags::ALLOW_SPECIAL));
    }

    #[test]
    fn test_wounded_gargoyle_retreats() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::Gargoyle, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(21, 20));
        let m = &mut sim.monsters[id];
        m.hit_points = m.max_hit_points / 4;
        m.flags.remove(MonsterFlags::NO_HEAL | MonsterFlags::ALLOW_SPECIAL);
        m.mode = Mode::default();
        gargoyle(&mut sim, id);
        let m = &sim.monsters[id];
        assert!(matches!(m.goal, Goal::Retreat { .. }));
        assert!(m.is_walking());
    }

    #[test]
    fn test_avoidance_gives_up_circling_outside_room() {
        let mut sim = arena();
        sim.level.carve_room(Point::new(40, 10), 5, 5, 2);
        let id = spawn(&mut sim, Species::FleshClan, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(41, 12));
        sim.monsters[id].goal = Goal::Move {
            steps: 0,
            turn_left: false,
        };
        avoidance(&mut sim, id);
        assert_eq!(sim.monsters[id].goal, Goal::Normal);
    }

    #[test]
    fn test_leoric_raises_skeleton_when_far() {
        let mut sim = arena();
        sim.monsters.add_type(Species::Skeleton, Default::default()).unwrap();
        let id = spawn(&mut sim, Species::SkeletonKing, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(20, 28));
        let before = sim.monsters.active_count();
        for _ in 0..100 {
            reset(&mut sim, id);
            sim.monsters[id].goal = Goal::Normal;
            leoric(&mut sim, id);
            if sim.monsters.active_count() > before {
                break;
            }
        }
        assert!(sim.monsters.active_count() > before);
        assert_eq!(sim.monsters[id].mode, Mode::SpecialStand);
    }
}
