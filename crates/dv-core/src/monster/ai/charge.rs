//! Chargers: rhinos, bats and snakes throw themselves at the enemy

use super::{
    circle, enemy_distance, enemy_offset, is_active, is_restless, just_walked, next_circle_step,
    previous_mode, shares_room_with_enemy, start_circling, toward_last,
};
use crate::SQUELCH_MAX;
use crate::combat::{MissileKind, start_charge};
use crate::dungeon::Direction;
use crate::monster::mode::launch_missile;
use crate::monster::movement::is_tile_available_for;
use crate::monster::{
    Goal, ModeKind, MonsterId, Species, ai_delay, check_doors, check_stand_animation, dumb_walk,
    random_walk, random_walk2, start_attack,
};
use crate::path::line_clear;
use crate::sim::Simulation;
use crate::world::MonsterSound;

/// Weave of a slithering snake: right, right, straight, left, left, straight
const SNAKE_PATTERN: [i8; 6] = [1, 1, 0, -1, -1, 0];

fn rnd(sim: &mut Simulation, n: i32) -> i32 {
    sim.rng.generate(n)
}

/// Nothing stands between the monster and its enemy
fn charge_lane_clear(sim: &Simulation, id: MonsterId) -> bool {
    let m = &sim.monsters[id];
    let level = &sim.level;
    line_clear(
        |p| is_tile_available_for(level, m, p),
        m.tile,
        m.enemy_position,
    )
}

fn charge_at_enemy(sim: &mut Simulation, id: MonsterId) -> bool {
    let target = sim.monsters[id].enemy_position;
    start_charge(sim, id, target)
}

/// Circles into range, then charges in a straight line
pub(super) fn rhino(sim: &mut Simulation, id: MonsterId) {
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
    let dist = enemy_distance(m);
    let int = m.intelligence;
    let walked = just_walked(m);
    let same_room = shares_room_with_enemy(sim, m);

    if dist >= 2 {
        if matches!(m.goal, Goal::Move { .. }) || (dist >= 5 && rnd(sim, 4) != 0) {
            start_circling(sim, id);
            if next_circle_step(&mut sim.monsters[id]) >= 2 * dist || !same_room {
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
        if dist >= 5 && v < 2 * int + 43 && charge_lane_clear(sim, id) {
            if charge_at_enemy(sim, id) {
                sim.play_effect(id, MonsterSound::Special);
            }
        } else if dist >= 2 {
            let v = rnd(sim, 100);
            if v >= 2 * int + 33 && (!walked || v >= 2 * int + 83) {
                let len = rnd(sim, 10) + 10;
                ai_delay(&mut sim.monsters[id], len);
            } else {
                random_walk(sim, id, md);
            }
        } else if v < 2 * int + 28 {
            sim.monsters[id].direction = md;
            start_attack(&mut sim.monsters[id]);
        }
    }

    let m = &mut sim.monsters[id];
    let dir = m.direction;
    check_stand_animation(m, dir);
}

/// Hit and run: bite, flutter off and come back. Glooms charge from afar,
/// familiars throw a spark with every bite.
pub(super) fn bat(sim: &mut Simulation, id: MonsterId) {
    let m = &sim.monsters[id];
    if !is_active(m) {
        return;
    }
    let (mx, my) = enemy_offset(m);
    let md = toward_last(m);
    let int = m.intelligence;
    let species = m.species;
    let (restless, walked) = (is_restless(m), just_walked(m));
    sim.monsters[id].direction = md;
    let v = rnd(sim, 100);

    if let Goal::Retreat { steps, direction } = sim.monsters[id].goal {
        if steps == 0 {
            random_walk(sim, id, md.opposite());
            sim.monsters[id].goal = Goal::Retreat {
                steps: steps + 1,
                direction,
            };
        } else {
            let side = if rnd(sim, 2) != 0 { md.left() } else { md.right() };
            random_walk(sim, id, side);
            sim.monsters[id].goal = Goal::Normal;
        }
        return;
    }

    if species == Species::Gloom
        && (mx >= 5 || my >= 5)
        && v < 4 * int + 33
        && charge_lane_clear(sim, id)
    {
        charge_at_enemy(sim, id);
    } else if mx >= 2 || my >= 2 {
        if (restless && v < int + 13) || (walked && v < int + 63) {
            random_walk(sim, id, md);
        }
    } else if v < 4 * int + 8 {
        let m = &mut sim.monsters[id];
        start_attack(m);
        m.goal = Goal::Retreat {
            steps: 0,
            direction: md.opposite(),
        };
        if species == Species::Familiar {
            let damage = rnd(sim, 10) + 1;
            launch_missile(sim, id, MissileKind::Lightning, damage);
        }
    }

    check_stand_animation(&mut sim.monsters[id], md);
}

/// Next heading along the weave, never turning more than 45 degrees from
/// the previous one
fn slither(step: usize, heading: Direction, toward: Direction) -> Direction {
    let mut md = match SNAKE_PATTERN[step] {
        -1 => toward.left(),
        1 => toward.right(),
        _ => toward,
    };
    if md != heading {
        let drift = (md.index() as i32 - heading.index() as i32).rem_euclid(8);
        if drift < 4 {
            md = heading.right();
        } else if drift > 4 {
            md = heading.left();
        }
    }
    md
}

/// Weaves towards the enemy and lunges from two tiles out
pub(super) fn snake(sim: &mut Simulation, id: MonsterId) {
    let m = &sim.monsters[id];
    if !is_active(m) {
        return;
    }
    let (mx, my) = enemy_offset(m);
    let md = toward_last(m);
    let int = m.intelligence;
    let previous = previous_mode(m);
    sim.monsters[id].direction = md;

    if mx >= 2 || my >= 2 {
        if mx < 3 && my < 3 && charge_lane_clear(sim, id) && previous != Some(ModeKind::Charge) {
            if charge_at_enemy(sim, id) {
                sim.play_effect(id, MonsterSound::Attack);
            }
        } else if previous == Some(ModeKind::Delay) || rnd(sim, 100) >= 35 - 2 * int {
            let m = &mut sim.monsters[id];
            let heading = slither(m.serpentine.step, m.serpentine.heading, md);
            m.serpentine.step = (m.serpentine.step + 1) % SNAKE_PATTERN.len();
            m.serpentine.heading = heading;
            if !dumb_walk(sim, id, heading) {
                random_walk2(sim, id, md);
            }
        } else {
            let len = 15 - int + rnd(sim, 10);
            ai_delay(&mut sim.monsters[id], len);
        }
    } else if matches!(previous, Some(ModeKind::Delay | ModeKind::Charge))
        || rnd(sim, 100) < int + 20
    {
        start_attack(&mut sim.monsters[id]);
    } else {
        let len = 10 - int + rnd(sim, 10);
        ai_delay(&mut sim.monsters[id], len);
    }

    let m = &mut sim.monsters[id];
    let dir = m.direction;
    check_stand_animation(m, dir);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::{MonsterCell, Point};
    use crate::monster::{Mode, start_stand};
    use crate::testing::{arena, hunt_player, spawn};
    use crate::world::SimEvent;

    /// Undo any half-finished walk and stand the monster back on `at`
    fn reset(sim: &mut Simulation, id: MonsterId, at: Point) {
        for x in 10..40 {
            for y in 10..40 {
                let p = Point::new(x, y);
                if matches!(
                    sim.level.monster_cell(p),
                    MonsterCell::Standing(w) | MonsterCell::Walking(w) if w == id
                ) {
                    sim.level.clear_monster(p);
                }
            }
        }
        sim.level.set_monster(at, MonsterCell::Standing(id));
        sim.monsters[id].tile = at;
        let dir = sim.monsters[id].direction;
        start_stand(sim, id, dir);
        sim.monsters[id].goal = Goal::Normal;
    }

    #[test]
    fn test_slither_turns_at_most_45_degrees() {
        assert_eq!(slither(2, Direction::South, Direction::South), Direction::South);
        assert_eq!(slither(0, Direction::South, Direction::South), Direction::SouthWest);
        assert_eq!(slither(2, Direction::South, Direction::North), Direction::North);
        assert_eq!(slither(2, Direction::South, Direction::West), Direction::SouthWest);
        assert_eq!(slither(2, Direction::South, Direction::East), Direction::SouthEast);
    }

    #[test]
    fn test_rhino_charges_down_open_lane() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::HornedDemon, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(20, 30));
        let mut charged = false;
        for _ in 0..100 {
            reset(&mut sim, id, Point::new(20, 20));
            rhino(&mut sim, id);
            if sim.monsters[id].mode == Mode::Charge {
                charged = true;
                break;
            }
        }
        assert!(charged);
        let tile = sim.monsters[id].tile;
        assert_eq!(sim.level.monster_cell(tile), MonsterCell::Walking(id));
        assert!(!sim.monsters[id].is_possible_to_hit());
        assert!(sim.events().iter().any(|e| matches!(
            e,
            SimEvent::MissileLaunched {
                kind: MissileKind::Rhino,
                ..
            }
        )));
    }

    #[test]
    fn test_rhino_never_charges_through_blockers() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::HornedDemon, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(20, 30));
        spawn(&mut sim, Species::Zombie, Point::new(20, 25));
        for _ in 0..100 {
            reset(&mut sim, id, Point::new(20, 20));
            rhino(&mut sim, id);
            assert_ne!(sim.monsters[id].mode, Mode::Charge);
        }
    }

    #[test]
    fn test_bat_flutters_off_after_biting() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::Fiend, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(21, 20));
        let mut bit = false;
        for _ in 0..100 {
            let dir = sim.monsters[id].direction;
            start_stand(&mut sim, id, dir);
            bat(&mut sim, id);
            if sim.monsters[id].mode == Mode::MeleeAttack {
                bit = true;
                break;
            }
        }
        assert!(bit);
        assert!(matches!(sim.monsters[id].goal, Goal::Retreat { steps: 0, .. }));

        start_stand(&mut sim, id, Direction::East);
        bat(&mut sim, id);
        assert!(sim.monsters[id].is_walking());
        assert!(matches!(sim.monsters[id].goal, Goal::Retreat { steps: 1, .. }));
    }

    #[test]
    fn test_familiar_sparks_on_bite() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::Familiar, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(21, 20));
        for _ in 0..200 {
            let dir = sim.monsters[id].direction;
            start_stand(&mut sim, id, dir);
            sim.monsters[id].goal = Goal::Normal;
            bat(&mut sim, id);
            if sim.monsters[id].mode == Mode::MeleeAttack {
                break;
            }
        }
        assert!(sim.events().iter().any(|e| matches!(
            e,
            SimEvent::MissileLaunched {
                kind: MissileKind::Lightning,
                ..
            }
        )));
    }

    #[test]
    fn test_snake_lunges_from_two_tiles() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::CaveViper, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(20, 22));
        snake(&mut sim, id);
        assert_eq!(sim.monsters[id].mode, Mode::Charge);
    }

    #[test]
    fn test_snake_does_not_lunge_twice_in_a_row() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::CaveViper, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(20, 22));
        sim.monsters[id].mode = Mode::Stand {
            previous: ModeKind::Charge,
            idle: 0,
        };
        snake(&mut sim, id);
        assert_ne!(sim.monsters[id].mode, Mode::Charge);
    }
}
