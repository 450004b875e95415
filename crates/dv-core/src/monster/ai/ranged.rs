//! Shooters and casters

use super::{
    circle, enemy_distance, enemy_offset, is_active, is_aware, is_standing, just_walked,
    missile_for, next_circle_step, previous_mode, shares_room_with_enemy, start_circling,
    toward_last,
};
use crate::SQUELCH_MAX;
use crate::combat::MissileKind;
use crate::monster::mode::launch_missile;
use crate::monster::movement::is_tile_available_for;
use crate::monster::{
    AiKind, Goal, ModeKind, MonsterId, ai_delay, check_doors, check_stand_animation, dir_ok,
    random_walk, start_attack, start_fade_in, start_fade_out, start_ranged_attack,
    start_ranged_special_attack,
};
use crate::path::line_clear_missile;
use crate::sim::Simulation;

use super::melee::skeleton;

/// Counselor bolts by intelligence
const COUNSELOR_BOLTS: [MissileKind; 4] = [
    MissileKind::Firebolt,
    MissileKind::ChargedBolt,
    MissileKind::LightningControl,
    MissileKind::Fireball,
];

fn rnd(sim: &mut Simulation, n: i32) -> i32 {
    sim.rng.generate(n)
}

fn has_clear_shot(sim: &Simulation, id: MonsterId) -> bool {
    let m = &sim.monsters[id];
    line_clear_missile(&sim.level, m.tile, m.enemy_position)
}

/// Keep distance and shoot along clear lines. Unaware shooters wander
/// towards the last thing they heard.
pub(super) fn ranged(sim: &mut Simulation, id: MonsterId) {
    let m = &sim.monsters[id];
    if !is_standing(m) {
        return;
    }

    if m.squelch == SQUELCH_MAX || m.targets_monster() {
        let (mx, my) = enemy_offset(m);
        let md = m.enemy_direction();
        let int = m.intelligence;
        let shot_last = previous_mode(m) == Some(ModeKind::RangedAttack);
        if m.squelch < SQUELCH_MAX {
            check_doors(sim, id);
        }
        sim.monsters[id].direction = md;
        if shot_last {
            let len = rnd(sim, 20);
            ai_delay(&mut sim.monsters[id], len);
        } else if mx < 4 && my < 4 && rnd(sim, 100) < 10 * (int + 7) {
            random_walk(sim, id, md.opposite());
        }

        if is_standing(&sim.monsters[id]) {
            if has_clear_shot(sim, id) {
                let m = &mut sim.monsters[id];
                let missile = missile_for(m.ai);
                if m.ai == AiKind::AcidUnique {
                    start_ranged_special_attack(m, missile, 4);
                } else {
                    start_ranged_attack(m, Some(missile), 4);
                }
            } else {
                check_stand_animation(&mut sim.monsters[id], md);
            }
        }
        return;
    }

    if m.squelch != 0 {
        let md = toward_last(m);
        random_walk(sim, id, md);
    }
}

/// Circle the enemy at range and open up with the special missile
pub(super) fn ranged_avoidance(sim: &mut Simulation, id: MonsterId) {
    let m = &sim.monsters[id];
    if !is_active(m) {
        return;
    }
    let md = toward_last(m);
    let ai = m.ai;
    if matches!(ai, AiKind::Magma | AiKind::Storm | AiKind::BoneDemon) && m.squelch < SQUELCH_MAX {
        check_doors(sim, id);
    }
    let fewer = if ai == AiKind::Acid { 1 } else { 0 };
    let damage = if ai == AiKind::Diablo { 40 } else { 4 };
    let missile = missile_for(ai);
    let v = rnd(sim, 10000);

    let m = &sim.monsters[id];
    let dist = enemy_distance(m);
    let int = m.intelligence;
    let walked = just_walked(m);
    let same_room = shares_room_with_enemy(sim, m);

    if dist >= 2 && is_aware(m) && same_room {
        let circling = matches!(m.goal, Goal::Move { .. });
        if circling || (dist >= 3 && rnd(sim, 4 << fewer) == 0) {
            start_circling(sim, id);
            if next_circle_step(&mut sim.monsters[id]) >= 2 * dist && dir_ok(sim, id, md) {
                sim.monsters[id].goal = Goal::Normal;
            } else if v < (500 * (int + 1)) >> fewer && has_clear_shot(sim, id) {
                start_ranged_special_attack(&mut sim.monsters[id], missile, damage);
            } else {
                circle(sim, id, md);
            }
        }
    } else {
        sim.monsters[id].goal = Goal::Normal;
    }

    if sim.monsters[id].goal == Goal::Normal {
        let eager = (dist >= 3 && v < (500 * (int + 2)) >> fewer) || v < (500 * (int + 1)) >> fewer;
        if eager && has_clear_shot(sim, id) {
            start_ranged_special_attack(&mut sim.monsters[id], missile, damage);
        } else if dist >= 2 {
            let v = rnd(sim, 100);
            if v < 1000 * (int + 5) || (walked && v < 1000 * (int + 8)) {
                random_walk(sim, id, md);
            }
        } else if v < 1000 * (int + 6) {
            sim.monsters[id].direction = md;
            start_attack(&mut sim.monsters[id]);
        }
    }

    if let Some(r) = rnd_if_standing(sim, id, 10) {
        ai_delay(&mut sim.monsters[id], r + 5);
    }
}

/// Roll only when the monster is still standing, keeping the stream in step
fn rnd_if_standing(sim: &mut Simulation, id: MonsterId, n: i32) -> Option<i32> {
    is_standing(&sim.monsters[id]).then(|| rnd(sim, n))
}

/// Advocates and their kin: blink out to reposition, cast bolts from afar,
/// burst into flame up close and vanish when hurt
pub(super) fn counselor(sim: &mut Simulation, id: MonsterId) {
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

    let goal = m.goal;
    match goal {
        Goal::Retreat { steps, direction } => {
            sim.monsters[id].goal = Goal::Retreat {
                steps: steps + 1,
                direction,
            };
            if steps <= 3 {
                random_walk(sim, id, md.opposite());
            } else {
                let m = &mut sim.monsters[id];
                m.goal = Goal::Normal;
                start_fade_in(m, md, true);
            }
        }
        Goal::Move { .. } => {
            if dist >= 2 && is_aware(m) && same_room {
                let steps = next_circle_step(&mut sim.monsters[id]);
                if steps < 2 * dist || !dir_ok(sim, id, md) {
                    circle(sim, id, md);
                } else {
                    let m = &mut sim.monsters[id];
                    m.goal = Goal::Normal;
                    start_fade_in(m, md, true);
                }
            } else {
                let m = &mut sim.monsters[id];
                m.goal = Goal::Normal;
                start_fade_in(m, md, true);
            }
        }
        Goal::Normal => {
            if mx >= 2 || my >= 2 {
                if v < 5 * (int + 10) && has_clear_shot(sim, id) {
                    let m = &sim.monsters[id];
                    let bolt = COUNSELOR_BOLTS[int.clamp(0, 3) as usize];
                    let (min, max) = (m.min_damage, m.max_damage);
                    let damage = min + rnd(sim, max - min + 1);
                    start_ranged_attack(&mut sim.monsters[id], Some(bolt), damage);
                } else if rnd(sim, 100) < 30 {
                    let m = &mut sim.monsters[id];
                    m.goal = Goal::Move {
                        steps: 0,
                        turn_left: false,
                    };
                    start_fade_out(m, md, false);
                } else {
                    let len = rnd(sim, 10) + 2 * (5 - int);
                    ai_delay(&mut sim.monsters[id], len);
                }
            } else {
                let after_delay = previous_mode(m) == Some(ModeKind::Delay);
                let m = &mut sim.monsters[id];
                m.direction = md;
                if m.hit_points < m.max_hit_points / 2 {
                    m.goal = Goal::Retreat {
                        steps: 0,
                        direction: md.opposite(),
                    };
                    start_fade_out(m, md, false);
                } else if after_delay || rnd(sim, 100) < 2 * int + 20 {
                    start_ranged_attack(&mut sim.monsters[id], None, 0);
                    launch_missile(sim, id, MissileKind::Flash, 4);
                    launch_missile(sim, id, MissileKind::Flash2, 4);
                } else {
                    let len = rnd(sim, 10) + 2 * (5 - int);
                    ai_delay(&mut sim.monsters[id], len);
                }
            }
        }
        _ => {}
    }

    if let Some(r) = rnd_if_standing(sim, id, 10) {
        ai_delay(&mut sim.monsters[id], r + 5);
    }
}

/// Mega demons circle in, then breathe a flame wave; from afar they walk
/// in like skeletons
pub(super) fn mega(sim: &mut Simulation, id: MonsterId) {
    let m = &sim.monsters[id];
    let (mx, my) = enemy_offset(m);
    if mx >= 5 || my >= 5 {
        skeleton(sim, id);
        return;
    }
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
    // a demon that was circling unleashes the wave as soon as it stops
    let mut circled = matches!(m.goal, Goal::Move { .. });

    if dist >= 2 && is_aware(m) && same_room {
        if circled || dist >= 3 {
            start_circling(sim, id);
            circled = true;
            let steps = next_circle_step(&mut sim.monsters[id]);
            if steps < 2 * dist || !dir_ok(sim, id, md) {
                if v < 5 * (int + 16) {
                    circle(sim, id, md);
                }
            } else {
                sim.monsters[id].goal = Goal::Normal;
            }
        }
    } else {
        sim.monsters[id].goal = Goal::Normal;
    }

    if sim.monsters[id].goal == Goal::Normal {
        let eager = (dist >= 3 && v < 5 * (int + 2)) || v < 5 * (int + 1) || circled;
        if eager && has_clear_shot(sim, id) {
            start_ranged_special_attack(&mut sim.monsters[id], MissileKind::FlameWave, 0);
        } else if dist >= 2 {
            let v = rnd(sim, 100);
            if v < 2 * (5 * int + 25) || (walked && v < 2 * (5 * int + 40)) {
                random_walk(sim, id, md);
            }
        } else if rnd(sim, 100) < 10 * (int + 4) {
            sim.monsters[id].direction = md;
            if rnd(sim, 2) != 0 {
                start_attack(&mut sim.monsters[id]);
            } else {
                start_ranged_special_attack(&mut sim.monsters[id], MissileKind::FlameWave, 0);
            }
        }
    }

    if let Some(r) = rnd_if_standing(sim, id, 10) {
        ai_delay(&mut sim.monsters[id], r + 5);
    }
}

/// Circles from afar and spits out its brood when there is room in front
pub(super) fn hork_demon(sim: &mut Simulation, id: MonsterId) {
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
    let walked = just_walked(m);
    let same_room = shares_room_with_enemy(sim, m);

    if mx < 2 && my < 2 {
        sim.monsters[id].goal = Goal::Normal;
    } else if matches!(m.goal, Goal::Move { .. }) || ((mx >= 5 || my >= 5) && rnd(sim, 4) != 0) {
        start_circling(sim, id);
        if next_circle_step(&mut sim.monsters[id]) >= 2 * dist || !same_room {
            sim.monsters[id].goal = Goal::Normal;
        } else if !circle(sim, id, md) {
            let len = rnd(sim, 10) + 10;
            ai_delay(&mut sim.monsters[id], len);
        }
    }

    if sim.monsters[id].goal == Goal::Normal {
        if (mx >= 3 || my >= 3) && v < 2 * int + 43 {
            let m = &sim.monsters[id];
            let front = m.tile + m.direction;
            if front.in_bounds()
                && is_tile_available_for(&sim.level, m, front)
                && !sim.monsters.is_full()
            {
                start_ranged_special_attack(&mut sim.monsters[id], MissileKind::HorkSpawn, 0);
            }
        } else if mx < 2 && my < 2 {
            if v < 2 * int + 28 {
                sim.monsters[id].direction = md;
                start_attack(&mut sim.monsters[id]);
            }
        } else {
            let v = rnd(sim, 100);
            if v < 2 * int + 33 || (walked && v < 2 * int + 83) {
                random_walk(sim, id, md);
            } else {
                let len = rnd(sim, 10) + 10;
                ai_delay(&mut sim.monsters[id], len);
            }
        }
    }

    let m = &mut sim.monsters[id];
    let dir = m.direction;
    check_stand_animation(m, dir);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::{Direction, Point};
    use crate::monster::{Mode, Species, start_stand};
    use crate::testing::{arena, hunt_player, spawn};
    use crate::world::SimEvent;

    #[test]
    fn test_ranged_shoots_along_clear_line() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::Succubus, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(20, 30));
        ranged(&mut sim, id);
        assert_eq!(
            sim.monsters[id].mode,
            Mode::RangedAttack {
                missile: Some(MissileKind::Flare),
                damage: 4
            }
        );
        assert_eq!(sim.monsters[id].direction, Direction::SouthWest);
    }

    #[test]
    fn test_ranged_holds_fire_behind_wall() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::Succubus, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(20, 30));
        for x in 10..40 {
            sim.level.set_wall(Point::new(x, 25));
        }
        ranged(&mut sim, id);
        assert_eq!(sim.monsters[id].mode.kind(), ModeKind::Stand);
    }

    #[test]
    fn test_unaware_shooter_wanders_towards_noise() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::Succubus, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(20, 30));
        sim.monsters[id].squelch = 10;
        ranged(&mut sim, id);
        assert!(sim.monsters[id].is_walking());
        assert_eq!(sim.monsters[id].direction, Direction::SouthWest);
    }

    #[test]
    fn test_acid_unique_spits_special() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::AcidBeast, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(20, 30));
        sim.monsters[id].ai = AiKind::AcidUnique;
        ranged(&mut sim, id);
        assert!(matches!(
            sim.monsters[id].mode,
            Mode::SpecialRangedAttack {
                missile: MissileKind::Acid,
                ..
            }
        ));
    }

    #[test]
    fn test_ranged_avoidance_never_idles_without_action() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::MagmaDemon, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(20, 30));
        for _ in 0..20 {
            let dir = sim.monsters[id].direction;
            start_stand(&mut sim, id, dir);
            ranged_avoidance(&mut sim, id);
            assert_ne!(sim.monsters[id].mode.kind(), ModeKind::Stand);
        }
    }

    #[test]
    fn test_counselor_flashes_up_close() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::Counselor, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(21, 20));
        sim.monsters[id].mode = Mode::Stand {
            previous: ModeKind::Delay,
            idle: 0,
        };
        counselor(&mut sim, id);
        assert_eq!(
            sim.monsters[id].mode,
            Mode::RangedAttack {
                missile: None,
                damage: 0
            }
        );
        let flashes = sim
            .events()
            .iter()
            .filter(|e| matches!(e, SimEvent::MissileLaunched { kind: MissileKind::Flash | MissileKind::Flash2, .. }))
            .count();
        assert_eq!(flashes, 2);
    }

    #[test]
    fn test_wounded_counselor_fades_out_and_retreats() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::Counselor, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(21, 20));
        let m = &mut sim.monsters[id];
        m.hit_points = m.max_hit_points / 4;
        counselor(&mut sim, id);
        let m = &sim.monsters[id];
        assert_eq!(m.mode, Mode::FadeOut);
        assert!(matches!(m.goal, Goal::Retreat { steps: 0, .. }));
    }

    #[test]
    fn test_counselor_reappears_after_retreat() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::Counselor, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(21, 20));
        sim.monsters[id].goal = Goal::Retreat {
            steps: 4,
            direction: Direction::West,
        };
        counselor(&mut sim, id);
        assert_eq!(sim.monsters[id].goal, Goal::Normal);
        assert_eq!(sim.monsters[id].mode, Mode::FadeIn);
    }

    #[test]
    fn test_mega_from_afar_acts_like_skeleton() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::Balrog, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(20, 30));
        sim.monsters[id].mode = Mode::Stand {
            previous: ModeKind::Delay,
            idle: 0,
        };
        mega(&mut sim, id);
        assert!(sim.monsters[id].is_walking());
    }

    #[test]
    fn test_mega_breathes_after_circling() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::Balrog, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(21, 20));
        sim.monsters[id].goal = Goal::Move {
            steps: 10,
            turn_left: false,
        };
        mega(&mut sim, id);
        assert!(matches!(
            sim.monsters[id].mode,
            Mode::SpecialRangedAttack {
                missile: MissileKind::FlameWave,
                ..
            }
        ));
    }

    #[test]
    fn test_hork_demon_needs_room_to_spawn() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::HorkDemon, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(20, 24));
        for x in 10..40 {
            sim.level.set_wall(Point::new(x, 21));
        }
        for _ in 0..50 {
            let dir = Direction::South;
            start_stand(&mut sim, id, dir);
            sim.monsters[id].goal = Goal::Normal;
            hork_demon(&mut sim, id);
            assert!(!matches!(
                sim.monsters[id].mode,
                Mode::SpecialRangedAttack { .. }
            ));
        }
    }
}
