//! Monster attacks monster: golems, berserkers and charge impacts

use tracing::trace;

use super::hit::{DamageSource, react_to_wound, wound};
use crate::monster::{Mode, MonsterId};
use crate::sim::Simulation;
use crate::{HP_SHIFT, SQUELCH_MAX};

/// One melee swing of `attacker` at `target`. Returns true on a hit.
pub fn monster_attack_monster(
    sim: &mut Simulation,
    attacker: MonsterId,
    target: MonsterId,
    to_hit: i32,
    min_damage: i32,
    max_damage: i32,
) -> bool {
    if !sim.monsters[target].is_possible_to_hit() {
        return false;
    }
    let mut roll = sim.rng.generate(100);
    let t = &mut sim.monsters[target];
    if t.mode == Mode::Petrified {
        roll = 0;
    }
    if t.try_lift_gargoyle() {
        return true;
    }
    if roll >= to_hit {
        trace!(%attacker, %target, roll, to_hit, "monster missed monster");
        return false;
    }

    let damage = (min_damage + sim.rng.generate(max_damage - min_damage + 1)) << HP_SHIFT;
    let dead = wound(sim, target, damage);
    react_to_wound(sim, target, DamageSource::Monster(attacker), damage, dead);

    let from = sim.monsters[attacker].tile;
    let t = &mut sim.monsters[target];
    if t.squelch == 0 {
        t.squelch = SQUELCH_MAX;
        t.last = from;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HP_UNIT;
    use crate::dungeon::Point;
    use crate::monster::{ModeKind, Species};
    use crate::testing::{arena, spawn};

    #[test]
    fn test_sure_hit_wounds_and_wakes() {
        let mut sim = arena();
        let a = spawn(&mut sim, Species::Zombie, Point::new(20, 20));
        let t = spawn(&mut sim, Species::Zombie, Point::new(21, 20));
        sim.monsters[t].hit_points = 100 * HP_UNIT;
        sim.monsters[t].squelch = 0;
        assert!(monster_attack_monster(&mut sim, a, t, 500, 2, 2));
        assert_eq!(sim.monsters[t].hit_points, 98 * HP_UNIT);
        assert_eq!(sim.monsters[t].squelch, SQUELCH_MAX);
        assert_eq!(sim.monsters[t].last, Point::new(20, 20));
    }

    #[test]
    fn test_zero_chance_never_hits() {
        let mut sim = arena();
        let a = spawn(&mut sim, Species::Zombie, Point::new(20, 20));
        let t = spawn(&mut sim, Species::Zombie, Point::new(21, 20));
        let hp = sim.monsters[t].hit_points;
        for _ in 0..20 {
            assert!(!monster_attack_monster(&mut sim, a, t, 0, 1, 3));
        }
        assert_eq!(sim.monsters[t].hit_points, hp);
    }

    #[test]
    fn test_lethal_swing_kills() {
        let mut sim = arena();
        let a = spawn(&mut sim, Species::Zombie, Point::new(20, 20));
        let t = spawn(&mut sim, Species::Zombie, Point::new(21, 20));
        sim.monsters[t].hit_points = HP_UNIT;
        monster_attack_monster(&mut sim, a, t, 500, 4, 4);
        assert_eq!(sim.monsters[t].mode.kind(), ModeKind::Death);
        assert!(!monster_attack_monster(&mut sim, a, t, 500, 4, 4));
    }
}
