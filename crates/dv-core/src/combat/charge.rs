//! Charges: a monster hurls itself down a straight line until something
//! stops it, then strikes whatever it ran into

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{MissileKind, monster_attack_monster, monster_attack_player, start_hit};
use crate::dungeon::{Direction, MonsterCell, Point};
use crate::monster::{
    AiKind, Mode, MonsterGraphic, MonsterId, Species, is_tile_available_for, new_monster_anim,
    start_stand,
};
use crate::sim::Simulation;
use crate::world::SimEvent;

/// Tiles a charge may cover before it gives out
const CHARGE_RANGE: i32 = 256;

/// To-hit of the blow that ends a charge
const IMPACT_TO_HIT: i32 = 500;

/// A monster travelling as a charge, one tile per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeFlight {
    pub monster: MonsterId,
    pub direction: Direction,
    pub remaining: i32,
}

fn is_snake(species: Species) -> bool {
    matches!(
        species,
        Species::CaveViper | Species::FireDrake | Species::GoldViper | Species::AzureDrake
    )
}

/// Launch `id` at `target`. False when the first step is already blocked.
pub fn start_charge(sim: &mut Simulation, id: MonsterId, target: Point) -> bool {
    let m = &sim.monsters[id];
    let from = m.tile;
    let direction = from.direction_to(target);
    let first = from + direction;
    if !first.in_bounds() || !is_tile_available_for(&sim.level, m, first) {
        return false;
    }

    let m = &mut sim.monsters[id];
    let graphic = match m.ai {
        AiKind::Rhino => MonsterGraphic::Special,
        AiKind::Snake => MonsterGraphic::Attack,
        _ => MonsterGraphic::Walk,
    };
    new_monster_anim(m, graphic, direction);
    m.mode = Mode::Charge;
    m.future = from;
    m.old = from;
    sim.level.set_monster(from, MonsterCell::Walking(id));
    sim.charges.push(ChargeFlight {
        monster: id,
        direction,
        remaining: CHARGE_RANGE,
    });
    debug!(%id, %from, %target, ?direction, "charge started");
    sim.emit(SimEvent::MissileLaunched {
        source: id,
        kind: MissileKind::Rhino,
        from,
        to: target,
        damage: 0,
    });
    true
}

/// Move every charging monster one tile, ending the charges that hit
/// something
pub fn advance_charges(sim: &mut Simulation) {
    let flights = std::mem::take(&mut sim.charges);
    let mut still_flying = Vec::with_capacity(flights.len());
    for mut flight in flights {
        let id = flight.monster;
        let m = &sim.monsters[id];
        if m.mode != Mode::Charge {
            // interrupted mid-flight; whatever stopped it owns the mode now
            if sim.level.monster_cell(m.tile) == MonsterCell::Walking(id) {
                sim.level.set_monster(m.tile, MonsterCell::Standing(id));
            }
            continue;
        }
        let here = m.tile;
        let next = here + flight.direction;
        let open = next.in_bounds() && is_tile_available_for(&sim.level, m, next);
        if flight.remaining <= 0 || !open {
            finish_charge(sim, id, here, next, flight.direction);
            continue;
        }

        sim.level.clear_monster(here);
        sim.level.set_monster(next, MonsterCell::Walking(id));
        let m = &mut sim.monsters[id];
        m.tile = next;
        m.future = next;
        m.old = next;
        flight.remaining -= 1;
        still_flying.push(flight);
    }
    sim.charges.extend(still_flying);
}

/// The charge ended on `stop`, running into `impact`
pub fn finish_charge(
    sim: &mut Simulation,
    id: MonsterId,
    stop: Point,
    impact: Point,
    direction: Direction,
) {
    sim.level.clear_monster_squares(id, stop);
    sim.level.set_monster(stop, MonsterCell::Standing(id));
    let m = &mut sim.monsters[id];
    m.tile = stop;
    m.future = stop;
    m.old = stop;
    let (species, min, max) = (m.species, m.min_damage_special, m.max_damage_special);
    start_stand(sim, id, direction);
    start_hit(sim, id, 0);
    debug!(%id, %stop, %impact, "charge finished");

    if species == Species::Gloom || !impact.in_bounds() {
        return;
    }
    let shove_to = impact + direction;
    let shoves = !is_snake(species);

    if let Some(player) = sim.level.player_at(impact) {
        monster_attack_player(sim, id, player, IMPACT_TO_HIT, min, max);
        if shoves && !sim.players[player.index()].is_dead() && sim.level.is_tile_available(shove_to)
        {
            sim.move_player(player, shove_to);
            sim.emit(SimEvent::PlayerKnockedBack {
                player,
                to: shove_to,
            });
        }
        return;
    }

    let Some(target) = sim.level.monster_cell(impact).id() else {
        return;
    };
    monster_attack_monster(sim, id, target, IMPACT_TO_HIT, min, max);
    let t = &sim.monsters[target];
    if shoves
        && t.is_alive()
        && t.tile == impact
        && is_tile_available_for(&sim.level, t, shove_to)
    {
        sim.level.clear_monster(impact);
        sim.level.set_monster(shove_to, MonsterCell::Standing(target));
        let t = &mut sim.monsters[target];
        t.tile = shove_to;
        t.future = shove_to;
        t.old = shove_to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HP_UNIT;
    use crate::monster::{ModeKind, start_stand};
    use crate::testing::{arena, hunt_player, spawn};

    fn charger(sim: &mut Simulation, species: Species, at: Point) -> MonsterId {
        let id = spawn(sim, species, at);
        let m = &mut sim.monsters[id];
        m.min_damage_special = 2;
        m.max_damage_special = 2;
        m.level = 40;
        id
    }

    fn run_until_done(sim: &mut Simulation, limit: usize) {
        for _ in 0..limit {
            if sim.charges.is_empty() {
                return;
            }
            advance_charges(sim);
        }
    }

    #[test]
    fn test_charge_refused_into_a_wall() {
        let mut sim = arena();
        let wall = charger(&mut sim, Species::HornedDemon, Point::new(10, 10));
        assert!(!start_charge(&mut sim, wall, Point::new(5, 5)));
        assert_ne!(sim.monsters[wall].mode, Mode::Charge);
    }

    #[test]
    fn test_charge_slams_player_and_shoves() {
        let mut sim = arena();
        let id = charger(&mut sim, Species::HornedDemon, Point::new(20, 20));
        let pid = hunt_player(&mut sim, id, Point::new(20, 26));
        sim.players[0].hit_points = 50 * HP_UNIT;
        sim.players[0].max_hit_points = 50 * HP_UNIT;
        assert!(start_charge(&mut sim, id, Point::new(20, 26)));
        assert!(!sim.monsters[id].is_possible_to_hit());

        run_until_done(&mut sim, 20);

        assert_eq!(sim.monsters[id].tile, Point::new(20, 25));
        assert_eq!(
            sim.level.monster_cell(Point::new(20, 25)),
            MonsterCell::Standing(id)
        );
        assert_eq!(sim.players[0].hit_points, 48 * HP_UNIT);
        assert_eq!(sim.players[0].tile, Point::new(20, 27));
        assert_eq!(sim.level.player_at(Point::new(20, 27)), Some(pid));
        for y in 20..25 {
            assert!(sim.level.monster_cell(Point::new(20, y)).is_empty());
        }
    }

    #[test]
    fn test_snake_lunge_does_not_shove() {
        let mut sim = arena();
        let id = charger(&mut sim, Species::CaveViper, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(20, 23));
        sim.players[0].hit_points = 50 * HP_UNIT;
        assert!(start_charge(&mut sim, id, Point::new(20, 23)));
        run_until_done(&mut sim, 10);
        assert_eq!(sim.players[0].tile, Point::new(20, 23));
        assert!(sim.players[0].hit_points < 50 * HP_UNIT);
    }

    #[test]
    fn test_gloom_does_not_strike() {
        let mut sim = arena();
        let id = charger(&mut sim, Species::Gloom, Point::new(20, 20));
        hunt_player(&mut sim, id, Point::new(20, 24));
        sim.players[0].hit_points = 50 * HP_UNIT;
        assert!(start_charge(&mut sim, id, Point::new(20, 24)));
        run_until_done(&mut sim, 10);
        assert_eq!(sim.players[0].hit_points, 50 * HP_UNIT);
        assert_eq!(sim.monsters[id].tile, Point::new(20, 23));
    }

    #[test]
    fn test_charge_into_monster_shoves_it() {
        let mut sim = arena();
        let id = charger(&mut sim, Species::HornedDemon, Point::new(20, 20));
        let victim = spawn(&mut sim, Species::Zombie, Point::new(20, 24));
        sim.monsters[victim].hit_points = 50 * HP_UNIT;
        assert!(start_charge(&mut sim, id, Point::new(20, 24)));
        run_until_done(&mut sim, 10);
        assert_eq!(sim.monsters[id].tile, Point::new(20, 23));
        assert_eq!(sim.monsters[victim].hit_points, 48 * HP_UNIT);
        assert_eq!(sim.monsters[victim].tile, Point::new(20, 25));
        assert_eq!(
            sim.level.monster_cell(Point::new(20, 25)),
            MonsterCell::Standing(victim)
        );
    }

    #[test]
    fn test_interrupted_charge_is_dropped() {
        let mut sim = arena();
        let id = charger(&mut sim, Species::HornedDemon, Point::new(20, 20));
        assert!(start_charge(&mut sim, id, Point::new(20, 30)));
        let dir = sim.monsters[id].direction;
        start_stand(&mut sim, id, dir);
        advance_charges(&mut sim);
        assert!(sim.charges.is_empty());
        assert_eq!(sim.monsters[id].mode.kind(), ModeKind::Stand);
        assert_eq!(
            sim.level.monster_cell(Point::new(20, 20)),
            MonsterCell::Standing(id)
        );
    }
}
