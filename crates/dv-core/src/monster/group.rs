//! Packs: leashed minions, shared alertness and fear

use tracing::debug;

use super::{AiKind, Goal, LeaderRelation, MonsterId};
use crate::dungeon::Point;
use crate::path::is_line_not_solid;
use crate::sim::Simulation;

/// Leashed minions pick up their leader's alertness
pub fn follow_the_leader(sim: &mut Simulation, id: MonsterId) {
    let LeaderRelation::Leashed(leader) = sim.monsters[id].leader else {
        return;
    };
    let (leader_squelch, leader_tile) = {
        let l = &sim.monsters[leader];
        (l.squelch, l.tile)
    };
    let m = &mut sim.monsters[id];
    if m.squelch >= leader_squelch {
        return;
    }
    m.last = leader_tile;
    m.squelch = leader_squelch - 1;
}

/// Keep pack membership in step with line of sight to the leader, and push
/// alertness from minion to leader
pub fn group_unity(sim: &mut Simulation, id: MonsterId) {
    let Some(leader) = sim.monsters[id].leader.leader() else {
        return;
    };
    let tile = sim.monsters[id].tile;
    let leader_future = sim.monsters[leader].future;

    if is_line_not_solid(&sim.level, tile, leader_future) {
        if matches!(sim.monsters[id].leader, LeaderRelation::Separated(_))
            && tile.walking_distance(leader_future) <= sim.config.pack_regroup_radius
        {
            sim.monsters[leader].pack_size += 1;
            sim.monsters[id].leader = LeaderRelation::Leashed(leader);
            debug!(%id, %leader, "rejoined pack");
        }
    } else if sim.monsters[id].leader.is_leashed() {
        sim.monsters[leader].pack_size -= 1;
        sim.monsters[id].leader = LeaderRelation::Separated(leader);
        debug!(%id, %leader, "separated from pack");
    }

    if !sim.monsters[id].leader.is_leashed() {
        return;
    }
    let squelch = sim.monsters[id].squelch;
    let l = &mut sim.monsters[leader];
    if squelch > l.squelch {
        l.last = tile;
        l.squelch = squelch - 1;
    }
    l.try_lift_gargoyle();
}

/// A dying monster frees its leashed minions and leaves its own pack
pub fn update_leader(sim: &mut Simulation, id: MonsterId) {
    let minions: Vec<MonsterId> = sim
        .monsters
        .iter_active()
        .filter(|m| m.leader == LeaderRelation::Leashed(id))
        .map(|m| m.id)
        .collect();
    for minion in minions {
        sim.monsters[minion].leader = LeaderRelation::None;
    }
    if let LeaderRelation::Leashed(leader) = sim.monsters[id].leader {
        sim.monsters[leader].pack_size -= 1;
    }
}

/// Every living fallen within the fear radius of `position` turns and runs
/// away from it. The radius grows with the intelligence of whoever died.
pub fn fallen_fear(sim: &mut Simulation, position: Point, intelligence: i32) {
    let radius = sim.config.fear_radius(intelligence);
    for y in position.y - radius..=position.y + radius {
        for x in position.x - radius..=position.x + radius {
            let p = Point::new(x, y);
            let Some(other) = sim.level.monster_cell(p).id() else {
                continue;
            };
            let m = &mut sim.monsters[other];
            if m.ai != AiKind::Fallen || !m.is_alive() {
                continue;
            }
            let steps = (8 - m.data().level).max(2);
            m.goal = Goal::Retreat {
                steps,
                direction: position.direction_to(m.tile),
            };
            debug!(id = %other, steps, "fallen flees");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::dungeon::{Direction, Level};
    use crate::monster::{Species, add_monster};

    fn sim() -> Simulation {
        let mut level = Level::new(1);
        level.carve_room(Point::new(10, 10), 30, 30, 1);
        Simulation::new(SimConfig::default(), level)
    }

    fn spawn(sim: &mut Simulation, species: Species, at: Point) -> MonsterId {
        let t = sim.monsters.add_type(species, Default::default()).unwrap();
        add_monster(sim, at, Direction::South, t, true).unwrap()
    }

    fn pack(sim: &mut Simulation) -> (MonsterId, MonsterId) {
        let leader = spawn(sim, Species::Zombie, Point::new(15, 15));
        let minion = spawn(sim, Species::Zombie, Point::new(17, 15));
        sim.monsters[minion].leader = LeaderRelation::Leashed(leader);
        sim.monsters[leader].pack_size = 1;
        (leader, minion)
    }

    #[test]
    fn test_minion_follows_leader_alertness() {
        let mut sim = sim();
        let (leader, minion) = pack(&mut sim);
        sim.monsters[leader].squelch = 200;
        follow_the_leader(&mut sim, minion);
        assert_eq!(sim.monsters[minion].squelch, 199);
        assert_eq!(sim.monsters[minion].last, Point::new(15, 15));
    }

    #[test]
    fn test_leader_picks_up_minion_alertness() {
        let mut sim = sim();
        let (leader, minion) = pack(&mut sim);
        sim.monsters[minion].squelch = u8::MAX;
        group_unity(&mut sim, minion);
        assert_eq!(sim.monsters[leader].squelch, u8::MAX - 1);
        assert_eq!(sim.monsters[leader].last, Point::new(17, 15));
    }

    #[test]
    fn test_wall_separates_and_clear_line_rejoins() {
        let mut sim = sim();
        let (leader, minion) = pack(&mut sim);
        sim.level.set_wall(Point::new(16, 15));
        group_unity(&mut sim, minion);
        assert_eq!(sim.monsters[minion].leader, LeaderRelation::Separated(leader));
        assert_eq!(sim.monsters[leader].pack_size, 0);

        sim.level.set_tile_flags(Point::new(16, 15), Default::default());
        group_unity(&mut sim, minion);
        assert_eq!(sim.monsters[minion].leader, LeaderRelation::Leashed(leader));
        assert_eq!(sim.monsters[leader].pack_size, 1);
    }

    #[test]
    fn test_update_leader_releases_minions() {
        let mut sim = sim();
        let (leader, minion) = pack(&mut sim);
        update_leader(&mut sim, leader);
        assert_eq!(sim.monsters[minion].leader, LeaderRelation::None);

        let mut sim = self::sim();
        let (leader, minion) = pack(&mut sim);
        update_leader(&mut sim, minion);
        assert_eq!(sim.monsters[leader].pack_size, 0);
    }

    #[test]
    fn test_fear_reaches_only_fallen_in_radius() {
        let mut sim = sim();
        let near = spawn(&mut sim, Species::FallenSpear, Point::new(18, 15));
        let far = spawn(&mut sim, Species::FallenSpear, Point::new(25, 15));
        let zombie = spawn(&mut sim, Species::Zombie, Point::new(16, 15));
        fallen_fear(&mut sim, Point::new(15, 15), 0);
        assert!(matches!(sim.monsters[near].goal, Goal::Retreat { .. }));
        assert_eq!(sim.monsters[far].goal, Goal::Normal);
        assert_eq!(sim.monsters[zombie].goal, Goal::Normal);
    }
}
