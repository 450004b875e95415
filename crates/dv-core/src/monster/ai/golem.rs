//! Player-summoned golems hunt the nearest monster and otherwise follow
//! their owner around

use crate::SQUELCH_MAX;
use crate::dungeon::Point;
use crate::monster::movement::{PATH_COUNT_PLAN, PATH_COUNT_RESET};
use crate::monster::{
    Enemy, Mode, ModeKind, MonsterId, dir_ok, plan_path, random_walk, start_attack, update_enemy,
    walk,
};
use crate::sim::Simulation;

/// Wake every monster in the 5x5 square around `center`
fn rouse_around(sim: &mut Simulation, center: Point) {
    for y in center.y - 2..=center.y + 2 {
        for x in center.x - 2..=center.x + 2 {
            let p = Point::new(x, y);
            if !p.in_bounds() {
                continue;
            }
            if let Some(other) = sim.level.monster_cell(p).id() {
                sim.monsters[other].squelch = SQUELCH_MAX;
            }
        }
    }
}

pub(super) fn golem(sim: &mut Simulation, id: MonsterId) {
    let g = &sim.monsters[id];
    if g.is_parked()
        || matches!(g.mode.kind(), ModeKind::Death | ModeKind::SpecialStand)
        || g.is_walking()
    {
        return;
    }
    if !g.targets_monster() {
        update_enemy(sim, id);
    }
    if sim.monsters[id].mode == Mode::MeleeAttack {
        return;
    }

    if let Some(Enemy::Monster(target)) = sim.monsters[id].enemy {
        let (enemy_tile, enemy_future, enemy_asleep) = {
            let e = &sim.monsters[target];
            (e.tile, e.future, e.squelch == 0)
        };
        let g = &mut sim.monsters[id];
        let tile = g.tile;
        g.direction = tile.direction_to(enemy_tile);
        let d = tile - enemy_future;
        if d.dx.abs() < 2 && d.dy.abs() < 2 {
            g.enemy_position = enemy_tile;
            if enemy_asleep {
                let e = &mut sim.monsters[target];
                e.squelch = SQUELCH_MAX;
                e.last = tile;
                rouse_around(sim, tile);
            }
            start_attack(&mut sim.monsters[id]);
            return;
        }
        if plan_path(sim, id) {
            return;
        }
    }

    let g = &mut sim.monsters[id];
    g.path_count += 1;
    if g.path_count > PATH_COUNT_RESET {
        g.path_count = PATH_COUNT_PLAN;
    }

    let heel = id
        .golem_owner()
        .map(|owner| sim.players[owner.index()].direction)
        .unwrap_or(sim.monsters[id].direction);
    if random_walk(sim, id, heel) {
        return;
    }

    let start = sim.monsters[id].direction.left();
    let mut md = start;
    for _ in 0..8 {
        md = md.right();
        if dir_ok(sim, id, md) {
            walk(sim, id, md);
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Direction;
    use crate::monster::{Species, init_golems, spawn_golem};
    use crate::testing::{arena, spawn};
    use crate::world::{Player, PlayerId};

    fn summon(sim: &mut Simulation, at: Point) -> MonsterId {
        init_golems(sim).unwrap();
        sim.add_player(PlayerId(0), Player::new("hero", Point::new(30, 30)));
        let id = spawn_golem(sim, PlayerId(0), at, 1).unwrap();
        let dir = sim.monsters[id].direction;
        crate::monster::start_stand(sim, id, dir);
        id
    }

    #[test]
    fn test_parked_golem_does_nothing() {
        let mut sim = arena();
        init_golems(&mut sim).unwrap();
        let id = MonsterId::golem_of(PlayerId(1));
        golem(&mut sim, id);
        assert!(sim.monsters[id].is_parked());
        assert_eq!(sim.monsters[id].mode.kind(), ModeKind::Stand);
    }

    #[test]
    fn test_golem_attacks_adjacent_monster_and_wakes_the_area() {
        let mut sim = arena();
        let id = summon(&mut sim, Point::new(20, 20));
        let victim = spawn(&mut sim, Species::Zombie, Point::new(21, 20));
        let bystander = spawn(&mut sim, Species::Zombie, Point::new(18, 22));
        sim.monsters[victim].squelch = 0;
        sim.monsters[bystander].squelch = 0;

        golem(&mut sim, id);

        assert_eq!(sim.monsters[id].enemy, Some(Enemy::Monster(victim)));
        assert_eq!(sim.monsters[id].mode, Mode::MeleeAttack);
        assert_eq!(sim.monsters[id].direction, Direction::SouthEast);
        assert_eq!(sim.monsters[victim].squelch, SQUELCH_MAX);
        assert_eq!(sim.monsters[victim].last, Point::new(20, 20));
        assert_eq!(sim.monsters[bystander].squelch, SQUELCH_MAX);
    }

    #[test]
    fn test_golem_heads_for_distant_monster() {
        let mut sim = arena();
        let id = summon(&mut sim, Point::new(15, 15));
        spawn(&mut sim, Species::Zombie, Point::new(30, 15));
        golem(&mut sim, id);
        assert!(sim.monsters[id].is_walking());
    }

    #[test]
    fn test_golem_without_enemies_follows_owner_heading() {
        let mut sim = arena();
        let id = summon(&mut sim, Point::new(20, 20));
        sim.players[0].direction = Direction::South;
        golem(&mut sim, id);
        assert!(sim.monsters[id].is_walking());
        assert_eq!(sim.monsters[id].path_count, 1);
    }
}
