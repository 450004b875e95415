//! Monster death: experience, kill counts, loot, quest completion and the
//! switch into the death animation

use tracing::debug;

use crate::dungeon::{Direction, MonsterCell};
use crate::monster::{
    Goal, Mode, MonsterGraphic, MonsterId, Species, UniqueMonster, fallen_fear, new_monster_anim,
    start_stand,
};
use crate::sim::Simulation;
use crate::world::{
    GlobalSound, ItemDrop, MonsterSound, PlayerId, QuestId, QuestStatus, SimEvent,
};

/// Quest progress marker for a slain Lazarus
const BETRAYER_DEFEATED: i32 = 7;

/// Split the monster's experience among the players who hit it
fn award_experience(sim: &mut Simulation, id: MonsterId) {
    let m = &sim.monsters[id];
    let (level, exp, who_hit) = (m.level, m.exp, m.who_hit);
    let earners: Vec<PlayerId> = PlayerId::all()
        .filter(|p| who_hit & p.bit() != 0 && sim.players[p.index()].active)
        .collect();
    if earners.is_empty() {
        return;
    }
    let share = exp / earners.len() as i32;
    let multiplayer = sim.config.multiplayer;
    for player in earners {
        let amount = sim.players[player.index()].add_experience(level, share, multiplayer);
        sim.emit(SimEvent::Experience { player, amount });
    }
}

/// Request the monster's drop from the loot collaborator
pub fn spawn_loot(sim: &mut Simulation, id: MonsterId) {
    let m = &sim.monsters[id];
    let (tile, unique, species, seed) = (m.tile, m.unique, m.species, m.loot_seed);
    let drop = match (species, unique) {
        (Species::HorkSpawn | Species::Golem, _) => return,
        (_, Some(UniqueMonster::Gharbad)) if sim.quests[QuestId::Garbud].is_available() => {
            sim.emit(SimEvent::Loot {
                tile: tile + Direction::South,
                drop: ItemDrop::Mace,
            });
            return;
        }
        (Species::HorkDemon, _) => ItemDrop::Amulet,
        _ => ItemDrop::Random { seed },
    };
    sim.emit(SimEvent::Loot { tile, drop });
}

/// Diablo takes every other aware monster on the level with him
fn diablo_death(sim: &mut Simulation, diablo: MonsterId) {
    sim.emit(SimEvent::GlobalSound(GlobalSound::DiabloDeath));
    sim.quests[QuestId::Diablo].status = QuestStatus::Done;
    sim.announce_quest(QuestId::Diablo);

    let doomed: Vec<MonsterId> = sim
        .monsters
        .iter_active()
        .filter(|m| m.id != diablo && !m.is_golem() && m.squelch != 0 && m.is_alive())
        .map(|m| m.id)
        .collect();
    for id in doomed {
        let m = &mut sim.monsters[id];
        let dir = m.direction;
        new_monster_anim(m, MonsterGraphic::Death, dir);
        m.mode = Mode::Death { ticks: 0 };
        m.hit_points = 0;
        m.tile = m.old;
        m.future = m.tile;
        let tile = m.tile;
        sim.level.clear_monster_squares(id, tile);
        sim.level.set_monster(tile, MonsterCell::Standing(id));
    }
}

/// Complete the quest tied to a slain unique
pub fn check_quest_kill(sim: &mut Simulation, id: MonsterId) {
    let Some(unique) = sim.monsters[id].unique else {
        return;
    };
    let Some(quest) = unique.data().quest else {
        return;
    };
    sim.quests[quest].status = QuestStatus::Done;
    match quest {
        QuestId::Betrayer => {
            sim.quests[quest].var1 = BETRAYER_DEFEATED;
            sim.quests[QuestId::Diablo].activate();
            sim.announce_quest(QuestId::Diablo);
            sim.emit(SimEvent::MapChanged { quest });
        }
        QuestId::Warlord => sim.emit(SimEvent::MapChanged { quest }),
        _ => {}
    }
    sim.announce_quest(quest);
}

/// Everything that happens the moment a monster dies, facing `direction`
pub fn monster_death(sim: &mut Simulation, id: MonsterId, direction: Direction) {
    if !sim.monsters[id].is_golem() {
        award_experience(sim, id);
    }
    let m = &mut sim.monsters[id];
    let species = m.species;
    sim.kills.record(species);
    m.hit_points = 0;

    let seed = m.loot_seed;
    sim.rng.set_seed(seed);
    spawn_loot(sim, id);

    if species == Species::Diablo {
        diablo_death(sim, id);
    } else {
        sim.play_effect(id, MonsterSound::Death);
    }

    let tile = sim.monsters[id].tile;
    sim.emit(SimEvent::MonsterKilled { id, species, tile });
    debug!(%id, ?species, %tile, "monster killed");

    let m = &mut sim.monsters[id];
    if m.mode != Mode::Petrified {
        let dir = if m.is_golem() {
            Direction::South
        } else {
            direction
        };
        new_monster_anim(m, MonsterGraphic::Death, dir);
        m.mode = Mode::Death { ticks: 0 };
    }
    m.goal = Goal::None;
    m.tile = m.old;
    m.future = m.old;
    let (tile, intelligence) = (m.tile, m.intelligence);
    sim.level.clear_monster_squares(id, tile);
    sim.level.set_monster(tile, MonsterCell::Standing(id));

    check_quest_kill(sim, id);
    fallen_fear(sim, tile, intelligence);
    if species.is_acid() {
        sim.emit(SimEvent::AcidPuddle { tile });
    }
}

/// Kill a monster outright, facing the player who did it if any
pub fn start_kill(sim: &mut Simulation, id: MonsterId, player: Option<PlayerId>) {
    let m = &sim.monsters[id];
    let direction = match player {
        Some(pid) => m.tile.direction_to(sim.players[pid.index()].tile),
        None => m.direction,
    };
    if let Some(pid) = player {
        sim.monsters[id].who_hit |= pid.bit();
    }
    monster_death(sim, id, direction);
}

/// `killer` finished off `target`. Golem kills count for the owner.
pub fn start_death_from_monster(sim: &mut Simulation, killer: MonsterId, target: MonsterId) {
    let k = &sim.monsters[killer];
    let owner = k.is_golem().then(|| killer.golem_owner()).flatten();
    let direction = sim.monsters[target].tile.direction_to(k.tile);
    if let Some(owner) = owner {
        sim.monsters[target].who_hit |= owner.bit();
    }
    monster_death(sim, target, direction);
    if sim.config.hellfire {
        let dir = sim.monsters[killer].direction;
        start_stand(sim, killer, dir);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HP_UNIT;
    use crate::dungeon::Point;
    use crate::monster::{Enemy, ModeKind, place_unique};
    use crate::testing::{arena, spawn};
    use crate::world::{Player, Quests};

    fn with_players(sim: &mut Simulation, n: u8) {
        for i in 0..n {
            let mut p = Player::new(format!("p{i}"), Point::new(30 + i as i32, 35));
            p.level = 1;
            sim.add_player(PlayerId(i), p);
        }
    }

    fn unique_at(sim: &mut Simulation, unique: UniqueMonster) -> MonsterId {
        sim.monsters
            .add_type(unique.data().species, Default::default())
            .unwrap();
        place_unique(sim, unique, 0, 0, Some(Point::new(20, 20))).unwrap()
    }

    #[test]
    fn test_kill_awards_experience_and_counts() {
        let mut sim = arena();
        with_players(&mut sim, 1);
        let id = spawn(&mut sim, Species::Zombie, Point::new(20, 20));
        sim.monsters[id].level = 1;
        sim.monsters[id].exp = 54;
        start_kill(&mut sim, id, Some(PlayerId(0)));

        assert_eq!(sim.kills.get(Species::Zombie), 1);
        assert_eq!(sim.monsters[id].hit_points, 0);
        assert_eq!(sim.monsters[id].mode.kind(), ModeKind::Death);
        assert_eq!(sim.monsters[id].goal, Goal::None);
        assert_eq!(sim.players[0].experience, 54);
        assert!(sim.events().iter().any(|e| matches!(
            e,
            SimEvent::Loot {
                drop: ItemDrop::Random { .. },
                ..
            }
        )));
    }

    #[test]
    fn test_experience_is_split_between_hitters() {
        let mut sim = arena();
        with_players(&mut sim, 2);
        let id = spawn(&mut sim, Species::Zombie, Point::new(20, 20));
        sim.monsters[id].level = 1;
        sim.monsters[id].exp = 100;
        sim.monsters[id].who_hit = PlayerId(1).bit();
        start_kill(&mut sim, id, Some(PlayerId(0)));
        assert_eq!(sim.players[0].experience, 50);
        assert_eq!(sim.players[1].experience, 50);
    }

    #[test]
    fn test_monster_kill_gives_no_experience() {
        let mut sim = arena();
        with_players(&mut sim, 1);
        let killer = spawn(&mut sim, Species::Zombie, Point::new(20, 20));
        let victim = spawn(&mut sim, Species::Zombie, Point::new(21, 20));
        start_death_from_monster(&mut sim, killer, victim);
        assert_eq!(sim.players[0].experience, 0);
        assert_eq!(sim.monsters[victim].mode.kind(), ModeKind::Death);
        assert_eq!(sim.monsters[victim].direction, Direction::NorthWest);
    }

    #[test]
    fn test_golem_kill_credits_owner() {
        let mut sim = arena();
        with_players(&mut sim, 1);
        crate::monster::init_golems(&mut sim).unwrap();
        let golem = crate::monster::spawn_golem(&mut sim, PlayerId(0), Point::new(20, 20), 1)
            .unwrap();
        let victim = spawn(&mut sim, Species::Zombie, Point::new(21, 20));
        sim.monsters[victim].exp = 40;
        sim.monsters[victim].level = 1;
        start_death_from_monster(&mut sim, golem, victim);
        assert_eq!(sim.players[0].experience, 40);
    }

    #[test]
    fn test_spawns_are_not_looted() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::HorkSpawn, Point::new(20, 20));
        start_kill(&mut sim, id, None);
        assert!(!sim.events().iter().any(|e| matches!(e, SimEvent::Loot { .. })));
    }

    #[test]
    fn test_acid_beast_leaves_puddle() {
        let mut sim = arena();
        let id = spawn(&mut sim, Species::AcidBeast, Point::new(20, 20));
        start_kill(&mut sim, id, None);
        assert!(sim.events().contains(&SimEvent::AcidPuddle {
            tile: Point::new(20, 20)
        }));
    }

    #[test]
    fn test_gharbad_drops_mace_while_quest_runs() {
        let mut sim = arena();
        sim.quests = Quests::all_initialised();
        let id = unique_at(&mut sim, UniqueMonster::Gharbad);
        start_kill(&mut sim, id, None);
        let tile = sim.monsters[id].tile;
        assert!(sim.events().contains(&SimEvent::Loot {
            tile: tile + Direction::South,
            drop: ItemDrop::Mace,
        }));
        assert_eq!(sim.quests[QuestId::Garbud].status, QuestStatus::Done);
    }

    #[test]
    fn test_warlord_kill_changes_map() {
        let mut sim = arena();
        sim.quests = Quests::all_initialised();
        let id = unique_at(&mut sim, UniqueMonster::Warlord);
        start_kill(&mut sim, id, None);
        assert_eq!(sim.quests[QuestId::Warlord].status, QuestStatus::Done);
        assert!(sim.events().contains(&SimEvent::MapChanged {
            quest: QuestId::Warlord
        }));
    }

    #[test]
    fn test_diablo_takes_aware_monsters_along() {
        let mut sim = arena();
        let diablo = spawn(&mut sim, Species::Diablo, Point::new(20, 20));
        let aware = spawn(&mut sim, Species::Zombie, Point::new(25, 25));
        let asleep = spawn(&mut sim, Species::Zombie, Point::new(30, 30));
        sim.monsters[aware].squelch = 200;
        sim.monsters[aware].enemy = Some(Enemy::Player(PlayerId(0)));
        sim.monsters[aware].hit_points = 10 * HP_UNIT;
        sim.monsters[asleep].squelch = 0;

        start_kill(&mut sim, diablo, None);

        assert_eq!(sim.monsters[aware].mode.kind(), ModeKind::Death);
        assert_eq!(sim.monsters[aware].hit_points, 0);
        assert_ne!(sim.monsters[asleep].mode.kind(), ModeKind::Death);
        assert_eq!(sim.quests[QuestId::Diablo].status, QuestStatus::Done);
        assert!(sim
            .events()
            .contains(&SimEvent::GlobalSound(GlobalSound::DiabloDeath)));
    }
}
