//! Property tests for the invariants every tick must keep
//!
//! - the active list never repeats an id or holds a deleted monster
//! - every standing monster owns exactly its own tile
//! - damage never heals and never exceeds what was dealt

use std::collections::HashSet;

use proptest::prelude::*;

use dv_core::combat::{DamageSource, MissileKind, apply_damage};
use dv_core::dungeon::MonsterCell;
use dv_core::monster::{ModeKind, MonsterId, Resistances, Species, add_monster};
use dv_core::{
    ArenaBuilder, DMAXX, DMAXY, Direction, HP_UNIT, Player, PlayerId, Point, SimConfig,
    Simulation,
};

const ROSTER: [Species; 6] = [
    Species::Zombie,
    Species::FallenSpear,
    Species::Skeleton,
    Species::Scavenger,
    Species::Fiend,
    Species::SkeletonArcher,
];

fn populated(seed: u32, depth: u8, pillars: u32) -> Simulation {
    let config = SimConfig {
        seed,
        dungeon_level: depth,
        ..SimConfig::default()
    };
    let arena = ArenaBuilder::new(depth)
        .pillars(pillars)
        .layout_seed(u64::from(seed))
        .lit(false);
    let mut sim = Simulation::new(config, arena.build());
    sim.add_player(PlayerId(0), Player::new("hero", Point::new(26, 36)));
    sim.init_monsters().expect("arena populates");
    arena.light(&mut sim.level);
    sim
}

fn check_active_list(sim: &Simulation) -> Result<(), TestCaseError> {
    let mut seen = HashSet::new();
    for &id in sim.monsters.active_ids() {
        prop_assert!(seen.insert(id), "{id} listed twice");
        prop_assert!(!sim.monsters[id].delete_pending, "{id} left pending");
    }
    Ok(())
}

fn check_spatial(sim: &Simulation) -> Result<(), TestCaseError> {
    let mut claimed = HashSet::new();
    for m in sim.monsters.iter_active() {
        if m.is_parked() || !m.is_alive() || m.is_walking() || m.mode.kind() == ModeKind::Charge {
            continue;
        }
        prop_assert_eq!(sim.level.monster_cell(m.tile), MonsterCell::Standing(m.id));
        prop_assert!(claimed.insert(m.tile), "two monsters on {}", m.tile);
    }
    for x in 0..DMAXX as i32 {
        for y in 0..DMAXY as i32 {
            let p = Point::new(x, y);
            if let MonsterCell::Standing(id) = sim.level.monster_cell(p) {
                prop_assert!(
                    sim.monsters.active_ids().contains(&id),
                    "{p} held by inactive {id}"
                );
            }
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_ticks_keep_lists_and_grid_consistent(
        seed in any::<u32>(),
        depth in 1u8..=8,
        pillars in 0u32..40,
        ticks in 10usize..80,
    ) {
        let mut sim = populated(seed, depth, pillars);
        check_active_list(&sim)?;
        check_spatial(&sim)?;
        for _ in 0..ticks {
            sim.process_monsters();
            check_active_list(&sim)?;
            check_spatial(&sim)?;
        }
    }

    #[test]
    fn prop_kills_are_removed_cleanly(
        seed in any::<u32>(),
        victims in proptest::collection::vec(0usize..64, 1..12),
    ) {
        let mut sim = populated(seed, 2, 0);
        let live: Vec<MonsterId> = sim
            .monsters
            .iter_active()
            .filter(|m| !m.is_parked() && m.is_alive())
            .map(|m| m.id)
            .collect();
        prop_assume!(!live.is_empty());
        for i in victims {
            let id = live[i % live.len()];
            apply_damage(&mut sim, id, DamageSource::World, 10_000 * HP_UNIT, None);
        }
        for _ in 0..60 {
            sim.process_monsters();
            check_active_list(&sim)?;
            check_spatial(&sim)?;
        }
        for m in sim.monsters.iter_active() {
            prop_assert!(m.is_parked() || m.is_alive() || m.mode.kind() == ModeKind::Death);
        }
    }

    #[test]
    fn prop_damage_never_heals(
        species in proptest::sample::select(ROSTER.to_vec()),
        hit_points in 1i32..2_000,
        amount in 1i32..200_000,
        resistance in 0usize..3,
        fire in any::<bool>(),
    ) {
        let level = ArenaBuilder::default().build();
        let mut sim = Simulation::new(SimConfig::default(), level);
        let t = sim.monsters.add_type(species, Default::default()).expect("type loads");
        let id = add_monster(&mut sim, Point::new(30, 30), Direction::South, t, true)
            .expect("slot free");
        let m = &mut sim.monsters[id];
        m.hit_points = hit_points * HP_UNIT;
        m.max_hit_points = hit_points * HP_UNIT;
        m.resistances = [
            Resistances::empty(),
            Resistances::RESIST_FIRE,
            Resistances::IMMUNE_FIRE,
        ][resistance];
        let before = m.hit_points;
        let missile = fire.then_some(MissileKind::Fireball);

        let dealt = apply_damage(&mut sim, id, DamageSource::World, amount, missile);

        let after = sim.monsters[id].hit_points;
        prop_assert!(after <= before);
        prop_assert!(dealt >= 0 && dealt <= amount);
        prop_assert_eq!(after, (before - dealt).max(0));
        if fire && resistance == 2 {
            prop_assert_eq!(dealt, 0);
        }
        if fire && resistance == 1 {
            prop_assert_eq!(dealt, amount >> 2);
        }
        if after == 0 {
            prop_assert_eq!(sim.monsters[id].mode.kind(), ModeKind::Death);
        }
    }
}
