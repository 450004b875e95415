//! Monster attacks player

use tracing::{debug, trace};

use super::hit::{DamageSource, react_to_wound, wound};
use super::monster_attack_monster;
use crate::monster::{Enemy, MonsterClass, MonsterFlags, MonsterId, Species, start_stand};
use crate::sim::Simulation;
use crate::world::{ItemEffects, PlayerId, PlayerMode, SimEvent};
use crate::{HP_SHIFT, HP_UNIT};

/// Armour bonus from items against a monster class
const AC_VS_DEMONS: i32 = 40;
const AC_VS_UNDEAD: i32 = 20;

/// Floor on a monster's chance to hit at the deepest levels
fn min_to_hit(depth: u8) -> i32 {
    match depth {
        0..=13 => 15,
        14 => 20,
        15 => 25,
        _ => 30,
    }
}

/// Swing at whatever the monster is fighting
pub fn monster_attack_enemy(
    sim: &mut Simulation,
    id: MonsterId,
    to_hit: i32,
    min_damage: i32,
    max_damage: i32,
) {
    match sim.monsters[id].enemy {
        Some(Enemy::Monster(target)) => {
            monster_attack_monster(sim, id, target, to_hit, min_damage, max_damage);
        }
        Some(Enemy::Player(player)) => {
            monster_attack_player(sim, id, player, to_hit, min_damage, max_damage);
        }
        None => {}
    }
}

/// Bounce part of a blow back at the monster through the player's
/// reflect charges. Returns the fixed-point damage reflected.
pub fn check_reflect(sim: &mut Simulation, id: MonsterId, player: PlayerId, damage: i32) -> i32 {
    let p = &mut sim.players[player.index()];
    if p.reflections <= 0 {
        return 0;
    }
    p.reflections -= 1;
    let reflected = damage * (sim.rng.generate(10) + 20) / 100;
    if sim.monsters[id].is_alive() {
        let dead = wound(sim, id, reflected);
        react_to_wound(sim, id, DamageSource::Player(player), reflected, dead);
    }
    reflected
}

/// Fixed-point damage roll with the player's damage-taken modifier
fn roll_damage(sim: &mut Simulation, player: PlayerId, min_damage: i32, max_damage: i32) -> i32 {
    let spread = ((max_damage - min_damage) << HP_SHIFT) + 1;
    let base = (min_damage << HP_SHIFT) + sim.rng.generate(spread);
    let get_hit = sim.players[player.index()].get_hit;
    (base + (get_hit << HP_SHIFT)).max(HP_UNIT)
}

/// One melee swing of a monster at a player. Returns true on a hit.
pub fn monster_attack_player(
    sim: &mut Simulation,
    id: MonsterId,
    player: PlayerId,
    to_hit: i32,
    min_damage: i32,
    max_damage: i32,
) -> bool {
    let m = &sim.monsters[id];
    let p = &sim.players[player.index()];
    if !p.active || p.is_dead() || p.invincible || p.ethereal {
        return false;
    }
    if m.tile.walking_distance(p.tile) >= 2 {
        return false;
    }

    let roll = sim.rng.generate(100);
    let m = &sim.monsters[id];
    let p = &sim.players[player.index()];
    let mut armor = p.armor_class;
    let class = m.data().class;
    if p.effects.contains(ItemEffects::AC_AGAINST_DEMONS) && class == MonsterClass::Demon {
        armor += AC_VS_DEMONS;
    }
    if p.effects.contains(ItemEffects::AC_AGAINST_UNDEAD) && class == MonsterClass::Undead {
        armor += AC_VS_UNDEAD;
    }
    let chance =
        (to_hit + 2 * (m.level - p.level) + 30 - armor).max(min_to_hit(sim.level.depth));

    let may_block = p.can_block();
    let block_chance = (p.block_chance - 2 * m.level).clamp(0, 100);
    let block_roll = if may_block {
        sim.rng.generate(100)
    } else {
        100
    };
    if roll >= chance {
        trace!(%id, %player, roll, chance, "monster missed player");
        return false;
    }

    let (monster_tile, species, flags, direction) = {
        let m = &sim.monsters[id];
        (m.tile, m.species, m.flags, m.direction)
    };

    if block_roll < block_chance {
        let p = &mut sim.players[player.index()];
        p.mode = PlayerMode::Block;
        p.direction = p.tile.direction_to(monster_tile);
        sim.emit(SimEvent::PlayerBlocked { player, by: id });
        if sim.players[player.index()].reflections > 0 {
            let damage = roll_damage(sim, player, min_damage, max_damage);
            check_reflect(sim, id, player, damage);
        }
        return true;
    }

    if species == Species::BlackDeath {
        let p = &mut sim.players[player.index()];
        if p.max_hit_points > HP_UNIT {
            p.drain_max_hit_points(HP_UNIT);
        }
    }

    let mut damage = roll_damage(sim, player, min_damage, max_damage);
    if sim.players[player.index()].reflections > 0 {
        damage = (damage - check_reflect(sim, id, player, damage)).max(0);
    }
    let killed = sim.players[player.index()].take_damage(damage);
    sim.emit(SimEvent::PlayerHit {
        player,
        by: id,
        damage,
    });

    let thorns = sim.players[player.index()]
        .effects
        .contains(ItemEffects::THORNS);
    if thorns && sim.monsters[id].is_alive() {
        let spikes = (sim.rng.generate(3) + 1) << HP_SHIFT;
        let dead = wound(sim, id, spikes);
        react_to_wound(sim, id, DamageSource::Player(player), spikes, dead);
    }

    if !flags.contains(MonsterFlags::NO_LIFESTEAL)
        && species == Species::SkeletonKing
        && sim.config.multiplayer
        && sim.monsters[id].is_alive()
    {
        let m = &mut sim.monsters[id];
        m.hit_points = (m.hit_points + damage).min(m.max_hit_points);
    }

    if killed {
        debug!(%player, %id, "player slain");
        sim.emit(SimEvent::PlayerDied { player });
        if sim.config.hellfire && sim.monsters[id].is_alive() {
            start_stand(sim, id, direction);
        }
        return true;
    }

    sim.players[player.index()].mode = PlayerMode::GotHit;
    if flags.contains(MonsterFlags::KNOCKBACK) {
        let to = sim.players[player.index()].tile + direction;
        if sim.level.is_tile_available(to) {
            sim.move_player(player, to);
            sim.emit(SimEvent::PlayerKnockedBack { player, to });
        }
    }
    true
}
