//! Player and missile attacks on monsters

use tracing::trace;

use super::hit::{DamageSource, apply_damage, get_knockback, start_hit_by_player, wound};
use super::{MissileKind, start_kill};
use crate::HP_SHIFT;
use crate::monster::{Mode, MonsterClass, MonsterId};
use crate::sim::Simulation;
use crate::world::{ItemEffects, PlayerId, WeaponClass};

/// Percent of dealt damage returned by the steal-life and steal-mana
/// affixes
fn stolen(effects: ItemEffects, three: ItemEffects, five: ItemEffects, damage: i32) -> i32 {
    if effects.contains(five) {
        damage * 5 / 100
    } else if effects.contains(three) {
        damage * 3 / 100
    } else {
        0
    }
}

/// Swords bite flesh and glance off bone; maces the other way round
fn weapon_matchup(weapon: WeaponClass, class: MonsterClass, damage: i32) -> i32 {
    match (weapon, class) {
        (WeaponClass::Sword, MonsterClass::Undead) | (WeaponClass::Mace, MonsterClass::Animal) => {
            damage / 2
        }
        (WeaponClass::Sword, MonsterClass::Animal) | (WeaponClass::Mace, MonsterClass::Undead) => {
            damage * 2
        }
        _ => damage,
    }
}

/// One melee swing of a player at a monster. Returns true when the blow
/// connected.
pub fn player_hits_monster(sim: &mut Simulation, player: PlayerId, id: MonsterId) -> bool {
    let m = &mut sim.monsters[id];
    if !m.is_possible_to_hit() {
        return false;
    }
    if m.try_lift_gargoyle() {
        return true;
    }
    let petrified = m.mode == Mode::Petrified;
    let (armor, class) = (m.armor_class, m.data().class);

    let roll = if petrified {
        0
    } else {
        sim.rng.generate(100)
    };
    let p = &sim.players[player.index()];
    let chance = (p.to_hit - armor).clamp(5, 95);
    if roll >= chance {
        trace!(%player, %id, roll, chance, "player missed");
        return false;
    }

    let (min, max, weapon, effects) = (p.min_damage, p.max_damage, p.weapon, p.effects);
    let mut damage = min + sim.rng.generate(max - min + 1);
    damage = weapon_matchup(weapon, class, damage);
    if effects.contains(ItemEffects::TRIPLE_DEMON_DAMAGE) && class == MonsterClass::Demon {
        damage *= 3;
    }
    let damage = damage << HP_SHIFT;

    let p = &mut sim.players[player.index()];
    p.restore_mana(stolen(
        effects,
        ItemEffects::STEAL_MANA_3,
        ItemEffects::STEAL_MANA_5,
        damage,
    ));
    p.heal(stolen(
        effects,
        ItemEffects::STEAL_LIFE_3,
        ItemEffects::STEAL_LIFE_5,
        damage,
    ));

    if wound(sim, id, damage) {
        start_kill(sim, id, Some(player));
    } else {
        if !petrified && effects.contains(ItemEffects::KNOCKBACK) {
            get_knockback(sim, id);
        }
        start_hit_by_player(sim, id, player, damage);
    }
    true
}

/// A missile reached the monster's tile. Returns true when it did any
/// damage; immune monsters let it through untouched.
pub fn missile_hits_monster(
    sim: &mut Simulation,
    id: MonsterId,
    source: DamageSource,
    kind: MissileKind,
    damage: i32,
) -> bool {
    apply_damage(sim, id, source, damage, Some(kind)) > 0
}
