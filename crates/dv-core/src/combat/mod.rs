//! Combat resolution
//!
//! Monster against player (`mhitu`), monster against monster (`mhitm`),
//! player and missile against monster (`uhitm`), plus the shared hit,
//! flinch and death handling.

mod charge;
mod death;
mod hit;
mod mhitm;
mod mhitu;
mod uhitm;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::monster::{Monster, MonsterClass, Resistances, Species};

pub use charge::{ChargeFlight, advance_charges, finish_charge, start_charge};
pub use death::{check_quest_kill, monster_death, spawn_loot, start_death_from_monster, start_kill};
pub use hit::{
    DamageSource, apply_damage, get_knockback, monster_hit_monster, start_hit, start_hit_by_player,
    teleport,
};
pub use mhitm::monster_attack_monster;
pub use mhitu::{check_reflect, monster_attack_enemy, monster_attack_player};
pub use uhitm::{missile_hits_monster, player_hits_monster};

/// Damage element of a missile
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Element {
    #[default]
    Physical,
    Fire,
    Lightning,
    Magic,
    Acid,
}

/// Missiles monsters launch, and the player spells that matter to them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum MissileKind {
    Arrow,
    Firebolt,
    Fireball,
    Flare,
    Acid,
    AcidPuddle,
    ChargedBolt,
    Lightning,
    LightningControl,
    /// Storm demon lightning
    LightningControl2,
    MagmaBall,
    Lich,
    ArchLich,
    Psychorb,
    Necromorb,
    BoneDemon,
    /// Diablo's apocalypse
    Apocalypse,
    /// Flame wave of the mega demons
    FlameWave,
    /// Counselor ring of fire
    Flash,
    Flash2,
    /// Hork demon spawning its brood
    HorkSpawn,
    /// A monster hurling itself at its enemy
    Rhino,
    FireWall,
    LightningWall,
    HolyBolt,
}

impl MissileKind {
    pub fn element(self) -> Element {
        use MissileKind as M;
        match self {
            M::Arrow | M::Rhino | M::HorkSpawn | M::HolyBolt => Element::Physical,
            M::Firebolt | M::Fireball | M::MagmaBall | M::FlameWave | M::FireWall => Element::Fire,
            M::ChargedBolt
            | M::Lightning
            | M::LightningControl
            | M::LightningControl2
            | M::LightningWall => Element::Lightning,
            M::Flare
            | M::Lich
            | M::ArchLich
            | M::Psychorb
            | M::Necromorb
            | M::BoneDemon
            | M::Apocalypse
            | M::Flash
            | M::Flash2 => Element::Magic,
            M::Acid | M::AcidPuddle => Element::Acid,
        }
    }
}

impl Monster {
    /// The missile does no damage to this monster at all
    pub fn is_immune(&self, missile: MissileKind) -> bool {
        let immune = match missile.element() {
            Element::Magic => Resistances::IMMUNE_MAGIC,
            Element::Fire => Resistances::IMMUNE_FIRE,
            Element::Lightning => Resistances::IMMUNE_LIGHTNING,
            Element::Acid => Resistances::IMMUNE_ACID,
            Element::Physical => Resistances::empty(),
        };
        if !immune.is_empty() && self.resistances.contains(immune) {
            return true;
        }
        missile == MissileKind::HolyBolt
            && self.species != Species::Diablo
            && self.data().class != MonsterClass::Undead
    }

    /// The missile's damage is reduced
    pub fn is_resistant(&self, missile: MissileKind, hellfire: bool) -> bool {
        let resist = match missile.element() {
            Element::Magic => Resistances::RESIST_MAGIC,
            Element::Fire => Resistances::RESIST_FIRE,
            Element::Lightning => Resistances::RESIST_LIGHTNING,
            Element::Acid | Element::Physical => Resistances::empty(),
        };
        if !resist.is_empty() && self.resistances.contains(resist) {
            return true;
        }
        hellfire
            && missile == MissileKind::HolyBolt
            && matches!(self.species, Species::Diablo | Species::BoneDemon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monster(species: Species, resistances: Resistances) -> Monster {
        Monster {
            species,
            resistances,
            hit_points: 640,
            ..Monster::default()
        }
    }

    #[test]
    fn test_immunity_by_element() {
        let m = monster(Species::Zombie, Resistances::IMMUNE_FIRE);
        assert!(m.is_immune(MissileKind::Firebolt));
        assert!(!m.is_immune(MissileKind::ChargedBolt));
        assert!(!m.is_immune(MissileKind::Arrow));
    }

    #[test]
    fn test_holy_bolt_only_hurts_undead_and_diablo() {
        let undead = monster(Species::Zombie, Resistances::empty());
        assert!(!undead.is_immune(MissileKind::HolyBolt));
        let demon = monster(Species::Succubus, Resistances::empty());
        assert!(demon.is_immune(MissileKind::HolyBolt));
        let diablo = monster(Species::Diablo, Resistances::empty());
        assert!(!diablo.is_immune(MissileKind::HolyBolt));
        assert!(diablo.is_resistant(MissileKind::HolyBolt, true));
        assert!(!diablo.is_resistant(MissileKind::HolyBolt, false));
    }

    #[test]
    fn test_resistance_by_element() {
        let m = monster(Species::Zombie, Resistances::RESIST_LIGHTNING);
        assert!(m.is_resistant(MissileKind::Lightning, false));
        assert!(!m.is_resistant(MissileKind::Fireball, false));
        assert!(!m.is_resistant(MissileKind::Acid, false));
    }
}
