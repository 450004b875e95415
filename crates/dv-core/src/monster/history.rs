//! Kill tally and the lore lines it unlocks

use serde::{Deserialize, Serialize};
use strum::EnumCount;

use super::{Monster, Resistances, Species};
use crate::config::SimConfig;
use crate::{HP_SHIFT, HP_UNIT};

/// Kills before the hit point range is shown
const KILLS_FOR_HIT_POINTS: u32 = 30;
/// Kills before resistances are shown
const KILLS_FOR_RESISTANCES: u32 = 15;

const RESISTS: Resistances = Resistances::RESIST_MAGIC
    .union(Resistances::RESIST_FIRE)
    .union(Resistances::RESIST_LIGHTNING);
const IMMUNITIES: Resistances = Resistances::IMMUNE_MAGIC
    .union(Resistances::IMMUNE_FIRE)
    .union(Resistances::IMMUNE_LIGHTNING);

/// Monsters killed so far, per species
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillCounts(Vec<u32>);

impl Default for KillCounts {
    fn default() -> Self {
        Self(vec![0; Species::COUNT])
    }
}

impl KillCounts {
    pub fn record(&mut self, species: Species) {
        self.0[species as usize] = self.0[species as usize].saturating_add(1);
    }

    pub fn get(&self, species: Species) -> u32 {
        self.0[species as usize]
    }
}

fn element_list(res: Resistances, magic: Resistances, fire: Resistances, lightning: Resistances) -> String {
    let mut out = String::new();
    for (flag, name) in [(magic, " Magic"), (fire, " Fire"), (lightning, " Lightning")] {
        if res.contains(flag) {
            out.push_str(name);
        }
    }
    out
}

/// Lore panel lines for a species, revealing more as the kill count grows
pub fn monster_history(species: Species, kills: &KillCounts, config: &SimConfig) -> Vec<String> {
    let data = species.data();
    let count = kills.get(species);
    let mut lines = vec![format!("Total kills: {count}")];

    if count >= KILLS_FOR_HIT_POINTS {
        let mut min_hp = data.min_hp;
        let mut max_hp = data.max_hp;
        if !config.hellfire && species == Species::Diablo {
            min_hp /= 2;
            max_hp /= 2;
        }
        if !config.multiplayer {
            min_hp /= 2;
            max_hp /= 2;
        }
        let scaling = config.scaling();
        let scale = |hp: i32| {
            scaling.max_hit_points(hp.max(1) * HP_UNIT, config.hellfire, config.multiplayer)
                >> HP_SHIFT
        };
        lines.push(format!("Hit Points: {}-{}", scale(min_hp), scale(max_hp)));
    }

    if count >= KILLS_FOR_RESISTANCES {
        let res = if config.scaling().hell_resistances {
            data.resistances_hell
        } else {
            data.resistances
        };
        if !res.intersects(RESISTS | IMMUNITIES) {
            lines.push("No magic resistance".to_owned());
        } else {
            if res.intersects(RESISTS) {
                lines.push(format!(
                    "Resists:{}",
                    element_list(
                        res,
                        Resistances::RESIST_MAGIC,
                        Resistances::RESIST_FIRE,
                        Resistances::RESIST_LIGHTNING
                    )
                ));
            }
            if res.intersects(IMMUNITIES) {
                lines.push(format!(
                    "Immune:{}",
                    element_list(
                        res,
                        Resistances::IMMUNE_MAGIC,
                        Resistances::IMMUNE_FIRE,
                        Resistances::IMMUNE_LIGHTNING
                    )
                ));
            }
        }
    }
    lines
}

/// Uniques only hint at their resistances
pub fn unique_history(m: &Monster) -> Vec<String> {
    let res = m.resistances;
    let resist = if res.intersects(RESISTS) {
        "Some Magic Resistances"
    } else {
        "No resistances"
    };
    let immune = if res.intersects(IMMUNITIES) {
        "Some Magic Immunities"
    } else {
        "No Immunities"
    };
    vec![resist.to_owned(), immune.to_owned()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Difficulty;

    #[test]
    fn test_history_unlocks_with_kills() {
        let config = SimConfig::default();
        let mut kills = KillCounts::default();
        assert_eq!(monster_history(Species::Zombie, &kills, &config).len(), 1);
        for _ in 0..15 {
            kills.record(Species::Zombie);
        }
        let lines = monster_history(Species::Zombie, &kills, &config);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "No magic resistance");
        for _ in 0..15 {
            kills.record(Species::Zombie);
        }
        let lines = monster_history(Species::Zombie, &kills, &config);
        // single player halves 4-7 to 2-3
        assert_eq!(lines[1], "Hit Points: 2-3");
    }

    #[test]
    fn test_history_scales_with_difficulty() {
        let config = SimConfig {
            difficulty: Difficulty::Nightmare,
            ..SimConfig::default()
        };
        let mut kills = KillCounts::default();
        for _ in 0..30 {
            kills.record(Species::Zombie);
        }
        let lines = monster_history(Species::Zombie, &kills, &config);
        assert_eq!(lines[1], "Hit Points: 7-10");
    }

    #[test]
    fn test_resistance_lines() {
        let config = SimConfig::default();
        let mut kills = KillCounts::default();
        for _ in 0..15 {
            kills.record(Species::RottingCarcass);
        }
        let lines = monster_history(Species::RottingCarcass, &kills, &config);
        assert_eq!(lines[1], "Resists: Magic");
    }

    #[test]
    fn test_unique_history() {
        let m = Monster {
            resistances: Resistances::IMMUNE_FIRE,
            ..Monster::default()
        };
        assert_eq!(unique_history(&m), ["No resistances", "Some Magic Immunities"]);
    }
}
