//! Level monster type table and the fixed-capacity instance array
//!
//! Slots never move; the active list is a permutation of slot ids whose
//! first `active_count` entries are live. Deleting swaps the dead id to the
//! end, so list positions are only meaningful within one pass.

use core::ops::{Index, IndexMut};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{Monster, MonsterFlags, MonsterId, Species};
use crate::dungeon::Point;
use crate::error::SpawnError;
use crate::{GOLEM_HOLDING_CELL, MAX_LVL_MTYPES, MAX_MONSTERS, MAX_PLRS};

bitflags! {
    /// How a loaded type may be placed
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Placement: u8 {
        /// Random scatter groups
        const SCATTER = 0x01;
        /// Placed by scripts only (golems, Diablo, raised skeletons)
        const SPECIAL = 0x02;
        /// Backs a unique monster
        const UNIQUE = 0x04;
    }
}

/// One entry of the per-level type table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelMonsterType {
    pub species: Species,
    pub placement: Placement,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonsterRegistry {
    slots: Vec<Monster>,
    active: Vec<MonsterId>,
    active_count: usize,
    types: Vec<LevelMonsterType>,
}

impl Default for MonsterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MonsterRegistry {
    /// Empty level. The golem slots are live from the start, parked in the
    /// holding cell until a player casts the spell.
    pub fn new() -> Self {
        let slots = (0..MAX_MONSTERS)
            .map(|i| {
                let id = MonsterId(i as u16);
                match id.golem_owner() {
                    Some(_) => Monster {
                        id,
                        species: Species::Golem,
                        ai: super::AiKind::Golem,
                        flags: MonsterFlags::GOLEM,
                        ..Monster::default()
                    },
                    None => Monster {
                        id,
                        ..Monster::default()
                    },
                }
            })
            .collect();
        Self {
            slots,
            active: (0..MAX_MONSTERS as u16).map(MonsterId).collect(),
            active_count: MAX_PLRS,
            types: Vec::new(),
        }
    }

    /// Load `species` into the type table, or widen its placement if it is
    /// already there
    pub fn add_type(&mut self, species: Species, placement: Placement) -> Result<usize, SpawnError> {
        if let Some(index) = self.type_index(species) {
            self.types[index].placement |= placement;
            return Ok(index);
        }
        if self.types.len() >= MAX_LVL_MTYPES {
            warn!(?species, "monster type table full");
            return Err(SpawnError::TypeTableFull(MAX_LVL_MTYPES));
        }
        self.types.push(LevelMonsterType { species, placement });
        debug!(?species, index = self.types.len() - 1, "loaded monster type");
        Ok(self.types.len() - 1)
    }

    pub fn type_index(&self, species: Species) -> Option<usize> {
        self.types.iter().position(|t| t.species == species)
    }

    pub fn types(&self) -> &[LevelMonsterType] {
        &self.types
    }

    pub fn level_type(&self, index: usize) -> &LevelMonsterType {
        &self.types[index]
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// Ids of live slots, in processing order
    pub fn active_ids(&self) -> &[MonsterId] {
        &self.active[..self.active_count]
    }

    pub fn is_full(&self) -> bool {
        self.active_count >= MAX_MONSTERS
    }

    /// Take the next free slot and count it active
    pub fn claim_slot(&mut self) -> Option<MonsterId> {
        if self.is_full() {
            warn!("monster array full");
            return None;
        }
        let id = self.active[self.active_count];
        self.active_count += 1;
        Some(id)
    }

    /// Drop the entry at `active_index` by swapping it with the last live entry
    pub fn release_slot(&mut self, active_index: usize) {
        assert!(active_index < self.active_count, "release of inactive slot");
        self.active_count -= 1;
        self.active.swap(active_index, self.active_count);
    }

    /// Remove every monster flagged for deletion.
    ///
    /// Golem slots stay active; they are parked back in the holding cell.
    pub fn delete_pending(&mut self) {
        let holding = Point::from(GOLEM_HOLDING_CELL);
        for golem in self.slots.iter_mut().take(MAX_PLRS) {
            if golem.delete_pending {
                golem.tile = holding;
                golem.future = Point::default();
                golem.old = Point::default();
                golem.delete_pending = false;
            }
        }
        let mut i = MAX_PLRS;
        while i < self.active_count {
            let id = self.active[i];
            if self.slots[id.index()].delete_pending {
                self.slots[id.index()].delete_pending = false;
                debug!(%id, "monster removed");
                self.release_slot(i);
            } else {
                i += 1;
            }
        }
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &Monster> {
        self.active_ids().iter().map(move |id| &self.slots[id.index()])
    }

    /// Reset every slot and forget the loaded types
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Index<MonsterId> for MonsterRegistry {
    type Output = Monster;

    fn index(&self, id: MonsterId) -> &Monster {
        &self.slots[id.index()]
    }
}

impl IndexMut<MonsterId> for MonsterRegistry {
    fn index_mut(&mut self, id: MonsterId) -> &mut Monster {
        &mut self.slots[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_type_is_idempotent() {
        let mut reg = MonsterRegistry::new();
        let a = reg.add_type(Species::Zombie, Placement::SCATTER).unwrap();
        let b = reg.add_type(Species::Zombie, Placement::UNIQUE).unwrap();
        assert_eq!(a, b);
        assert_eq!(reg.types().len(), 1);
        assert_eq!(
            reg.level_type(a).placement,
            Placement::SCATTER | Placement::UNIQUE
        );
    }

    #[test]
    fn test_type_table_cap() {
        use strum::IntoEnumIterator;
        let mut reg = MonsterRegistry::new();
        let mut species = Species::iter();
        for _ in 0..MAX_LVL_MTYPES {
            reg.add_type(species.next().unwrap(), Placement::SCATTER).unwrap();
        }
        assert_eq!(
            reg.add_type(species.next().unwrap(), Placement::SCATTER),
            Err(SpawnError::TypeTableFull(MAX_LVL_MTYPES))
        );
    }

    #[test]
    fn test_release_swaps_with_last() {
        let mut reg = MonsterRegistry::new();
        let ids: Vec<_> = (0..6).map(|_| reg.claim_slot().unwrap()).collect();
        assert_eq!(ids[0], MonsterId(MAX_PLRS as u16));
        reg.release_slot(MAX_PLRS + 4);
        assert_eq!(reg.active_count(), MAX_PLRS + 5);
        assert_eq!(reg.active_ids()[MAX_PLRS + 4], ids[5]);
        // the released id is next in line to be claimed again
        assert_eq!(reg.claim_slot(), Some(ids[4]));
    }

    #[test]
    fn test_delete_pending_keeps_golems() {
        let mut reg = MonsterRegistry::new();
        for _ in 0..4 {
            reg.claim_slot();
        }
        reg[MonsterId(1)].delete_pending = true;
        reg[MonsterId(1)].tile = Point::new(30, 30);
        reg[MonsterId(6)].delete_pending = true;
        reg.delete_pending();
        assert_eq!(reg.active_count(), 7);
        assert!(reg.active_ids().contains(&MonsterId(1)));
        assert!(!reg.active_ids().contains(&MonsterId(6)));
        assert!(reg[MonsterId(1)].is_parked());
        assert!(!reg[MonsterId(1)].delete_pending);
    }

    #[test]
    fn test_claim_until_full() {
        let mut reg = MonsterRegistry::new();
        assert_eq!(reg.active_count(), MAX_PLRS);
        for _ in MAX_PLRS..MAX_MONSTERS {
            assert!(reg.claim_slot().is_some());
        }
        assert!(reg.is_full());
        assert_eq!(reg.claim_slot(), None);
    }
}
