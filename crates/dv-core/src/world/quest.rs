//! Quest progress and the dialogue lines monster talkers use.

use core::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, IntoEnumIterator};

/// Quests whose state monster scripts read or change
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumCount,
)]
pub enum QuestId {
    /// Gharbad the Weak
    Garbud,
    /// Zhar the Mad
    Zhar,
    /// Snotspil and the tavern sign
    Banner,
    /// Lachdanan and the golden elixir
    Veil,
    Warlord,
    /// Archbishop Lazarus
    Betrayer,
    SkeletonKing,
    Butcher,
    Diablo,
}

impl QuestId {
    /// Dungeon level the quest takes place on
    pub fn level(self) -> u8 {
        match self {
            QuestId::Butcher => 2,
            QuestId::SkeletonKing => 3,
            QuestId::Garbud | QuestId::Banner => 4,
            QuestId::Zhar => 8,
            QuestId::Warlord => 13,
            QuestId::Veil => 14,
            QuestId::Betrayer => 15,
            QuestId::Diablo => 16,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum QuestStatus {
    #[default]
    NotAvailable,
    Init,
    Active,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Quest {
    pub status: QuestStatus,
    /// Quest-specific progress counter
    pub var1: i32,
    /// Shown in the quest log
    pub logged: bool,
}

impl Quest {
    /// Present on this game and not yet finished
    pub fn is_available(&self) -> bool {
        !matches!(self.status, QuestStatus::NotAvailable | QuestStatus::Done)
    }

    pub fn activate(&mut self) {
        self.status = QuestStatus::Active;
        self.logged = true;
    }
}

/// Progress for every quest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quests {
    quests: [Quest; QuestId::COUNT],
}

impl Default for Quests {
    fn default() -> Self {
        Self {
            quests: [Quest::default(); QuestId::COUNT],
        }
    }
}

impl Quests {
    /// Every quest in the `Init` state, as a new game starts them
    pub fn all_initialised() -> Self {
        let mut quests = Self::default();
        for id in QuestId::iter() {
            quests[id].status = QuestStatus::Init;
        }
        quests
    }

    /// The quest is running and takes place on `depth`
    pub fn is_available_on(&self, id: QuestId, depth: u8) -> bool {
        self[id].is_available() && id.level() == depth
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestId, &Quest)> {
        QuestId::iter().map(move |id| (id, &self[id]))
    }
}

impl Index<QuestId> for Quests {
    type Output = Quest;

    fn index(&self, id: QuestId) -> &Quest {
        &self.quests[id as usize]
    }
}

impl IndexMut<QuestId> for Quests {
    fn index_mut(&mut self, id: QuestId) -> &mut Quest {
        &mut self.quests[id as usize]
    }
}

/// Voiced dialogue lines spoken by monster talkers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Speech {
    Garbud1,
    Garbud2,
    Garbud3,
    Garbud4,
    Zhar1,
    Zhar2,
    Banner10,
    Banner11,
    Banner12,
    Veil9,
    Veil10,
    Veil11,
    Warlord9,
    Vile13,
    Vile14,
}

impl Speech {
    /// The line that follows this one when the player walks away mid-talk
    pub fn next_garbud(self) -> Option<Speech> {
        match self {
            Speech::Garbud1 => Some(Speech::Garbud2),
            Speech::Garbud2 => Some(Speech::Garbud3),
            Speech::Garbud3 => Some(Speech::Garbud4),
            _ => None,
        }
    }

    pub fn is_garbud_opening(self) -> bool {
        matches!(self, Speech::Garbud1 | Speech::Garbud2 | Speech::Garbud3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_by_id() {
        let mut quests = Quests::default();
        quests[QuestId::Banner].var1 = 2;
        assert_eq!(quests[QuestId::Banner].var1, 2);
        assert_eq!(quests[QuestId::Veil].var1, 0);
    }

    #[test]
    fn test_availability() {
        let mut quests = Quests::all_initialised();
        assert!(quests[QuestId::Zhar].is_available());
        quests[QuestId::Zhar].activate();
        assert!(quests[QuestId::Zhar].logged);
        quests[QuestId::Zhar].status = QuestStatus::Done;
        assert!(!quests[QuestId::Zhar].is_available());
        assert!(!Quests::default()[QuestId::Diablo].is_available());
    }

    #[test]
    fn test_garbud_line_progression() {
        assert_eq!(Speech::Garbud1.next_garbud(), Some(Speech::Garbud2));
        assert_eq!(Speech::Garbud3.next_garbud(), Some(Speech::Garbud4));
        assert_eq!(Speech::Garbud4.next_garbud(), None);
        assert!(!Speech::Garbud4.is_garbud_opening());
    }
}
