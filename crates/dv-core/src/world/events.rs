//! Outbound notifications for the host: network sync, sound and UI.

use serde::{Deserialize, Serialize};
use strum::Display;

use super::{PlayerId, QuestId, QuestStatus, Speech};
use crate::combat::MissileKind;
use crate::dungeon::Point;
use crate::monster::{MonsterId, Species};

/// Which of a species' sound banks to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum MonsterSound {
    Attack,
    GotHit,
    Death,
    Special,
}

/// Level-wide one-shot effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum GlobalSound {
    /// "Ah, fresh meat!"
    ButcherIntro,
    DiabloDeath,
}

/// Item drops requested from the loot collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum ItemDrop {
    /// Roll a normal drop from the monster's loot seed
    Random { seed: u32 },
    /// Gharbad's mace
    Mace,
    /// Hork demon amulet
    Amulet,
    /// Zhar's spell book
    SpellBook,
    /// Lachdanan's Steel Veil
    SteelVeil,
}

/// Everything the simulation reports while running a tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    MonsterSpawned {
        id: MonsterId,
        species: Species,
        tile: Point,
    },
    MonsterDamaged {
        id: MonsterId,
        amount: i32,
        hit_points: i32,
    },
    MonsterKilled {
        id: MonsterId,
        species: Species,
        tile: Point,
    },
    Experience {
        player: PlayerId,
        amount: u32,
    },
    Loot {
        tile: Point,
        drop: ItemDrop,
    },
    CorpseAdded {
        tile: Point,
    },
    AcidPuddle {
        tile: Point,
    },
    MissileLaunched {
        source: MonsterId,
        kind: MissileKind,
        from: Point,
        to: Point,
        damage: i32,
    },
    Sound {
        id: MonsterId,
        sound: MonsterSound,
        /// Which of the bank's recordings
        variant: u8,
    },
    GlobalSound(GlobalSound),
    Dialogue {
        id: MonsterId,
        speech: Speech,
    },
    QuestChanged {
        quest: QuestId,
        status: QuestStatus,
        var1: i32,
    },
    /// A scripted set piece should rebuild its walls (bridge, portal, tavern)
    MapChanged {
        quest: QuestId,
    },
    DoorOpened {
        tile: Point,
    },
    Teleported {
        id: MonsterId,
        to: Point,
    },
    PlayerHit {
        player: PlayerId,
        by: MonsterId,
        damage: i32,
    },
    PlayerBlocked {
        player: PlayerId,
        by: MonsterId,
    },
    PlayerKnockedBack {
        player: PlayerId,
        to: Point,
    },
    PlayerDied {
        player: PlayerId,
    },
    /// Diablo's death animation finished; the game is won
    DiabloDefeated,
}

/// Consumer of simulation events
pub trait EventSink {
    fn emit(&mut self, event: SimEvent);
}

impl EventSink for Vec<SimEvent> {
    fn emit(&mut self, event: SimEvent) {
        self.push(event);
    }
}
