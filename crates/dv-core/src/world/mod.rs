//! Collaborator state the monster simulation consumes and produces
//!
//! Players, quest progress, voice playback and the outbound event stream.

mod audio;
mod events;
mod player;
mod quest;

pub use audio::{AudioCues, PlayingLines, Silence};
pub use events::{EventSink, GlobalSound, ItemDrop, MonsterSound, SimEvent};
pub use player::{ItemEffects, Player, PlayerId, PlayerMode, QuestItem, WeaponClass};
pub use quest::{Quest, QuestId, QuestStatus, Quests, Speech};
