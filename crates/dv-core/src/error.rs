//! Recoverable failures of level loading and configuration.
//!
//! Gameplay never returns these: a monster that cannot act simply idles.

use thiserror::Error;

use crate::monster::{Species, UniqueMonster};
use crate::world::PlayerId;

/// Problems reading or validating a [`SimConfig`](crate::SimConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value {value} for '{field}': {reason}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        reason: &'static str,
    },
}

/// Problems populating a level
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpawnError {
    #[error("monster type table is full ({0} types)")]
    TypeTableFull(usize),

    #[error("{0} is not loaded on this level")]
    SpeciesNotLoaded(Species),

    #[error("no free tile to place {0}")]
    UniqueNotPlaceable(UniqueMonster),

    #[error("monster array is full")]
    MonstersFull,

    #[error("no golem slot for player {}", .0.0)]
    NoGolemSlot(PlayerId),
}
