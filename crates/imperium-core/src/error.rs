//! Error type for the fallible edges of the simulation: configuration and
//! persistence. Gameplay operations never fail; they are rejected as no-ops.

use std::path::PathBuf;

use crate::enums::FactionId;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown faction: {0:?}")]
    UnknownFaction(FactionId),

    #[error("save slot not found: {0}")]
    SaveNotFound(String),

    #[error("invalid save slot name: {0:?}")]
    InvalidSlot(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
