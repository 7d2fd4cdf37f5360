//! Error types for the storage layer and the page handlers.

use thiserror::Error;

/// Failure reported by a key-value backend.
///
/// The per-profile stores never surface these to their callers; they log and
/// fall back. Only backend users (reset, snapshots, front ends) see them.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Write would push the store past its byte quota.
    #[error("quota exceeded writing {key}: limit is {limit} bytes")]
    QuotaExceeded { key: String, limit: usize },

    /// Storage is disabled or not reachable at all.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Failure while exporting or importing a snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Bincode(#[from] Box<bincode::ErrorKind>),

    #[error("snapshot version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Why a checkpoint could not be cleared.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClearError {
    #[error("technique not found: {0}")]
    UnknownTechnique(String),

    /// A lower-order technique in the same stage is not cleared yet.
    #[error("technique {0} is locked: clear the previous technique first")]
    Locked(String),

    #[error("technique {technique} has {count} checkpoints, no index {index}")]
    CheckpointOutOfRange {
        technique: String,
        index: usize,
        count: usize,
    },
}

/// Why the adventure could not start from the character-select page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StartError {
    #[error("player name is required")]
    MissingName,

    #[error("a character must be selected")]
    MissingCharacter,

    #[error("the selected character has no image")]
    MissingCharacterImage,
}
