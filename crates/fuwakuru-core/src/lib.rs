//! Fuwakuru Core - Gymnastics Training Tracker Storage
//!
//! Per-profile progress, checkpoints, level and rewards for the Fuwakuru
//! Adventure training app, kept as flat string keys in a pluggable key-value
//! store.
//!
//! # Architecture
//!
//! - **Backends** (`backend`): the [`KeyValueStore`](backend::KeyValueStore) seam
//!   plus memory, JSON file, disabled and change-publishing implementations
//! - **Stores** (`stores`): typed load/save over one profile's keys
//! - **Handlers** (`tracker`): the technique page actions that touch several stores
//! - **Presenter** (`hud`): the HUD view, refreshed from a change feed
//! - **Maintenance** (`reset`, `persistence`): wipe and snapshot tracker keys
//!
//! # Example
//!
//! ```rust
//! use fuwakuru_core::prelude::*;
//!
//! let mut tracker = Tracker::in_memory();
//! tracker
//!     .start_adventure("Yuki", Some("chara2"), Some("/images/chara2.png"))
//!     .unwrap();
//!
//! for i in 0..3 {
//!     tracker.clear_checkpoint("front-roll", i).unwrap();
//! }
//! assert_eq!(tracker.hud().level, 4);
//! ```

pub mod backend;
pub mod cache;
pub mod engine;
pub mod error;
pub mod hud;
pub mod persistence;
pub mod reset;
pub mod stores;
pub mod tracker;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::backend::{FileStore, KeyValueStore, MemoryStore, ObservedStore};
    pub use crate::engine::{Storage, Tracker};
    pub use crate::error::{ClearError, StartError, StoreError};
    pub use crate::tracker::ClearOutcome;
}
