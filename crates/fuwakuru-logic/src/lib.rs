//! Pure training-tracker rules for Fuwakuru Adventure.
//!
//! This crate contains everything about the tracker that is independent of
//! storage, pages or any runtime. Functions take plain data and return
//! results, so they are unit-testable and shared by the storage layer, the
//! headless harness and the terminal front end.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`board`] | Island boards: per-stage rows with CLEARED / NEW / OPEN / LOCKED |
//! | [`catalog`] | Static technique list, stages, prerequisite order, integrity checks |
//! | [`characters`] | Character roster and HUD avatar resolution |
//! | [`checkpoints`] | Checkpoint arrays and length reconciliation |
//! | [`constants`] | Storage key names and display constants |
//! | [`hud`] | HUD view model (level, companions, medals, thumbnails) |
//! | [`profile`] | Profile key derivation (`name__characterId`) |
//! | [`progress`] | Cleared techniques per stage and partial patches |
//! | [`rewards`] | Technique → companion/medal table and reward metadata |
//! | [`routes`] | Logical routes and the identity entry guard |
//! | [`unlock`] | Unlock policy and derived technique state |

pub mod board;
pub mod catalog;
pub mod characters;
pub mod checkpoints;
pub mod constants;
pub mod hud;
pub mod profile;
pub mod progress;
pub mod rewards;
pub mod routes;
pub mod unlock;
