//! Unlock policy and the derived per-technique state.
//!
//! Nothing here is stored. A technique `T` in stage `S` is unlocked iff every
//! technique in `S` with a lower order is in `Progress[S]`, so the first
//! technique of a stage is always open. Callers recompute this from current
//! progress on every render.
//!
//! ```text
//! LOCKED ──(prerequisites cleared)──▶ OPEN ──(last checkpoint true)──▶ CLEARED
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Technique};
use crate::progress::Progress;

/// Derived lifecycle of a technique for one profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TechniqueState {
    Locked,
    Open,
    Cleared,
}

/// Whether `technique` may be attempted given `progress`.
pub fn is_unlocked(catalog: &Catalog, technique: &Technique, progress: &Progress) -> bool {
    catalog
        .prerequisites(technique)
        .into_iter()
        .all(|id| progress.contains(technique.stage, id))
}

/// Lifecycle state of `technique`.
///
/// A technique already recorded in progress is `Cleared` even if a later
/// catalog change would otherwise lock it.
pub fn technique_state(catalog: &Catalog, technique: &Technique, progress: &Progress) -> TechniqueState {
    if progress.contains(technique.stage, &technique.id) {
        TechniqueState::Cleared
    } else if is_unlocked(catalog, technique, progress) {
        TechniqueState::Open
    } else {
        TechniqueState::Locked
    }
}
