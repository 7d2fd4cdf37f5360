//! Technique page handlers.
//!
//! [`clear_checkpoint`] is the one user action that mutates several stores.
//! Within it the writes happen in a fixed order, each flushed before the next
//! read:
//!
//! 1. checkpoint array
//! 2. level
//! 3. progress (only when the last checkpoint flips)
//! 4. reward (only when the technique is newly cleared and the reward is not owned)
//!
//! There is no cross-store transaction. A failure part-way leaves the earlier
//! writes in place.

use fuwakuru_logic::board::Island;
use fuwakuru_logic::catalog::{Catalog, Stage, Technique};
use fuwakuru_logic::checkpoints::all_cleared;
use fuwakuru_logic::profile::ProfileKey;
use fuwakuru_logic::progress::{Progress, ProgressPatch};
use fuwakuru_logic::rewards::{reward_for_technique, Reward};
use fuwakuru_logic::unlock::{is_unlocked, TechniqueState};

use crate::backend::KeyValueStore;
use crate::error::ClearError;
use crate::stores::{checkpoints, level, progress, rewards};

/// What the technique page renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechniqueView {
    pub technique: Technique,
    /// Reconciled checkpoint array, one entry per checkpoint.
    pub checks: Vec<bool>,
    pub unlocked: bool,
    pub cleared: bool,
}

impl TechniqueView {
    pub fn state(&self) -> TechniqueState {
        if self.cleared {
            TechniqueState::Cleared
        } else if self.unlocked {
            TechniqueState::Open
        } else {
            TechniqueState::Locked
        }
    }
}

/// Result of a successful checkpoint flip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointCleared {
    pub index: usize,
    /// Level after the increment.
    pub level: u32,
    /// The flip completed the technique and it was newly added to progress.
    pub technique_cleared: bool,
    /// Reward granted by this action, if any.
    pub reward: Option<Reward>,
    pub checks: Vec<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The checkpoint was already done; nothing was written.
    AlreadyDone,
    Cleared(CheckpointCleared),
}

fn lookup<'a>(catalog: &'a Catalog, technique_id: &str) -> Result<&'a Technique, ClearError> {
    catalog
        .get(technique_id)
        .ok_or_else(|| ClearError::UnknownTechnique(technique_id.to_string()))
}

/// Load everything the technique page needs.
///
/// Reconciles the checkpoint array against the catalog. If every checkpoint
/// is already done but progress lacks the technique, progress is repaired;
/// that repair grants no level and no reward.
pub fn open_technique<S: KeyValueStore + ?Sized>(
    store: &mut S,
    catalog: &Catalog,
    profile: &ProfileKey,
    technique_id: &str,
) -> Result<TechniqueView, ClearError> {
    let technique = lookup(catalog, technique_id)?;
    let checks = checkpoints::reconcile(store, profile, &technique.id, technique.checkpoint_count());
    let current = progress::load(store, profile);
    let unlocked = is_unlocked(catalog, technique, &current);
    let mut cleared = current.contains(technique.stage, &technique.id);

    if !cleared && all_cleared(&checks) {
        log::info!("Repairing progress: {} has every checkpoint done", technique.id);
        progress::mark_cleared(store, profile, technique.stage, &technique.id);
        cleared = true;
    }

    Ok(TechniqueView {
        technique: technique.clone(),
        checks,
        unlocked,
        cleared,
    })
}

/// Flip one checkpoint to done and apply its side effects.
pub fn clear_checkpoint<S: KeyValueStore + ?Sized>(
    store: &mut S,
    catalog: &Catalog,
    profile: &ProfileKey,
    technique_id: &str,
    index: usize,
) -> Result<ClearOutcome, ClearError> {
    let technique = lookup(catalog, technique_id)?;
    let current = progress::load(store, profile);
    if !is_unlocked(catalog, technique, &current) {
        return Err(ClearError::Locked(technique.id.clone()));
    }

    let mut checks = checkpoints::reconcile(store, profile, &technique.id, technique.checkpoint_count());
    match checks.get(index) {
        None => {
            return Err(ClearError::CheckpointOutOfRange {
                technique: technique.id.clone(),
                index,
                count: checks.len(),
            })
        }
        Some(true) => return Ok(ClearOutcome::AlreadyDone),
        Some(false) => {}
    }

    checkpoints::set_true(store, profile, &technique.id, index);
    checks[index] = true;

    let new_level = level::increment(store, profile);
    log::debug!("{} checkpoint {} done, level {}", technique.id, index, new_level);

    let mut technique_cleared = false;
    let mut reward = None;
    if all_cleared(&checks) {
        technique_cleared = progress::mark_cleared(store, profile, technique.stage, &technique.id);
        if let Some(r) = reward_for_technique(&technique.id) {
            if rewards::grant(store, profile, r.as_str()) {
                log::info!("Granted {} for clearing {}", r, technique.id);
                reward = Some(r);
            }
        }
    }

    Ok(ClearOutcome::Cleared(CheckpointCleared {
        index,
        level: new_level,
        technique_cleared,
        reward,
        checks,
    }))
}

/// Clear progress for `stages` only.
///
/// Level, other stages, checkpoints and rewards are kept.
pub fn reset_stage_progress<S: KeyValueStore + ?Sized>(
    store: &mut S,
    profile: &ProfileKey,
    stages: &[Stage],
) -> Progress {
    let patch = stages
        .iter()
        .fold(ProgressPatch::default(), |patch, stage| patch.with(*stage, Vec::new()));
    let merged = progress::merge_save(store, profile, patch);
    log::info!("Reset {:?} progress for {}", stages, profile);
    merged
}

/// Clear the stages shown on `island`.
///
/// The mat island's reset also drops the level back to 1. The vault island
/// leaves it alone.
pub fn reset_island_progress<S: KeyValueStore + ?Sized>(
    store: &mut S,
    profile: &ProfileKey,
    island: Island,
) -> Progress {
    let merged = reset_stage_progress(store, profile, island.stages());
    if island == Island::Mat {
        level::save(store, profile, 1);
    }
    merged
}
