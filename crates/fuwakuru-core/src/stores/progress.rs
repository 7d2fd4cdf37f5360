//! Progress store: `matProgress_{profile}`.
//!
//! Several pages each hold a partial copy of progress, so writes always go
//! through [`merge_save`]: it re-reads the stored value and replaces only
//! the stages in the patch, so saving one stage never drops another.

use fuwakuru_logic::catalog::Stage;
use fuwakuru_logic::profile::ProfileKey;
use fuwakuru_logic::progress::{Progress, ProgressPatch};

use super::{read_json, string_list, write_json};
use crate::backend::KeyValueStore;

/// Current progress, or all-empty when absent or unreadable.
///
/// Each stage is checked on its own: a stage that is missing or not an
/// array of strings reads as empty without discarding the other stages.
pub fn load<S: KeyValueStore + ?Sized>(store: &S, profile: &ProfileKey) -> Progress {
    let Some(value) = read_json(store, &profile.progress_key()) else {
        return Progress::default();
    };
    Progress {
        netspring: string_list(value.get(Stage::Netspring.as_str())),
        headspring: string_list(value.get(Stage::Headspring.as_str())),
        vault: string_list(value.get(Stage::Vault.as_str())),
    }
}

/// Apply `patch` on top of the stored progress and persist the union.
/// Returns the merged progress.
pub fn merge_save<S: KeyValueStore + ?Sized>(
    store: &mut S,
    profile: &ProfileKey,
    patch: ProgressPatch,
) -> Progress {
    let mut progress = load(store, profile);
    progress.apply(patch);
    write_json(store, &profile.progress_key(), &progress);
    progress
}

/// Record `technique_id` as cleared in `stage`. No-op when already present.
/// Returns `true` when it was appended.
pub fn mark_cleared<S: KeyValueStore + ?Sized>(
    store: &mut S,
    profile: &ProfileKey,
    stage: Stage,
    technique_id: &str,
) -> bool {
    let mut progress = load(store, profile);
    if !progress.mark_cleared(stage, technique_id) {
        return false;
    }
    let ids = progress.stage(stage).to_vec();
    merge_save(store, profile, ProgressPatch::stage(stage, ids));
    true
}
