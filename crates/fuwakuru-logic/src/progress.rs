//! Per-profile progress: which techniques are cleared in each stage.
//!
//! Stored as three ordered lists, but only membership carries meaning. The
//! "at most one stage, only after its prerequisites" invariant is enforced by
//! the unlock policy at write time, not here.

use serde::{Deserialize, Serialize};

use crate::catalog::Stage;

/// Cleared technique ids, per stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    #[serde(default)]
    pub netspring: Vec<String>,
    #[serde(default)]
    pub headspring: Vec<String>,
    #[serde(default)]
    pub vault: Vec<String>,
}

impl Progress {
    pub fn stage(&self, stage: Stage) -> &[String] {
        match stage {
            Stage::Netspring => &self.netspring,
            Stage::Headspring => &self.headspring,
            Stage::Vault => &self.vault,
        }
    }

    fn stage_mut(&mut self, stage: Stage) -> &mut Vec<String> {
        match stage {
            Stage::Netspring => &mut self.netspring,
            Stage::Headspring => &mut self.headspring,
            Stage::Vault => &mut self.vault,
        }
    }

    pub fn contains(&self, stage: Stage, technique_id: &str) -> bool {
        self.stage(stage).iter().any(|id| id == technique_id)
    }

    /// Append `technique_id` to `stage` unless already present.
    /// Returns `true` when the list changed.
    pub fn mark_cleared(&mut self, stage: Stage, technique_id: &str) -> bool {
        if self.contains(stage, technique_id) {
            return false;
        }
        self.stage_mut(stage).push(technique_id.to_string());
        true
    }

    /// Replace only the stages present in `patch`.
    pub fn apply(&mut self, patch: ProgressPatch) {
        if let Some(ids) = patch.netspring {
            self.netspring = ids;
        }
        if let Some(ids) = patch.headspring {
            self.headspring = ids;
        }
        if let Some(ids) = patch.vault {
            self.vault = ids;
        }
    }

    /// Number of cleared techniques across all stages.
    pub fn cleared_total(&self) -> usize {
        self.netspring.len() + self.headspring.len() + self.vault.len()
    }
}

/// Partial progress: `None` stages are left untouched by a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressPatch {
    pub netspring: Option<Vec<String>>,
    pub headspring: Option<Vec<String>>,
    pub vault: Option<Vec<String>>,
}

impl ProgressPatch {
    /// A patch touching a single stage.
    pub fn stage(stage: Stage, ids: Vec<String>) -> Self {
        Self::default().with(stage, ids)
    }

    pub fn with(mut self, stage: Stage, ids: Vec<String>) -> Self {
        match stage {
            Stage::Netspring => self.netspring = Some(ids),
            Stage::Headspring => self.headspring = Some(ids),
            Stage::Vault => self.vault = Some(ids),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.netspring.is_none() && self.headspring.is_none() && self.vault.is_none()
    }
}
