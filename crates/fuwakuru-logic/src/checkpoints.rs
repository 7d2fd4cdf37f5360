//! Checkpoint arrays and their length reconciliation.
//!
//! Each technique's completion state is a fixed-length boolean array whose
//! length must equal the technique's current checkpoint count. When the
//! catalog changes between sessions, the stored array is rebuilt: `expected`
//! falses, with `true` values copied by index up to the shorter length.

use std::collections::BTreeMap;

/// techniqueId → per-checkpoint completion.
pub type CheckpointState = BTreeMap<String, Vec<bool>>;

/// Outcome of reconciling one stored array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciled {
    /// Stored array already had the expected length.
    Unchanged(Vec<bool>),
    /// No entry existed; a fresh all-false array was created.
    Created(Vec<bool>),
    /// Entry was truncated or extended to the expected length.
    Resized(Vec<bool>),
}

impl Reconciled {
    pub fn needs_persist(&self) -> bool {
        !matches!(self, Reconciled::Unchanged(_))
    }

    pub fn into_inner(self) -> Vec<bool> {
        match self {
            Reconciled::Unchanged(v) | Reconciled::Created(v) | Reconciled::Resized(v) => v,
        }
    }
}

/// Bring `current` to `expected` length.
///
/// ```
/// use fuwakuru_logic::checkpoints::{reconcile, Reconciled};
///
/// let stored = vec![true, false, true, true];
/// assert_eq!(reconcile(Some(&stored), 3), Reconciled::Resized(vec![true, false, true]));
/// assert_eq!(reconcile(None, 2), Reconciled::Created(vec![false, false]));
/// ```
pub fn reconcile(current: Option<&[bool]>, expected: usize) -> Reconciled {
    match current {
        None => Reconciled::Created(vec![false; expected]),
        Some(values) if values.len() == expected => Reconciled::Unchanged(values.to_vec()),
        Some(values) => {
            let mut fixed = vec![false; expected];
            for (slot, value) in fixed.iter_mut().zip(values) {
                *slot = *value;
            }
            Reconciled::Resized(fixed)
        }
    }
}

/// True when every checkpoint is done. An empty array counts as done.
pub fn all_cleared(values: &[bool]) -> bool {
    values.iter().all(|v| *v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_entry_created_all_false() {
        assert_eq!(reconcile(None, 3), Reconciled::Created(vec![false; 3]));
    }

    #[test]
    fn matching_length_untouched() {
        let stored = vec![true, false, true];
        let r = reconcile(Some(&stored), 3);
        assert!(!r.needs_persist());
        assert_eq!(r.into_inner(), stored);
    }

    #[test]
    fn shorter_entry_extended_with_false() {
        let stored = vec![true, true];
        assert_eq!(
            reconcile(Some(&stored), 4),
            Reconciled::Resized(vec![true, true, false, false])
        );
    }

    #[test]
    fn longer_entry_truncated() {
        let stored = vec![false, true, true, true, true];
        assert_eq!(
            reconcile(Some(&stored), 2),
            Reconciled::Resized(vec![false, true])
        );
    }

    #[test]
    fn reconcile_is_idempotent() {
        let stored = vec![true, false, true, true, false];
        let first = reconcile(Some(&stored), 3).into_inner();
        let second = reconcile(Some(&first), 3);
        assert_eq!(second, Reconciled::Unchanged(first));
    }

    #[test]
    fn all_cleared_checks_every_value() {
        assert!(all_cleared(&[true, true]));
        assert!(!all_cleared(&[true, false]));
        assert!(all_cleared(&[]));
    }
}
