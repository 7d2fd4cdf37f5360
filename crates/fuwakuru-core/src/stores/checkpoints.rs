//! Checkpoint store: `matCheckpoints_{profile}`, a JSON map of technique id
//! to boolean array.

use fuwakuru_logic::checkpoints::{reconcile as reconcile_values, CheckpointState};
use fuwakuru_logic::profile::ProfileKey;
use serde_json::Value;

use super::{read_json, write_json};
use crate::backend::KeyValueStore;

/// Loose truthiness for stored array elements.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// All checkpoint arrays for the profile. Entries that are not arrays are
/// dropped; the rest are coerced to booleans.
pub fn load<S: KeyValueStore + ?Sized>(store: &S, profile: &ProfileKey) -> CheckpointState {
    let Some(Value::Object(map)) = read_json(store, &profile.checkpoints_key()) else {
        return CheckpointState::new();
    };
    map.into_iter()
        .filter_map(|(id, value)| match value {
            Value::Array(items) => Some((id, items.iter().map(truthy).collect())),
            _ => None,
        })
        .collect()
}

fn save<S: KeyValueStore + ?Sized>(store: &mut S, profile: &ProfileKey, state: &CheckpointState) -> bool {
    write_json(store, &profile.checkpoints_key(), state)
}

/// The array for `technique_id`, brought to `expected` length.
///
/// A missing entry is created as all-false; an entry of the wrong length is
/// rebuilt keeping `true` values by index. Either way the repaired array is
/// persisted before it is returned.
pub fn reconcile<S: KeyValueStore + ?Sized>(
    store: &mut S,
    profile: &ProfileKey,
    technique_id: &str,
    expected: usize,
) -> Vec<bool> {
    let mut state = load(store, profile);
    let reconciled = reconcile_values(state.get(technique_id).map(Vec::as_slice), expected);
    if !reconciled.needs_persist() {
        return reconciled.into_inner();
    }
    log::debug!("Reconciled checkpoints of {} to {} entries", technique_id, expected);
    let values = reconciled.into_inner();
    state.insert(technique_id.to_string(), values.clone());
    save(store, profile, &state);
    values
}

/// Mark one checkpoint done. Returns `false` without writing when the
/// checkpoint is already done or does not exist.
pub fn set_true<S: KeyValueStore + ?Sized>(
    store: &mut S,
    profile: &ProfileKey,
    technique_id: &str,
    index: usize,
) -> bool {
    let mut state = load(store, profile);
    let Some(slot) = state.get_mut(technique_id).and_then(|values| values.get_mut(index)) else {
        log::warn!("No checkpoint {} for {} in {}", index, technique_id, profile);
        return false;
    };
    if *slot {
        return false;
    }
    *slot = true;
    save(store, profile, &state);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryStore;

    fn profile() -> ProfileKey {
        ProfileKey::derive("Yuki", Some("chara2"))
    }

    #[test]
    fn absent_is_empty_map() {
        assert!(load(&MemoryStore::new(), &profile()).is_empty());
    }

    #[test]
    fn non_object_is_empty_map() {
        let store = MemoryStore::from_entries([(profile().checkpoints_key(), "[true]")]);
        assert!(load(&store, &profile()).is_empty());
    }

    #[test]
    fn values_coerced_to_bool() {
        let store = MemoryStore::from_entries([(
            profile().checkpoints_key(),
            r#"{"tripod":[true,0,1,"",null],"broken":"yes"}"#,
        )]);
        let state = load(&store, &profile());
        assert_eq!(state["tripod"], vec![true, false, true, false, false]);
        assert!(!state.contains_key("broken"));
    }

    #[test]
    fn reconcile_creates_and_persists() {
        let mut store = MemoryStore::new();
        let values = reconcile(&mut store, &profile(), "front-roll", 3);
        assert_eq!(values, vec![false; 3]);
        assert_eq!(load(&store, &profile())["front-roll"], vec![false; 3]);
    }

    #[test]
    fn reconcile_resizes_keeping_true_values() {
        let mut store = MemoryStore::from_entries([(
            profile().checkpoints_key(),
            r#"{"front-roll":[true,false,true,true],"tripod":[true]}"#,
        )]);
        let values = reconcile(&mut store, &profile(), "front-roll", 3);
        assert_eq!(values, vec![true, false, true]);
        let state = load(&store, &profile());
        assert_eq!(state["front-roll"], vec![true, false, true]);
        assert_eq!(state["tripod"], vec![true]);
    }

    #[test]
    fn reconcile_twice_returns_same() {
        let mut store = MemoryStore::from_entries([(
            profile().checkpoints_key(),
            r#"{"front-roll":[true]}"#,
        )]);
        let first = reconcile(&mut store, &profile(), "front-roll", 3);
        let second = reconcile(&mut store, &profile(), "front-roll", 3);
        assert_eq!(first, second);
    }

    #[test]
    fn set_true_only_once() {
        let mut store = MemoryStore::new();
        reconcile(&mut store, &profile(), "front-roll", 3);
        assert!(set_true(&mut store, &profile(), "front-roll", 1));
        assert!(!set_true(&mut store, &profile(), "front-roll", 1));
        assert_eq!(load(&store, &profile())["front-roll"], vec![false, true, false]);
    }

    #[test]
    fn set_true_out_of_range_is_noop() {
        let mut store = MemoryStore::new();
        reconcile(&mut store, &profile(), "front-roll", 3);
        assert!(!set_true(&mut store, &profile(), "front-roll", 3));
        assert!(!set_true(&mut store, &profile(), "tripod", 0));
    }
}
