//! Reward store: `matPets_{profile}`, an append-only JSON array of reward ids.

use fuwakuru_logic::profile::ProfileKey;

use super::{read_json, string_list, write_json};
use crate::backend::KeyValueStore;

/// Owned reward ids in grant order. Empty when absent or unreadable.
pub fn load<S: KeyValueStore + ?Sized>(store: &S, profile: &ProfileKey) -> Vec<String> {
    string_list(read_json(store, &profile.rewards_key()).as_ref())
}

/// Append `reward_id` unless already owned. Returns `true` when granted.
pub fn grant<S: KeyValueStore + ?Sized>(store: &mut S, profile: &ProfileKey, reward_id: &str) -> bool {
    let mut rewards = load(store, profile);
    if rewards.iter().any(|id| id == reward_id) {
        return false;
    }
    rewards.push(reward_id.to_string());
    write_json(store, &profile.rewards_key(), &rewards);
    true
}
