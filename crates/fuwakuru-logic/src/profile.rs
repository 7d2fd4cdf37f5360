//! Profile key derivation.
//!
//! A profile is not stored as an object. It is the string prefix that
//! namespaces every per-player key, built from the trimmed player name and
//! the selected character id:
//!
//! ```
//! use fuwakuru_logic::profile::ProfileKey;
//!
//! let key = ProfileKey::derive("  Yuki ", Some("chara2"));
//! assert_eq!(key.as_str(), "Yuki__chara2");
//! assert_eq!(ProfileKey::derive("", None).as_str(), "default__default");
//! ```
//!
//! Every caller must go through [`ProfileKey::derive`]; a key built any other
//! way silently addresses a second, disconnected profile.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{profile_prefixes, DEFAULT_PART, PROFILE_SEPARATOR};

/// Namespacing key for all per-player state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileKey(String);

impl ProfileKey {
    /// Combine a raw player name and character id. Total: never fails.
    pub fn derive(name: &str, character_id: Option<&str>) -> Self {
        let name = match name.trim() {
            "" => DEFAULT_PART,
            trimmed => trimmed,
        };
        let character = match character_id {
            Some(id) if !id.is_empty() => id,
            _ => DEFAULT_PART,
        };
        Self(format!("{name}{PROFILE_SEPARATOR}{character}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `matLevel_{key}`
    pub fn level_key(&self) -> String {
        self.storage_key(profile_prefixes::LEVEL)
    }

    /// `matProgress_{key}`
    pub fn progress_key(&self) -> String {
        self.storage_key(profile_prefixes::PROGRESS)
    }

    /// `matPets_{key}`
    pub fn rewards_key(&self) -> String {
        self.storage_key(profile_prefixes::PETS)
    }

    /// `matCheckpoints_{key}`
    pub fn checkpoints_key(&self) -> String {
        self.storage_key(profile_prefixes::CHECKPOINTS)
    }

    /// All four per-profile storage keys.
    pub fn storage_keys(&self) -> [String; 4] {
        [
            self.level_key(),
            self.progress_key(),
            self.rewards_key(),
            self.checkpoints_key(),
        ]
    }

    fn storage_key(&self, prefix: &str) -> String {
        format!("{}_{}", prefix, self.0)
    }
}

impl fmt::Display for ProfileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProfileKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_and_character_joined() {
        assert_eq!(ProfileKey::derive("Yuki", Some("chara2")).as_str(), "Yuki__chara2");
    }

    #[test]
    fn name_is_trimmed() {
        assert_eq!(ProfileKey::derive("  Aoi\t", Some("chara1")).as_str(), "Aoi__chara1");
    }

    #[test]
    fn whitespace_name_falls_back_to_default() {
        assert_eq!(ProfileKey::derive("   ", Some("chara3")).as_str(), "default__chara3");
    }

    #[test]
    fn missing_or_empty_character_falls_back_to_default() {
        assert_eq!(ProfileKey::derive("Ren", None).as_str(), "Ren__default");
        assert_eq!(ProfileKey::derive("Ren", Some("")).as_str(), "Ren__default");
    }

    #[test]
    fn derivation_is_stable() {
        let a = ProfileKey::derive(" Mio ", Some("chara7"));
        let b = ProfileKey::derive("Mio", Some("chara7"));
        assert_eq!(a, b);
    }

    #[test]
    fn storage_keys_are_namespaced() {
        let key = ProfileKey::derive("Yuki", Some("chara2"));
        assert_eq!(key.level_key(), "matLevel_Yuki__chara2");
        assert_eq!(key.progress_key(), "matProgress_Yuki__chara2");
        assert_eq!(key.rewards_key(), "matPets_Yuki__chara2");
        assert_eq!(key.checkpoints_key(), "matCheckpoints_Yuki__chara2");
    }
}
