//! Player identity: the global name and character keys, and the
//! character-select page's "start adventure" action.

use fuwakuru_logic::constants::global_keys;
use fuwakuru_logic::profile::ProfileKey;
use fuwakuru_logic::progress::Progress;

use super::{write, write_json};
use crate::backend::KeyValueStore;
use crate::error::StartError;

/// Name and character as currently saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerIdentity {
    pub name: String,
    pub character_id: Option<String>,
    pub character_img: Option<String>,
}

impl PlayerIdentity {
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let non_empty = |key: &str| store.get(key).filter(|v| !v.is_empty());
        Self {
            name: store.get(global_keys::PLAYER_NAME).unwrap_or_default(),
            character_id: non_empty(global_keys::SELECTED_CHAR),
            character_img: non_empty(global_keys::SELECTED_CHAR_IMG),
        }
    }

    /// Gated pages require a name and a character.
    pub fn can_enter(&self) -> bool {
        !self.name.trim().is_empty() && self.character_id.is_some()
    }

    pub fn profile_key(&self) -> ProfileKey {
        ProfileKey::derive(&self.name, self.character_id.as_deref())
    }
}

/// Save the character choice right away so the HUD can show it.
pub fn choose_character<S: KeyValueStore + ?Sized>(store: &mut S, character_id: &str, img: &str) {
    write(store, global_keys::SELECTED_CHAR, character_id);
    write(store, global_keys::SELECTED_CHAR_IMG, img);
}

/// Validate and save the player's identity, then make sure the profile's
/// level, progress and reward entries exist. Existing entries are kept.
pub fn start_adventure<S: KeyValueStore + ?Sized>(
    store: &mut S,
    name: &str,
    character_id: Option<&str>,
    character_img: Option<&str>,
) -> Result<ProfileKey, StartError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StartError::MissingName);
    }
    let character_id = character_id
        .filter(|id| !id.is_empty())
        .ok_or(StartError::MissingCharacter)?;
    let character_img = character_img
        .filter(|img| !img.is_empty())
        .ok_or(StartError::MissingCharacterImage)?;

    write(store, global_keys::PLAYER_NAME, name);
    choose_character(store, character_id, character_img);

    let profile = ProfileKey::derive(name, Some(character_id));
    if store.get(&profile.level_key()).is_none() {
        write(store, &profile.level_key(), "1");
    }
    if store.get(&profile.progress_key()).is_none() {
        write_json(store, &profile.progress_key(), &Progress::default());
    }
    if store.get(&profile.rewards_key()).is_none() {
        write_json(store, &profile.rewards_key(), &Vec::<String>::new());
    }

    log::info!("Adventure started for profile {}", profile);
    Ok(profile)
}
