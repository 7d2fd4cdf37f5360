//! Storage key names and display constants.
//!
//! Every key the app persists is built from these names so that page code,
//! the HUD and the reset utility agree on the layout.

/// Keys that are global to the browser profile (not namespaced).
pub mod global_keys {
    pub const PLAYER_NAME: &str = "matRpgPlayerName";
    pub const SELECTED_CHAR: &str = "matRpgSelectedChar";
    pub const SELECTED_CHAR_IMG: &str = "matRpgSelectedCharImg";
}

/// Prefixes of per-profile keys. The full key is `{prefix}_{profileKey}`.
pub mod profile_prefixes {
    pub const LEVEL: &str = "matLevel";
    pub const PROGRESS: &str = "matProgress";
    pub const PETS: &str = "matPets";
    pub const CHECKPOINTS: &str = "matCheckpoints";

    pub const ALL: [&str; 4] = [LEVEL, PROGRESS, PETS, CHECKPOINTS];
}

/// Fallback used for an empty name or character id in a profile key.
pub const DEFAULT_PART: &str = "default";

/// Separator between the name and character parts of a profile key.
pub const PROFILE_SEPARATOR: &str = "__";

/// Reward ids with this prefix are medals; everything else is a companion.
pub const MEDAL_PREFIX: &str = "vault-";

/// The HUD shows at most this many reward thumbnails.
pub const HUD_THUMBNAIL_LIMIT: usize = 12;

/// Shown in place of an empty player name.
pub const ANONYMOUS_NAME: &str = "ななし";

/// Image used for reward ids that have no metadata.
pub const MISSING_IMAGE: &str = "/images/missing.png";

/// Vault island shortcut: clearing the big front roll opens the rest of the box.
pub mod vault_reveal {
    /// Technique whose clear triggers the shortcut.
    pub const TRIGGER: &str = "vault-big-front-roll";
    /// Rows shown at least, once triggered.
    pub const MIN_ROWS: usize = 4;
    /// Uncleared rows from this order on are badged NEW, once triggered.
    pub const NEW_FROM_ORDER: u32 = 3;
}
