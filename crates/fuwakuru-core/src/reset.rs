//! Wipe every tracker key from storage.
//!
//! A key belongs to the tracker when it is one of the known exact names,
//! starts with one of the per-profile prefixes, or matches the namespace
//! pattern: `mat` or `matrpg` in any case, followed by a separator or a
//! camelCase capital. `material-theme` is left alone; `MATRPG_debug` and
//! `mat:flag` are removed.

use std::sync::LazyLock;

use fuwakuru_logic::constants::{global_keys, profile_prefixes};
use regex::Regex;

use crate::backend::KeyValueStore;
use crate::cache::AssetCache;
use crate::error::StoreError;

static NAMESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:mat(?:rpg)?)(?:[_:\-.]|[A-Z])").expect("namespace pattern is valid")
});

const EXACT: [&str; 7] = [
    global_keys::PLAYER_NAME,
    global_keys::SELECTED_CHAR,
    global_keys::SELECTED_CHAR_IMG,
    profile_prefixes::LEVEL,
    profile_prefixes::PROGRESS,
    profile_prefixes::PETS,
    profile_prefixes::CHECKPOINTS,
];

/// Decides which storage keys are tracker keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamespaceMatcher;

impl NamespaceMatcher {
    pub fn matches(&self, key: &str) -> bool {
        EXACT.contains(&key)
            || profile_prefixes::ALL.iter().any(|prefix| {
                key.strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('_'))
            })
            || NAMESPACE.is_match(key)
    }
}

/// What a reset removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResetReport {
    /// Storage entries deleted across both scopes.
    pub deleted: usize,
    /// Cache entries cleared, `None` when there was no cache or clearing failed.
    pub cache_cleared: Option<usize>,
}

/// Delete matching keys from one scope. Returns how many were present and
/// removed.
fn purge<S: KeyValueStore + ?Sized>(store: &mut S, matcher: NamespaceMatcher) -> Result<usize, StoreError> {
    let mut deleted = 0;
    for key in store.keys()? {
        if !matcher.matches(&key) {
            continue;
        }
        match store.delete(&key) {
            Ok(()) => deleted += 1,
            Err(e) => log::warn!("Could not delete {}: {}", key, e),
        }
    }
    Ok(deleted)
}

/// Remove every tracker key from the local and session scopes, then clear
/// the asset cache.
///
/// Only a failure to enumerate the local scope is an error. Session-scope
/// and cache failures are logged and skipped.
pub fn reset_all(
    local: &mut dyn KeyValueStore,
    session: Option<&mut dyn KeyValueStore>,
    cache: Option<&mut dyn AssetCache>,
) -> Result<ResetReport, StoreError> {
    let matcher = NamespaceMatcher;
    let mut deleted = purge(local, matcher)?;

    if let Some(session) = session {
        match purge(session, matcher) {
            Ok(n) => deleted += n,
            Err(e) => log::warn!("Skipping session scope: {}", e),
        }
    }

    let cache_cleared = cache.and_then(|cache| match cache.clear() {
        Ok(n) => Some(n),
        Err(e) => {
            log::warn!("Could not clear asset cache: {}", e);
            None
        }
    });

    log::info!("Reset removed {} entries", deleted);
    Ok(ResetReport {
        deleted,
        cache_cleared,
    })
}
