//! Snapshot export/import for moving a player's data between devices.
//!
//! Uses bincode for a compact binary dump of every tracker key in a store.
//! Keys outside the tracker namespace are never exported.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::backend::KeyValueStore;
use crate::error::SnapshotError;
use crate::reset::NamespaceMatcher;

/// Version number for the snapshot format (increment when format changes)
const SNAPSHOT_VERSION: u32 = 1;

/// Serializable dump of tracker keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,
    /// Key/value pairs in key order
    pub entries: Vec<(String, String)>,
}

impl Snapshot {
    /// Collect every tracker key from `store`.
    pub fn capture<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self, SnapshotError> {
        let matcher = NamespaceMatcher;
        let mut keys: Vec<String> = store
            .keys()?
            .into_iter()
            .filter(|key| matcher.matches(key))
            .collect();
        keys.sort();

        let entries = keys
            .into_iter()
            .filter_map(|key| store.get(&key).map(|value| (key, value)))
            .collect();

        Ok(Self {
            version: SNAPSHOT_VERSION,
            entries,
        })
    }
}

/// Write every tracker key of `store` to `writer`. Returns the entry count.
pub fn export_snapshot<S, W>(store: &S, writer: W) -> Result<usize, SnapshotError>
where
    S: KeyValueStore + ?Sized,
    W: Write,
{
    let snapshot = Snapshot::capture(store)?;
    bincode::serialize_into(writer, &snapshot)?;
    log::info!("Exported {} entries", snapshot.entries.len());
    Ok(snapshot.entries.len())
}

/// Restore a snapshot into `store`, overwriting keys it contains.
/// Returns the number of entries written.
pub fn import_snapshot<R, S>(reader: R, store: &mut S) -> Result<usize, SnapshotError>
where
    R: Read,
    S: KeyValueStore + ?Sized,
{
    let snapshot: Snapshot = bincode::deserialize_from(reader)?;

    if snapshot.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::VersionMismatch {
            expected: SNAPSHOT_VERSION,
            found: snapshot.version,
        });
    }

    for (key, value) in &snapshot.entries {
        store.set(key, value)?;
    }
    log::info!("Imported {} entries", snapshot.entries.len());
    Ok(snapshot.entries.len())
}
