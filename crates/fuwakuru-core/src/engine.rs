//! Tracker engine - main entry point for front ends

use fuwakuru_logic::board::{Island, StageBoard};
use fuwakuru_logic::catalog::Catalog;
use fuwakuru_logic::hud::HudSnapshot;
use fuwakuru_logic::profile::ProfileKey;
use fuwakuru_logic::progress::Progress;
use fuwakuru_logic::routes::{guard, Route};

use crate::backend::{KeyValueStore, MemoryStore};
use crate::cache::AssetCache;
use crate::error::{ClearError, SnapshotError, StartError, StoreError};
use crate::reset::{reset_all, ResetReport};
use crate::stores::identity::{self, PlayerIdentity};
use crate::stores::progress;
use crate::tracker::{self, ClearOutcome, TechniqueView};
use crate::{hud, persistence};

/// Every storage scope the tracker can touch.
pub struct Storage {
    /// Persistent scope. All tracker state lives here.
    pub local: Box<dyn KeyValueStore>,
    /// Session scope, if the front end has one.
    pub session: Option<Box<dyn KeyValueStore>>,
    /// Cached network assets, if any.
    pub cache: Option<Box<dyn AssetCache>>,
}

impl Storage {
    pub fn local_only(local: impl KeyValueStore + 'static) -> Self {
        Self {
            local: Box::new(local),
            session: None,
            cache: None,
        }
    }

    pub fn with_session(mut self, session: impl KeyValueStore + 'static) -> Self {
        self.session = Some(Box::new(session));
        self
    }

    pub fn with_cache(mut self, cache: impl AssetCache + 'static) -> Self {
        self.cache = Some(Box::new(cache));
        self
    }

    /// Delete every tracker key from both scopes and clear the cache.
    pub fn reset(&mut self) -> Result<ResetReport, StoreError> {
        let session = self
            .session
            .as_mut()
            .map(|s| s.as_mut() as &mut dyn KeyValueStore);
        let cache = self.cache.as_mut().map(|c| c.as_mut() as &mut dyn AssetCache);
        reset_all(self.local.as_mut(), session, cache)
    }
}

/// Main tracker engine
pub struct Tracker {
    /// Storage scopes
    pub storage: Storage,
    /// Technique catalog
    pub catalog: Catalog,
}

impl Tracker {
    pub fn new(storage: Storage, catalog: Catalog) -> Self {
        Self { storage, catalog }
    }

    /// In-memory tracker over the built-in catalog
    pub fn in_memory() -> Self {
        Self::new(Storage::local_only(MemoryStore::new()), Catalog::builtin())
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.storage.local.as_ref()
    }

    pub fn identity(&self) -> PlayerIdentity {
        PlayerIdentity::load(self.store())
    }

    /// Profile key of the current player
    pub fn profile(&self) -> ProfileKey {
        self.identity().profile_key()
    }

    pub fn choose_character(&mut self, character_id: &str, img: &str) {
        identity::choose_character(self.storage.local.as_mut(), character_id, img);
    }

    pub fn start_adventure(
        &mut self,
        name: &str,
        character_id: Option<&str>,
        character_img: Option<&str>,
    ) -> Result<ProfileKey, StartError> {
        identity::start_adventure(self.storage.local.as_mut(), name, character_id, character_img)
    }

    /// Where navigating to `route` actually lands
    pub fn navigate(&self, route: Route) -> Route {
        guard(route, self.identity().can_enter(), &self.catalog)
    }

    pub fn progress(&self) -> Progress {
        progress::load(self.store(), &self.profile())
    }

    pub fn boards(&self, island: Island) -> Vec<StageBoard> {
        island.boards(&self.catalog, &self.progress())
    }

    pub fn open_technique(&mut self, technique_id: &str) -> Result<TechniqueView, ClearError> {
        let profile = self.profile();
        tracker::open_technique(self.storage.local.as_mut(), &self.catalog, &profile, technique_id)
    }

    pub fn clear_checkpoint(&mut self, technique_id: &str, index: usize) -> Result<ClearOutcome, ClearError> {
        let profile = self.profile();
        tracker::clear_checkpoint(
            self.storage.local.as_mut(),
            &self.catalog,
            &profile,
            technique_id,
            index,
        )
    }

    /// Clear the current player's progress on one island
    pub fn reset_island(&mut self, island: Island) -> Progress {
        let profile = self.profile();
        tracker::reset_island_progress(self.storage.local.as_mut(), &profile, island)
    }

    pub fn hud(&self) -> HudSnapshot {
        hud::load_snapshot(self.store())
    }

    /// Wipe all tracker data from every scope
    pub fn reset_all(&mut self) -> Result<ResetReport, StoreError> {
        self.storage.reset()
    }

    /// Export tracker data to a writer
    pub fn save<W: std::io::Write>(&self, writer: W) -> Result<usize, SnapshotError> {
        persistence::export_snapshot(self.store(), writer)
    }

    /// Import tracker data from a reader
    pub fn load<R: std::io::Read>(&mut self, reader: R) -> Result<usize, SnapshotError> {
        persistence::import_snapshot(reader, self.storage.local.as_mut())
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::in_memory()
    }
}
