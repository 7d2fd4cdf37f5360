//! HUD presenter.
//!
//! The HUD re-reads every store from scratch whenever it refreshes; it never
//! patches its snapshot incrementally. Refreshes come from two places: page
//! lifecycle triggers ([`HudTrigger`]) and the change feed of an
//! [`ObservedStore`], drained by [`HudPresenter::poll`].

use std::sync::mpsc::{Receiver, TryRecvError};

use fuwakuru_logic::hud::{HudInputs, HudSnapshot};

use crate::backend::{KeyValueStore, ObservedStore, StoreChange};
use crate::reset::NamespaceMatcher;
use crate::stores::identity::PlayerIdentity;
use crate::stores::{level, progress, rewards};

/// Lifecycle events that make the HUD reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudTrigger {
    Navigation,
    Focus,
    VisibilityChange,
    /// Another writer touched storage.
    StorageEvent,
}

/// Read everything the HUD shows for the current player.
pub fn load_snapshot<S: KeyValueStore + ?Sized>(store: &S) -> HudSnapshot {
    let identity = PlayerIdentity::load(store);
    let profile = identity.profile_key();
    let progress = progress::load(store, &profile);
    let rewards = rewards::load(store, &profile);

    HudSnapshot::build(HudInputs {
        name: &identity.name,
        character_id: identity.character_id.as_deref().unwrap_or_default(),
        character_img: identity.character_img.as_deref(),
        level: level::load(store, &profile),
        progress: &progress,
        rewards: &rewards,
    })
}

#[derive(Debug, Default)]
pub struct HudPresenter {
    snapshot: HudSnapshot,
    feed: Option<Receiver<StoreChange>>,
    matcher: NamespaceMatcher,
}

impl HudPresenter {
    /// A presenter with no change feed; it refreshes on triggers only.
    pub fn new() -> Self {
        Self::default()
    }

    /// A presenter subscribed to `store`'s change feed.
    pub fn subscribed<S: KeyValueStore>(store: &mut ObservedStore<S>) -> Self {
        let mut presenter = Self {
            feed: Some(store.subscribe()),
            ..Self::default()
        };
        presenter.reload(&*store);
        presenter
    }

    pub fn snapshot(&self) -> &HudSnapshot {
        &self.snapshot
    }

    pub fn reload<S: KeyValueStore + ?Sized>(&mut self, store: &S) -> &HudSnapshot {
        self.snapshot = load_snapshot(store);
        &self.snapshot
    }

    pub fn on_trigger<S: KeyValueStore + ?Sized>(&mut self, trigger: HudTrigger, store: &S) -> &HudSnapshot {
        log::trace!("HUD refresh on {:?}", trigger);
        self.reload(store)
    }

    /// Drain pending changes and reload if any touched a tracker key.
    /// Returns whether a reload happened.
    pub fn poll<S: KeyValueStore + ?Sized>(&mut self, store: &S) -> bool {
        let Some(feed) = &self.feed else {
            return false;
        };

        let mut relevant = false;
        let mut closed = false;
        loop {
            match feed.try_recv() {
                Ok(change) => relevant |= self.matcher.matches(&change.key),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    closed = true;
                    break;
                }
            }
        }
        if closed {
            log::debug!("HUD change feed closed");
            self.feed = None;
        }

        if relevant {
            self.reload(store);
        }
        relevant
    }
}
