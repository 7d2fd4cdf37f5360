//! Integration tests for a full training session against real backends.
//!
//! Exercises: character select → technique page → island board → HUD
//! → reset, over memory and JSON-file stores.

use fuwakuru_core::backend::{FileStore, KeyValueStore, MemoryStore, ObservedStore};
use fuwakuru_core::error::ClearError;
use fuwakuru_core::hud::HudPresenter;
use fuwakuru_core::reset::reset_all;
use fuwakuru_core::stores::{checkpoints, identity, level, progress, rewards};
use fuwakuru_core::tracker::{clear_checkpoint, open_technique, ClearOutcome};
use fuwakuru_logic::catalog::{Catalog, Stage};
use fuwakuru_logic::profile::ProfileKey;
use fuwakuru_logic::progress::ProgressPatch;
use fuwakuru_logic::unlock::is_unlocked;

// ── Helpers ────────────────────────────────────────────────────────────

fn start(store: &mut impl KeyValueStore) -> ProfileKey {
    identity::start_adventure(store, "Yuki", Some("chara2"), Some("/images/chara2.png")).unwrap()
}

fn clear_all(store: &mut impl KeyValueStore, catalog: &Catalog, key: &ProfileKey, id: &str) {
    let count = catalog.get(id).unwrap().checkpoint_count();
    for i in 0..count {
        clear_checkpoint(store, catalog, key, id, i).unwrap();
    }
}

// ── Scenarios ──────────────────────────────────────────────────────────

#[test]
fn defaults_for_untouched_profile() {
    let store = MemoryStore::new();
    let key = ProfileKey::derive("Nobody", Some("chara9"));
    assert_eq!(level::load(&store, &key), 1);
    assert_eq!(progress::load(&store, &key).cleared_total(), 0);
    assert!(rewards::load(&store, &key).is_empty());
    assert!(checkpoints::load(&store, &key).is_empty());
}

#[test]
fn front_roll_session() {
    let mut store = MemoryStore::new();
    let catalog = Catalog::builtin();
    let key = start(&mut store);
    assert_eq!(key.as_str(), "Yuki__chara2");

    clear_all(&mut store, &catalog, &key, "front-roll");

    assert_eq!(level::load(&store, &key), 4);
    assert_eq!(progress::load(&store, &key).netspring, vec!["front-roll"]);
    assert_eq!(rewards::load(&store, &key), vec!["pink-cat"]);
}

#[test]
fn second_technique_unlocks_after_first() {
    let mut store = MemoryStore::new();
    let catalog = Catalog::builtin();
    let key = start(&mut store);
    let big = catalog.get("big-front-roll").unwrap();

    assert!(!is_unlocked(&catalog, big, &progress::load(&store, &key)));
    assert_eq!(
        clear_checkpoint(&mut store, &catalog, &key, "big-front-roll", 0),
        Err(ClearError::Locked("big-front-roll".into()))
    );

    progress::mark_cleared(&mut store, &key, Stage::Netspring, "front-roll");
    assert!(is_unlocked(&catalog, big, &progress::load(&store, &key)));
    assert!(open_technique(&mut store, &catalog, &key, "big-front-roll").unwrap().unlocked);
}

#[test]
fn merge_save_across_stages() {
    let mut store = MemoryStore::new();
    let key = ProfileKey::derive("Yuki", Some("chara2"));
    progress::merge_save(&mut store, &key, ProgressPatch::stage(Stage::Netspring, vec!["x".into()]));
    progress::merge_save(&mut store, &key, ProgressPatch::stage(Stage::Headspring, vec!["y".into()]));

    let loaded = progress::load(&store, &key);
    assert_eq!(loaded.netspring, vec!["x"]);
    assert_eq!(loaded.headspring, vec!["y"]);
}

#[test]
fn profiles_do_not_share_state() {
    let mut store = MemoryStore::new();
    let catalog = Catalog::builtin();
    let yuki = start(&mut store);
    clear_all(&mut store, &catalog, &yuki, "front-roll");

    let other = identity::start_adventure(&mut store, "Yuki", Some("chara3"), Some("/images/chara3.png")).unwrap();
    assert_ne!(yuki, other);
    assert_eq!(level::load(&store, &other), 1);
    assert!(rewards::load(&store, &other).is_empty());
    assert_eq!(level::load(&store, &yuki), 4);
}

#[test]
fn clearing_a_cleared_technique_again_changes_nothing() {
    let mut store = MemoryStore::new();
    let catalog = Catalog::builtin();
    let key = start(&mut store);
    clear_all(&mut store, &catalog, &key, "vault-front-roll");

    for i in 0..4 {
        assert_eq!(
            clear_checkpoint(&mut store, &catalog, &key, "vault-front-roll", i).unwrap(),
            ClearOutcome::AlreadyDone
        );
    }
    assert_eq!(level::load(&store, &key), 5);
    assert_eq!(rewards::load(&store, &key), vec!["vault-medal1"]);
}

#[test]
fn hud_follows_technique_page() {
    let mut store = ObservedStore::new(MemoryStore::new());
    let catalog = Catalog::builtin();
    let mut hud = HudPresenter::subscribed(&mut store);
    let key = start(&mut store);
    hud.poll(&store);
    assert_eq!(hud.snapshot().level, 1);

    clear_all(&mut store, &catalog, &key, "front-roll");
    assert!(hud.poll(&store));
    let snapshot = hud.snapshot();
    assert_eq!(snapshot.level, 4);
    assert_eq!(snapshot.companions, 1);
    assert_eq!(snapshot.medals, 0);
    assert_eq!(snapshot.thumbnails[0].reward_id, "pink-cat");
}

#[test]
fn file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local.json");
    let catalog = Catalog::builtin();

    let key = {
        let mut store = FileStore::open(&path).unwrap();
        let key = start(&mut store);
        clear_checkpoint(&mut store, &catalog, &key, "tripod", 0).unwrap();
        key
    };

    let store = FileStore::open(&path).unwrap();
    assert_eq!(level::load(&store, &key), 2);
    assert_eq!(checkpoints::load(&store, &key)["tripod"], vec![true, false, false, false]);
}

#[test]
fn reset_keeps_unrelated_keys() {
    let mut local = MemoryStore::new();
    let catalog = Catalog::builtin();
    let key = start(&mut local);
    clear_all(&mut local, &catalog, &key, "front-roll");
    local.set("volume", "3").unwrap();
    local.set("material-theme", "dark").unwrap();

    let mut session = MemoryStore::from_entries([("matRpgPlayerName", "Yuki"), ("tab", "1")]);
    let report = reset_all(&mut local, Some(&mut session), None).unwrap();

    // name, char, char img, level, progress, pets, checkpoints + session name
    assert_eq!(report.deleted, 8);
    assert_eq!(local.keys().unwrap(), vec!["material-theme", "volume"]);
    assert_eq!(session.keys().unwrap(), vec!["tab"]);
    assert!(!identity::PlayerIdentity::load(&local).can_enter());
}
