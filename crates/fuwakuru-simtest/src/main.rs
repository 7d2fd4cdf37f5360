//! Fuwakuru Headless Session Harness
//!
//! Plays complete training sessions against in-memory storage and checks
//! the catalog, unlock chain, rewards, HUD and reset end to end.
//! Runs entirely in-process with no files and no terminal UI.
//!
//! Usage:
//!   cargo run -p fuwakuru-simtest
//!   cargo run -p fuwakuru-simtest -- --verbose

use std::collections::HashSet;

use fuwakuru_core::backend::{DisabledStore, KeyValueStore, MemoryStore};
use fuwakuru_core::engine::{Storage, Tracker};
use fuwakuru_core::reset::{reset_all, NamespaceMatcher};
use fuwakuru_core::stores::{level, progress, rewards};
use fuwakuru_core::tracker::{clear_checkpoint, ClearOutcome};
use fuwakuru_logic::board::{Island, RowStatus};
use fuwakuru_logic::catalog::{validate_catalog, Catalog, Stage};
use fuwakuru_logic::profile::ProfileKey;
use fuwakuru_logic::progress::Progress;
use fuwakuru_logic::rewards::{reward_for_technique, RewardKind};
use fuwakuru_logic::unlock::is_unlocked;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Fuwakuru Session Harness ===\n");

    let catalog = Catalog::builtin();
    let mut results = Vec::new();

    // 1. Catalog integrity
    results.extend(validate_catalog_data(&catalog, verbose));

    // 2. Reward table
    results.extend(validate_reward_table(&catalog, verbose));

    // 3. Unlock chain sweep
    results.extend(validate_unlock_chain(&catalog, verbose));

    // 4. Full playthrough
    results.extend(validate_playthrough(&catalog, verbose));

    // 5. Storage failures
    results.extend(validate_storage_failures(&catalog, verbose));

    // 6. Reset sweep
    results.extend(validate_reset(&catalog, verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

/// In-memory tracker with a started adventure. Records whether the start succeeded.
fn started(results: &mut Vec<TestResult>, section: &str) -> Tracker {
    let mut tracker = Tracker::in_memory();
    let start = tracker.start_adventure("Yuki", Some("chara2"), Some("/images/chara2.png"));
    results.push(TestResult {
        name: format!("{}_start", section),
        passed: start.is_ok(),
        detail: match start {
            Ok(profile) => format!("profile {}", profile.as_str()),
            Err(e) => e.to_string(),
        },
    });
    tracker
}

// ── 1. Catalog ──────────────────────────────────────────────────────────

fn validate_catalog_data(catalog: &Catalog, verbose: bool) -> Vec<TestResult> {
    println!("--- Catalog ---");
    let mut results = Vec::new();

    let problems = validate_catalog(catalog);
    results.push(TestResult {
        name: "catalog_valid".into(),
        passed: problems.is_empty(),
        detail: if problems.is_empty() {
            format!("{} techniques, no problems", catalog.len())
        } else {
            format!("{:?}", problems)
        },
    });

    for stage in Stage::ALL {
        let count = catalog.stage(stage).len();
        let checkpoints: usize = catalog
            .stage(stage)
            .iter()
            .map(|t| t.checkpoint_count())
            .sum();
        if verbose {
            println!("  {:<10} {} techniques, {} checkpoints", stage, count, checkpoints);
        }
        results.push(TestResult {
            name: format!("catalog_{}_not_empty", stage),
            passed: count > 0,
            detail: format!("{} techniques", count),
        });
    }

    // Catalog survives a JSON round trip in stage order
    let round_trip = serde_json::to_string(catalog)
        .ok()
        .and_then(|json| serde_json::from_str::<Catalog>(&json).ok());
    results.push(TestResult {
        name: "catalog_json_round_trip".into(),
        passed: round_trip.as_ref() == Some(catalog),
        detail: "serialize → parse gives the same catalog".into(),
    });

    let missing_video: Vec<_> = catalog
        .all()
        .iter()
        .filter(|t| t.video.is_none())
        .map(|t| t.id.as_str())
        .collect();
    results.push(TestResult {
        name: "catalog_videos".into(),
        passed: missing_video.is_empty(),
        detail: if missing_video.is_empty() {
            "every technique has a video".into()
        } else {
            format!("no video: {}", missing_video.join(", "))
        },
    });

    results
}

// ── 2. Rewards ──────────────────────────────────────────────────────────

fn validate_reward_table(catalog: &Catalog, _verbose: bool) -> Vec<TestResult> {
    println!("--- Rewards ---");
    let mut results = Vec::new();

    let unmapped: Vec<_> = catalog
        .all()
        .iter()
        .filter(|t| reward_for_technique(&t.id).is_none())
        .map(|t| t.id.as_str())
        .collect();
    results.push(TestResult {
        name: "rewards_total".into(),
        passed: unmapped.is_empty(),
        detail: if unmapped.is_empty() {
            "every technique grants a reward".into()
        } else {
            format!("unmapped: {}", unmapped.join(", "))
        },
    });

    let distinct: HashSet<_> = catalog
        .all()
        .iter()
        .filter_map(|t| reward_for_technique(&t.id))
        .collect();
    results.push(TestResult {
        name: "rewards_distinct".into(),
        passed: distinct.len() == catalog.len(),
        detail: format!("{} distinct rewards", distinct.len()),
    });

    let wrong_kind: Vec<_> = catalog
        .all()
        .iter()
        .filter(|t| {
            let expected = if t.stage == Stage::Vault {
                RewardKind::Medal
            } else {
                RewardKind::Companion
            };
            reward_for_technique(&t.id).is_some_and(|r| r.kind() != expected)
        })
        .map(|t| t.id.as_str())
        .collect();
    results.push(TestResult {
        name: "rewards_kind_by_island".into(),
        passed: wrong_kind.is_empty(),
        detail: "vault → medal, mat → companion".into(),
    });

    results
}

// ── 3. Unlock chain ─────────────────────────────────────────────────────

fn validate_unlock_chain(catalog: &Catalog, _verbose: bool) -> Vec<TestResult> {
    println!("--- Unlock Chain ---");
    let mut results = Vec::new();

    // For each stage, clear techniques one at a time and check that exactly
    // the next one opens.
    for stage in Stage::ALL {
        let techniques = catalog.stage(stage);
        let mut progress = Progress::default();
        let mut violations = Vec::new();
        for (cleared, _) in techniques.iter().enumerate() {
            for (i, t) in techniques.iter().enumerate() {
                let expected = i <= cleared;
                if is_unlocked(catalog, t, &progress) != expected {
                    violations.push(format!("{} after {} cleared", t.id, cleared));
                }
            }
            progress.mark_cleared(stage, &techniques[cleared].id);
        }
        results.push(TestResult {
            name: format!("unlock_chain_{}", stage),
            passed: violations.is_empty(),
            detail: if violations.is_empty() {
                format!("{} steps", techniques.len())
            } else {
                violations.join("; ")
            },
        });
    }

    // Clearing a later technique alone never opens earlier gaps
    let mut skipped = Progress::default();
    skipped.mark_cleared(Stage::Netspring, "big-front-roll");
    let bridge = catalog.get("front-roll-bridge");
    results.push(TestResult {
        name: "unlock_needs_all_lower".into(),
        passed: bridge.is_some_and(|t| !is_unlocked(catalog, t, &skipped)),
        detail: "order 3 stays locked without order 1".into(),
    });

    results
}

// ── 4. Playthrough ──────────────────────────────────────────────────────

fn validate_playthrough(catalog: &Catalog, verbose: bool) -> Vec<TestResult> {
    println!("--- Playthrough ---");
    let mut results = Vec::new();
    let mut tracker = started(&mut results, "playthrough");

    let total_checkpoints: usize = catalog.all().iter().map(|t| t.checkpoint_count()).sum();
    let mut flips = 0;
    let mut errors = Vec::new();
    for t in catalog.all() {
        for i in 0..t.checkpoint_count() {
            match tracker.clear_checkpoint(&t.id, i) {
                Ok(ClearOutcome::Cleared(_)) => flips += 1,
                Ok(ClearOutcome::AlreadyDone) => errors.push(format!("{}#{} already done", t.id, i)),
                Err(e) => errors.push(e.to_string()),
            }
        }
        if verbose {
            println!("  cleared {:<24} level {}", t.id, tracker.hud().level);
        }
    }
    results.push(TestResult {
        name: "playthrough_no_errors".into(),
        passed: errors.is_empty(),
        detail: if errors.is_empty() {
            format!("{} checkpoints flipped", flips)
        } else {
            errors.join("; ")
        },
    });

    let hud = tracker.hud();
    results.push(TestResult {
        name: "playthrough_level".into(),
        passed: hud.level as usize == 1 + total_checkpoints,
        detail: format!("level {} (expected {})", hud.level, 1 + total_checkpoints),
    });
    results.push(TestResult {
        name: "playthrough_rewards".into(),
        passed: hud.companions == 7 && hud.medals == 4,
        detail: format!("{} companions, {} medals", hud.companions, hud.medals),
    });
    results.push(TestResult {
        name: "playthrough_cleared_total".into(),
        passed: hud.cleared_total == catalog.len(),
        detail: format!("{} cleared", hud.cleared_total),
    });

    let all_cleared = [Island::Mat, Island::Vault].into_iter().all(|island| {
        tracker
            .boards(island)
            .iter()
            .all(|b| b.percent() == 100 && b.rows.iter().all(|r| r.status == RowStatus::Cleared))
    });
    results.push(TestResult {
        name: "playthrough_boards_complete".into(),
        passed: all_cleared,
        detail: "every board at 100%".into(),
    });

    // Repeat clear changes nothing
    let before = tracker.hud();
    let repeat = tracker.clear_checkpoint("front-roll", 0);
    results.push(TestResult {
        name: "playthrough_repeat_noop".into(),
        passed: repeat == Ok(ClearOutcome::AlreadyDone) && tracker.hud() == before,
        detail: "second clear of a checkpoint is ignored".into(),
    });

    // Island reset keeps the other island
    tracker.reset_island(Island::Mat);
    let after = tracker.progress();
    results.push(TestResult {
        name: "playthrough_reset_mat_island".into(),
        passed: after.netspring.is_empty()
            && after.headspring.is_empty()
            && after.vault.len() == 4
            && tracker.hud().level == 1,
        detail: format!("vault kept {} techniques", after.vault.len()),
    });

    results
}

// ── 5. Storage failures ─────────────────────────────────────────────────

fn validate_storage_failures(catalog: &Catalog, _verbose: bool) -> Vec<TestResult> {
    println!("--- Storage Failures ---");
    let mut results = Vec::new();
    let key = ProfileKey::derive("Yuki", Some("chara2"));

    // Full store: writes are dropped, the handler still answers
    let mut full = MemoryStore::with_quota(0);
    let outcome = clear_checkpoint(&mut full, catalog, &key, "front-roll", 0);
    results.push(TestResult {
        name: "quota_write_dropped".into(),
        passed: matches!(&outcome, Ok(ClearOutcome::Cleared(c)) if c.level == 2) && full.is_empty(),
        detail: "handler returns in-memory result, store stays empty".into(),
    });

    // Disabled store reads as defaults
    let disabled = DisabledStore;
    results.push(TestResult {
        name: "disabled_reads_default".into(),
        passed: level::load(&disabled, &key) == 1
            && progress::load(&disabled, &key).cleared_total() == 0
            && rewards::load(&disabled, &key).is_empty(),
        detail: "level 1, no progress, no rewards".into(),
    });

    // Malformed values degrade to defaults
    let garbage = MemoryStore::from_entries([
        (key.level_key(), "abc".to_string()),
        (key.progress_key(), "{not json".to_string()),
        (key.rewards_key(), "42".to_string()),
    ]);
    results.push(TestResult {
        name: "malformed_reads_default".into(),
        passed: level::load(&garbage, &key) == 1
            && progress::load(&garbage, &key).cleared_total() == 0
            && rewards::load(&garbage, &key).is_empty(),
        detail: "garbage values read as defaults".into(),
    });

    results
}

// ── 6. Reset ────────────────────────────────────────────────────────────

fn validate_reset(catalog: &Catalog, _verbose: bool) -> Vec<TestResult> {
    println!("--- Reset ---");
    let mut results = Vec::new();

    let mut local = MemoryStore::new();
    let key = fuwakuru_core::stores::identity::start_adventure(
        &mut local,
        "Yuki",
        Some("chara2"),
        Some("/images/chara2.png"),
    );
    if let Ok(key) = &key {
        let _ = clear_checkpoint(&mut local, catalog, key, "front-roll", 0);
    }
    for (k, v) in [("volume", "3"), ("material-theme", "dark"), ("MATRPG_debug", "1")] {
        let _ = local.set(k, v);
    }
    let mut session = MemoryStore::from_entries([("mat:flag", "1"), ("tab", "2")]);

    let report = reset_all(&mut local, Some(&mut session), None);
    let matcher = NamespaceMatcher;
    let leftovers: Vec<String> = local
        .keys()
        .unwrap_or_default()
        .into_iter()
        .chain(session.keys().unwrap_or_default())
        .filter(|k| matcher.matches(k))
        .collect();
    results.push(TestResult {
        name: "reset_removes_namespace".into(),
        passed: report.is_ok() && leftovers.is_empty(),
        detail: format!(
            "{} removed, {} left",
            report.map(|r| r.deleted).unwrap_or(0),
            leftovers.len()
        ),
    });

    let kept = local.get("volume").is_some()
        && local.get("material-theme").is_some()
        && session.get("tab").is_some();
    results.push(TestResult {
        name: "reset_keeps_unrelated".into(),
        passed: kept,
        detail: "volume, material-theme, tab preserved".into(),
    });

    // Session scope unavailable: reset still succeeds
    let mut tracker = Tracker::in_memory();
    tracker.storage = Storage::local_only(MemoryStore::from_entries([("matLevel_a__b", "3")]))
        .with_session(DisabledStore);
    results.push(TestResult {
        name: "reset_disabled_session".into(),
        passed: tracker.reset_all().is_ok_and(|r| r.deleted == 1),
        detail: "session failure swallowed".into(),
    });

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn started_records_start_result() {
        let mut results = Vec::new();
        let tracker = started(&mut results, "demo");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "demo_start");
        assert!(results[0].passed, "{}", results[0].detail);
        assert!(tracker.identity().can_enter());
    }
}
