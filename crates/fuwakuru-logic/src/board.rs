//! Island boards: the per-stage technique lists on the mat and vault islands.
//!
//! A board shows how many techniques of a stage are cleared and lists them in
//! order. The island reveals one technique past the cleared count, so a
//! fresh profile sees only the first technique of each stage.
//!
//! The vault stage has a shortcut: once the big front roll is cleared, at
//! least four rows show and every uncleared row from order 3 on is NEW. The
//! badge is display only; clearing still follows the unlock policy.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Stage};
use crate::constants::vault_reveal;
use crate::progress::Progress;
use crate::unlock::{technique_state, TechniqueState};

/// Status badge of one board row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowStatus {
    Cleared,
    /// First unlocked, not yet cleared technique in stage order, or any
    /// uncleared row the vault shortcut opens.
    New,
    Open,
    Locked,
}

impl RowStatus {
    pub fn badge(self) -> &'static str {
        match self {
            RowStatus::Cleared => "CLEARED",
            RowStatus::New => "NEW",
            RowStatus::Open => "OPEN",
            RowStatus::Locked => "LOCKED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRow {
    pub technique_id: String,
    pub title: String,
    pub order: u32,
    pub status: RowStatus,
}

/// One stage's board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageBoard {
    pub stage: Stage,
    pub title: String,
    pub cleared: usize,
    pub total: usize,
    pub rows: Vec<BoardRow>,
    /// Whether the vault shortcut is active.
    pub shortcut: bool,
}

impl StageBoard {
    pub fn build(catalog: &Catalog, stage: Stage, progress: &Progress) -> Self {
        let techniques = catalog.stage(stage);
        let shortcut = stage == Stage::Vault && progress.contains(stage, vault_reveal::TRIGGER);
        let mut new_assigned = shortcut;
        let rows = techniques
            .iter()
            .map(|t| {
                let status = match technique_state(catalog, t, progress) {
                    TechniqueState::Cleared => RowStatus::Cleared,
                    _ if shortcut && t.order >= vault_reveal::NEW_FROM_ORDER => RowStatus::New,
                    TechniqueState::Locked => RowStatus::Locked,
                    TechniqueState::Open if !new_assigned => {
                        new_assigned = true;
                        RowStatus::New
                    }
                    TechniqueState::Open => RowStatus::Open,
                };
                BoardRow {
                    technique_id: t.id.clone(),
                    title: t.title.clone(),
                    order: t.order,
                    status,
                }
            })
            .collect();

        Self {
            stage,
            title: stage.title().to_string(),
            cleared: progress.stage(stage).len(),
            total: techniques.len(),
            rows,
            shortcut,
        }
    }

    /// Completion percentage, rounded to the nearest whole number.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.cleared as f64 / self.total as f64) * 100.0).round() as u32
    }

    /// Rows the island reveals: the cleared ones plus one more, or at least
    /// four with the vault shortcut.
    pub fn visible_rows(&self) -> &[BoardRow] {
        let mut count = (self.cleared + 1).min(self.total);
        if self.shortcut {
            count = count.max(vault_reveal::MIN_ROWS);
        }
        &self.rows[..count.min(self.rows.len())]
    }
}

/// Which island page a board belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Island {
    Mat,
    Vault,
}

impl Island {
    pub fn stages(self) -> &'static [Stage] {
        match self {
            Island::Mat => &Stage::MAT,
            Island::Vault => &[Stage::Vault],
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Island::Mat => "マットアイランド",
            Island::Vault => "跳び箱アイランド",
        }
    }

    pub fn of_stage(stage: Stage) -> Self {
        match stage {
            Stage::Vault => Island::Vault,
            Stage::Netspring | Stage::Headspring => Island::Mat,
        }
    }

    /// All boards shown on this island.
    pub fn boards(self, catalog: &Catalog, progress: &Progress) -> Vec<StageBoard> {
        self.stages()
            .iter()
            .map(|stage| StageBoard::build(catalog, *stage, progress))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn fresh_board_shows_first_as_new() {
        let board = StageBoard::build(&Catalog::builtin(), Stage::Netspring, &Progress::default());
        assert_eq!(board.cleared, 0);
        assert_eq!(board.total, 4);
        assert_eq!(board.percent(), 0);
        assert_eq!(board.visible_rows().len(), 1);
        assert_eq!(board.rows[0].status, RowStatus::New);
        assert!(board.rows[1..].iter().all(|r| r.status == RowStatus::Locked));
    }

    #[test]
    fn cleared_prefix_reveals_next() {
        let progress = Progress {
            netspring: ids(&["front-roll", "big-front-roll"]),
            ..Progress::default()
        };
        let board = StageBoard::build(&Catalog::builtin(), Stage::Netspring, &progress);
        assert_eq!(board.percent(), 50);
        let statuses: Vec<_> = board.visible_rows().iter().map(|r| r.status).collect();
        assert_eq!(statuses, vec![RowStatus::Cleared, RowStatus::Cleared, RowStatus::New]);
    }

    #[test]
    fn fully_cleared_board_shows_all() {
        let progress = Progress {
            headspring: ids(&["tripod", "tripod-bridge", "stage-tripod-bridge"]),
            ..Progress::default()
        };
        let board = StageBoard::build(&Catalog::builtin(), Stage::Headspring, &progress);
        assert_eq!(board.percent(), 100);
        assert_eq!(board.visible_rows().len(), 3);
        assert!(board.rows.iter().all(|r| r.status == RowStatus::Cleared));
    }

    #[test]
    fn percent_rounds() {
        let progress = Progress {
            headspring: ids(&["tripod"]),
            ..Progress::default()
        };
        let board = StageBoard::build(&Catalog::builtin(), Stage::Headspring, &progress);
        assert_eq!(board.percent(), 33);
    }

    #[test]
    fn vault_shortcut_reveals_four_rows() {
        let progress = Progress {
            vault: ids(&["vault-front-roll", "vault-big-front-roll"]),
            ..Progress::default()
        };
        let board = StageBoard::build(&Catalog::builtin(), Stage::Vault, &progress);
        assert!(board.shortcut);
        let statuses: Vec<_> = board.visible_rows().iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![RowStatus::Cleared, RowStatus::Cleared, RowStatus::New, RowStatus::New]
        );
    }

    #[test]
    fn vault_without_big_clear_uses_normal_reveal() {
        let progress = Progress {
            vault: ids(&["vault-front-roll"]),
            ..Progress::default()
        };
        let board = StageBoard::build(&Catalog::builtin(), Stage::Vault, &progress);
        assert!(!board.shortcut);
        assert_eq!(board.visible_rows().len(), 2);
        assert_eq!(board.rows[1].status, RowStatus::New);
        assert_eq!(board.rows[2].status, RowStatus::Locked);
    }

    #[test]
    fn shortcut_only_applies_to_vault() {
        let progress = Progress {
            netspring: ids(&["vault-big-front-roll"]),
            ..Progress::default()
        };
        let board = StageBoard::build(&Catalog::builtin(), Stage::Netspring, &progress);
        assert!(!board.shortcut);
    }

    #[test]
    fn islands_group_stages() {
        let boards = Island::Mat.boards(&Catalog::builtin(), &Progress::default());
        let stages: Vec<_> = boards.iter().map(|b| b.stage).collect();
        assert_eq!(stages, vec![Stage::Netspring, Stage::Headspring]);
        assert_eq!(Island::of_stage(Stage::Vault), Island::Vault);
    }
}
