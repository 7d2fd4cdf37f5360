//! HUD view model: avatar, level, companion/medal counts and thumbnails.

use serde::{Deserialize, Serialize};

use crate::characters::avatar_src;
use crate::constants::{ANONYMOUS_NAME, HUD_THUMBNAIL_LIMIT, MISSING_IMAGE};
use crate::progress::Progress;
use crate::rewards::{Reward, RewardKind};

/// One reward thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub reward_id: String,
    pub label: String,
    pub img: String,
    pub kind: RewardKind,
}

impl Thumbnail {
    pub fn for_id(id: &str) -> Self {
        match id.parse::<Reward>() {
            Ok(reward) => Self {
                reward_id: id.to_string(),
                label: reward.label().to_string(),
                img: reward.image().to_string(),
                kind: reward.kind(),
            },
            Err(()) => Self {
                reward_id: id.to_string(),
                label: id.to_string(),
                img: MISSING_IMAGE.to_string(),
                kind: RewardKind::of_id(id),
            },
        }
    }
}

/// Everything the HUD renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub name: String,
    pub avatar: String,
    pub level: u32,
    pub companions: usize,
    pub medals: usize,
    pub cleared_total: usize,
    pub thumbnails: Vec<Thumbnail>,
    /// Rewards beyond the thumbnail limit.
    pub overflow: usize,
}

/// Raw inputs read from storage.
#[derive(Debug, Clone)]
pub struct HudInputs<'a> {
    pub name: &'a str,
    pub character_id: &'a str,
    pub character_img: Option<&'a str>,
    pub level: u32,
    pub progress: &'a Progress,
    pub rewards: &'a [String],
}

static NO_PROGRESS: Progress = Progress {
    netspring: Vec::new(),
    headspring: Vec::new(),
    vault: Vec::new(),
};

impl Default for HudInputs<'_> {
    fn default() -> Self {
        Self {
            name: "",
            character_id: "",
            character_img: None,
            level: 1,
            progress: &NO_PROGRESS,
            rewards: &[],
        }
    }
}

impl HudSnapshot {
    pub fn build(inputs: HudInputs<'_>) -> Self {
        let medals = inputs
            .rewards
            .iter()
            .filter(|id| RewardKind::of_id(id) == RewardKind::Medal)
            .count();
        let name = if inputs.name.is_empty() {
            ANONYMOUS_NAME.to_string()
        } else {
            inputs.name.to_string()
        };

        Self {
            name,
            avatar: avatar_src(inputs.character_img, inputs.character_id),
            level: inputs.level,
            companions: inputs.rewards.len() - medals,
            medals,
            cleared_total: inputs.progress.cleared_total(),
            thumbnails: inputs
                .rewards
                .iter()
                .take(HUD_THUMBNAIL_LIMIT)
                .map(|id| Thumbnail::for_id(id))
                .collect(),
            overflow: inputs.rewards.len().saturating_sub(HUD_THUMBNAIL_LIMIT),
        }
    }
}

impl Default for HudSnapshot {
    fn default() -> Self {
        Self::build(HudInputs::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn counts_split_by_medal_prefix() {
        let rewards = ids(&["pink-cat", "vault-medal1", "green-cat"]);
        let progress = Progress {
            netspring: ids(&["front-roll", "big-front-roll"]),
            vault: ids(&["vault-front-roll"]),
            ..Progress::default()
        };
        let hud = HudSnapshot::build(HudInputs {
            name: "Yuki",
            character_id: "chara2",
            character_img: Some("/images/chara2.png"),
            level: 7,
            progress: &progress,
            rewards: &rewards,
        });
        assert_eq!(hud.companions, 2);
        assert_eq!(hud.medals, 1);
        assert_eq!(hud.cleared_total, 3);
        assert_eq!(hud.avatar, "/images/chara2.png");
        assert_eq!(hud.level, 7);
        assert_eq!(hud.thumbnails[0].label, "ピンキー");
    }

    #[test]
    fn empty_name_shows_placeholder() {
        let hud = HudSnapshot::default();
        assert_eq!(hud.name, ANONYMOUS_NAME);
        assert_eq!(hud.level, 1);
        assert_eq!(hud.avatar, "/images/char-default.png");
    }

    #[test]
    fn thumbnails_capped_with_overflow() {
        let rewards: Vec<String> = (0..15).map(|i| format!("friend-{i}")).collect();
        let progress = Progress::default();
        let hud = HudSnapshot::build(HudInputs {
            level: 1,
            progress: &progress,
            rewards: &rewards,
            ..HudInputs::default()
        });
        assert_eq!(hud.thumbnails.len(), HUD_THUMBNAIL_LIMIT);
        assert_eq!(hud.overflow, 3);
    }

    #[test]
    fn unknown_reward_uses_missing_image() {
        let thumb = Thumbnail::for_id("blue-dragon");
        assert_eq!(thumb.img, MISSING_IMAGE);
        assert_eq!(thumb.label, "blue-dragon");
    }
}
