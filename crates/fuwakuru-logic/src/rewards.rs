//! Companions and medals granted for clearing techniques.
//!
//! Each catalog technique maps to exactly one reward. Mat techniques grant a
//! companion, vault techniques a medal. Rewards are stored by their string id,
//! so stored lists may contain ids this build does not know about; those are
//! classified by prefix alone.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::MEDAL_PREFIX;

/// Every reward the app can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Reward {
    PinkCat,
    GreenCat,
    PurpleBiped,
    OrangeBiped,
    HatBiped,
    YellowBiped,
    PurpleBird,
    #[serde(rename = "vault-medal1")]
    VaultMedal1,
    #[serde(rename = "vault-medal2")]
    VaultMedal2,
    #[serde(rename = "vault-medal3")]
    VaultMedal3,
    #[serde(rename = "vault-medal4")]
    VaultMedal4,
}

/// Companion or medal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardKind {
    Companion,
    Medal,
}

impl RewardKind {
    /// Classify any stored reward id, known or not.
    pub fn of_id(id: &str) -> Self {
        if id.starts_with(MEDAL_PREFIX) {
            RewardKind::Medal
        } else {
            RewardKind::Companion
        }
    }
}

impl Reward {
    pub const ALL: [Reward; 11] = [
        Reward::PinkCat,
        Reward::GreenCat,
        Reward::PurpleBiped,
        Reward::OrangeBiped,
        Reward::HatBiped,
        Reward::YellowBiped,
        Reward::PurpleBird,
        Reward::VaultMedal1,
        Reward::VaultMedal2,
        Reward::VaultMedal3,
        Reward::VaultMedal4,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Reward::PinkCat => "pink-cat",
            Reward::GreenCat => "green-cat",
            Reward::PurpleBiped => "purple-biped",
            Reward::OrangeBiped => "orange-biped",
            Reward::HatBiped => "hat-biped",
            Reward::YellowBiped => "yellow-biped",
            Reward::PurpleBird => "purple-bird",
            Reward::VaultMedal1 => "vault-medal1",
            Reward::VaultMedal2 => "vault-medal2",
            Reward::VaultMedal3 => "vault-medal3",
            Reward::VaultMedal4 => "vault-medal4",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Reward::PinkCat => "ピンキー",
            Reward::GreenCat => "グリーンキャット",
            Reward::PurpleBiped => "パープルキツネ",
            Reward::OrangeBiped => "キツネ",
            Reward::HatBiped => "キャップ",
            Reward::YellowBiped => "イエローキツネ",
            Reward::PurpleBird => "パープルバード",
            Reward::VaultMedal1 => "台上前転メダル",
            Reward::VaultMedal2 => "大きな台上前転メダル",
            Reward::VaultMedal3 => "首はね跳びメダル",
            Reward::VaultMedal4 => "頭はね跳びメダル",
        }
    }

    pub fn image(self) -> &'static str {
        match self {
            Reward::PinkCat => "/images/pet1.jpeg",
            Reward::GreenCat => "/images/pet2.jpeg",
            Reward::PurpleBiped => "/images/pet3.jpeg",
            Reward::OrangeBiped => "/images/pet4.jpeg",
            Reward::HatBiped => "/images/pet5.jpeg",
            Reward::YellowBiped => "/images/pet6.jpeg",
            Reward::PurpleBird => "/images/pet7.jpeg",
            Reward::VaultMedal1 => "/images/medal1.png",
            Reward::VaultMedal2 => "/images/medal2.png",
            Reward::VaultMedal3 => "/images/medal3.png",
            Reward::VaultMedal4 => "/images/medal4.png",
        }
    }

    pub fn kind(self) -> RewardKind {
        RewardKind::of_id(self.as_str())
    }
}

impl fmt::Display for Reward {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Reward {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Reward::ALL.into_iter().find(|r| r.as_str() == s).ok_or(())
    }
}

/// Reward for clearing a technique, or `None` for ids outside the table.
pub fn reward_for_technique(technique_id: &str) -> Option<Reward> {
    let reward = match technique_id {
        "front-roll" => Reward::PinkCat,
        "big-front-roll" => Reward::GreenCat,
        "front-roll-bridge" => Reward::PurpleBiped,
        "stage-front-roll-bridge" => Reward::OrangeBiped,
        "tripod" => Reward::HatBiped,
        "tripod-bridge" => Reward::YellowBiped,
        "stage-tripod-bridge" => Reward::PurpleBird,
        "vault-front-roll" => Reward::VaultMedal1,
        "vault-big-front-roll" => Reward::VaultMedal2,
        "vault-neck-spring" => Reward::VaultMedal3,
        "vault-head-spring" => Reward::VaultMedal4,
        _ => return None,
    };
    Some(reward)
}
