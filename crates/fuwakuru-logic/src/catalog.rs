//! Technique catalog: the static, ordered list of techniques per stage.
//!
//! Techniques are grouped into three stages. Inside a stage, `order`
//! ascending is prerequisite order: a technique can only be attempted once
//! every lower-order technique in the same stage has been cleared.
//!
//! ```
//! use fuwakuru_logic::catalog::{Catalog, Stage};
//!
//! let catalog = Catalog::builtin();
//! let netspring: Vec<_> = catalog.stage(Stage::Netspring).iter().map(|t| t.id.as_str()).collect();
//! assert_eq!(netspring[0], "front-roll");
//! assert_eq!(catalog.get("big-front-roll").unwrap().order, 2);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the three technique categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Neck-spring family on the mat.
    Netspring,
    /// Head-spring family on the mat.
    Headspring,
    /// Vaulting box.
    Vault,
}

impl Stage {
    /// All stages in display order.
    pub const ALL: [Stage; 3] = [Stage::Netspring, Stage::Headspring, Stage::Vault];

    /// Stages shown on the mat island.
    pub const MAT: [Stage; 2] = [Stage::Netspring, Stage::Headspring];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Netspring => "netspring",
            Stage::Headspring => "headspring",
            Stage::Vault => "vault",
        }
    }

    /// Heading used on the island pages.
    pub fn title(self) -> &'static str {
        match self {
            Stage::Netspring => "ネットスプリング（首はね系）",
            Stage::Headspring => "ヘッドスプリング（頭はね系）",
            Stage::Vault => "跳び箱",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Returned when a string names no stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStage(pub String);

impl fmt::Display for UnknownStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown stage: {}", self.0)
    }
}

impl std::error::Error for UnknownStage {}

impl FromStr for Stage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "netspring" => Ok(Stage::Netspring),
            "headspring" => Ok(Stage::Headspring),
            "vault" => Ok(Stage::Vault),
            other => Err(UnknownStage(other.to_string())),
        }
    }
}

/// A single gymnastics technique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technique {
    pub id: String,
    pub title: String,
    pub stage: Stage,
    /// Position within the stage, starting at 1.
    pub order: u32,
    /// Demonstration video, if any.
    #[serde(default)]
    pub video: Option<String>,
    /// Clear conditions, in display order.
    pub checkpoints: Vec<String>,
}

impl Technique {
    pub fn checkpoint_count(&self) -> usize {
        self.checkpoints.len()
    }
}

/// Ordered, read-only technique list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Technique>", into = "Vec<Technique>")]
pub struct Catalog {
    techniques: Vec<Technique>,
}

impl Catalog {
    /// Build a catalog from any technique list. Stage lists are kept sorted by
    /// `order` so lookups never need to re-sort.
    pub fn new(mut techniques: Vec<Technique>) -> Self {
        techniques.sort_by(|a, b| a.stage.cmp(&b.stage).then(a.order.cmp(&b.order)));
        Self { techniques }
    }

    /// The eleven techniques shipped with the app.
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN
                .iter()
                .map(|def| Technique {
                    id: def.id.to_string(),
                    title: def.title.to_string(),
                    stage: def.stage,
                    order: def.order,
                    video: def.video.map(str::to_string),
                    checkpoints: def.checkpoints.iter().map(|c| c.to_string()).collect(),
                })
                .collect(),
        )
    }

    pub fn all(&self) -> &[Technique] {
        &self.techniques
    }

    pub fn len(&self) -> usize {
        self.techniques.len()
    }

    pub fn is_empty(&self) -> bool {
        self.techniques.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Technique> {
        self.techniques.iter().find(|t| t.id == id)
    }

    /// Techniques of one stage, ascending by order.
    pub fn stage(&self, stage: Stage) -> Vec<&Technique> {
        self.techniques.iter().filter(|t| t.stage == stage).collect()
    }

    /// Ids of every technique in the same stage with a lower order.
    pub fn prerequisites(&self, technique: &Technique) -> Vec<&str> {
        self.techniques
            .iter()
            .filter(|t| t.stage == technique.stage && t.order < technique.order)
            .map(|t| t.id.as_str())
            .collect()
    }
}

impl From<Vec<Technique>> for Catalog {
    fn from(techniques: Vec<Technique>) -> Self {
        Self::new(techniques)
    }
}

impl From<Catalog> for Vec<Technique> {
    fn from(catalog: Catalog) -> Self {
        catalog.techniques
    }
}

/// Catalog integrity problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The same id appears more than once.
    DuplicateId(String),
    /// Two techniques share an order inside one stage.
    DuplicateOrder { stage: Stage, order: u32 },
    /// A non-empty stage whose lowest order is not 1.
    StageDoesNotStartAtOne { stage: Stage, first: u32 },
    /// A technique that can never be cleared by a user action.
    NoCheckpoints(String),
}

/// Check a catalog, returning every problem found.
pub fn validate_catalog(catalog: &Catalog) -> Vec<CatalogError> {
    let mut errors = Vec::new();

    for (i, t) in catalog.all().iter().enumerate() {
        if catalog.all()[..i].iter().any(|other| other.id == t.id) {
            errors.push(CatalogError::DuplicateId(t.id.clone()));
        }
        if t.checkpoints.is_empty() {
            errors.push(CatalogError::NoCheckpoints(t.id.clone()));
        }
    }

    for stage in Stage::ALL {
        let techniques = catalog.stage(stage);
        if let Some(first) = techniques.first() {
            if first.order != 1 {
                errors.push(CatalogError::StageDoesNotStartAtOne {
                    stage,
                    first: first.order,
                });
            }
        }
        for pair in techniques.windows(2) {
            if pair[0].order == pair[1].order {
                errors.push(CatalogError::DuplicateOrder {
                    stage,
                    order: pair[0].order,
                });
            }
        }
    }

    errors
}

struct TechniqueDef {
    id: &'static str,
    title: &'static str,
    stage: Stage,
    order: u32,
    video: Option<&'static str>,
    checkpoints: &'static [&'static str],
}

const BUILTIN: &[TechniqueDef] = &[
    // ── Netspring ───────────────────────────────────────────────────────
    TechniqueDef {
        id: "front-roll",
        title: "前転",
        stage: Stage::Netspring,
        order: 1,
        video: Some("/videos/maeten.mp4"),
        checkpoints: &[
            "こしを高くしてスタートできている",
            "頭の後ろ→背中→おしりの順番でマットについている",
            "かかとをおしりに近づけて、しゃがみ立ちできている",
        ],
    },
    TechniqueDef {
        id: "big-front-roll",
        title: "大きな前転",
        stage: Stage::Netspring,
        order: 2,
        video: Some("/videos/ookinazenten.mp4"),
        checkpoints: &[
            "ひざを曲げて強くふみ切れている",
            "頭よりこしが高い位置にある",
            "ひざがのびている",
            "立ち上がる直前にひざをたたんでいる",
        ],
    },
    TechniqueDef {
        id: "front-roll-bridge",
        title: "前転ブリッジ",
        stage: Stage::Netspring,
        order: 3,
        video: Some("/videos/zentenburige.mp4"),
        checkpoints: &[
            "大きな前転をしている",
            "背中がついたらいっきに背中をそらしている",
            "足がついたらうででマットをおしてブリッジができている",
        ],
    },
    TechniqueDef {
        id: "stage-front-roll-bridge",
        title: "ステージからの前転ブリッジ",
        stage: Stage::Netspring,
        order: 4,
        video: Some("/videos/stagekaranozentenburizzi.mp4"),
        checkpoints: &[
            "大きな前転をしている",
            "背中がついたらいっきに背中をそらしている",
            "ステージからバランスボール一個分のスペースが空いている",
        ],
    },
    // ── Headspring ──────────────────────────────────────────────────────
    TechniqueDef {
        id: "tripod",
        title: "三点倒立",
        stage: Stage::Headspring,
        order: 1,
        video: Some("/videos/santentouritu.mp4"),
        checkpoints: &[
            "頭と両手で三角形をつくるようにしてマットに着けている",
            "マットからゆっくり足をはなし、こしを上げている",
            "両足をゆっくり上にのばしている",
            "頭と両手の三点で立つことができている",
        ],
    },
    TechniqueDef {
        id: "tripod-bridge",
        title: "三点倒立ブリッジ",
        stage: Stage::Headspring,
        order: 2,
        video: Some("/videos/santentourituburizzi.mp4"),
        checkpoints: &[
            "頭と両手で三角形をつくるようにしてマットに着けている",
            "マットからゆっくり足をはなし、こしを上げている",
            "おしりが向こうがわにいった時に体がくの字になっている",
            "足を大きくふりあげ、背中をそらしている",
            "足がついたらうででマットをおしてブリッジしている",
        ],
    },
    TechniqueDef {
        id: "stage-tripod-bridge",
        title: "ステージからの三点倒立ブリッジ",
        stage: Stage::Headspring,
        order: 3,
        video: Some("/videos/stagekaranosantentouritsuburizzi.mp4"),
        checkpoints: &[
            "頭と両手で三角形をつくるようにしてマットに着けている",
            "マットからゆっくり足をはなし、こしを上げている",
            "おしりが向こうがわにいった時に体がくの字になっている",
            "足を大きくふりあげ、背中をそらしている",
            "ステージからバランスボール一個分のスペースが空いている",
        ],
    },
    // ── Vault ───────────────────────────────────────────────────────────
    TechniqueDef {
        id: "vault-front-roll",
        title: "台上前転",
        stage: Stage::Vault,
        order: 1,
        video: Some("/videos/daizyozenten.mp4"),
        checkpoints: &[
            "両足をそろえて強くふみきっている",
            "とび箱の手前に手をつき、ひざをのばしてこしを高く上げている",
            "あごをひき背中を丸めて回っている",
            "ひざをまげてフワリと止まっている",
        ],
    },
    TechniqueDef {
        id: "vault-big-front-roll",
        title: "大きな台上前転",
        stage: Stage::Vault,
        order: 2,
        video: Some("/videos/ookinadaizyouzenten.mp4"),
        checkpoints: &[
            "両足をそろえて強くふみきっている",
            "とび箱の手前に手をつき、ひざをのばしてこしを高く上げている",
            "ひざとつま先をのばしたままゆっくり回る",
            "ひざを曲げてフワリと止まっている",
        ],
    },
    TechniqueDef {
        id: "vault-neck-spring",
        title: "首はねとび",
        stage: Stage::Vault,
        order: 3,
        video: Some("/videos/kubihanetobi.mp4"),
        checkpoints: &[
            "両足をそろえて強くふみきっている",
            "とび箱の中央に手をつき、ひざをのばしている",
            "ひざをのばしたまま足を残してためをつくることができている",
            "足をふりだすと同時に両手で強くとび箱をおしてひじをのばしている",
            "ひざを曲げてフワリと止まっている",
        ],
    },
    TechniqueDef {
        id: "vault-head-spring",
        title: "頭はねとび",
        stage: Stage::Vault,
        order: 4,
        video: Some("/videos/atamahanetobi.mp4"),
        checkpoints: &[
            "両足をそろえて強くふみきっている",
            "とび箱の中央にうでで支えながら頭の前のあたりをつけて、ひざをのばしている",
            "こしが頭の真上にきたら足をふり出している",
            "両手で強くとび箱をおしてひじをのばしている",
            "ひざを曲げてピタリと止まっている",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn technique(id: &str, stage: Stage, order: u32, checkpoints: usize) -> Technique {
        Technique {
            id: id.to_string(),
            title: id.to_string(),
            stage,
            order,
            video: None,
            checkpoints: (0..checkpoints).map(|i| format!("point {i}")).collect(),
        }
    }

    #[test]
    fn builtin_has_eleven_techniques() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 11);
        assert_eq!(catalog.stage(Stage::Netspring).len(), 4);
        assert_eq!(catalog.stage(Stage::Headspring).len(), 3);
        assert_eq!(catalog.stage(Stage::Vault).len(), 4);
    }

    #[test]
    fn builtin_is_valid() {
        assert!(validate_catalog(&Catalog::builtin()).is_empty());
    }

    #[test]
    fn stage_lists_sorted_by_order() {
        let catalog = Catalog::new(vec![
            technique("c", Stage::Vault, 3, 1),
            technique("a", Stage::Vault, 1, 1),
            technique("b", Stage::Vault, 2, 1),
        ]);
        let ids: Vec<_> = catalog.stage(Stage::Vault).iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn prerequisites_are_lower_order_same_stage() {
        let catalog = Catalog::builtin();
        let bridge = catalog.get("front-roll-bridge").unwrap();
        assert_eq!(catalog.prerequisites(bridge), vec!["front-roll", "big-front-roll"]);

        let tripod = catalog.get("tripod").unwrap();
        assert!(catalog.prerequisites(tripod).is_empty());
    }

    #[test]
    fn front_roll_has_three_checkpoints() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.get("front-roll").unwrap().checkpoint_count(), 3);
    }

    #[test]
    fn unknown_id_is_none() {
        assert!(Catalog::builtin().get("back-flip").is_none());
    }

    #[test]
    fn validation_reports_every_problem() {
        let catalog = Catalog::new(vec![
            technique("a", Stage::Netspring, 2, 1),
            technique("a", Stage::Netspring, 2, 0),
        ]);
        let errors = validate_catalog(&catalog);
        assert!(errors.contains(&CatalogError::DuplicateId("a".into())));
        assert!(errors.contains(&CatalogError::NoCheckpoints("a".into())));
        assert!(errors.contains(&CatalogError::DuplicateOrder {
            stage: Stage::Netspring,
            order: 2
        }));
        assert!(errors.contains(&CatalogError::StageDoesNotStartAtOne {
            stage: Stage::Netspring,
            first: 2
        }));
    }

    #[test]
    fn stage_parses_from_str() {
        assert_eq!("vault".parse::<Stage>().unwrap(), Stage::Vault);
        assert!("floor".parse::<Stage>().is_err());
    }

    #[test]
    fn catalog_deserializes_from_json_list() {
        let json = r#"[{"id":"x","title":"X","stage":"headspring","order":1,"checkpoints":["one"]}]"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.get("x").unwrap().stage, Stage::Headspring);
        assert_eq!(catalog.get("x").unwrap().video, None);
    }
}
