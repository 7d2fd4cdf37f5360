//! Character roster shown on the character-select page.

use serde::Serialize;

/// A selectable character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Character {
    pub id: &'static str,
    pub name: &'static str,
    /// Reading aid for young players; empty when the name needs none.
    pub furigana: &'static str,
    pub img: &'static str,
}

pub const ROSTER: [Character; 10] = [
    Character { id: "chara1", name: "少年", furigana: "しょうねん", img: "/images/chara1.png" },
    Character { id: "chara2", name: "勇者", furigana: "ゆうしゃ", img: "/images/chara2.png" },
    Character { id: "chara3", name: "戦士", furigana: "せんし", img: "/images/chara3.png" },
    Character { id: "chara4", name: "騎士", furigana: "きし", img: "/images/chara4.png" },
    Character { id: "chara5", name: "魔法使い", furigana: "まほうつかい", img: "/images/chara5.png" },
    Character { id: "chara6", name: "弓使い", furigana: "ゆみつかい", img: "/images/chara6.png" },
    Character { id: "chara7", name: "天使", furigana: "てんし", img: "/images/chara7.png" },
    Character { id: "chara8", name: "武闘家", furigana: "ぶとうか", img: "/images/chara8.png" },
    Character { id: "chara9", name: "アイドル", furigana: "", img: "/images/chara9.png" },
    Character { id: "chara10", name: "ワンダーウーマン", furigana: "", img: "/images/chara10.png" },
];

/// Ids saved by older builds that stored only a short id.
const LEGACY_IMAGES: [(&str, &str); 3] = [
    ("boy", "/images/char-boy.png"),
    ("girl", "/images/char-girl.png"),
    ("cat", "/images/char-cat.png"),
];

pub fn find(id: &str) -> Option<&'static Character> {
    ROSTER.iter().find(|c| c.id == id)
}

/// Avatar image for the HUD.
///
/// The saved image path wins. Otherwise the saved character value is used
/// directly when it already is an image path, then the legacy id table, and
/// finally the `/images/char-{id}.png` convention.
pub fn avatar_src(saved_img: Option<&str>, character: &str) -> String {
    let character = match saved_img {
        Some(img) if !img.is_empty() => img,
        _ => character,
    };
    if character.starts_with("/images/") {
        return character.to_string();
    }
    if let Some((_, img)) = LEGACY_IMAGES.iter().find(|(id, _)| *id == character) {
        return img.to_string();
    }
    let id = if character.is_empty() { "default" } else { character };
    format!("/images/char-{id}.png")
}
