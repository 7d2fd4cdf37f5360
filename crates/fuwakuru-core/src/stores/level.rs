//! Level store: `matLevel_{profile}`, a decimal integer string.
//!
//! Levels start at 1 and grow by one per checkpoint cleared. The only
//! ceiling is `u32::MAX`.

use fuwakuru_logic::profile::ProfileKey;

use super::write;
use crate::backend::KeyValueStore;

/// Leading integer of `raw`, ignoring leading whitespace and any trailing
/// text: `" 12abc"` reads as 12. Digit runs too long for `i64` saturate.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() {
        return None;
    }
    Some(sign * digits.parse::<i64>().unwrap_or(i64::MAX))
}

/// Current level. Absent, unparsable and non-positive values read as 1;
/// values past `u32::MAX` read as `u32::MAX`.
pub fn load<S: KeyValueStore + ?Sized>(store: &S, profile: &ProfileKey) -> u32 {
    store
        .get(&profile.level_key())
        .and_then(|raw| parse_leading_int(&raw))
        .filter(|n| *n > 0)
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .unwrap_or(1)
}

pub fn save<S: KeyValueStore + ?Sized>(store: &mut S, profile: &ProfileKey, level: u32) -> bool {
    write(store, &profile.level_key(), &level.to_string())
}

/// Add one level and persist. Returns the new level.
pub fn increment<S: KeyValueStore + ?Sized>(store: &mut S, profile: &ProfileKey) -> u32 {
    let next = load(store, profile).saturating_add(1);
    save(store, profile, next);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryStore;

    fn profile() -> ProfileKey {
        ProfileKey::derive("Yuki", Some("chara2"))
    }

    fn stored(raw: &str) -> u32 {
        load(&MemoryStore::from_entries([(profile().level_key(), raw)]), &profile())
    }

    #[test]
    fn absent_is_one() {
        assert_eq!(load(&MemoryStore::new(), &profile()), 1);
    }

    #[test]
    fn invalid_values_coerce_to_one() {
        assert_eq!(stored("0"), 1);
        assert_eq!(stored("-4"), 1);
        assert_eq!(stored("lots"), 1);
        assert_eq!(stored(""), 1);
    }

    #[test]
    fn leading_integer_is_used() {
        assert_eq!(stored("7"), 7);
        assert_eq!(stored(" 12abc"), 12);
        assert_eq!(stored("3.9"), 3);
    }

    #[test]
    fn huge_values_saturate() {
        assert_eq!(stored("5000000000"), u32::MAX);
        assert_eq!(stored("123456789012345678901234567890"), u32::MAX);
        assert_eq!(stored("-123456789012345678901234567890"), 1);
    }

    #[test]
    fn increment_stops_at_max() {
        let mut store = MemoryStore::from_entries([(profile().level_key(), "5000000000")]);
        assert_eq!(increment(&mut store, &profile()), u32::MAX);
    }

    #[test]
    fn increment_persists() {
        let mut store = MemoryStore::new();
        assert_eq!(increment(&mut store, &profile()), 2);
        assert_eq!(increment(&mut store, &profile()), 3);
        assert_eq!(store.get(&profile().level_key()).as_deref(), Some("3"));
    }
}
