//! Core attributes.
//!
//! The maxima are the stored source of truth and the only values mutation
//! stat mods touch. Current values are rebuilt from the maxima by
//! [`crate::Character::reset_stats`].

use std::collections::BTreeMap;

/// The four core attributes.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum StatKind {
    /// Strength: melee damage, carrying capacity, hit points
    Str,
    /// Dexterity
    Dex,
    /// Intelligence
    Int,
    /// Perception: sight in the dark
    Per,
}

/// Stat modifier table keyed by attribute.
pub type StatMods = BTreeMap<StatKind, i32>;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoreStats {
    pub str_max: i32,
    pub dex_max: i32,
    pub int_max: i32,
    pub per_max: i32,

    pub str_cur: i32,
    pub dex_cur: i32,
    pub int_cur: i32,
    pub per_cur: i32,
}

impl CoreStats {
    /// Stats with the given maxima and current values equal to them.
    pub fn new(str: i32, dex: i32, int: i32, per: i32) -> Self {
        Self {
            str_max: str,
            dex_max: dex,
            int_max: int,
            per_max: per,
            str_cur: str,
            dex_cur: dex,
            int_cur: int,
            per_cur: per,
        }
    }

    pub fn max(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Str => self.str_max,
            StatKind::Dex => self.dex_max,
            StatKind::Int => self.int_max,
            StatKind::Per => self.per_max,
        }
    }

    pub fn max_mut(&mut self, kind: StatKind) -> &mut i32 {
        match kind {
            StatKind::Str => &mut self.str_max,
            StatKind::Dex => &mut self.dex_max,
            StatKind::Int => &mut self.int_max,
            StatKind::Per => &mut self.per_max,
        }
    }

    pub fn current(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Str => self.str_cur,
            StatKind::Dex => self.dex_cur,
            StatKind::Int => self.int_cur,
            StatKind::Per => self.per_cur,
        }
    }

    pub fn current_mut(&mut self, kind: StatKind) -> &mut i32 {
        match kind {
            StatKind::Str => &mut self.str_cur,
            StatKind::Dex => &mut self.dex_cur,
            StatKind::Int => &mut self.int_cur,
            StatKind::Per => &mut self.per_cur,
        }
    }
}

impl Default for CoreStats {
    /// Default stats: all 8 (an unremarkable survivor)
    fn default() -> Self {
        Self::new(8, 8, 8, 8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn stat_names_parse_case_insensitively() {
        assert_eq!(StatKind::from_str("STR").unwrap(), StatKind::Str);
        assert_eq!(StatKind::from_str("per").unwrap(), StatKind::Per);
        assert!(StatKind::from_str("LUCK").is_err());
        assert_eq!(StatKind::Dex.as_ref(), "DEX");
    }
}
