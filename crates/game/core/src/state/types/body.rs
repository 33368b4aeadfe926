//! Body geometry used by clothing coverage and HP bookkeeping.

use bitflags::bitflags;

/// A body part an item can cover or a mutation can reshape.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BodyPart {
    Torso,
    Head,
    Eyes,
    Mouth,
    ArmL,
    ArmR,
    HandL,
    HandR,
    LegL,
    LegR,
    FootL,
    FootR,
}

bitflags! {
    /// Set of body parts, e.g. everything a coat covers.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct BodyParts: u16 {
        const TORSO = 1 << 0;
        const HEAD = 1 << 1;
        const EYES = 1 << 2;
        const MOUTH = 1 << 3;
        const ARM_L = 1 << 4;
        const ARM_R = 1 << 5;
        const HAND_L = 1 << 6;
        const HAND_R = 1 << 7;
        const LEG_L = 1 << 8;
        const LEG_R = 1 << 9;
        const FOOT_L = 1 << 10;
        const FOOT_R = 1 << 11;

        const ARMS = Self::ARM_L.bits() | Self::ARM_R.bits();
        const HANDS = Self::HAND_L.bits() | Self::HAND_R.bits();
        const LEGS = Self::LEG_L.bits() | Self::LEG_R.bits();
        const FEET = Self::FOOT_L.bits() | Self::FOOT_R.bits();
    }
}

impl From<BodyPart> for BodyParts {
    fn from(part: BodyPart) -> Self {
        match part {
            BodyPart::Torso => Self::TORSO,
            BodyPart::Head => Self::HEAD,
            BodyPart::Eyes => Self::EYES,
            BodyPart::Mouth => Self::MOUTH,
            BodyPart::ArmL => Self::ARM_L,
            BodyPart::ArmR => Self::ARM_R,
            BodyPart::HandL => Self::HAND_L,
            BodyPart::HandR => Self::HAND_R,
            BodyPart::LegL => Self::LEG_L,
            BodyPart::LegR => Self::LEG_R,
            BodyPart::FootL => Self::FOOT_L,
            BodyPart::FootR => Self::FOOT_R,
        }
    }
}

/// Body parts that carry their own hit points.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum HpPart {
    Head,
    Torso,
    ArmL,
    ArmR,
    LegL,
    LegR,
}

impl HpPart {
    #[inline]
    pub const fn as_index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn body_part_parses_snake_case() {
        assert_eq!(BodyPart::from_str("arm_l").unwrap(), BodyPart::ArmL);
        assert_eq!(BodyPart::from_str("EYES").unwrap(), BodyPart::Eyes);
        assert!(BodyPart::from_str("tail").is_err());
    }

    #[test]
    fn grouped_flags_cover_both_sides() {
        assert!(BodyParts::HANDS.contains(BodyPart::HandL.into()));
        assert!(BodyParts::HANDS.contains(BodyPart::HandR.into()));
        assert!(!BodyParts::HANDS.intersects(BodyParts::FEET));
    }
}
