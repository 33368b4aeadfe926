//! Vision modes granted by mutations, bionics and gear.

use bitflags::bitflags;

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
pub enum VisionMode {
    DebugNightvision,
    NvGoggles,
    Nightvision1,
    Nightvision2,
    Nightvision3,
    FullElfaVision,
    ElfaVision,
    CephVision,
    FelineVision,
    BirdEye,
    UrsineVision,
}

bitflags! {
    /// One bit per [`VisionMode`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct VisionModes: u16 {
        const DEBUG_NIGHTVISION = 1 << 0;
        const NV_GOGGLES = 1 << 1;
        const NIGHTVISION_1 = 1 << 2;
        const NIGHTVISION_2 = 1 << 3;
        const NIGHTVISION_3 = 1 << 4;
        const FULL_ELFA_VISION = 1 << 5;
        const ELFA_VISION = 1 << 6;
        const CEPH_VISION = 1 << 7;
        const FELINE_VISION = 1 << 8;
        const BIRD_EYE = 1 << 9;
        const URSINE_VISION = 1 << 10;

        /// Goggle-grade night vision.
        const TIER_3 = Self::NV_GOGGLES.bits()
            | Self::NIGHTVISION_3.bits()
            | Self::FULL_ELFA_VISION.bits()
            | Self::CEPH_VISION.bits();
        const TIER_2 = Self::NIGHTVISION_2.bits()
            | Self::FELINE_VISION.bits()
            | Self::URSINE_VISION.bits()
            | Self::ELFA_VISION.bits();
        const TIER_1 = Self::NIGHTVISION_1.bits();

        /// Every mode that helps in the dark. Bird eye only sharpens sight.
        const NIGHT_VISION = Self::DEBUG_NIGHTVISION.bits()
            | Self::TIER_3.bits()
            | Self::TIER_2.bits()
            | Self::TIER_1.bits();
    }
}

impl From<VisionMode> for VisionModes {
    fn from(mode: VisionMode) -> Self {
        Self::from_bits_retain(1 << mode as u16)
    }
}

impl VisionModes {
    /// Perceptual range added by the best night-vision mode present.
    ///
    /// Tiers never stack: goggles on top of tier-2 eyes are still tier 3.
    pub fn night_vision_range(self) -> f32 {
        if self.contains(Self::DEBUG_NIGHTVISION) {
            100.0
        } else if self.intersects(Self::TIER_3) {
            10.0
        } else if self.intersects(Self::TIER_2) {
            4.5
        } else if self.intersects(Self::TIER_1) {
            2.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn every_mode_has_its_own_bit() {
        let all = VisionMode::iter().fold(VisionModes::empty(), |acc, m| {
            let bit = VisionModes::from(m);
            assert!(!acc.intersects(bit), "{m} shares a bit");
            acc | bit
        });
        assert_eq!(all.bits().count_ones() as usize, VisionMode::COUNT);
        assert_eq!(VisionModes::from(VisionMode::Nightvision2), VisionModes::NIGHTVISION_2);
        assert_eq!(VisionModes::from(VisionMode::UrsineVision), VisionModes::URSINE_VISION);
    }

    #[test]
    fn best_tier_governs_range() {
        let modes = VisionModes::NIGHTVISION_1 | VisionModes::NV_GOGGLES;
        assert_eq!(modes.night_vision_range(), 10.0);
        assert_eq!(VisionModes::BIRD_EYE.night_vision_range(), 0.0);
        assert!(!VisionModes::BIRD_EYE.intersects(VisionModes::NIGHT_VISION));
    }
}
