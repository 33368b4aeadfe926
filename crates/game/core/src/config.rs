/// Character configuration constants and tunable parameters.
///
/// Weights are in grams and volumes in abstract volume units, matching the
/// item model.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CharacterConfig {
    /// Weight capacity before strength is taken into account.
    pub base_weight_capacity: i32,
    /// Additional weight capacity per point of maximum strength.
    pub weight_per_strength: i32,
    /// Volume a character can hold without any worn storage.
    pub base_volume_capacity: i32,
    /// Unsafe pickups may go up to this multiple of the weight capacity.
    pub overload_factor: i32,

    /// HP of every body part before strength is taken into account.
    pub hp_base: i32,
    /// Additional HP per body part per point of maximum strength.
    pub hp_per_strength: i32,

    /// Need levels past which a powered mutation can no longer be fed.
    pub hunger_ceiling: i32,
    pub thirst_ceiling: i32,
    pub fatigue_ceiling: i32,

    /// Sight distance when nothing impairs vision.
    pub sight_unlimited: u32,

    /// Light levels used by the vision threshold curve.
    pub light: LightConfig,
}

/// Light curve constants for [`crate::Character::get_vision_threshold`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LightConfig {
    /// Dimmest light at which detail can always be resolved.
    pub ambient_low: f32,
    /// Light level used as the reference point of the threshold curve.
    pub ambient_minimal: f32,
    /// Above this level the character stands in direct light.
    pub ambient_lit: f32,
    /// Attenuation per tile of open air.
    pub open_air_transparency: f32,
}

impl CharacterConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_BIONICS: usize = 32;
    pub const MAX_EFFECTS: usize = 16;

    /// Letters handed out as inventory shortcuts, in assignment order.
    pub const INVLETS: &'static str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BASE_WEIGHT_CAPACITY: i32 = 13_000;
    pub const DEFAULT_WEIGHT_PER_STRENGTH: i32 = 4_000;
    pub const DEFAULT_BASE_VOLUME_CAPACITY: i32 = 2;
    pub const DEFAULT_OVERLOAD_FACTOR: i32 = 4;
    pub const DEFAULT_HP_BASE: i32 = 60;
    pub const DEFAULT_HP_PER_STRENGTH: i32 = 3;
    pub const DEFAULT_SIGHT_UNLIMITED: u32 = 9_999;

    pub fn new() -> Self {
        Self {
            base_weight_capacity: Self::DEFAULT_BASE_WEIGHT_CAPACITY,
            weight_per_strength: Self::DEFAULT_WEIGHT_PER_STRENGTH,
            base_volume_capacity: Self::DEFAULT_BASE_VOLUME_CAPACITY,
            overload_factor: Self::DEFAULT_OVERLOAD_FACTOR,
            hp_base: Self::DEFAULT_HP_BASE,
            hp_per_strength: Self::DEFAULT_HP_PER_STRENGTH,
            hunger_ceiling: 700,
            thirst_ceiling: 260,
            fatigue_ceiling: 575,
            sight_unlimited: Self::DEFAULT_SIGHT_UNLIMITED,
            light: LightConfig::default(),
        }
    }
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            ambient_low: 3.5,
            ambient_minimal: 3.7,
            ambient_lit: 10.0,
            open_air_transparency: 0.038_376_42,
        }
    }
}
