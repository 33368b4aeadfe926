//! Sensory cache: active vision modes and maximum sight distance.
//!
//! The cache is recomputed lazily. [`Character`] marks it dirty from every
//! accessor that can change effects, bionics, traits, submersion or worn
//! items; the next read recomputes it.

use std::cell::Cell;

use super::{Character, EffectKind};
use crate::env::Env;
use crate::state::types::{ItemFlags, VisionModes};

#[derive(Debug)]
pub struct SensoryCache {
    dirty: Cell<bool>,
    modes: Cell<VisionModes>,
    sight_max: Cell<u32>,
}

impl Default for SensoryCache {
    fn default() -> Self {
        Self {
            dirty: Cell::new(true),
            modes: Cell::new(VisionModes::empty()),
            sight_max: Cell::new(0),
        }
    }
}

impl SensoryCache {
    pub fn invalidate(&self) {
        self.dirty.set(true);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    pub(crate) fn mark_clean(&self) {
        self.dirty.set(false);
    }

    fn store(&self, modes: VisionModes, sight_max: u32) {
        self.modes.set(modes);
        self.sight_max.set(sight_max);
        self.dirty.set(false);
    }
}

impl Character {
    /// Recomputes vision modes and sight distance now.
    ///
    /// Modes are the union of every active source. Sight distance is the
    /// most restrictive impairment that applies, or
    /// [`crate::config::CharacterConfig::sight_unlimited`] when none does.
    pub fn recalc_sight_limits(&self, env: &Env<'_>) {
        let modes = self.active_vision_modes(env);
        let sight_max = self.compute_sight_max(env);
        tracing::debug!(?modes, sight_max, "recalculated sight limits");
        self.sensory.store(modes, sight_max);
    }

    pub fn vision_modes(&self, env: &Env<'_>) -> VisionModes {
        self.refresh_sensory(env);
        self.sensory.modes.get()
    }

    pub fn sight_max(&self, env: &Env<'_>) -> u32 {
        self.refresh_sensory(env);
        self.sensory.sight_max.get()
    }

    /// True iff any active vision mode works in the dark.
    pub fn has_nv(&self, env: &Env<'_>) -> bool {
        self.vision_modes(env).intersects(VisionModes::NIGHT_VISION)
    }

    /// Whether anything lets the character see underwater.
    pub fn has_underwater_vision(&self, env: &Env<'_>) -> bool {
        let ledger = self.ledger();
        ledger
            .powered()
            .filter_map(|id| env.mutation(id))
            .any(|def| def.underwater_vision)
            || self
                .bionics()
                .powered()
                .filter_map(|id| env.bionic(id))
                .any(|def| def.underwater_vision)
            || self.possessions().worn_with_flag(ItemFlags::SWIM_GOGGLES)
    }

    /// Minimum light level at which the character can make out detail,
    /// given the light level `own_light` at the character's own position.
    ///
    /// Without any vision mode, and in direct light, this is the ambient
    /// low level. Otherwise the best night-vision tier widens the perceptual
    /// range, and the result scales with how dim the surroundings are.
    pub fn get_vision_threshold(&self, env: &Env<'_>, own_light: f32) -> f32 {
        let light = env.config().light;
        let modes = self.vision_modes(env);
        if modes.is_empty() || own_light > light.ambient_lit {
            return light.ambient_low;
        }

        let level = own_light.max(0.0);
        let dimming = 1.0
            + (level - light.ambient_minimal) / (light.ambient_lit - light.ambient_minimal);

        let mut range = self.stats().per_cur as f32 / 3.0 + modes.night_vision_range();
        if modes.contains(VisionModes::BIRD_EYE) {
            range += 1.0;
        }

        let threshold =
            light.ambient_minimal / (range * light.open_air_transparency).exp() - 0.01;
        (threshold * dimming).min(light.ambient_low)
    }

    fn refresh_sensory(&self, env: &Env<'_>) {
        if self.sensory.is_dirty() {
            self.recalc_sight_limits(env);
        }
    }

    fn active_vision_modes(&self, env: &Env<'_>) -> VisionModes {
        let mut modes = VisionModes::empty();
        for def in self.ledger().powered().filter_map(|id| env.mutation(id)) {
            if let Some(mode) = def.vision {
                modes |= VisionModes::from(mode);
            }
        }
        for def in self.bionics().powered().filter_map(|id| env.bionic(id)) {
            if let Some(mode) = def.vision {
                modes |= VisionModes::from(mode);
            }
        }
        for worn in self.possessions().worn().iter().filter(|w| w.active) {
            if worn.has_flag(ItemFlags::NIGHT_VISION) {
                modes |= VisionModes::NV_GOGGLES;
            }
            if worn.has_flag(ItemFlags::ENHANCED_VISION) {
                modes |= VisionModes::NIGHTVISION_3;
            }
        }
        modes
    }

    fn compute_sight_max(&self, env: &Env<'_>) -> u32 {
        let effects = self.effects();
        let possessions = self.possessions();

        if effects.has(EffectKind::Blind) || possessions.worn_with_flag(ItemFlags::BLIND) {
            return 0;
        }
        if effects.has(EffectKind::InPit)
            || effects.has(EffectKind::Boomered)
            || (self.is_underwater() && !self.has_underwater_vision(env))
        {
            return 1;
        }

        let corrected = possessions.worn_with_flag(ItemFlags::FIX_NEARSIGHT)
            || effects.has(EffectKind::Contacts);
        self.ledger()
            .powered()
            .filter_map(|id| env.mutation(id))
            .filter(|def| !(def.correctable_sight && corrected))
            .filter_map(|def| def.sight_limit)
            .min()
            .unwrap_or(env.config().sight_unlimited)
    }
}
