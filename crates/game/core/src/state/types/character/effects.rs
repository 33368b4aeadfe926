//! Timed effects on a character.
//!
//! Effects store `expires_at` so several ticks can pass between updates.
//! An effect stays in place until [`Effects::remove_expired`] runs; presence
//! checks never look at the clock, which keeps derived caches in step with
//! the stored effects.

use arrayvec::ArrayVec;

use super::Character;
use crate::config::CharacterConfig;
use crate::env::Env;
use crate::state::types::{BodyPart, Tick};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EffectKind {
    /// Cannot see at all.
    Blind,
    /// Stuck in a pit; sight limited to adjacent tiles.
    InPit,
    /// Covered in boomer bile; sight limited to adjacent tiles.
    Boomered,
    /// Wearing contact lenses; corrects nearsightedness.
    Contacts,
    /// Knocked to the ground.
    Downed,
    /// Cannot act.
    Stunned,
}

/// A single active effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub kind: EffectKind,
    pub intensity: u8,
    /// `None` for permanent effects.
    pub expires_at: Option<Tick>,
    pub body_part: Option<BodyPart>,
}

impl Effect {
    fn outlasts(&self, other: &Effect) -> bool {
        match (self.expires_at, other.expires_at) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(a), Some(b)) => a >= b,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effects {
    effects: ArrayVec<Effect, { CharacterConfig::MAX_EFFECTS }>,
}

impl Effects {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn get(&self, kind: EffectKind) -> Option<&Effect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    /// Adds an effect. An existing effect of the same kind keeps the later
    /// expiration and the higher intensity.
    ///
    /// Returns false if the effect list is full.
    pub fn add(&mut self, effect: Effect) -> bool {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            if effect.outlasts(existing) {
                existing.expires_at = effect.expires_at;
            }
            existing.intensity = existing.intensity.max(effect.intensity);
            return true;
        }
        self.effects.try_push(effect).is_ok()
    }

    /// Removes an effect immediately. Returns whether it was present.
    pub fn remove(&mut self, kind: EffectKind) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| e.kind != kind);
        self.effects.len() != before
    }

    /// Drops every effect that has expired by `now`; returns how many went.
    pub fn remove_expired(&mut self, now: Tick) -> usize {
        let before = self.effects.len();
        self.effects
            .retain(|e| e.expires_at.is_none_or(|expires_at| expires_at > now));
        before - self.effects.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

/// An effect about to be applied to a character, before immunities and
/// intensity rules have been looked at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectRequest {
    pub kind: EffectKind,
    /// Turns until it wears off; `None` for permanent effects.
    pub duration: Option<u64>,
    pub intensity: u8,
    pub body_part: Option<BodyPart>,
    /// Bypasses mutation immunities.
    pub forced: bool,
}

impl EffectRequest {
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            duration: None,
            intensity: 1,
            body_part: None,
            forced: false,
        }
    }

    pub fn lasting(mut self, turns: u64) -> Self {
        self.duration = Some(turns);
        self
    }

    pub fn with_intensity(mut self, intensity: u8) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn on(mut self, part: BodyPart) -> Self {
        self.body_part = Some(part);
        self
    }

    pub fn forced(mut self) -> Self {
        self.forced = true;
        self
    }
}

impl Character {
    /// Applies an effect after character-specific preprocessing: intensity is
    /// at least 1, and unless the request is forced, a mutation granting
    /// immunity to the effect blocks it.
    ///
    /// Returns whether the effect is now in place.
    pub fn add_effect(&mut self, env: &Env<'_>, request: EffectRequest, now: Tick) -> bool {
        if !request.forced {
            let immune = self.ledger().mutations().find(|(id, _)| {
                env.mutation(id)
                    .is_some_and(|def| def.effect_immunities.contains(&request.kind))
            });
            if let Some((id, _)) = immune {
                tracing::debug!(kind = %request.kind, mutation = %id, "effect blocked by immunity");
                return false;
            }
        }

        let effect = Effect {
            kind: request.kind,
            intensity: request.intensity.max(1),
            expires_at: request.duration.map(|turns| now + turns),
            body_part: request.body_part,
        };
        let added = self.effects_mut().add(effect);
        if !added {
            tracing::warn!(kind = %request.kind, "effect list is full");
        }
        added
    }

    pub fn remove_effect(&mut self, kind: EffectKind) -> bool {
        self.effects_mut().remove(kind)
    }

    pub fn has_effect(&self, kind: EffectKind) -> bool {
        self.effects().has(kind)
    }

    /// Drops every effect that has run out by `now`.
    pub fn process_effects(&mut self, now: Tick) -> usize {
        if self.effects().iter().all(|e| e.expires_at.is_none_or(|t| t > now)) {
            return 0;
        }
        self.effects_mut().remove_expired(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{BionicCatalog, MutationCatalog, MutationDefinition};
    use crate::stats::CoreStats;

    fn timed(kind: EffectKind, expires_at: u64) -> Effect {
        Effect {
            kind,
            intensity: 1,
            expires_at: Some(Tick(expires_at)),
            body_part: None,
        }
    }

    #[test]
    fn re_adding_extends_and_intensifies() {
        let mut effects = Effects::empty();
        effects.add(timed(EffectKind::Downed, 10));
        effects.add(Effect {
            intensity: 3,
            ..timed(EffectKind::Downed, 5)
        });

        let downed = effects.get(EffectKind::Downed).unwrap();
        assert_eq!(downed.expires_at, Some(Tick(10)));
        assert_eq!(downed.intensity, 3);
    }

    #[test]
    fn permanent_effects_never_expire() {
        let mut effects = Effects::empty();
        effects.add(Effect {
            expires_at: None,
            ..timed(EffectKind::Blind, 0)
        });
        effects.add(timed(EffectKind::Stunned, 4));

        assert_eq!(effects.remove_expired(Tick(100)), 1);
        assert!(effects.has(EffectKind::Blind));
        assert!(!effects.has(EffectKind::Stunned));
    }

    #[test]
    fn immunity_blocks_unless_forced() {
        let mutations: MutationCatalog = [MutationDefinition::new("PARAIMMUNE", "Tough")
            .immune_to(EffectKind::Stunned)]
        .into_iter()
        .collect();
        let bionics = BionicCatalog::new();
        let config = CharacterConfig::default();
        let env = Env::new(&mutations, &bionics, &config);

        let mut c = Character::new("Rook", true, CoreStats::default(), &config);
        c.toggle_mutation(&env, &"PARAIMMUNE".into());

        let stun = EffectRequest::new(EffectKind::Stunned).lasting(3);
        assert!(!c.add_effect(&env, stun, Tick(0)));
        assert!(!c.has_effect(EffectKind::Stunned));

        assert!(c.add_effect(&env, stun.forced().with_intensity(0), Tick(0)));
        assert_eq!(c.effects().get(EffectKind::Stunned).map(|e| e.intensity), Some(1));

        assert_eq!(c.process_effects(Tick(2)), 0);
        assert_eq!(c.process_effects(Tick(3)), 1);
        assert!(!c.has_effect(EffectKind::Stunned));
    }

    #[test]
    fn huge_durations_saturate() {
        let mutations = MutationCatalog::new();
        let bionics = BionicCatalog::new();
        let config = CharacterConfig::default();
        let env = Env::new(&mutations, &bionics, &config);
        let mut c = Character::new("Rook", true, CoreStats::default(), &config);

        let downed = EffectRequest::new(EffectKind::Downed).lasting(u64::MAX);
        assert!(c.add_effect(&env, downed, Tick(5)));
        assert_eq!(
            c.effects().get(EffectKind::Downed).and_then(|e| e.expires_at),
            Some(Tick(u64::MAX))
        );
        assert_eq!(c.process_effects(Tick(1_000_000)), 0);
        assert!(c.has_effect(EffectKind::Downed));
    }
}
