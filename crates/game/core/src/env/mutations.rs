//! Mutation database interface.
//!
//! Definitions are loaded once (see the content crate) and only read at
//! runtime. The character ledger stores identifiers; everything a mutation
//! does is described here.

use crate::state::types::{BodyParts, EffectKind, MutationId, VisionMode};
use crate::stats::{Bonus, StatKind, StatMods};

pub trait MutationOracle: Send + Sync {
    fn definition(&self, id: &MutationId) -> Option<&MutationDefinition>;
}

/// Recurring upkeep of a powered mutation, paid once per cooldown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MutationCost {
    pub hunger: i32,
    pub thirst: i32,
    pub fatigue: i32,
}

impl MutationCost {
    pub fn is_free(&self) -> bool {
        self.hunger == 0 && self.thirst == 0 && self.fatigue == 0
    }
}

/// Static description of a trait or mutation.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MutationDefinition {
    pub id: MutationId,
    pub name: String,
    /// Point value at character creation; negative for drawbacks.
    pub points: i32,

    /// Activatable mutations start switched off and cost upkeep while on.
    /// Passive mutations are powered from the moment they are gained.
    pub activatable: bool,
    pub cost: MutationCost,
    /// Turns between upkeep payments.
    pub cooldown: u32,

    /// Continuous modifiers to the core stat maxima.
    pub mods: StatMods,
    pub weight_capacity: Vec<Bonus>,
    pub volume_capacity: Vec<Bonus>,
    /// Applied to every body part's maximum HP.
    pub hp: Vec<Bonus>,

    pub vision: Option<VisionMode>,
    /// Caps sight distance while powered.
    pub sight_limit: Option<u32>,
    /// The sight cap is lifted by corrective lenses.
    pub correctable_sight: bool,
    pub underwater_vision: bool,

    /// Body parts reshaped by the mutation; armor there no longer fits.
    pub restricts: BodyParts,
    pub effect_immunities: Vec<EffectKind>,
}

impl MutationDefinition {
    pub fn new(id: impl Into<MutationId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn activatable(mut self, cost: MutationCost, cooldown: u32) -> Self {
        self.activatable = true;
        self.cost = cost;
        self.cooldown = cooldown;
        self
    }

    pub fn with_points(mut self, points: i32) -> Self {
        self.points = points;
        self
    }

    pub fn with_mod(mut self, stat: StatKind, value: i32) -> Self {
        self.mods.insert(stat, value);
        self
    }

    pub fn with_weight_bonus(mut self, bonus: Bonus) -> Self {
        self.weight_capacity.push(bonus);
        self
    }

    pub fn with_volume_bonus(mut self, bonus: Bonus) -> Self {
        self.volume_capacity.push(bonus);
        self
    }

    pub fn with_hp_bonus(mut self, bonus: Bonus) -> Self {
        self.hp.push(bonus);
        self
    }

    pub fn granting_vision(mut self, mode: VisionMode) -> Self {
        self.vision = Some(mode);
        self
    }

    pub fn limiting_sight(mut self, range: u32, correctable: bool) -> Self {
        self.sight_limit = Some(range);
        self.correctable_sight = correctable;
        self
    }

    pub fn with_underwater_vision(mut self) -> Self {
        self.underwater_vision = true;
        self
    }

    pub fn restricting(mut self, parts: BodyParts) -> Self {
        self.restricts = parts;
        self
    }

    pub fn immune_to(mut self, kind: EffectKind) -> Self {
        self.effect_immunities.push(kind);
        self
    }

    /// Modifier to `stat`, zero if the mutation does not touch it.
    pub fn stat_mod(&self, stat: StatKind) -> i32 {
        self.mods.get(&stat).copied().unwrap_or(0)
    }
}
