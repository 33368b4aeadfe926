//! Trait and mutation transitions.
//!
//! ```text
//! ABSENT ──toggle──▶ PRESENT_INACTIVE ⇄ PRESENT_ACTIVE ──toggle──▶ ABSENT
//! ```
//!
//! Toggles only change membership. Stat mods and one-time gain/loss effects
//! are separate calls so character creation can batch many toggles before a
//! single recompute.

use std::str::FromStr;

use super::{Character, LedgerViolation, Toggle};
use crate::env::Env;
use crate::state::types::{HpPart, Item, ItemFlags, MutationId};
use crate::stats::{BonusStack, StatBounds, StatKind};

impl Character {
    // ========================================================================
    // Membership
    // ========================================================================

    pub fn has_trait(&self, id: &MutationId) -> bool {
        self.ledger().has_trait(id)
    }

    pub fn has_base_trait(&self, id: &MutationId) -> bool {
        self.ledger().has_base_trait(id)
    }

    pub fn has_active_mutation(&self, id: &MutationId) -> bool {
        self.ledger().has_active_mutation(id)
    }

    /// Mutation bound to activation key `key`, if any.
    pub fn trait_by_invlet(&self, key: char) -> Option<&MutationId> {
        self.ledger().trait_by_invlet(key)
    }

    /// Flips base-trait membership and mirrors it into the mutation entries.
    /// No gain/loss effects fire.
    ///
    /// Removing is always possible. Adding requires a definition; an unknown
    /// id is a no-op and returns `None`.
    pub fn toggle_trait(&mut self, env: &Env<'_>, id: &MutationId) -> Option<Toggle> {
        if self.has_base_trait(id) {
            let ledger = self.ledger_mut();
            ledger.remove_base(id);
            ledger.remove_mutation(id);
            tracing::debug!(%id, "base trait removed");
            return Some(Toggle::Lost);
        }

        let Some(def) = env.mutation(id) else {
            tracing::warn!(%id, "toggle_trait: unknown trait");
            return None;
        };
        let ledger = self.ledger_mut();
        ledger.insert_base(id.clone());
        ledger.insert_mutation(id.clone(), !def.activatable);
        tracing::debug!(%id, "base trait added");
        Some(Toggle::Gained)
    }

    /// Flips mutation membership without firing gain/loss effects; used when
    /// rebuilding a character whose effects were applied long ago.
    ///
    /// Losing a mutation also drops it from the base traits.
    pub fn toggle_mutation(&mut self, env: &Env<'_>, id: &MutationId) -> Option<Toggle> {
        if self.has_trait(id) {
            let ledger = self.ledger_mut();
            ledger.remove_mutation(id);
            ledger.remove_base(id);
            tracing::debug!(%id, "mutation removed");
            return Some(Toggle::Lost);
        }

        let Some(def) = env.mutation(id) else {
            tracing::warn!(%id, "toggle_mutation: unknown mutation");
            return None;
        };
        self.ledger_mut().insert_mutation(id.clone(), !def.activatable);
        tracing::debug!(%id, "mutation added");
        Some(Toggle::Gained)
    }

    /// Gives every base trait a mutation entry.
    pub fn add_traits(&mut self, env: &Env<'_>) {
        let missing: Vec<MutationId> = self
            .ledger()
            .base_traits()
            .filter(|id| !self.has_trait(id))
            .cloned()
            .collect();
        for id in missing {
            match env.mutation(&id) {
                Some(def) => {
                    self.ledger_mut().insert_mutation(id, !def.activatable);
                }
                None => tracing::warn!(%id, "add_traits: unknown base trait"),
            }
        }
    }

    /// Forgets every trait and mutation.
    pub fn empty_traits(&mut self) {
        self.ledger_mut().clear();
    }

    pub fn get_base_traits(&self) -> Vec<MutationId> {
        self.ledger().base_traits().cloned().collect()
    }

    pub fn get_mutations(&self) -> Vec<MutationId> {
        self.ledger().mutations().map(|(id, _)| id.clone()).collect()
    }

    pub fn check_invariants(&self) -> Result<(), LedgerViolation> {
        self.ledger().check_invariants()
    }

    // ========================================================================
    // Stat modifiers
    // ========================================================================

    /// The mutation's modifier to the stat named `stat` (`"STR"`, `"dex"`).
    /// Unknown mutations and unknown stat names give 0.
    pub fn get_mod(&self, env: &Env<'_>, id: &MutationId, stat: &str) -> i32 {
        let Ok(kind) = StatKind::from_str(stat) else {
            return 0;
        };
        env.mutation(id).map_or(0, |def| def.stat_mod(kind))
    }

    /// Applies (`add == true`) or reverts the mutation's stat modifiers to the
    /// stat maxima. A strength change recomputes HP maxima.
    pub fn apply_mods(&mut self, env: &Env<'_>, id: &MutationId, add: bool) {
        let Some(def) = env.mutation(id) else {
            return;
        };
        let sign = if add { 1 } else { -1 };
        for (&kind, &value) in &def.mods {
            *self.stats_mut().max_mut(kind) += sign * value;
        }
        if def.stat_mod(StatKind::Str) != 0 {
            self.recalc_hp(env);
        }
    }

    /// Recomputes every body part's HP maximum from strength and mutation HP
    /// bonuses. Every part keeps the damage it had taken, so a raise followed
    /// by the matching drop restores the previous HP. A living part never
    /// drops below 1 HP.
    pub fn recalc_hp(&mut self, env: &Env<'_>) {
        let config = env.config();
        let base = config.hp_base + self.stats().str_max * config.hp_per_strength;
        let bonuses: BonusStack = self
            .ledger()
            .mutations()
            .filter_map(|(id, _)| env.mutation(id))
            .flat_map(|def| def.hp.iter().copied())
            .collect();
        let new_max = bonuses.apply(base, StatBounds::HIT_POINTS.min, StatBounds::HIT_POINTS.max);

        for index in 0..self.hp_max.len() {
            let old_max = self.hp_max[index];
            if new_max == old_max {
                continue;
            }
            let cur = self.hp_cur[index];
            self.hp_cur[index] = if cur <= 0 {
                cur
            } else {
                let damage = (old_max - cur).max(0);
                (new_max - damage).clamp(1, new_max)
            };
            self.hp_max[index] = new_max;
        }
        tracing::debug!(hp_max = new_max, torso = self.hp_cur(HpPart::Torso), "recalculated hp");
    }

    // ========================================================================
    // Gain/loss effects
    // ========================================================================

    /// One-time effects of gaining a mutation. Worn items covering a body
    /// part the mutation reshapes no longer fit and are pushed off, unless
    /// they are oversized. The pushed-off items are returned for world
    /// placement.
    pub fn mutation_effect(&mut self, env: &Env<'_>, id: &MutationId) -> Vec<Item> {
        let Some(def) = env.mutation(id) else {
            return Vec::new();
        };
        let restricted = def.restricts;
        let pushed_off = if restricted.is_empty() {
            Vec::new()
        } else {
            self.remove_worn_items_with(|w| {
                w.covers.intersects(restricted) && !w.has_flag(ItemFlags::OVERSIZE)
            })
        };
        for item in &pushed_off {
            tracing::debug!(mutation = %id, item = %item.type_id, "pushed off by mutation");
        }
        self.recalc_hp(env);
        pushed_off
    }

    /// One-time effects of losing a mutation.
    pub fn mutation_loss_effect(&mut self, env: &Env<'_>, id: &MutationId) {
        if env.mutation(id).is_none() {
            return;
        }
        self.recalc_hp(env);
    }

    // ========================================================================
    // Activation
    // ========================================================================

    /// Switches an activatable mutation on, paying its cost up front.
    ///
    /// Returns false if the mutation is missing, passive, or already on.
    pub fn activate_mutation(&mut self, env: &Env<'_>, id: &MutationId) -> bool {
        let Some(def) = env.mutation(id).filter(|def| def.activatable) else {
            return false;
        };
        if !self.has_trait(id) || self.has_active_mutation(id) {
            return false;
        }
        let needs = self.needs_mut();
        needs.hunger += def.cost.hunger;
        needs.thirst += def.cost.thirst;
        needs.fatigue += def.cost.fatigue;
        if let Some(data) = self.ledger_mut().get_mut(id) {
            data.powered = true;
            data.charge = def.cooldown.saturating_sub(1);
        }
        tracing::debug!(%id, "mutation activated");
        true
    }

    /// Switches an activatable mutation off. Passive mutations stay on.
    pub fn deactivate_mutation(&mut self, env: &Env<'_>, id: &MutationId) -> bool {
        if !env.mutation(id).is_some_and(|def| def.activatable) {
            return false;
        }
        if !self.has_active_mutation(id) {
            return false;
        }
        if let Some(data) = self.ledger_mut().get_mut(id) {
            data.powered = false;
            data.charge = 0;
        }
        tracing::debug!(%id, "mutation deactivated");
        true
    }

    /// One turn of upkeep for powered mutations with a recurring cost.
    ///
    /// A charging mutation counts down. At zero it pays its cost into the
    /// needs and recharges, or shuts down if a need it draws on is already
    /// past its ceiling. Returns the mutations that shut down.
    pub fn process_mutation_costs(&mut self, env: &Env<'_>) -> Vec<MutationId> {
        let config = env.config();
        let mut shut_down = Vec::new();
        let Self { ledger, needs, .. } = self;

        for (id, data) in ledger.mutations_mut() {
            if !data.powered {
                continue;
            }
            let Some(def) = env.mutation(id).filter(|def| def.activatable) else {
                continue;
            };
            if def.cost.is_free() {
                continue;
            }
            if data.charge > 0 {
                data.charge -= 1;
                continue;
            }

            let exhausted = (def.cost.hunger > 0 && needs.hunger >= config.hunger_ceiling)
                || (def.cost.thirst > 0 && needs.thirst >= config.thirst_ceiling)
                || (def.cost.fatigue > 0 && needs.fatigue >= config.fatigue_ceiling);
            if exhausted {
                data.powered = false;
                shut_down.push(id.clone());
                continue;
            }
            needs.hunger += def.cost.hunger;
            needs.thirst += def.cost.thirst;
            needs.fatigue += def.cost.fatigue;
            data.charge = def.cooldown.saturating_sub(1);
        }

        if !shut_down.is_empty() {
            tracing::debug!(?shut_down, "mutations shut down for lack of upkeep");
            self.sensory.invalidate();
        }
        shut_down
    }
}
