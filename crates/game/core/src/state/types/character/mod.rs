//! The character aggregate: possessions, ledger, bionics, effects and the
//! derived sensory cache.
//!
//! Every `&mut` accessor of a subsystem that feeds the sensory cache marks the
//! cache dirty before handing out the borrow, so there is no way to change
//! vision-relevant state without the next read recomputing it.
mod bionics;
mod capacity;
mod effects;
mod inventory;
mod ledger;
mod mutation;
mod possessions;
mod vision;

pub use bionics::{Bionic, Bionics};
pub use capacity::AddOrDrop;
pub use effects::{Effect, EffectKind, EffectRequest, Effects};
pub use inventory::Inventory;
pub use ledger::{LedgerViolation, MutationLedger, Toggle, TraitData};
pub use possessions::{ItemPosition, Possessions, worn_position_to_index};
pub use vision::SensoryCache;

use strum::{EnumCount, IntoEnumIterator};

use super::{BionicId, HpPart, Item, ItemUid, Tick};
use crate::config::CharacterConfig;
use crate::env::Env;
use crate::stats::{CoreStats, Needs, StatKind};

/// A creature the player can be or meet.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub name: String,
    pub male: bool,

    stats: CoreStats,
    hp_cur: [i32; HpPart::COUNT],
    hp_max: [i32; HpPart::COUNT],
    needs: Needs,

    possessions: Possessions,
    ledger: MutationLedger,
    bionics: Bionics,
    effects: Effects,
    underwater: bool,
    turn_died: Option<Tick>,

    #[cfg_attr(feature = "serde", serde(skip))]
    sensory: SensoryCache,
}

impl Character {
    /// Creates a character with empty possessions and no traits. Every body
    /// part starts at full HP.
    pub fn new(
        name: impl Into<String>,
        male: bool,
        stats: CoreStats,
        config: &CharacterConfig,
    ) -> Self {
        let hp = config.hp_base + stats.str_max * config.hp_per_strength;
        Self {
            name: name.into(),
            male,
            stats,
            hp_cur: [hp; HpPart::COUNT],
            hp_max: [hp; HpPart::COUNT],
            needs: Needs::default(),
            possessions: Possessions::new(),
            ledger: MutationLedger::new(),
            bionics: Bionics::new(),
            effects: Effects::empty(),
            underwater: false,
            turn_died: None,
            sensory: SensoryCache::default(),
        }
    }

    // ========================================================================
    // Subsystem access
    // ========================================================================

    pub fn stats(&self) -> &CoreStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut CoreStats {
        &mut self.stats
    }

    pub fn needs(&self) -> &Needs {
        &self.needs
    }

    pub fn needs_mut(&mut self) -> &mut Needs {
        &mut self.needs
    }

    pub fn possessions(&self) -> &Possessions {
        &self.possessions
    }

    pub fn possessions_mut(&mut self) -> &mut Possessions {
        self.sensory.invalidate();
        &mut self.possessions
    }

    pub fn ledger(&self) -> &MutationLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut MutationLedger {
        self.sensory.invalidate();
        &mut self.ledger
    }

    pub fn bionics(&self) -> &Bionics {
        &self.bionics
    }

    pub fn bionics_mut(&mut self) -> &mut Bionics {
        self.sensory.invalidate();
        &mut self.bionics
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut Effects {
        self.sensory.invalidate();
        &mut self.effects
    }

    pub fn is_underwater(&self) -> bool {
        self.underwater
    }

    pub fn set_underwater(&mut self, underwater: bool) {
        if self.underwater != underwater {
            self.underwater = underwater;
            self.sensory.invalidate();
        }
    }

    // ========================================================================
    // Hit points
    // ========================================================================

    pub fn hp_cur(&self, part: HpPart) -> i32 {
        self.hp_cur[part.as_index()]
    }

    pub fn hp_max(&self, part: HpPart) -> i32 {
        self.hp_max[part.as_index()]
    }

    /// Sets current HP of a part, clamped to `[0, hp_max]`.
    pub fn set_hp_cur(&mut self, part: HpPart, hp: i32) {
        let index = part.as_index();
        self.hp_cur[index] = hp.clamp(0, self.hp_max[index]);
    }

    pub fn is_dead(&self) -> bool {
        self.hp_cur(HpPart::Head) <= 0 || self.hp_cur(HpPart::Torso) <= 0
    }

    /// Records the turn of death. Later calls keep the first recorded turn.
    pub fn set_turn_died(&mut self, turn: Tick) {
        if self.turn_died.is_none() {
            self.turn_died = Some(turn);
        }
    }

    pub fn get_turn_died(&self) -> Option<Tick> {
        self.turn_died
    }

    // ========================================================================
    // Stats
    // ========================================================================

    /// Rebuilds current stats from the maxima plus powered bionic bonuses.
    pub fn reset_stats(&mut self, env: &Env<'_>) {
        for kind in StatKind::iter() {
            *self.stats.current_mut(kind) = self.stats.max(kind);
        }
        for id in self.bionics.powered() {
            let Some(def) = env.bionic(id) else { continue };
            for (&kind, &bonus) in &def.stat_bonus {
                *self.stats.current_mut(kind) += bonus;
            }
        }
    }

    /// Brings a freshly created or loaded character into a consistent state:
    /// HP maxima follow the ledger, every part is healed, and current stats
    /// are rebuilt.
    pub fn normalize(&mut self, env: &Env<'_>) {
        self.recalc_hp(env);
        self.hp_cur = self.hp_max;
        self.reset_stats(env);
        self.sensory.invalidate();
    }

    // ========================================================================
    // Bionics
    // ========================================================================

    pub fn has_bionic(&self, id: &BionicId) -> bool {
        self.bionics.has(id)
    }

    pub fn has_active_bionic(&self, id: &BionicId) -> bool {
        self.bionics.has_active(id)
    }

    pub fn add_bionic(&mut self, id: BionicId) -> bool {
        let added = self.bionics_mut().add(id.clone());
        if !added {
            tracing::warn!(%id, "bionic not installed: duplicate or no room left");
        }
        added
    }

    pub fn remove_bionic(&mut self, id: &BionicId) -> bool {
        self.bionics_mut().remove(id)
    }

    pub fn set_bionic_powered(&mut self, id: &BionicId, powered: bool) -> bool {
        self.bionics_mut().set_powered(id, powered)
    }

    // ========================================================================
    // Possessions
    // ========================================================================

    pub fn has_item_with<F>(&self, filter: F) -> bool
    where
        F: Fn(&Item) -> bool,
    {
        self.possessions.has_item_with(filter)
    }

    pub fn items_with<F>(&self, filter: F) -> Vec<&Item>
    where
        F: Fn(&Item) -> bool,
    {
        self.possessions.items_with(filter)
    }

    pub fn remove_items_with<F>(&mut self, filter: F) -> Vec<Item>
    where
        F: Fn(&Item) -> bool,
    {
        self.possessions_mut().remove_items_with(filter)
    }

    pub fn remove_worn_items_with<F>(&mut self, filter: F) -> Vec<Item>
    where
        F: Fn(&Item) -> bool,
    {
        self.possessions_mut().remove_worn_items_with(filter)
    }

    pub fn is_worn(&self, item: &Item) -> bool {
        self.possessions.is_worn(item)
    }

    /// Stores `item` in the inventory. The bag does not feed the sensory
    /// cache, so this leaves it valid.
    pub fn i_add(&mut self, item: Item) -> &mut Item {
        self.possessions.i_add(item)
    }

    pub fn i_rem(&mut self, position: ItemPosition) -> Option<Item> {
        self.possessions_mut().i_rem(position)
    }

    pub fn i_rem_uid(&mut self, uid: ItemUid) -> Option<Item> {
        self.possessions_mut().i_rem_uid(uid)
    }

    pub fn wield(&mut self, item: Item) -> Option<Item> {
        self.possessions_mut().wield(item)
    }

    pub fn wear(&mut self, item: Item) -> &Item {
        self.possessions_mut().wear(item)
    }

    pub fn take_off(&mut self, index: usize) -> Option<Item> {
        self.possessions_mut().take_off(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{BionicCatalog, BionicDefinition, MutationCatalog};

    fn survivor() -> Character {
        Character::new("Tess", false, CoreStats::default(), &CharacterConfig::default())
    }

    #[test]
    fn new_character_starts_at_full_hp() {
        let c = survivor();
        for part in HpPart::iter() {
            assert_eq!(c.hp_cur(part), 60 + 8 * 3);
            assert_eq!(c.hp_max(part), c.hp_cur(part));
        }
        assert!(!c.is_dead());
    }

    #[test]
    fn turn_of_death_is_recorded_once() {
        let mut c = survivor();
        c.set_hp_cur(HpPart::Torso, -5);
        assert!(c.is_dead());
        assert_eq!(c.hp_cur(HpPart::Torso), 0);

        c.set_turn_died(Tick(40));
        c.set_turn_died(Tick(90));
        assert_eq!(c.get_turn_died(), Some(Tick(40)));
    }

    #[test]
    fn reset_stats_adds_powered_bionic_bonuses() {
        let mutations = MutationCatalog::new();
        let bionics: BionicCatalog = [BionicDefinition::new("bio_str", "Hydraulic muscles")
            .with_stat_bonus(StatKind::Str, 20)]
        .into_iter()
        .collect();
        let config = CharacterConfig::default();
        let env = Env::new(&mutations, &bionics, &config);

        let mut c = survivor();
        let id = BionicId::from("bio_str");
        assert!(c.add_bionic(id.clone()));
        c.reset_stats(&env);
        assert_eq!(c.stats().str_cur, 8);

        c.set_bionic_powered(&id, true);
        c.reset_stats(&env);
        assert_eq!(c.stats().str_cur, 28);
        assert_eq!(c.stats().str_max, 8);
    }

    #[test]
    fn bag_insertions_keep_the_sensory_cache() {
        let mut c = survivor();
        c.sensory.mark_clean();
        c.i_add(Item::new("rock"));
        assert!(!c.sensory.is_dirty());
        c.wear(Item::new("hat"));
        assert!(c.sensory.is_dirty());
    }
}
