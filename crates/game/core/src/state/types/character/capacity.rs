//! Carry capacity.
//!
//! Capacities are derived on demand from the strength maximum, worn storage
//! and the capacity bonuses of every mutation the character has.

use super::Character;
use crate::env::{Env, MutationDefinition};
use crate::state::types::Item;
use crate::stats::{Bonus, BonusStack, StatBounds};

/// Outcome of [`Character::i_add_or_drop`].
#[derive(Debug, Default, PartialEq)]
pub struct AddOrDrop {
    /// Copies stored in the inventory.
    pub stored: usize,
    /// Copies that did not fit; the caller places them in the world.
    pub dropped: Vec<Item>,
}

impl AddOrDrop {
    pub fn all_stored(&self) -> bool {
        self.dropped.is_empty()
    }
}

impl Character {
    pub fn weight_carried(&self) -> i32 {
        self.possessions().weight_carried()
    }

    pub fn volume_carried(&self) -> i32 {
        self.possessions().volume_carried()
    }

    pub fn weight_capacity(&self, env: &Env<'_>) -> i32 {
        let config = env.config();
        let base = config.base_weight_capacity + self.stats().str_max * config.weight_per_strength;
        self.mutation_bonuses(env, |def| &def.weight_capacity)
            .apply(base, StatBounds::CAPACITY.min, StatBounds::CAPACITY.max)
    }

    pub fn volume_capacity(&self, env: &Env<'_>) -> i32 {
        let base = env.config().base_volume_capacity + self.possessions().worn_storage();
        self.mutation_bonuses(env, |def| &def.volume_capacity)
            .apply(base, StatBounds::CAPACITY.min, StatBounds::CAPACITY.max)
    }

    /// Whether `volume` more fits. A safe pickup must leave some room.
    pub fn can_pick_volume(&self, env: &Env<'_>, volume: i32, safe: bool) -> bool {
        let total = self.volume_carried() + volume;
        let capacity = self.volume_capacity(env);
        if safe { total < capacity } else { total <= capacity }
    }

    /// Whether `weight` more can be carried. An unsafe pickup may overload
    /// the character up to `overload_factor` times the capacity.
    pub fn can_pick_weight(&self, env: &Env<'_>, weight: i32, safe: bool) -> bool {
        let total = i64::from(self.weight_carried()) + i64::from(weight);
        let capacity = i64::from(self.weight_capacity(env));
        if safe {
            total <= capacity
        } else {
            total <= capacity * i64::from(env.config().overload_factor)
        }
    }

    /// Stores `qty` copies of `item` (at least one) while they fit. Once a
    /// copy does not fit, it and every later copy are handed back for world
    /// placement.
    pub fn i_add_or_drop(&mut self, env: &Env<'_>, item: Item, qty: usize) -> AddOrDrop {
        let qty = qty.max(1);
        let mut outcome = AddOrDrop::default();
        let mut copies = (1..qty).map(|_| item.duplicate()).collect::<Vec<_>>();
        copies.insert(0, item);

        for copy in copies {
            let fits = outcome.dropped.is_empty()
                && self.can_pick_weight(env, copy.total_weight(), true)
                && self.can_pick_volume(env, copy.total_volume(), false);
            if fits {
                self.i_add(copy);
                outcome.stored += 1;
            } else {
                outcome.dropped.push(copy);
            }
        }
        if !outcome.dropped.is_empty() {
            tracing::debug!(
                stored = outcome.stored,
                dropped = outcome.dropped.len(),
                "inventory full, dropping the rest"
            );
        }
        outcome
    }

    fn mutation_bonuses<F>(&self, env: &Env<'_>, select: F) -> BonusStack
    where
        F: Fn(&MutationDefinition) -> &Vec<Bonus>,
    {
        self.ledger()
            .mutations()
            .filter_map(|(id, _)| env.mutation(id))
            .flat_map(|def| select(def).iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CharacterConfig;
    use crate::env::{BionicCatalog, MutationCatalog};
    use crate::stats::CoreStats;

    struct Fixture {
        mutations: MutationCatalog,
        bionics: BionicCatalog,
        config: CharacterConfig,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                mutations: [
                    MutationDefinition::new("PACKMULE", "Packmule")
                        .with_volume_bonus(Bonus::increased(40)),
                    MutationDefinition::new("BADBACK", "Bad back")
                        .with_weight_bonus(Bonus::increased(-35)),
                ]
                .into_iter()
                .collect(),
                bionics: BionicCatalog::new(),
                config: CharacterConfig::default(),
            }
        }

        fn env(&self) -> Env<'_> {
            Env::new(&self.mutations, &self.bionics, &self.config)
        }
    }

    fn survivor(config: &CharacterConfig) -> Character {
        Character::new("Ash", true, CoreStats::default(), config)
    }

    #[test]
    fn weight_capacity_follows_strength_and_mutations() {
        let fx = Fixture::new();
        let env = fx.env();
        let mut c = survivor(&fx.config);
        assert_eq!(c.weight_capacity(&env), 13_000 + 8 * 4_000);

        c.toggle_mutation(&env, &"BADBACK".into());
        assert_eq!(c.weight_capacity(&env), 45_000 * 65 / 100);
    }

    #[test]
    fn volume_capacity_counts_worn_storage() {
        let fx = Fixture::new();
        let env = fx.env();
        let mut c = survivor(&fx.config);
        c.wear(Item::new("backpack").with_storage(48));
        assert_eq!(c.volume_capacity(&env), 50);

        c.toggle_mutation(&env, &"PACKMULE".into());
        assert_eq!(c.volume_capacity(&env), 70);
    }

    #[test]
    fn safe_pickups_are_stricter() {
        let fx = Fixture::new();
        let env = fx.env();
        let c = survivor(&fx.config);
        let capacity = c.weight_capacity(&env);

        assert!(c.can_pick_weight(&env, capacity, true));
        assert!(!c.can_pick_weight(&env, capacity + 1, true));
        assert!(c.can_pick_weight(&env, capacity + 1, false));

        assert!(c.can_pick_volume(&env, 2, false));
        assert!(!c.can_pick_volume(&env, 2, true));
    }

    #[test]
    fn add_or_drop_of_zero_copies_still_places_the_item() {
        let fx = Fixture::new();
        let env = fx.env();
        let mut c = survivor(&fx.config);

        let outcome = c.i_add_or_drop(&env, Item::new("coin"), 0);
        assert_eq!(outcome.stored, 1);
        assert!(outcome.all_stored());
        assert_eq!(c.possessions().inventory().len(), 1);
    }

    #[test]
    fn add_or_drop_splits_at_first_rejection() {
        let fx = Fixture::new();
        let env = fx.env();
        let mut c = survivor(&fx.config);

        let outcome = c.i_add_or_drop(&env, Item::new("brick").with_volume(1), 4);
        assert_eq!(outcome.stored, 2);
        assert_eq!(outcome.dropped.len(), 2);
        assert!(!outcome.all_stored());
        assert_eq!(c.possessions().inventory().len(), 2);

        let uids: Vec<_> = c
            .possessions()
            .inventory()
            .iter()
            .chain(outcome.dropped.iter())
            .map(Item::uid)
            .collect();
        let mut unique = uids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), uids.len());
    }

    #[test]
    fn zero_quantity_still_tries_one() {
        let fx = Fixture::new();
        let env = fx.env();
        let mut c = survivor(&fx.config);
        let outcome = c.i_add_or_drop(&env, Item::new("pebble"), 0);
        assert_eq!(outcome.stored, 1);
        assert!(outcome.all_stored());
    }
}
