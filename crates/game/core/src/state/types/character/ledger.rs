//! Runtime record of which traits and mutations a character has.
//!
//! The ledger only stores identifiers and activation state. Everything a
//! mutation *does* (costs, stat mods, vision) lives in the mutation database
//! and is looked up through [`crate::env::MutationOracle`].

use std::collections::{BTreeMap, BTreeSet};

use crate::config::CharacterConfig;
use crate::error::{CoreError, ErrorSeverity};
use crate::state::types::MutationId;

/// Runtime state of one mutation the character has.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraitData {
    /// Activation shortcut; `None` once all letters are taken.
    pub key: Option<char>,
    /// Turns left until the next upkeep payment.
    pub charge: u32,
    pub powered: bool,
}

/// Outcome of a membership toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    Gained,
    Lost,
}

/// Broken ledger invariant, reported by [`MutationLedger::check_invariants`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LedgerViolation {
    #[error("base trait {id} has no mutation entry")]
    BaseTraitWithoutEntry { id: MutationId },

    #[error("activation key '{key}' is shared by {first} and {second}")]
    DuplicateKey {
        key: char,
        first: MutationId,
        second: MutationId,
    },
}

impl CoreError for LedgerViolation {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BaseTraitWithoutEntry { .. } => "LEDGER_BASE_TRAIT_WITHOUT_ENTRY",
            Self::DuplicateKey { .. } => "LEDGER_DUPLICATE_KEY",
        }
    }
}

/// Base traits plus the mutations currently present.
///
/// A key in `my_mutations` means the character has that mutation right now;
/// there is no "disabled but remembered" state. Every base trait is expected
/// to have a mutation entry as well (see [`Self::check_invariants`]).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MutationLedger {
    my_traits: BTreeSet<MutationId>,
    my_mutations: BTreeMap<MutationId, TraitData>,
}

impl MutationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Whether the character currently has the mutation.
    pub fn has_trait(&self, id: &MutationId) -> bool {
        self.my_mutations.contains_key(id)
    }

    /// Whether the trait is one of the character's innate traits.
    pub fn has_base_trait(&self, id: &MutationId) -> bool {
        self.my_traits.contains(id)
    }

    pub fn has_active_mutation(&self, id: &MutationId) -> bool {
        self.my_mutations.get(id).is_some_and(|data| data.powered)
    }

    /// Mutation bound to the activation key `key`.
    pub fn trait_by_invlet(&self, key: char) -> Option<&MutationId> {
        self.my_mutations
            .iter()
            .find(|(_, data)| data.key == Some(key))
            .map(|(id, _)| id)
    }

    pub fn get(&self, id: &MutationId) -> Option<&TraitData> {
        self.my_mutations.get(id)
    }

    pub fn get_mut(&mut self, id: &MutationId) -> Option<&mut TraitData> {
        self.my_mutations.get_mut(id)
    }

    pub fn base_traits(&self) -> impl Iterator<Item = &MutationId> {
        self.my_traits.iter()
    }

    pub fn mutations(&self) -> impl Iterator<Item = (&MutationId, &TraitData)> {
        self.my_mutations.iter()
    }

    pub fn mutations_mut(&mut self) -> impl Iterator<Item = (&MutationId, &mut TraitData)> {
        self.my_mutations.iter_mut()
    }

    /// Mutations that are currently switched on.
    pub fn powered(&self) -> impl Iterator<Item = &MutationId> {
        self.my_mutations
            .iter()
            .filter(|(_, data)| data.powered)
            .map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.my_mutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.my_mutations.is_empty()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Adds a mutation entry with the first free activation key.
    ///
    /// Returns false if the mutation is already present.
    pub fn insert_mutation(&mut self, id: MutationId, powered: bool) -> bool {
        if self.my_mutations.contains_key(&id) {
            return false;
        }
        let key = self.free_key();
        self.my_mutations.insert(
            id,
            TraitData {
                key,
                charge: 0,
                powered,
            },
        );
        true
    }

    pub fn remove_mutation(&mut self, id: &MutationId) -> Option<TraitData> {
        self.my_mutations.remove(id)
    }

    pub fn insert_base(&mut self, id: MutationId) -> bool {
        self.my_traits.insert(id)
    }

    pub fn remove_base(&mut self, id: &MutationId) -> bool {
        self.my_traits.remove(id)
    }

    /// Forgets every trait and mutation.
    pub fn clear(&mut self) {
        self.my_traits.clear();
        self.my_mutations.clear();
    }

    /// Rebinds the activation key of a mutation. A mutation already using
    /// `key` swaps keys with it.
    pub fn set_key(&mut self, id: &MutationId, key: char) -> bool {
        let Some(old) = self.my_mutations.get(id).map(|data| data.key) else {
            return false;
        };
        if let Some(holder) = self.trait_by_invlet(key).cloned() {
            if let Some(data) = self.my_mutations.get_mut(&holder) {
                data.key = old;
            }
        }
        if let Some(data) = self.my_mutations.get_mut(id) {
            data.key = Some(key);
        }
        true
    }

    /// Verifies that every base trait has a mutation entry and that no two
    /// mutations share an activation key.
    pub fn check_invariants(&self) -> Result<(), LedgerViolation> {
        if let Some(id) = self
            .my_traits
            .iter()
            .find(|id| !self.my_mutations.contains_key(*id))
        {
            return Err(LedgerViolation::BaseTraitWithoutEntry { id: id.clone() });
        }

        let mut seen: BTreeMap<char, &MutationId> = BTreeMap::new();
        for (id, data) in &self.my_mutations {
            let Some(key) = data.key else { continue };
            if let Some(first) = seen.insert(key, id) {
                return Err(LedgerViolation::DuplicateKey {
                    key,
                    first: first.clone(),
                    second: id.clone(),
                });
            }
        }
        Ok(())
    }

    fn free_key(&self) -> Option<char> {
        let used: BTreeSet<char> = self.my_mutations.values().filter_map(|d| d.key).collect();
        CharacterConfig::INVLETS.chars().find(|ch| !used.contains(ch))
    }
}
