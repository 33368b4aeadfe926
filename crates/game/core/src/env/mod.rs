//! Traits describing read-only character data.
//!
//! Oracles expose the mutation database and the bionic registry. The [`Env`]
//! aggregate bundles them with the tunable [`CharacterConfig`] so character
//! operations can reach everything they need without coupling to concrete
//! implementations.
mod bionics;
mod catalog;
mod mutations;

pub use bionics::{BionicDefinition, BionicOracle};
pub use catalog::{BionicCatalog, MutationCatalog};
pub use mutations::{MutationCost, MutationDefinition, MutationOracle};

use crate::config::CharacterConfig;
use crate::state::types::{BionicId, MutationId};

/// Read-only collaborators required by ledger, capacity and vision code.
#[derive(Clone, Copy)]
pub struct Env<'a> {
    mutations: &'a dyn MutationOracle,
    bionics: &'a dyn BionicOracle,
    config: &'a CharacterConfig,
}

impl<'a> Env<'a> {
    pub fn new(
        mutations: &'a dyn MutationOracle,
        bionics: &'a dyn BionicOracle,
        config: &'a CharacterConfig,
    ) -> Self {
        Self {
            mutations,
            bionics,
            config,
        }
    }

    pub fn mutations(&self) -> &'a dyn MutationOracle {
        self.mutations
    }

    pub fn bionics(&self) -> &'a dyn BionicOracle {
        self.bionics
    }

    pub fn config(&self) -> &'a CharacterConfig {
        self.config
    }

    /// Looks up a mutation definition. A miss means "no effect".
    pub fn mutation(&self, id: &MutationId) -> Option<&'a MutationDefinition> {
        self.mutations.definition(id)
    }

    pub fn bionic(&self, id: &BionicId) -> Option<&'a BionicDefinition> {
        self.bionics.definition(id)
    }
}

impl std::fmt::Debug for Env<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Env")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
