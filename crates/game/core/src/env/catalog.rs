//! In-memory oracle implementations backed by ordered maps.

use std::collections::BTreeMap;

use super::{BionicDefinition, BionicOracle, MutationDefinition, MutationOracle};
use crate::state::types::{BionicId, MutationId};

/// Mutation database keyed by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MutationCatalog {
    definitions: BTreeMap<MutationId, MutationDefinition>,
}

impl MutationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a definition, returning the replaced one.
    pub fn insert(&mut self, definition: MutationDefinition) -> Option<MutationDefinition> {
        self.definitions.insert(definition.id.clone(), definition)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MutationDefinition> {
        self.definitions.values()
    }
}

impl FromIterator<MutationDefinition> for MutationCatalog {
    fn from_iter<T: IntoIterator<Item = MutationDefinition>>(iter: T) -> Self {
        Self {
            definitions: iter.into_iter().map(|d| (d.id.clone(), d)).collect(),
        }
    }
}

impl MutationOracle for MutationCatalog {
    fn definition(&self, id: &MutationId) -> Option<&MutationDefinition> {
        self.definitions.get(id)
    }
}

/// Bionic registry keyed by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BionicCatalog {
    definitions: BTreeMap<BionicId, BionicDefinition>,
}

impl BionicCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, definition: BionicDefinition) -> Option<BionicDefinition> {
        self.definitions.insert(definition.id.clone(), definition)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BionicDefinition> {
        self.definitions.values()
    }
}

impl FromIterator<BionicDefinition> for BionicCatalog {
    fn from_iter<T: IntoIterator<Item = BionicDefinition>>(iter: T) -> Self {
        Self {
            definitions: iter.into_iter().map(|d| (d.id.clone(), d)).collect(),
        }
    }
}

impl BionicOracle for BionicCatalog {
    fn definition(&self, id: &BionicId) -> Option<&BionicDefinition> {
        self.definitions.get(id)
    }
}
