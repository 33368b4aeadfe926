//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use character_core::{BionicCatalog, CharacterConfig, Env, MutationCatalog};

use crate::loaders::{BionicLoader, ConfigLoader, LoadResult, MutationLoader};

/// Everything a character needs from the data directory.
#[derive(Debug, Default)]
pub struct Content {
    pub config: CharacterConfig,
    pub mutations: MutationCatalog,
    pub bionics: BionicCatalog,
}

impl Content {
    pub fn env(&self) -> Env<'_> {
        Env::new(&self.mutations, &self.bionics, &self.config)
    }
}

/// Content factory that loads all character content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── mutations.ron
/// └── bionics.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load character configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<CharacterConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the mutation database from `mutations.ron`.
    pub fn load_mutations(&self) -> LoadResult<MutationCatalog> {
        MutationLoader::load(&self.data_dir.join("mutations.ron"))
    }

    /// Load the bionic registry from `bionics.ron`.
    pub fn load_bionics(&self) -> LoadResult<BionicCatalog> {
        BionicLoader::load(&self.data_dir.join("bionics.ron"))
    }

    /// Load all three files. A missing `config.toml` falls back to defaults;
    /// the databases are required.
    pub fn load_all(&self) -> LoadResult<Content> {
        let config_path = self.data_dir.join("config.toml");
        let config = if config_path.exists() {
            ConfigLoader::load(&config_path)?
        } else {
            tracing::info!(dir = %self.data_dir.display(), "no config.toml, using defaults");
            CharacterConfig::default()
        };

        let content = Content {
            config,
            mutations: self.load_mutations()?,
            bionics: self.load_bionics()?,
        };
        tracing::info!(
            mutations = content.mutations.len(),
            bionics = content.bionics.len(),
            "loaded character content"
        );
        Ok(content)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
