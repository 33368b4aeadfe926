//! Character configuration loader.

use std::path::Path;

use character_core::CharacterConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for character configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<CharacterConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CharacterConfig> {
        let config: CharacterConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        anyhow::ensure!(
            config.overload_factor >= 1,
            "overload_factor must be at least 1, got {}",
            config.overload_factor
        );
        let light = config.light;
        anyhow::ensure!(
            light.ambient_lit > light.ambient_minimal,
            "light.ambient_lit ({}) must be above light.ambient_minimal ({})",
            light.ambient_lit,
            light.ambient_minimal
        );
        Ok(config)
    }
}
