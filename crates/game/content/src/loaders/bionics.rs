//! Bionic registry loader.

use std::collections::BTreeSet;
use std::path::Path;

use character_core::{BionicCatalog, BionicDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Bionic registry structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BionicFile {
    pub bionics: Vec<BionicDefinition>,
}

/// Loader for the bionic registry from RON files.
pub struct BionicLoader;

impl BionicLoader {
    pub fn load(path: &Path) -> LoadResult<BionicCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BionicCatalog> {
        let file: BionicFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse bionic RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for def in &file.bionics {
            anyhow::ensure!(!def.id.as_str().is_empty(), "bionic '{}' has an empty id", def.name);
            anyhow::ensure!(seen.insert(&def.id), "duplicate bionic id {}", def.id);
        }
        tracing::debug!(count = file.bionics.len(), "loaded bionic registry");
        Ok(file.bionics.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use character_core::{BionicId, BionicOracle, StatKind, VisionMode};

    #[test]
    fn parses_vision_and_bonuses() {
        let catalog = BionicLoader::parse(
            r#"(
                bionics: [
                    (id: "bio_night_vision", name: "Implanted Night Vision", vision: Some(NvGoggles)),
                    (id: "bio_str_enhancer", name: "Hydraulic Muscles", stat_bonus: { Str: 2 }),
                ],
            )"#,
        )
        .unwrap();

        let nv = catalog.definition(&BionicId::from("bio_night_vision")).unwrap();
        assert_eq!(nv.vision, Some(VisionMode::NvGoggles));
        let muscles = catalog.definition(&BionicId::from("bio_str_enhancer")).unwrap();
        assert_eq!(muscles.stat_bonus.get(&StatKind::Str), Some(&2));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result =
            BionicLoader::parse(r#"(bionics: [(id: "bio_a", name: "a"), (id: "bio_a", name: "b")])"#);
        assert!(result.is_err());
    }
}
