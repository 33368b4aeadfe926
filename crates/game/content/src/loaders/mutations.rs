//! Mutation database loader.

use std::collections::BTreeSet;
use std::path::Path;

use character_core::{MutationCatalog, MutationDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Mutation database structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationFile {
    pub mutations: Vec<MutationDefinition>,
}

/// Loader for the mutation database from RON files.
pub struct MutationLoader;

impl MutationLoader {
    /// Load and validate the mutation database from a RON file.
    pub fn load(path: &Path) -> LoadResult<MutationCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<MutationCatalog> {
        let file: MutationFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse mutation RON: {}", e))?;
        validate(&file.mutations)?;
        tracing::debug!(count = file.mutations.len(), "loaded mutation database");
        Ok(file.mutations.into_iter().collect())
    }
}

/// Identifiers are checked here so lookups at runtime can treat a miss as
/// "no effect".
fn validate(definitions: &[MutationDefinition]) -> LoadResult<()> {
    let mut seen = BTreeSet::new();
    for def in definitions {
        anyhow::ensure!(!def.id.as_str().is_empty(), "mutation '{}' has an empty id", def.name);
        anyhow::ensure!(seen.insert(&def.id), "duplicate mutation id {}", def.id);
        if def.activatable && def.cooldown == 0 && !def.cost.is_free() {
            anyhow::bail!("mutation {} has an upkeep cost but no cooldown", def.id);
        }
        if !def.activatable && !def.cost.is_free() {
            tracing::warn!(id = %def.id, "passive mutation declares a cost; it is never charged");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use character_core::{
        BodyParts, Bonus, EffectKind, MutationId, MutationOracle, StatKind, VisionMode,
    };

    #[test]
    fn parses_every_field() {
        let catalog = MutationLoader::parse(
            r#"(
                mutations: [
                    (
                        id: "HOOVES",
                        name: "Hooves",
                        points: -1,
                        mods: { Dex: -1 },
                        weight_capacity: [Increased(10)],
                        restricts: "FEET",
                        effect_immunities: [Downed],
                    ),
                    (
                        id: "NIGHTVISION2",
                        name: "Very Night Vision",
                        vision: Some(Nightvision2),
                    ),
                    (
                        id: "WEB_WEAVER",
                        name: "Web Weaver",
                        activatable: true,
                        cost: (hunger: 5),
                        cooldown: 10,
                    ),
                ],
            )"#,
        )
        .unwrap();

        let hooves = catalog.definition(&MutationId::from("HOOVES")).unwrap();
        assert_eq!(hooves.stat_mod(StatKind::Dex), -1);
        assert_eq!(hooves.weight_capacity, vec![Bonus::Increased(10)]);
        assert_eq!(hooves.restricts, BodyParts::FEET);
        assert_eq!(hooves.effect_immunities, vec![EffectKind::Downed]);

        let nv = catalog.definition(&MutationId::from("NIGHTVISION2")).unwrap();
        assert_eq!(nv.vision, Some(VisionMode::Nightvision2));
        assert!(!nv.activatable);

        let web = catalog.definition(&MutationId::from("WEB_WEAVER")).unwrap();
        assert_eq!(web.cost.hunger, 5);
        assert_eq!(web.cooldown, 10);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = MutationLoader::parse(
            r#"(mutations: [(id: "A", name: "a"), (id: "A", name: "again")])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate mutation id A"));
    }

    #[test]
    fn upkeep_without_cooldown_is_rejected() {
        let result = MutationLoader::parse(
            r#"(mutations: [(id: "X", name: "x", activatable: true, cost: (thirst: 1))])"#,
        );
        assert!(result.is_err());
    }
}
