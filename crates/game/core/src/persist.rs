//! Binary persistence of characters.
//!
//! Item uids and the sensory cache are not part of the encoding: a loaded
//! character gets fresh uids and recomputes its cache on first read.

use crate::error::{CoreError, ErrorSeverity};
use crate::state::Character;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PersistError {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

impl CoreError for PersistError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Serialization(_) => ErrorSeverity::Internal,
            Self::Deserialization(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Serialization(_) => "PERSIST_SERIALIZATION",
            Self::Deserialization(_) => "PERSIST_DESERIALIZATION",
        }
    }
}

/// Encodes possessions, ledger, stats, HP and the remaining raw values.
pub fn store(character: &Character) -> Result<Vec<u8>, PersistError> {
    let bytes = bincode::serialize(character)
        .map_err(|e| PersistError::Serialization(e.to_string()))?;
    tracing::debug!(name = %character.name, bytes = bytes.len(), "stored character");
    Ok(bytes)
}

pub fn load(bytes: &[u8]) -> Result<Character, PersistError> {
    let character: Character =
        bincode::deserialize(bytes).map_err(|e| PersistError::Deserialization(e.to_string()))?;
    tracing::debug!(name = %character.name, "loaded character");
    Ok(character)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CharacterConfig;
    use crate::env::{BionicCatalog, Env, MutationCatalog, MutationDefinition};
    use crate::state::{BionicId, HpPart, Item, MutationId, Tick};
    use crate::stats::CoreStats;

    #[test]
    fn round_trip_keeps_state_but_not_identity() {
        let mutations: MutationCatalog =
            [MutationDefinition::new("FLEET", "Fleet-footed")].into_iter().collect();
        let bionics = BionicCatalog::new();
        let config = CharacterConfig::default();
        let env = Env::new(&mutations, &bionics, &config);

        let mut c = Character::new("Juno", false, CoreStats::new(10, 9, 8, 7), &config);
        c.toggle_trait(&env, &MutationId::from("FLEET"));
        c.add_bionic(BionicId::from("bio_torch"));
        c.wear(Item::new("jacket").containing(Item::new("lighter")));
        c.wield(Item::new("crowbar").with_weight(1_500));
        c.i_add(Item::new("can").with_volume(1));
        c.possessions_mut().assign_invlet('q', "can".into());
        c.set_hp_cur(HpPart::ArmR, 30);
        c.set_turn_died(Tick(12));

        let bytes = store(&c).unwrap();
        let loaded = load(&bytes).unwrap();

        assert_eq!(loaded.name, "Juno");
        assert_eq!(loaded.stats(), c.stats());
        assert_eq!(loaded.possessions(), c.possessions());
        assert_eq!(loaded.ledger(), c.ledger());
        assert_eq!(loaded.bionics(), c.bionics());
        assert_eq!(loaded.hp_cur(HpPart::ArmR), 30);
        assert_eq!(loaded.get_turn_died(), Some(Tick(12)));
        assert!(loaded.check_invariants().is_ok());

        let original = c.possessions().weapon().unwrap();
        let restored = loaded.possessions().weapon().unwrap();
        assert!(!original.is_same(restored));
        assert_eq!(original, restored);
    }

    #[test]
    fn truncated_input_is_a_validation_error() {
        let config = CharacterConfig::default();
        let c = Character::new("Kit", true, CoreStats::default(), &config);
        let bytes = store(&c).unwrap();

        let err = load(&bytes[..bytes.len() / 2]).unwrap_err();
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(err.error_code(), "PERSIST_DESERIALIZATION");
    }
}
