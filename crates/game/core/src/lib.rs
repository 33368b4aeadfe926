//! Possession and capability state of a single character.
//!
//! `character-core` models what a character owns (a wielded weapon, worn
//! items, a bag, all possibly nested) and what it can currently do, derived
//! from its traits, mutations, bionics and effects (carry capacity, stat
//! modifiers, vision). Everything is in-memory and synchronous; the mutation
//! database and bionic registry are reached through the read-only oracles in
//! [`env`].
pub mod config;
pub mod env;
pub mod error;
#[cfg(feature = "serde")]
pub mod persist;
pub mod state;
pub mod stats;

pub use config::{CharacterConfig, LightConfig};
pub use env::{
    BionicCatalog, BionicDefinition, BionicOracle, Env, MutationCatalog, MutationCost,
    MutationDefinition, MutationOracle,
};
pub use error::{CoreError, ErrorSeverity};
#[cfg(feature = "serde")]
pub use persist::PersistError;
pub use state::{
    AddOrDrop, Bionic, Bionics, BionicId, BodyPart, BodyParts, Character, Effect, EffectKind,
    EffectRequest, Effects, HpPart, Inventory, Item, ItemFlags, ItemPosition, ItemTypeId, ItemUid,
    LedgerViolation, MutationId, MutationLedger, Possessions, Tick, Toggle, TraitData, VisionMode,
    VisionModes,
};
pub use stats::{Bonus, BonusStack, CoreStats, Needs, StatKind, StatMods};
