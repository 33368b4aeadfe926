//! Authoritative character state.
//!
//! This module owns the data structures that describe what a character
//! carries and what it currently is. Derived values (capacities, sight) are
//! computed from this state on demand and never stored alongside it.
pub mod types;

pub use types::{
    AddOrDrop, Bionic, Bionics, BionicId, BodyPart, BodyParts, Character, Effect, EffectKind,
    EffectRequest, Effects, HpPart, Inventory, Item, ItemFlags, ItemPosition, ItemTypeId, ItemUid,
    LedgerViolation, MutationId, MutationLedger, Possessions, SensoryCache, Tick, Toggle,
    TraitData, VisionMode, VisionModes, worn_position_to_index,
};
