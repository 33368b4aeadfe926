pub mod body;
pub mod character;
pub mod common;
pub mod item;
pub mod vision;

pub use body::{BodyPart, BodyParts, HpPart};
pub use character::{
    AddOrDrop, Bionic, Bionics, Character, Effect, EffectKind, EffectRequest, Effects, Inventory,
    ItemPosition, LedgerViolation, MutationLedger, Possessions, SensoryCache, Toggle, TraitData,
    worn_position_to_index,
};
pub use common::{BionicId, ItemTypeId, ItemUid, MutationId, Tick};
pub use item::{Item, ItemFlags};
pub use vision::{VisionMode, VisionModes};
