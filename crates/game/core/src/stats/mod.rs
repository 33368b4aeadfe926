//! Stat system.
//!
//! ```text
//! [ Core stats (maxima) ] ── mutation stat mods (apply_mods)
//!      ↓
//! [ Derived values ] ── bonus stacks from present mutations
//!      (carry weight, carry volume, body-part HP)
//! ```
//!
//! Derived values are never stored; they are recomputed from the maxima and
//! the ledger whenever they are asked for.

pub mod bonus;
pub mod core;
pub mod needs;

pub use bonus::{Bonus, BonusStack, StatBounds};
pub use self::core::{CoreStats, StatKind, StatMods};
pub use needs::Needs;
