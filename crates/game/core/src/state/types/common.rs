use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of a single item instance.
///
/// Two items with identical contents are still different items; possession
/// queries that talk about "this item" compare uids, never values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemUid(pub u64);

static NEXT_ITEM_UID: AtomicU64 = AtomicU64::new(1);

impl ItemUid {
    /// Allocates a uid that has never been handed out in this process.
    pub fn fresh() -> Self {
        Self(NEXT_ITEM_UID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ItemUid {
    fn default() -> Self {
        Self::fresh()
    }
}

impl fmt::Display for ItemUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id! {
    /// Identifier of an item type (`"backpack"`, `"goggles_nv"`).
    ItemTypeId
}

string_id! {
    /// Identifier of a trait or mutation; also the key into the mutation database.
    MutationId
}

string_id! {
    /// Identifier of a bionic; also the key into the bionic registry.
    BionicId
}

/// Discrete time unit of the game clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

/// Saturates at the end of time instead of wrapping.
impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0.saturating_add(rhs))
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
