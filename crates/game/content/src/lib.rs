//! Data-driven character content and loaders.
//!
//! This crate provides loaders for RON/TOML data files:
//! - Mutation database (data-driven via RON)
//! - Bionic registry (data-driven via RON)
//! - Character configuration (data-driven via TOML)
//!
//! Content is consumed by the core through its read-only oracles and never
//! appears in character state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{BionicLoader, ConfigLoader, Content, ContentFactory, MutationLoader};
