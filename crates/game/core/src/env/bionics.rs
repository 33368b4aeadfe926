use crate::state::types::{BionicId, VisionMode};
use crate::stats::StatMods;

pub trait BionicOracle: Send + Sync {
    fn definition(&self, id: &BionicId) -> Option<&BionicDefinition>;
}

/// Static description of an installable bionic. Every effect only applies
/// while the bionic is powered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BionicDefinition {
    pub id: BionicId,
    pub name: String,
    pub vision: Option<VisionMode>,
    pub underwater_vision: bool,
    /// Added to the current stats by `reset_stats`.
    pub stat_bonus: StatMods,
}

impl BionicDefinition {
    pub fn new(id: impl Into<BionicId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn granting_vision(mut self, mode: VisionMode) -> Self {
        self.vision = Some(mode);
        self
    }

    pub fn with_underwater_vision(mut self) -> Self {
        self.underwater_vision = true;
        self
    }

    pub fn with_stat_bonus(mut self, stat: crate::stats::StatKind, value: i32) -> Self {
        self.stat_bonus.insert(stat, value);
        self
    }
}
