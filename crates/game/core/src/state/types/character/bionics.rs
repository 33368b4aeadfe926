//! Installed bionics.

use arrayvec::ArrayVec;

use crate::config::CharacterConfig;
use crate::state::types::BionicId;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bionic {
    pub id: BionicId,
    pub invlet: Option<char>,
    pub powered: bool,
}

/// Bounded list of installed bionics. Each bionic id is installed at most once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bionics {
    installed: ArrayVec<Bionic, { CharacterConfig::MAX_BIONICS }>,
}

impl Bionics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, id: &BionicId) -> bool {
        self.installed.iter().any(|b| b.id == *id)
    }

    pub fn has_active(&self, id: &BionicId) -> bool {
        self.installed.iter().any(|b| b.id == *id && b.powered)
    }

    /// Installs an unpowered bionic.
    ///
    /// Returns false if it is already installed or there is no room left.
    pub fn add(&mut self, id: BionicId) -> bool {
        if self.has(&id) {
            return false;
        }
        let used: Vec<char> = self.installed.iter().filter_map(|b| b.invlet).collect();
        let invlet = CharacterConfig::INVLETS.chars().find(|ch| !used.contains(ch));
        self.installed
            .try_push(Bionic {
                id,
                invlet,
                powered: false,
            })
            .is_ok()
    }

    pub fn remove(&mut self, id: &BionicId) -> bool {
        let before = self.installed.len();
        self.installed.retain(|b| b.id != *id);
        self.installed.len() != before
    }

    /// Switches an installed bionic on or off. Returns false if it is not installed.
    pub fn set_powered(&mut self, id: &BionicId, powered: bool) -> bool {
        match self.installed.iter_mut().find(|b| b.id == *id) {
            Some(bionic) => {
                bionic.powered = powered;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bionic> {
        self.installed.iter()
    }

    pub fn powered(&self) -> impl Iterator<Item = &BionicId> {
        self.installed.iter().filter(|b| b.powered).map(|b| &b.id)
    }

    pub fn len(&self) -> usize {
        self.installed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.installed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_power_and_remove() {
        let mut bionics = Bionics::new();
        let night = BionicId::from("bio_night_vision");

        assert!(bionics.add(night.clone()));
        assert!(!bionics.add(night.clone()));
        assert!(bionics.has(&night));
        assert!(!bionics.has_active(&night));

        assert!(bionics.set_powered(&night, true));
        assert!(bionics.has_active(&night));
        assert_eq!(bionics.powered().count(), 1);

        assert!(bionics.remove(&night));
        assert!(!bionics.set_powered(&night, true));
        assert!(bionics.is_empty());
    }

    #[test]
    fn capacity_is_bounded() {
        let mut bionics = Bionics::new();
        for n in 0..CharacterConfig::MAX_BIONICS {
            assert!(bionics.add(BionicId::new(format!("bio_{n}"))));
        }
        assert!(!bionics.add(BionicId::from("bio_extra")));
    }
}
