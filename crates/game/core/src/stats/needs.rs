//! Recurring needs that powered mutations draw on.

/// Hunger, thirst and fatigue levels. Higher is worse; zero is sated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Needs {
    pub hunger: i32,
    pub thirst: i32,
    pub fatigue: i32,
}

impl Needs {
    pub fn new(hunger: i32, thirst: i32, fatigue: i32) -> Self {
        Self {
            hunger,
            thirst,
            fatigue,
        }
    }
}
