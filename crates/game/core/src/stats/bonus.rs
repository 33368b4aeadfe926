//! Bonus stacking for derived capability values.
//!
//! Every derived value (carry weight, carry volume, body-part HP) is computed
//! with the same order: `Flat → %Inc → More → Clamp`. Order of the bonuses
//! inside a stack never matters, so mutations can contribute in any order and
//! removing one gives back exactly the value without it.

/// A single bonus contributed by a mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bonus {
    /// Flat additive bonus (applied first)
    Flat(i32),

    /// Percentage increase, summed with the other increases
    /// (20 = +20%, -35 = -35%)
    Increased(i32),

    /// Multiplier applied on its own after the increases
    /// (50 = ×1.5, -40 = ×0.6)
    More(i32),
}

impl Bonus {
    pub fn flat(value: i32) -> Self {
        Bonus::Flat(value)
    }

    pub fn increased(percent: i32) -> Self {
        Bonus::Increased(percent)
    }

    pub fn more(percent: i32) -> Self {
        Bonus::More(percent)
    }
}

/// A collection of bonuses applied in a fixed order.
///
/// # Example
/// ```
/// # use character_core::stats::{Bonus, BonusStack};
/// let mut stack = BonusStack::new();
/// stack.add(Bonus::flat(5));
/// stack.add(Bonus::increased(20));
/// stack.add(Bonus::increased(15));
/// stack.add(Bonus::more(50));
///
/// // clamp((10 + 5) × 1.35 × 1.5, 0, 100) = 30
/// assert_eq!(stack.apply(10, 0, 100), 30);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BonusStack {
    bonuses: Vec<Bonus>,
}

impl BonusStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, bonus: Bonus) {
        self.bonuses.push(bonus);
    }

    pub fn extend(&mut self, bonuses: impl IntoIterator<Item = Bonus>) {
        self.bonuses.extend(bonuses);
    }

    /// Applies every bonus to `base` and clamps the result to `[min, max]`.
    ///
    /// Intermediate values are computed in 64 bits so large capacities
    /// cannot overflow before clamping.
    pub fn apply(&self, base: i32, min: i32, max: i32) -> i32 {
        let mut flat_sum: i64 = 0;
        let mut inc_sum: i64 = 0;
        for bonus in &self.bonuses {
            match *bonus {
                Bonus::Flat(v) => flat_sum += i64::from(v),
                Bonus::Increased(p) => inc_sum += i64::from(p),
                Bonus::More(_) => {}
            }
        }

        let after_inc = (i64::from(base) + flat_sum) * (100 + inc_sum) / 100;

        let after_more = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::More(p) => Some(i64::from(*p)),
                _ => None,
            })
            .fold(after_inc, |acc, percent| acc * (100 + percent) / 100);

        after_more.clamp(i64::from(min), i64::from(max)) as i32
    }

    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bonuses.len()
    }
}

impl FromIterator<Bonus> for BonusStack {
    fn from_iter<T: IntoIterator<Item = Bonus>>(iter: T) -> Self {
        Self {
            bonuses: iter.into_iter().collect(),
        }
    }
}

/// Clamping bounds for a derived value.
#[derive(Clone, Copy, Debug)]
pub struct StatBounds {
    pub min: i32,
    pub max: i32,
}

impl StatBounds {
    /// Carry capacities never go negative.
    pub const CAPACITY: Self = Self {
        min: 0,
        max: i32::MAX,
    };

    /// A body part always keeps at least one hit point of maximum.
    pub const HIT_POINTS: Self = Self {
        min: 1,
        max: 9_999,
    };
}
