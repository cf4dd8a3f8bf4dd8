use serde::{Deserialize, Serialize};

use super::PieceColor;

/// Points awarded by a resolved streak, split by scoring bucket.
///
/// ```
/// use rowfall_engine::{PieceColor, Points};
///
/// let mut points = Points::ZERO;
/// points.award(PieceColor::Gold, 6);
/// points.award(PieceColor::Curse, 2);
/// assert_eq!(points.gold, 6);
/// assert_eq!(points.health, 0);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Add,
    derive_more::AddAssign,
)]
pub struct Points {
    pub health: i64,
    pub gold: i64,
    pub experience: i64,
    pub monster_damage: i64,
}

impl Points {
    pub const ZERO: Self = Self {
        health: 0,
        gold: 0,
        experience: 0,
        monster_damage: 0,
    };

    /// Adds `amount` to the bucket fed by `color`.
    ///
    /// Detrimental colors have no bucket and leave the points unchanged.
    pub fn award(&mut self, color: PieceColor, amount: i64) {
        match color {
            PieceColor::Health => self.health += amount,
            PieceColor::Gold => self.gold += amount,
            PieceColor::Experience => self.experience += amount,
            PieceColor::MonsterDamage => self.monster_damage += amount,
            PieceColor::Curse => {}
        }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}
