use rand::Rng;
use serde::{Deserialize, Serialize};

/// Color of a board piece.
///
/// Every color maps to the scoring bucket it feeds. [`PieceColor::Curse`] is the only
/// detrimental color: its points are shown with a minus sign and feed no bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceColor {
    /// Restores health.
    Health = 0,
    /// Awards gold.
    Gold = 1,
    /// Awards experience.
    Experience = 2,
    /// Damages the monster.
    MonsterDamage = 3,
    /// Shown as a penalty; scores nothing.
    Curse = 4,
}

impl PieceColor {
    /// Number of piece colors (5).
    pub const LEN: usize = 5;

    /// All colors in index order.
    pub const ALL: [Self; Self::LEN] = [
        Self::Health,
        Self::Gold,
        Self::Experience,
        Self::MonsterDamage,
        Self::Curse,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub const fn is_detrimental(self) -> bool {
        matches!(self, Self::Curse)
    }

    /// Picks one of the first `count` colors uniformly.
    ///
    /// `count` is clamped to `1..=LEN`.
    pub fn random<R>(rng: &mut R, count: usize) -> Self
    where
        R: Rng + ?Sized,
    {
        let count = count.clamp(1, Self::LEN);
        Self::ALL[rng.random_range(0..count)]
    }

    /// Returns the single character representation of this color.
    ///
    /// # Examples
    ///
    /// ```
    /// use rowfall_engine::PieceColor;
    ///
    /// assert_eq!(PieceColor::Gold.as_char(), 'G');
    /// assert_eq!(PieceColor::from_char('g'), Some(PieceColor::Gold));
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Health => 'H',
            Self::Gold => 'G',
            Self::Experience => 'E',
            Self::MonsterDamage => 'M',
            Self::Curse => 'C',
        }
    }

    /// Parses a color from its character representation (case-insensitive).
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'H' => Some(Self::Health),
            'G' => Some(Self::Gold),
            'E' => Some(Self::Experience),
            'M' => Some(Self::MonsterDamage),
            'C' => Some(Self::Curse),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_index_round_trip() {
        for color in PieceColor::ALL {
            assert_eq!(PieceColor::from_index(color.index()), Some(color));
            assert_eq!(PieceColor::from_char(color.as_char()), Some(color));
        }
        assert_eq!(PieceColor::from_index(PieceColor::LEN), None);
        assert_eq!(PieceColor::from_char('x'), None);
    }

    #[test]
    fn test_only_curse_is_detrimental() {
        let detrimental: Vec<_> = PieceColor::ALL
            .into_iter()
            .filter(|c| c.is_detrimental())
            .collect();
        assert_eq!(detrimental, [PieceColor::Curse]);
    }

    #[test]
    fn test_random_respects_count() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            let color = PieceColor::random(&mut rng, 3);
            assert!(color.index() < 3, "unexpected color {color:?}");
        }
        for _ in 0..20 {
            assert_eq!(PieceColor::random(&mut rng, 0), PieceColor::Health);
        }
    }
}
