use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for deterministic board generation.
///
/// A 128-bit seed driving every random color drawn by a board: the initial
/// fill and all refills. Two boards built from the same seed and config and fed
/// the same selections evolve identically, which makes sessions replayable.
///
/// Seeds are written as 32 hexadecimal characters.
///
/// # Example
///
/// ```
/// use rowfall_engine::BoardSeed;
/// use rand::Rng as _;
///
/// let seed: BoardSeed = rand::rng().random();
/// let parsed: BoardSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSeed([u8; 16]);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed '{input}': {reason}")]
pub struct ParseSeedError {
    input: String,
    reason: String,
}

impl BoardSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    pub(crate) fn rng(self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl fmt::Display for BoardSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for BoardSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = |reason: String| ParseSeedError {
            input: s.to_owned(),
            reason,
        };
        if s.len() != 32 {
            return Err(error(format!("expected 32 characters, got {}", s.len())));
        }
        let num = u128::from_str_radix(s, 16).map_err(|e| error(e.to_string()))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for BoardSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BoardSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `BoardSeed` values with `rng.random()`.
impl Distribution<BoardSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BoardSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        BoardSeed(seed)
    }
}
