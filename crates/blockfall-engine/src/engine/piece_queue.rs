use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// Supplies the current piece and keeps a one-piece lookahead.
///
/// Each draw is an independent uniform choice over the seven kinds, so
/// repeats are possible. There is no bag or history.
///
/// # Example
///
/// ```
/// use blockfall_engine::PieceQueue;
///
/// let mut queue = PieceQueue::new();
/// assert_eq!(queue.peek_next(), None);
///
/// let first = queue.pop_next();
/// let next = queue.peek_next().unwrap();
/// assert_eq!(queue.pop_next(), next);
/// # let _ = first;
/// ```
#[derive(Debug, Clone)]
pub struct PieceQueue {
    rng: Pcg32,
    next: Option<PieceKind>,
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Seed for deterministic piece generation.
///
/// A 128-bit seed for the piece RNG. The same seed always yields the same
/// piece sequence, which makes sessions reproducible for debugging and tests.
/// It is written as 32 hexadecimal digits.
///
/// # Example
///
/// ```
/// use blockfall_engine::{GameConfig, GameSession, PieceSeed};
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
/// let text = seed.to_string();
/// assert_eq!(text.parse::<PieceSeed>().unwrap(), seed);
///
/// let session1 = GameSession::with_seed(GameConfig::default(), seed);
/// let session2 = GameSession::with_seed(GameConfig::default(), seed);
/// # let _ = (session1, session2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed {input:?}: expected 32 hexadecimal characters")]
pub struct ParseSeedError {
    input: String,
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(error());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| error())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

impl PieceQueue {
    /// Creates a queue seeded from the thread-local RNG.
    ///
    /// For deterministic piece generation, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
            next: None,
        }
    }

    /// Takes the piece to spawn and draws a fresh lookahead.
    ///
    /// The returned piece is the previous lookahead, or a fresh draw when
    /// there is none yet (the very first spawn).
    pub fn pop_next(&mut self) -> PieceKind {
        let current = self.next.take().unwrap_or_else(|| self.rng.random());
        self.next = Some(self.rng.random());
        current
    }

    /// Returns the lookahead piece, if one has been drawn.
    #[must_use]
    pub fn peek_next(&self) -> Option<PieceKind> {
        self.next
    }

    /// Discards the lookahead. The RNG stream continues where it left off.
    pub fn reset(&mut self) {
        self.next = None;
    }
}
