use std::{fmt, num::ParseIntError, str::FromStr};

use derive_more::{Display, Error};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::StoneKind;

/// Deterministic stone stream with one-stone lookahead.
///
/// Each stone is drawn uniformly among the seven kinds from a [`Pcg32`]
/// seeded by a [`PieceSeed`], so two buffers built from the same seed yield
/// the same sequence. The buffer always knows the stone that comes after the
/// one just handed out ([`Self::peek_next`]).
///
/// # Example
///
/// ```
/// use tetrevo_engine::{PieceBuffer, PieceSeed};
///
/// let mut buffer = PieceBuffer::with_seed(PieceSeed::from(7));
///
/// let preview = buffer.peek_next();
/// assert_eq!(buffer.pop_next(), preview);
/// ```
#[derive(Debug, Clone)]
pub struct PieceBuffer {
    rng: Pcg32,
    next: StoneKind,
}

/// Seed for deterministic stone generation.
///
/// Formatted, parsed and serialized as a hexadecimal string, up to 16 digits.
///
/// # Example
///
/// ```
/// use tetrevo_engine::PieceSeed;
///
/// let seed: PieceSeed = "00000000000000ff".parse().unwrap();
/// assert_eq!(seed, PieceSeed::from(255));
/// assert_eq!(seed.to_string(), "00000000000000ff");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::From)]
pub struct PieceSeed(u64);

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Error parsing a [`PieceSeed`] from hex text.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ParsePieceSeedError {
    #[display("expected at most 16 hex digits, got {len}")]
    TooLong { len: usize },
    #[display("{_0}")]
    InvalidDigit(ParseIntError),
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() > Self::MAX_DIGITS {
            return Err(ParsePieceSeedError::TooLong { len: s.len() });
        }
        u64::from_str_radix(s, 16)
            .map(Self)
            .map_err(ParsePieceSeedError::InvalidDigit)
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
        hex_str
            .parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid hex: {hex_str:?} ({e})")))
    }
}

impl PieceSeed {
    const MAX_DIGITS: usize = 16;

    /// Returns the raw seed value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        PieceSeed(rng.random())
    }
}

impl PieceBuffer {
    /// Creates a buffer whose stream is fully determined by `seed`.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed.0);
        let next = rng.random();
        Self { rng, next }
    }

    /// Hands out the lookahead stone and draws a new one behind it.
    pub fn pop_next(&mut self) -> StoneKind {
        let drawn = self.rng.random();
        std::mem::replace(&mut self.next, drawn)
    }

    /// Returns the stone [`Self::pop_next`] will hand out.
    #[must_use]
    pub fn peek_next(&self) -> StoneKind {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let seed = PieceSeed::from(0x1234_5678_9abc_def0);
        let mut buffer1 = PieceBuffer::with_seed(seed);
        let mut buffer2 = PieceBuffer::with_seed(seed);
        for _ in 0..50 {
            assert_eq!(buffer1.pop_next(), buffer2.pop_next());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut buffer1 = PieceBuffer::with_seed(PieceSeed::from(1));
        let mut buffer2 = PieceBuffer::with_seed(PieceSeed::from(2));
        let seq1: Vec<_> = (0..32).map(|_| buffer1.pop_next()).collect();
        let seq2: Vec<_> = (0..32).map(|_| buffer2.pop_next()).collect();
        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_all_kinds_appear() {
        let mut buffer = PieceBuffer::with_seed(PieceSeed::from(99));
        let mut seen = [false; StoneKind::LEN];
        for _ in 0..500 {
            seen[usize::from(buffer.pop_next().color_id() - 1)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_peek_matches_pop() {
        let mut buffer = PieceBuffer::with_seed(PieceSeed::from(5));
        for _ in 0..20 {
            let peeked = buffer.peek_next();
            assert_eq!(buffer.pop_next(), peeked);
        }
    }

    mod piece_seed_serialization {
        use super::*;

        #[test]
        fn test_roundtrip_random_seed() {
            let seed: PieceSeed = rand::rng().random();
            let serialized = serde_json::to_string(&seed).unwrap();
            let deserialized: PieceSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(seed, deserialized);
        }

        #[test]
        fn test_format_is_16_char_hex_string() {
            let serialized = serde_json::to_string(&PieceSeed::from(0xabc)).unwrap();
            assert_eq!(serialized, "\"0000000000000abc\"");
        }

        #[test]
        fn test_deserialize_short_and_uppercase_hex() {
            let seed: PieceSeed = serde_json::from_str("\"FF\"").unwrap();
            assert_eq!(seed, PieceSeed::from(255));
        }

        #[test]
        fn test_error_invalid_hex_characters() {
            let result: Result<PieceSeed, _> = serde_json::from_str("\"xyz\"");
            let err_msg = result.unwrap_err().to_string();
            assert!(err_msg.contains("invalid hex"));
        }

        #[test]
        fn test_error_too_long() {
            let result: Result<PieceSeed, _> = serde_json::from_str("\"0123456789abcdef0\"");
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_rejects_seventeen_digits_with_leading_zero() {
            assert_eq!(
                "00123456789abcdef".parse::<PieceSeed>(),
                Err(ParsePieceSeedError::TooLong { len: 17 })
            );
            assert_eq!(
                "0123456789abcdef".parse::<PieceSeed>(),
                Ok(PieceSeed::from(0x0123_4567_89ab_cdef))
            );
        }
    }
}
