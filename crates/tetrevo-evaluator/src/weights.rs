//! Heuristic weight vector and its plain-text record format.
//!
//! A weight file holds one record: four comma separated numbers, optionally in
//! square brackets, e.g. `[-0.51, 0.76, -0.36, -0.18]`. The order is aggregate
//! height, complete lines, holes, bumpiness. Parsing fails on a wrong number
//! of values or a value that is not a float; nothing is truncated or padded.

use std::{fmt, num::ParseFloatError, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::board_analysis::BoardFeatures;

/// Weights of the four board features, in [`BoardFeatures::to_array`] order.
///
/// # Example
///
/// ```
/// use tetrevo_evaluator::weights::HeuristicWeights;
///
/// let weights: HeuristicWeights = "[-0.5, 0.75, -0.25, -1]".parse().unwrap();
/// assert_eq!(weights.as_array(), &[-0.5, 0.75, -0.25, -1.0]);
/// assert_eq!(weights.to_string(), "[-0.5, 0.75, -0.25, -1.0]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, derive_more::From)]
#[serde(transparent)]
pub struct HeuristicWeights([f64; BoardFeatures::LEN]);

impl HeuristicWeights {
    /// Number of weights.
    pub const LEN: usize = BoardFeatures::LEN;

    #[must_use]
    pub const fn new(weights: [f64; Self::LEN]) -> Self {
        Self(weights)
    }

    #[must_use]
    pub const fn as_array(&self) -> &[f64; Self::LEN] {
        &self.0
    }

    #[must_use]
    pub fn as_mut_array(&mut self) -> &mut [f64; Self::LEN] {
        &mut self.0
    }

    /// Returns the weighted sum of `features`.
    #[must_use]
    pub fn score(&self, features: &BoardFeatures) -> f64 {
        std::iter::zip(&self.0, features.to_array())
            .map(|(w, f)| w * f)
            .sum()
    }
}

impl fmt::Display for HeuristicWeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, w) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{w:?}")?;
        }
        write!(f, "]")
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum WeightsParseError {
    #[display("expected {expected} weights, found {found}")]
    WrongArity { expected: usize, found: usize },
    #[display("invalid weight {token:?}")]
    InvalidNumber {
        token: String,
        source: ParseFloatError,
    },
}

impl FromStr for HeuristicWeights {
    type Err = WeightsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .unwrap_or(s);

        let tokens: Vec<&str> = s.split(',').map(str::trim).collect();
        // A trailing comma is tolerated: "[1, 2, 3, 4,]".
        let tokens = match tokens.split_last() {
            Some((last, rest)) if last.is_empty() && !rest.is_empty() => rest,
            _ => &tokens[..],
        };
        if tokens.len() != Self::LEN {
            let found = if tokens.len() == 1 && tokens[0].is_empty() {
                0
            } else {
                tokens.len()
            };
            return Err(WeightsParseError::WrongArity {
                expected: Self::LEN,
                found,
            });
        }

        let mut weights = [0.0; Self::LEN];
        for (weight, token) in weights.iter_mut().zip(tokens) {
            *weight = token
                .parse()
                .map_err(|source| WeightsParseError::InvalidNumber {
                    token: (*token).to_owned(),
                    source,
                })?;
        }
        Ok(Self(weights))
    }
}
