//! Difficulty profiles.
//!
//! A [`Profile`] decides which heuristics the AI consults, how much each one
//! counts, how often the AI deliberately plays a lesser move, and how long it
//! pretends to think. The three built-in tiers are reached through
//! [`Difficulty::profile`]; custom profiles are validated by [`Profile::new`].

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::eval::Heuristic;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("unknown heuristic: {0}")]
    UnknownHeuristic(String),
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
    #[error("heuristic listed twice: {0}")]
    DuplicateHeuristic(Heuristic),
    #[error("weight for {0} must be finite, got {1}")]
    InvalidWeight(Heuristic, f64),
    #[error("exploration rate must be within [0, 1], got {0}")]
    InvalidExploration(f64),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn tag(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// The built-in profile for this tier.
    pub fn profile(self) -> Profile {
        use Heuristic::*;
        match self {
            Difficulty::Easy => Profile::from_parts(
                self,
                Duration::from_millis(500),
                0.3,
                vec![(Capture, 1.0), (Survival, 0.8), (Liberties, 0.3)],
            ),
            Difficulty::Medium => Profile::from_parts(
                self,
                Duration::from_millis(1000),
                0.15,
                vec![
                    (Capture, 1.0),
                    (Survival, 0.9),
                    (Defense, 0.7),
                    (Connect, 0.5),
                    (Territory, 0.3),
                    (Liberties, 0.3),
                ],
            ),
            Difficulty::Hard => Profile::from_parts(
                self,
                Duration::from_millis(2000),
                0.05,
                vec![
                    (Capture, 1.0),
                    (Survival, 0.95),
                    (Defense, 0.8),
                    (Connect, 0.6),
                    (Cut, 0.5),
                    (AttackWeakGroups, 0.4),
                    (Territory, 0.35),
                    (KeyPoints, 0.2),
                    (Liberties, 0.3),
                ],
            ),
        }
    }
}

impl FromStr for Difficulty {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.tag().eq_ignore_ascii_case(s))
            .ok_or_else(|| ProfileError::UnknownDifficulty(s.to_string()))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Immutable AI configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    difficulty: Difficulty,
    thinking: Duration,
    exploration: f64,
    weights: Vec<(Heuristic, f64)>,
}

impl Profile {
    /// Build a profile from heuristic identifiers and weights.
    ///
    /// The enabled heuristics are exactly those listed. Unknown or repeated
    /// identifiers, non-finite weights, and exploration rates outside [0, 1]
    /// are rejected.
    pub fn new(
        difficulty: Difficulty,
        thinking: Duration,
        exploration: f64,
        weights: &[(&str, f64)],
    ) -> Result<Self, ProfileError> {
        if !(0.0..=1.0).contains(&exploration) {
            return Err(ProfileError::InvalidExploration(exploration));
        }
        let mut parsed: Vec<(Heuristic, f64)> = Vec::with_capacity(weights.len());
        for &(id, weight) in weights {
            let h: Heuristic = id.parse()?;
            if parsed.iter().any(|&(seen, _)| seen == h) {
                return Err(ProfileError::DuplicateHeuristic(h));
            }
            if !weight.is_finite() {
                return Err(ProfileError::InvalidWeight(h, weight));
            }
            parsed.push((h, weight));
        }
        Ok(Self::from_parts(difficulty, thinking, exploration, parsed))
    }

    fn from_parts(
        difficulty: Difficulty,
        thinking: Duration,
        exploration: f64,
        weights: Vec<(Heuristic, f64)>,
    ) -> Self {
        Self {
            difficulty,
            thinking,
            exploration,
            weights,
        }
    }

    pub fn name(&self) -> &'static str {
        self.difficulty.tag()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Artificial latency before a decision is returned.
    pub fn thinking(&self) -> Duration {
        self.thinking
    }

    /// Probability of choosing among the top candidates instead of the best.
    pub fn exploration(&self) -> f64 {
        self.exploration
    }

    /// Enabled heuristics with their weights, in evaluation order.
    pub fn weights(&self) -> &[(Heuristic, f64)] {
        &self.weights
    }

    pub fn is_enabled(&self, h: Heuristic) -> bool {
        self.weight(h).is_some()
    }

    pub fn weight(&self, h: Heuristic) -> Option<f64> {
        self.weights.iter().find(|&&(e, _)| e == h).map(|&(_, w)| w)
    }
}
