//! Balance tuning data. The weighted need-count distribution, urgency
//! thresholds, arrival timing, and capacity are empirically chosen constants;
//! they live here as configuration so they can be tuned without touching the
//! engine. `data/balance.json` at the workspace root carries the shipped
//! values.

use serde::{Deserialize, Serialize};

use crate::needs::NeedType;

/// All tunable balancing constants. `Default` matches the shipped game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Balance {
    /// Maximum cats in the shelter at once; arrivals beyond this are rejected.
    pub max_capacity: usize,
    /// P(1 need), P(2 needs), P(3 needs) at cat creation. Must sum to ~1.
    pub need_count_weights: [f32; 3],
    /// Minutes before each need type starts counting as urgent. Illness is
    /// always urgent and has no entry.
    pub urgent_after_minutes: UrgentAfter,
    /// Uniform random delay between scheduled arrivals, in seconds: [min, max).
    pub arrival_delay_seconds: DelayRange,
    /// Minutes of continuous unmet need per heart lost. `None` disables the
    /// neglect countdown entirely.
    pub heart_loss_minutes: Option<f32>,
    /// Minimum urgency score whenever illness is present.
    pub illness_urgency_floor: f32,
}

/// Urgent-after thresholds, in minutes, for the needs that age into urgency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrgentAfter {
    pub hunger: f32,
    pub thirst: f32,
    pub sadness: f32,
}

impl Default for UrgentAfter {
    fn default() -> Self {
        Self {
            hunger: 3.0,
            thirst: 2.0,
            sadness: 5.0,
        }
    }
}

/// Half-open delay range in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min: f32,
    pub max: f32,
}

impl Default for Balance {
    fn default() -> Self {
        Self {
            max_capacity: 8,
            need_count_weights: [0.50, 0.35, 0.15],
            urgent_after_minutes: UrgentAfter::default(),
            arrival_delay_seconds: DelayRange {
                min: 10.0,
                max: 30.0,
            },
            heart_loss_minutes: Some(4.0),
            illness_urgency_floor: 0.8,
        }
    }
}

impl Balance {
    /// Minutes after which `need` counts as urgent; `None` means it is
    /// urgent from the moment it appears.
    pub fn urgent_after(&self, need: NeedType) -> Option<f32> {
        match need {
            NeedType::Hunger => Some(self.urgent_after_minutes.hunger),
            NeedType::Thirst => Some(self.urgent_after_minutes.thirst),
            NeedType::Illness => None,
            NeedType::Sadness => Some(self.urgent_after_minutes.sadness),
        }
    }

    /// Map a uniform roll in [0, 1) onto a need count in [1, 3] using the
    /// weighted buckets. Rolls at or past the cumulative weight land in the
    /// last bucket, so a slightly-off weight sum cannot produce a count
    /// outside the range.
    pub fn need_count_for_roll(&self, roll: f32) -> usize {
        let [one, two, _] = self.need_count_weights;
        if roll < one {
            1
        } else if roll < one + two {
            2
        } else {
            3
        }
    }

    /// Check the configuration for values the engine cannot run with.
    pub fn validate(&self) -> Result<(), BalanceError> {
        if self.max_capacity == 0 {
            return Err(BalanceError::ZeroCapacity);
        }
        let sum: f32 = self.need_count_weights.iter().sum();
        if (sum - 1.0).abs() > 0.01 || self.need_count_weights.iter().any(|w| *w < 0.0) {
            return Err(BalanceError::BadWeights(sum));
        }
        let DelayRange { min, max } = self.arrival_delay_seconds;
        if !(min >= 0.0 && max > min) {
            return Err(BalanceError::InvalidDelayRange { min, max });
        }
        let thresholds = [
            self.urgent_after_minutes.hunger,
            self.urgent_after_minutes.thirst,
            self.urgent_after_minutes.sadness,
        ];
        if thresholds.iter().any(|t| *t <= 0.0) {
            return Err(BalanceError::NonPositiveThreshold);
        }
        if let Some(minutes) = self.heart_loss_minutes {
            if minutes <= 0.0 {
                return Err(BalanceError::NonPositiveThreshold);
            }
        }
        if !(0.0..=1.0).contains(&self.illness_urgency_floor) {
            return Err(BalanceError::FloorOutOfRange(self.illness_urgency_floor));
        }
        Ok(())
    }
}

/// A configuration value the engine cannot run with.
#[derive(Debug, Clone, PartialEq)]
pub enum BalanceError {
    ZeroCapacity,
    /// Need-count weights are negative or do not sum to ~1 (carries the sum).
    BadWeights(f32),
    InvalidDelayRange {
        min: f32,
        max: f32,
    },
    NonPositiveThreshold,
    FloorOutOfRange(f32),
}

impl std::fmt::Display for BalanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BalanceError::ZeroCapacity => write!(f, "max_capacity must be at least 1"),
            BalanceError::BadWeights(sum) => {
                write!(f, "need_count_weights must be non-negative and sum to 1 (sum = {sum})")
            }
            BalanceError::InvalidDelayRange { min, max } => {
                write!(f, "arrival_delay_seconds must satisfy 0 <= min < max (got [{min}, {max}))")
            }
            BalanceError::NonPositiveThreshold => {
                write!(f, "urgency and heart-loss thresholds must be positive")
            }
            BalanceError::FloorOutOfRange(floor) => {
                write!(f, "illness_urgency_floor must be in [0, 1] (got {floor})")
            }
        }
    }
}

impl std::error::Error for BalanceError {}
