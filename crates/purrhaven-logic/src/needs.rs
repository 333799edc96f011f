//! Need type catalog: the four deficiencies a cat can carry and their
//! display/urgency metadata.

use serde::{Deserialize, Serialize};

/// The closed set of needs a cat can develop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeedType {
    Hunger,
    Thirst,
    Illness,
    Sadness,
}

impl NeedType {
    /// Number of need variants.
    pub const COUNT: usize = 4;

    /// All need types, in canonical order.
    pub const ALL: [NeedType; NeedType::COUNT] = [
        NeedType::Hunger,
        NeedType::Thirst,
        NeedType::Illness,
        NeedType::Sadness,
    ];

    /// Stable ordinal, usable as an array index.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display and urgency metadata for this need.
    pub fn info(self) -> &'static NeedInfo {
        match self {
            NeedType::Hunger => &NeedInfo {
                label: "Hunger",
                icon: "🍽️",
                description: "Cat needs food",
                urgency: UrgencyClass::Medium,
            },
            NeedType::Thirst => &NeedInfo {
                label: "Thirst",
                icon: "💧",
                description: "Cat needs water",
                urgency: UrgencyClass::Medium,
            },
            NeedType::Illness => &NeedInfo {
                label: "Illness",
                icon: "🏥",
                description: "Cat needs medical attention",
                urgency: UrgencyClass::High,
            },
            NeedType::Sadness => &NeedInfo {
                label: "Sadness",
                icon: "😢",
                description: "Cat needs comfort and attention",
                urgency: UrgencyClass::Low,
            },
        }
    }

    /// Wire/display name, also accepted by [`FromStr`](std::str::FromStr).
    pub fn as_str(self) -> &'static str {
        match self {
            NeedType::Hunger => "hunger",
            NeedType::Thirst => "thirst",
            NeedType::Illness => "illness",
            NeedType::Sadness => "sadness",
        }
    }
}

impl std::fmt::Display for NeedType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NeedType {
    type Err = UnknownNeedType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hunger" => Ok(NeedType::Hunger),
            "thirst" => Ok(NeedType::Thirst),
            "illness" => Ok(NeedType::Illness),
            "sadness" => Ok(NeedType::Sadness),
            other => Err(UnknownNeedType(other.to_string())),
        }
    }
}

/// A need-type name that is not part of the catalog. The enum itself is
/// closed, so invalid values can only enter at the string boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownNeedType(pub String);

impl std::fmt::Display for UnknownNeedType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown need type: {:?}", self.0)
    }
}

impl std::error::Error for UnknownNeedType {}

/// Static metadata attached to each need type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeedInfo {
    pub label: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub urgency: UrgencyClass,
}

/// Coarse urgency class used for display ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyClass {
    Low,
    Medium,
    High,
}

impl UrgencyClass {
    /// Numeric rank, higher = more urgent.
    pub fn rank(self) -> u8 {
        match self {
            UrgencyClass::Low => 1,
            UrgencyClass::Medium => 2,
            UrgencyClass::High => 3,
        }
    }
}

/// Returns a copy of `needs` ordered most-urgent-first by urgency class.
/// The sort is stable, so needs of equal class keep their given order.
pub fn sorted_by_urgency(needs: &[NeedType]) -> Vec<NeedType> {
    let mut sorted = needs.to_vec();
    sorted.sort_by(|a, b| b.info().urgency.rank().cmp(&a.info().urgency.rank()));
    sorted
}
