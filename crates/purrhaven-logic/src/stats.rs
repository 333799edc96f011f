//! Aggregate shelter statistics, shaped for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::needs::NeedType;
use crate::state::CatState;

/// Point-in-time statistics snapshot for the whole shelter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelterStats {
    pub total_cats: usize,
    pub cats_helped: u32,
    pub cats_by_state: StateCounts,
    pub cats_by_needs: NeedCounts,
}

/// Cats per emotional state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCounts {
    pub happy: usize,
    pub stressed: usize,
    pub sick: usize,
    pub urgent: usize,
    pub leaving: usize,
}

impl StateCounts {
    pub fn bump(&mut self, state: CatState) {
        match state {
            CatState::Happy => self.happy += 1,
            CatState::Stressed => self.stressed += 1,
            CatState::Sick => self.sick += 1,
            CatState::Urgent => self.urgent += 1,
            CatState::Leaving => self.leaving += 1,
        }
    }

    pub fn get(&self, state: CatState) -> usize {
        match state {
            CatState::Happy => self.happy,
            CatState::Stressed => self.stressed,
            CatState::Sick => self.sick,
            CatState::Urgent => self.urgent,
            CatState::Leaving => self.leaving,
        }
    }
}

/// Cats carrying each need type. A cat with several needs counts once per
/// need, so the columns can sum to more than `total_cats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeedCounts {
    pub hunger: usize,
    pub thirst: usize,
    pub illness: usize,
    pub sadness: usize,
}

impl NeedCounts {
    pub fn bump(&mut self, need: NeedType) {
        match need {
            NeedType::Hunger => self.hunger += 1,
            NeedType::Thirst => self.thirst += 1,
            NeedType::Illness => self.illness += 1,
            NeedType::Sadness => self.sadness += 1,
        }
    }

    pub fn get(&self, need: NeedType) -> usize {
        match need {
            NeedType::Hunger => self.hunger,
            NeedType::Thirst => self.thirst,
            NeedType::Illness => self.illness,
            NeedType::Sadness => self.sadness,
        }
    }
}
