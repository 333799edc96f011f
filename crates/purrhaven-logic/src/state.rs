//! Derived cat state: the emotional-state ladder, the urgency score, and the
//! criticality check. Everything here is a pure function over a snapshot of
//! the cat's needs, hearts, and elapsed time.

use serde::{Deserialize, Serialize};

use crate::balance::Balance;

/// Emotional state of a cat. Always derived, never set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatState {
    /// No needs at all.
    Happy,
    /// Needs present, none urgent-qualifying.
    Stressed,
    /// Legacy state: kept for the illness icon/style mapping, but the ladder
    /// escalates illness straight to `Urgent` and never derives `Sick`.
    Sick,
    /// Three or more needs, illness present, or a need past its age threshold.
    Urgent,
    /// Hearts exhausted. Terminal: no later mutation produces another state.
    Leaving,
}

impl CatState {
    /// All states, in escalation order.
    pub const ALL: [CatState; 5] = [
        CatState::Happy,
        CatState::Stressed,
        CatState::Sick,
        CatState::Urgent,
        CatState::Leaving,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CatState::Happy => "happy",
            CatState::Stressed => "stressed",
            CatState::Sick => "sick",
            CatState::Urgent => "urgent",
            CatState::Leaving => "leaving",
        }
    }
}

impl std::fmt::Display for CatState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the emotional state from a snapshot of the cat.
///
/// `any_need_urgent` is the aged-need check: whether any single active need
/// has outlived its urgent-after threshold (illness counts as always past
/// it). Hearts at zero dominate everything; hearts never increase, so
/// `Leaving` is terminal by construction.
pub fn derive_state(
    hearts: u8,
    need_count: usize,
    has_illness: bool,
    any_need_urgent: bool,
) -> CatState {
    if hearts == 0 {
        CatState::Leaving
    } else if need_count == 0 {
        CatState::Happy
    } else if need_count >= 3 || has_illness || any_need_urgent {
        CatState::Urgent
    } else {
        CatState::Stressed
    }
}

/// Urgency score in [0, 1]: one third per need plus up to half a point for
/// time in the shelter, floored at the configured minimum when illness is
/// present.
pub fn urgency_score(
    balance: &Balance,
    need_count: usize,
    minutes_since_arrival: f32,
    has_illness: bool,
) -> f32 {
    let age_term = (minutes_since_arrival / 5.0).min(0.5);
    let score = (need_count as f32 / 3.0 + age_term).min(1.0);
    if has_illness {
        score.max(balance.illness_urgency_floor)
    } else {
        score
    }
}

/// A cat needs immediate attention when it is down to its last heart, its
/// state is urgent, or its urgency score exceeds 0.8.
pub fn is_critical(hearts: u8, state: CatState, urgency: f32) -> bool {
    hearts <= 1 || state == CatState::Urgent || urgency > 0.8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::needs::NeedType;

    #[test]
    fn test_no_needs_is_happy() {
        assert_eq!(derive_state(3, 0, false, false), CatState::Happy);
        assert_eq!(derive_state(1, 0, false, false), CatState::Happy);
    }

    #[test]
    fn test_three_needs_is_urgent() {
        assert_eq!(derive_state(3, 3, false, false), CatState::Urgent);
    }

    #[test]
    fn test_illness_escalates_to_urgent_not_sick() {
        // The legacy `sick` state is never derived; a lone illness goes
        // straight to urgent.
        assert_eq!(derive_state(3, 1, true, false), CatState::Urgent);
    }

    #[test]
    fn test_aged_need_escalates_to_urgent() {
        assert_eq!(derive_state(3, 1, false, true), CatState::Urgent);
    }

    #[test]
    fn test_fresh_needs_are_stressed() {
        assert_eq!(derive_state(3, 1, false, false), CatState::Stressed);
        assert_eq!(derive_state(3, 2, false, false), CatState::Stressed);
    }

    #[test]
    fn test_zero_hearts_dominates() {
        for need_count in 0..=3 {
            assert_eq!(derive_state(0, need_count, false, false), CatState::Leaving);
        }
        assert_eq!(derive_state(0, 1, true, true), CatState::Leaving);
    }

    #[test]
    fn test_urgency_monotone_in_need_count() {
        let balance = Balance::default();
        let mut last = -1.0_f32;
        for count in 0..=4 {
            let score = urgency_score(&balance, count, 0.0, false);
            assert!(score >= last);
            last = score;
        }
    }

    #[test]
    fn test_urgency_monotone_in_elapsed_time() {
        let balance = Balance::default();
        let mut last = -1.0_f32;
        for minutes in [0.0, 1.0, 2.5, 5.0, 20.0] {
            let score = urgency_score(&balance, 1, minutes, false);
            assert!(score >= last);
            last = score;
        }
    }

    #[test]
    fn test_urgency_age_term_caps_at_half() {
        let balance = Balance::default();
        let capped = urgency_score(&balance, 0, 1000.0, false);
        assert!((capped - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_urgency_is_clamped_to_one() {
        let balance = Balance::default();
        assert!(urgency_score(&balance, 4, 1000.0, false) <= 1.0);
    }

    #[test]
    fn test_illness_floors_urgency() {
        let balance = Balance::default();
        let score = urgency_score(&balance, 1, 0.0, true);
        assert!(score >= balance.illness_urgency_floor);
        // Illness alone among three needs cannot lower an already-high score.
        let high = urgency_score(&balance, 3, 10.0, true);
        assert!((high - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_is_critical() {
        assert!(is_critical(1, CatState::Happy, 0.0));
        assert!(is_critical(3, CatState::Urgent, 0.0));
        assert!(is_critical(3, CatState::Stressed, 0.81));
        assert!(!is_critical(3, CatState::Stressed, 0.5));
    }

    #[test]
    fn test_every_need_type_feeds_the_ladder() {
        // A single fresh non-illness need of any type is stressed.
        for need in NeedType::ALL {
            let has_illness = need == NeedType::Illness;
            let expected = if has_illness {
                CatState::Urgent
            } else {
                CatState::Stressed
            };
            assert_eq!(derive_state(3, 1, has_illness, false), expected);
        }
    }
}
