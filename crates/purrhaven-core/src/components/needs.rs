//! The per-cat need set.

use serde::{Deserialize, Serialize};

use purrhaven_logic::balance::Balance;
use purrhaven_logic::needs::NeedType;

/// Fixed-capacity need set, one slot per [`NeedType`] ordinal.
///
/// A slot records when the need appeared (sim-time seconds) and an insertion
/// sequence number, giving O(1) membership/insert/remove with natural dedup,
/// per-need age for the urgency thresholds, and insertion-order iteration
/// for display.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct NeedSet {
    slots: [Option<NeedSlot>; NeedType::COUNT],
    next_seq: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct NeedSlot {
    seq: u32,
    since: f64,
}

impl NeedSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from `needs` in order, all stamped at `now`. Duplicates
    /// collapse onto the first occurrence.
    pub fn from_needs(needs: &[NeedType], now: f64) -> Self {
        let mut set = Self::new();
        for &need in needs {
            set.insert(need, now);
        }
        set
    }

    pub fn contains(&self, need: NeedType) -> bool {
        self.slots[need.index()].is_some()
    }

    /// Add a need if not already present. Returns whether it was added.
    pub fn insert(&mut self, need: NeedType, now: f64) -> bool {
        let slot = &mut self.slots[need.index()];
        if slot.is_some() {
            return false;
        }
        *slot = Some(NeedSlot {
            seq: self.next_seq,
            since: now,
        });
        self.next_seq += 1;
        true
    }

    /// Remove a need if present. Returns whether it was removed.
    pub fn remove(&mut self, need: NeedType) -> bool {
        self.slots[need.index()].take().is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }

    pub fn has_illness(&self) -> bool {
        self.contains(NeedType::Illness)
    }

    /// Minutes the need has been active, or `None` if absent.
    pub fn age_minutes(&self, need: NeedType, now: f64) -> Option<f32> {
        self.slots[need.index()].map(|slot| ((now - slot.since) / 60.0) as f32)
    }

    /// Whether any active need is past its urgent-after threshold. A need
    /// with no threshold (illness) is urgent from the moment it appears.
    pub fn any_urgent(&self, balance: &Balance, now: f64) -> bool {
        self.iter().any(|need| match balance.urgent_after(need) {
            None => true,
            Some(threshold) => self
                .age_minutes(need, now)
                .is_some_and(|age| age > threshold),
        })
    }

    /// Active needs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = NeedType> {
        let mut active: Vec<(u32, NeedType)> = NeedType::ALL
            .into_iter()
            .filter_map(|need| self.slots[need.index()].map(|slot| (slot.seq, need)))
            .collect();
        active.sort_by_key(|(seq, _)| *seq);
        active.into_iter().map(|(_, need)| need)
    }

    /// Active needs in insertion order, collected.
    pub fn to_vec(&self) -> Vec<NeedType> {
        self.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_dedup_and_remove() {
        let mut set = NeedSet::new();
        assert!(set.insert(NeedType::Hunger, 0.0));
        assert!(!set.insert(NeedType::Hunger, 5.0), "duplicate must not insert");
        assert_eq!(set.len(), 1);

        assert!(set.remove(NeedType::Hunger));
        assert!(!set.remove(NeedType::Hunger), "second remove is a no-op");
        assert!(set.is_empty());
    }

    #[test]
    fn test_iteration_is_insertion_order() {
        let mut set = NeedSet::new();
        set.insert(NeedType::Sadness, 0.0);
        set.insert(NeedType::Hunger, 0.0);
        set.insert(NeedType::Thirst, 0.0);
        assert_eq!(
            set.to_vec(),
            vec![NeedType::Sadness, NeedType::Hunger, NeedType::Thirst]
        );
    }

    #[test]
    fn test_readding_restamps_age_and_order() {
        let mut set = NeedSet::new();
        set.insert(NeedType::Hunger, 0.0);
        set.insert(NeedType::Thirst, 0.0);
        set.remove(NeedType::Hunger);
        set.insert(NeedType::Hunger, 120.0);

        assert_eq!(set.to_vec(), vec![NeedType::Thirst, NeedType::Hunger]);
        assert_eq!(set.age_minutes(NeedType::Hunger, 180.0), Some(1.0));
    }

    #[test]
    fn test_age_minutes() {
        let mut set = NeedSet::new();
        set.insert(NeedType::Sadness, 60.0);
        assert_eq!(set.age_minutes(NeedType::Sadness, 240.0), Some(3.0));
        assert_eq!(set.age_minutes(NeedType::Hunger, 240.0), None);
    }

    #[test]
    fn test_any_urgent_by_age() {
        let balance = Balance::default();
        let mut set = NeedSet::new();
        set.insert(NeedType::Thirst, 0.0);

        // Thirst turns urgent after 2 minutes.
        assert!(!set.any_urgent(&balance, 110.0));
        assert!(set.any_urgent(&balance, 121.0));
    }

    #[test]
    fn test_illness_is_urgent_immediately() {
        let balance = Balance::default();
        let set = NeedSet::from_needs(&[NeedType::Illness], 0.0);
        assert!(set.any_urgent(&balance, 0.0));
    }

    #[test]
    fn test_from_needs_collapses_duplicates() {
        let set = NeedSet::from_needs(&[NeedType::Hunger, NeedType::Hunger, NeedType::Thirst], 0.0);
        assert_eq!(set.len(), 2);
    }
}
