//! Cat spawning: rolls a name, coat, and starting needs, and writes the
//! entity into the world with its derived mood.

use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::Rng;

use purrhaven_logic::balance::Balance;
use purrhaven_logic::needs::NeedType;
use purrhaven_logic::state::derive_state;

use crate::components::{Arrival, Cat, CatName, Coat, Hearts, Mood, NeedSet, NeglectClock};
use super::names::random_name;

/// Pick a random coat color.
pub fn random_coat(rng: &mut impl Rng) -> Coat {
    Coat::ALL[rng.gen_range(0..Coat::ALL.len())]
}

/// Weighted random need count: 1, 2, or 3, per the balance weights.
pub fn random_need_count(rng: &mut impl Rng, balance: &Balance) -> usize {
    balance.need_count_for_roll(rng.gen::<f32>())
}

/// Roll a randomized starting need set: a weighted 1-3 count, then that many
/// distinct need types chosen uniformly without replacement.
pub fn roll_needs(rng: &mut impl Rng, balance: &Balance, now: f64) -> NeedSet {
    let count = random_need_count(rng, balance);
    roll_needs_with_count(rng, count, now)
}

/// Roll `count` distinct needs, uniformly without replacement. The count is
/// clamped to [1, 3] first.
pub fn roll_needs_with_count(rng: &mut impl Rng, count: usize, now: f64) -> NeedSet {
    let count = count.clamp(1, 3);
    let mut set = NeedSet::new();
    for need in NeedType::ALL.choose_multiple(rng, count) {
        set.insert(*need, now);
    }
    set
}

/// Spawn a cat entity. `name` defaults to a random pool name and `needs` to
/// a random roll; the mood is derived from the starting needs, and the
/// neglect clock is armed when the cat arrives needy.
pub fn spawn_cat(
    world: &mut World,
    rng: &mut impl Rng,
    balance: &Balance,
    now: f64,
    name: Option<&str>,
    needs: Option<&[NeedType]>,
) -> Entity {
    let name = match name {
        Some(given) => given.to_string(),
        None => random_name(rng),
    };
    let coat = random_coat(rng);
    let needs = match needs {
        Some(given) => NeedSet::from_needs(given, now),
        None => roll_needs(rng, balance, now),
    };

    let hearts = Hearts::full();
    let mood = Mood(derive_state(
        hearts.count(),
        needs.len(),
        needs.has_illness(),
        needs.any_urgent(balance, now),
    ));
    let clock = NeglectClock {
        deadline: match balance.heart_loss_minutes {
            Some(minutes) if !needs.is_empty() => Some(now + f64::from(minutes) * 60.0),
            _ => None,
        },
    };

    world.spawn((
        Cat,
        CatName::new(name),
        coat,
        needs,
        hearts,
        Arrival { at: now },
        mood,
        clock,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use purrhaven_logic::state::CatState;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_roll_needs_size_and_membership() {
        let mut rng = rand::thread_rng();
        let balance = Balance::default();
        for _ in 0..500 {
            let set = roll_needs(&mut rng, &balance, 0.0);
            assert!((1..=3).contains(&set.len()));
            // Membership is guaranteed by the NeedType key; distinctness by
            // the set itself. Nothing else to check per draw.
        }
    }

    #[test]
    fn test_roll_needs_weighted_distribution() {
        let mut rng = rand::thread_rng();
        let balance = Balance::default();
        let draws = 20_000;
        let mut counts = [0usize; 3];
        for _ in 0..draws {
            counts[roll_needs(&mut rng, &balance, 0.0).len() - 1] += 1;
        }
        let freq = |n: usize| counts[n] as f32 / draws as f32;
        assert!((freq(0) - 0.50).abs() < 0.02, "P(1) ~ 0.50, got {}", freq(0));
        assert!((freq(1) - 0.35).abs() < 0.02, "P(2) ~ 0.35, got {}", freq(1));
        assert!((freq(2) - 0.15).abs() < 0.02, "P(3) ~ 0.15, got {}", freq(2));
    }

    #[test]
    fn test_explicit_count_is_clamped() {
        let mut rng = rand::thread_rng();
        assert_eq!(roll_needs_with_count(&mut rng, 0, 0.0).len(), 1);
        assert_eq!(roll_needs_with_count(&mut rng, 2, 0.0).len(), 2);
        assert_eq!(roll_needs_with_count(&mut rng, 9, 0.0).len(), 3);
    }

    #[test]
    fn test_spawn_cat_has_all_components() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(7);
        let balance = Balance::default();

        let entity = spawn_cat(&mut world, &mut rng, &balance, 5.0, None, None);

        assert!(world.get::<&Cat>(entity).is_ok());
        assert!(world.get::<&CatName>(entity).is_ok());
        assert!(world.get::<&Coat>(entity).is_ok());
        assert_eq!(world.get::<&Hearts>(entity).unwrap().count(), Hearts::MAX);
        assert_eq!(world.get::<&Arrival>(entity).unwrap().at, 5.0);
        let needs = *world.get::<&NeedSet>(entity).unwrap();
        assert!((1..=3).contains(&needs.len()));
        // Arrived needy, so the neglect clock is armed.
        assert!(world.get::<&NeglectClock>(entity).unwrap().deadline.is_some());
    }

    #[test]
    fn test_spawn_cat_with_fixed_name_and_needs() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(7);
        let balance = Balance::default();

        let entity = spawn_cat(
            &mut world,
            &mut rng,
            &balance,
            0.0,
            Some("Clementine"),
            Some(&[NeedType::Illness]),
        );

        assert_eq!(world.get::<&CatName>(entity).unwrap().as_str(), "Clementine");
        let needs = *world.get::<&NeedSet>(entity).unwrap();
        assert_eq!(needs.to_vec(), vec![NeedType::Illness]);
        // Illness escalates straight to urgent at spawn.
        assert_eq!(world.get::<&Mood>(entity).unwrap().0, CatState::Urgent);
    }

    #[test]
    fn test_spawn_content_cat_leaves_clock_disarmed() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(7);
        let balance = Balance::default();

        let entity = spawn_cat(&mut world, &mut rng, &balance, 0.0, None, Some(&[]));

        assert_eq!(world.get::<&Mood>(entity).unwrap().0, CatState::Happy);
        assert!(world.get::<&NeglectClock>(entity).unwrap().deadline.is_none());
    }
}
