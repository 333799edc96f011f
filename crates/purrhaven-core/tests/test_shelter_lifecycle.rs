//! Integration tests for the full shelter lifecycle.
//!
//! Exercises: arrival scheduling → need aging → fulfillment → scoring →
//! neglect → eviction, through the public `ShelterEngine` surface only.
//!
//! All tests are headless — no rendering, no wall clock; time is driven
//! through `update`.

use purrhaven_core::engine::{DepartureReason, Notification, ShelterEngine};
use purrhaven_logic::balance::{Balance, DelayRange};
use purrhaven_logic::items::ItemId;
use purrhaven_logic::needs::NeedType;
use purrhaven_logic::state::CatState;

// ── Helpers ────────────────────────────────────────────────────────────

/// Balance with arrivals pushed far out and no neglect, so tests control
/// the population and hearts explicitly.
fn isolated_balance() -> Balance {
    Balance {
        arrival_delay_seconds: DelayRange {
            min: 100_000.0,
            max: 200_000.0,
        },
        heart_loss_minutes: None,
        ..Balance::default()
    }
}

/// Balance with a fast neglect countdown (3 seconds per heart) and
/// far-out arrivals.
fn neglect_balance() -> Balance {
    Balance {
        heart_loss_minutes: Some(0.05),
        ..isolated_balance()
    }
}

// ── Fulfillment flow ───────────────────────────────────────────────────

#[test]
fn feeding_a_hungry_thirsty_cat() {
    let mut engine = ShelterEngine::with_balance(isolated_balance());
    let cat = engine
        .add_cat_with_needs(Some("Scenario"), &[NeedType::Hunger, NeedType::Thirst])
        .unwrap();
    assert_eq!(engine.snapshot(cat).unwrap().state, CatState::Stressed);

    // Food resolves hunger.
    let fulfilled = engine.attempt_fulfillment(cat, ItemId::Food).unwrap();
    assert_eq!(fulfilled.need, NeedType::Hunger);
    let snapshot = engine.snapshot(cat).unwrap();
    assert_eq!(snapshot.needs, vec![NeedType::Thirst]);
    assert_eq!(snapshot.state, CatState::Stressed);

    // Food again: the need is gone.
    assert!(engine.attempt_fulfillment(cat, ItemId::Food).is_err());

    // Water resolves the rest; the cat turns happy and scores.
    engine.attempt_fulfillment(cat, ItemId::Water).unwrap();
    let snapshot = engine.snapshot(cat).unwrap();
    assert!(snapshot.needs.is_empty());
    assert_eq!(snapshot.state, CatState::Happy);
    assert_eq!(engine.cats_helped(), 1);
}

#[test]
fn failed_attempts_do_not_score() {
    let mut engine = ShelterEngine::with_balance(isolated_balance());
    let cat = engine
        .add_cat_with_needs(None, &[NeedType::Illness])
        .unwrap();

    assert!(engine.attempt_fulfillment(cat, ItemId::Toys).is_err());
    assert_eq!(engine.cats_helped(), 0);
    assert_eq!(engine.snapshot(cat).unwrap().needs, vec![NeedType::Illness]);
}

#[test]
fn each_cat_scores_at_most_once() {
    let mut engine = ShelterEngine::with_balance(isolated_balance());
    let a = engine.add_cat_with_needs(None, &[NeedType::Hunger]).unwrap();
    let b = engine.add_cat_with_needs(None, &[NeedType::Thirst]).unwrap();

    engine.attempt_fulfillment(a, ItemId::Food).unwrap();
    engine.attempt_fulfillment(b, ItemId::Water).unwrap();
    assert_eq!(engine.cats_helped(), 2);

    // A cat that gets needy again can be helped again, and that is a new
    // happy-transition.
    assert!(engine.add_need(a, NeedType::Sadness));
    engine.attempt_fulfillment(a, ItemId::Toys).unwrap();
    assert_eq!(engine.cats_helped(), 3);
}

// ── State over time ────────────────────────────────────────────────────

#[test]
fn needs_age_into_urgency_without_mutation() {
    let mut engine = ShelterEngine::with_balance(isolated_balance());
    engine.resume();
    let cat = engine.add_cat_with_needs(None, &[NeedType::Hunger]).unwrap();
    assert_eq!(engine.snapshot(cat).unwrap().state, CatState::Stressed);

    // Hunger turns urgent after 3 minutes.
    engine.update(181.0);
    let snapshot = engine.snapshot(cat).unwrap();
    assert_eq!(snapshot.state, CatState::Urgent);
    assert!(snapshot.critical);
}

#[test]
fn urgency_never_decreases_while_needs_stand() {
    let mut engine = ShelterEngine::with_balance(isolated_balance());
    engine.resume();
    let cat = engine.add_cat_with_needs(None, &[NeedType::Hunger]).unwrap();

    let mut last = 0.0f32;
    for _ in 0..20 {
        engine.update(30.0);
        let urgency = engine.snapshot(cat).unwrap().urgency;
        assert!(urgency >= last);
        last = urgency;
    }
}

#[test]
fn illness_pins_urgency_high_from_the_start() {
    let mut engine = ShelterEngine::with_balance(isolated_balance());
    let cat = engine
        .add_cat_with_needs(None, &[NeedType::Illness])
        .unwrap();
    let snapshot = engine.snapshot(cat).unwrap();
    assert!(snapshot.urgency >= 0.8);
    assert_eq!(snapshot.state, CatState::Urgent);
}

// ── Hearts and eviction ────────────────────────────────────────────────

#[test]
fn heart_exhaustion_evicts_and_invalidates_the_id() {
    let mut engine = ShelterEngine::with_balance(isolated_balance());
    let cat = engine.add_cat_with_needs(None, &[NeedType::Hunger]).unwrap();

    assert!(!engine.lose_heart(cat)); // 3 -> 2
    assert!(!engine.lose_heart(cat)); // 2 -> 1
    assert!(engine.lose_heart(cat)); // 1 -> 0: leaving
    assert_eq!(engine.cat_count(), 0);

    // Stale-id operations are inert.
    assert!(!engine.add_need(cat, NeedType::Sadness));
    assert!(!engine.fulfill_need(cat, NeedType::Hunger));
    assert!(engine.snapshot(cat).is_none());
}

#[test]
fn neglect_countdown_drains_hearts_and_evicts() {
    let mut engine = ShelterEngine::with_balance(neglect_balance());
    engine.resume();
    let cat = engine.add_cat_with_needs(None, &[NeedType::Hunger]).unwrap();
    engine.drain_notifications();

    // 3 seconds per heart; step in half-second ticks well past three
    // intervals.
    for _ in 0..20 {
        engine.update(0.5);
    }
    assert_eq!(engine.cat_count(), 0, "the neglected cat must be evicted");

    let notifications = engine.drain_notifications();
    let hearts_lost: Vec<u8> = notifications
        .iter()
        .filter_map(|n| match n {
            Notification::HeartLost { hearts_left, .. } => Some(*hearts_left),
            _ => None,
        })
        .collect();
    assert_eq!(hearts_lost, vec![2, 1, 0]);
    assert!(notifications.iter().any(|n| matches!(
        n,
        Notification::CatDeparted {
            cat: departed,
            reason: DepartureReason::HeartsExhausted,
            ..
        } if *departed == cat
    )));
}

#[test]
fn helping_in_time_stops_the_countdown() {
    let mut engine = ShelterEngine::with_balance(neglect_balance());
    engine.resume();
    let cat = engine.add_cat_with_needs(None, &[NeedType::Hunger]).unwrap();

    // One second in (deadline at 3s), resolve the need.
    engine.update(1.0);
    engine.attempt_fulfillment(cat, ItemId::Food).unwrap();

    for _ in 0..20 {
        engine.update(1.0);
    }
    let snapshot = engine.snapshot(cat).unwrap();
    assert_eq!(snapshot.hearts, 3, "a content cat never loses hearts");
    assert_eq!(snapshot.state, CatState::Happy);
}

// ── Arrival scheduling ─────────────────────────────────────────────────

#[test]
fn population_grows_on_schedule_up_to_capacity() {
    let mut engine = ShelterEngine::with_balance(Balance {
        heart_loss_minutes: None,
        ..Balance::default()
    });
    engine.resume();

    // Every delay is below 30s, so each 30s step admits exactly one cat
    // until the shelter is full.
    for expected in 1..=8usize {
        engine.update(30.0);
        assert_eq!(engine.cat_count(), expected);
    }
    engine.update(30.0);
    assert_eq!(engine.cat_count(), 8, "capacity caps scheduled arrivals");
}

#[test]
fn pause_halts_arrivals_and_resume_redraws() {
    let mut engine = ShelterEngine::with_balance(Balance {
        heart_loss_minutes: None,
        ..Balance::default()
    });
    engine.resume();
    engine.pause();
    assert!(engine.seconds_until_next_arrival().is_none());
    for _ in 0..50 {
        engine.update(30.0);
    }
    assert_eq!(engine.cat_count(), 0);

    engine.resume();
    let wait = engine.seconds_until_next_arrival().unwrap();
    assert!((10.0..30.0).contains(&wait));
    engine.update(30.0);
    assert_eq!(engine.cat_count(), 1);
}

// ── Aggregates and notifications ───────────────────────────────────────

#[test]
fn stats_track_the_population() {
    let mut engine = ShelterEngine::with_balance(isolated_balance());
    engine
        .add_cat_with_needs(Some("A"), &[NeedType::Hunger, NeedType::Sadness])
        .unwrap();
    engine
        .add_cat_with_needs(Some("B"), &[NeedType::Illness])
        .unwrap();
    let helped = engine.add_cat_with_needs(Some("C"), &[NeedType::Thirst]).unwrap();
    engine.attempt_fulfillment(helped, ItemId::Water).unwrap();

    let stats = engine.stats();
    assert_eq!(stats.total_cats, 3);
    assert_eq!(stats.cats_helped, 1);
    assert_eq!(stats.cats_by_state.happy, 1);
    assert_eq!(stats.cats_by_state.stressed, 1);
    assert_eq!(stats.cats_by_state.urgent, 1);
    assert_eq!(stats.cats_by_state.sick, 0, "the legacy state stays empty");
    assert_eq!(stats.cats_by_needs.hunger, 1);
    assert_eq!(stats.cats_by_needs.sadness, 1);
    assert_eq!(stats.cats_by_needs.illness, 1);
    assert_eq!(stats.cats_by_needs.thirst, 0);
}

#[test]
fn notifications_tell_the_whole_story_in_order() {
    let mut engine = ShelterEngine::with_balance(isolated_balance());
    let cat = engine
        .add_cat_with_needs(Some("Nori"), &[NeedType::Sadness])
        .unwrap();
    engine.handle_cat_clicked(cat);
    engine.attempt_fulfillment(cat, ItemId::Toys).unwrap();
    engine.remove_cat(cat);

    let notifications = engine.drain_notifications();
    assert_eq!(notifications.len(), 4);
    assert_eq!(notifications[0], Notification::CatArrived { cat });
    assert_eq!(notifications[1], Notification::CatClicked { cat });
    assert_eq!(
        notifications[2],
        Notification::NeedFulfilled {
            cat,
            need: NeedType::Sadness,
            item: ItemId::Toys,
        }
    );
    assert_eq!(
        notifications[3],
        Notification::CatDeparted {
            cat,
            name: "Nori".to_string(),
            reason: DepartureReason::Removed,
        }
    );
}

#[test]
fn generated_arrivals_respect_the_need_contract() {
    let mut engine = ShelterEngine::with_balance(isolated_balance());
    for _ in 0..8 {
        let cat = engine.add_cat(None).unwrap();
        let snapshot = engine.snapshot(cat).unwrap();
        assert!((1..=3).contains(&snapshot.needs.len()));
        assert_eq!(snapshot.hearts, 3);
        assert_ne!(snapshot.state, CatState::Happy, "arrivals are always needy");
        assert_ne!(snapshot.state, CatState::Leaving);
    }
}
