//! Purrhaven Headless Simulation Harness
//!
//! Validates shelter rules and the engine without any UI.
//! Runs entirely in-process — no rendering, no wall clock.
//!
//! Usage:
//!   cargo run -p purrhaven-simtest
//!   cargo run -p purrhaven-simtest -- --verbose

use purrhaven_core::engine::{Notification, ShelterEngine};
use purrhaven_core::generation::roll_needs;
use purrhaven_logic::balance::{Balance, DelayRange};
use purrhaven_logic::items::{Item, ItemId};
use purrhaven_logic::needs::NeedType;
use purrhaven_logic::state::{derive_state, is_critical, urgency_score, CatState};

// ── Balance data (same JSON a host would ship) ──────────────────────────
const BALANCE_JSON: &str = include_str!("../../../data/balance.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    env_logger::init();
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Purrhaven Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Balance data validation
    results.extend(validate_balance_data());

    // 2. Need/item catalog coherence
    results.extend(validate_catalogs());

    // 3. State ladder sweep
    results.extend(validate_state_ladder());

    // 4. Urgency scoring properties
    results.extend(validate_urgency());

    // 5. Need-count distribution (stochastic)
    results.extend(validate_need_distribution());

    // 6. Full shelter session
    results.extend(validate_session());

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Balance data ─────────────────────────────────────────────────────

fn validate_balance_data() -> Vec<TestResult> {
    println!("--- Balance Data ---");
    let mut results = Vec::new();

    let balance: Balance = match serde_json::from_str(BALANCE_JSON) {
        Ok(b) => b,
        Err(e) => {
            results.push(TestResult {
                name: "balance_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    results.push(TestResult {
        name: "balance_validates".into(),
        passed: balance.validate().is_ok(),
        detail: match balance.validate() {
            Ok(()) => "shipped balance data is runnable".into(),
            Err(e) => format!("{e}"),
        },
    });

    results.push(TestResult {
        name: "balance_matches_defaults".into(),
        passed: balance == Balance::default(),
        detail: "data/balance.json equals the built-in defaults".into(),
    });

    results.push(TestResult {
        name: "balance_capacity".into(),
        passed: balance.max_capacity == 8,
        detail: format!("capacity = {}", balance.max_capacity),
    });

    let weight_sum: f32 = balance.need_count_weights.iter().sum();
    results.push(TestResult {
        name: "balance_weights_sum".into(),
        passed: (weight_sum - 1.0).abs() < 0.01,
        detail: format!("need-count weights sum to {weight_sum}"),
    });

    let DelayRange { min, max } = balance.arrival_delay_seconds;
    results.push(TestResult {
        name: "balance_arrival_window".into(),
        passed: min == 10.0 && max == 30.0,
        detail: format!("arrival delay in [{min}, {max}) seconds"),
    });

    results
}

// ── 2. Catalogs ─────────────────────────────────────────────────────────

fn validate_catalogs() -> Vec<TestResult> {
    println!("--- Catalogs ---");
    let mut results = Vec::new();

    // Items and needs form a bijection.
    let mut bijective = true;
    for need in NeedType::ALL {
        let matching = ItemId::ALL
            .into_iter()
            .filter(|id| id.fulfills() == need)
            .count();
        if matching != 1 || Item::fulfilling(need).fulfills != need {
            bijective = false;
        }
    }
    results.push(TestResult {
        name: "catalog_bijection".into(),
        passed: bijective,
        detail: "every need has exactly one fulfilling item and back".into(),
    });

    // All metadata is present.
    let needs_complete = NeedType::ALL.iter().all(|need| {
        let info = need.info();
        !info.icon.is_empty() && !info.label.is_empty() && !info.description.is_empty()
    });
    let items_complete = ItemId::ALL.iter().all(|id| {
        let item = id.item();
        !item.icon.is_empty() && !item.name.is_empty() && !item.description.is_empty()
    });
    results.push(TestResult {
        name: "catalog_metadata".into(),
        passed: needs_complete && items_complete,
        detail: "all needs and items carry icon/label/description".into(),
    });

    // Wire names round-trip; garbage is rejected.
    let round_trip = NeedType::ALL
        .iter()
        .all(|n| n.as_str().parse::<NeedType>() == Ok(*n))
        && ItemId::ALL
            .iter()
            .all(|i| i.as_str().parse::<ItemId>() == Ok(*i));
    let rejects = "boredom".parse::<NeedType>().is_err() && "catnip".parse::<ItemId>().is_err();
    results.push(TestResult {
        name: "catalog_wire_names".into(),
        passed: round_trip && rejects,
        detail: "names round-trip and unknown names are rejected".into(),
    });

    results
}

// ── 3. State ladder ─────────────────────────────────────────────────────

fn validate_state_ladder() -> Vec<TestResult> {
    println!("--- State Ladder ---");
    let mut results = Vec::new();

    let mut sweep_ok = true;
    let mut sick_reached = false;
    for hearts in 0..=3u8 {
        for need_count in 0..=4usize {
            for has_illness in [false, true] {
                for aged in [false, true] {
                    let state = derive_state(hearts, need_count, has_illness, aged);
                    if state == CatState::Sick {
                        sick_reached = true;
                    }
                    let expected = if hearts == 0 {
                        CatState::Leaving
                    } else if need_count == 0 {
                        CatState::Happy
                    } else if need_count >= 3 || has_illness || aged {
                        CatState::Urgent
                    } else {
                        CatState::Stressed
                    };
                    if state != expected {
                        sweep_ok = false;
                    }
                }
            }
        }
    }
    results.push(TestResult {
        name: "ladder_sweep".into(),
        passed: sweep_ok,
        detail: "derived state matches the ladder for all combinations".into(),
    });
    results.push(TestResult {
        name: "ladder_sick_unreachable".into(),
        passed: !sick_reached,
        detail: "the legacy sick state is never derived".into(),
    });

    results
}

// ── 4. Urgency scoring ──────────────────────────────────────────────────

fn validate_urgency() -> Vec<TestResult> {
    println!("--- Urgency ---");
    let mut results = Vec::new();
    let balance = Balance::default();

    let mut bounded = true;
    let mut monotone = true;
    for minutes in [0.0f32, 1.0, 2.0, 5.0, 30.0] {
        let mut prev = -1.0f32;
        for count in 0..=4usize {
            let score = urgency_score(&balance, count, minutes, false);
            if !(0.0..=1.0).contains(&score) {
                bounded = false;
            }
            if score < prev {
                monotone = false;
            }
            prev = score;
        }
    }
    results.push(TestResult {
        name: "urgency_bounded".into(),
        passed: bounded,
        detail: "scores stay in [0, 1]".into(),
    });
    results.push(TestResult {
        name: "urgency_monotone".into(),
        passed: monotone,
        detail: "scores never drop as needs grow".into(),
    });

    let floored = (1..=3).all(|count| {
        urgency_score(&balance, count, 0.0, true) >= balance.illness_urgency_floor
    });
    results.push(TestResult {
        name: "urgency_illness_floor".into(),
        passed: floored,
        detail: format!("illness floors the score at {}", balance.illness_urgency_floor),
    });

    let critical_ok = is_critical(1, CatState::Happy, 0.0)
        && is_critical(3, CatState::Urgent, 0.0)
        && is_critical(3, CatState::Stressed, 0.9)
        && !is_critical(3, CatState::Stressed, 0.5);
    results.push(TestResult {
        name: "urgency_critical_rule".into(),
        passed: critical_ok,
        detail: "critical = last heart, urgent state, or score > 0.8".into(),
    });

    results
}

// ── 5. Need-count distribution ──────────────────────────────────────────

fn validate_need_distribution() -> Vec<TestResult> {
    println!("--- Need Distribution ---");
    let mut results = Vec::new();
    let balance = Balance::default();
    let mut rng = rand::thread_rng();

    let draws = 20_000usize;
    let mut counts = [0usize; 3];
    let mut valid_members = true;
    for _ in 0..draws {
        let set = roll_needs(&mut rng, &balance, 0.0);
        let size = set.len();
        if !(1..=3).contains(&size) {
            valid_members = false;
            continue;
        }
        counts[size - 1] += 1;
    }

    results.push(TestResult {
        name: "distribution_set_sizes".into(),
        passed: valid_members,
        detail: "every roll yields 1-3 distinct needs".into(),
    });

    let expected = [0.50f32, 0.35, 0.15];
    let mut within_tolerance = true;
    let mut detail = String::new();
    for (i, want) in expected.iter().enumerate() {
        let got = counts[i] as f32 / draws as f32;
        if (got - want).abs() > 0.02 {
            within_tolerance = false;
        }
        detail.push_str(&format!("P({})={:.3} ", i + 1, got));
    }
    results.push(TestResult {
        name: "distribution_weights".into(),
        passed: within_tolerance,
        detail: format!("{detail}(want 0.50/0.35/0.15 ± 0.02 over {draws} draws)"),
    });

    results
}

// ── 6. Full session ─────────────────────────────────────────────────────

fn validate_session() -> Vec<TestResult> {
    println!("--- Shelter Session ---");
    let mut results = Vec::new();

    // Phase 1: arrivals accumulate while the player idles.
    let mut engine = ShelterEngine::with_balance(Balance {
        heart_loss_minutes: None,
        ..Balance::default()
    });
    engine.resume();
    let mut ticks = 0;
    while engine.sim_time() < 300.0 {
        engine.update(0.25);
        ticks += 1;
    }
    // Worst-case delays (30s each) still fill all 8 slots inside 240s.
    let after_idle = engine.cat_count();
    results.push(TestResult {
        name: "session_arrivals".into(),
        passed: after_idle == engine.capacity(),
        detail: format!(
            "{} cats after 300s idle ({} ticks); capacity {}",
            after_idle,
            ticks,
            engine.capacity()
        ),
    });

    // Phase 2: a diligent player resolves every need with the matching item.
    let mut fulfillments = 0;
    for snapshot in engine.snapshots() {
        for need in snapshot.needs {
            let item = Item::fulfilling(need).id;
            if engine.attempt_fulfillment(snapshot.id, item).is_ok() {
                fulfillments += 1;
            }
        }
    }
    let all_happy = engine
        .snapshots()
        .iter()
        .all(|s| s.state == CatState::Happy && s.needs.is_empty());
    results.push(TestResult {
        name: "session_full_care".into(),
        passed: all_happy && engine.cats_helped() as usize == after_idle,
        detail: format!(
            "{} fulfillments made {} cats happy (helped = {})",
            fulfillments,
            after_idle,
            engine.cats_helped()
        ),
    });

    // Phase 3: pause freezes the world.
    engine.pause();
    let frozen_time = engine.sim_time();
    let frozen_count = engine.cat_count();
    for _ in 0..1_000 {
        engine.update(1.0);
    }
    results.push(TestResult {
        name: "session_pause".into(),
        passed: engine.sim_time() == frozen_time && engine.cat_count() == frozen_count,
        detail: "paused engine admits no cats and moves no clock".into(),
    });

    // Phase 4: a neglected cat burns through its hearts and departs.
    let mut engine = ShelterEngine::with_balance(Balance {
        heart_loss_minutes: Some(0.05), // one heart per 3 seconds
        arrival_delay_seconds: DelayRange {
            min: 100_000.0,
            max: 200_000.0,
        },
        ..Balance::default()
    });
    engine.resume();
    let neglected = match engine.add_cat_with_needs(Some("Ghost"), &[NeedType::Hunger]) {
        Ok(id) => id,
        Err(e) => {
            results.push(TestResult {
                name: "session_neglect".into(),
                passed: false,
                detail: format!("empty shelter rejected an arrival: {e}"),
            });
            return results;
        }
    };
    while engine.sim_time() < 15.0 {
        engine.update(0.25);
    }
    let notifications = engine.drain_notifications();
    let heart_losses = notifications
        .iter()
        .filter(|n| matches!(n, Notification::HeartLost { .. }))
        .count();
    let departed = notifications
        .iter()
        .any(|n| matches!(n, Notification::CatDeparted { cat, .. } if *cat == neglected));
    results.push(TestResult {
        name: "session_neglect".into(),
        passed: heart_losses == 3 && departed && engine.cat_count() == 0,
        detail: format!(
            "{} heart losses, departed = {}, {} cats left",
            heart_losses,
            departed,
            engine.cat_count()
        ),
    });

    results
}
