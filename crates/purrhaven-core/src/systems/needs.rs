//! Need mutation and mood derivation. The mood is recomputed after every
//! mutation and once per tick, since needs age into urgency with no
//! mutation at all.

use hecs::{Entity, World};

use purrhaven_logic::balance::Balance;
use purrhaven_logic::needs::NeedType;
use purrhaven_logic::state::{self, CatState};

use crate::components::{Arrival, Hearts, Mood, NeedSet};
use super::hearts::{arm_neglect_clock, disarm_neglect_clock};

/// Recompute and store the mood for one cat. Returns the derived state, or
/// `None` if the entity is gone.
pub fn refresh_mood(world: &mut World, entity: Entity, now: f64, balance: &Balance) -> Option<CatState> {
    let derived = {
        let needs = world.get::<&NeedSet>(entity).ok()?;
        let hearts = world.get::<&Hearts>(entity).ok()?;
        state::derive_state(
            hearts.count(),
            needs.len(),
            needs.has_illness(),
            needs.any_urgent(balance, now),
        )
    };
    if let Ok(mut mood) = world.get::<&mut Mood>(entity) {
        mood.0 = derived;
    }
    Some(derived)
}

/// Tick pass: re-derive every cat's mood as its needs age.
pub fn refresh_all_moods(world: &mut World, now: f64, balance: &Balance) {
    let cats: Vec<Entity> = world
        .query::<(&NeedSet, &Mood)>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();
    for entity in cats {
        refresh_mood(world, entity, now, balance);
    }
}

/// Add a need to a cat (deduplicated). Returns `false` if it was already
/// present or the entity is gone. Arms the neglect clock when the cat goes
/// from content to needy.
pub fn add_need(
    world: &mut World,
    entity: Entity,
    need: NeedType,
    now: f64,
    balance: &Balance,
) -> bool {
    let added = match world.get::<&mut NeedSet>(entity) {
        Ok(mut needs) => needs.insert(need, now),
        Err(_) => return false,
    };
    if added {
        arm_neglect_clock(world, entity, now, balance);
        refresh_mood(world, entity, now, balance);
    }
    added
}

/// Remove a need from a cat. Returns `true` on removal, `false` if the need
/// was absent (a no-op, not an error). Disarms the neglect clock when the
/// last need goes away.
pub fn fulfill_need(
    world: &mut World,
    entity: Entity,
    need: NeedType,
    now: f64,
    balance: &Balance,
) -> bool {
    let (removed, now_content) = match world.get::<&mut NeedSet>(entity) {
        Ok(mut needs) => (needs.remove(need), needs.is_empty()),
        Err(_) => return false,
    };
    if removed {
        if now_content {
            disarm_neglect_clock(world, entity);
        }
        refresh_mood(world, entity, now, balance);
    }
    removed
}

/// Urgency score for one cat, or `None` if the entity is gone.
pub fn urgency(world: &World, entity: Entity, now: f64, balance: &Balance) -> Option<f32> {
    let needs = world.get::<&NeedSet>(entity).ok()?;
    let arrival = world.get::<&Arrival>(entity).ok()?;
    Some(state::urgency_score(
        balance,
        needs.len(),
        arrival.minutes_since(now),
        needs.has_illness(),
    ))
}

/// Whether one cat needs immediate attention.
pub fn is_critical(world: &World, entity: Entity, now: f64, balance: &Balance) -> Option<bool> {
    let score = urgency(world, entity, now, balance)?;
    let hearts = world.get::<&Hearts>(entity).ok()?;
    let mood = world.get::<&Mood>(entity).ok()?;
    Some(state::is_critical(hearts.count(), mood.0, score))
}
