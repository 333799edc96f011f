//! Heart loss and the neglect countdown. A cat with unmet needs carries an
//! armed deadline; each time it fires the cat loses a heart, and the third
//! loss makes the cat leave.

use hecs::{Entity, World};

use purrhaven_logic::balance::Balance;

use crate::components::{Hearts, NeedSet, NeglectClock};
use super::needs::refresh_mood;

/// Drop one heart and refresh the mood. Returns `true` exactly when this
/// decrement exhausts the hearts (the caller should evict); `false` for a
/// plain loss or a cat already at zero.
pub fn lose_heart(world: &mut World, entity: Entity, now: f64, balance: &Balance) -> bool {
    let reached_zero = match world.get::<&mut Hearts>(entity) {
        Ok(mut hearts) => hearts.lose(),
        Err(_) => return false,
    };
    refresh_mood(world, entity, now, balance);
    reached_zero
}

/// Arm the neglect deadline if the countdown is enabled, the cat has unmet
/// needs, and no deadline is already pending. An armed deadline is left
/// alone, so fulfilling one need of several does not buy extra time.
pub fn arm_neglect_clock(world: &mut World, entity: Entity, now: f64, balance: &Balance) {
    let Some(minutes) = balance.heart_loss_minutes else {
        return;
    };
    let needy = world
        .get::<&NeedSet>(entity)
        .map(|needs| !needs.is_empty())
        .unwrap_or(false);
    if !needy {
        return;
    }
    if let Ok(mut clock) = world.get::<&mut NeglectClock>(entity) {
        if clock.deadline.is_none() {
            clock.deadline = Some(now + f64::from(minutes) * 60.0);
        }
    }
}

/// Clear any pending neglect deadline.
pub fn disarm_neglect_clock(world: &mut World, entity: Entity) {
    if let Ok(mut clock) = world.get::<&mut NeglectClock>(entity) {
        clock.deadline = None;
    }
}

/// Outcome of one neglect firing.
#[derive(Debug, Clone, Copy)]
pub struct NeglectOutcome {
    pub entity: Entity,
    /// Hearts remaining after the loss.
    pub hearts_left: u8,
    /// The loss exhausted the hearts; the cat is eviction-eligible.
    pub exhausted: bool,
}

/// Fire every due neglect deadline: lose a heart, re-arm the deadline (or
/// clear it on exhaustion), and report what happened so the scheduler can
/// notify and evict.
pub fn neglect_system(world: &mut World, now: f64, balance: &Balance) -> Vec<NeglectOutcome> {
    let Some(minutes) = balance.heart_loss_minutes else {
        return Vec::new();
    };
    let interval = f64::from(minutes) * 60.0;

    let mut due = Vec::new();
    for (entity, (clock, needs)) in world.query::<(&NeglectClock, &NeedSet)>().iter() {
        if let Some(deadline) = clock.deadline {
            if now >= deadline && !needs.is_empty() {
                due.push(entity);
            }
        }
    }

    let mut outcomes = Vec::new();
    for entity in due {
        let exhausted = lose_heart(world, entity, now, balance);
        let hearts_left = world
            .get::<&Hearts>(entity)
            .map(|hearts| hearts.count())
            .unwrap_or(0);
        if let Ok(mut clock) = world.get::<&mut NeglectClock>(entity) {
            clock.deadline = if exhausted { None } else { Some(now + interval) };
        }
        outcomes.push(NeglectOutcome {
            entity,
            hearts_left,
            exhausted,
        });
    }
    outcomes
}
