//! Shelter engine - main entry point for running the simulation

use hecs::{Entity, World};
use rand::Rng;
use serde::Serialize;

use purrhaven_logic::balance::Balance;
use purrhaven_logic::items::ItemId;
use purrhaven_logic::needs::NeedType;
use purrhaven_logic::state::CatState;
use purrhaven_logic::stats::ShelterStats;

use crate::components::{Arrival, CatName, Coat, Hearts, Mood, NeedSet};
use crate::generation::spawn_cat;
use crate::systems::{
    attempt_fulfillment, fulfill_need, lose_heart, neglect_system, refresh_all_moods, Fulfilled,
    FulfillmentError,
};
use crate::systems::{add_need, is_critical, urgency};

/// Sequential cat identifier, stable for the cat's stay in the shelter.
pub type CatId = u32;

/// Notifications the engine queues for the presentation layer. Drained in
/// FIFO order between reactions via [`ShelterEngine::drain_notifications`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    /// A cat entered the shelter (scheduled or manual).
    CatArrived { cat: CatId },
    /// Pass-through of a user gesture; the core does not interpret it.
    CatClicked { cat: CatId },
    /// An item resolved one of a cat's needs.
    NeedFulfilled {
        cat: CatId,
        need: NeedType,
        item: ItemId,
    },
    /// The neglect countdown (or an explicit call) cost the cat a heart.
    HeartLost { cat: CatId, hearts_left: u8 },
    /// The cat left the shelter and its id is no longer valid.
    CatDeparted {
        cat: CatId,
        name: String,
        reason: DepartureReason,
    },
}

/// Why a cat left the shelter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DepartureReason {
    /// Hearts ran out; the cat gave up on the shelter.
    HeartsExhausted,
    /// Explicit removal (adoption or host decision).
    Removed,
}

/// Rejection value returned when an arrival would exceed capacity. Expected
/// and recoverable: the caller decides whether to retry later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityExceeded {
    pub capacity: usize,
}

impl std::fmt::Display for CapacityExceeded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "shelter is at capacity ({} cats)", self.capacity)
    }
}

impl std::error::Error for CapacityExceeded {}

/// Read-only view of one cat, shaped for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatSnapshot {
    pub id: CatId,
    pub name: String,
    pub coat: Coat,
    /// Active needs in insertion order.
    pub needs: Vec<NeedType>,
    pub hearts: u8,
    pub state: CatState,
    pub urgency: f32,
    pub seconds_since_arrival: f32,
    pub critical: bool,
}

/// Main shelter engine: owns the ECS world, the clock, the arrival
/// scheduler, and the notification queue.
///
/// Single-threaded and tick-driven: the host calls [`update`] from its event
/// loop; every timer is a stored sim-time deadline checked inside the tick,
/// so reactions are atomic and cancellation is a `None` assignment.
///
/// [`update`]: ShelterEngine::update
pub struct ShelterEngine {
    /// ECS world containing all cat entities
    world: World,
    /// Simulation time in seconds since start
    sim_time: f64,
    /// Balance tuning data
    balance: Balance,
    /// Whether the clock advances and arrivals fire
    running: bool,
    /// Pending arrival deadline (sim-time seconds); `None` while paused
    next_arrival_at: Option<f64>,
    /// Next id to assign
    next_cat_id: CatId,
    /// Cat registry in arrival order
    cats: Vec<(CatId, Entity)>,
    /// Cats whose need set was emptied by an item, once each
    cats_helped: u32,
    /// Queued notifications for the presentation layer
    notifications: Vec<Notification>,
    time_scale: f32,
}

impl ShelterEngine {
    /// Create an empty, paused shelter with default balance data.
    pub fn new() -> Self {
        Self::with_balance(Balance::default())
    }

    /// Create an empty, paused shelter with the given balance data.
    pub fn with_balance(balance: Balance) -> Self {
        Self {
            world: World::new(),
            sim_time: 0.0,
            balance,
            running: false,
            next_arrival_at: None,
            next_cat_id: 1,
            cats: Vec::new(),
            cats_helped: 0,
            notifications: Vec::new(),
            time_scale: 1.0,
        }
    }

    // ── Population ─────────────────────────────────────────────────────

    /// Add a cat with a random name, coat, and need roll. Rejects with
    /// [`CapacityExceeded`] when the shelter is full, leaving the
    /// population untouched.
    pub fn add_cat(&mut self, name: Option<&str>) -> Result<CatId, CapacityExceeded> {
        self.admit(name, None)
    }

    /// Add a cat with a fixed need set (testing and scripted scenarios).
    pub fn add_cat_with_needs(
        &mut self,
        name: Option<&str>,
        needs: &[NeedType],
    ) -> Result<CatId, CapacityExceeded> {
        self.admit(name, Some(needs))
    }

    fn admit(
        &mut self,
        name: Option<&str>,
        needs: Option<&[NeedType]>,
    ) -> Result<CatId, CapacityExceeded> {
        if self.cats.len() >= self.balance.max_capacity {
            return Err(CapacityExceeded {
                capacity: self.balance.max_capacity,
            });
        }

        let mut rng = rand::thread_rng();
        let entity = spawn_cat(
            &mut self.world,
            &mut rng,
            &self.balance,
            self.sim_time,
            name,
            needs,
        );
        let id = self.next_cat_id;
        self.next_cat_id += 1;
        self.cats.push((id, entity));
        self.notifications.push(Notification::CatArrived { cat: id });

        if let Some(snapshot) = self.snapshot(id) {
            log::info!(
                "{} (cat {}) arrived with needs: {:?}",
                snapshot.name,
                id,
                snapshot.needs
            );
        }
        Ok(id)
    }

    /// Remove a cat from the shelter. Returns whether removal occurred.
    pub fn remove_cat(&mut self, id: CatId) -> bool {
        self.depart(id, DepartureReason::Removed)
    }

    /// Remove every cat (host reset). Emits no departure notifications.
    pub fn clear_all_cats(&mut self) {
        for (_, entity) in self.cats.drain(..) {
            let _ = self.world.despawn(entity);
        }
        log::info!("all cats cleared");
    }

    fn depart(&mut self, id: CatId, reason: DepartureReason) -> bool {
        let Some(index) = self.cats.iter().position(|(cat, _)| *cat == id) else {
            return false;
        };
        let (_, entity) = self.cats.remove(index);
        let name = self
            .world
            .get::<&CatName>(entity)
            .map(|name| name.as_str().to_string())
            .unwrap_or_default();
        let _ = self.world.despawn(entity);

        log::info!("{name} (cat {id}) left the shelter ({reason:?})");
        self.notifications.push(Notification::CatDeparted {
            cat: id,
            name,
            reason,
        });
        true
    }

    // ── Scheduling ─────────────────────────────────────────────────────

    /// Pause the game: the clock stops and the pending arrival is
    /// cancelled. No partial arrival effects can occur after this returns.
    pub fn pause(&mut self) {
        self.running = false;
        self.next_arrival_at = None;
    }

    /// Resume (or start) the game, drawing a fresh arrival delay. There is
    /// no resume-from-where-it-left-off: the previous countdown is gone.
    pub fn resume(&mut self) {
        self.running = true;
        let mut rng = rand::thread_rng();
        self.next_arrival_at = Some(self.sim_time + self.draw_arrival_delay(&mut rng));
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds until the next scheduled arrival, if one is pending.
    pub fn seconds_until_next_arrival(&self) -> Option<f64> {
        self.next_arrival_at
            .map(|deadline| (deadline - self.sim_time).max(0.0))
    }

    fn draw_arrival_delay(&self, rng: &mut impl Rng) -> f64 {
        let range = self.balance.arrival_delay_seconds;
        f64::from(rng.gen_range(range.min..range.max))
    }

    /// Advance the simulation by `delta_seconds`. One call is one atomic
    /// reaction: moods refresh as needs age, due neglect deadlines fire
    /// (evicting exhausted cats), and a due arrival fires last. A no-op
    /// while paused.
    pub fn update(&mut self, delta_seconds: f32) {
        if !self.running {
            return;
        }
        self.sim_time += f64::from(delta_seconds * self.time_scale);
        let now = self.sim_time;

        refresh_all_moods(&mut self.world, now, &self.balance);

        for outcome in neglect_system(&mut self.world, now, &self.balance) {
            let Some(id) = self.id_of(outcome.entity) else {
                continue;
            };
            log::info!(
                "cat {} lost a heart to neglect ({} left)",
                id,
                outcome.hearts_left
            );
            self.notifications.push(Notification::HeartLost {
                cat: id,
                hearts_left: outcome.hearts_left,
            });
            if outcome.exhausted {
                self.depart(id, DepartureReason::HeartsExhausted);
            }
        }

        if let Some(deadline) = self.next_arrival_at {
            if now >= deadline {
                match self.add_cat(None) {
                    Ok(_) => {}
                    // Expected at capacity: skip and let the next scheduled
                    // arrival re-check.
                    Err(CapacityExceeded { capacity }) => {
                        log::debug!("skipping scheduled arrival, shelter full ({capacity})");
                    }
                }
                let mut rng = rand::thread_rng();
                self.next_arrival_at = Some(now + self.draw_arrival_delay(&mut rng));
            }
        }
    }

    /// Current simulation time in seconds.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Set time scale (1.0 = real-time, 2.0 = 2x speed, etc.)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn balance(&self) -> &Balance {
        &self.balance
    }

    // ── Cat operations ─────────────────────────────────────────────────

    /// Try to resolve one of the cat's needs with `item`. On success the
    /// [`Notification::NeedFulfilled`] is queued, and if this emptied the
    /// cat's needs the helped counter increments — exactly once per cat per
    /// happy-transition, which the present-need precondition guarantees.
    pub fn attempt_fulfillment(
        &mut self,
        id: CatId,
        item: ItemId,
    ) -> Result<Fulfilled, FulfillmentError> {
        let entity = self.entity_of(id).ok_or(FulfillmentError::CatNotFound)?;
        let fulfilled =
            attempt_fulfillment(&mut self.world, entity, item, self.sim_time, &self.balance)?;

        if fulfilled.now_content {
            self.cats_helped += 1;
            log::info!("cat {id} is content, {} helped so far", self.cats_helped);
        }
        log::debug!("cat {id}: {} resolved {}", item, fulfilled.need);
        self.notifications.push(Notification::NeedFulfilled {
            cat: id,
            need: fulfilled.need,
            item,
        });
        Ok(fulfilled)
    }

    /// Remove a need directly (no item, no scoring). Returns `true` on
    /// removal, `false` if the need was absent or the cat unknown.
    pub fn fulfill_need(&mut self, id: CatId, need: NeedType) -> bool {
        match self.entity_of(id) {
            Some(entity) => fulfill_need(&mut self.world, entity, need, self.sim_time, &self.balance),
            None => false,
        }
    }

    /// Add a need to a live cat. Returns `false` on duplicates or unknown ids.
    pub fn add_need(&mut self, id: CatId, need: NeedType) -> bool {
        match self.entity_of(id) {
            Some(entity) => add_need(&mut self.world, entity, need, self.sim_time, &self.balance),
            None => false,
        }
    }

    /// Take one heart from a cat. Returns `true` exactly when this loss
    /// exhausts the hearts, in which case the cat departs immediately.
    pub fn lose_heart(&mut self, id: CatId) -> bool {
        let Some(entity) = self.entity_of(id) else {
            return false;
        };
        let before = self
            .world
            .get::<&Hearts>(entity)
            .map(|hearts| hearts.count())
            .unwrap_or(0);
        if before == 0 {
            return false;
        }
        let exhausted = lose_heart(&mut self.world, entity, self.sim_time, &self.balance);
        self.notifications.push(Notification::HeartLost {
            cat: id,
            hearts_left: before - 1,
        });
        if exhausted {
            self.depart(id, DepartureReason::HeartsExhausted);
        }
        exhausted
    }

    /// Pass a user click through to the notification queue. The core does
    /// not interpret clicks. Returns whether the cat exists.
    pub fn handle_cat_clicked(&mut self, id: CatId) -> bool {
        if self.entity_of(id).is_none() {
            return false;
        }
        self.notifications.push(Notification::CatClicked { cat: id });
        true
    }

    // ── Queries ────────────────────────────────────────────────────────

    /// Ids of all cats, in arrival order.
    pub fn cats(&self) -> Vec<CatId> {
        self.cats.iter().map(|(id, _)| *id).collect()
    }

    pub fn cat_count(&self) -> usize {
        self.cats.len()
    }

    pub fn capacity(&self) -> usize {
        self.balance.max_capacity
    }

    /// Render-ready view of one cat.
    pub fn snapshot(&self, id: CatId) -> Option<CatSnapshot> {
        let entity = self.entity_of(id)?;
        let now = self.sim_time;

        let name = self.world.get::<&CatName>(entity).ok()?.as_str().to_string();
        let coat = *self.world.get::<&Coat>(entity).ok()?;
        let needs = self.world.get::<&NeedSet>(entity).ok()?.to_vec();
        let hearts = self.world.get::<&Hearts>(entity).ok()?.count();
        let state = self.world.get::<&Mood>(entity).ok()?.0;
        let arrival = *self.world.get::<&Arrival>(entity).ok()?;
        let urgency = urgency(&self.world, entity, now, &self.balance)?;
        let critical = is_critical(&self.world, entity, now, &self.balance)?;

        Some(CatSnapshot {
            id,
            name,
            coat,
            needs,
            hearts,
            state,
            urgency,
            seconds_since_arrival: arrival.seconds_since(now),
            critical,
        })
    }

    /// Snapshots of every cat, in arrival order.
    pub fn snapshots(&self) -> Vec<CatSnapshot> {
        self.cats
            .iter()
            .filter_map(|(id, _)| self.snapshot(*id))
            .collect()
    }

    /// Ids of cats currently carrying `need`, in arrival order.
    pub fn cats_by_need(&self, need: NeedType) -> Vec<CatId> {
        self.cats
            .iter()
            .filter(|(_, entity)| {
                self.world
                    .get::<&NeedSet>(*entity)
                    .map(|needs| needs.contains(need))
                    .unwrap_or(false)
            })
            .map(|(id, _)| *id)
            .collect()
    }

    /// Ids of cats currently in `state`, in arrival order.
    pub fn cats_by_state(&self, state: CatState) -> Vec<CatId> {
        self.cats
            .iter()
            .filter(|(_, entity)| {
                self.world
                    .get::<&Mood>(*entity)
                    .map(|mood| mood.0 == state)
                    .unwrap_or(false)
            })
            .map(|(id, _)| *id)
            .collect()
    }

    /// Number of cats whose last need was resolved by an item.
    pub fn cats_helped(&self) -> u32 {
        self.cats_helped
    }

    /// Aggregate statistics snapshot.
    pub fn stats(&self) -> ShelterStats {
        let mut stats = ShelterStats {
            total_cats: self.cats.len(),
            cats_helped: self.cats_helped,
            ..Default::default()
        };
        for (_, entity) in &self.cats {
            if let Ok(mood) = self.world.get::<&Mood>(*entity) {
                stats.cats_by_state.bump(mood.0);
            }
            if let Ok(needs) = self.world.get::<&NeedSet>(*entity) {
                for need in needs.iter() {
                    stats.cats_by_needs.bump(need);
                }
            }
        }
        stats
    }

    /// Drain the queued notifications in FIFO order.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn entity_of(&self, id: CatId) -> Option<Entity> {
        self.cats
            .iter()
            .find(|(cat, _)| *cat == id)
            .map(|(_, entity)| *entity)
    }

    fn id_of(&self, entity: Entity) -> Option<CatId> {
        self.cats
            .iter()
            .find(|(_, e)| *e == entity)
            .map(|(id, _)| *id)
    }
}

impl Default for ShelterEngine {
    fn default() -> Self {
        Self::new()
    }
}
