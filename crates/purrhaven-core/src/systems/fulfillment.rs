//! Fulfillment: validating an item against a cat's needs and applying the
//! resolution.

use hecs::{Entity, World};

use purrhaven_logic::balance::Balance;
use purrhaven_logic::items::ItemId;
use purrhaven_logic::needs::NeedType;

use crate::components::NeedSet;
use super::needs::fulfill_need;

/// A successful fulfillment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fulfilled {
    pub need: NeedType,
    pub item: ItemId,
    /// The cat's need set became empty as a direct result of this
    /// fulfillment; the scheduler counts the help exactly once on this flag.
    pub now_content: bool,
}

/// Why a fulfillment attempt did not resolve a need. Both cases are expected
/// player feedback, not system faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FulfillmentError {
    /// The cat does not currently have the need this item resolves.
    NeedNotPresent,
    /// The cat is gone (stale id after removal or eviction).
    CatNotFound,
}

impl std::fmt::Display for FulfillmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FulfillmentError::NeedNotPresent => write!(f, "the cat does not have that need"),
            FulfillmentError::CatNotFound => write!(f, "no such cat in the shelter"),
        }
    }
}

impl std::error::Error for FulfillmentError {}

/// Try to resolve one of the cat's needs with `item`.
///
/// Idempotent under retry: once a need is resolved, a second attempt with
/// the same item reports [`FulfillmentError::NeedNotPresent`] rather than
/// double-counting.
pub fn attempt_fulfillment(
    world: &mut World,
    entity: Entity,
    item: ItemId,
    now: f64,
    balance: &Balance,
) -> Result<Fulfilled, FulfillmentError> {
    let need = item.fulfills();

    {
        let needs = world
            .get::<&NeedSet>(entity)
            .map_err(|_| FulfillmentError::CatNotFound)?;
        if !needs.contains(need) {
            return Err(FulfillmentError::NeedNotPresent);
        }
    }

    // The need is present, so removal cannot fail here.
    fulfill_need(world, entity, need, now, balance);
    let now_content = world
        .get::<&NeedSet>(entity)
        .map(|needs| needs.is_empty())
        .unwrap_or(false);

    Ok(Fulfilled {
        need,
        item,
        now_content,
    })
}
