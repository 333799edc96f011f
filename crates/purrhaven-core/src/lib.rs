//! Purrhaven Core - Cat Shelter Simulation Engine
//!
//! An ECS-based simulation of a small cat shelter: cats arrive on a
//! capacity-gated schedule, carry needs that age into urgency, and are
//! helped with matching inventory items until their needs are empty — or
//! neglected until their hearts run out and they leave.
//!
//! # Architecture
//!
//! The simulation uses an Entity Component System (ECS) architecture via `hecs`:
//! - **Entities**: Cats
//! - **Components**: Pure data attached to entities (CatName, NeedSet, Hearts, etc.)
//! - **Systems**: Logic that queries and updates components
//!
//! The engine is headless and single-threaded: the host drives it with
//! [`ShelterEngine::update`] from its own event loop and polls
//! notifications/snapshots to render. Rules and tuning data live in
//! `purrhaven-logic`.
//!
//! # Example
//!
//! ```rust,no_run
//! use purrhaven_core::prelude::*;
//! use purrhaven_logic::items::ItemId;
//!
//! let mut engine = ShelterEngine::new();
//! engine.resume(); // start scheduling arrivals
//!
//! // Run simulation
//! loop {
//!     engine.update(1.0 / 60.0); // 60 FPS
//!     for cat in engine.snapshots() {
//!         if cat.needs.first() == Some(&ItemId::Food.fulfills()) {
//!             let _ = engine.attempt_fulfillment(cat.id, ItemId::Food);
//!         }
//!     }
//! }
//! ```

pub mod components;
pub mod engine;
pub mod generation;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::{CatId, CatSnapshot, Notification, ShelterEngine};
}
