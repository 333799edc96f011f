//! Components attached to cat entities.

mod cats;
mod needs;

pub use cats::*;
pub use needs::*;
