//! Cat generation: names, coats, and randomized starting needs.

mod cats;
mod names;

pub use cats::*;
pub use names::*;
