//! Systems operating on cat entities.

mod fulfillment;
mod hearts;
mod needs;

pub use fulfillment::*;
pub use hearts::*;
pub use needs::*;
