//! Offer pricing
//!
//! Offers are matched against an item and the current business day, then
//! the single best discount is applied. Offers never stack.

mod calculator;
pub mod matcher;
mod menu;
mod validation;

pub use calculator::*;
pub use matcher::*;
pub use menu::*;
pub use validation::*;
