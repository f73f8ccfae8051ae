//! Orders
//!
//! - **service**: cart pricing, checkout, status changes, access checks
//! - **token**: four-digit pickup token allocation
//! - **status**: PLACED → READY → COMPLETED workflow rules
//!
//! # Checkout
//!
//! ```text
//! CartRequest → merge lines → price (best offer per item) → CartQuote
//!                                                              ↓
//!                        BEGIN → open tokens → pick token → insert → COMMIT
//! ```
//!
//! Prices are always recomputed here; the client's cart only carries item
//! ids and quantities.

pub mod service;
pub mod status;
pub mod token;

pub use service::{
    ensure_order_access, load_order, merge_lines, place_order, quote_cart, update_status,
};
pub use status::check_transition;
pub use token::allocate_token;
