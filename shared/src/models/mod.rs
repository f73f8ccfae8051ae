//! Data models
//!
//! Shared between canteen-server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! Numeric IDs are `i64` (SQLite INTEGER PRIMARY KEY); account IDs are the
//! user-chosen string (roll number / staff id).

pub mod account;
pub mod menu_item;
pub mod offer;
pub mod order;
pub mod report;

// Re-exports
pub use account::*;
pub use menu_item::*;
pub use offer::*;
pub use order::*;
pub use report::*;
