//! Error re-exports
//!
//! The server uses the unified error system from `shared::error`:
//!
//! ```ignore
//! Err(AppError::new(ErrorCode::MenuItemNotFound))
//! Err(AppError::validation("price must be >= 0"))
//! ```

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
