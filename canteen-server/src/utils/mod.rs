//! Utilities
//!
//! - [`AppError`] / [`ApiResponse`] - re-exported from `shared::error`
//! - logging setup, business time zone helpers, money math, input validation

pub mod error;
pub mod logger;
pub mod money;
pub mod time;
pub mod validation;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
