//! Authentication and authorization
//!
//! - [`JwtService`] - JWT issue / validation
//! - [`CurrentUser`] - authenticated user context
//! - [`require_auth`] - authentication middleware
//! - [`require_permission`] - permission check middleware
//! - [`password`] - argon2 hashing

pub mod bootstrap;
pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod permissions;
pub mod registration;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_permission};
