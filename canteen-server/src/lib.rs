//! Canteen Server - campus canteen ordering backend
//!
//! # Overview
//!
//! - **Accounts** (`auth`): JWT + Argon2, three roles (student, attendant, manager)
//! - **Menu & offers** (`pricing`): best single discount per item, evaluated in the business time zone
//! - **Orders** (`orders`): server-side priced checkout, pickup tokens, status workflow
//! - **Payments** (`payment`): UPI deep link and QR code, manual confirmation
//! - **Receipts** (`receipt`): PDF for completed orders
//! - **Reports** (`reports`, `export`): dashboard counters, chart series, CSV / XLSX
//!
//! # Module layout
//!
//! ```text
//! canteen-server/src/
//! ├── core/      # config, state, server, startup errors
//! ├── auth/      # JWT, passwords, permissions, middleware
//! ├── db/        # SQLite pool, migrations, repositories
//! ├── pricing/   # offer matching and discount calculation
//! ├── orders/    # checkout, tokens, status workflow
//! ├── payment/   # UPI payload, QR rendering
//! ├── receipt/   # PDF receipts
//! ├── reports/   # dashboard aggregates and charts
//! ├── export/    # CSV / XLSX
//! ├── api/       # HTTP routes and handlers
//! └── utils/     # logging, money, time, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod export;
pub mod orders;
pub mod payment;
pub mod pricing;
pub mod receipt;
pub mod reports;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Security event log, target `security`
///
/// ```ignore
/// security_log!("WARN", "login_failed", user_id = id.clone());
/// ```
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
   ______            __
  / ____/___ _____  / /____  ___  ____
 / /   / __ `/ __ \/ __/ _ \/ _ \/ __ \
/ /___/ /_/ / / / / /_/  __/  __/ / / /
\____/\__,_/_/ /_/\__/\___/\___/_/ /_/
    "#
    );
}
