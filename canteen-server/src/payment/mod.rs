//! UPI payments
//!
//! The server never talks to a bank. It builds the `upi://pay` payload the
//! payer's app scans, renders it as a QR code, and records the payment flag
//! once the student or an attendant confirms it.

pub mod qr;
pub mod upi;

pub use qr::PaymentQr;
pub use upi::{UpiPayee, build_upi_uri, payment_request};

use shared::error::ErrorCode;
use shared::models::Order;
use sqlx::SqlitePool;

use crate::db::repository::order;
use crate::orders::load_order;
use crate::utils::{AppError, AppResult};

/// PENDING → PAID; a second confirmation is rejected
pub async fn confirm_payment(pool: &SqlitePool, order_id: i64) -> AppResult<Order> {
    let current = load_order(pool, order_id).await?;

    if !order::mark_paid(pool, current.id).await? {
        return Err(AppError::with_message(
            ErrorCode::OrderAlreadyPaid,
            format!("Order {order_id} is already paid"),
        ));
    }

    tracing::info!(order_id, amount = current.total_amount, "Payment confirmed");
    load_order(pool, order_id).await
}
