//! Order receipts
//!
//! Only COMPLETED orders get a receipt. The PDF carries the order info, the
//! customer, the item lines with any offer applied, the total and the
//! payment QR code.

mod pdf;

pub use pdf::render_receipt;

use chrono_tz::Tz;
use shared::error::ErrorCode;
use shared::models::{Order, OrderStatus};

use crate::payment::PaymentQr;
use crate::utils::{AppError, AppResult};

/// Everything printed on a receipt
pub struct Receipt<'a> {
    pub order: &'a Order,
    pub customer_name: &'a str,
    pub customer_id: &'a str,
    pub tz: Tz,
    /// Omitted when payments are not configured
    pub qr: Option<&'a PaymentQr>,
}

/// `receipt_order_<id>.pdf`
pub fn receipt_filename(order_id: i64) -> String {
    format!("receipt_order_{order_id}.pdf")
}

pub fn ensure_receipt_available(order: &Order) -> AppResult<()> {
    if order.status != OrderStatus::Completed {
        return Err(AppError::with_message(
            ErrorCode::ReceiptNotAvailable,
            format!(
                "Receipt can only be downloaded for completed orders. Current status: {}",
                order.status
            ),
        )
        .with_detail("status", order.status.as_str()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::PaymentStatus;

    pub(super) fn sample_order(status: OrderStatus) -> Order {
        Order {
            id: 42,
            user_id: "21CS042".into(),
            total_amount: 95.0,
            token_number: "4821".into(),
            status,
            payment_status: PaymentStatus::Paid,
            paid_at: Some(1_741_161_700_000),
            created_at: 1_741_161_600_000,
            updated_at: 1_741_161_700_000,
            items: vec![
                shared::models::OrderItem {
                    item_id: 1,
                    item_name: "Masala Dosa".into(),
                    unit_price: 45.0,
                    original_price: 50.0,
                    offer_desc: Some("Dosa Day: 10% off".into()),
                    qty: 1,
                    line_total: 45.0,
                },
                shared::models::OrderItem {
                    item_id: 6,
                    item_name: "Tea".into(),
                    unit_price: 10.0,
                    original_price: 10.0,
                    offer_desc: None,
                    qty: 5,
                    line_total: 50.0,
                },
            ],
        }
    }

    #[test]
    fn test_only_completed_orders() {
        assert!(ensure_receipt_available(&sample_order(OrderStatus::Completed)).is_ok());

        let err = ensure_receipt_available(&sample_order(OrderStatus::Ready)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ReceiptNotAvailable);
        assert!(err.message.contains("READY"));
    }

    #[test]
    fn test_filename() {
        assert_eq!(receipt_filename(42), "receipt_order_42.pdf");
    }
}
