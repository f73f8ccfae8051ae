//! Order Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order preparation status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum OrderStatus {
    Placed,
    Ready,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "PLACED",
            OrderStatus::Ready => "READY",
            OrderStatus::Completed => "COMPLETED",
        }
    }

    /// Position in the PLACED -> READY -> COMPLETED workflow
    pub fn rank(&self) -> u8 {
        match self {
            OrderStatus::Placed => 0,
            OrderStatus::Ready => 1,
            OrderStatus::Completed => 2,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Paid => "PAID",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order line snapshot
///
/// Captures name and prices at checkout time; later menu edits never
/// change a placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub item_id: i64,
    pub item_name: String,
    /// Price per unit after the best offer
    pub unit_price: f64,
    /// Menu price per unit before discounts
    pub original_price: f64,
    pub offer_desc: Option<String>,
    pub qty: i64,
    pub line_total: f64,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub user_id: String,
    pub total_amount: f64,
    /// Four-digit pickup token
    pub token_number: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub paid_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// One requested cart line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: i64,
    pub qty: i64,
}

/// Cart payload (quote and checkout)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartRequest {
    pub items: Vec<CartLine>,
}

/// Priced cart, not persisted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartQuote {
    pub lines: Vec<OrderItem>,
    pub total: f64,
}

/// Status change payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// Order listing filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderQuery {
    pub status: Option<OrderStatus>,
}

/// What the payer needs to complete a UPI payment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentRequest {
    pub order_id: i64,
    pub amount: f64,
    pub upi_uri: String,
    pub status: PaymentStatus,
}

/// Checkout response
///
/// `payment` is absent when no UPI id is configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub order: Order,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub payment: Option<PaymentRequest>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_rank_is_forward_ordered() {
        assert!(OrderStatus::Placed.rank() < OrderStatus::Ready.rank());
        assert!(OrderStatus::Ready.rank() < OrderStatus::Completed.rank());
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Completed).unwrap(),
            "\"COMPLETED\""
        );
        let s: PaymentStatus = serde_json::from_str("\"PAID\"").unwrap();
        assert_eq!(s, PaymentStatus::Paid);
        assert_eq!(OrderStatus::Ready.to_string(), "READY");
    }
}
