//! UPI deep link payload

use shared::error::ErrorCode;
use urlencoding::encode;
use shared::models::{Order, PaymentRequest};

use crate::core::Config;
use crate::utils::money::format_amount;
use crate::utils::{AppError, AppResult};

/// Who gets paid
#[derive(Debug, Clone)]
pub struct UpiPayee<'a> {
    /// Virtual payment address, e.g. `canteen@upi`
    pub vpa: &'a str,
    pub name: &'a str,
}

impl<'a> UpiPayee<'a> {
    /// Payee from configuration; `PaymentNotConfigured` without `UPI_ID`
    pub fn from_config(config: &'a Config) -> AppResult<Self> {
        let vpa = config
            .upi_id
            .as_deref()
            .ok_or_else(|| AppError::new(ErrorCode::PaymentNotConfigured))?;
        Ok(Self {
            vpa,
            name: &config.payee_name,
        })
    }
}

/// `upi://pay?pa=..&pn=..&am=..&cu=INR&tn=Canteen%20Order%20<id>`
pub fn build_upi_uri(payee: &UpiPayee<'_>, amount: f64, order_id: i64) -> String {
    format!(
        "upi://pay?pa={}&pn={}&am={}&cu=INR&tn={}",
        payee.vpa,
        encode(payee.name),
        format_amount(amount),
        encode(&format!("Canteen Order {order_id}")),
    )
}

pub fn payment_request(payee: &UpiPayee<'_>, order: &Order) -> PaymentRequest {
    PaymentRequest {
        order_id: order.id,
        amount: order.total_amount,
        upi_uri: build_upi_uri(payee, order.total_amount, order.id),
        status: order.payment_status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_format() {
        let payee = UpiPayee { vpa: "canteen@upi", name: "College Canteen" };
        assert_eq!(
            build_upi_uri(&payee, 45.0, 12),
            "upi://pay?pa=canteen@upi&pn=College%20Canteen&am=45.00&cu=INR&tn=Canteen%20Order%2012"
        );
    }

    #[test]
    fn test_payee_name_is_percent_encoded() {
        let payee = UpiPayee { vpa: "canteen@upi", name: "Tea & Café" };
        let uri = build_upi_uri(&payee, 10.0, 3);
        assert!(uri.contains("&pn=Tea%20%26%20Caf%C3%A9&"));
    }

    #[test]
    fn test_missing_upi_id() {
        let mut config = Config::with_overrides("/tmp/canteen-test", 0);
        config.upi_id = None;
        let err = UpiPayee::from_config(&config).unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentNotConfigured);
    }
}
