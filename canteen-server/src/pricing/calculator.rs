//! Discount Calculator
//!
//! Uses rust_decimal for the arithmetic, stores as f64.

use rust_decimal::prelude::*;
use shared::models::{DiscountType, Offer};

use crate::utils::money::{to_decimal, to_f64};

/// Price after the best offer
#[derive(Debug, Clone, PartialEq)]
pub struct BestDiscount {
    pub final_price: f64,
    /// Set only when a discount was actually applied
    pub offer_desc: Option<String>,
}

/// Discount amount an offer grants on `price`
pub fn discount_amount(offer: &Offer, price: Decimal) -> Decimal {
    let value = to_decimal(offer.discount_value);
    match offer.discount_type {
        DiscountType::Percentage => price * value / Decimal::ONE_HUNDRED,
        DiscountType::Fixed => value,
    }
}

/// `"Lunch Deal: 10% off"` / `"Combo: Rs 5.00 off"`
pub fn describe(offer: &Offer) -> String {
    match offer.discount_type {
        DiscountType::Percentage => format!("{}: {:.0}% off", offer.name, offer.discount_value),
        DiscountType::Fixed => format!("{}: Rs {:.2} off", offer.name, offer.discount_value),
    }
}

/// Apply the single largest discount
///
/// The first offer wins ties. The final price never drops below zero.
pub fn best_discount(price: f64, offers: &[&Offer]) -> BestDiscount {
    let base = to_decimal(price);

    let mut best: Option<(&Offer, Decimal)> = None;
    for offer in offers {
        let amount = discount_amount(offer, base);
        if amount > best.map_or(Decimal::ZERO, |(_, a)| a) {
            best = Some((offer, amount));
        }
    }

    match best {
        Some((offer, amount)) => BestDiscount {
            final_price: to_f64((base - amount).max(Decimal::ZERO)),
            offer_desc: Some(describe(offer)),
        },
        None => BestDiscount {
            final_price: to_f64(base),
            offer_desc: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(name: &str, discount_type: DiscountType, value: f64) -> Offer {
        Offer {
            id: 0,
            name: name.into(),
            item_id: None,
            discount_type,
            discount_value: value,
            start_date: None,
            end_date: None,
            day_of_week: None,
            active: true,
            created_at: 0,
        }
    }

    #[test]
    fn test_no_offers_keeps_price() {
        let result = best_discount(50.0, &[]);
        assert_eq!(result.final_price, 50.0);
        assert_eq!(result.offer_desc, None);
    }

    #[test]
    fn test_largest_discount_wins() {
        let pct = offer("Lunch", DiscountType::Percentage, 10.0);
        let fixed = offer("Combo", DiscountType::Fixed, 8.0);

        // 10% of 50 = 5 < 8
        let result = best_discount(50.0, &[&pct, &fixed]);
        assert_eq!(result.final_price, 42.0);
        assert_eq!(result.offer_desc.as_deref(), Some("Combo: Rs 8.00 off"));

        // 10% of 100 = 10 > 8
        let result = best_discount(100.0, &[&pct, &fixed]);
        assert_eq!(result.final_price, 90.0);
        assert_eq!(result.offer_desc.as_deref(), Some("Lunch: 10% off"));
    }

    #[test]
    fn test_first_wins_on_tie() {
        let a = offer("First", DiscountType::Fixed, 5.0);
        let b = offer("Second", DiscountType::Percentage, 10.0);
        let result = best_discount(50.0, &[&a, &b]);
        assert_eq!(result.offer_desc.as_deref(), Some("First: Rs 5.00 off"));
    }

    #[test]
    fn test_never_negative() {
        let big = offer("Free", DiscountType::Fixed, 100.0);
        assert_eq!(best_discount(10.0, &[&big]).final_price, 0.0);
    }

    #[test]
    fn test_zero_discount_has_no_description() {
        let zero = offer("Nothing", DiscountType::Percentage, 0.0);
        let result = best_discount(35.0, &[&zero]);
        assert_eq!(result.final_price, 35.0);
        assert!(result.offer_desc.is_none());
    }

    #[test]
    fn test_rounds_to_two_places() {
        let third = offer("Third", DiscountType::Percentage, 33.0);
        // 10 - 3.3 = 6.7; 15 - 4.95 = 10.05
        assert_eq!(best_discount(10.0, &[&third]).final_price, 6.7);
        assert_eq!(best_discount(15.0, &[&third]).final_price, 10.05);
        let pct = offer("Odd", DiscountType::Percentage, 12.5);
        // 45 * 0.875 = 39.375 -> 39.38
        assert_eq!(best_discount(45.0, &[&pct]).final_price, 39.38);
    }
}
