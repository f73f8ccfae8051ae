//! Offer validation
//!
//! Runs on the merged offer so create and partial update share one check.

use shared::error::ErrorCode;
use shared::models::{DiscountType, Offer};

use crate::utils::time::parse_date;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

pub fn validate_offer(offer: &Offer) -> AppResult<()> {
    validate_required_text(&offer.name, "name", MAX_NAME_LEN)?;

    let value = offer.discount_value;
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::with_message(
            ErrorCode::OfferInvalidDiscount,
            "Discount value must be a non-negative number",
        ));
    }
    if offer.discount_type == DiscountType::Percentage && value > 100.0 {
        return Err(AppError::with_message(
            ErrorCode::OfferInvalidDiscount,
            "Percentage discount cannot exceed 100",
        ));
    }

    let start = offer.start_date.as_deref().map(parse_date).transpose()?;
    let end = offer.end_date.as_deref().map(parse_date).transpose()?;
    if let (Some(start), Some(end)) = (start, end)
        && start > end
    {
        return Err(AppError::with_message(
            ErrorCode::OfferInvalidSchedule,
            format!("Start date {start} is after end date {end}"),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer() -> Offer {
        Offer {
            id: 0,
            name: "Lunch".into(),
            item_id: None,
            discount_type: DiscountType::Percentage,
            discount_value: 10.0,
            start_date: Some("2025-03-01".into()),
            end_date: Some("2025-03-31".into()),
            day_of_week: None,
            active: true,
            created_at: 0,
        }
    }

    #[test]
    fn test_valid_offer() {
        assert!(validate_offer(&offer()).is_ok());
    }

    #[test]
    fn test_discount_bounds() {
        let mut o = offer();
        o.discount_value = 101.0;
        assert_eq!(validate_offer(&o).unwrap_err().code, ErrorCode::OfferInvalidDiscount);

        o.discount_type = DiscountType::Fixed;
        assert!(validate_offer(&o).is_ok());

        o.discount_value = -1.0;
        assert_eq!(validate_offer(&o).unwrap_err().code, ErrorCode::OfferInvalidDiscount);
    }

    #[test]
    fn test_schedule() {
        let mut o = offer();
        o.start_date = Some("2025-04-01".into());
        assert_eq!(validate_offer(&o).unwrap_err().code, ErrorCode::OfferInvalidSchedule);

        o.start_date = Some("01/04/2025".into());
        assert_eq!(validate_offer(&o).unwrap_err().code, ErrorCode::ValidationFailed);

        o.start_date = None;
        assert!(validate_offer(&o).is_ok());
    }

    #[test]
    fn test_blank_name() {
        let mut o = offer();
        o.name = "  ".into();
        assert!(validate_offer(&o).is_err());
    }
}
