//! Offer Matcher
//!
//! Decides whether an offer applies to an item on a given business day.

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use shared::models::{Offer, Weekday};

use crate::utils::time::now_in;

/// The business day offers are evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingDay {
    pub today: NaiveDate,
    pub weekday: Weekday,
}

impl PricingDay {
    pub fn from_date(today: NaiveDate) -> Self {
        Self {
            today,
            weekday: Weekday::from_chrono(today.weekday()),
        }
    }

    /// Today in the business time zone
    pub fn now(tz: Tz) -> Self {
        Self::from_date(now_in(tz).date_naive())
    }
}

/// Item-specific offers match their item; global offers match everything
pub fn matches_item(offer: &Offer, item_id: i64) -> bool {
    offer.item_id.is_none_or(|target| target == item_id)
}

/// Inclusive `start_date..=end_date` check; unset bounds are open
///
/// A stored bound that does not parse never matches.
pub fn is_date_valid(offer: &Offer, today: NaiveDate) -> bool {
    let bound = |value: &Option<String>| -> Option<Option<NaiveDate>> {
        match value {
            None => Some(None),
            Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().map(Some),
        }
    };

    let (Some(start), Some(end)) = (bound(&offer.start_date), bound(&offer.end_date)) else {
        return false;
    };

    start.is_none_or(|start| start <= today) && end.is_none_or(|end| today <= end)
}

pub fn is_day_valid(offer: &Offer, weekday: Weekday) -> bool {
    offer.day_of_week.is_none_or(|day| day == weekday)
}

pub fn is_offer_active(offer: &Offer, item_id: i64, day: &PricingDay) -> bool {
    offer.active
        && matches_item(offer, item_id)
        && is_date_valid(offer, day.today)
        && is_day_valid(offer, day.weekday)
}

/// Offers that apply to `item_id` today, in input order
pub fn active_offers_for_item<'a>(
    offers: &'a [Offer],
    item_id: i64,
    day: &PricingDay,
) -> Vec<&'a Offer> {
    offers
        .iter()
        .filter(|offer| is_offer_active(offer, item_id, day))
        .collect()
}
