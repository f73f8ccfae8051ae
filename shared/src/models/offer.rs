//! Offer Model

use serde::{Deserialize, Serialize};

/// Discount type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum DiscountType {
    /// value is a percentage (10 = 10%)
    Percentage,
    /// value is an amount in rupees
    Fixed,
}

/// Day of week filter
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "UPPERCASE"))]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub fn from_chrono(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Mon,
            chrono::Weekday::Tue => Weekday::Tue,
            chrono::Weekday::Wed => Weekday::Wed,
            chrono::Weekday::Thu => Weekday::Thu,
            chrono::Weekday::Fri => Weekday::Fri,
            chrono::Weekday::Sat => Weekday::Sat,
            chrono::Weekday::Sun => Weekday::Sun,
        }
    }
}

/// Offer entity
///
/// `item_id = None` targets every menu item. Dates are `YYYY-MM-DD` in the
/// business time zone; both bounds are inclusive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Offer {
    pub id: i64,
    pub name: String,
    pub item_id: Option<i64>,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub day_of_week: Option<Weekday>,
    pub active: bool,
    pub created_at: i64,
}

/// Offer listing row (joined with the target item name)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OfferView {
    #[serde(flatten)]
    pub offer: Offer,
    /// Item name, or "All Items" for global offers
    pub item_name: String,
}

/// Create offer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferCreate {
    pub name: String,
    pub item_id: Option<i64>,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub day_of_week: Option<Weekday>,
    pub active: Option<bool>,
}

/// Update offer payload
///
/// Optional nullable fields use `Option<Option<T>>`: absent = keep,
/// `null` = clear.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfferUpdate {
    pub name: Option<String>,
    #[serde(default, with = "double_option")]
    pub item_id: Option<Option<i64>>,
    pub discount_type: Option<DiscountType>,
    pub discount_value: Option<f64>,
    #[serde(default, with = "double_option")]
    pub start_date: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub end_date: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub day_of_week: Option<Option<Weekday>>,
    pub active: Option<bool>,
}

mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<Option<T>>, s: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(s),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(d: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(d).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_format() {
        assert_eq!(
            serde_json::to_string(&DiscountType::Percentage).unwrap(),
            "\"PERCENTAGE\""
        );
        assert_eq!(serde_json::to_string(&Weekday::Mon).unwrap(), "\"MON\"");
        let day: Weekday = serde_json::from_str("\"SUN\"").unwrap();
        assert_eq!(day, Weekday::Sun);
    }

    #[test]
    fn test_update_distinguishes_null_from_absent() {
        let update: OfferUpdate = serde_json::from_str(r#"{"end_date":null}"#).unwrap();
        assert_eq!(update.end_date, Some(None));
        assert_eq!(update.start_date, None);

        let update: OfferUpdate = serde_json::from_str(r#"{"item_id":3}"#).unwrap();
        assert_eq!(update.item_id, Some(Some(3)));
    }
}
