//! Menu decoration with effective prices

use shared::models::{MenuItem, MenuItemView, Offer};

use super::{BestDiscount, PricingDay, active_offers_for_item, best_discount};

/// Best price for one item among `offers` on `day`
pub fn price_item(item: &MenuItem, offers: &[Offer], day: &PricingDay) -> BestDiscount {
    let matching = active_offers_for_item(offers, item.id, day);
    best_discount(item.price, &matching)
}

pub fn decorate_menu(items: Vec<MenuItem>, offers: &[Offer], day: &PricingDay) -> Vec<MenuItemView> {
    items
        .into_iter()
        .map(|item| {
            let priced = price_item(&item, offers, day);
            MenuItemView {
                id: item.id,
                name: item.name,
                price: item.price,
                effective_price: priced.final_price,
                offer_desc: priced.offer_desc,
                available: item.available,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::models::DiscountType;

    #[test]
    fn test_decorate_applies_item_and_global_offers() {
        let items = vec![
            MenuItem { id: 1, name: "Tea".into(), price: 10.0, available: true },
            MenuItem { id: 2, name: "Dosa".into(), price: 50.0, available: false },
        ];
        let offers = vec![Offer {
            id: 1,
            name: "Dosa Day".into(),
            item_id: Some(2),
            discount_type: DiscountType::Fixed,
            discount_value: 5.0,
            start_date: None,
            end_date: None,
            day_of_week: None,
            active: true,
            created_at: 0,
        }];
        let day = PricingDay::from_date(NaiveDate::from_ymd_opt(2025, 3, 5).unwrap());

        let views = decorate_menu(items, &offers, &day);
        assert_eq!(views[0].effective_price, 10.0);
        assert!(views[0].offer_desc.is_none());
        assert_eq!(views[1].effective_price, 45.0);
        assert_eq!(views[1].offer_desc.as_deref(), Some("Dosa Day: Rs 5.00 off"));
        assert!(!views[1].available);
    }
}
