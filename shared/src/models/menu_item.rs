//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub available: bool,
}

/// Menu item decorated with the price after the best active offer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItemView {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub effective_price: f64,
    pub offer_desc: Option<String>,
    pub available: bool,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub price: f64,
    pub available: Option<bool>,
}

/// Update menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub available: Option<bool>,
}

/// Query string for menu listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuQuery {
    #[serde(default)]
    pub available_only: bool,
}
