use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A dish offered by a restaurant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub price: Decimal,
}

/// Availability seam that order placement validates against.
///
/// Keeps placement decoupled from the concrete menu representation.
pub trait MenuProvider {
    fn is_item_available(&self, name: &str) -> bool;
}

/// The current menu for a single restaurant
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantMenu {
    items: Vec<MenuItem>,
}

impl RestaurantMenu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// Build a menu from names alone, pricing every dish the same.
    /// Handy for tests and seeded demo data.
    pub fn from_names(names: &[&str], price: Decimal) -> Self {
        Self {
            items: names
                .iter()
                .map(|name| MenuItem {
                    name: (*name).to_string(),
                    price,
                })
                .collect(),
        }
    }

    pub fn add_item(&mut self, item: MenuItem) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Price lookup by exact dish name
    pub fn price_of(&self, name: &str) -> Option<Decimal> {
        self.items.iter().find(|i| i.name == name).map(|i| i.price)
    }
}

impl MenuProvider for RestaurantMenu {
    fn is_item_available(&self, name: &str) -> bool {
        self.items.iter().any(|i| i.name == name)
    }
}
