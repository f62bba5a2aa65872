use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use savora_core::CoreError;

/// Fixed 10% tax rate
const TAX_RATE: Decimal = dec!(0.10);

/// Flat delivery fee applied to every order
const DELIVERY_FEE: Decimal = dec!(5.00);

/// A line item in the cart.
///
/// Owned exclusively by the `Cart` that holds it; quantity guards live in
/// `Cart`, which owns the `quantity >= 1` invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl CartItem {
    pub fn new(name: &str, unit_price: Decimal, quantity: u32) -> Self {
        Self {
            name: name.to_string(),
            unit_price,
            quantity,
        }
    }

    /// Replace the quantity in place
    pub fn update_quantity(&mut self, new_quantity: u32) {
        self.quantity = new_quantity;
    }

    /// `unit_price * quantity`, no rounding
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Read-only view of one cart line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    pub name: String,
    pub quantity: u32,
    pub subtotal: Decimal,
}

/// Subtotal, tax, delivery fee and grand total, computed together
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
}

/// How `add_item` changed the cart
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartUpdate {
    /// A new line was appended
    Added { name: String },
    /// An existing line absorbed the quantity
    Merged { name: String, quantity: u32 },
}

impl std::fmt::Display for CartUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartUpdate::Added { name } => write!(f, "Added {} to cart", name),
            CartUpdate::Merged { name, quantity } => {
                write!(f, "Updated {} quantity to {}", name, quantity)
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    #[error("Price must not be negative")]
    InvalidPrice,

    #[error("{0} not found in cart")]
    ItemNotFound(String),
}

impl From<CartError> for CoreError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::ItemNotFound(name) => CoreError::NotFound(name),
            other => CoreError::Validation(other.to_string()),
        }
    }
}

/// Insertion-ordered cart, unique by item name.
///
/// Scoped to one shopping session; adding an existing name merges quantities
/// rather than duplicating the line.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Add a line, merging quantities when the name already exists
    pub fn add_item(
        &mut self,
        name: &str,
        unit_price: Decimal,
        quantity: u32,
    ) -> Result<CartUpdate, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        if unit_price < Decimal::ZERO {
            return Err(CartError::InvalidPrice);
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.name == name) {
            item.update_quantity(item.quantity + quantity);
            return Ok(CartUpdate::Merged {
                name: name.to_string(),
                quantity: item.quantity,
            });
        }

        self.items.push(CartItem::new(name, unit_price, quantity));
        Ok(CartUpdate::Added {
            name: name.to_string(),
        })
    }

    /// Remove every line matching `name`; silent no-op when absent
    pub fn remove_item(&mut self, name: &str) {
        self.items.retain(|i| i.name != name);
    }

    /// Set a line's quantity. Zero removes the line.
    pub fn update_quantity(&mut self, name: &str, new_quantity: u32) -> Result<(), CartError> {
        if !self.items.iter().any(|i| i.name == name) {
            return Err(CartError::ItemNotFound(name.to_string()));
        }

        if new_quantity == 0 {
            self.remove_item(name);
            return Ok(());
        }

        for item in self.items.iter_mut().filter(|i| i.name == name) {
            item.update_quantity(new_quantity);
        }
        Ok(())
    }

    /// Subtotal, 10% tax, flat delivery fee and total, in one pass
    pub fn totals(&self) -> CartTotals {
        let subtotal: Decimal = self.items.iter().map(CartItem::subtotal).sum();
        let tax = subtotal * TAX_RATE;
        let total = subtotal + tax + DELIVERY_FEE;
        CartTotals {
            subtotal,
            tax,
            delivery_fee: DELIVERY_FEE,
            total,
        }
    }

    /// Read-only lines in insertion order
    pub fn lines(&self) -> Vec<CartLine> {
        self.items
            .iter()
            .map(|i| CartLine {
                name: i.name.clone(),
                quantity: i.quantity,
                subtotal: i.subtotal(),
            })
            .collect()
    }
}
