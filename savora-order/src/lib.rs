pub mod cart;
pub mod placement;

pub use cart::{Cart, CartError, CartItem, CartLine, CartTotals, CartUpdate};
pub use placement::{CheckoutSummary, OrderConfirmation, OrderPlacement, PlacementError};
