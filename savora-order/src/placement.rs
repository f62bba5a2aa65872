use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use savora_account::UserProfile;
use savora_catalog::MenuProvider;
use savora_core::payment::{PaymentError, PaymentGateway, PaymentStatus};
use savora_core::CoreError;

use crate::cart::{Cart, CartLine, CartTotals};

/// Minutes of prep before anything leaves the kitchen
const BASE_PREP_MINUTES: u32 = 30;
/// Each unit in the cart adds this much
const MINUTES_PER_UNIT: u32 = 5;
/// Quoted estimates never exceed this
const MAX_ESTIMATE_MINUTES: u32 = 90;

#[derive(Debug, thiserror::Error)]
pub enum PlacementError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("{0} is not available")]
    ItemUnavailable(String),

    #[error("Order validation failed")]
    ValidationFailed,

    #[error("Payment failed")]
    PaymentFailed,

    #[error(transparent)]
    Payment(#[from] PaymentError),
}

impl From<PlacementError> for CoreError {
    fn from(err: PlacementError) -> Self {
        match err {
            PlacementError::PaymentFailed => CoreError::PaymentDeclined(err.to_string()),
            PlacementError::Payment(inner) => inner.into(),
            other => CoreError::Validation(other.to_string()),
        }
    }
}

/// Pre-payment snapshot of the order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub items: Vec<CartLine>,
    pub total_info: CartTotals,
    pub delivery_address: String,
}

/// Result of a confirmed order; transient, never persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_id: String,
    pub estimated_delivery: String,
    pub totals: CartTotals,
    pub confirmed_at: DateTime<Utc>,
}

/// Orchestrates validation, checkout and confirmation for one session.
///
/// Borrows its collaborators for the duration of one checkout flow and keeps no
/// state of its own: every call recomputes from the current cart and menu, so
/// the `Empty -> Validated -> Checkout -> Confirmed` progression is derived,
/// never stored.
pub struct OrderPlacement<'a> {
    cart: &'a Cart,
    profile: &'a UserProfile,
    menu: &'a dyn MenuProvider,
}

impl<'a> OrderPlacement<'a> {
    pub fn new(cart: &'a Cart, profile: &'a UserProfile, menu: &'a dyn MenuProvider) -> Self {
        Self {
            cart,
            profile,
            menu,
        }
    }

    /// Reject empty carts and carts holding anything the menu no longer
    /// offers; the first unavailable item short-circuits.
    pub fn validate(&self) -> Result<(), PlacementError> {
        if self.cart.is_empty() {
            return Err(PlacementError::EmptyCart);
        }
        for item in self.cart.items() {
            if !self.menu.is_item_available(&item.name) {
                return Err(PlacementError::ItemUnavailable(item.name.clone()));
            }
        }
        Ok(())
    }

    /// Snapshot of lines, totals and delivery address. Does not re-validate;
    /// callers are expected to have passed `validate` first.
    pub fn checkout(&self) -> CheckoutSummary {
        CheckoutSummary {
            items: self.cart.lines(),
            total_info: self.cart.totals(),
            delivery_address: self.profile.delivery_address.clone(),
        }
    }

    /// Re-validate, then charge the cart total against the gateway.
    ///
    /// The gateway is never invoked when validation fails.
    pub fn confirm(
        &self,
        gateway: &dyn PaymentGateway,
    ) -> Result<OrderConfirmation, PlacementError> {
        if let Err(reason) = self.validate() {
            tracing::warn!(%reason, "order rejected before payment");
            return Err(PlacementError::ValidationFailed);
        }

        let totals = self.cart.totals();
        match gateway.charge(totals.total)? {
            PaymentStatus::Succeeded => {
                let confirmation = OrderConfirmation {
                    order_id: Self::generate_order_id(),
                    estimated_delivery: self.estimate_delivery(),
                    totals,
                    confirmed_at: Utc::now(),
                };
                tracing::info!(order_id = %confirmation.order_id, "order confirmed");
                Ok(confirmation)
            }
            PaymentStatus::Declined => Err(PlacementError::PaymentFailed),
        }
    }

    // Format: ORD-{timestamp}-{short_uuid}
    fn generate_order_id() -> String {
        let timestamp = Utc::now().timestamp();
        let short_id = &Uuid::new_v4().to_string()[..8];
        format!("ORD-{}-{}", timestamp, short_id.to_uppercase())
    }

    /// Quote grows with cart size, capped at `MAX_ESTIMATE_MINUTES`
    fn estimate_delivery(&self) -> String {
        let units: u32 = self.cart.items().iter().map(|i| i.quantity).sum();
        let minutes = (BASE_PREP_MINUTES + units * MINUTES_PER_UNIT).min(MAX_ESTIMATE_MINUTES);
        format!("{} minutes", minutes)
    }
}
