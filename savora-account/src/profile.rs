use serde::{Deserialize, Serialize};

/// Delivery details order placement reads at checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub delivery_address: String,
}

impl UserProfile {
    pub fn new(delivery_address: &str) -> Self {
        Self {
            delivery_address: delivery_address.to_string(),
        }
    }
}
