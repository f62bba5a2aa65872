use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::CoreError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Succeeded,
    Declined,
}

/// Record of a settled charge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub id: String,
    pub amount: Decimal,
    pub method: PaymentMethodKind,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

/// Gateway seam for charging an order total.
///
/// Single-threaded by design: callers pass `&dyn PaymentGateway` for the
/// duration of one confirmation, so no `Send + Sync` bound is needed.
pub trait PaymentGateway {
    /// Attempt to charge the given amount. `Declined` is a normal outcome;
    /// the error channel is reserved for malformed requests.
    fn charge(&self, amount: Decimal) -> Result<PaymentStatus, PaymentError>;
}

/// Stand-in gateway: accepts any strictly positive amount
pub struct SimulatedGateway;

impl PaymentGateway for SimulatedGateway {
    fn charge(&self, amount: Decimal) -> Result<PaymentStatus, PaymentError> {
        if amount > Decimal::ZERO {
            Ok(PaymentStatus::Succeeded)
        } else {
            tracing::warn!(%amount, "declining non-positive charge");
            Ok(PaymentStatus::Declined)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethodKind {
    CreditCard,
    Paypal,
    ApplePay,
}

impl PaymentMethodKind {
    /// Parse a wire-format method name (e.g. "credit_card")
    pub fn parse(name: &str) -> Result<Self, PaymentError> {
        match name {
            "credit_card" => Ok(Self::CreditCard),
            "paypal" => Ok(Self::Paypal),
            "apple_pay" => Ok(Self::ApplePay),
            other => Err(PaymentError::UnsupportedMethod(other.to_string())),
        }
    }
}

/// Raw card fields as entered at checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDetails {
    pub number: String,
    pub expiry: String,
    pub cvv: String,
}

/// What the customer pays with, per method
#[derive(Debug, Clone)]
pub enum PaymentInstrument {
    Card(CardDetails),
    PaypalAccount(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("{0} is not a valid payment method")]
    UnsupportedMethod(String),

    #[error("Invalid card number")]
    InvalidCardNumber,

    #[error("Invalid expiry date")]
    InvalidExpiryDate,

    #[error("Invalid CVV")]
    InvalidCvv,

    #[error("{0:?} cannot be processed with the supplied instrument")]
    InstrumentMismatch(PaymentMethodKind),

    #[error("Payment declined: {0}")]
    Declined(String),
}

impl From<PaymentError> for CoreError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Declined(msg) => CoreError::PaymentDeclined(msg),
            other => CoreError::Validation(other.to_string()),
        }
    }
}

lazy_static! {
    static ref CARD_NUMBER: Regex = Regex::new(r"^[0-9]{16}$").unwrap();
    static ref CARD_EXPIRY: Regex = Regex::new(r"^(0[1-9]|1[0-2])/[0-9]{2}$").unwrap();
    static ref CARD_CVV: Regex = Regex::new(r"^[0-9]{3,4}$").unwrap();
}

/// Validates payment input and settles charges against a gateway
pub struct PaymentProcessor<'a> {
    gateway: &'a dyn PaymentGateway,
}

impl<'a> PaymentProcessor<'a> {
    pub fn new(gateway: &'a dyn PaymentGateway) -> Self {
        Self { gateway }
    }

    /// Check card fields against the expected formats
    pub fn validate_card_details(details: &CardDetails) -> Result<(), PaymentError> {
        if !CARD_NUMBER.is_match(&details.number) {
            return Err(PaymentError::InvalidCardNumber);
        }
        if !CARD_EXPIRY.is_match(&details.expiry) {
            return Err(PaymentError::InvalidExpiryDate);
        }
        if !CARD_CVV.is_match(&details.cvv) {
            return Err(PaymentError::InvalidCvv);
        }
        Ok(())
    }

    /// Validate the method name and instrument, then charge the gateway
    pub fn process(
        &self,
        method: &str,
        amount: Decimal,
        instrument: &PaymentInstrument,
    ) -> Result<PaymentReceipt, PaymentError> {
        let kind = PaymentMethodKind::parse(method)?;

        match (&kind, instrument) {
            (PaymentMethodKind::CreditCard, PaymentInstrument::Card(details)) => {
                Self::validate_card_details(details)?;
            }
            (PaymentMethodKind::Paypal, PaymentInstrument::PaypalAccount(_)) => {}
            // apple_pay is on the allow-list but has no processor wired yet
            _ => return Err(PaymentError::InstrumentMismatch(kind)),
        }

        match self.gateway.charge(amount)? {
            PaymentStatus::Succeeded => {
                let receipt = PaymentReceipt {
                    id: Self::generate_receipt_id(),
                    amount,
                    method: kind,
                    status: PaymentStatus::Succeeded,
                    created_at: Utc::now(),
                };
                tracing::info!(receipt_id = %receipt.id, %amount, "payment settled");
                Ok(receipt)
            }
            PaymentStatus::Declined => {
                Err(PaymentError::Declined(format!("charge of {} refused", amount)))
            }
        }
    }

    // Format: PAY-{timestamp}-{short_uuid}
    fn generate_receipt_id() -> String {
        let timestamp = Utc::now().timestamp();
        let short_id = &Uuid::new_v4().to_string()[..8];
        format!("PAY-{}-{}", timestamp, short_id.to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn valid_card() -> CardDetails {
        CardDetails {
            number: "1234567812345678".to_string(),
            expiry: "12/25".to_string(),
            cvv: "123".to_string(),
        }
    }

    #[test]
    fn test_simulated_gateway_accepts_positive_amounts() {
        let gateway = SimulatedGateway;
        assert_eq!(gateway.charge(dec!(24.778)).unwrap(), PaymentStatus::Succeeded);
    }

    #[test]
    fn test_simulated_gateway_declines_non_positive_amounts() {
        let gateway = SimulatedGateway;
        assert_eq!(gateway.charge(Decimal::ZERO).unwrap(), PaymentStatus::Declined);
        assert_eq!(gateway.charge(dec!(-5)).unwrap(), PaymentStatus::Declined);
    }

    #[test]
    fn test_method_allow_list() {
        assert_eq!(
            PaymentMethodKind::parse("credit_card").unwrap(),
            PaymentMethodKind::CreditCard
        );
        assert!(matches!(
            PaymentMethodKind::parse("bitcoin"),
            Err(PaymentError::UnsupportedMethod(_))
        ));
    }

    #[test]
    fn test_card_detail_validation() {
        assert!(PaymentProcessor::validate_card_details(&valid_card()).is_ok());

        let mut card = valid_card();
        card.number = "1234".to_string();
        assert!(matches!(
            PaymentProcessor::validate_card_details(&card),
            Err(PaymentError::InvalidCardNumber)
        ));

        let mut card = valid_card();
        card.expiry = "13/25".to_string();
        assert!(matches!(
            PaymentProcessor::validate_card_details(&card),
            Err(PaymentError::InvalidExpiryDate)
        ));

        let mut card = valid_card();
        card.cvv = "12".to_string();
        assert!(matches!(
            PaymentProcessor::validate_card_details(&card),
            Err(PaymentError::InvalidCvv)
        ));
    }

    #[test]
    fn test_process_credit_card_payment() {
        let gateway = SimulatedGateway;
        let processor = PaymentProcessor::new(&gateway);

        let receipt = processor
            .process("credit_card", dec!(100.00), &PaymentInstrument::Card(valid_card()))
            .unwrap();

        assert_eq!(receipt.status, PaymentStatus::Succeeded);
        assert_eq!(receipt.method, PaymentMethodKind::CreditCard);
        assert!(receipt.id.starts_with("PAY-"));
    }

    #[test]
    fn test_process_paypal_payment() {
        let gateway = SimulatedGateway;
        let processor = PaymentProcessor::new(&gateway);

        let receipt = processor
            .process(
                "paypal",
                dec!(42.50),
                &PaymentInstrument::PaypalAccount("buyer@example.com".to_string()),
            )
            .unwrap();

        assert_eq!(receipt.status, PaymentStatus::Succeeded);
    }

    #[test]
    fn test_process_rejects_unknown_method() {
        let gateway = SimulatedGateway;
        let processor = PaymentProcessor::new(&gateway);

        let result = processor.process(
            "bitcoin",
            dec!(100.00),
            &PaymentInstrument::Card(valid_card()),
        );
        assert!(matches!(result, Err(PaymentError::UnsupportedMethod(_))));
    }

    #[test]
    fn test_apple_pay_has_no_processor() {
        let gateway = SimulatedGateway;
        let processor = PaymentProcessor::new(&gateway);

        let result = processor.process(
            "apple_pay",
            dec!(10.00),
            &PaymentInstrument::Card(valid_card()),
        );
        assert!(matches!(
            result,
            Err(PaymentError::InstrumentMismatch(PaymentMethodKind::ApplePay))
        ));
    }

    #[test]
    fn test_declined_charge_surfaces_as_error() {
        let gateway = SimulatedGateway;
        let processor = PaymentProcessor::new(&gateway);

        let result = processor.process(
            "paypal",
            Decimal::ZERO,
            &PaymentInstrument::PaypalAccount("buyer@example.com".to_string()),
        );
        assert!(matches!(result, Err(PaymentError::Declined(_))));
    }
}
