pub mod payment;

/// Shared error taxonomy for the ordering engine.
///
/// Module-level errors in the other crates map into these four kinds so callers
/// can handle failures uniformly regardless of which subsystem raised them.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Payment declined: {0}")]
    PaymentDeclined(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
