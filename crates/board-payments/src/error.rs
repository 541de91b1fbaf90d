//! Payment Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Payment-related errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Stripe API error
    #[error("Stripe error: {0}")]
    Stripe(String),

    /// Webhook signature verification failed
    #[error("Webhook signature invalid: {0}")]
    WebhookSignature(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document-store write failed
    #[error("Store error: {0}")]
    Store(#[from] board_store::StoreError),
}

impl PaymentError {
    /// User-facing message. Stripe failures are deliberately masked: the
    /// caller never sees vendor error detail.
    pub fn user_message(&self) -> &str {
        match self {
            PaymentError::Stripe(_) => "Unable to create checkout session.",
            PaymentError::Config(_) => "Service configuration error.",
            _ => "An error occurred processing your request.",
        }
    }
}
