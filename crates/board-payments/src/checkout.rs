//! Stripe Checkout Integration
//!
//! Implements the hosted-checkout approach: the browser is redirected to
//! Stripe's checkout page for the single configured subscription price.

use serde::{Deserialize, Serialize};
use stripe::{
    CheckoutSession as StripeCheckoutSession, CheckoutSessionMode, Client,
    CreateCheckoutSession, CreateCheckoutSessionLineItems,
    CreateCheckoutSessionPaymentMethodTypes,
};

use crate::error::{PaymentError, Result};

/// Fixed parameters of the hosted checkout flow.
#[derive(Clone, Debug)]
pub struct CheckoutConfig {
    /// Stripe price id of the team subscription.
    pub price_id: String,

    /// Where Stripe sends the browser after payment.
    pub success_url: String,

    /// Where Stripe sends the browser when checkout is abandoned.
    pub cancel_url: String,
}

/// Stripe client wrapper
pub struct StripeClient {
    client: Client,
    webhook_secret: String,
    config: CheckoutConfig,
}

impl StripeClient {
    /// Create a new Stripe client
    pub fn new(secret_key: &str, webhook_secret: &str, config: CheckoutConfig) -> Self {
        Self {
            client: Client::new(secret_key),
            webhook_secret: webhook_secret.to_string(),
            config,
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let secret_key = std::env::var("STRIPE_SECRET_KEY")
            .map_err(|_| PaymentError::Config("STRIPE_SECRET_KEY not set".into()))?;
        let webhook_secret = std::env::var("STRIPE_WEBHOOK_SECRET")
            .map_err(|_| PaymentError::Config("STRIPE_WEBHOOK_SECRET not set".into()))?;
        let price_id = std::env::var("STRIPE_PRICE_ID")
            .map_err(|_| PaymentError::Config("STRIPE_PRICE_ID not set".into()))?;

        let success_url = std::env::var("CHECKOUT_SUCCESS_URL")
            .unwrap_or_else(|_| "https://opsboard.example/success".into());
        let cancel_url = std::env::var("CHECKOUT_CANCEL_URL")
            .unwrap_or_else(|_| "https://opsboard.example/cancel".into());

        Ok(Self::new(
            &secret_key,
            &webhook_secret,
            CheckoutConfig {
                price_id,
                success_url,
                cancel_url,
            },
        ))
    }

    /// Get the webhook secret
    pub fn webhook_secret(&self) -> &str {
        &self.webhook_secret
    }

    /// Create a hosted checkout session for the team subscription.
    ///
    /// The caller's identity becomes the session's `client_reference_id`
    /// (and rides along in metadata), which is how the completed-checkout
    /// webhook finds the user document to upgrade.
    pub async fn create_checkout_session(&self, user_id: &str) -> Result<CheckoutSession> {
        let mut params = CreateCheckoutSession::new();
        params.mode = Some(CheckoutSessionMode::Subscription);
        params.payment_method_types = Some(vec![CreateCheckoutSessionPaymentMethodTypes::Card]);
        params.success_url = Some(&self.config.success_url);
        params.cancel_url = Some(&self.config.cancel_url);
        params.client_reference_id = Some(user_id);

        params.line_items = Some(vec![CreateCheckoutSessionLineItems {
            price: Some(self.config.price_id.clone()),
            quantity: Some(1),
            ..Default::default()
        }]);

        let mut metadata = std::collections::HashMap::new();
        metadata.insert("user_id".to_string(), user_id.to_string());
        params.metadata = Some(metadata);

        let session = StripeCheckoutSession::create(&self.client, params)
            .await
            .map_err(|e| PaymentError::Stripe(e.to_string()))?;

        let url = session
            .url
            .ok_or_else(|| PaymentError::Stripe("No checkout URL returned".into()))?;

        Ok(CheckoutSession {
            id: session.id.to_string(),
            url,
        })
    }
}

/// Result of creating a checkout session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Stripe session ID
    pub id: String,

    /// Hosted checkout URL to redirect the browser to
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_holds_webhook_secret() {
        let client = StripeClient::new(
            "sk_test_xxx",
            "whsec_xxx",
            CheckoutConfig {
                price_id: "price_team".into(),
                success_url: "https://opsboard.example/success".into(),
                cancel_url: "https://opsboard.example/cancel".into(),
            },
        );
        assert_eq!(client.webhook_secret(), "whsec_xxx");
    }
}
