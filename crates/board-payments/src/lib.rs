//! # board-payments
//!
//! Stripe integration for opsboard: hosted checkout sessions and the
//! webhook that turns a completed checkout into a plan upgrade.
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────┐     ┌─────────────────┐     ┌──────────────────┐
//! │  Dashboard  │────▶│  Stripe Hosted  │────▶│  Webhook          │
//! │  (upgrade)  │     │  Checkout Page  │     │  → users/{uid}    │
//! └─────────────┘     └─────────────────┘     └──────────────────┘
//! ```
//!
//! The checkout side sells exactly one thing: the team subscription price
//! configured at startup. The caller's identity rides along as the
//! session's `client_reference_id`; when Stripe reports the checkout
//! completed, [`WebhookHandler`] merges the [`PlanUpgrade`] record into
//! that user's document. Every other webhook event is accepted and
//! ignored.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use board_payments::{CheckoutConfig, StripeClient};
//!
//! let client = StripeClient::from_env()?;
//! let session = client.create_checkout_session("u42").await?;
//! // Redirect the browser to: session.url
//! ```

mod checkout;
mod error;
mod plan;
mod webhook;

pub use checkout::{CheckoutConfig, CheckoutSession, StripeClient};
pub use error::{PaymentError, Result};
pub use plan::{Plan, PlanUpgrade};
pub use webhook::{BillingEvent, WebhookHandler};
