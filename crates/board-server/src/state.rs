//! Application State

use std::sync::Arc;

use board_payments::StripeClient;
use board_store::MemoryStore;

use crate::auth::TokenTable;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Document store backing the live views and the plan upgrades
    pub store: Arc<MemoryStore>,

    /// Stripe client (optional - None if not configured)
    pub stripe: Option<Arc<StripeClient>>,

    /// Bearer-token identity table for the checkout endpoint
    pub tokens: Arc<TokenTable>,
}
