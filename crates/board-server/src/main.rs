//! opsboard HTTP Server
//!
//! Axum-based server exposing the document collections (snapshot and live
//! SSE feed), the authenticated Stripe checkout endpoint, the Stripe
//! webhook, and the static WASM frontend.

mod auth;
mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use board_payments::StripeClient;
use board_store::MemoryStore;

use crate::auth::TokenTable;
use crate::handlers::{
    collection_snapshot, collection_stream, create_checkout, health_check, stripe_webhook,
};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    // Document store (in-memory stand-in for the hosted database)
    let store = Arc::new(MemoryStore::new());

    // Checkout callers
    let tokens = Arc::new(TokenTable::from_env());

    // Payments
    let stripe = StripeClient::from_env().ok();
    if stripe.is_some() {
        tracing::info!("✓ Stripe configured");
    } else {
        tracing::warn!("⚠ Stripe not configured - payments disabled");
        tracing::warn!("  Set STRIPE_SECRET_KEY, STRIPE_WEBHOOK_SECRET and STRIPE_PRICE_ID in .env");
    }

    let state = AppState {
        store,
        stripe: stripe.map(Arc::new),
        tokens,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health & info
        .route("/health", get(health_check))
        // Collections
        .route("/api/collections/{name}", get(collection_snapshot))
        .route("/api/collections/{name}/stream", get(collection_stream))
        // Payments
        .route("/api/checkout", post(create_checkout))
        .route("/webhook/stripe", post(stripe_webhook))
        // Static files (WASM frontend)
        .nest_service("/", tower_http::services::ServeDir::new("static"))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("opsboard server running on http://{}", addr);
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                          - Health check");
    tracing::info!("  GET  /api/collections/{{name}}          - Collection snapshot");
    tracing::info!("  GET  /api/collections/{{name}}/stream   - Live snapshot feed (SSE)");
    tracing::info!("  POST /api/checkout                    - Create Stripe checkout");
    tracing::info!("  POST /webhook/stripe                  - Stripe webhook");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
