//! HTTP Handlers

use std::convert::Infallible;
use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use serde::Serialize;

use board_payments::WebhookHandler;
use board_store::{Collection, Document, DocumentStore};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub stripe_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub session_id: String,
    pub url: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>, code: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
        }),
    )
}

fn parse_collection(name: &str) -> Result<Collection, ApiError> {
    Collection::from_str(name)
        .map_err(|e| api_error(StatusCode::NOT_FOUND, e.to_string(), "UNKNOWN_COLLECTION"))
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        stripe_configured: state.stripe.is_some(),
    })
}

/// One-shot snapshot of a collection's current documents.
pub async fn collection_snapshot(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let collection = parse_collection(&name)?;

    let snapshot = state.store.snapshot(collection).map_err(|e| {
        tracing::error!("Snapshot error: {}", e);
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to load data.",
            "STORE_ERROR",
        )
    })?;

    Ok(Json(snapshot.documents))
}

/// Live feed of a collection: one SSE message per snapshot, each carrying
/// the whole document list, current contents first. Dropping the
/// connection releases the store-side listener with the stream.
pub async fn collection_stream(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let collection = parse_collection(&name)?;

    let subscription = state.store.subscribe(collection).map_err(|e| {
        tracing::error!("Subscribe error: {}", e);
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to load data.",
            "STORE_ERROR",
        )
    })?;

    let stream = futures::stream::unfold(subscription, |mut subscription| async move {
        let snapshot = subscription.next().await?;
        let event = Event::default().json_data(&snapshot.documents).ok()?;
        Some((Ok::<_, Infallible>(event), subscription))
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

/// Create a Stripe checkout session for the authenticated caller.
pub async fn create_checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CheckoutResponse>, ApiError> {
    // Identity first: an unauthenticated caller never reaches the vendor.
    let user_id = state
        .tokens
        .identify(&headers)
        .ok_or_else(|| {
            api_error(
                StatusCode::UNAUTHORIZED,
                "User must be authenticated",
                "UNAUTHENTICATED",
            )
        })?
        .to_string();

    let stripe = state.stripe.as_ref().ok_or_else(|| {
        api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "Payments not configured",
            "PAYMENTS_DISABLED",
        )
    })?;

    let session = stripe.create_checkout_session(&user_id).await.map_err(|e| {
        tracing::error!("Checkout error: {}", e);
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            e.user_message(),
            "CHECKOUT_ERROR",
        )
    })?;

    Ok(Json(CheckoutResponse {
        session_id: session.id,
        url: session.url,
    }))
}

/// Stripe webhook handler.
///
/// A bad signature is a 400 carrying the verification failure reason and
/// changes nothing. Once the signature verifies, Stripe gets a 200 even
/// if the plan write fails: the write is best-effort, and the failure is
/// logged rather than surfaced.
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<StatusCode, ApiError> {
    let stripe = state.stripe.as_ref().ok_or_else(|| {
        api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "Payments not configured",
            "PAYMENTS_DISABLED",
        )
    })?;

    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            api_error(
                StatusCode::BAD_REQUEST,
                "Missing Stripe signature",
                "MISSING_SIGNATURE",
            )
        })?;

    let handler = WebhookHandler::new(state.store.clone());

    let event = handler
        .parse_event(&body, signature, stripe.webhook_secret())
        .map_err(|e| {
            tracing::warn!("Webhook signature failed: {}", e);
            api_error(
                StatusCode::BAD_REQUEST,
                format!("Webhook error: {e}"),
                "INVALID_SIGNATURE",
            )
        })?;

    if let Err(e) = handler.handle(&event) {
        tracing::error!("Webhook processing error: {}", e);
    }

    Ok(StatusCode::OK)
}
