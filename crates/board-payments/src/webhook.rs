//! Stripe Webhook Handling
//!
//! Verifies webhook signatures against the raw request body and applies
//! the plan upgrade when a hosted checkout completes.

use std::sync::Arc;

use board_store::{Collection, DocumentStore};
use stripe::{Event, EventObject, EventType, Webhook};

use crate::error::{PaymentError, Result};
use crate::plan::PlanUpgrade;

/// What the classifier made of a verified webhook event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BillingEvent {
    /// A hosted checkout finished; upgrade the referenced user.
    CheckoutCompleted {
        session_id: String,
        client_reference: Option<String>,
    },

    /// Accepted and deliberately ignored.
    Ignored { event_type: String },
}

/// Webhook handler
pub struct WebhookHandler<S: DocumentStore> {
    store: Arc<S>,
}

impl<S: DocumentStore> WebhookHandler<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Verify webhook signature and parse event
    pub fn parse_event(&self, payload: &str, signature: &str, secret: &str) -> Result<Event> {
        Webhook::construct_event(payload, signature, secret)
            .map_err(|e| PaymentError::WebhookSignature(e.to_string()))
    }

    /// Process a verified event.
    pub fn handle(&self, event: &Event) -> Result<BillingEvent> {
        let parsed = classify(event);

        match &parsed {
            BillingEvent::CheckoutCompleted {
                session_id,
                client_reference: Some(user_id),
            } => {
                self.upgrade_user(user_id)?;
                tracing::info!(
                    session_id = %session_id,
                    user_id = %user_id,
                    "applied plan upgrade"
                );
            }
            BillingEvent::CheckoutCompleted {
                session_id,
                client_reference: None,
            } => {
                tracing::warn!(
                    session_id = %session_id,
                    "checkout completed without a client reference, nothing to upgrade"
                );
            }
            BillingEvent::Ignored { event_type } => {
                tracing::debug!(event_type = %event_type, "ignoring webhook event");
            }
        }

        Ok(parsed)
    }

    /// Merge the team upgrade record into the user's document.
    ///
    /// Merging makes redelivery harmless: the same event applied twice
    /// lands on the same final state, and unrelated fields on the user
    /// document are untouched.
    pub fn upgrade_user(&self, user_id: &str) -> Result<()> {
        let patch = PlanUpgrade::team().to_fields();
        self.store.merge(Collection::Users, user_id, &patch)?;
        Ok(())
    }
}

fn classify(event: &Event) -> BillingEvent {
    match (&event.type_, &event.data.object) {
        (EventType::CheckoutSessionCompleted, EventObject::CheckoutSession(session)) => {
            BillingEvent::CheckoutCompleted {
                session_id: session.id.to_string(),
                client_reference: session.client_reference_id.clone(),
            }
        }
        (event_type, _) => BillingEvent::Ignored {
            event_type: format!("{event_type:?}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_store::{Fields, MemoryStore};

    fn fields(value: serde_json::Value) -> Fields {
        value.as_object().unwrap().clone()
    }

    fn sign(payload: &str, secret: &str) -> String {
        use hmac::{Hmac, Mac};
        use sha2::Sha256;

        let timestamp = chrono::Utc::now().timestamp();
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(format!("{timestamp}.{payload}").as_bytes());
        format!("t={timestamp},v1={}", hex::encode(mac.finalize().into_bytes()))
    }

    #[test]
    fn test_malformed_signature_header_rejected() {
        let handler = WebhookHandler::new(Arc::new(MemoryStore::new()));
        let err = handler
            .parse_event("{}", "not-a-signature", "whsec_test")
            .unwrap_err();
        assert!(matches!(err, PaymentError::WebhookSignature(_)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let handler = WebhookHandler::new(Arc::new(MemoryStore::new()));
        let payload = r#"{"type":"checkout.session.completed"}"#;
        let signature = sign(payload, "whsec_wrong");

        let err = handler
            .parse_event(payload, &signature, "whsec_right")
            .unwrap_err();
        assert!(matches!(err, PaymentError::WebhookSignature(_)));
    }

    #[test]
    fn test_upgrade_merges_idempotently() {
        let store = Arc::new(MemoryStore::new());
        store
            .put(
                Collection::Users,
                "u42",
                fields(serde_json::json!({"name": "Ada", "plan": "free"})),
            )
            .unwrap();

        let handler = WebhookHandler::new(store.clone());
        handler.upgrade_user("u42").unwrap();
        // Redelivered event: same final state, not an increment.
        handler.upgrade_user("u42").unwrap();

        let snapshot = store.snapshot(Collection::Users).unwrap();
        assert_eq!(snapshot.documents.len(), 1);
        let doc = &snapshot.documents[0];
        assert_eq!(doc.fields["name"], "Ada");
        assert_eq!(doc.fields["plan"], "team");
        assert_eq!(doc.fields["commands_limit"], 1000);
    }

    #[test]
    fn test_upgrade_creates_missing_user() {
        let store = Arc::new(MemoryStore::new());
        let handler = WebhookHandler::new(store.clone());

        handler.upgrade_user("fresh").unwrap();

        let snapshot = store.snapshot(Collection::Users).unwrap();
        assert_eq!(snapshot.documents[0].id, "fresh");
        assert_eq!(snapshot.documents[0].fields["plan"], "team");
    }
}
