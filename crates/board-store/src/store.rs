//! Document Store and Subscriptions
//!
//! The [`DocumentStore`] trait is the seam between the dashboard and
//! whatever actually holds the documents. [`MemoryStore`] is the
//! in-process implementation used in development and tests.

use std::collections::HashMap;
use std::sync::RwLock;

use tokio::sync::broadcast;

use crate::collection::Collection;
use crate::document::{Document, Fields, Snapshot};
use crate::error::{Result, StoreError};

/// Per-collection snapshot channel capacity. A lagging subscriber skips
/// ahead to newer snapshots; snapshots are whole-state, so skipping loses
/// nothing a later snapshot doesn't restate.
const SNAPSHOT_BUFFER: usize = 16;

/// Storage seam: named collections of schemaless documents with live
/// whole-snapshot subscriptions.
pub trait DocumentStore: Send + Sync {
    /// Current full contents of a collection.
    fn snapshot(&self, collection: Collection) -> Result<Snapshot>;

    /// Create or replace a document.
    fn put(&self, collection: Collection, id: &str, fields: Fields) -> Result<()>;

    /// Upsert-merge: fields named by the patch are written, existing
    /// fields not named by it are untouched. The document is created if
    /// it does not exist.
    fn merge(&self, collection: Collection, id: &str, patch: &Fields) -> Result<()>;

    /// Remove a document.
    fn delete(&self, collection: Collection, id: &str) -> Result<()>;

    /// Open a live subscription to a collection.
    fn subscribe(&self, collection: Collection) -> Result<Subscription>;
}

/// Owned handle to a live feed of whole-collection snapshots.
///
/// The collection's current contents arrive on the first [`next`] call;
/// after that, one snapshot per committed write. [`release`] stops
/// delivery and is idempotent; dropping the handle has the same effect,
/// so a store-side listener can never outlive its owner.
///
/// [`next`]: Subscription::next
/// [`release`]: Subscription::release
pub struct Subscription {
    collection: Collection,
    pending: Option<Snapshot>,
    rx: Option<broadcast::Receiver<Snapshot>>,
}

impl Subscription {
    /// The collection this subscription observes.
    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Wait for the next snapshot. Returns `None` once the subscription
    /// has been released or the store side has gone away.
    pub async fn next(&mut self) -> Option<Snapshot> {
        if let Some(initial) = self.pending.take() {
            return Some(initial);
        }

        let rx = self.rx.as_mut()?;
        loop {
            match rx.recv().await {
                Ok(snapshot) => return Some(snapshot),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(
                        collection = %self.collection,
                        skipped,
                        "subscriber lagged, catching up to newer snapshot"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Stop delivery. Safe to call more than once.
    pub fn release(&mut self) {
        self.pending = None;
        self.rx = None;
    }

    /// Whether [`release`](Subscription::release) has already run.
    pub fn is_released(&self) -> bool {
        self.rx.is_none() && self.pending.is_none()
    }
}

struct CollectionState {
    documents: Vec<Document>,
    tx: broadcast::Sender<Snapshot>,
}

impl CollectionState {
    fn current(&self, collection: Collection) -> Snapshot {
        Snapshot {
            collection,
            documents: self.documents.clone(),
        }
    }

    fn publish(&self, collection: Collection) {
        // No subscribers is fine.
        let _ = self.tx.send(self.current(collection));
    }
}

/// In-memory document store (for development and tests).
///
/// Stands in for the hosted document database: insertion order is the
/// delivered order, and every committed write fans out a fresh whole
/// snapshot to the collection's subscribers.
pub struct MemoryStore {
    collections: HashMap<Collection, RwLock<CollectionState>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        let collections = Collection::ALL
            .iter()
            .map(|&collection| {
                let (tx, _) = broadcast::channel(SNAPSHOT_BUFFER);
                (
                    collection,
                    RwLock::new(CollectionState {
                        documents: Vec::new(),
                        tx,
                    }),
                )
            })
            .collect();

        Self { collections }
    }

    /// Number of live subscriptions on a collection.
    pub fn listeners(&self, collection: Collection) -> usize {
        self.state(collection).read().unwrap().tx.receiver_count()
    }

    fn state(&self, collection: Collection) -> &RwLock<CollectionState> {
        // Every variant gets a state in `new`.
        &self.collections[&collection]
    }
}

impl DocumentStore for MemoryStore {
    fn snapshot(&self, collection: Collection) -> Result<Snapshot> {
        let state = self.state(collection).read().unwrap();
        Ok(state.current(collection))
    }

    fn put(&self, collection: Collection, id: &str, fields: Fields) -> Result<()> {
        let mut state = self.state(collection).write().unwrap();

        match state.documents.iter_mut().find(|doc| doc.id == id) {
            Some(doc) => doc.fields = fields,
            None => state.documents.push(Document::new(id, fields)),
        }

        state.publish(collection);
        Ok(())
    }

    fn merge(&self, collection: Collection, id: &str, patch: &Fields) -> Result<()> {
        let mut state = self.state(collection).write().unwrap();

        match state.documents.iter_mut().find(|doc| doc.id == id) {
            Some(doc) => doc.apply_merge(patch),
            None => {
                // Created implicitly on first merge.
                let mut doc = Document::new(id, Fields::new());
                doc.apply_merge(patch);
                state.documents.push(doc);
            }
        }

        state.publish(collection);
        Ok(())
    }

    fn delete(&self, collection: Collection, id: &str) -> Result<()> {
        let mut state = self.state(collection).write().unwrap();

        let before = state.documents.len();
        state.documents.retain(|doc| doc.id != id);
        if state.documents.len() == before {
            return Err(StoreError::NotFound {
                collection,
                id: id.to_string(),
            });
        }

        state.publish(collection);
        Ok(())
    }

    fn subscribe(&self, collection: Collection) -> Result<Subscription> {
        let state = self.state(collection).read().unwrap();

        Ok(Subscription {
            collection,
            pending: Some(state.current(collection)),
            rx: Some(state.tx.subscribe()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(value: serde_json::Value) -> Fields {
        value.as_object().unwrap().clone()
    }

    #[tokio::test]
    async fn test_subscription_delivers_current_contents_first() {
        let store = MemoryStore::new();
        store
            .put(Collection::Reports, "a", fields(serde_json::json!({"title": "x"})))
            .unwrap();

        let mut sub = store.subscribe(Collection::Reports).unwrap();
        let snapshot = sub.next().await.unwrap();

        assert_eq!(snapshot.documents.len(), 1);
        assert_eq!(snapshot.documents[0].id, "a");
    }

    #[tokio::test]
    async fn test_snapshots_replace_in_store_order() {
        let store = MemoryStore::new();
        let mut sub = store.subscribe(Collection::Reports).unwrap();
        assert!(sub.next().await.unwrap().documents.is_empty());

        store
            .put(Collection::Reports, "a", fields(serde_json::json!({"title": "x"})))
            .unwrap();
        store
            .put(Collection::Reports, "b", fields(serde_json::json!({"title": "y"})))
            .unwrap();

        // Skip the intermediate snapshot; the latest one is the whole state.
        sub.next().await.unwrap();
        let latest = sub.next().await.unwrap();

        let rendered = serde_json::to_value(&latest.documents).unwrap();
        assert_eq!(
            rendered,
            serde_json::json!([
                {"id": "a", "title": "x"},
                {"id": "b", "title": "y"},
            ])
        );
    }

    #[tokio::test]
    async fn test_put_replaces_whole_document() {
        let store = MemoryStore::new();
        store
            .put(Collection::Dashboard, "tile", fields(serde_json::json!({"status": "green", "note": "ok"})))
            .unwrap();
        store
            .put(Collection::Dashboard, "tile", fields(serde_json::json!({"status": "red"})))
            .unwrap();

        let snapshot = store.snapshot(Collection::Dashboard).unwrap();
        assert_eq!(snapshot.documents.len(), 1);
        assert_eq!(snapshot.documents[0].fields["status"], "red");
        assert!(!snapshot.documents[0].fields.contains_key("note"));
    }

    #[tokio::test]
    async fn test_merge_creates_then_preserves_unrelated_fields() {
        let store = MemoryStore::new();
        store
            .put(Collection::Users, "u42", fields(serde_json::json!({"name": "Ada"})))
            .unwrap();

        let patch = fields(serde_json::json!({"plan": "team", "commands_limit": 1000}));
        store.merge(Collection::Users, "u42", &patch).unwrap();
        // Repeated merge of the same patch is a no-op on the final state.
        store.merge(Collection::Users, "u42", &patch).unwrap();

        let snapshot = store.snapshot(Collection::Users).unwrap();
        assert_eq!(snapshot.documents.len(), 1);
        let doc = &snapshot.documents[0];
        assert_eq!(doc.fields["name"], "Ada");
        assert_eq!(doc.fields["plan"], "team");
        assert_eq!(doc.fields["commands_limit"], 1000);
    }

    #[tokio::test]
    async fn test_release_stops_delivery() {
        let store = MemoryStore::new();
        let mut sub = store.subscribe(Collection::AgentChat).unwrap();
        assert_eq!(store.listeners(Collection::AgentChat), 1);

        sub.release();
        sub.release();
        assert!(sub.is_released());
        assert_eq!(store.listeners(Collection::AgentChat), 0);

        store
            .put(Collection::AgentChat, "m1", fields(serde_json::json!({"text": "hi"})))
            .unwrap();
        assert!(sub.next().await.is_none());
    }

    #[tokio::test]
    async fn test_drop_releases_listener() {
        let store = MemoryStore::new();
        let sub = store.subscribe(Collection::Admin).unwrap();
        assert_eq!(store.listeners(Collection::Admin), 1);

        drop(sub);
        assert_eq!(store.listeners(Collection::Admin), 0);
    }

    #[tokio::test]
    async fn test_independent_subscriptions_do_not_interact() {
        let store = MemoryStore::new();
        let mut reports = store.subscribe(Collection::Reports).unwrap();
        let mut history = store.subscribe(Collection::FileHistory).unwrap();
        reports.next().await.unwrap();
        history.next().await.unwrap();

        store
            .put(Collection::Reports, "r1", fields(serde_json::json!({"title": "q3"})))
            .unwrap();

        let snapshot = reports.next().await.unwrap();
        assert_eq!(snapshot.collection, Collection::Reports);
        assert_eq!(store.snapshot(Collection::FileHistory).unwrap().documents.len(), 0);
    }

    #[test]
    fn test_delete_missing_document() {
        let store = MemoryStore::new();
        let err = store.delete(Collection::Reports, "ghost").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { id, .. } if id == "ghost"));
    }
}
