//! Live Collection Subscriptions
//!
//! Each live-view page owns exactly one [`LiveQuery`]: an EventSource on
//! the collection's snapshot stream. Every delivered frame carries the
//! whole document list, and the page replaces its state with it; nothing
//! is merged client-side.

use leptos::prelude::*;
use send_wrapper::SendWrapper;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{EventSource, MessageEvent};

/// Fixed message shown when the feed breaks.
pub const LOAD_FAILED: &str = "Failed to load data.";

/// What a live view currently shows.
#[derive(Clone, Debug, PartialEq)]
pub enum LiveState {
    /// Subscribed, nothing delivered yet.
    Loading,
    /// The latest snapshot's documents, in store order.
    Ready(Vec<serde_json::Value>),
    /// The feed failed; the view is no longer loading.
    Failed(&'static str),
}

/// Owned handle on one collection's snapshot feed.
///
/// Holds the EventSource and its callbacks. Releasing closes the source
/// and drops the callbacks, so no late frame can touch the page; release
/// is idempotent, and dropping the handle releases it.
pub struct LiveQuery {
    source: Option<EventSource>,
    on_message: Option<Closure<dyn FnMut(MessageEvent)>>,
    on_error: Option<Closure<dyn FnMut(web_sys::Event)>>,
}

impl LiveQuery {
    /// Subscribe to a collection's snapshot stream.
    pub fn open(collection: &str, set_state: WriteSignal<LiveState>) -> Self {
        let url = format!("/api/collections/{collection}/stream");
        let Ok(source) = EventSource::new(&url) else {
            set_state.set(LiveState::Failed(LOAD_FAILED));
            return Self {
                source: None,
                on_message: None,
                on_error: None,
            };
        };

        let on_message = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
            let payload = event.data().as_string().unwrap_or_default();
            match parse_snapshot(&payload) {
                Ok(documents) => set_state.set(LiveState::Ready(documents)),
                Err(_) => set_state.set(LiveState::Failed(LOAD_FAILED)),
            }
        });
        let on_error = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
            set_state.set(LiveState::Failed(LOAD_FAILED));
        });

        source.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        source.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        Self {
            source: Some(source),
            on_message: Some(on_message),
            on_error: Some(on_error),
        }
    }

    /// Close the feed. Safe to call more than once.
    pub fn release(&mut self) {
        if let Some(source) = self.source.take() {
            source.set_onmessage(None);
            source.set_onerror(None);
            source.close();
        }
        self.on_message = None;
        self.on_error = None;
    }
}

impl Drop for LiveQuery {
    fn drop(&mut self) {
        self.release();
    }
}

/// A frame is the whole document list; the previous state is replaced,
/// never merged.
fn parse_snapshot(payload: &str) -> Result<Vec<serde_json::Value>, serde_json::Error> {
    serde_json::from_str(payload)
}

/// Subscribe for the lifetime of the calling component. The handle is
/// released exactly once, by the component's cleanup.
pub fn use_collection(collection: &'static str) -> ReadSignal<LiveState> {
    let (state, set_state) = signal(LiveState::Loading);
    let query = SendWrapper::new(LiveQuery::open(collection, set_state));
    on_cleanup(move || query.take().release());
    state
}

#[cfg(test)]
mod tests {
    use super::parse_snapshot;

    #[test]
    fn test_frame_is_whole_document_list() {
        let docs = parse_snapshot(r#"[{"id":"a","title":"x"},{"id":"b","title":"y"}]"#).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0]["id"], "a");
        assert_eq!(docs[1]["title"], "y");
    }

    #[test]
    fn test_bad_frame_is_an_error() {
        assert!(parse_snapshot("not json").is_err());
    }
}
