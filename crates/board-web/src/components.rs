//! UI Components

use leptos::prelude::*;

use crate::live::{self, LiveState};

/// One live-view page: a heading plus the literal JSON dump of one
/// collection, kept current by its subscription.
#[component]
pub fn LiveView(title: &'static str, collection: &'static str) -> impl IntoView {
    let state = live::use_collection(collection);

    view! {
        <section class="live-view">
            <h2>{title} " (Live Data)"</h2>
            <LiveDump state=state />
        </section>
    }
}

/// Renders the current feed state: loading, a fixed failure message, or
/// the pretty-printed document list.
#[component]
pub fn LiveDump(state: ReadSignal<LiveState>) -> impl IntoView {
    move || match state.get() {
        LiveState::Loading => view! { <p class="loading">"Loading..."</p> }.into_any(),
        LiveState::Failed(message) => view! { <p class="error">{message}</p> }.into_any(),
        LiveState::Ready(documents) => {
            let text = serde_json::to_string_pretty(&documents).unwrap_or_default();
            view! { <pre class="dump">{text}</pre> }.into_any()
        }
    }
}
