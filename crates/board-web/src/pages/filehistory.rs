//! File History Page

use leptos::prelude::*;

use crate::components::LiveView;

#[component]
pub fn FileHistoryPage() -> impl IntoView {
    view! { <LiveView title="File History" collection="filehistory" /> }
}
