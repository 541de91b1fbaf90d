//! Admin Page

use leptos::prelude::*;

use crate::components::LiveView;

#[component]
pub fn AdminPage() -> impl IntoView {
    view! { <LiveView title="Admin" collection="admin" /> }
}
