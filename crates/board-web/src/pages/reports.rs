//! Reports Page

use leptos::prelude::*;

use crate::components::LiveView;

#[component]
pub fn ReportsPage() -> impl IntoView {
    view! { <LiveView title="Reports" collection="reports" /> }
}
