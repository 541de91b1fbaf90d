//! Dashboard Page

use leptos::prelude::*;

use crate::components::LiveView;

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! { <LiveView title="Dashboard" collection="dashboard" /> }
}
