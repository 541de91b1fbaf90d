//! Main App Component

use leptos::prelude::*;
use leptos_router::{components::*, path};

use crate::pages::{
    AdminPage, AgentChatPage, DashboardPage, FileHistoryPage, LandingPage, ReportsPage,
};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <nav class="nav">
                <a href="/">"Dashboard"</a>
                <a href="/admin">"Admin"</a>
                <a href="/reports">"Reports"</a>
                <a href="/agentchat">"Agent Chat"</a>
                <a href="/filehistory">"File History"</a>
                <a href="/welcome">"About"</a>
            </nav>
            <main class="app">
                <Routes fallback=|| view! { <p class="not-found">"Page not found"</p> }>
                    <Route path=path!("/") view=DashboardPage />
                    <Route path=path!("/admin") view=AdminPage />
                    <Route path=path!("/reports") view=ReportsPage />
                    <Route path=path!("/agentchat") view=AgentChatPage />
                    <Route path=path!("/filehistory") view=FileHistoryPage />
                    <Route path=path!("/welcome") view=LandingPage />
                </Routes>
            </main>
        </Router>
    }
}
