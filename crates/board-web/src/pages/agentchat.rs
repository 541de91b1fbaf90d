//! Agent Chat Page

use leptos::prelude::*;

use crate::components::LiveView;

#[component]
pub fn AgentChatPage() -> impl IntoView {
    view! { <LiveView title="Agent Chat" collection="agentchat" /> }
}
