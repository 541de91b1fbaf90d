//! Landing Page
//!
//! The marketing page and its interactions: smooth in-page scrolling
//! offset for the sticky header, feature cards revealed once as they
//! scroll into view, and the upgrade button that sends the browser
//! through hosted checkout.

use leptos::prelude::*;
use send_wrapper::SendWrapper;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior,
    ScrollToOptions,
};

use crate::api;

/// Sticky header height compensated when scrolling to a section.
const HEADER_OFFSET: f64 = 80.0;

/// Fraction of a card that must be visible before it is revealed.
const REVEAL_THRESHOLD: f64 = 0.1;

/// Stand-in bearer token for the demo upgrade button. A signed-in user's
/// token belongs here; with the stand-in, the backend answers 401.
const PLACEHOLDER_TOKEN: &str = "YOUR_ID_TOKEN";

#[component]
pub fn LandingPage() -> impl IntoView {
    let (checkout_error, set_checkout_error) = signal(None::<String>);

    // The cards only exist after the view is mounted, so the observer is
    // installed from an effect and torn down with the page.
    let reveal: StoredValue<Option<SendWrapper<RevealOnScroll>>> = StoredValue::new(None);
    Effect::new(move |_| {
        if reveal.with_value(Option::is_none) {
            reveal.set_value(Some(SendWrapper::new(RevealOnScroll::install(
                ".feature-card",
            ))));
        }
    });
    on_cleanup(move || {
        if let Some(Some(handle)) = reveal.try_update_value(Option::take) {
            handle.take().release();
        }
    });

    let upgrade = move |_| {
        set_checkout_error.set(None);
        leptos::task::spawn_local(async move {
            match api::create_checkout(PLACEHOLDER_TOKEN).await {
                Ok(url) => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href(&url);
                    }
                }
                Err(message) => set_checkout_error.set(Some(message)),
            }
        });
    };

    view! {
        <div class="landing">
            <header class="hero" id="top">
                <h1>"opsboard"</h1>
                <p class="tagline">"One live view over everything your agents are doing"</p>
                <div class="nav-links">
                    <a href="#features" on:click=scroll_link("features")>"Features"</a>
                    <a href="#plans" on:click=scroll_link("plans")>"Plans"</a>
                </div>
            </header>

            <section class="features" id="features">
                <div class="feature-card">
                    <h3>"Live"</h3>
                    <p>"Every collection streams straight into the dashboard as it changes."</p>
                </div>
                <div class="feature-card">
                    <h3>"Unfiltered"</h3>
                    <p>"Raw documents, exactly as the store holds them."</p>
                </div>
                <div class="feature-card">
                    <h3>"Simple"</h3>
                    <p>"No setup beyond pointing it at your collections."</p>
                </div>
            </section>

            <section class="plans" id="plans">
                <h2>"Team plan"</h2>
                <p>"1000 commands per day, every dashboard, one subscription."</p>
                <button id="upgrade-button" class="btn btn-primary" on:click=upgrade>
                    "Upgrade"
                </button>
                <Show when=move || checkout_error.get().is_some()>
                    <p class="error">{move || checkout_error.get().unwrap_or_default()}</p>
                </Show>
            </section>
        </div>
    }
}

/// Smooth-scroll to a section, compensating for the sticky header.
fn scroll_link(target: &'static str) -> impl Fn(web_sys::MouseEvent) {
    move |event: web_sys::MouseEvent| {
        event.prevent_default();

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(section) = window
            .document()
            .and_then(|document| document.get_element_by_id(target))
        else {
            return;
        };
        let Ok(section) = section.dyn_into::<web_sys::HtmlElement>() else {
            return;
        };

        let options = ScrollToOptions::new();
        options.set_top(f64::from(section.offset_top()) - HEADER_OFFSET);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }
}

/// Reveals matching elements once as they cross the visibility threshold,
/// unobserving each element after its first reveal.
struct RevealOnScroll {
    observer: Option<IntersectionObserver>,
    callback: Option<Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>>,
}

impl RevealOnScroll {
    fn install(selector: &str) -> Self {
        let empty = Self {
            observer: None,
            callback: None,
        };
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return empty;
        };

        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if entry.is_intersecting() {
                        let target = entry.target();
                        let _ = target.class_list().add_1("visible");
                        observer.unobserve(&target);
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
        let Ok(observer) =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
        else {
            return empty;
        };

        if let Ok(cards) = document.query_selector_all(selector) {
            for index in 0..cards.length() {
                let Some(node) = cards.item(index) else {
                    continue;
                };
                if let Ok(element) = node.dyn_into::<web_sys::Element>() {
                    observer.observe(&element);
                }
            }
        }

        Self {
            observer: Some(observer),
            callback: Some(callback),
        }
    }

    fn release(mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
        self.callback = None;
    }
}
