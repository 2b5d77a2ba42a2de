//! Status Output Component
//!
//! Shared output area for validation messages and request outcomes.

use leptos::prelude::*;

#[component]
pub fn StatusOutput(#[prop(into)] status: Signal<String>) -> impl IntoView {
    view! { <pre class="out">{move || status.get()}</pre> }
}
