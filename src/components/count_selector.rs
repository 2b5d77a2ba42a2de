//! Count Selector Component
//!
//! Buttons for the allowed grid sizes.

use leptos::prelude::*;

use crate::grid::{self, ALLOWED_COUNTS};

#[component]
pub fn CountSelector(
    #[prop(into)] count: Signal<usize>,
    on_change: impl Fn(usize) + Copy + 'static,
) -> impl IntoView {
    view! {
        <div class="count-selector">
            {ALLOWED_COUNTS.iter().map(|&value| {
                let side = grid::columns(value);
                let is_selected = move || count.get() == value;
                view! {
                    <button
                        type="button"
                        class=move || if is_selected() { "count-btn active" } else { "count-btn" }
                        on:click=move |_| on_change(value)
                    >
                        {format!("{value} ({side}x{side})")}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
