//! Card Grid Component
//!
//! Square grid of tri-state cells. A click cycles the cell and fires the
//! controller's optimistic write-back.

use leptos::prelude::*;

use crate::controller::CardController;
use crate::grid;

#[component]
pub fn CardGrid() -> impl IntoView {
    let ctrl = use_context::<CardController>().expect("CardController should be provided");

    let grid_style = move || {
        let cols = ctrl.predictions.with(|preds| grid::columns(preds.len()));
        format!("grid-template-columns: repeat({cols}, minmax(80px, 1fr)); grid-auto-rows: 1fr;")
    };

    view! {
        <div class="grid" style=grid_style>
            {move || ctrl.predictions.get().into_iter().enumerate().map(|(i, pred)| {
                let cell_class = format!("cell {}", pred.state.css_class());
                let label = if pred.name.is_empty() { "—".to_string() } else { pred.name.clone() };
                view! {
                    <div
                        class=cell_class
                        title=pred.description.clone()
                        on:click=move |_| ctrl.toggle_cell(i)
                    >
                        <div class="cell-name">{label}</div>
                        <div class="state">{pred.state.glyph()}</div>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
