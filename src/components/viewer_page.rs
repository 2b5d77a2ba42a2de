//! Viewer Page Component
//!
//! Loads a card by id, owns the page's `CardController`, and hosts the
//! grid, the note list, and the export actions.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{CardGrid, NoteList, StatusOutput};
use crate::controller::CardController;
use crate::export;
use crate::router;

#[component]
pub fn ViewerPage(id: Option<String>) -> impl IntoView {
    let ctrl = CardController::new();
    provide_context(ctrl);

    Effect::new(move |_| match id.clone() {
        Some(id) => {
            web_sys::console::log_1(&format!("[VIEW] loading card {id}").into());
            spawn_local(async move {
                ctrl.load(&id).await;
            });
        }
        None => ctrl.status.set("Provide card id".to_string()),
    });

    let export_image = move |_| {
        if ctrl.card_id.with_untracked(|id| id.is_none()) {
            ctrl.status.set("No card loaded".to_string());
            return;
        }
        let name = ctrl.card_name.get_untracked();
        let predictions = ctrl.predictions.get_untracked();
        if let Err(e) = export::export_image(&name, &predictions) {
            ctrl.status.set(e);
        }
    };

    let download_json = move |_| {
        let Some(id) = ctrl.card_id.get_untracked() else {
            ctrl.status.set("No card loaded".to_string());
            return;
        };
        spawn_local(async move {
            match export::download_card_json(&id).await {
                Ok(()) => ctrl.status.set(format!("Downloaded {id}")),
                Err(e) => ctrl.status.set(format!("Download failed: {e}")),
            }
        });
    };

    view! {
        <section class="viewer">
            <div class="viewer-header">
                <h2 class="card-name-display">{move || ctrl.card_name.get()}</h2>
                <div class="viewer-actions">
                    <button class="btn" on:click=export_image>"Export image"</button>
                    <button class="btn secondary" on:click=download_json>"Download JSON"</button>
                    {move || ctrl.card_id.get().map(|id| view! {
                        <a class="btn secondary" href=router::edit_href(&id)>"Edit"</a>
                    })}
                </div>
            </div>
            <CardGrid />
            <NoteList />
            <StatusOutput status=ctrl.status />
        </section>
    }
}
