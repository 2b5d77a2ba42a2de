//! Editor Page Component
//!
//! Create/update form: card name, grid size selector, and one name +
//! description row per prediction.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::api;
use crate::components::{CountSelector, StatusOutput};
use crate::form::{self, FormRows};
use crate::models::CardPayload;
use crate::router;

#[component]
pub fn EditorPage(id: Option<String>) -> impl IntoView {
    let (card_id, set_card_id) = signal(String::new());
    let (card_name, set_card_name) = signal(String::new());
    let (count, set_count) = signal(form::DEFAULT_COUNT);
    let rows = RwSignal::new(FormRows::default());
    let status = RwSignal::new(String::new());

    // Preload when arriving with ?id=
    Effect::new(move |_| {
        let Some(id) = id.clone() else {
            return;
        };
        spawn_local(async move {
            match api::fetch_card(&id).await {
                Ok(card) => {
                    set_card_id.set(card.id.clone());
                    set_card_name.set(card.name.clone());
                    let target =
                        form::populate_target(count.get_untracked(), card.predictions.len());
                    set_count.set(target);
                    rows.update(|r| {
                        r.generate_rows(target);
                        r.populate(&card.predictions);
                    });
                    status.set(format!("Loaded card {} for editing", card.id));
                }
                Err(e) => status.set(format!("Failed to load: {e}")),
            }
        });
    });

    let change_count = move |n: usize| {
        set_count.set(n);
        rows.update(|r| r.generate_rows(n));
    };

    let create = move |_| {
        let name = card_name.get().trim().to_string();
        if name.is_empty() {
            status.set("Provide a card name".to_string());
            return;
        }
        let payload = CardPayload {
            name,
            predictions: rows.with_untracked(|r| r.read_predictions()),
        };
        spawn_local(async move {
            match api::create_card(&payload).await {
                Ok(card) => router::navigate(&router::view_href(&card.id)),
                Err(e) => status.set(format!("Create failed: {e}")),
            }
        });
    };

    let update = move |_| {
        let id = card_id.get().trim().to_string();
        if id.is_empty() {
            status.set("Provide card id.".to_string());
            return;
        }
        let name = card_name.get().trim().to_string();
        if name.is_empty() {
            status.set("Provide a card name".to_string());
            return;
        }
        let payload = CardPayload {
            name,
            predictions: rows.with_untracked(|r| r.read_predictions()),
        };
        spawn_local(async move {
            match api::update_card(&id, &payload).await {
                Ok(_) => router::navigate(&router::view_href(&id)),
                Err(e) => status.set(format!("Save failed: {e}")),
            }
        });
    };

    view! {
        <section class="editor">
            <div class="editor-header">
                <input
                    type="text"
                    class="card-name"
                    placeholder="Card name"
                    prop:value=move || card_name.get()
                    on:input=move |ev| {
                        let target = ev.target().unwrap();
                        let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                        set_card_name.set(input.value());
                    }
                />
                <CountSelector count=count on_change=change_count />
            </div>

            <div class="pred-rows">
                {move || rows.with(|r| r.rows().to_vec()).into_iter().enumerate().map(|(i, row)| {
                    view! {
                        <div class="pred-row">
                            <input
                                type="text"
                                class="pred-name"
                                placeholder=format!("Name {}", i + 1)
                                prop:value=row.name.clone()
                                on:input=move |ev| {
                                    let target = ev.target().unwrap();
                                    let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                                    // keep the working copy current without
                                    // rebuilding the row list under the caret
                                    rows.update_untracked(|r| r.set_name(i, input.value()));
                                }
                            />
                            <input
                                type="text"
                                class="pred-desc"
                                placeholder="Description (optional)"
                                prop:value=row.description.clone()
                                on:input=move |ev| {
                                    let target = ev.target().unwrap();
                                    let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                                    rows.update_untracked(|r| r.set_description(i, input.value()));
                                }
                            />
                        </div>
                    }
                }).collect_view()}
            </div>

            <div class="editor-actions">
                <button class="btn" on:click=create>"Create"</button>
                <button class="btn" on:click=update>"Update"</button>
            </div>

            <StatusOutput status=status />
        </section>
    }
}
