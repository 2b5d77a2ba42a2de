//! List Page Component
//!
//! Fetches the card summaries and shows View / Edit / Download actions per
//! card.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::export;
use crate::models::CardSummary;
use crate::router;

#[component]
pub fn ListPage() -> impl IntoView {
    let (cards, set_cards) = signal(Vec::<CardSummary>::new());
    let (message, set_message) = signal(String::from("Loading cards..."));

    Effect::new(move |_| {
        spawn_local(async move {
            match api::list_cards().await {
                Ok(loaded) => {
                    if loaded.is_empty() {
                        set_message.set("No cards found.".to_string());
                    } else {
                        set_message.set(String::new());
                    }
                    set_cards.set(loaded);
                }
                Err(e) => set_message.set(format!("Failed to load cards: {e}")),
            }
        });
    });

    let download = move |id: String| {
        spawn_local(async move {
            if let Err(e) = export::download_card_json(&id).await {
                set_message.set(format!("Download failed: {e}"));
            }
        });
    };

    view! {
        <section class="card-list">
            <Show when=move || !message.get().is_empty()>
                <p class="list-message">{move || message.get()}</p>
            </Show>
            {move || cards.get().into_iter().map(|card| {
                let display = if card.name.is_empty() {
                    "(unnamed)".to_string()
                } else {
                    card.name.clone()
                };
                let download_id = card.id.clone();
                view! {
                    <div class="list-item">
                        <div class="list-item-title">
                            <div>{display}</div>
                            <div class="muted">{format!("{} items", card.count)}</div>
                        </div>
                        <div class="list-item-actions">
                            <a class="btn secondary" href=router::view_href(&card.id)>"View"</a>
                            <a class="btn secondary" href=router::edit_href(&card.id)>"Edit"</a>
                            <button class="btn secondary" on:click=move |_| download(download_id.clone())>
                                "Download"
                            </button>
                        </div>
                    </div>
                }
            }).collect_view()}
        </section>
    }
}
