//! Note List Component
//!
//! Numbered prediction list with one free-text note input per entry. Note
//! edits update the working copy immediately and persist after a quiet
//! period; blur saves immediately.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::controller::CardController;
use crate::debounce::{NoteDebouncer, NOTE_DEBOUNCE_MS};

#[component]
pub fn NoteList() -> impl IntoView {
    let ctrl = use_context::<CardController>().expect("CardController should be provided");
    // arena-stored local: the gloo timer handles are not Send
    let debouncer = StoredValue::new_local(NoteDebouncer::default());

    // drop pending timers when the page goes away
    on_cleanup(move || debouncer.with_value(|d| d.cancel_all()));

    view! {
        <div class="entries">
            {move || {
                ctrl.predictions.get().into_iter().enumerate().map(|(i, pred)| {
                    let display = if pred.name.is_empty() { "—".to_string() } else { pred.name.clone() };
                    view! {
                        <div class="list-item">
                            <div class="list-title">{format!("{}. {display}", i + 1)}</div>
                            <div class="desc">{pred.description.clone()}</div>
                            <input
                                type="text"
                                class="note"
                                placeholder="Add a short note..."
                                prop:value=pred.note.clone()
                                on:input=move |ev| {
                                    let target = ev.target().unwrap();
                                    let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                                    ctrl.edit_note(i, input.value());
                                    debouncer.with_value(|d| {
                                        d.schedule(i, NOTE_DEBOUNCE_MS, move || ctrl.dispatch_save())
                                    });
                                }
                                on:blur=move |_| {
                                    debouncer.with_value(|d| d.flush(i));
                                    ctrl.dispatch_save();
                                }
                            />
                        </div>
                    }
                }).collect_view()
            }}
        </div>
    }
}
