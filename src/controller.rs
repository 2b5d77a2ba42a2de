//! Viewer Controller
//!
//! Owns the viewer's in-memory working copy of a card. One controller is
//! constructed per page load and provided via context; every cell and note
//! interaction flows through it.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::grid;
use crate::models::{CardPayload, Prediction};

#[derive(Clone, Copy)]
pub struct CardController {
    pub card_id: RwSignal<Option<String>>,
    pub card_name: RwSignal<String>,
    pub predictions: RwSignal<Vec<Prediction>>,
    /// Status/output line shown under the grid.
    pub status: RwSignal<String>,
}

impl CardController {
    pub fn new() -> Self {
        Self {
            card_id: RwSignal::new(None),
            card_name: RwSignal::new(String::new()),
            predictions: RwSignal::new(Vec::new()),
            status: RwSignal::new(String::new()),
        }
    }

    /// Fetch a card and publish it as the working copy, padded up to an
    /// allowed grid size with blank cells.
    pub async fn load(self, id: &str) {
        let id = id.trim();
        if id.is_empty() {
            self.status.set("Provide card id".to_string());
            return;
        }
        match api::fetch_card(id).await {
            Ok(card) => {
                let mut predictions = card.predictions;
                grid::pad_predictions(&mut predictions);
                self.card_id.set(Some(card.id));
                self.card_name.set(card.name);
                self.predictions.set(predictions);
                self.status.set(format!("Loaded card {id}"));
            }
            Err(e) => self.status.set(format!("Failed to load: {e}")),
        }
    }

    /// Cycle one cell's tri-state and persist the whole card in the
    /// background. The UI updates first; the write-back is optimistic.
    pub fn toggle_cell(self, index: usize) {
        let mut changed = false;
        self.predictions.update(|preds| {
            if let Some(pred) = preds.get_mut(index) {
                pred.state = pred.state.cycle();
                changed = true;
            }
        });
        if changed {
            self.dispatch_save();
        }
    }

    /// Update a note in the working copy without notifying subscribers: the
    /// input element already shows the text, and rebuilding the note list
    /// mid-keystroke would drop focus. Persistence is the caller's debounce
    /// / blur handling.
    pub fn edit_note(self, index: usize, text: String) {
        self.predictions.update_untracked(|preds| {
            if let Some(pred) = preds.get_mut(index) {
                pred.note = text;
            }
        });
    }

    /// Replace the remote record with the full in-memory snapshot.
    pub async fn save(self) -> Result<(), String> {
        let Some(id) = self.card_id.get_untracked() else {
            return Err("No card loaded".to_string());
        };
        let payload = CardPayload {
            name: self.card_name.get_untracked(),
            predictions: self.predictions.get_untracked(),
        };
        api::update_card(&id, &payload).await.map(|_| ())
    }

    /// Fire-and-forget save policy: the UI keeps its optimistic state, a
    /// failed write-back is logged to the console and otherwise swallowed.
    /// Swap this out for a retrying or user-notified variant without
    /// touching call sites.
    pub fn dispatch_save(self) {
        if self.card_id.with_untracked(|id| id.is_none()) {
            return;
        }
        spawn_local(async move {
            if let Err(e) = self.save().await {
                web_sys::console::warn_1(&format!("[VIEW] background save failed: {e}").into());
            }
        });
    }
}

impl Default for CardController {
    fn default() -> Self {
        Self::new()
    }
}
