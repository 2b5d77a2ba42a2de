//! Editor Form Rows
//!
//! Row model behind the card editor: a 1:1 mapping between form row index
//! and prediction index, independent of the DOM.

use crate::grid;
use crate::models::Prediction;

pub const MIN_ROWS: usize = 1;
pub const MAX_ROWS: usize = 128;
/// Row count the editor starts with.
pub const DEFAULT_COUNT: usize = 16;

/// One editable row: prediction name and description.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PredictionRow {
    pub name: String,
    pub description: String,
}

/// The editor's working set of rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRows {
    rows: Vec<PredictionRow>,
}

impl FormRows {
    pub fn with_count(n: usize) -> Self {
        let mut form = Self { rows: Vec::new() };
        form.generate_rows(n);
        form
    }

    pub fn rows(&self) -> &[PredictionRow] {
        &self.rows
    }

    /// Resize to `n` rows (clamped to `MIN_ROWS..=MAX_ROWS`). Values in rows
    /// whose index survives are preserved; new rows start blank, removed
    /// rows are discarded.
    pub fn generate_rows(&mut self, n: usize) {
        let n = n.clamp(MIN_ROWS, MAX_ROWS);
        self.rows.resize_with(n, PredictionRow::default);
    }

    pub fn set_name(&mut self, index: usize, value: String) {
        if let Some(row) = self.rows.get_mut(index) {
            row.name = value;
        }
    }

    pub fn set_description(&mut self, index: usize, value: String) {
        if let Some(row) = self.rows.get_mut(index) {
            row.description = value;
        }
    }

    /// Emit exactly one prediction per row, whitespace-trimmed. Empty rows
    /// stay in the output as empty strings, never omitted.
    pub fn read_predictions(&self) -> Vec<Prediction> {
        self.rows
            .iter()
            .map(|row| Prediction::new(row.name.trim(), row.description.trim()))
            .collect()
    }

    /// Fill rows from a loaded card: every row is cleared, then the first
    /// `min(len, preds)` rows take the stored values. Excess predictions
    /// beyond the current row count are dropped from the form.
    pub fn populate(&mut self, predictions: &[Prediction]) {
        for row in &mut self.rows {
            *row = PredictionRow::default();
        }
        for (row, pred) in self.rows.iter_mut().zip(predictions) {
            row.name = pred.name.clone();
            row.description = pred.description.clone();
        }
    }
}

impl Default for FormRows {
    fn default() -> Self {
        Self::with_count(DEFAULT_COUNT)
    }
}

/// Row count to switch the editor to when loading `preds_len` predictions
/// into a form currently showing `current` rows: grow to the resolved
/// allowed count when the card does not fit, otherwise keep the current
/// count.
pub fn populate_target(current: usize, preds_len: usize) -> usize {
    if preds_len > current {
        grid::resolve_count(preds_len)
    } else {
        current
    }
}
