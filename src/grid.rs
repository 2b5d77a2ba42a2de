//! Grid Sizing
//!
//! Resolves prediction counts to the allowed square grid sizes and pads
//! loaded cards up to them.

use crate::models::Prediction;

/// Grid sizes a card may render at, smallest first. All perfect squares.
pub const ALLOWED_COUNTS: [usize; 3] = [9, 16, 25];

/// Smallest allowed count `>= n`, or the largest allowed count when `n`
/// exceeds it. Pure; both the editor and the viewer derive row/cell counts
/// from this so the two views agree for a given record.
pub fn resolve_count(n: usize) -> usize {
    ALLOWED_COUNTS
        .iter()
        .copied()
        .find(|&allowed| allowed >= n)
        .unwrap_or(ALLOWED_COUNTS[ALLOWED_COUNTS.len() - 1])
}

/// Number of grid columns for `n` cells: the rounded square root, at least 1.
/// Exact for the allowed counts; oversized cards get the nearest square.
pub fn columns(n: usize) -> usize {
    ((n as f64).sqrt().round() as usize).max(1)
}

/// Pad a loaded prediction list with blank unmarked cells up to the resolved
/// count. Already-allowed lengths pass through, and oversized lists are left
/// alone rather than truncated, so no stored prediction is ever dropped by
/// the viewer.
pub fn pad_predictions(predictions: &mut Vec<Prediction>) {
    let len = predictions.len();
    if ALLOWED_COUNTS.contains(&len) {
        return;
    }
    let target = resolve_count(len);
    while predictions.len() < target {
        predictions.push(Prediction::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TriState;

    #[test]
    fn resolves_smallest_allowed_count() {
        for (n, expected) in [
            (0, 9),
            (1, 9),
            (9, 9),
            (10, 16),
            (16, 16),
            (17, 25),
            (25, 25),
            (26, 25),
            (100, 25),
        ] {
            assert_eq!(resolve_count(n), expected, "resolve_count({n})");
        }
    }

    #[test]
    fn columns_are_square_roots() {
        assert_eq!(columns(9), 3);
        assert_eq!(columns(16), 4);
        assert_eq!(columns(25), 5);
        assert_eq!(columns(0), 1);
    }

    #[test]
    fn pads_short_card_with_blank_cells() {
        let mut preds: Vec<Prediction> = (0..5)
            .map(|i| Prediction::new(format!("p{i}"), ""))
            .collect();
        pad_predictions(&mut preds);

        assert_eq!(preds.len(), 9);
        for p in &preds[..5] {
            assert!(!p.name.is_empty());
        }
        for p in &preds[5..] {
            assert_eq!(p.name, "");
            assert_eq!(p.description, "");
            assert_eq!(p.state, TriState::Unmarked);
        }
    }

    #[test]
    fn allowed_counts_pass_through() {
        let mut preds = vec![Prediction::default(); 16];
        pad_predictions(&mut preds);
        assert_eq!(preds.len(), 16);
    }

    #[test]
    fn oversized_card_is_not_truncated() {
        let mut preds = vec![Prediction::default(); 30];
        pad_predictions(&mut preds);
        assert_eq!(preds.len(), 30);
    }
}
