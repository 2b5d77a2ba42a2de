//! Card Data Model
//!
//! Data structures matching the persistence API's JSON records.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One cell's mark: unmarked, confirmed true, or confirmed false.
///
/// On the wire this is `null` / `true` / `false`, kept compatible with the
/// backend schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriState {
    #[default]
    Unmarked,
    ConfirmedTrue,
    ConfirmedFalse,
}

impl TriState {
    /// Advance one step in the click cycle:
    /// unmarked -> confirmed-true -> confirmed-false -> unmarked.
    pub fn cycle(self) -> Self {
        match self {
            TriState::Unmarked => TriState::ConfirmedTrue,
            TriState::ConfirmedTrue => TriState::ConfirmedFalse,
            TriState::ConfirmedFalse => TriState::Unmarked,
        }
    }

    /// CSS class suffix used by the grid cells.
    pub fn css_class(self) -> &'static str {
        match self {
            TriState::Unmarked => "none",
            TriState::ConfirmedTrue => "true",
            TriState::ConfirmedFalse => "false",
        }
    }

    /// Glyph drawn in the cell's state badge; empty while unmarked.
    pub fn glyph(self) -> &'static str {
        match self {
            TriState::Unmarked => "",
            TriState::ConfirmedTrue => "✓",
            TriState::ConfirmedFalse => "✕",
        }
    }
}

impl Serialize for TriState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TriState::Unmarked => serializer.serialize_none(),
            TriState::ConfirmedTrue => serializer.serialize_bool(true),
            TriState::ConfirmedFalse => serializer.serialize_bool(false),
        }
    }
}

impl<'de> Deserialize<'de> for TriState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<bool>::deserialize(deserializer)? {
            Some(true) => TriState::ConfirmedTrue,
            Some(false) => TriState::ConfirmedFalse,
            None => TriState::Unmarked,
        })
    }
}

/// One grid cell: name, description, tri-state mark, free-text note.
///
/// The backend may send `null` for any field but `name`; those come back as
/// empty strings / `Unmarked` here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub state: TriState,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub note: String,
}

impl Prediction {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A stored card record (matches `GET /cards/:id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

/// One row of the card list (matches `GET /cards`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSummary {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub count: usize,
}

/// Request body for `POST /cards` and `PUT /cards/:id`: always the card
/// name plus the full prediction array, never a delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardPayload {
    pub name: String,
    pub predictions: Vec<Prediction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_has_period_three() {
        let sequence = [
            TriState::Unmarked,
            TriState::ConfirmedTrue,
            TriState::ConfirmedFalse,
        ];
        let mut state = TriState::Unmarked;
        for clicks in 1..=9 {
            state = state.cycle();
            assert_eq!(state, sequence[clicks % 3], "after {clicks} clicks");
        }
    }

    #[test]
    fn tri_state_serializes_as_nullable_bool() {
        let preds = vec![
            Prediction {
                state: TriState::Unmarked,
                ..Prediction::new("a", "")
            },
            Prediction {
                state: TriState::ConfirmedTrue,
                ..Prediction::new("b", "")
            },
            Prediction {
                state: TriState::ConfirmedFalse,
                ..Prediction::new("c", "")
            },
        ];
        let json = serde_json::to_string(&preds).unwrap();
        assert!(json.contains(r#""state":null"#));
        assert!(json.contains(r#""state":true"#));
        assert!(json.contains(r#""state":false"#));
    }

    #[test]
    fn missing_and_null_fields_default() {
        let p: Prediction = serde_json::from_str(r#"{"name":"rain in july"}"#).unwrap();
        assert_eq!(p.description, "");
        assert_eq!(p.state, TriState::Unmarked);
        assert_eq!(p.note, "");

        let p: Prediction =
            serde_json::from_str(r#"{"name":"x","description":null,"state":null,"note":null}"#)
                .unwrap();
        assert_eq!(p.description, "");
        assert_eq!(p.state, TriState::Unmarked);
        assert_eq!(p.note, "");
    }

    #[test]
    fn predictions_round_trip_element_wise() {
        let original = vec![
            Prediction {
                name: "first".into(),
                description: "details".into(),
                state: TriState::ConfirmedTrue,
                note: "came true in march".into(),
            },
            Prediction {
                name: String::new(),
                description: String::new(),
                state: TriState::Unmarked,
                note: String::new(),
            },
        ];
        let json = serde_json::to_string(&original).unwrap();
        let back: Vec<Prediction> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
    }
}
