//! Typed result rows flowing out of both retrieval legs.
//!
//! Structured rows and similarity rows share no fixed schema; a row is a
//! field map plus an explicit similarity score. Identity detection is a
//! method here so the merger never rummages through raw dictionaries.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names that can identify a row, scanned in order. The first one
/// present with a non-null value wins.
pub const IDENTITY_FIELDS: [&str; 5] = ["journey", "flight", "passenger", "loyalty", "generation"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    /// Cosine similarity in [-1, 1]; null for structured-query rows.
    #[serde(default)]
    pub score: Option<f64>,
}

impl ResultRow {
    pub fn structured(fields: Map<String, Value>) -> Self {
        Self { fields, score: None }
    }

    pub fn similarity(fields: Map<String, Value>, score: f64) -> Self {
        Self {
            fields,
            score: Some(score),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Identity key for dedup, if any candidate field carries a value.
    pub fn identity(&self) -> Option<String> {
        for field in IDENTITY_FIELDS {
            if let Some(value) = self.fields.get(field) {
                if !value.is_null() {
                    return Some(match value {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    });
                }
            }
        }
        None
    }

    /// Fold another row for the same identity into this one: take a
    /// non-null incoming score, fill fields this row is missing, and leave
    /// existing non-null fields untouched.
    pub fn absorb(&mut self, incoming: &ResultRow) {
        if incoming.score.is_some() {
            self.score = incoming.score;
        }
        for (name, value) in &incoming.fields {
            if value.is_null() {
                continue;
            }
            let vacant = match self.fields.get(name) {
                None => true,
                Some(current) => current.is_null(),
            };
            if vacant {
                self.fields.insert(name.clone(), value.clone());
            }
        }
    }
}

/// Everything the prompt builder receives for one request. `merged` is the
/// usable union of rows; `queries_executed` is audit data only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrievalContext {
    pub baseline: Vec<ResultRow>,
    pub embeddings: Vec<ResultRow>,
    pub merged: Vec<ResultRow>,
    pub queries_executed: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn identity_prefers_journey_over_flight() {
        let row = ResultRow::structured(fields(&[
            ("flight", json!("42")),
            ("journey", json!("F_9")),
        ]));
        assert_eq!(row.identity(), Some("F_9".to_string()));
    }

    #[test]
    fn identity_skips_null_candidates_and_stringifies_numbers() {
        let row = ResultRow::structured(fields(&[
            ("journey", Value::Null),
            ("flight", json!(42)),
        ]));
        assert_eq!(row.identity(), Some("42".to_string()));

        let anonymous = ResultRow::structured(fields(&[("delay", json!(10))]));
        assert_eq!(anonymous.identity(), None);
    }

    #[test]
    fn absorb_fills_gaps_without_clobbering() {
        let mut row = ResultRow::structured(fields(&[
            ("journey", json!("F_2")),
            ("delay", Value::Null),
            ("food_score", json!(4.0)),
        ]));
        let incoming = ResultRow::similarity(
            fields(&[
                ("journey", json!("F_2")),
                ("delay", json!(5)),
                ("food_score", json!(1.0)),
            ]),
            0.5,
        );

        row.absorb(&incoming);

        assert_eq!(row.score, Some(0.5));
        assert_eq!(row.get("delay"), Some(&json!(5)));
        // existing non-null value wins over the incoming one
        assert_eq!(row.get("food_score"), Some(&json!(4.0)));
    }

    #[test]
    fn absorb_keeps_score_when_incoming_has_none() {
        let mut row = ResultRow::similarity(fields(&[("journey", json!("F_3"))]), 0.9);
        row.absorb(&ResultRow::structured(fields(&[("delay", json!(2))])));
        assert_eq!(row.score, Some(0.9));
    }

    #[test]
    fn rows_serialize_flat_with_explicit_score() {
        let row = ResultRow::similarity(fields(&[("journey", json!("F_1"))]), 0.87);
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value, json!({"journey": "F_1", "score": 0.87}));

        let structured = ResultRow::structured(fields(&[("flight", json!("42"))]));
        let value = serde_json::to_value(&structured).unwrap();
        assert_eq!(value, json!({"flight": "42", "score": null}));
    }
}
