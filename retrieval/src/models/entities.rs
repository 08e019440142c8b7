//! Entity extraction output, as delivered by the upstream extractor.
//!
//! The extractor is an external collaborator backed by a language model, so
//! the shapes here are deliberately forgiving: missing keys become empty,
//! and list entries that are not strings are coerced or dropped rather than
//! failing the request.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::Array(items) => items.iter().filter_map(coerce_string).collect(),
        Value::String(s) => vec![s],
        _ => Vec::new(),
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(coerce_string(&raw).unwrap_or_default())
}

/// Primary route mentioned in the question, if any. Codes are empty strings
/// when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteHint {
    #[serde(default, deserialize_with = "lenient_string")]
    pub origin: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub destination: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityBundle {
    #[serde(default, deserialize_with = "lenient_list")]
    pub flights: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub airports: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub passengers: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub journeys: Vec<String>,
    #[serde(default)]
    pub routes: RouteHint,
}

impl EntityBundle {
    /// Apply the extractor's normalization rules: airport and route codes
    /// uppercased, passenger tokens lowercased, everything trimmed, empty
    /// entries dropped.
    pub fn normalized(&self) -> EntityBundle {
        fn cleaned(values: &[String], f: impl Fn(&str) -> String) -> Vec<String> {
            values
                .iter()
                .map(|v| f(v.trim()))
                .filter(|v| !v.is_empty())
                .collect()
        }

        EntityBundle {
            flights: cleaned(&self.flights, str::to_string),
            airports: cleaned(&self.airports, str::to_uppercase),
            passengers: cleaned(&self.passengers, str::to_lowercase),
            journeys: cleaned(&self.journeys, str::to_string),
            routes: RouteHint {
                origin: self.routes.origin.trim().to_uppercase(),
                destination: self.routes.destination.trim().to_uppercase(),
            },
        }
    }
}
