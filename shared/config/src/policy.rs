use serde::Deserialize;

/// Tunable retrieval behavior, loadable from a JSON file so operators can
/// adjust it without a rebuild. Falls back to built-in defaults when the
/// file is absent or unreadable.
#[derive(Clone, Debug, Deserialize)]
pub struct RetrievalPolicy {
    /// Intents for which similarity retrieval is meaningful in hybrid mode.
    /// Aggregate intents (class averages, fleet-wide stats) stay out of
    /// this list.
    #[serde(default = "default_similarity_intents")]
    pub similarity_intents: Vec<String>,
    /// Result count for similarity retrieval when the request does not
    /// specify one.
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,
}

fn default_similarity_intents() -> Vec<String> {
    [
        "journey_similarity",
        "delay_info",
        "passenger_journeys",
        "class_search",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_top_k() -> usize {
    5
}

impl Default for RetrievalPolicy {
    fn default() -> Self {
        Self {
            similarity_intents: default_similarity_intents(),
            default_top_k: default_top_k(),
        }
    }
}

impl RetrievalPolicy {
    /// Load from a provided path or the RETRIEVAL_POLICY_PATH env var,
    /// defaulting to ./retrieval-policy.json.
    pub fn from_path(path: Option<String>) -> Self {
        let default_path = std::env::var("RETRIEVAL_POLICY_PATH")
            .unwrap_or_else(|_| "retrieval-policy.json".to_string());
        let path = path.unwrap_or(default_path);

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path, error = %e, "Invalid retrieval policy file, using defaults");
                RetrievalPolicy::default()
            }),
            Err(_) => RetrievalPolicy::default(),
        }
    }

    pub fn from_env_path() -> Self {
        Self::from_path(None)
    }

    pub fn allows_similarity(&self, intent: &str) -> bool {
        self.similarity_intents.iter().any(|i| i == intent)
    }
}
