//! Tracing bootstrap shared by the airline knowledge-graph services.
//!
//! One subscriber per process, configured from the environment: pretty
//! output for development, JSON for deployments.

use std::env;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

// Re-export the macros services actually use
pub use tracing::{debug, error, info, trace, warn};

/// Subscriber configuration, env-driven with sensible defaults.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Service name for log attribution
    pub service_name: String,
    /// Log format: "json" or "pretty"
    pub format: String,
    /// Filter directive (e.g., "info", "retrieval=debug,info")
    pub level: String,
    /// Whether to include file/line in log events
    pub include_location: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            service_name: "airkg".to_string(),
            format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            include_location: env::var("LOG_LOCATION").map(|v| v == "true").unwrap_or(false),
        }
    }
}

impl TracingConfig {
    pub fn for_service(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn json(mut self) -> Self {
        self.format = "json".to_string();
        self
    }

    pub fn pretty(mut self) -> Self {
        self.format = "pretty".to_string();
        self
    }
}

/// Install the global subscriber. Call once, early in `main`.
pub fn init_tracing(config: TracingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if config.format == "json" {
        let layer = fmt::layer()
            .json()
            .with_current_span(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location);

        tracing_subscriber::registry().with(filter).with(layer).init();
    } else {
        let layer = fmt::layer()
            .with_file(config.include_location)
            .with_line_number(config.include_location);

        tracing_subscriber::registry().with(filter).with(layer).init();
    }

    tracing::info!(
        service = %config.service_name,
        format = %config.format,
        "Tracing initialized"
    );
}

/// Quick initialization with defaults for a service.
pub fn init_tracing_for(service_name: &str) {
    init_tracing(TracingConfig::for_service(service_name));
}
