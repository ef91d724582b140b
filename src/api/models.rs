use serde::{Deserialize, Serialize};

use crate::metadata::SeoReceipt;
use crate::rules::{ConfigChange, RuleConfig};

/// Query string of the single-URL endpoints (`?url=...`)
#[derive(Debug, Deserialize, Clone)]
pub struct UrlQuery {
    /// Absolute or site-relative URL to evaluate
    pub url: String,
}

/// Playground request: a URL and an optional edited rule snapshot
#[derive(Debug, Deserialize, Clone)]
pub struct EvaluateRequest {
    pub url: String,

    /// Snapshot to evaluate against; the server's own when absent
    #[serde(default)]
    pub config: Option<RuleConfig>,
}

/// Playground response
#[derive(Debug, Serialize, Clone)]
pub struct EvaluateResponse {
    pub receipt: SeoReceipt,

    /// Differences between the posted snapshot and the server's
    pub changes: Vec<ConfigChange>,
}

/// Standard error response format for the API
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response for health check endpoint
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HealthStatus {
    pub status: String,

    /// Number of parameter rules in the active snapshot
    pub rules: usize,
}
