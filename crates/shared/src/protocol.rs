use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, ResultId};

/// Response envelope the backend wraps every payload in. `status: true` is
/// the only success signal; HTTP 200 with `status: false` is a rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: bool,
    // No field-level `default` here: it would put a `T: Default` bound on
    // the derived impl. Missing `Option` fields decode as `None` anyway.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub keyword: String,
    pub username: String,
    /// Opaque comma-delimited comment pool, passed through verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub link: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: ResultId,
    pub link: String,
    #[serde(rename = "img")]
    pub thumbnail: String,
    /// Present only when the backend ran the engagement action during the
    /// search and shipped its outcome inline.
    #[serde(default, rename = "result", skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ActionOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    #[serde(rename = "success")]
    pub succeeded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, rename = "data", skip_serializing_if = "Option::is_none")]
    pub metrics: Option<ActionMetrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionMetrics {
    #[serde(rename = "heart")]
    pub liked: bool,
    #[serde(rename = "favorite")]
    pub favorited: bool,
    #[serde(rename = "comment")]
    pub commented: bool,
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
