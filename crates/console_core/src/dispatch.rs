use async_trait::async_trait;
use shared::{
    error::ConsoleError,
    protocol::{ActionOutcome, ActionRequest, SearchResult},
};

use crate::gateway::Gateway;

/// Deployed backends differ on where engagement outcomes come from: bundled
/// with each search result, or fetched per item from the action endpoint.
#[async_trait]
pub trait ActionStrategy: Send + Sync {
    async fn produce(
        &self,
        gateway: &dyn Gateway,
        username: &str,
        item: &SearchResult,
    ) -> Result<ActionOutcome, ConsoleError>;
}

pub struct DispatchPerItem;

#[async_trait]
impl ActionStrategy for DispatchPerItem {
    async fn produce(
        &self,
        gateway: &dyn Gateway,
        username: &str,
        item: &SearchResult,
    ) -> Result<ActionOutcome, ConsoleError> {
        gateway
            .dispatch_action(&ActionRequest {
                link: item.link.clone(),
                username: username.to_string(),
            })
            .await
    }
}

/// Replays the bundled outcome; no network call.
pub struct BundledWithSearch;

#[async_trait]
impl ActionStrategy for BundledWithSearch {
    async fn produce(
        &self,
        _gateway: &dyn Gateway,
        _username: &str,
        item: &SearchResult,
    ) -> Result<ActionOutcome, ConsoleError> {
        item.outcome
            .clone()
            .ok_or_else(|| ConsoleError::rejected("no outcome was delivered for this result"))
    }
}
