use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use shared::{
    error::ConsoleError,
    protocol::{
        Account, ActionOutcome, ActionRequest, ApiEnvelope, Credential, SearchQuery, SearchResult,
    },
};
use tracing::debug;

/// Normalized text for failures the backend did not explain.
pub const FALLBACK_FAILURE_MESSAGE: &str = "Something went wrong!";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The five calls the automation backend exposes. Implementations never let
/// a raw transport error escape; every failure arrives as a `ConsoleError`.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn list_accounts(&self) -> Result<Vec<Account>, ConsoleError>;
    async fn login(&self, credential: &Credential) -> Result<(), ConsoleError>;
    async fn terminate_session(&self, username: &str) -> Result<(), ConsoleError>;
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, ConsoleError>;
    async fn dispatch_action(&self, request: &ActionRequest)
        -> Result<ActionOutcome, ConsoleError>;
}

pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
            timeout,
        }
    }

    async fn execute<T>(&self, request: reqwest::RequestBuilder) -> Result<ApiEnvelope<T>, ConsoleError>
    where
        T: DeserializeOwned,
    {
        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| ConsoleError::transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Rejection bodies sometimes carry an envelope whose message is
            // worth surfacing over a bare status code.
            let message = response
                .json::<ApiEnvelope<serde_json::Value>>()
                .await
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or_else(|| FALLBACK_FAILURE_MESSAGE.to_string());
            debug!(%status, "backend answered outside 2xx");
            return Err(ConsoleError::transport(message));
        }

        response
            .json::<ApiEnvelope<T>>()
            .await
            .map_err(|err| ConsoleError::transport(err.to_string()))
    }

    fn accept<T>(envelope: ApiEnvelope<T>) -> Result<Option<T>, ConsoleError> {
        if !envelope.status {
            return Err(ConsoleError::rejected(
                envelope
                    .message
                    .unwrap_or_else(|| FALLBACK_FAILURE_MESSAGE.to_string()),
            ));
        }
        Ok(envelope.data)
    }

    fn require_data<T>(data: Option<T>) -> Result<T, ConsoleError> {
        data.ok_or_else(|| ConsoleError::transport("response envelope was missing its payload"))
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn list_accounts(&self) -> Result<Vec<Account>, ConsoleError> {
        debug!("gateway: list accounts");
        let envelope = self
            .execute::<Vec<Account>>(self.http.get(format!("{}/get-users", self.base_url)))
            .await?;
        Self::require_data(Self::accept(envelope)?)
    }

    async fn login(&self, credential: &Credential) -> Result<(), ConsoleError> {
        debug!(username = %credential.username, "gateway: login");
        let envelope = self
            .execute::<serde_json::Value>(
                self.http
                    .post(format!("{}/user-login", self.base_url))
                    .json(credential),
            )
            .await?;
        Self::accept(envelope).map(|_| ())
    }

    async fn terminate_session(&self, username: &str) -> Result<(), ConsoleError> {
        debug!(%username, "gateway: close driver");
        let envelope = self
            .execute::<serde_json::Value>(
                self.http
                    .get(format!("{}/close-driver", self.base_url))
                    .query(&[("username", username)]),
            )
            .await?;
        Self::accept(envelope).map(|_| ())
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, ConsoleError> {
        debug!(keyword = %query.keyword, username = %query.username, "gateway: keyword search");
        let envelope = self
            .execute::<Vec<SearchResult>>(
                self.http
                    .get(format!("{}/keyword-search", self.base_url))
                    .query(query),
            )
            .await?;
        Self::require_data(Self::accept(envelope)?)
    }

    async fn dispatch_action(
        &self,
        request: &ActionRequest,
    ) -> Result<ActionOutcome, ConsoleError> {
        debug!(link = %request.link, username = %request.username, "gateway: total action");
        let envelope = self
            .execute::<ActionOutcome>(
                self.http
                    .post(format!("{}/total-action", self.base_url))
                    .json(request),
            )
            .await?;
        Self::require_data(Self::accept(envelope)?)
    }
}

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod tests;
