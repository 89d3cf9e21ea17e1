use std::sync::Arc;

use futures::future::join_all;
use shared::{
    domain::ResultId,
    error::ConsoleError,
    protocol::{Account, ActionOutcome, Credential, SearchQuery},
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

pub mod assets;
pub mod dispatch;
pub mod gateway;
pub mod pipeline;
pub mod session;

pub use dispatch::{ActionStrategy, BundledWithSearch, DispatchPerItem};
pub use gateway::{Gateway, HttpGateway, FALLBACK_FAILURE_MESSAGE};

use pipeline::ResultPanel;
use session::SessionState;

const SUCCESS_MESSAGE: &str = "Success!";

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub busy: bool,
    pub accounts: Vec<Account>,
    pub selected: Option<String>,
    pub auth_modal_open: bool,
    pub confirm_close_open: bool,
    pub panel: Option<PanelView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub items: Vec<ResultCard>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultCard {
    pub id: ResultId,
    pub link: String,
    pub thumbnail: String,
    pub loaded: bool,
    pub outcome: Option<ActionOutcome>,
}

#[derive(Debug, Clone)]
pub enum ConsoleEvent {
    StateChanged(ViewState),
    Success(String),
    Info(String),
    Error(String),
}

#[derive(Default)]
struct ConsoleState {
    session: SessionState,
    panel: ResultPanel,
    inflight: usize,
}

impl ConsoleState {
    fn view(&self) -> ViewState {
        let panel = self.panel.is_open().then(|| PanelView {
            items: self
                .panel
                .results()
                .iter()
                .map(|item| ResultCard {
                    id: item.id,
                    link: item.link.clone(),
                    thumbnail: item.thumbnail.clone(),
                    loaded: self.panel.is_loaded(item.id),
                    outcome: self.panel.outcome_for(item),
                })
                .collect(),
        });
        ViewState {
            busy: self.inflight > 0,
            accounts: self.session.accounts().to_vec(),
            selected: self.session.selected().map(ToString::to_string),
            auth_modal_open: self.session.auth_modal_open(),
            confirm_close_open: self.session.confirm_close_open(),
            panel,
        }
    }
}

/// Single writer over all console state. Operations lock, mutate, release
/// before any network await, then re-lock to fold the response in; stale
/// responses are detected at fold time and dropped. Presentation only ever
/// sees `ViewState` clones, never references into live state.
pub struct Console {
    gateway: Arc<dyn Gateway>,
    strategy: Arc<dyn ActionStrategy>,
    inner: Mutex<ConsoleState>,
    events: broadcast::Sender<ConsoleEvent>,
}

impl Console {
    pub fn new(gateway: Arc<dyn Gateway>) -> Arc<Self> {
        Self::new_with_strategy(gateway, Arc::new(DispatchPerItem))
    }

    pub fn new_with_strategy(
        gateway: Arc<dyn Gateway>,
        strategy: Arc<dyn ActionStrategy>,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            gateway,
            strategy,
            inner: Mutex::new(ConsoleState::default()),
            events,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ConsoleEvent> {
        self.events.subscribe()
    }

    pub async fn view(&self) -> ViewState {
        self.inner.lock().await.view()
    }

    fn emit(&self, event: ConsoleEvent) {
        let _ = self.events.send(event);
    }

    fn publish(&self, state: &ConsoleState) {
        self.emit(ConsoleEvent::StateChanged(state.view()));
    }

    fn surface(&self, err: &ConsoleError) {
        self.emit(ConsoleEvent::Error(err.message().to_string()));
    }

    pub async fn refresh_roster(&self) -> Result<(), ConsoleError> {
        {
            let mut state = self.inner.lock().await;
            state.inflight += 1;
            self.publish(&state);
        }
        let fetched = self.gateway.list_accounts().await;
        let mut state = self.inner.lock().await;
        state.inflight -= 1;
        let outcome = match fetched {
            Ok(accounts) => {
                info!(count = accounts.len(), "account roster replaced");
                state.session.apply_roster(accounts);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "roster refresh failed");
                self.surface(&err);
                Err(err)
            }
        };
        self.publish(&state);
        outcome
    }

    pub async fn select_account(&self, username: &str) -> Result<(), ConsoleError> {
        let mut state = self.inner.lock().await;
        match state.session.select(username) {
            Ok(()) => {
                self.publish(&state);
                Ok(())
            }
            Err(err) => {
                self.surface(&err);
                Err(err)
            }
        }
    }

    pub async fn open_login(&self) {
        let mut state = self.inner.lock().await;
        state.session.open_login();
        self.publish(&state);
    }

    pub async fn cancel_login(&self) {
        let mut state = self.inner.lock().await;
        state.session.cancel_login();
        self.publish(&state);
    }

    pub async fn request_login(&self, credential: Credential) -> Result<(), ConsoleError> {
        let sanitized = {
            let mut state = self.inner.lock().await;
            match state.session.begin_login(credential) {
                Ok(sanitized) => {
                    state.inflight += 1;
                    self.publish(&state);
                    sanitized
                }
                Err(err) => {
                    self.surface(&err);
                    return Err(err);
                }
            }
        };
        debug!(username = %sanitized.username, "login issued");
        match self.gateway.login(&sanitized).await {
            Ok(()) => {
                {
                    let mut state = self.inner.lock().await;
                    state.session.complete_login();
                    info!(username = %sanitized.username, "account login accepted");
                    self.emit(ConsoleEvent::Success(SUCCESS_MESSAGE.to_string()));
                    self.publish(&state);
                }
                // The refresh runs inside this op's busy window; its
                // failures surface on their own.
                let _ = self.refresh_roster().await;
                let mut state = self.inner.lock().await;
                state.inflight -= 1;
                self.publish(&state);
                Ok(())
            }
            Err(err) => {
                let mut state = self.inner.lock().await;
                state.inflight -= 1;
                warn!(username = %sanitized.username, error = %err, "account login failed");
                self.surface(&err);
                self.publish(&state);
                Err(err)
            }
        }
    }

    pub async fn request_session_close(&self) -> Result<(), ConsoleError> {
        let mut state = self.inner.lock().await;
        match state.session.request_close() {
            Ok(username) => {
                debug!(%username, "close confirmation opened");
                self.publish(&state);
                Ok(())
            }
            Err(err) => {
                self.emit(ConsoleEvent::Info(err.message().to_string()));
                Err(err)
            }
        }
    }

    pub async fn cancel_session_close(&self) {
        let mut state = self.inner.lock().await;
        state.session.cancel_close();
        self.publish(&state);
    }

    pub async fn confirm_session_close(&self) -> Result<(), ConsoleError> {
        let username = {
            let mut state = self.inner.lock().await;
            match state.session.begin_confirmed_close() {
                Ok(username) => {
                    state.inflight += 1;
                    self.publish(&state);
                    username
                }
                Err(err) => {
                    self.surface(&err);
                    return Err(err);
                }
            }
        };
        match self.gateway.terminate_session(&username).await {
            Ok(()) => {
                {
                    let mut state = self.inner.lock().await;
                    state.session.complete_close();
                    info!(%username, "browser session closed");
                    self.emit(ConsoleEvent::Success(SUCCESS_MESSAGE.to_string()));
                    self.publish(&state);
                }
                let _ = self.refresh_roster().await;
                let mut state = self.inner.lock().await;
                state.inflight -= 1;
                self.publish(&state);
                Ok(())
            }
            Err(err) => {
                let mut state = self.inner.lock().await;
                state.inflight -= 1;
                warn!(%username, error = %err, "session close failed");
                self.surface(&err);
                self.publish(&state);
                Err(err)
            }
        }
    }

    pub async fn open_panel(&self, username: &str) -> Result<(), ConsoleError> {
        let mut state = self.inner.lock().await;
        match state.session.select(username) {
            Ok(()) => {
                state.panel.open();
                debug!(%username, "result panel opened");
                self.publish(&state);
                Ok(())
            }
            Err(err) => {
                self.surface(&err);
                Err(err)
            }
        }
    }

    pub async fn close_panel(&self) {
        let mut state = self.inner.lock().await;
        state.panel.close();
        self.publish(&state);
    }

    pub async fn run_search(
        &self,
        keyword: &str,
        comment: Option<&str>,
    ) -> Result<(), ConsoleError> {
        let (generation, query) = {
            let mut state = self.inner.lock().await;
            if keyword.is_empty() {
                let err = ConsoleError::validation("keyword is required");
                self.surface(&err);
                return Err(err);
            }
            let Some(username) = state.session.selected().map(ToString::to_string) else {
                let err = ConsoleError::validation("select an account to search as");
                self.surface(&err);
                return Err(err);
            };
            if !state.panel.is_open() {
                state.panel.open();
            }
            let generation = state.panel.issue_search();
            state.inflight += 1;
            self.publish(&state);
            let query = SearchQuery {
                keyword: keyword.to_string(),
                username,
                comment: comment.map(ToString::to_string),
            };
            (generation, query)
        };
        debug!(keyword = %query.keyword, username = %query.username, "search issued");
        let found = self.gateway.search(&query).await;
        let mut state = self.inner.lock().await;
        state.inflight -= 1;
        let outcome = match found {
            Ok(items) => {
                if state.panel.apply_results(generation, items) {
                    info!(count = state.panel.results().len(), "result set replaced");
                    self.emit(ConsoleEvent::Success(SUCCESS_MESSAGE.to_string()));
                } else {
                    debug!(generation, "discarding stale search response");
                }
                Ok(())
            }
            Err(err) => {
                if state.panel.apply_search_failure(generation) {
                    warn!(error = %err, "search failed");
                    self.surface(&err);
                    Err(err)
                } else {
                    debug!(generation, "discarding stale search failure");
                    Ok(())
                }
            }
        };
        self.publish(&state);
        outcome
    }

    /// Busy covers this one call only; dispatches for other items run
    /// concurrently.
    pub async fn dispatch_action_for(&self, id: ResultId) -> Result<(), ConsoleError> {
        let (generation, username, item) = {
            let mut state = self.inner.lock().await;
            let Some(username) = state.session.selected().map(ToString::to_string) else {
                let err = ConsoleError::validation("select an account to act as");
                self.surface(&err);
                return Err(err);
            };
            let Some(item) = state
                .panel
                .results()
                .iter()
                .find(|result| result.id == id)
                .cloned()
            else {
                let err =
                    ConsoleError::validation(format!("result {id} is not in the current set"));
                self.surface(&err);
                return Err(err);
            };
            let generation = state.panel.current_generation();
            state.inflight += 1;
            self.publish(&state);
            (generation, username, item)
        };
        debug!(%id, username = %username, "action dispatched");
        let produced = self
            .strategy
            .produce(self.gateway.as_ref(), &username, &item)
            .await;
        let mut state = self.inner.lock().await;
        state.inflight -= 1;
        let outcome = match produced {
            Ok(result) => {
                if state.panel.attach_outcome(generation, id, result) {
                    debug!(%id, "action outcome attached");
                } else {
                    debug!(%id, generation, "discarding stale action outcome");
                }
                Ok(())
            }
            Err(err) => {
                warn!(%id, error = %err, "action dispatch failed");
                self.surface(&err);
                Err(err)
            }
        };
        self.publish(&state);
        outcome
    }

    pub async fn dispatch_all(&self) -> (usize, usize) {
        let ids: Vec<ResultId> = {
            let state = self.inner.lock().await;
            state.panel.results().iter().map(|item| item.id).collect()
        };
        if ids.is_empty() {
            return (0, 0);
        }
        let results = join_all(ids.into_iter().map(|id| self.dispatch_action_for(id))).await;
        // Stale folds resolve Ok; only an Err dispatch lands in the failed
        // column.
        let succeeded = results.iter().filter(|result| result.is_ok()).count();
        let failed = results.len() - succeeded;
        info!(succeeded, failed, "dispatched all results");
        (succeeded, failed)
    }

    pub async fn mark_asset_loaded(&self, id: ResultId) {
        let mut state = self.inner.lock().await;
        if state.panel.mark_loaded(id) {
            self.publish(&state);
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
