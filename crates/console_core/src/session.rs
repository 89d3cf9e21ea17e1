use shared::{
    error::ConsoleError,
    protocol::{Account, Credential},
};

#[derive(Debug, Default)]
pub struct SessionState {
    accounts: Vec<Account>,
    selected: Option<String>,
    credential: Option<Credential>,
    auth_modal_open: bool,
    confirm_close_open: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn auth_modal_open(&self) -> bool {
        self.auth_modal_open
    }

    pub fn confirm_close_open(&self) -> bool {
        self.confirm_close_open
    }

    /// Wholesale replacement; the selection is left alone.
    pub fn apply_roster(&mut self, accounts: Vec<Account>) {
        self.accounts = accounts;
    }

    pub fn select(&mut self, username: &str) -> Result<(), ConsoleError> {
        if username.is_empty() {
            return Err(ConsoleError::validation("username must not be empty"));
        }
        self.selected = Some(username.to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn open_login(&mut self) {
        self.auth_modal_open = true;
    }

    pub fn cancel_login(&mut self) {
        self.auth_modal_open = false;
        self.credential = None;
    }

    /// The username reaches the wire trimmed; a whitespace-only username is
    /// rejected rather than sent empty.
    pub fn begin_login(&mut self, credential: Credential) -> Result<Credential, ConsoleError> {
        let username = credential.username.trim();
        if username.is_empty() || credential.password.is_empty() {
            return Err(ConsoleError::validation("username and password are required"));
        }
        let sanitized = Credential {
            username: username.to_string(),
            password: credential.password,
        };
        self.auth_modal_open = true;
        self.credential = Some(sanitized.clone());
        Ok(sanitized)
    }

    pub fn complete_login(&mut self) {
        self.credential = None;
        self.auth_modal_open = false;
    }

    pub fn request_close(&mut self) -> Result<String, ConsoleError> {
        let Some(selected) = self.selected.clone() else {
            return Err(ConsoleError::validation(
                "select an account to close its session",
            ));
        };
        self.confirm_close_open = true;
        Ok(selected)
    }

    pub fn cancel_close(&mut self) {
        self.confirm_close_open = false;
    }

    pub fn begin_confirmed_close(&self) -> Result<String, ConsoleError> {
        if !self.confirm_close_open {
            return Err(ConsoleError::validation("no close confirmation is pending"));
        }
        match self.selected.clone() {
            Some(selected) => Ok(selected),
            None => Err(ConsoleError::validation(
                "select an account to close its session",
            )),
        }
    }

    pub fn complete_close(&mut self) {
        self.selected = None;
        self.confirm_close_open = false;
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
