use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    /// Rejected locally; no network call was made.
    #[error("{0}")]
    Validation(String),
    /// The backend was unreachable, answered outside 2xx, or sent a body
    /// that does not parse as the response envelope.
    #[error("{0}")]
    Transport(String),
    /// HTTP 200 with `status: false`; carries the backend's message.
    #[error("{0}")]
    Rejected(String),
}

impl ConsoleError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Validation(message) | Self::Transport(message) | Self::Rejected(message) => {
                message
            }
        }
    }
}
