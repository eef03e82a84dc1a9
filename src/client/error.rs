//! Error taxonomy for client operations.
//!
//! Every failure an API operation can produce falls into one of four groups:
//!
//! - local validation failures ([`ClientError::InvalidInput`]), raised before any request is made
//! - lookup failures ([`ClientError::NotFound`]), when a name matches nothing in the local list
//! - server-reported failures ([`ClientError::InvalidCredentials`], [`ClientError::AlreadyExists`],
//!   [`ClientError::Server`])
//! - technical failures ([`ClientError::Transport`], [`ClientError::Decode`]), which callers log
//!   in full while showing the user a generic message

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Could not find a match for the {kind} \"{name}\"")]
    NotFound { kind: &'static str, name: String },

    #[error("Incorrect login!")]
    InvalidCredentials,

    #[error("Username or email already exists")]
    AlreadyExists,

    #[error("Server responded with status {status}")]
    Server { status: u16, detail: Option<String> },

    #[error("Request failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn transport<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport(Box::new(error))
    }

    /// True for network and decoding failures, the ones worth a diagnostic log entry.
    pub fn is_technical(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Decode(_))
    }

    /// Body text the server sent along with a failure status, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Server { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(error.to_string())
    }
}
