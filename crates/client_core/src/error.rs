use thiserror::Error;

use crate::input::Field;

/// First constraint violated by a [`crate::input::PredictionInput`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: Field,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// The request never produced a response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid prediction endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
    #[error("{0}")]
    Send(String),
    #[error("failed to read response body: {0}")]
    Body(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(value: reqwest::Error) -> Self {
        Self::Send(describe_chain(&value))
    }
}

/// Joins an error with its `source()` chain, skipping causes whose text is
/// already part of the message.
pub(crate) fn describe_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("Server returned an invalid prediction")]
    MalformedResponse,
}

impl PredictionError {
    /// Text published to observers in `RequestState::Failed`.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Transport(_) => "transport",
            Self::Server { .. } => "server",
            Self::MalformedResponse => "malformed_response",
        }
    }
}
