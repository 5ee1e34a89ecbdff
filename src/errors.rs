use reqwest::StatusCode;
use thiserror::Error;

/// Longest slice of an error body kept in [`ClientError::Api`].
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("authentication failed: identity service returned {status}")]
    Auth { status: StatusCode },

    #[error("API call failed with {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("decode error: {0}")]
    Decode(String),

    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    #[error("invalid endpoint domain '{0}': expected 'public' or 'admin'")]
    InvalidDomain(String),
}

impl ClientError {
    /// HTTP status carried by auth and API failures.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Auth { status } | ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }

    pub(crate) fn api(status: StatusCode, body: &str) -> Self {
        let end = body
            .char_indices()
            .nth(MAX_ERROR_BODY)
            .map(|(i, _)| i)
            .unwrap_or(body.len());
        ClientError::Api {
            status,
            message: body[..end].trim().to_string(),
        }
    }

    pub(crate) fn decode(context: &str, err: impl std::fmt::Display) -> Self {
        ClientError::Decode(format!("{}: {}", context, err))
    }
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
