use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP request failed with status: {status}{}", format_message(.message))]
    Api { status: u16, message: String },

    #[error("unexpected response format: {0}")]
    ApiShape(String),

    #[error("{0}")]
    NotFound(String),

    #[error("invalid message format: {0}")]
    Format(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to send chat message: {0}")]
    Chat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_message(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(" ({message})")
    }
}

impl RelayError {
    pub fn status(status: reqwest::StatusCode) -> Self {
        Self::Api {
            status: status.as_u16(),
            message: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
