//! Failure taxonomy shared by the transport, gateway and repository layers.

use reqwest::StatusCode;
use thiserror::Error;

/// Result of every remote operation.
pub type FetchResult<T> = Result<T, FetchError>;

/// Generic notice shown to the end user, whatever went wrong.
pub const USER_NOTICE: &str = "Could not retrieve weather information";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request failed with HTTP status {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },

    #[error("Response body is empty")]
    EmptyBody,

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Response status is {status}{}", detail(.message))]
    ApiStatus {
        status: String,
        message: Option<String>,
    },

    #[error("Response status is ok but `{0}` is missing")]
    MissingPayload(&'static str),

    #[error("Realtime response {realtime}, daily response {daily}")]
    Weather { realtime: String, daily: String },

    #[error("Background task failed: {0}")]
    Task(String),
}

fn detail(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(" ({m})")).unwrap_or_default()
}

impl FetchError {
    pub(crate) fn api_status(status: impl Into<String>, message: Option<String>) -> Self {
        Self::ApiStatus {
            status: status.into(),
            message,
        }
    }

    /// User-facing message. Detail stays in the logs.
    pub fn user_message(&self) -> &'static str {
        USER_NOTICE
    }

    /// Status string reported by the provider, if the provider answered at all.
    pub fn api_status_str(&self) -> Option<&str> {
        match self {
            Self::ApiStatus { status, .. } => Some(status),
            _ => None,
        }
    }
}

impl From<tokio::task::JoinError> for FetchError {
    fn from(err: tokio::task::JoinError) -> Self {
        if err.is_panic() {
            Self::Task("task panicked".to_string())
        } else {
            Self::Task("task was cancelled".to_string())
        }
    }
}
