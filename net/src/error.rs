//! Error types for REST calls and the push subscription.

use tokio_tungstenite::tungstenite;

/// Failure of a request/response call. Never retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// Caught locally before the request is sent.
    #[error("obstacle {index} exceeds wall bounds")]
    ObstacleOutOfBounds { index: usize },
}

impl ApiError {
    /// HTTP status for server-side rejections.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Why one push-channel session ended.
#[derive(Debug, thiserror::Error)]
pub enum LiveError {
    #[error("websocket connect failed: {0}")]
    Connect(Box<tungstenite::Error>),
    #[error("websocket receive failed: {0}")]
    Receive(Box<tungstenite::Error>),
    #[error("event receiver dropped")]
    ReceiverGone,
}
