use thiserror::Error;

/// Errors surfaced by [`ApiClient`](crate::ApiClient) calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: connect, timeout, TLS.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx HTTP status.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The envelope carried a non-success code.
    #[error("API error {code}: {message}")]
    Api { code: u16, message: String },

    /// Success envelope without the expected `data`.
    #[error("response carried no data")]
    MissingData,

    /// Body was not the expected JSON.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ClientError {
    /// Message the backend attached to a rejection, if any.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            ClientError::Status { message, .. } | ClientError::Api { message, .. }
                if !message.is_empty() =>
            {
                Some(message.as_str())
            }
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            ClientError::Status { status: 401, .. } | ClientError::Api { code: 401, .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
