use serde::de::DeserializeOwned;
use tracing::debug;

use tcu_types::api::ApiResponse;

use crate::error::{ClientError, Result};

/// Unwrapped payload plus the human-readable message the API sent with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply<T> {
    pub message: String,
    pub data: T,
}

/// Read an HTTP response into an envelope.
///
/// Non-2xx statuses still try to parse the envelope so the backend's message
/// reaches the caller.
pub async fn read_envelope<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<ApiResponse<T>> {
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
            .map(|env| env.message)
            .unwrap_or_default();
        debug!("API status {}: {}", status, message);
        return Err(ClientError::Status { status: status.as_u16(), message });
    }

    Ok(serde_json::from_str(&body)?)
}

/// Accept a success envelope, keeping `data` optional.
pub fn handle_response<T>(envelope: ApiResponse<T>) -> Result<Reply<Option<T>>> {
    if !envelope.is_success() {
        return Err(ClientError::Api { code: envelope.code, message: envelope.message });
    }
    Ok(Reply { message: envelope.message, data: envelope.data })
}

/// Accept a success envelope that must carry `data`.
pub fn require_data<T>(envelope: ApiResponse<T>) -> Result<Reply<T>> {
    let reply = handle_response(envelope)?;
    let data = reply.data.ok_or(ClientError::MissingData)?;
    Ok(Reply { message: reply.message, data })
}
