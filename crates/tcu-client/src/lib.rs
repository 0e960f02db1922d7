//! Typed client for the TCU REST API.
//!
//! Every endpoint answers with an [`ApiResponse`](tcu_types::api::ApiResponse)
//! envelope; [`response`] unwraps it so callers only see the payload or a
//! [`ClientError`].

pub mod client;
pub mod error;
pub mod response;

pub use client::ApiClient;
pub use error::{ClientError, Result};
pub use response::Reply;
