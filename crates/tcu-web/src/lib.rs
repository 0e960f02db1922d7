//! Server-rendered TCU marketing site and back-office admin.
//!
//! Pages are rendered here; all data lives behind the remote REST API reached
//! through [`tcu_client::ApiClient`].

pub mod catalog;
pub mod contact_flow;
pub mod dates;
pub mod export;
pub mod handlers;
pub mod listing;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod state;
pub mod validation;
pub mod views;

pub use routes::router;
pub use state::{AppState, AppStateInner};
