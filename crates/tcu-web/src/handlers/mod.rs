pub mod auth;
pub mod checkout;
pub mod contact;
pub mod public;
pub mod queries;
pub mod users;

#[cfg(test)]
mod tests;

use axum::{
    Extension,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::info;

use tcu_types::models::AuthInfo;

use crate::middleware::LOGIN_PATH;
use crate::session::{Flash, SessionId};
use crate::state::AppState;
use crate::views;

/// Queue a notification and redirect (303) to `to`.
pub(crate) fn flash_redirect(state: &AppState, session: &SessionId, flash: Flash, to: &str) -> Response {
    state.sessions.push_flash(session, flash);
    Redirect::to(to).into_response()
}

/// The backend rejected our token: forget the login and go back to sign-in.
pub(crate) fn expire_login(state: &AppState, session: &SessionId, auth: &AuthInfo) -> Response {
    info!("Backend rejected token for {}, logging out", auth.user.email);
    state.sessions.set_auth(session, None);
    flash_redirect(
        state,
        session,
        Flash::info("Your session has expired. Please log in again."),
        LOGIN_PATH,
    )
}

/// The API's message when it sent one, otherwise `fallback`.
pub(crate) fn message_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() { fallback.to_string() } else { message }
}

pub async fn not_found(State(state): State<AppState>, Extension(session): Extension<SessionId>) -> Response {
    let flash = state.sessions.take_flash(&session);
    (StatusCode::NOT_FOUND, Html(views::not_found(&flash))).into_response()
}
