use axum::{
    Extension, Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::{error, info, warn};

use tcu_types::api::LogoutRequest;
use tcu_types::models::AuthInfo;

use crate::middleware::LOGIN_PATH;
use crate::session::{Flash, SessionId};
use crate::state::AppState;
use crate::validation::{FieldErrors, LoginForm};
use crate::views::admin;

use super::{expire_login, flash_redirect, message_or};

const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";

pub async fn login_page(State(state): State<AppState>, Extension(session): Extension<SessionId>) -> Response {
    if state.sessions.auth(&session).is_some() {
        return Redirect::to("/admin").into_response();
    }
    let flash = state.sessions.take_flash(&session);
    Html(admin::login("", &FieldErrors::new(), None, &flash)).into_response()
}

pub async fn login(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(form): Form<LoginForm>,
) -> Response {
    let request = match form.validate() {
        Ok(request) => request,
        Err(errors) => {
            let flash = state.sessions.take_flash(&session);
            return (StatusCode::UNPROCESSABLE_ENTITY, Html(admin::login(&form.email, &errors, None, &flash)))
                .into_response();
        }
    };

    match state.api.login(&request).await {
        Ok(reply) => {
            info!("{} logged in", reply.data.user.email);
            let message = message_or(reply.message, "Login successful");
            state.sessions.set_auth(&session, Some(reply.data));
            flash_redirect(&state, &session, Flash::success(message), "/admin")
        }
        Err(e) => {
            warn!("Login failed for {}: {}", request.email, e);
            let mut flash = state.sessions.take_flash(&session);
            flash.push(Flash::error(LOGIN_FAILED));
            let inline = e.api_message().unwrap_or(LOGIN_FAILED);
            (
                StatusCode::UNAUTHORIZED,
                Html(admin::login(&form.email, &FieldErrors::new(), Some(inline), &flash)),
            )
                .into_response()
        }
    }
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Extension(auth): Extension<AuthInfo>,
) -> Response {
    let request = LogoutRequest { id: auth.user.id.clone(), email: auth.user.email.clone() };
    match state.api_for(&auth).logout(&request).await {
        Ok(reply) => {
            info!("{} logged out", auth.user.email);
            state.sessions.set_auth(&session, None);
            flash_redirect(
                &state,
                &session,
                Flash::success(message_or(reply.message, "Logged out successfully")),
                LOGIN_PATH,
            )
        }
        Err(e) if e.is_unauthorized() => expire_login(&state, &session, &auth),
        Err(e) => {
            error!("Logout failed for {}: {}", auth.user.email, e);
            flash_redirect(&state, &session, Flash::error("Error logging out"), "/admin")
        }
    }
}

pub async fn welcome(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Extension(auth): Extension<AuthInfo>,
) -> Html<String> {
    Html(admin::welcome(&auth, &state.sessions.take_flash(&session)))
}

pub async fn profile(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Extension(auth): Extension<AuthInfo>,
) -> Html<String> {
    Html(admin::profile(&auth, &state.sessions.take_flash(&session)))
}
