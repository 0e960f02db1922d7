use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::catalog::find_product;
use crate::session::SessionId;
use crate::state::AppState;
use crate::views::{self, public};

pub async fn home(State(state): State<AppState>, Extension(session): Extension<SessionId>) -> Html<String> {
    Html(public::home(&state.sessions.take_flash(&session)))
}

pub async fn about(State(state): State<AppState>, Extension(session): Extension<SessionId>) -> Html<String> {
    Html(public::about(&state.sessions.take_flash(&session)))
}

pub async fn products(State(state): State<AppState>, Extension(session): Extension<SessionId>) -> Html<String> {
    Html(public::products(&state.sessions.take_flash(&session)))
}

pub async fn product_detail(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Path(slug): Path<String>,
) -> Response {
    let flash = state.sessions.take_flash(&session);
    match find_product(&slug) {
        Some(product) => Html(public::product_detail(product, &flash)).into_response(),
        None => (StatusCode::NOT_FOUND, Html(views::not_found(&flash))).into_response(),
    }
}

pub async fn solutions(State(state): State<AppState>, Extension(session): Extension<SessionId>) -> Html<String> {
    Html(public::solutions(&state.sessions.take_flash(&session)))
}

pub async fn blogs(State(state): State<AppState>, Extension(session): Extension<SessionId>) -> Html<String> {
    Html(public::blogs(&state.sessions.take_flash(&session)))
}

pub async fn testimonials(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Html<String> {
    Html(public::testimonials(&state.sessions.take_flash(&session)))
}
