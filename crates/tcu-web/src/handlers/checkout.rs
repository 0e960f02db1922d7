use axum::{
    Extension, Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::info;

use crate::session::{Flash, SessionId};
use crate::state::AppState;
use crate::validation::{CheckoutForm, FieldErrors};
use crate::views::public;

use super::flash_redirect;

pub async fn show(State(state): State<AppState>, Extension(session): Extension<SessionId>) -> Html<String> {
    let flash = state.sessions.take_flash(&session);
    Html(public::checkout(&CheckoutForm::default(), &FieldErrors::new(), &flash))
}

/// Validate billing details. No payment is taken.
pub async fn submit(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(form): Form<CheckoutForm>,
) -> Response {
    match form.validate() {
        Ok(()) => {
            info!("Checkout completed for {}", form.email.trim());
            flash_redirect(&state, &session, Flash::success("Successfully Purchased!"), "/products")
        }
        Err(errors) => {
            let flash = state.sessions.take_flash(&session);
            (StatusCode::UNPROCESSABLE_ENTITY, Html(public::checkout(&form, &errors, &flash))).into_response()
        }
    }
}
