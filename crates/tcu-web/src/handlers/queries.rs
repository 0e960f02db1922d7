use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use chrono::Local;
use serde::Deserialize;
use tracing::{error, info};

use tcu_types::api::ReplyRequest;
use tcu_types::models::AuthInfo;

use crate::export;
use crate::listing::{ListParams, MessageSort, filter_messages, paginate, sort_messages};
use crate::session::{Flash, SessionId};
use crate::state::AppState;
use crate::validation::{FieldErrors, ReplyForm};
use crate::views::admin::{self, ReplyState};

use super::{expire_login, flash_redirect, message_or};

const QUERIES_PATH: &str = "/admin/queries";

#[derive(Debug, Default, Deserialize)]
pub struct DetailParams {
    pub reply: Option<String>,
}

impl DetailParams {
    fn reply_open(&self) -> bool {
        matches!(self.reply.as_deref(), Some("1" | "true"))
    }
}

pub async fn list(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Extension(auth): Extension<AuthInfo>,
    Query(params): Query<ListParams>,
) -> Response {
    let messages = match state.api_for(&auth).list_messages().await {
        Ok(messages) => messages,
        Err(e) if e.is_unauthorized() => return expire_login(&state, &session, &auth),
        Err(e) => {
            error!("Fetching message list failed: {}", e);
            state.sessions.push_flash(&session, Flash::error("Fetching message list failed"));
            Vec::new()
        }
    };

    let sort = MessageSort::parse(&params.sort);
    let mut shown = filter_messages(&messages, params.query());
    sort_messages(&mut shown, sort);
    let page = paginate(&shown, params.page.unwrap_or(1));

    let flash = state.sessions.take_flash(&session);
    Html(admin::queries(&page, params.query(), sort, &auth, &flash)).into_response()
}

/// Download every message as a spreadsheet.
pub async fn export(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Extension(auth): Extension<AuthInfo>,
) -> Response {
    let messages = match state.api_for(&auth).list_messages().await {
        Ok(messages) => messages,
        Err(e) if e.is_unauthorized() => return expire_login(&state, &session, &auth),
        Err(e) => {
            error!("Fetching messages for export failed: {}", e);
            return flash_redirect(&state, &session, Flash::error("Fetching message list failed"), QUERIES_PATH);
        }
    };

    let now = Local::now();
    match export::customer_inquiries(&messages, &now) {
        Ok(bytes) => {
            let name = export::file_name(&now);
            info!("Exported {} messages as {}", messages.len(), name);
            (
                [
                    (header::CONTENT_TYPE, export::CONTENT_TYPE.to_string()),
                    (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", name)),
                ],
                bytes,
            )
                .into_response()
        }
        Err(e) => {
            error!("Building export workbook failed: {}", e);
            flash_redirect(&state, &session, Flash::error("Failed to export messages"), QUERIES_PATH)
        }
    }
}

pub async fn details(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Extension(auth): Extension<AuthInfo>,
    Path(id): Path<String>,
    Query(params): Query<DetailParams>,
) -> Response {
    match state.api_for(&auth).get_message(&id).await {
        Ok(message) => {
            let errors = FieldErrors::new();
            let reply = ReplyState { open: params.reply_open(), text: "", errors: &errors };
            let flash = state.sessions.take_flash(&session);
            Html(admin::query_details(&message, reply, &auth, &flash)).into_response()
        }
        Err(e) if e.is_unauthorized() => expire_login(&state, &session, &auth),
        Err(e) => {
            error!("Fetching message {} failed: {}", id, e);
            flash_redirect(&state, &session, Flash::error("Fetching question details failed"), QUERIES_PATH)
        }
    }
}

pub async fn mark_read(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Extension(auth): Extension<AuthInfo>,
    Path(id): Path<String>,
) -> Response {
    let back = format!("{}/{}", QUERIES_PATH, id);
    match state.api_for(&auth).mark_message_read(&id).await {
        Ok(_) => flash_redirect(&state, &session, Flash::success("Marked as read successfully"), &back),
        Err(e) if e.is_unauthorized() => expire_login(&state, &session, &auth),
        Err(e) => {
            error!("Marking message {} as read failed: {}", id, e);
            flash_redirect(&state, &session, Flash::error("Failed updating message"), &back)
        }
    }
}

pub async fn reply(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Extension(auth): Extension<AuthInfo>,
    Path(id): Path<String>,
    Form(form): Form<ReplyForm>,
) -> Response {
    let api = state.api_for(&auth);

    let text = match form.validate() {
        Ok(text) => text,
        Err(errors) => {
            return match api.get_message(&id).await {
                Ok(message) => {
                    let reply = ReplyState { open: true, text: &form.reply_text, errors: &errors };
                    let flash = state.sessions.take_flash(&session);
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        Html(admin::query_details(&message, reply, &auth, &flash)),
                    )
                        .into_response()
                }
                Err(e) if e.is_unauthorized() => expire_login(&state, &session, &auth),
                Err(e) => {
                    error!("Fetching message {} failed: {}", id, e);
                    flash_redirect(&state, &session, Flash::error("Fetching question details failed"), QUERIES_PATH)
                }
            };
        }
    };

    let request = ReplyRequest { message_id: id.clone(), reply_text: text };
    match api.send_reply(&request).await {
        Ok(reply) => {
            info!("Reply to message {} sent by {}", id, auth.user.email);
            flash_redirect(
                &state,
                &session,
                Flash::success(message_or(reply.message, "Reply sent successfully")),
                QUERIES_PATH,
            )
        }
        Err(e) if e.is_unauthorized() => expire_login(&state, &session, &auth),
        Err(e) => {
            error!("Replying to message {} failed: {}", id, e);
            flash_redirect(
                &state,
                &session,
                Flash::error("Failed sending reply"),
                &format!("{}/{}?reply=1", QUERIES_PATH, id),
            )
        }
    }
}
