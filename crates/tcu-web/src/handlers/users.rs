use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::{error, info, warn};

use tcu_types::models::{AuthInfo, User};

use crate::listing::{ListParams, UserSort, filter_users, paginate, sort_users};
use crate::session::{Flash, SessionId};
use crate::state::AppState;
use crate::validation::{FieldErrors, UserForm};
use crate::views::admin;

use super::{expire_login, flash_redirect, message_or};

const USERS_PATH: &str = "/admin/users";

fn forbid_staff(state: &AppState, session: &SessionId, auth: &AuthInfo) -> Option<Response> {
    if auth.user.is_admin() {
        return None;
    }
    warn!("{} tried to manage users without the admin role", auth.user.email);
    Some(flash_redirect(state, session, Flash::error("Only admins can manage users"), "/admin"))
}

pub async fn list(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Extension(auth): Extension<AuthInfo>,
    Query(params): Query<ListParams>,
) -> Response {
    if let Some(resp) = forbid_staff(&state, &session, &auth) {
        return resp;
    }

    let users = match state.api_for(&auth).list_users().await {
        Ok(users) => users,
        Err(e) if e.is_unauthorized() => return expire_login(&state, &session, &auth),
        Err(e) => {
            error!("Fetching user list failed: {}", e);
            state.sessions.push_flash(&session, Flash::error("Failed to load user data"));
            Vec::new()
        }
    };

    let sort = UserSort::parse(&params.sort);
    let mut shown = filter_users(&users, params.query());
    sort_users(&mut shown, sort);
    let page = paginate(&shown, params.page.unwrap_or(1));

    let flash = state.sessions.take_flash(&session);
    Html(admin::users(&page, params.query(), sort, &auth, &flash)).into_response()
}

pub async fn details(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Extension(auth): Extension<AuthInfo>,
    Path(id): Path<String>,
) -> Response {
    if let Some(resp) = forbid_staff(&state, &session, &auth) {
        return resp;
    }

    match state.api_for(&auth).get_user(&id).await {
        Ok(user) => {
            let form = UserForm { name: user.name.clone(), email: user.email.clone(), role: user.role.clone() };
            let flash = state.sessions.take_flash(&session);
            Html(admin::user_details(&user, &form, &FieldErrors::new(), &auth, &flash)).into_response()
        }
        Err(e) if e.is_unauthorized() => expire_login(&state, &session, &auth),
        Err(e) => {
            error!("Fetching user {} failed: {}", id, e);
            flash_redirect(&state, &session, Flash::error("Failed to load user data"), USERS_PATH)
        }
    }
}

pub async fn update(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Extension(auth): Extension<AuthInfo>,
    Path(id): Path<String>,
    Form(form): Form<UserForm>,
) -> Response {
    if let Some(resp) = forbid_staff(&state, &session, &auth) {
        return resp;
    }
    let api = state.api_for(&auth);

    let request = match form.validate(&id) {
        Ok(request) => request,
        Err(errors) => {
            return match api.get_user(&id).await {
                Ok(user) => {
                    let flash = state.sessions.take_flash(&session);
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        Html(admin::user_details(&user, &form, &errors, &auth, &flash)),
                    )
                        .into_response()
                }
                Err(e) if e.is_unauthorized() => expire_login(&state, &session, &auth),
                Err(e) => {
                    error!("Fetching user {} failed: {}", id, e);
                    flash_redirect(&state, &session, Flash::error("Failed to load user data"), USERS_PATH)
                }
            };
        }
    };

    match api.update_user(&request).await {
        Ok(reply) => {
            info!("User {} updated by {}", id, auth.user.email);
            if let Some(updated) = reply.data.filter(|u| u.id == auth.user.id) {
                state.sessions.update(&session, |s| {
                    if let Some(own) = s.auth.as_mut() {
                        own.user = updated;
                    }
                });
            }
            flash_redirect(
                &state,
                &session,
                Flash::success(message_or(reply.message, "User updated successfully")),
                USERS_PATH,
            )
        }
        Err(e) if e.is_unauthorized() => expire_login(&state, &session, &auth),
        Err(e) => {
            error!("Updating user {} failed: {}", id, e);
            let message = e.api_message().unwrap_or("Failed to update user").to_string();
            flash_redirect(&state, &session, Flash::error(message), &format!("{}/{}", USERS_PATH, id))
        }
    }
}

/// Resolve the user a delete targets. Your own account and admin accounts
/// are refused with a flash back to the list.
async fn deletable(state: &AppState, session: &SessionId, auth: &AuthInfo, id: &str) -> Result<User, Response> {
    if id == auth.user.id {
        return Err(flash_redirect(state, session, Flash::error("You cannot delete your own account"), USERS_PATH));
    }
    let user = match state.api_for(auth).get_user(id).await {
        Ok(user) => user,
        Err(e) if e.is_unauthorized() => return Err(expire_login(state, session, auth)),
        Err(e) => {
            error!("Fetching user {} failed: {}", id, e);
            return Err(flash_redirect(state, session, Flash::error("Failed to load user data"), USERS_PATH));
        }
    };
    if user.is_admin() {
        warn!("{} tried to delete admin {}", auth.user.email, user.email);
        return Err(flash_redirect(state, session, Flash::error("Cannot delete admin user"), USERS_PATH));
    }
    Ok(user)
}

pub async fn confirm_delete(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Extension(auth): Extension<AuthInfo>,
    Path(id): Path<String>,
) -> Response {
    if let Some(resp) = forbid_staff(&state, &session, &auth) {
        return resp;
    }
    match deletable(&state, &session, &auth, &id).await {
        Ok(user) => {
            let flash = state.sessions.take_flash(&session);
            Html(admin::confirm_delete(&user, &auth, &flash)).into_response()
        }
        Err(resp) => resp,
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Extension(auth): Extension<AuthInfo>,
    Path(id): Path<String>,
) -> Response {
    if let Some(resp) = forbid_staff(&state, &session, &auth) {
        return resp;
    }
    if let Err(resp) = deletable(&state, &session, &auth, &id).await {
        return resp;
    }

    match state.api_for(&auth).delete_user(&id).await {
        Ok(_) => {
            info!("User {} deleted by {}", id, auth.user.email);
            flash_redirect(&state, &session, Flash::success("User deleted successfully"), USERS_PATH)
        }
        Err(e) if e.is_unauthorized() => expire_login(&state, &session, &auth),
        Err(e) => {
            error!("Deleting user {} failed: {}", id, e);
            flash_redirect(&state, &session, Flash::error("Failed to delete user"), USERS_PATH)
        }
    }
}
