use std::time::{Instant, SystemTime, UNIX_EPOCH};

use axum::{
    extract::{Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::session::{Flash, SESSION_COOKIE, SessionId};
use crate::state::AppState;

pub const LOGIN_PATH: &str = "/admin/login";

/// Attach a [`SessionId`] to every request, starting a session (and setting
/// the cookie) when the visitor has none.
pub async fn session_layer(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let jar = CookieJar::from_headers(req.headers());
    let cookie = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());

    let (id, created) = state.sessions.load_or_create(cookie.as_deref(), Instant::now());
    req.extensions_mut().insert(id.clone());

    let mut resp = next.run(req).await;
    if created {
        let cookie = Cookie::build((SESSION_COOKIE, id.0))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(state.cookie_secure)
            .build();
        match HeaderValue::from_str(&cookie.to_string()) {
            Ok(value) => {
                resp.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => warn!("Failed to encode session cookie: {}", e),
        }
    }
    resp
}

/// Gate `/admin/*`: the session must hold a live login.
///
/// Inserts the session's `AuthInfo` into request extensions for handlers.
pub async fn require_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let Some(id) = req.extensions().get::<SessionId>().cloned() else {
        return Redirect::to(LOGIN_PATH).into_response();
    };
    let Some(auth) = state.sessions.auth(&id) else {
        return Redirect::to(LOGIN_PATH).into_response();
    };

    if token_expired(&auth.token, unix_now()) {
        debug!("Access token for {} expired", auth.user.email);
        state.sessions.set_auth(&id, None);
        state
            .sessions
            .push_flash(&id, Flash::info("Your session has expired. Please log in again."));
        return Redirect::to(LOGIN_PATH).into_response();
    }

    req.extensions_mut().insert(auth);
    next.run(req).await
}

#[derive(Deserialize)]
struct ExpiryClaims {
    exp: Option<u64>,
}

/// Whether `token` is a JWT whose `exp` lies at or before `now`.
///
/// The backend owns the signing key, so only the claims are read. Tokens that
/// are not JWTs are opaque and never considered expired here.
pub fn token_expired(token: &str, now: u64) -> bool {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    match decode::<ExpiryClaims>(token, &DecodingKey::from_secret(&[]), &validation) {
        Ok(data) => data.claims.exp.is_some_and(|exp| exp <= now),
        Err(_) => false,
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
