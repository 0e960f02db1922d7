use std::path::Path;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers::{self, auth, checkout, contact, public, queries, users};
use crate::middleware::{require_auth, session_layer};
use crate::state::AppState;

/// Full application router: public site, admin area and `/assets`.
pub fn router(state: AppState, assets_dir: impl AsRef<Path>) -> Router {
    let public_routes = Router::new()
        .route("/", get(public::home))
        .route("/aboutus", get(public::about))
        .route("/products", get(public::products))
        .route("/products/{id}", get(public::product_detail))
        .route("/solutions", get(public::solutions))
        .route("/blogs", get(public::blogs))
        .route("/testimonials", get(public::testimonials))
        .route("/contactus", get(contact::show).post(contact::submit))
        .route("/contactus/verify", post(contact::verify))
        .route("/contactus/resend", post(contact::resend))
        .route("/contactus/back", post(contact::back))
        .route("/contactus/reset", post(contact::reset))
        .route("/checkout", get(checkout::show).post(checkout::submit))
        .route("/admin/login", get(auth::login_page).post(auth::login));

    let admin_routes = Router::new()
        .route("/admin", get(auth::welcome))
        .route("/admin/logout", post(auth::logout))
        .route("/admin/profile", get(auth::profile))
        .route("/admin/users", get(users::list))
        .route("/admin/users/{id}", get(users::details).post(users::update))
        .route("/admin/users/{id}/delete", get(users::confirm_delete).post(users::delete))
        .route("/admin/queries", get(queries::list))
        .route("/admin/queries/export", get(queries::export))
        .route("/admin/queries/{id}", get(queries::details))
        .route("/admin/queries/{id}/read", post(queries::mark_read))
        .route("/admin/queries/{id}/reply", post(queries::reply))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .nest_service("/assets", ServeDir::new(assets_dir))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), session_layer))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
