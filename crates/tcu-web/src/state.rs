use std::sync::Arc;

use tcu_client::ApiClient;
use tcu_types::models::AuthInfo;

use crate::session::SessionStore;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub api: ApiClient,
    pub sessions: Arc<SessionStore>,
    pub cookie_secure: bool,
}

impl AppStateInner {
    /// API client authenticating as the logged-in user.
    pub fn api_for(&self, auth: &AuthInfo) -> ApiClient {
        self.api.with_token(&auth.token)
    }
}
