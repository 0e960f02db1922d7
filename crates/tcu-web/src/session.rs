//! In-memory visitor sessions.
//!
//! A session holds the logged-in [`AuthInfo`] (if any), the contact-form flow
//! and pending flash notifications. Nothing is persisted; a restart logs
//! everyone out.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use tracing::{debug, info};

use tcu_types::models::AuthInfo;

use crate::contact_flow::ContactFlow;

pub const SESSION_COOKIE: &str = "tcu_session";

/// Session id carried in request extensions by the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
    Info,
}

impl FlashKind {
    pub fn css_class(self) -> &'static str {
        match self {
            FlashKind::Success => "toast toast-success",
            FlashKind::Error => "toast toast-error",
            FlashKind::Info => "toast toast-info",
        }
    }
}

/// One-shot notification shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub text: String,
}

impl Flash {
    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: FlashKind::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: FlashKind::Error, text: text.into() }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: FlashKind::Info, text: text.into() }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub auth: Option<AuthInfo>,
    pub contact: ContactFlow,
    flash: Vec<Flash>,
    last_seen: Instant,
}

impl Session {
    fn new(now: Instant) -> Self {
        Self { auth: None, contact: ContactFlow::default(), flash: Vec::new(), last_seen: now }
    }
}

pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self { sessions: Mutex::new(HashMap::new()), ttl }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Session>> {
        // Sessions hold no invariants a panicked writer could break.
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Touch the session named by the cookie, or start a new one.
    ///
    /// Returns the id and whether it was freshly created (so the caller knows
    /// to set the cookie).
    pub fn load_or_create(&self, cookie: Option<&str>, now: Instant) -> (SessionId, bool) {
        let mut sessions = self.lock();
        if let Some(id) = cookie {
            if let Some(session) = sessions.get_mut(id) {
                if now.saturating_duration_since(session.last_seen) <= self.ttl {
                    session.last_seen = now;
                    return (SessionId(id.to_string()), false);
                }
                sessions.remove(id);
                debug!("Session expired, starting a new one");
            }
        }

        let id = new_session_id();
        sessions.insert(id.clone(), Session::new(now));
        (SessionId(id), true)
    }

    pub fn get(&self, id: &SessionId) -> Option<Session> {
        self.lock().get(&id.0).cloned()
    }

    /// Mutate a session in place. `None` when the session is gone.
    pub fn update<T>(&self, id: &SessionId, f: impl FnOnce(&mut Session) -> T) -> Option<T> {
        self.lock().get_mut(&id.0).map(f)
    }

    pub fn remove(&self, id: &SessionId) {
        self.lock().remove(&id.0);
    }

    pub fn auth(&self, id: &SessionId) -> Option<AuthInfo> {
        self.lock().get(&id.0).and_then(|s| s.auth.clone())
    }

    pub fn set_auth(&self, id: &SessionId, auth: Option<AuthInfo>) {
        self.update(id, |s| s.auth = auth);
    }

    pub fn push_flash(&self, id: &SessionId, flash: Flash) {
        self.update(id, |s| s.flash.push(flash));
    }

    /// Drain pending notifications.
    pub fn take_flash(&self, id: &SessionId) -> Vec<Flash> {
        self.update(id, |s| std::mem::take(&mut s.flash)).unwrap_or_default()
    }

    /// Drop sessions idle for longer than the TTL.
    pub fn sweep_expired(&self, now: Instant) -> usize {
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, s| now.saturating_duration_since(s.last_seen) <= self.ttl);
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn new_session_id() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Periodically sweep idle sessions.
pub async fn run_sweep_loop(store: std::sync::Arc<SessionStore>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        let removed = store.sweep_expired(Instant::now());
        if removed > 0 {
            info!("Session sweep: dropped {} idle sessions", removed);
        }
    }
}
