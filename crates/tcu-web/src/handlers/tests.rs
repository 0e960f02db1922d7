use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    body::Body,
    extract::Path,
    http::{HeaderMap, Request, StatusCode, header},
    response::Response,
    routing::{get, post, put},
};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use tower::ServiceExt;
use url::form_urlencoded;

use tcu_client::ApiClient;

use crate::session::SessionStore;
use crate::state::{AppState, AppStateInner};

// -- Fake backend --

fn user(id: &str, name: &str, role: &str) -> Value {
    json!({ "id": id, "name": name, "email": format!("{}@tcu.test", name.to_lowercase()), "role": role, "createdAt": "20250224" })
}

fn message(n: usize) -> Value {
    json!({
        "id": format!("m{n}"), "firstName": format!("Customer{n}"), "lastName": "Tun",
        "email": format!("c{n}@example.com"), "phone": "+95912345", "companyName": "Shwe Co",
        "country": "Myanmar", "jobTitle": "Install", "jobDetails": "Two floors",
        "read": n % 2 == 0, "createdAt": format!("202503{:02}101500", n)
    })
}

fn expired_jwt() -> String {
    #[derive(serde::Serialize)]
    struct Claims {
        sub: String,
        exp: u64,
    }
    encode(&Header::default(), &Claims { sub: "u3".into(), exp: 1_000 }, &EncodingKey::from_secret(b"backend"))
        .unwrap()
}

fn ok(message: &str, data: Value) -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "code": 200, "message": message, "data": data })))
}

fn rejected(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "code": status.as_u16(), "message": message })))
}

fn bearer(headers: &HeaderMap) -> String {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default()
        .to_string()
}

fn backend() -> Router {
    Router::new()
        .route(
            "/api/auth/login",
            post(|Json(body): Json<Value>| async move {
                let email = body["email"].as_str().unwrap_or_default().to_string();
                if body["password"] != "secret123" {
                    return rejected(StatusCode::UNAUTHORIZED, "Invalid credentials");
                }
                let (user, token) = match email.as_str() {
                    "admin@tcu.test" => (user("u1", "Admin", "1"), "tok-admin".to_string()),
                    "staff@tcu.test" => (user("u2", "Staff", "2"), "tok-staff".to_string()),
                    "revoked@tcu.test" => (user("u4", "Revoked", "1"), "revoked".to_string()),
                    _ => (user("u3", "Old", "1"), expired_jwt()),
                };
                ok("Login successful", json!({ "user": user, "token": token }))
            }),
        )
        .route("/api/auth/logout", post(|| async { ok("Logged out", Value::Null) }))
        .route(
            "/api/users",
            get(|headers: HeaderMap| async move {
                if bearer(&headers) == "revoked" {
                    return rejected(StatusCode::UNAUTHORIZED, "Token revoked");
                }
                ok("", json!([user("u1", "Admin", "1"), user("u2", "Staff", "2"), user("u7", "Owner", "1")]))
            }),
        )
        .route(
            "/api/users/{id}",
            get(|Path(id): Path<String>| async move {
                match id.as_str() {
                    "u1" => ok("", user("u1", "Admin", "1")),
                    "u2" => ok("", user("u2", "Staff", "2")),
                    "u7" => ok("", user("u7", "Owner", "1")),
                    _ => rejected(StatusCode::NOT_FOUND, "User not found"),
                }
            })
            .put(|Path(id): Path<String>, Json(body): Json<Value>| async move {
                let mut updated = user(&id, body["name"].as_str().unwrap_or_default(), body["role"].as_str().unwrap_or_default());
                updated["email"] = body["email"].clone();
                ok("User updated", updated)
            })
            .delete(|| async { ok("Deleted", Value::Null) }),
        )
        .route(
            "/api/messages",
            get(|headers: HeaderMap| async move {
                if bearer(&headers) == "revoked" {
                    return rejected(StatusCode::UNAUTHORIZED, "Token revoked");
                }
                ok("", Value::Array((1..=10).map(message).collect()))
            })
            .post(|| async { ok("Message sent", message(11)) }),
        )
        .route("/api/messages/{id}", get(|| async { ok("", message(1)) }))
        .route("/api/messages/{id}/read", put(|| async { ok("Updated", message(1)) }))
        .route("/api/messages/{id}/reply", post(|| async { ok("Reply sent", Value::Null) }))
        .route("/api/otp", post(|| async { ok("Code sent", Value::Null) }))
        .route(
            "/api/otp/verify",
            post(|Json(body): Json<Value>| async move {
                if body["code"] == "123456" {
                    ok("Verified", Value::Null)
                } else {
                    rejected(StatusCode::BAD_REQUEST, "Invalid code")
                }
            }),
        )
}

async fn spawn_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, backend()).await.unwrap();
    });
    format!("http://{}/api", addr)
}

// -- Browser --

/// Drives the router like a browser: keeps the session cookie between calls.
struct Browser {
    app: Router,
    state: AppState,
    cookie: Option<String>,
}

impl Browser {
    async fn new() -> Self {
        let api = ApiClient::new(&spawn_backend().await, Duration::from_secs(5)).unwrap();
        let state: AppState = Arc::new(AppStateInner {
            api,
            sessions: Arc::new(SessionStore::new(Duration::from_secs(600))),
            cookie_secure: false,
        });
        Self { app: crate::router(state.clone(), "assets"), state, cookie: None }
    }

    async fn send(&mut self, mut req: Request<Body>) -> Response {
        if let Some(cookie) = &self.cookie {
            req.headers_mut().insert(header::COOKIE, cookie.parse().unwrap());
        }
        let resp = self.app.clone().oneshot(req).await.unwrap();
        if let Some(set) = resp.headers().get(header::SET_COOKIE) {
            let pair = set.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }
        resp
    }

    async fn get(&mut self, uri: &str) -> Response {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn post(&mut self, uri: &str, fields: &[(&str, &str)]) -> Response {
        let body = form_urlencoded::Serializer::new(String::new()).extend_pairs(fields).finish();
        let req = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(req).await
    }

    async fn login(&mut self, email: &str) -> Response {
        self.post("/admin/login", &[("email", email), ("password", "secret123")]).await
    }
}

async fn text(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(resp: &Response) -> &str {
    resp.headers().get(header::LOCATION).unwrap().to_str().unwrap()
}

const CONTACT: &[(&str, &str)] = &[
    ("firstName", "Aye"),
    ("lastName", "Chan"),
    ("email", "aye@example.com"),
    ("phone", "+959123456"),
    ("companyName", "TCU"),
    ("country", "Myanmar"),
    ("jobTitle", "Facilities"),
    ("jobDetails", ""),
    ("contactPreference", ""),
];

// -- Public site --

#[tokio::test]
async fn first_visit_sets_session_cookie() {
    let mut browser = Browser::new().await;
    let resp = browser.get("/").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let set = resp.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set.starts_with("tcu_session="));
    assert!(set.contains("HttpOnly"));
    assert!(set.contains("SameSite=Lax"));
    assert!(text(resp).await.contains("href=\"/\" class=\"active\""));

    // known cookie: no new one
    let again = browser.get("/aboutus").await;
    assert!(again.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(browser.state.sessions.len(), 1);
}

#[tokio::test]
async fn unknown_pages_are_404() {
    let mut browser = Browser::new().await;
    assert_eq!(browser.get("/nope").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(browser.get("/products/xyz").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(browser.get("/products/tbe-22").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn checkout_validates_then_flashes_purchase() {
    let mut browser = Browser::new().await;
    let bad = browser.post("/checkout", &[("firstName", "Aye")]).await;
    assert_eq!(bad.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = text(bad).await;
    assert!(html.contains("You must accept the terms and conditions"));
    assert!(html.contains("Card number is required"));

    let good = browser
        .post(
            "/checkout",
            &[
                ("firstName", "Aye"),
                ("lastName", "Chan"),
                ("email", "aye@example.com"),
                ("country", "Canada"),
                ("termsAndConditions", "on"),
                ("cardNumber", "4242 4242 4242 4242"),
                ("expiration", "12 / 29"),
                ("cvc", "123"),
                ("cardCountry", "Canada"),
            ],
        )
        .await;
    assert_eq!(good.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&good), "/products");
    assert!(text(browser.get("/products").await).await.contains("Successfully Purchased!"));
}

#[tokio::test]
async fn contact_flow_end_to_end() {
    let mut browser = Browser::new().await;

    let resp = browser.post("/contactus", &[("firstName", "Aye")]).await;
    assert_eq!(location(&resp), "/contactus");
    let html = text(browser.get("/contactus").await).await;
    assert!(html.contains("data-stage=\"form\""));
    assert!(html.contains("Please enter a valid email address"));

    browser.post("/contactus", CONTACT).await;
    let html = text(browser.get("/contactus").await).await;
    assert!(html.contains("data-stage=\"verification\""));
    assert!(html.contains("Code sent"));

    browser.post("/contactus/resend", &[]).await;
    let html = text(browser.get("/contactus").await).await;
    assert!(html.contains("seconds before requesting a new code"));

    browser.post("/contactus/verify", &[("code", "12")]).await;
    assert!(text(browser.get("/contactus").await).await.contains("Please enter the 6-digit code"));

    browser.post("/contactus/verify", &[("code", "000000")]).await;
    let html = text(browser.get("/contactus").await).await;
    assert!(html.contains("Invalid code"));
    assert!(html.contains("data-stage=\"verification\""));

    browser.post("/contactus/verify", &[("code", "123456")]).await;
    let html = text(browser.get("/contactus").await).await;
    assert!(html.contains("data-stage=\"success\""));
    assert!(html.contains("Message sent"));

    browser.post("/contactus/reset", &[]).await;
    assert!(text(browser.get("/contactus").await).await.contains("data-stage=\"form\""));
}

#[tokio::test]
async fn contact_back_keeps_values() {
    let mut browser = Browser::new().await;
    browser.post("/contactus", CONTACT).await;
    browser.post("/contactus/back", &[]).await;
    let html = text(browser.get("/contactus").await).await;
    assert!(html.contains("data-stage=\"form\""));
    assert!(html.contains("value=\"aye@example.com\""));
}

// -- Admin --

#[tokio::test]
async fn admin_requires_login() {
    let mut browser = Browser::new().await;
    let resp = browser.get("/admin/queries").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/admin/login");
}

#[tokio::test]
async fn failed_login_reports_credentials() {
    let mut browser = Browser::new().await;
    let resp = browser.post("/admin/login", &[("email", "admin@tcu.test"), ("password", "wrong-pass")]).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let html = text(resp).await;
    assert!(html.contains("Login failed. Please check your credentials."));
    assert!(html.contains("Invalid credentials"));

    let short = browser.post("/admin/login", &[("email", "admin@tcu.test"), ("password", "123")]).await;
    assert_eq!(short.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(text(short).await.contains("Password must be at least 6 characters"));
}

#[tokio::test]
async fn login_then_browse_queries() {
    let mut browser = Browser::new().await;
    let resp = browser.login("admin@tcu.test").await;
    assert_eq!(location(&resp), "/admin");

    let html = text(browser.get("/admin").await).await;
    assert!(html.contains("Login successful"));
    assert!(html.contains("Welcome, Admin"));

    // already logged in
    assert_eq!(location(&browser.get("/admin/login").await), "/admin");

    let html = text(browser.get("/admin/queries?page=2").await).await;
    assert!(html.contains("Show 9 to 10 of 10"));

    let html = text(browser.get("/admin/queries?q=customer10&page=1").await).await;
    assert!(html.contains("Show 1 to 1 of 1"));
    assert!(html.contains("/admin/queries/m10"));

    let html = text(browser.get("/admin/queries/m1?reply=1").await).await;
    assert!(html.contains("name=\"replyText\""));

    let resp = browser.post("/admin/queries/m1/read", &[]).await;
    assert_eq!(location(&resp), "/admin/queries/m1");
    assert!(text(browser.get("/admin/queries/m1").await).await.contains("Marked as read successfully"));

    let blank = browser.post("/admin/queries/m1/reply", &[("replyText", " ")]).await;
    assert_eq!(blank.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(text(blank).await.contains("Reply text is required"));

    let sent = browser.post("/admin/queries/m1/reply", &[("replyText", "Thanks!")]).await;
    assert_eq!(location(&sent), "/admin/queries");
    assert!(text(browser.get("/admin/queries").await).await.contains("Reply sent"));
}

#[tokio::test]
async fn export_downloads_workbook() {
    let mut browser = Browser::new().await;
    browser.login("admin@tcu.test").await;
    let resp = browser.get("/admin/queries/export").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    let disposition = resp.headers().get(header::CONTENT_DISPOSITION).unwrap().to_str().unwrap().to_string();
    assert!(disposition.ends_with("_customer_inquiries.xlsx\""));
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

#[tokio::test]
async fn user_management_rules() {
    let mut browser = Browser::new().await;
    browser.login("admin@tcu.test").await;

    let html = text(browser.get("/admin/users").await).await;
    assert!(html.contains("Show 1 to 3 of 3"));

    let resp = browser.post("/admin/users/u1/delete", &[]).await;
    assert_eq!(location(&resp), "/admin/users");
    assert!(text(browser.get("/admin/users").await).await.contains("You cannot delete your own account"));

    let confirm = browser.get("/admin/users/u2/delete").await;
    assert_eq!(confirm.status(), StatusCode::OK);
    assert!(text(confirm).await.contains("Are you sure you want to delete this user?"));
    browser.post("/admin/users/u2/delete", &[]).await;
    assert!(text(browser.get("/admin/users").await).await.contains("User deleted successfully"));

    let resp = browser.get("/admin/users/missing").await;
    assert_eq!(location(&resp), "/admin/users");
    assert!(text(browser.get("/admin/users").await).await.contains("Failed to load user data"));

    let invalid = browser.post("/admin/users/u2", &[("name", ""), ("email", "staff@tcu.test"), ("role", "9")]).await;
    assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = text(invalid).await;
    assert!(html.contains("Name is required"));
    assert!(html.contains("Please select a role"));
}

#[tokio::test]
async fn admin_accounts_cannot_be_deleted() {
    let mut browser = Browser::new().await;
    browser.login("admin@tcu.test").await;

    let resp = browser.get("/admin/users/u7/delete").await;
    assert_eq!(location(&resp), "/admin/users");
    assert!(text(browser.get("/admin/users").await).await.contains("Cannot delete admin user"));

    let resp = browser.post("/admin/users/u7/delete", &[]).await;
    assert_eq!(location(&resp), "/admin/users");
    let html = text(browser.get("/admin/users").await).await;
    assert!(html.contains("Cannot delete admin user"));
    assert!(!html.contains("User deleted successfully"));
}

#[tokio::test]
async fn updating_a_user_flashes_api_message() {
    let mut browser = Browser::new().await;
    browser.login("admin@tcu.test").await;

    let resp = browser.post("/admin/users/u2", &[("name", "Staff Lead"), ("email", "lead@tcu.test"), ("role", "2")]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/admin/users");
    assert!(text(browser.get("/admin/users").await).await.contains("User updated"));
    assert!(text(browser.get("/admin/profile").await).await.contains("<h1>Admin</h1>"));
}

#[tokio::test]
async fn updating_yourself_refreshes_profile() {
    let mut browser = Browser::new().await;
    browser.login("admin@tcu.test").await;

    let resp = browser.post("/admin/users/u1", &[("name", "Head Admin"), ("email", "admin@tcu.test"), ("role", "1")]).await;
    assert_eq!(location(&resp), "/admin/users");
    let html = text(browser.get("/admin/profile").await).await;
    assert!(html.contains("<h1>Head Admin</h1>"));
}

#[tokio::test]
async fn staff_cannot_manage_users() {
    let mut browser = Browser::new().await;
    browser.login("staff@tcu.test").await;
    let resp = browser.get("/admin/users").await;
    assert_eq!(location(&resp), "/admin");
    assert!(text(browser.get("/admin").await).await.contains("Only admins can manage users"));
}

#[tokio::test]
async fn rejected_token_logs_out() {
    let mut browser = Browser::new().await;
    browser.login("revoked@tcu.test").await;
    let resp = browser.get("/admin/queries").await;
    assert_eq!(location(&resp), "/admin/login");
    assert_eq!(location(&browser.get("/admin").await), "/admin/login");
}

#[tokio::test]
async fn expired_jwt_is_dropped_before_handlers() {
    let mut browser = Browser::new().await;
    browser.login("old@tcu.test").await;
    let resp = browser.get("/admin").await;
    assert_eq!(location(&resp), "/admin/login");
    let html = text(browser.get("/admin/login").await).await;
    assert!(html.contains("Your session has expired"));
}

#[tokio::test]
async fn logout_clears_login() {
    let mut browser = Browser::new().await;
    browser.login("admin@tcu.test").await;
    let resp = browser.post("/admin/logout", &[]).await;
    assert_eq!(location(&resp), "/admin/login");
    assert!(text(browser.get("/admin/login").await).await.contains("Logged out"));
    assert_eq!(location(&browser.get("/admin").await), "/admin/login");
}
