use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use tcu_types::api::{
    ApiResponse, LoginRequest, LogoutRequest, MarkReadRequest, OtpRequest, ReplyRequest,
    SendMessageRequest, UpdateUserRequest, VerifyOtpRequest,
};
use tcu_types::models::{AuthInfo, MessageInfo, User};

use crate::error::{ClientError, Result};
use crate::response::{Reply, handle_response, read_envelope, require_data};

/// Client for the remote REST API.
///
/// Cheap to clone: the underlying connection pool is shared. Use
/// [`with_token`](Self::with_token) to get a copy that authenticates its calls.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidBaseUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url, token: None })
    }

    pub fn with_token(&self, token: &str) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: Some(token.to_string()),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.url(segments);
        debug!("{} {}", method, url);
        let req = self.http.request(method, url);
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn call<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<ApiResponse<T>> {
        let resp = req.send().await?;
        read_envelope(resp).await
    }

    async fn call_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<ApiResponse<T>> {
        self.call(self.request(method, segments).json(body)).await
    }

    // -- Auth --

    pub async fn login(&self, req: &LoginRequest) -> Result<Reply<AuthInfo>> {
        require_data(self.call_json::<_, AuthInfo>(Method::POST, &["auth", "login"], req).await?)
    }

    pub async fn logout(&self, req: &LogoutRequest) -> Result<Reply<()>> {
        let reply = handle_response::<serde_json::Value>(
            self.call_json::<_, serde_json::Value>(Method::POST, &["auth", "logout"], req).await?,
        )?;
        Ok(Reply { message: reply.message, data: () })
    }

    // -- Users --

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let reply = handle_response(self.call::<Vec<User>>(self.request(Method::GET, &["users"])).await?)?;
        Ok(reply.data.unwrap_or_default())
    }

    pub async fn get_user(&self, id: &str) -> Result<User> {
        let env = self.call::<User>(self.request(Method::GET, &["users", id])).await?;
        Ok(require_data(env)?.data)
    }

    pub async fn update_user(&self, req: &UpdateUserRequest) -> Result<Reply<Option<User>>> {
        handle_response(self.call_json::<_, User>(Method::PUT, &["users", &req.id], req).await?)
    }

    pub async fn delete_user(&self, id: &str) -> Result<Reply<()>> {
        let reply = handle_response::<serde_json::Value>(
            self.call::<serde_json::Value>(self.request(Method::DELETE, &["users", id])).await?,
        )?;
        Ok(Reply { message: reply.message, data: () })
    }

    // -- Messages --

    pub async fn list_messages(&self) -> Result<Vec<MessageInfo>> {
        let reply = handle_response(
            self.call::<Vec<MessageInfo>>(self.request(Method::GET, &["messages"])).await?,
        )?;
        Ok(reply.data.unwrap_or_default())
    }

    pub async fn get_message(&self, id: &str) -> Result<MessageInfo> {
        let env = self.call::<MessageInfo>(self.request(Method::GET, &["messages", id])).await?;
        Ok(require_data(env)?.data)
    }

    pub async fn mark_message_read(&self, id: &str) -> Result<MessageInfo> {
        let req = MarkReadRequest { id: id.to_string() };
        let env = self
            .call_json::<_, MessageInfo>(Method::PUT, &["messages", id, "read"], &req)
            .await?;
        Ok(require_data(env)?.data)
    }

    pub async fn send_reply(&self, req: &ReplyRequest) -> Result<Reply<()>> {
        let reply = handle_response::<serde_json::Value>(
            self.call_json::<_, serde_json::Value>(Method::POST, &["messages", &req.message_id, "reply"], req)
                .await?,
        )?;
        Ok(Reply { message: reply.message, data: () })
    }

    pub async fn send_message(&self, req: &SendMessageRequest) -> Result<Reply<Option<MessageInfo>>> {
        handle_response(self.call_json::<_, MessageInfo>(Method::POST, &["messages"], req).await?)
    }

    // -- OTP --

    pub async fn request_otp(&self, email: &str) -> Result<Reply<()>> {
        let req = OtpRequest { email: email.to_string() };
        let reply = handle_response::<serde_json::Value>(
            self.call_json::<_, serde_json::Value>(Method::POST, &["otp"], &req).await?,
        )?;
        Ok(Reply { message: reply.message, data: () })
    }

    pub async fn verify_otp(&self, email: &str, code: &str) -> Result<Reply<()>> {
        let req = VerifyOtpRequest { email: email.to_string(), code: code.to_string() };
        let reply = handle_response::<serde_json::Value>(
            self.call_json::<_, serde_json::Value>(Method::POST, &["otp", "verify"], &req).await?,
        )?;
        Ok(Reply { message: reply.message, data: () })
    }
}
