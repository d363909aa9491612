use std::sync::Arc;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    api::{fetch_empty, fetch_json},
    errors::AppResult,
    http::{ApiRequest, HttpTransport},
    models::{
        domain::AuthStatus,
        dto::{
            request::LoginRequest,
            response::{LoginResponse, RefreshResponse},
        },
    },
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, username: &str, password: &SecretString) -> AppResult<LoginResponse>;
    async fn refresh(&self) -> AppResult<RefreshResponse>;
    async fn logout(&self) -> AppResult<()>;
    async fn auth_check(&self) -> AppResult<AuthStatus>;
}

/// Auth endpoints. Uses the plain transport: a 401 here must not trigger
/// another refresh.
pub struct HttpAuthApi {
    transport: Arc<dyn HttpTransport>,
}

impl HttpAuthApi {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, username: &str, password: &SecretString) -> AppResult<LoginResponse> {
        let body = LoginRequest {
            username,
            password: password.expose_secret(),
        };
        let request = ApiRequest::post("/users/token/").with_json(&body)?;
        fetch_json(self.transport.as_ref(), request).await
    }

    async fn refresh(&self) -> AppResult<RefreshResponse> {
        fetch_json(self.transport.as_ref(), ApiRequest::post("/users/token/refresh/")).await
    }

    async fn logout(&self) -> AppResult<()> {
        fetch_empty(self.transport.as_ref(), ApiRequest::post("/users/logout/")).await
    }

    async fn auth_check(&self) -> AppResult<AuthStatus> {
        fetch_json(self.transport.as_ref(), ApiRequest::get("/users/auth-check/")).await
    }
}
