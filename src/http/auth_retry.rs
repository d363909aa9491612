use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::{
    errors::{AppError, AppResult},
    http::{
        navigation::{routes, Navigator},
        transport::{ApiRequest, ApiResponse, HttpTransport},
    },
};

/// Renews the session credential after the backend rejected it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialRefresher: Send + Sync {
    async fn refresh(&self) -> AppResult<()>;

    /// Marks the local session as no longer usable.
    async fn invalidate(&self);
}

/// Wraps a transport so that a 401 triggers one credential refresh followed by
/// one replay of the identical request.
///
/// When the refresh fails, or the replay is rejected again, the session is
/// invalidated, the navigator is sent to the login route and the call fails
/// with `AppError::Unauthorized`.
pub struct AuthenticatedClient {
    inner: Arc<dyn HttpTransport>,
    refresher: Arc<dyn CredentialRefresher>,
    navigator: Arc<dyn Navigator>,
    max_retries: u8,
}

impl AuthenticatedClient {
    pub fn new(
        inner: Arc<dyn HttpTransport>,
        refresher: Arc<dyn CredentialRefresher>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            inner,
            refresher,
            navigator,
            max_retries: 1,
        }
    }

    /// Capped at one retry; a larger value would loop on a dead session.
    pub fn with_max_retries(mut self, max_retries: u8) -> Self {
        self.max_retries = max_retries.min(1);
        self
    }

    pub fn max_retries(&self) -> u8 {
        self.max_retries
    }

    pub async fn fetch_with_auth(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        let mut response = self.inner.send(request.clone()).await?;
        let mut retries = 0;

        while response.status == StatusCode::UNAUTHORIZED && retries < self.max_retries {
            retries += 1;
            log::info!(
                "[{}] {} {} returned 401, refreshing credentials",
                request.request_id,
                request.method.as_str(),
                request.path
            );

            if let Err(err) = self.refresher.refresh().await {
                log::warn!("Credential refresh failed: {}", err);
                return Err(self.session_lost(&request, &response).await);
            }

            response = self.inner.send(request.clone()).await?;
        }

        if response.status == StatusCode::UNAUTHORIZED {
            return Err(self.session_lost(&request, &response).await);
        }

        Ok(response)
    }

    async fn session_lost(&self, request: &ApiRequest, response: &ApiResponse) -> AppError {
        log::warn!(
            "[{}] Session could not be recovered, redirecting to {}",
            request.request_id,
            routes::LOGIN
        );
        self.refresher.invalidate().await;
        self.navigator.navigate(routes::LOGIN);
        AppError::from_status(response.status, &request.path, &response.body)
    }
}

#[async_trait]
impl HttpTransport for AuthenticatedClient {
    async fn send(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        self.fetch_with_auth(request).await
    }
}
