use std::sync::Arc;

use async_trait::async_trait;
use secrecy::SecretString;

use crate::{
    api::AuthApi,
    auth::session::{Session, SessionState},
    errors::{AppError, AppResult},
    http::CredentialRefresher,
};

/// Owns the session lifecycle: bootstrap on start, login, refresh, logout.
pub struct AuthService {
    api: Arc<dyn AuthApi>,
    session: Arc<Session>,
}

impl AuthService {
    pub fn new(api: Arc<dyn AuthApi>, session: Arc<Session>) -> Self {
        Self { api, session }
    }

    pub fn session(&self) -> Arc<Session> {
        Arc::clone(&self.session)
    }

    /// Restores a session left in the cookie store by an earlier run.
    ///
    /// Asks the backend whether the cookie is still accepted and, if not,
    /// tries one refresh. Never fails: an unreachable backend leaves the
    /// session anonymous.
    pub async fn bootstrap(&self) -> SessionState {
        match self.api.auth_check().await {
            Ok(status) if status.authenticated => {
                let username = status.username.unwrap_or_default();
                self.session.authenticate(&username).await;
            }
            Ok(_) | Err(AppError::Unauthorized(_)) => match self.api.refresh().await {
                Ok(refreshed) => {
                    let username = refreshed.username.unwrap_or_default();
                    self.session.authenticate(&username).await;
                }
                Err(err) => {
                    log::info!("No session to restore: {}", err);
                    self.session.end().await;
                }
            },
            Err(err) => {
                log::warn!("Auth check failed: {}", err);
                self.session.end().await;
            }
        }

        self.session.state().await
    }

    pub async fn login(&self, username: &str, password: &SecretString) -> AppResult<String> {
        let response = self.api.login(username, password).await?;
        let username = response.username.unwrap_or_else(|| username.to_string());
        self.session.authenticate(&username).await;
        Ok(username)
    }

    /// Ends the local session even when the backend call fails.
    pub async fn logout(&self) {
        if let Err(err) = self.api.logout().await {
            log::warn!("Logout request failed: {}", err);
        }
        self.session.end().await;
        log::info!("Logged out");
    }
}

#[async_trait]
impl CredentialRefresher for AuthService {
    async fn refresh(&self) -> AppResult<()> {
        match self.api.refresh().await {
            Ok(response) => {
                if let Some(username) = response.username {
                    self.session.authenticate(&username).await;
                }
                Ok(())
            }
            Err(err) => {
                self.session.expire().await;
                Err(AppError::Unauthorized(format!("Session refresh failed: {}", err)))
            }
        }
    }

    async fn invalidate(&self) {
        self.session.expire().await;
    }
}
