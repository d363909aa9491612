use std::{env, time::Duration};

use reqwest::Url;
use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub max_auth_retries: u8,
    pub username: Option<String>,
    pub password: Option<SecretString>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_base_url: env::var("QUIZ_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            request_timeout_secs: env::var("QUIZ_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            max_auth_retries: env::var("QUIZ_MAX_AUTH_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1),
            username: env::var("QUIZ_USERNAME").ok().filter(|u| !u.trim().is_empty()),
            password: env::var("QUIZ_PASSWORD")
                .ok()
                .filter(|p| !p.is_empty())
                .map(SecretString::from),
        }
    }

    /// Checks the values the HTTP layer depends on.
    pub fn validate(&self) -> AppResult<()> {
        let url = Url::parse(&self.api_base_url).map_err(|e| {
            AppError::Config(format!("QUIZ_API_URL '{}' is not a valid URL: {}", self.api_base_url, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "QUIZ_API_URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        // More than one retry would loop on a permanently invalid session.
        if self.max_auth_retries > 1 {
            return Err(AppError::Config(format!(
                "QUIZ_MAX_AUTH_RETRIES must be 0 or 1, got {}",
                self.max_auth_retries
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err(AppError::Config(
                "QUIZ_REQUEST_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000/api".to_string(),
            request_timeout_secs: 5,
            max_auth_retries: 1,
            username: Some("testuser".to_string()),
            password: Some(SecretString::from("test-password".to_string())),
        }
    }
}
