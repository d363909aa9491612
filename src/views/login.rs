use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::AuthService,
    errors::{AppError, AppResult},
    http::navigation::{routes, Navigator},
};

pub const INVALID_CREDENTIALS: &str = "Invalid Credentials";

pub struct LoginForm {
    pub username: String,
    pub password: SecretString,
}

impl LoginForm {
    pub fn new(username: &str, password: SecretString) -> Self {
        Self {
            username: username.trim().to_string(),
            password,
        }
    }

    /// Collects every field error, one message per field.
    pub fn validate(&self) -> AppResult<()> {
        let mut errors = Vec::new();
        if self.username.is_empty() {
            errors.push("Username is required");
        }
        if self.password.expose_secret().is_empty() {
            errors.push("Password is required");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors.join("; ")))
        }
    }
}

/// Validates the form, logs in and moves to the dashboard.
///
/// Backend rejections are reported as `Invalid Credentials` without detail.
pub async fn submit_login(
    form: &LoginForm,
    auth: &AuthService,
    navigator: &dyn Navigator,
) -> AppResult<String> {
    form.validate()?;

    match auth.login(&form.username, &form.password).await {
        Ok(username) => {
            navigator.navigate(routes::DASHBOARD);
            Ok(username)
        }
        Err(AppError::Unauthorized(_)) | Err(AppError::Validation(_)) => {
            log::info!("Login rejected for {}", form.username);
            Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))
        }
        Err(err) => Err(err),
    }
}
