use crate::{
    auth::session::Session,
    errors::{AppError, AppResult},
    http::navigation::{routes, Navigator},
};

/// Gate for views that need a logged-in user. Redirects to the login route
/// when the session is not authenticated.
pub async fn require_authenticated(session: &Session, navigator: &dyn Navigator) -> AppResult<String> {
    match session.username().await {
        Some(username) => Ok(username),
        None => {
            navigator.navigate(routes::LOGIN);
            Err(AppError::Unauthorized("Login required".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::navigation::MockNavigator;

    #[tokio::test]
    async fn test_authenticated_session_passes() {
        let session = Session::new();
        session.authenticate("bob").await;
        let mut navigator = MockNavigator::new();
        navigator.expect_navigate().never();

        let username = require_authenticated(&session, &navigator).await.unwrap();

        assert_eq!(username, "bob");
    }

    #[tokio::test]
    async fn test_anonymous_session_redirects_to_login() {
        let session = Session::new();
        let mut navigator = MockNavigator::new();
        navigator
            .expect_navigate()
            .withf(|route| route.to_string() == "/login")
            .times(1)
            .return_const(());

        let result = require_authenticated(&session, &navigator).await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }
}
