use std::sync::Arc;

use crate::{
    api::{HttpAttemptApi, HttpAuthApi, HttpQuizApi},
    auth::{AuthService, Session},
    config::Config,
    errors::AppResult,
    http::{AuthenticatedClient, HttpTransport, ReqwestTransport, RouteLog},
    services::{AttemptService, QuizService},
};

/// Everything the front-end needs, wired once at startup.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub quiz_service: Arc<QuizService>,
    pub attempt_service: Arc<AttemptService>,
    pub session: Arc<Session>,
    pub navigator: Arc<RouteLog>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        config.validate()?;
        let transport = Arc::new(ReqwestTransport::new(&config)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Builds the service graph over any transport.
    ///
    /// Auth endpoints use `transport` directly; everything else goes through
    /// the refresh-and-retry client.
    pub fn with_transport(config: Config, transport: Arc<dyn HttpTransport>) -> Self {
        let session = Arc::new(Session::new());
        let navigator = Arc::new(RouteLog::new());

        let auth_api = Arc::new(HttpAuthApi::new(Arc::clone(&transport)));
        let auth_service = Arc::new(AuthService::new(auth_api, Arc::clone(&session)));

        let authenticated: Arc<dyn HttpTransport> = Arc::new(
            AuthenticatedClient::new(transport, auth_service.clone(), navigator.clone())
                .with_max_retries(config.max_auth_retries),
        );

        let quiz_api = Arc::new(HttpQuizApi::new(Arc::clone(&authenticated)));
        let attempt_api = Arc::new(HttpAttemptApi::new(authenticated));

        let quiz_service = Arc::new(QuizService::new(quiz_api.clone(), navigator.clone()));
        let attempt_service = Arc::new(AttemptService::new(attempt_api, quiz_api, navigator.clone()));

        Self {
            auth_service,
            quiz_service,
            attempt_service,
            session,
            navigator,
            config: Arc::new(config),
        }
    }
}
