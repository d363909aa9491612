pub mod attempt_api;
pub mod auth_api;
pub mod quiz_api;

pub use attempt_api::{AttemptApi, HttpAttemptApi};
pub use auth_api::{AuthApi, HttpAuthApi};
pub use quiz_api::{HttpQuizApi, QuizApi};

use serde::de::DeserializeOwned;

use crate::{
    errors::AppResult,
    http::{ApiRequest, HttpTransport},
};

/// Sends a request and decodes a successful JSON body.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    transport: &dyn HttpTransport,
    request: ApiRequest,
) -> AppResult<T> {
    let path = request.path.clone();
    transport.send(request).await?.error_for_status(&path)?.json()
}

/// Sends a request whose response body is irrelevant.
pub(crate) async fn fetch_empty(transport: &dyn HttpTransport, request: ApiRequest) -> AppResult<()> {
    let path = request.path.clone();
    transport.send(request).await?.error_for_status(&path)?;
    Ok(())
}
