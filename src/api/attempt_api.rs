use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    api::{fetch_empty, fetch_json},
    errors::AppResult,
    http::{ApiRequest, HttpTransport},
    models::{
        domain::{Attempt, AttemptOverview},
        dto::request::{StartAttemptRequest, SubmitAttemptRequest},
    },
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttemptApi: Send + Sync {
    async fn start_attempt(&self, quiz_id: i64) -> AppResult<Attempt>;
    async fn get_attempt(&self, attempt_id: i64) -> AppResult<Attempt>;
    /// The scored attempt is fetched separately; the submit response body is ignored.
    async fn submit_attempt(&self, attempt_id: i64, request: &SubmitAttemptRequest) -> AppResult<()>;
    async fn overview(&self) -> AppResult<Vec<AttemptOverview>>;
}

pub struct HttpAttemptApi {
    transport: Arc<dyn HttpTransport>,
}

impl HttpAttemptApi {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl AttemptApi for HttpAttemptApi {
    async fn start_attempt(&self, quiz_id: i64) -> AppResult<Attempt> {
        let request =
            ApiRequest::post("/attempts/").with_json(&StartAttemptRequest { quiz: quiz_id })?;
        fetch_json(self.transport.as_ref(), request).await
    }

    async fn get_attempt(&self, attempt_id: i64) -> AppResult<Attempt> {
        let path = format!("/attempts/{}", attempt_id);
        fetch_json(self.transport.as_ref(), ApiRequest::get(path)).await
    }

    async fn submit_attempt(&self, attempt_id: i64, request: &SubmitAttemptRequest) -> AppResult<()> {
        let path = format!("/attempts/{}/submit/", attempt_id);
        let request = ApiRequest::post(path).with_json(request)?;
        fetch_empty(self.transport.as_ref(), request).await
    }

    async fn overview(&self) -> AppResult<Vec<AttemptOverview>> {
        fetch_json(self.transport.as_ref(), ApiRequest::get("/attempts/overview")).await
    }
}
