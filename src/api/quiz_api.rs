use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    api::{fetch_empty, fetch_json},
    errors::AppResult,
    http::{ApiRequest, FileUpload, HttpTransport},
    models::{
        domain::{Question, Quiz, TempQuestion, TempQuestionList},
        dto::request::{AddTempQuestionsRequest, QuestionRequest, QuizRequest},
    },
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizApi: Send + Sync {
    async fn list_quizzes(&self) -> AppResult<Vec<Quiz>>;
    async fn get_quiz(&self, quiz_id: i64) -> AppResult<Quiz>;
    async fn create_quiz(&self, request: &QuizRequest) -> AppResult<Quiz>;
    async fn update_quiz(&self, quiz_id: i64, request: &QuizRequest) -> AppResult<Quiz>;
    async fn delete_quiz(&self, quiz_id: i64) -> AppResult<()>;

    async fn list_questions(&self, quiz_id: i64) -> AppResult<Vec<Question>>;
    async fn get_question(&self, quiz_id: i64, question_id: i64) -> AppResult<Question>;
    async fn create_question(&self, quiz_id: i64, request: &QuestionRequest) -> AppResult<Question>;
    async fn update_question(
        &self,
        quiz_id: i64,
        question_id: i64,
        request: &QuestionRequest,
    ) -> AppResult<Question>;
    async fn delete_question(&self, quiz_id: i64, question_id: i64) -> AppResult<()>;
    async fn delete_answer(&self, quiz_id: i64, question_id: i64, answer_id: i64) -> AppResult<()>;

    async fn list_temp_questions(&self, quiz_id: i64) -> AppResult<Vec<TempQuestion>>;
    async fn add_temp_questions(&self, quiz_id: i64, question_ids: &[i64]) -> AppResult<()>;
    async fn upload_source(&self, quiz_id: i64, file: FileUpload) -> AppResult<()>;
}

fn quiz_path(quiz_id: i64) -> String {
    format!("/quizzes/{}/", quiz_id)
}

fn questions_path(quiz_id: i64) -> String {
    format!("/quizzes/{}/questions/", quiz_id)
}

fn question_path(quiz_id: i64, question_id: i64) -> String {
    format!("/quizzes/{}/questions/{}/", quiz_id, question_id)
}

pub struct HttpQuizApi {
    transport: Arc<dyn HttpTransport>,
}

impl HttpQuizApi {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    fn transport(&self) -> &dyn HttpTransport {
        self.transport.as_ref()
    }
}

#[async_trait]
impl QuizApi for HttpQuizApi {
    async fn list_quizzes(&self) -> AppResult<Vec<Quiz>> {
        fetch_json(self.transport(), ApiRequest::get("/quizzes/")).await
    }

    async fn get_quiz(&self, quiz_id: i64) -> AppResult<Quiz> {
        fetch_json(self.transport(), ApiRequest::get(quiz_path(quiz_id))).await
    }

    async fn create_quiz(&self, request: &QuizRequest) -> AppResult<Quiz> {
        let request = ApiRequest::post("/quizzes/").with_json(request)?;
        fetch_json(self.transport(), request).await
    }

    async fn update_quiz(&self, quiz_id: i64, request: &QuizRequest) -> AppResult<Quiz> {
        let request = ApiRequest::put(quiz_path(quiz_id)).with_json(request)?;
        fetch_json(self.transport(), request).await
    }

    async fn delete_quiz(&self, quiz_id: i64) -> AppResult<()> {
        fetch_empty(self.transport(), ApiRequest::delete(quiz_path(quiz_id))).await
    }

    async fn list_questions(&self, quiz_id: i64) -> AppResult<Vec<Question>> {
        fetch_json(self.transport(), ApiRequest::get(questions_path(quiz_id))).await
    }

    async fn get_question(&self, quiz_id: i64, question_id: i64) -> AppResult<Question> {
        fetch_json(
            self.transport(),
            ApiRequest::get(question_path(quiz_id, question_id)),
        )
        .await
    }

    async fn create_question(&self, quiz_id: i64, request: &QuestionRequest) -> AppResult<Question> {
        let request = ApiRequest::post(questions_path(quiz_id)).with_json(request)?;
        fetch_json(self.transport(), request).await
    }

    async fn update_question(
        &self,
        quiz_id: i64,
        question_id: i64,
        request: &QuestionRequest,
    ) -> AppResult<Question> {
        let request = ApiRequest::put(question_path(quiz_id, question_id)).with_json(request)?;
        fetch_json(self.transport(), request).await
    }

    async fn delete_question(&self, quiz_id: i64, question_id: i64) -> AppResult<()> {
        fetch_empty(
            self.transport(),
            ApiRequest::delete(question_path(quiz_id, question_id)),
        )
        .await
    }

    async fn delete_answer(&self, quiz_id: i64, question_id: i64, answer_id: i64) -> AppResult<()> {
        let path = format!("{}answers/{}/", question_path(quiz_id, question_id), answer_id);
        fetch_empty(self.transport(), ApiRequest::delete(path)).await
    }

    async fn list_temp_questions(&self, quiz_id: i64) -> AppResult<Vec<TempQuestion>> {
        let path = format!("/quizzes/{}/temp-questions/", quiz_id);
        let list: TempQuestionList = fetch_json(self.transport(), ApiRequest::get(path)).await?;
        Ok(list.into_vec())
    }

    async fn add_temp_questions(&self, quiz_id: i64, question_ids: &[i64]) -> AppResult<()> {
        let body = AddTempQuestionsRequest {
            question_ids: question_ids.to_vec(),
        };
        let request =
            ApiRequest::post(format!("/quizzes/{}/temp-questions/add/", quiz_id)).with_json(&body)?;
        fetch_empty(self.transport(), request).await
    }

    async fn upload_source(&self, quiz_id: i64, file: FileUpload) -> AppResult<()> {
        let request = ApiRequest::post(format!("/quizzes/{}/upload/", quiz_id)).with_file(file);
        fetch_empty(self.transport(), request).await
    }
}
