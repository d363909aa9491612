use std::{path::Path, sync::Arc};

use crate::{
    api::QuizApi,
    errors::{AppError, AppResult},
    http::navigation::{routes, Navigator},
    models::domain::{Question, Quiz},
    views::{
        edit_question::EditQuestionForm,
        question_form::QuestionDrafts,
        upload::{check_source_size, check_source_type, mime_type_for, prepare_upload},
        Dashboard, QuestionBank, QuizDetail, QuizForm, TempReview,
    },
};

/// Quiz, question and answer management. Every mutation is followed by a
/// refetch of the view that shows its parent.
pub struct QuizService {
    api: Arc<dyn QuizApi>,
    navigator: Arc<dyn Navigator>,
}

impl QuizService {
    pub fn new(api: Arc<dyn QuizApi>, navigator: Arc<dyn Navigator>) -> Self {
        Self { api, navigator }
    }

    pub async fn load_dashboard(&self, dashboard: &mut Dashboard) {
        dashboard.loaded(self.api.list_quizzes().await);
    }

    pub async fn load_detail(&self, detail: &mut QuizDetail) {
        let result = self.api.get_quiz(detail.quiz_id).await;
        detail.loaded(result);
    }

    pub async fn get_quiz(&self, quiz_id: i64) -> AppResult<Quiz> {
        self.api.get_quiz(quiz_id).await
    }

    pub async fn create_quiz(&self, form: &QuizForm, dashboard: &mut Dashboard) -> AppResult<Quiz> {
        let request = form.request()?;
        let quiz = self.api.create_quiz(&request).await?;
        log::info!("Created quiz {} '{}'", quiz.id, quiz.title);

        self.load_dashboard(dashboard).await;
        Ok(quiz)
    }

    pub async fn update_quiz(&self, form: &QuizForm, detail: &mut QuizDetail) -> AppResult<Quiz> {
        let quiz_id = form
            .quiz_id
            .ok_or_else(|| AppError::InvalidState("Quiz form is not editing a quiz".to_string()))?;
        let request = form.request()?;
        let quiz = self.api.update_quiz(quiz_id, &request).await?;
        log::info!("Updated quiz {}", quiz_id);

        self.load_detail(detail).await;
        Ok(quiz)
    }

    /// Navigates back to the dashboard once the quiz is gone.
    pub async fn delete_quiz(&self, quiz_id: i64) -> AppResult<()> {
        self.api.delete_quiz(quiz_id).await?;
        log::info!("Deleted quiz {}", quiz_id);
        self.navigator.navigate(routes::DASHBOARD);
        Ok(())
    }

    /// Creates the drafted questions one after the other, in order.
    pub async fn add_questions(
        &self,
        quiz_id: i64,
        drafts: &QuestionDrafts,
        detail: &mut QuizDetail,
    ) -> AppResult<Vec<Question>> {
        let requests = drafts.requests()?;
        let mut created = Vec::with_capacity(requests.len());

        for request in &requests {
            created.push(self.api.create_question(quiz_id, request).await?);
        }
        log::info!("Added {} question(s) to quiz {}", created.len(), quiz_id);

        self.load_detail(detail).await;
        Ok(created)
    }

    pub async fn load_question(&self, quiz_id: i64, question_id: i64) -> AppResult<EditQuestionForm> {
        let question = self.api.get_question(quiz_id, question_id).await?;
        Ok(EditQuestionForm::from_question(quiz_id, &question))
    }

    /// Deletes removed answers first, then replaces the question.
    ///
    /// Each deleted answer leaves `form.removed` as soon as the backend
    /// confirms it, so a save that fails later can be retried with the same form.
    pub async fn update_question(
        &self,
        form: &mut EditQuestionForm,
        detail: &mut QuizDetail,
    ) -> AppResult<Question> {
        let request = form.request()?;

        while let Some(&answer_id) = form.removed.first() {
            self.api
                .delete_answer(form.quiz_id, form.question_id, answer_id)
                .await?;
            form.removed.remove(0);
        }

        let question = self
            .api
            .update_question(form.quiz_id, form.question_id, &request)
            .await?;
        log::info!("Updated question {} of quiz {}", form.question_id, form.quiz_id);

        self.load_detail(detail).await;
        Ok(question)
    }

    /// Removes the question from the loaded detail without refetching.
    pub async fn delete_question(&self, detail: &mut QuizDetail, question_id: i64) -> AppResult<()> {
        match self.api.delete_question(detail.quiz_id, question_id).await {
            Ok(()) => {
                detail.remove_question(question_id);
                Ok(())
            }
            Err(err) => {
                detail.fail(err.to_string());
                Err(err)
            }
        }
    }

    pub async fn load_question_bank(&self, bank: &mut QuestionBank) {
        bank.loaded(self.api.list_questions(bank.quiz_id).await);
    }

    pub async fn load_temp_questions(&self, review: &mut TempReview) {
        let result = self.api.list_temp_questions(review.quiz_id).await;
        review.loaded(result);
    }

    /// Adds the selected generated questions and returns to the quiz.
    pub async fn add_selected(&self, review: &mut TempReview) -> AppResult<usize> {
        let ids = review.selection()?;

        if let Err(err) = self.api.add_temp_questions(review.quiz_id, &ids).await {
            review.error = Some("Failed to add selected questions".to_string());
            return Err(err);
        }

        review.error = None;
        self.navigator.navigate(&routes::quiz(review.quiz_id));
        Ok(ids.len())
    }

    /// Validates a local document, reads it and uploads it for question
    /// generation. Moves on to the generated-question review.
    ///
    /// Type and size are checked before the file is read.
    pub async fn upload_source(&self, quiz_id: i64, path: &Path) -> AppResult<()> {
        let unreadable =
            |e: std::io::Error| AppError::Validation(format!("Could not read {}: {}", path.display(), e));
        let mime_type = mime_type_for(path);
        check_source_type(mime_type)?;
        let size = tokio::fs::metadata(path).await.map_err(unreadable)?.len();
        check_source_size(size)?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        let bytes = tokio::fs::read(path).await.map_err(unreadable)?;

        let upload = prepare_upload(&file_name, mime_type, bytes)?;
        self.api.upload_source(quiz_id, upload).await?;
        log::info!("Uploaded {} for quiz {}", file_name, quiz_id);

        self.navigator.navigate(&routes::review_questions(quiz_id));
        Ok(())
    }
}
