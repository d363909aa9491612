use crate::{
    errors::AppResult,
    models::domain::{Question, Quiz},
    views::loadable::Loadable,
};

#[derive(Debug, Clone, PartialEq)]
pub struct QuizDetail {
    pub quiz_id: i64,
    pub quiz: Loadable<Quiz>,
    /// Last failed action; the loaded quiz stays on screen.
    pub error: Option<String>,
}

impl QuizDetail {
    pub fn new(quiz_id: i64) -> Self {
        Self {
            quiz_id,
            quiz: Loadable::Loading,
            error: None,
        }
    }

    pub fn loaded(&mut self, result: AppResult<Quiz>) {
        self.quiz = Loadable::from_result(result);
        self.error = None;
    }

    pub fn questions(&self) -> &[Question] {
        self.quiz
            .value()
            .map(|quiz| quiz.questions.as_slice())
            .unwrap_or(&[])
    }

    pub fn question(&self, question_id: i64) -> Option<&Question> {
        self.quiz.value().and_then(|quiz| quiz.question(question_id))
    }

    pub fn remove_question(&mut self, question_id: i64) {
        if let Some(quiz) = self.quiz.value_mut() {
            quiz.questions.retain(|q| q.id != question_id);
        }
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }
}
