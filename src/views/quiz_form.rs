use validator::Validate;

use crate::{
    errors::AppResult,
    models::{domain::Quiz, dto::request::QuizRequest},
};

/// Create/edit form for a quiz's title and description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizForm {
    /// `Some` when editing an existing quiz.
    pub quiz_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub error: Option<String>,
}

impl QuizForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edit(quiz: &Quiz) -> Self {
        Self {
            quiz_id: Some(quiz.id),
            title: quiz.title.clone(),
            description: quiz.description.clone(),
            error: None,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn request(&self) -> AppResult<QuizRequest> {
        let request = QuizRequest::new(&self.title, &self.description);
        request.validate()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::AppError, test_utils::fixtures};

    #[test]
    fn test_request_trims_fields() {
        let form = QuizForm::new().with_title("  Rust  ").with_description(" borrowck ");

        let request = form.request().unwrap();

        assert_eq!(request.title, "Rust");
        assert_eq!(request.description, "borrowck");
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let form = QuizForm::new().with_title("   ");

        let err = form.request().unwrap_err();

        assert!(matches!(err, AppError::Validation(ref m) if m.contains("Title must be between 1 and 200 characters")));
    }

    #[test]
    fn test_overlong_description_is_rejected() {
        let form = QuizForm::new()
            .with_title("Rust")
            .with_description(&"x".repeat(2001));

        assert!(form.request().is_err());
    }

    #[test]
    fn test_edit_prefills_from_quiz() {
        let quiz = fixtures::abc_quiz();

        let form = QuizForm::edit(&quiz);

        assert_eq!(form.quiz_id, Some(1));
        assert_eq!(form.title, "Letters");
    }
}
