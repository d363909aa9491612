use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Answer, Question, QuestionType};

/// Not `Debug`: it carries the plaintext password.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct QuizRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: String,
}

impl QuizRequest {
    pub fn new(title: &str, description: &str) -> Self {
        QuizRequest {
            title: title.trim().to_string(),
            description: description.trim().to_string(),
        }
    }
}

/// Body for creating or replacing a question.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct QuestionRequest {
    #[validate(length(min = 1, message = "Question text is required"))]
    pub text: String,

    pub question_type: QuestionType,

    pub answers: Vec<Answer>,
}

impl From<&Question> for QuestionRequest {
    fn from(question: &Question) -> Self {
        QuestionRequest {
            text: question.text.clone(),
            question_type: question.question_type,
            answers: question.answers.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StartAttemptRequest {
    pub quiz: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubmitAttemptRequest {
    pub answers: Vec<SubmittedAnswer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubmittedAnswer {
    pub question: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_answer: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_answer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AddTempQuestionsRequest {
    pub question_ids: Vec<i64>,
}
