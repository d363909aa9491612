use serde::{Deserialize, Serialize};

use crate::models::domain::question::{Answer, QuestionType};

/// Candidate question generated from an uploaded source, pending review.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct TempQuestion {
    pub id: i64,
    pub text: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub temp_answers: Vec<Answer>,
}

/// The temp-question endpoint answers with either a bare list or `{questions: [...]}`.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum TempQuestionList {
    Bare(Vec<TempQuestion>),
    Wrapped { questions: Vec<TempQuestion> },
}

impl TempQuestionList {
    pub fn into_vec(self) -> Vec<TempQuestion> {
        match self {
            TempQuestionList::Bare(questions) => questions,
            TempQuestionList::Wrapped { questions } => questions,
        }
    }
}
