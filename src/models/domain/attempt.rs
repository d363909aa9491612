use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::user::UserRef;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Attempt {
    pub id: i64,
    pub quiz: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRef>,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    /// Percentage in `0.0..=100.0`, set by the backend on submit.
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub user_answers: Vec<UserAnswer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answers: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_questions: Option<u32>,
}

impl Attempt {
    pub fn is_submitted(&self) -> bool {
        self.end_time.is_some()
    }

    pub fn answer_for(&self, question_id: i64) -> Option<&UserAnswer> {
        self.user_answers.iter().find(|a| a.question == question_id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserAnswer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub question: i64,
    #[serde(default)]
    pub selected_answer: Option<i64>,
    #[serde(default)]
    pub text_answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
}

/// One row of `GET /attempts/overview`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AttemptOverview {
    #[serde(alias = "quiz_id")]
    pub id: i64,
    pub title: String,
    pub attempt_count: u32,
    #[serde(default)]
    pub highest_score: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scored_attempt_deserializes() {
        let json = r#"{
            "id": 10,
            "quiz": 2,
            "user": "alice",
            "start_time": "2024-05-01T10:00:00Z",
            "end_time": "2024-05-01T10:05:00Z",
            "score": 66.67,
            "user_answers": [
                {"id": 1, "question": 1, "selected_answer": 3, "text_answer": null},
                {"id": 2, "question": 2, "selected_answer": null, "text_answer": "TCP", "is_correct": true}
            ]
        }"#;

        let attempt: Attempt = serde_json::from_str(json).expect("attempt should deserialize");

        assert!(attempt.is_submitted());
        assert_eq!(attempt.score, Some(66.67));
        assert_eq!(attempt.user, Some(UserRef::Username("alice".to_string())));
        assert_eq!(attempt.answer_for(2).and_then(|a| a.text_answer.as_deref()), Some("TCP"));
        assert_eq!(attempt.answer_for(1).and_then(|a| a.is_correct), None);
    }

    #[test]
    fn fresh_attempt_has_no_end_time() {
        let json = r#"{"id": 11, "quiz": 2, "user": 4, "start_time": "2024-05-01T10:00:00Z", "end_time": null, "score": null, "user_answers": []}"#;
        let attempt: Attempt = serde_json::from_str(json).unwrap();

        assert!(!attempt.is_submitted());
        assert!(attempt.score.is_none());
    }

    #[test]
    fn overview_accepts_quiz_id_alias() {
        let row: AttemptOverview = serde_json::from_str(
            r#"{"quiz_id": 5, "title": "Rust", "attempt_count": 2, "highest_score": 100.0}"#,
        )
        .unwrap();

        assert_eq!(row.id, 5);
        assert_eq!(row.highest_score, Some(100.0));
    }
}
