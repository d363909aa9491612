#[cfg(test)]
pub mod fixtures {
    use chrono::{TimeZone, Utc};

    use crate::models::domain::{Answer, Attempt, Question, QuestionType, Quiz, UserAnswer};

    /// One MCQ question (id 1) with answers A, B, C (ids 1..=3); C is correct.
    pub fn abc_quiz() -> Quiz {
        Quiz {
            id: 1,
            title: "Letters".to_string(),
            description: "Pick the right letter".to_string(),
            creator: None,
            created_at: None,
            questions: vec![Question {
                id: 1,
                text: "Which letter is correct?".to_string(),
                question_type: QuestionType::MultipleChoice,
                answers: vec![
                    Answer::persisted(1, "A", false),
                    Answer::persisted(2, "B", false),
                    Answer::persisted(3, "C", true),
                ],
            }],
        }
    }

    /// MCQ question 10 (answer 101 correct) followed by short-answer question 11 ("TCP").
    pub fn mixed_quiz() -> Quiz {
        Quiz {
            id: 2,
            title: "Networking".to_string(),
            description: String::new(),
            creator: None,
            created_at: None,
            questions: vec![
                Question {
                    id: 10,
                    text: "What is the primary purpose of a web server?".to_string(),
                    question_type: QuestionType::MultipleChoice,
                    answers: vec![
                        Answer::persisted(100, "To store files", false),
                        Answer::persisted(101, "To serve web pages to clients", true),
                    ],
                },
                Question {
                    id: 11,
                    text: "Which protocol guarantees ordered delivery?".to_string(),
                    question_type: QuestionType::ShortAnswer,
                    answers: vec![Answer::persisted(110, "TCP", true)],
                },
            ],
        }
    }

    /// `count` MCQ questions, each with a correct answer `id * 10 + 1`.
    pub fn numbered_quiz(count: i64) -> Quiz {
        Quiz {
            id: 3,
            title: format!("{} questions", count),
            description: String::new(),
            creator: None,
            created_at: None,
            questions: (1..=count)
                .map(|id| Question {
                    id,
                    text: format!("Question {}", id),
                    question_type: QuestionType::MultipleChoice,
                    answers: vec![
                        Answer::persisted(id * 10, "wrong", false),
                        Answer::persisted(id * 10 + 1, "right", true),
                    ],
                })
                .collect(),
        }
    }

    pub fn mcq_answer(question: i64, selected: i64) -> UserAnswer {
        UserAnswer {
            id: None,
            question,
            selected_answer: Some(selected),
            text_answer: None,
            is_correct: None,
        }
    }

    pub fn text_answer(question: i64, text: &str) -> UserAnswer {
        UserAnswer {
            id: None,
            question,
            selected_answer: None,
            text_answer: Some(text.to_string()),
            is_correct: None,
        }
    }

    pub fn started_attempt(quiz: &Quiz) -> Attempt {
        Attempt {
            id: 50,
            quiz: quiz.id,
            user: None,
            start_time: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
            end_time: None,
            score: None,
            user_answers: vec![],
            correct_answers: None,
            total_questions: None,
        }
    }

    pub fn submitted_attempt(quiz: &Quiz, answers: Vec<UserAnswer>, score: Option<f64>) -> Attempt {
        Attempt {
            end_time: Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 5, 0).unwrap()),
            score,
            user_answers: answers,
            ..started_attempt(quiz)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_abc_quiz_has_single_correct_answer() {
        let quiz = abc_quiz();
        assert_eq!(quiz.questions[0].correct_answer_count(), 1);
        assert_eq!(quiz.questions[0].correct_answer().and_then(|a| a.id), Some(3));
    }

    #[test]
    fn test_numbered_quiz_ids() {
        let quiz = numbered_quiz(4);
        assert_eq!(quiz.question_count(), 4);
        assert_eq!(quiz.questions[3].correct_answer().and_then(|a| a.id), Some(41));
    }
}
