use chrono::{DateTime, Utc};

use crate::models::domain::{Attempt, Question, QuestionType, Quiz, UserAnswer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    Unanswered,
    /// Short answer with no reference answer to compare against.
    Pending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewItem {
    pub question_id: i64,
    pub question_text: String,
    pub question_type: QuestionType,
    pub your_answer: Option<String>,
    pub correct_answer: Option<String>,
    pub outcome: Outcome,
}

/// A submitted attempt joined with its quiz, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptReview {
    pub attempt_id: i64,
    pub quiz_id: i64,
    pub quiz_title: String,
    pub score: f64,
    pub correct: u32,
    pub incorrect: u32,
    pub unanswered: u32,
    pub total: u32,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub items: Vec<ReviewItem>,
}

impl AttemptReview {
    /// Counts come from the backend when it reports them; otherwise they are
    /// derived from per-question outcomes.
    ///
    /// Backend `correct` and `total` are authoritative. Unanswered is always
    /// counted locally and incorrect is whatever remains, so
    /// `correct + incorrect + unanswered == total` holds either way.
    pub fn build(attempt: &Attempt, quiz: &Quiz) -> Self {
        let items: Vec<ReviewItem> = quiz
            .questions
            .iter()
            .map(|question| review_item(question, attempt.answer_for(question.id)))
            .collect();

        let count = |outcome: Outcome| items.iter().filter(|i| i.outcome == outcome).count() as u32;
        let derived_correct = count(Outcome::Correct);
        let total = attempt.total_questions.unwrap_or(items.len() as u32);
        let correct = attempt.correct_answers.unwrap_or(derived_correct);
        let (incorrect, unanswered) =
            if attempt.correct_answers.is_none() && attempt.total_questions.is_none() {
                (count(Outcome::Incorrect), count(Outcome::Unanswered))
            } else {
                let remaining = total.saturating_sub(correct);
                let unanswered = count(Outcome::Unanswered).min(remaining);
                (remaining - unanswered, unanswered)
            };

        let score = attempt.score.unwrap_or_else(|| {
            if total == 0 {
                0.0
            } else {
                f64::from(correct) * 100.0 / f64::from(total)
            }
        });

        AttemptReview {
            attempt_id: attempt.id,
            quiz_id: quiz.id,
            quiz_title: quiz.title.clone(),
            score,
            correct,
            incorrect,
            unanswered,
            total,
            start_time: attempt.start_time,
            end_time: attempt.end_time,
            items,
        }
    }

    pub fn score_label(&self) -> String {
        format!("Your Score: {:.2}%", self.score)
    }

    pub fn correct_label(&self) -> String {
        format!("Correct answers: {}/{}", self.correct, self.total)
    }
}

fn review_item(question: &Question, answer: Option<&UserAnswer>) -> ReviewItem {
    let correct_answer = question.correct_answer().map(|a| a.text.clone());

    let your_answer = answer.and_then(|a| match question.question_type {
        QuestionType::MultipleChoice => a.selected_answer.map(|id| {
            question
                .answer(id)
                .map(|choice| choice.text.clone())
                .unwrap_or_else(|| format!("answer #{}", id))
        }),
        QuestionType::ShortAnswer => a
            .text_answer
            .as_ref()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()),
    });

    let outcome = match (&your_answer, answer.and_then(|a| a.is_correct)) {
        (None, _) => Outcome::Unanswered,
        (Some(_), Some(true)) => Outcome::Correct,
        (Some(_), Some(false)) => Outcome::Incorrect,
        (Some(given), None) => match question.question_type {
            QuestionType::MultipleChoice => {
                let picked_correct = answer
                    .and_then(|a| a.selected_answer)
                    .and_then(|id| question.answer(id))
                    .map(|choice| choice.is_correct)
                    .unwrap_or(false);
                if picked_correct {
                    Outcome::Correct
                } else {
                    Outcome::Incorrect
                }
            }
            QuestionType::ShortAnswer => match &correct_answer {
                Some(expected) if expected.trim().eq_ignore_ascii_case(given) => Outcome::Correct,
                Some(_) => Outcome::Incorrect,
                None => Outcome::Pending,
            },
        },
    };

    ReviewItem {
        question_id: question.id,
        question_text: question.text.clone(),
        question_type: question.question_type,
        your_answer,
        correct_answer,
        outcome,
    }
}
