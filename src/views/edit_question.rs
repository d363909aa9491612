use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Answer, Question, QuestionType},
        dto::request::QuestionRequest,
    },
};

/// Answer row while editing. New rows carry a negative placeholder id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditAnswer {
    pub id: i64,
    pub text: String,
    pub is_correct: bool,
}

impl EditAnswer {
    pub fn is_placeholder(&self) -> bool {
        self.id < 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditQuestionForm {
    pub quiz_id: i64,
    pub question_id: i64,
    pub text: String,
    pub question_type: QuestionType,
    pub answers: Vec<EditAnswer>,
    /// Persisted answers removed from the form, deleted on save.
    pub removed: Vec<i64>,
    next_placeholder: i64,
}

impl EditQuestionForm {
    pub fn from_question(quiz_id: i64, question: &Question) -> Self {
        let mut form = Self {
            quiz_id,
            question_id: question.id,
            text: question.text.clone(),
            question_type: question.question_type,
            answers: Vec::with_capacity(question.answers.len()),
            removed: Vec::new(),
            next_placeholder: -1,
        };

        for answer in &question.answers {
            let id = match answer.id {
                Some(id) => id,
                None => form.placeholder(),
            };
            form.answers.push(EditAnswer {
                id,
                text: answer.text.clone(),
                is_correct: answer.is_correct,
            });
        }

        form
    }

    fn placeholder(&mut self) -> i64 {
        let id = self.next_placeholder;
        self.next_placeholder -= 1;
        id
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    pub fn set_type(&mut self, question_type: QuestionType) {
        self.question_type = question_type;
    }

    /// Returns the placeholder id of the new row.
    pub fn add_answer(&mut self) -> i64 {
        let id = self.placeholder();
        self.answers.push(EditAnswer {
            id,
            text: String::new(),
            is_correct: false,
        });
        id
    }

    fn answer_mut(&mut self, index: usize) -> AppResult<&mut EditAnswer> {
        self.answers
            .get_mut(index)
            .ok_or_else(|| AppError::Validation(format!("There is no answer {}", index + 1)))
    }

    pub fn set_answer_text(&mut self, index: usize, text: &str) -> AppResult<()> {
        self.answer_mut(index)?.text = text.to_string();
        Ok(())
    }

    pub fn set_correct(&mut self, index: usize, correct: bool) -> AppResult<()> {
        self.answer_mut(index)?;
        let exclusive = self.question_type == QuestionType::MultipleChoice;
        for (i, answer) in self.answers.iter_mut().enumerate() {
            if i == index {
                answer.is_correct = correct;
            } else if exclusive && correct {
                answer.is_correct = false;
            }
        }
        Ok(())
    }

    pub fn delete_answer(&mut self, index: usize) -> AppResult<()> {
        self.answer_mut(index)?;
        let answer = self.answers.remove(index);
        if !answer.is_placeholder() {
            self.removed.push(answer.id);
        }
        Ok(())
    }

    /// Placeholder ids are stripped so the backend assigns real ones.
    pub fn request(&self) -> AppResult<QuestionRequest> {
        let request = QuestionRequest {
            text: self.text.trim().to_string(),
            question_type: self.question_type,
            answers: self
                .answers
                .iter()
                .map(|a| Answer {
                    id: (!a.is_placeholder()).then_some(a.id),
                    text: a.text.trim().to_string(),
                    is_correct: a.is_correct,
                })
                .collect(),
        };
        request.validate()?;

        if self.question_type == QuestionType::MultipleChoice
            && request.answers.iter().filter(|a| a.is_correct).count() != 1
        {
            return Err(AppError::Validation(
                "Mark exactly one answer as correct".to_string(),
            ));
        }

        Ok(request)
    }
}
