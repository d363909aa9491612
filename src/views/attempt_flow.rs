//! Quiz attempt state machine.
//!
//! `NotStarted -> InProgress -> Submitting -> Reviewed`. Every transition is
//! a pure function of the previous state and an [`AttemptAction`]; network
//! calls live in `services::attempt_service` and feed their outcome back in
//! as actions.

use std::collections::BTreeMap;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Question, QuestionType},
        dto::request::{SubmitAttemptRequest, SubmittedAnswer},
    },
    views::{loadable::Loadable, review::AttemptReview},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerChoice {
    Selected(i64),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    OneAtATime,
    List,
}

/// The in-memory answer sheet of a running attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptSheet {
    pub attempt_id: i64,
    pub quiz_id: i64,
    pub questions: Vec<Question>,
    pub answers: BTreeMap<i64, AnswerChoice>,
    pub current: usize,
    pub layout: Layout,
    pub error: Option<String>,
}

impl AttemptSheet {
    pub fn new(attempt_id: i64, quiz_id: i64, questions: Vec<Question>) -> Self {
        Self {
            attempt_id,
            quiz_id,
            questions,
            answers: BTreeMap::new(),
            current: 0,
            layout: Layout::default(),
            error: None,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn answer(&self, question_id: i64) -> Option<&AnswerChoice> {
        self.answers.get(&question_id)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }

    /// Answer pairs in question order. Unanswered questions are left out.
    pub fn submission(&self) -> SubmitAttemptRequest {
        let answers = self
            .questions
            .iter()
            .filter_map(|question| {
                self.answers.get(&question.id).map(|choice| match choice {
                    AnswerChoice::Selected(answer_id) => SubmittedAnswer {
                        question: question.id,
                        selected_answer: Some(*answer_id),
                        text_answer: None,
                    },
                    AnswerChoice::Text(text) => SubmittedAnswer {
                        question: question.id,
                        selected_answer: None,
                        text_answer: Some(text.clone()),
                    },
                })
            })
            .collect();

        SubmitAttemptRequest { answers }
    }

    fn question(&self, question_id: i64) -> AppResult<&Question> {
        self.questions
            .iter()
            .find(|q| q.id == question_id)
            .ok_or_else(|| {
                AppError::Validation(format!("Question {} is not part of this attempt", question_id))
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttemptState {
    NotStarted {
        quiz_id: i64,
        error: Option<String>,
    },
    InProgress(AttemptSheet),
    Submitting(AttemptSheet),
    Reviewed {
        attempt_id: i64,
        quiz_id: i64,
        review: Loadable<AttemptReview>,
    },
}

impl AttemptState {
    pub fn new(quiz_id: i64) -> Self {
        AttemptState::NotStarted {
            quiz_id,
            error: None,
        }
    }

    /// Opens the review of an already submitted attempt.
    pub fn reviewing(quiz_id: i64, attempt_id: i64) -> Self {
        AttemptState::Reviewed {
            attempt_id,
            quiz_id,
            review: Loadable::Loading,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AttemptState::NotStarted { .. } => "NotStarted",
            AttemptState::InProgress(_) => "InProgress",
            AttemptState::Submitting(_) => "Submitting",
            AttemptState::Reviewed { .. } => "Reviewed",
        }
    }

    pub fn quiz_id(&self) -> i64 {
        match self {
            AttemptState::NotStarted { quiz_id, .. } | AttemptState::Reviewed { quiz_id, .. } => *quiz_id,
            AttemptState::InProgress(sheet) | AttemptState::Submitting(sheet) => sheet.quiz_id,
        }
    }

    pub fn sheet(&self) -> Option<&AttemptSheet> {
        match self {
            AttemptState::InProgress(sheet) | AttemptState::Submitting(sheet) => Some(sheet),
            _ => None,
        }
    }

    pub fn review(&self) -> Option<&Loadable<AttemptReview>> {
        match self {
            AttemptState::Reviewed { review, .. } => Some(review),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttemptAction {
    Started { attempt_id: i64, questions: Vec<Question> },
    StartFailed(String),
    SelectAnswer { question_id: i64, answer_id: i64 },
    /// Blank text clears the answer.
    EnterText { question_id: i64, text: String },
    ClearAnswer(i64),
    Next,
    Previous,
    GoTo(usize),
    SetLayout(Layout),
    Submit,
    SubmitFailed(String),
    Submitted,
    ReviewLoaded(AttemptReview),
    ReviewFailed(String),
}

fn invalid(state: &AttemptState, action: &AttemptAction) -> AppError {
    AppError::InvalidState(format!("{:?} is not allowed while {}", action, state.name()))
}

pub fn reduce(state: &AttemptState, action: AttemptAction) -> AppResult<AttemptState> {
    match (state, action) {
        (AttemptState::NotStarted { quiz_id, .. }, AttemptAction::Started { attempt_id, questions }) => {
            Ok(AttemptState::InProgress(AttemptSheet::new(attempt_id, *quiz_id, questions)))
        }
        (AttemptState::NotStarted { quiz_id, .. }, AttemptAction::StartFailed(message)) => {
            Ok(AttemptState::NotStarted {
                quiz_id: *quiz_id,
                error: Some(message),
            })
        }

        (AttemptState::InProgress(sheet), AttemptAction::Submit) => {
            let mut sheet = sheet.clone();
            sheet.error = None;
            Ok(AttemptState::Submitting(sheet))
        }
        (AttemptState::InProgress(sheet), action) => {
            let mut sheet = sheet.clone();
            edit_sheet(&mut sheet, action)?;
            Ok(AttemptState::InProgress(sheet))
        }

        (AttemptState::Submitting(_), AttemptAction::Submit) => Err(AppError::InvalidState(
            "Submission already in progress".to_string(),
        )),
        (AttemptState::Submitting(sheet), AttemptAction::SubmitFailed(message)) => {
            let mut sheet = sheet.clone();
            sheet.error = Some(message);
            Ok(AttemptState::InProgress(sheet))
        }
        (AttemptState::Submitting(sheet), AttemptAction::Submitted) => {
            Ok(AttemptState::reviewing(sheet.quiz_id, sheet.attempt_id))
        }

        (
            AttemptState::Reviewed {
                attempt_id,
                quiz_id,
                ..
            },
            AttemptAction::ReviewLoaded(review),
        ) => Ok(AttemptState::Reviewed {
            attempt_id: *attempt_id,
            quiz_id: *quiz_id,
            review: Loadable::Loaded(review),
        }),
        (
            AttemptState::Reviewed {
                attempt_id,
                quiz_id,
                ..
            },
            AttemptAction::ReviewFailed(message),
        ) => Ok(AttemptState::Reviewed {
            attempt_id: *attempt_id,
            quiz_id: *quiz_id,
            review: Loadable::Failed(message),
        }),

        (state, action) => Err(invalid(state, &action)),
    }
}

/// Local edits while `InProgress`. None of these touch the network.
fn edit_sheet(sheet: &mut AttemptSheet, action: AttemptAction) -> AppResult<()> {
    match action {
        AttemptAction::SelectAnswer {
            question_id,
            answer_id,
        } => {
            let question = sheet.question(question_id)?;
            if question.question_type != QuestionType::MultipleChoice {
                return Err(AppError::Validation(format!(
                    "Question {} expects a text answer",
                    question_id
                )));
            }
            if question.answer(answer_id).is_none() {
                return Err(AppError::Validation(format!(
                    "Answer {} does not belong to question {}",
                    answer_id, question_id
                )));
            }
            sheet.answers.insert(question_id, AnswerChoice::Selected(answer_id));
        }
        AttemptAction::EnterText { question_id, text } => {
            let question = sheet.question(question_id)?;
            if question.question_type != QuestionType::ShortAnswer {
                return Err(AppError::Validation(format!(
                    "Question {} expects one of its answers to be selected",
                    question_id
                )));
            }
            if text.trim().is_empty() {
                sheet.answers.remove(&question_id);
            } else {
                sheet.answers.insert(question_id, AnswerChoice::Text(text));
            }
        }
        AttemptAction::ClearAnswer(question_id) => {
            sheet.question(question_id)?;
            sheet.answers.remove(&question_id);
        }
        AttemptAction::Next => {
            if !sheet.is_last() {
                sheet.current += 1;
            }
        }
        AttemptAction::Previous => {
            sheet.current = sheet.current.saturating_sub(1);
        }
        AttemptAction::GoTo(index) => {
            if index >= sheet.questions.len() {
                return Err(AppError::Validation(format!(
                    "There is no question {} in this attempt",
                    index + 1
                )));
            }
            sheet.current = index;
        }
        AttemptAction::SetLayout(layout) => sheet.layout = layout,
        other => {
            return Err(AppError::InvalidState(format!(
                "{:?} is not allowed while InProgress",
                other
            )))
        }
    }
    Ok(())
}
