use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Answer, QuestionType},
        dto::request::QuestionRequest,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftAnswer {
    pub text: String,
    pub is_correct: bool,
}

impl DraftAnswer {
    fn blank(is_correct: bool) -> Self {
        Self {
            text: String::new(),
            is_correct,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftQuestion {
    pub text: String,
    pub question_type: QuestionType,
    pub answers: Vec<DraftAnswer>,
}

impl Default for DraftQuestion {
    fn default() -> Self {
        Self {
            text: String::new(),
            question_type: QuestionType::MultipleChoice,
            answers: vec![DraftAnswer::blank(false)],
        }
    }
}

/// Several new questions composed before any of them is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDrafts {
    pub questions: Vec<DraftQuestion>,
}

impl Default for QuestionDrafts {
    fn default() -> Self {
        Self {
            questions: vec![DraftQuestion::default()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftAction {
    AddQuestion,
    RemoveQuestion(usize),
    SetText { question: usize, text: String },
    SetType { question: usize, question_type: QuestionType },
    AddAnswer(usize),
    RemoveAnswer { question: usize, answer: usize },
    SetAnswerText { question: usize, answer: usize, text: String },
    /// For MCQ drafts, marking one answer correct clears the others.
    SetCorrect { question: usize, answer: usize, correct: bool },
}

fn question_mut(drafts: &mut QuestionDrafts, index: usize) -> AppResult<&mut DraftQuestion> {
    drafts
        .questions
        .get_mut(index)
        .ok_or_else(|| AppError::Validation(format!("There is no question {}", index + 1)))
}

fn answer_mut(question: &mut DraftQuestion, index: usize) -> AppResult<&mut DraftAnswer> {
    question
        .answers
        .get_mut(index)
        .ok_or_else(|| AppError::Validation(format!("There is no answer {}", index + 1)))
}

pub fn reduce(drafts: &QuestionDrafts, action: DraftAction) -> AppResult<QuestionDrafts> {
    let mut next = drafts.clone();

    match action {
        DraftAction::AddQuestion => next.questions.push(DraftQuestion::default()),
        DraftAction::RemoveQuestion(index) => {
            question_mut(&mut next, index)?;
            next.questions.remove(index);
        }
        DraftAction::SetText { question, text } => question_mut(&mut next, question)?.text = text,
        DraftAction::SetType {
            question,
            question_type,
        } => {
            let draft = question_mut(&mut next, question)?;
            draft.question_type = question_type;
            if question_type == QuestionType::ShortAnswer {
                // A short answer keeps one expected answer.
                draft.answers = vec![DraftAnswer::blank(true)];
            }
        }
        DraftAction::AddAnswer(question) => {
            let draft = question_mut(&mut next, question)?;
            if draft.question_type == QuestionType::ShortAnswer {
                return Err(AppError::Validation(
                    "Short answer questions have a single expected answer".to_string(),
                ));
            }
            draft.answers.push(DraftAnswer::blank(false));
        }
        DraftAction::RemoveAnswer { question, answer } => {
            let draft = question_mut(&mut next, question)?;
            answer_mut(draft, answer)?;
            draft.answers.remove(answer);
        }
        DraftAction::SetAnswerText {
            question,
            answer,
            text,
        } => {
            let draft = question_mut(&mut next, question)?;
            answer_mut(draft, answer)?.text = text;
        }
        DraftAction::SetCorrect {
            question,
            answer,
            correct,
        } => {
            let draft = question_mut(&mut next, question)?;
            answer_mut(draft, answer)?;
            let exclusive = draft.question_type == QuestionType::MultipleChoice;
            for (index, candidate) in draft.answers.iter_mut().enumerate() {
                if index == answer {
                    candidate.is_correct = correct;
                } else if exclusive {
                    candidate.is_correct = false;
                }
            }
        }
    }

    Ok(next)
}

impl QuestionDrafts {
    /// Builds one request per draft, in order. Blank answers are dropped.
    pub fn requests(&self) -> AppResult<Vec<QuestionRequest>> {
        if self.questions.is_empty() {
            return Err(AppError::Validation("Add at least one question".to_string()));
        }

        self.questions
            .iter()
            .enumerate()
            .map(|(index, draft)| draft_request(index + 1, draft))
            .collect()
    }
}

fn draft_request(number: usize, draft: &DraftQuestion) -> AppResult<QuestionRequest> {
    let text = draft.text.trim();
    if text.is_empty() {
        return Err(AppError::Validation(format!("Question {}: text is required", number)));
    }

    let answers: Vec<Answer> = draft
        .answers
        .iter()
        .filter(|a| !a.text.trim().is_empty())
        .map(|a| Answer::new(a.text.trim(), a.is_correct))
        .collect();

    if draft.question_type == QuestionType::MultipleChoice {
        if answers.is_empty() {
            return Err(AppError::Validation(format!(
                "Question {}: add at least one answer",
                number
            )));
        }
        if answers.iter().filter(|a| a.is_correct).count() != 1 {
            return Err(AppError::Validation(format!(
                "Question {}: mark exactly one answer as correct",
                number
            )));
        }
    }

    Ok(QuestionRequest {
        text: text.to_string(),
        question_type: draft.question_type,
        answers,
    })
}
