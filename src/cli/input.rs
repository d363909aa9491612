//! Line parsers for the interactive sub-screens. Numbers typed by the user
//! are 1-based; everything returned here is 0-based.

use crate::{
    errors::{AppError, AppResult},
    models::domain::QuestionType,
    views::{
        attempt_flow::{AttemptAction, AttemptSheet, Layout},
        question_form::{DraftAction, QuestionDrafts},
    },
};

fn invalid(message: &str) -> AppError {
    AppError::Validation(message.to_string())
}

fn index(token: Option<&str>, what: &str) -> AppResult<usize> {
    let number: usize = token
        .ok_or_else(|| invalid(&format!("Missing {} number", what)))?
        .parse()
        .map_err(|_| invalid(&format!("Expected a {} number", what)))?;
    number
        .checked_sub(1)
        .ok_or_else(|| invalid(&format!("{} numbers start at 1", what)))
}

fn question_type(token: Option<&str>) -> AppResult<QuestionType> {
    match token {
        Some("mcq") => Ok(QuestionType::MultipleChoice),
        Some("short") | Some("short_answer") => Ok(QuestionType::ShortAnswer),
        _ => Err(invalid("Question type must be 'mcq' or 'short'")),
    }
}

/// Splits `cmd rest of line` into the command word and the trimmed rest.
fn head(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttemptInput {
    Action(AttemptAction),
    Submit,
    Quit,
}

/// `n`, `p`, `g <n>`, `l`, `a <n>`, `t <text>`, `c`, `s`, `q`.
pub fn parse_attempt_input(line: &str, sheet: &AttemptSheet) -> AppResult<AttemptInput> {
    let (cmd, rest) = head(line);
    let current = || {
        sheet
            .current_question()
            .ok_or_else(|| invalid("This quiz has no questions"))
    };

    let action = match cmd {
        "n" | "next" => AttemptAction::Next,
        "p" | "prev" => AttemptAction::Previous,
        "g" | "go" => AttemptAction::GoTo(index(Some(rest), "question")?),
        "l" | "layout" => AttemptAction::SetLayout(match sheet.layout {
            Layout::OneAtATime => Layout::List,
            Layout::List => Layout::OneAtATime,
        }),
        "a" | "answer" => {
            let question = current()?;
            let choice = index(Some(rest), "answer")?;
            let answer_id = question
                .answers
                .get(choice)
                .and_then(|a| a.id)
                .ok_or_else(|| invalid(&format!("There is no answer {}", choice + 1)))?;
            AttemptAction::SelectAnswer {
                question_id: question.id,
                answer_id,
            }
        }
        "t" | "text" => AttemptAction::EnterText {
            question_id: current()?.id,
            text: rest.to_string(),
        },
        "c" | "clear" => AttemptAction::ClearAnswer(current()?.id),
        "s" | "submit" => return Ok(AttemptInput::Submit),
        "q" | "quit" => return Ok(AttemptInput::Quit),
        _ => return Err(invalid("Unknown input; type n, p, g <n>, l, a <n>, t <text>, c, s or q")),
    };

    Ok(AttemptInput::Action(action))
}

#[derive(Debug, Clone, PartialEq)]
pub enum DraftInput {
    Actions(Vec<DraftAction>),
    Show,
    Done,
    Cancel,
}

/// `new`, `remove <q>`, `text <q> <text>`, `type <q> mcq|short`,
/// `answer <q> <text>`, `correct <q> <a>`, `drop <q> <a>`, `show`, `done`, `cancel`.
pub fn parse_draft_input(line: &str, drafts: &QuestionDrafts) -> AppResult<DraftInput> {
    let (cmd, rest) = head(line);
    let (first, tail) = head(rest);

    let actions = match cmd {
        "new" => vec![DraftAction::AddQuestion],
        "remove" => vec![DraftAction::RemoveQuestion(index(Some(first), "question")?)],
        "text" => vec![DraftAction::SetText {
            question: index(Some(first), "question")?,
            text: tail.to_string(),
        }],
        "type" => vec![DraftAction::SetType {
            question: index(Some(first), "question")?,
            question_type: question_type(Some(tail))?,
        }],
        "answer" => {
            let question = index(Some(first), "question")?;
            let draft = drafts
                .questions
                .get(question)
                .ok_or_else(|| invalid(&format!("There is no question {}", question + 1)))?;
            // Fill the trailing blank row before growing the list.
            let reuse_last = draft
                .answers
                .last()
                .map(|a| a.text.trim().is_empty())
                .unwrap_or(false);
            let mut actions = Vec::new();
            let answer = if reuse_last {
                draft.answers.len() - 1
            } else {
                actions.push(DraftAction::AddAnswer(question));
                draft.answers.len()
            };
            actions.push(DraftAction::SetAnswerText {
                question,
                answer,
                text: tail.to_string(),
            });
            actions
        }
        "correct" => {
            let (second, _) = head(tail);
            vec![DraftAction::SetCorrect {
                question: index(Some(first), "question")?,
                answer: index(Some(second), "answer")?,
                correct: true,
            }]
        }
        "drop" => {
            let (second, _) = head(tail);
            vec![DraftAction::RemoveAnswer {
                question: index(Some(first), "question")?,
                answer: index(Some(second), "answer")?,
            }]
        }
        "show" => return Ok(DraftInput::Show),
        "done" => return Ok(DraftInput::Done),
        "cancel" => return Ok(DraftInput::Cancel),
        _ => return Err(invalid("Unknown input; type show for the current drafts")),
    };

    Ok(DraftInput::Actions(actions))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditInput {
    Text(String),
    Type(QuestionType),
    Add(String),
    AnswerText(usize, String),
    Correct(usize),
    Delete(usize),
    Show,
    Save,
    Cancel,
}

/// `text <text>`, `type mcq|short`, `add <text>`, `answer <n> <text>`,
/// `correct <n>`, `delete <n>`, `show`, `save`, `cancel`.
pub fn parse_edit_input(line: &str) -> AppResult<EditInput> {
    let (cmd, rest) = head(line);
    let (first, tail) = head(rest);

    Ok(match cmd {
        "text" => EditInput::Text(rest.to_string()),
        "type" => EditInput::Type(question_type(Some(rest))?),
        "add" => EditInput::Add(rest.to_string()),
        "answer" => EditInput::AnswerText(index(Some(first), "answer")?, tail.to_string()),
        "correct" => EditInput::Correct(index(Some(first), "answer")?),
        "delete" => EditInput::Delete(index(Some(first), "answer")?),
        "show" => EditInput::Show,
        "save" => EditInput::Save,
        "cancel" => EditInput::Cancel,
        _ => return Err(invalid("Unknown input; type show for the current question")),
    })
}

/// Shared by the paged screens: generated-question review and question bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerInput {
    Next,
    Previous,
    /// Toggle selection (review) or expansion (bank) of item `n`.
    Toggle(usize),
    Submit,
    Quit,
}

/// `n`, `p`, `x [n]`, `s`, `q`. A bare `x` toggles the first item.
pub fn parse_pager_input(line: &str) -> AppResult<PagerInput> {
    let (cmd, rest) = head(line);
    Ok(match cmd {
        "n" | "next" => PagerInput::Next,
        "p" | "prev" => PagerInput::Previous,
        "x" | "toggle" if rest.is_empty() => PagerInput::Toggle(0),
        "x" | "toggle" => PagerInput::Toggle(index(Some(rest), "item")?),
        "s" | "submit" => PagerInput::Submit,
        "q" | "quit" => PagerInput::Quit,
        _ => return Err(invalid("Unknown input; type n, p, x [n], s or q")),
    })
}
