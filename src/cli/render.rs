//! Plain-text rendering of view state.

use std::fmt::Write;

use crate::{
    models::domain::{Question, QuestionType, Quiz},
    views::{
        attempt_flow::{AnswerChoice, AttemptSheet, AttemptState, Layout},
        attempts_overview::highest_score_label,
        edit_question::EditQuestionForm,
        question_bank::QuestionBank,
        question_form::QuestionDrafts,
        review::{AttemptReview, Outcome},
        AttemptsOverview, Dashboard, Loadable, QuizDetail, TempReview,
    },
};

fn loadable<T>(state: &Loadable<T>, what: &str, render: impl FnOnce(&T) -> String) -> String {
    match state {
        Loadable::Loading => format!("Loading {}...\n", what),
        Loadable::Failed(message) => format!("Error: {}\n", message),
        Loadable::Loaded(value) => render(value),
    }
}

pub fn dashboard(view: &Dashboard) -> String {
    loadable(&view.quizzes, "quizzes", |quizzes| {
        if quizzes.is_empty() {
            return "No quizzes yet. Create one with: create-quiz \"Title\"\n".to_string();
        }
        let mut out = String::new();
        for quiz in quizzes {
            let _ = writeln!(out, "[{}] {}", quiz.id, quiz.title);
            if !quiz.description.is_empty() {
                let _ = writeln!(out, "     {}", quiz.description);
            }
        }
        out
    })
}

pub fn quiz(quiz: &Quiz) -> String {
    let mut out = format!("[{}] {}\n", quiz.id, quiz.title);
    if !quiz.description.is_empty() {
        let _ = writeln!(out, "{}", quiz.description);
    }
    if let Some(creator) = &quiz.creator {
        let _ = writeln!(out, "Created by {}", creator);
    }
    if quiz.questions.is_empty() {
        out.push_str("No questions yet.\n");
    }
    for (number, question) in quiz.questions.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} ({}) #{}",
            number + 1,
            question.text,
            question.question_type,
            question.id
        );
        for answer in &question.answers {
            let mark = if answer.is_correct { "*" } else { " " };
            let _ = writeln!(out, "   {} {}", mark, answer.text);
        }
    }
    out
}

pub fn quiz_detail(view: &QuizDetail) -> String {
    let mut out = loadable(&view.quiz, "quiz", quiz);
    if let Some(error) = &view.error {
        let _ = writeln!(out, "Error: {}", error);
    }
    out
}

fn attempt_question(out: &mut String, number: usize, question: &Question, choice: Option<&AnswerChoice>) {
    let _ = writeln!(out, "Question {}: {}", number + 1, question.text);
    match question.question_type {
        QuestionType::MultipleChoice => {
            for (index, answer) in question.answers.iter().enumerate() {
                let picked = matches!(choice, Some(AnswerChoice::Selected(id)) if Some(*id) == answer.id);
                let _ = writeln!(
                    out,
                    "  ({}) {}. {}",
                    if picked { "x" } else { " " },
                    index + 1,
                    answer.text
                );
            }
        }
        QuestionType::ShortAnswer => {
            let text = match choice {
                Some(AnswerChoice::Text(text)) => text.as_str(),
                _ => "",
            };
            let _ = writeln!(out, "  Your answer: {}", text);
        }
    }
}

pub fn attempt_sheet(sheet: &AttemptSheet) -> String {
    let mut out = format!(
        "Attempt #{}: {}/{} answered\n",
        sheet.attempt_id,
        sheet.answered_count(),
        sheet.questions.len()
    );

    match sheet.layout {
        Layout::OneAtATime => {
            if let Some(question) = sheet.current_question() {
                attempt_question(&mut out, sheet.current, question, sheet.answer(question.id));
            } else {
                out.push_str("This quiz has no questions. Submit to finish.\n");
            }
        }
        Layout::List => {
            for (number, question) in sheet.questions.iter().enumerate() {
                attempt_question(&mut out, number, question, sheet.answer(question.id));
            }
        }
    }

    if let Some(error) = &sheet.error {
        let _ = writeln!(out, "Error: {}", error);
    }
    out
}

pub fn review(review: &AttemptReview) -> String {
    let mut out = format!("Attempt Review: {}\n", review.quiz_title);
    let _ = writeln!(out, "{}", review.score_label());
    let _ = writeln!(out, "{}", review.correct_label());
    let _ = writeln!(out, "Start Time: {}", review.start_time.format("%Y-%m-%d %H:%M:%S"));
    if let Some(end) = review.end_time {
        let _ = writeln!(out, "End Time: {}", end.format("%Y-%m-%d %H:%M:%S"));
    }

    for (number, item) in review.items.iter().enumerate() {
        let verdict = match item.outcome {
            Outcome::Correct => "correct",
            Outcome::Incorrect => "incorrect",
            Outcome::Unanswered => "unanswered",
            Outcome::Pending => "not graded",
        };
        let _ = writeln!(out, "{}. {} [{}]", number + 1, item.question_text, verdict);
        let _ = writeln!(
            out,
            "   Your answer: {}",
            item.your_answer.as_deref().unwrap_or("-")
        );
        if item.outcome != Outcome::Correct {
            if let Some(correct) = &item.correct_answer {
                let _ = writeln!(out, "   Correct answer: {}", correct);
            }
        }
    }
    out
}

pub fn attempt_state(state: &AttemptState) -> String {
    match state {
        AttemptState::NotStarted { error: Some(error), .. } => format!("Error: {}\n", error),
        AttemptState::NotStarted { .. } => "Starting attempt...\n".to_string(),
        AttemptState::InProgress(sheet) => attempt_sheet(sheet),
        AttemptState::Submitting(_) => "Submitting...\n".to_string(),
        AttemptState::Reviewed { review: state, .. } => loadable(state, "attempt review", review),
    }
}

pub fn overview(view: &AttemptsOverview) -> String {
    loadable(&view.rows, "attempts", |rows| {
        if rows.is_empty() {
            return "No attempts yet.\n".to_string();
        }
        let mut out = format!("{:<6} {:<32} {:>8} {:>10}\n", "Quiz", "Title", "Attempts", "Best");
        for row in rows {
            let _ = writeln!(
                out,
                "{:<6} {:<32} {:>8} {:>10}",
                row.id,
                row.title,
                row.attempt_count,
                highest_score_label(row)
            );
        }
        out
    })
}

pub fn question_bank(bank: &QuestionBank) -> String {
    loadable(&bank.questions, "questions", |_| {
        let mut out = format!("Page {} of {}\n", bank.page + 1, bank.page_count());
        for (row, question) in bank.visible().iter().enumerate() {
            let _ = writeln!(out, "{}. {} ({})", row + 1, question.text, question.question_type);
            if bank.is_expanded(question.id) {
                let answer = question
                    .correct_answer()
                    .map(|a| a.text.as_str())
                    .unwrap_or("(none)");
                let _ = writeln!(out, "   Correct answer: {}", answer);
            }
        }
        out
    })
}

pub fn temp_review(review: &TempReview) -> String {
    loadable(&review.questions, "generated questions", |_| {
        let Some(question) = review.current_question() else {
            return "No questions available for review.\n".to_string();
        };
        let mut out = format!(
            "{} of {} ({} selected)\n",
            review.current + 1,
            review.len(),
            review.selected.len()
        );
        let mark = if review.is_selected(question.id) { "x" } else { " " };
        let _ = writeln!(out, "[{}] {} ({})", mark, question.text, question.question_type);
        for answer in &question.temp_answers {
            let correct = if answer.is_correct { "*" } else { " " };
            let _ = writeln!(out, "   {} {}", correct, answer.text);
        }
        if let Some(error) = &review.error {
            let _ = writeln!(out, "Error: {}", error);
        }
        out
    })
}

pub fn drafts(drafts: &QuestionDrafts) -> String {
    let mut out = String::new();
    for (number, draft) in drafts.questions.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} ({})",
            number + 1,
            if draft.text.is_empty() { "<no text>" } else { &draft.text },
            draft.question_type
        );
        for (index, answer) in draft.answers.iter().enumerate() {
            let mark = if answer.is_correct { "*" } else { " " };
            let _ = writeln!(out, "   {} {}. {}", mark, index + 1, answer.text);
        }
    }
    out
}

pub fn edit_form(form: &EditQuestionForm) -> String {
    let mut out = format!("{} ({})\n", form.text, form.question_type);
    for (index, answer) in form.answers.iter().enumerate() {
        let mark = if answer.is_correct { "*" } else { " " };
        let state = if answer.is_placeholder() { " (new)" } else { "" };
        let _ = writeln!(out, "   {} {}. {}{}", mark, index + 1, answer.text, state);
    }
    if !form.removed.is_empty() {
        let _ = writeln!(out, "   {} answer(s) will be deleted", form.removed.len());
    }
    out
}

pub const HELP: &str = "\
Commands:
  login [username]                    log in (password is prompted)
  logout | whoami
  quizzes | ls                        list quizzes
  quiz <id>                           show a quiz
  create-quiz <title> [-d <desc>]     create a quiz
  edit-quiz <id> [-t <title>] [-d <desc>]
  delete-quiz <id>
  add-questions <quiz>                draft and add questions
  edit-question <quiz> <question>
  delete-question <quiz> <question>
  bank <quiz>                         preview questions and answers
  upload <quiz> <file>                generate questions from a PDF or text file
  generated <quiz>                    pick generated questions to keep
  attempt <quiz>                      take a quiz
  review <quiz> <attempt>             show a scored attempt
  attempts                            attempts per quiz
  history                             routes visited
  help | quit
";
