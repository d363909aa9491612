use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::errors::{AppError, AppResult};

/// Terminal front-end for the quiz backend.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Backend API base URL (overrides QUIZ_API_URL).
    #[arg(long)]
    pub api_url: Option<String>,

    /// Username to log in with (overrides QUIZ_USERNAME).
    #[arg(short, long)]
    pub username: Option<String>,

    /// Request timeout in seconds (overrides QUIZ_REQUEST_TIMEOUT_SECS).
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// One line typed at the shell prompt.
#[derive(Parser, Debug, PartialEq)]
#[command(no_binary_name = true, disable_help_subcommand = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum ShellCommand {
    /// Log in; prompts for the password.
    Login { username: Option<String> },
    Logout,
    /// Show who is logged in.
    Whoami,
    /// List quizzes.
    #[command(alias = "ls")]
    Quizzes,
    /// Show one quiz with its questions.
    Quiz { quiz_id: i64 },
    CreateQuiz {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    EditQuiz {
        quiz_id: i64,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    DeleteQuiz { quiz_id: i64 },
    /// Draft several questions and add them to a quiz.
    AddQuestions { quiz_id: i64 },
    EditQuestion { quiz_id: i64, question_id: i64 },
    DeleteQuestion { quiz_id: i64, question_id: i64 },
    /// Preview a quiz's questions and correct answers.
    Bank { quiz_id: i64 },
    /// Upload a PDF or text file to generate questions from.
    Upload { quiz_id: i64, path: PathBuf },
    /// Pick generated questions to keep.
    Generated { quiz_id: i64 },
    /// Take a quiz.
    Attempt { quiz_id: i64 },
    /// Show the scored review of a submitted attempt.
    Review { quiz_id: i64, attempt_id: i64 },
    /// Attempt counts and best scores per quiz.
    Attempts,
    /// Routes visited so far.
    History,
    Help,
    #[command(alias = "exit")]
    Quit,
}

/// Splits a line on whitespace, keeping double-quoted runs together.
pub fn split_args(line: &str) -> AppResult<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    args.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        return Err(AppError::Validation("Unterminated quote".to_string()));
    }
    if has_token {
        args.push(current);
    }
    Ok(args)
}

/// `Ok(None)` for a blank line.
pub fn parse_line(line: &str) -> AppResult<Option<ShellCommand>> {
    let args = split_args(line)?;
    if args.is_empty() {
        return Ok(None);
    }

    ShellLine::try_parse_from(args)
        .map(|parsed| Some(parsed.command))
        .map_err(|e| AppError::Validation(e.to_string().trim_end().to_string()))
}
