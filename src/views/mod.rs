//! View state. Each view is a plain struct updated synchronously; network
//! calls happen in `services` and are fed back in as results.

pub mod attempt_flow;
pub mod attempts_overview;
pub mod dashboard;
pub mod edit_question;
pub mod loadable;
pub mod login;
pub mod question_bank;
pub mod question_form;
pub mod quiz_detail;
pub mod quiz_form;
pub mod review;
pub mod temp_review;
pub mod upload;

pub use attempt_flow::{AnswerChoice, AttemptAction, AttemptSheet, AttemptState, Layout};
pub use attempts_overview::AttemptsOverview;
pub use dashboard::Dashboard;
pub use edit_question::EditQuestionForm;
pub use loadable::Loadable;
pub use login::LoginForm;
pub use question_bank::QuestionBank;
pub use question_form::{DraftAction, QuestionDrafts};
pub use quiz_detail::QuizDetail;
pub use quiz_form::QuizForm;
pub use review::{AttemptReview, Outcome};
pub use temp_review::TempReview;
