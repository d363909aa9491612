pub mod attempt;
pub mod question;
pub mod quiz;
pub mod temp_question;
pub mod user;
pub use attempt::{Attempt, AttemptOverview, UserAnswer};
pub use question::{Answer, Question, QuestionType};
pub use quiz::Quiz;
pub use temp_question::{TempQuestion, TempQuestionList};
pub use user::{AuthStatus, UserRef};
