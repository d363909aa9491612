pub mod attempt_service;
pub mod quiz_service;

pub use attempt_service::AttemptService;
pub use quiz_service::QuizService;
