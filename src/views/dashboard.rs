use crate::{errors::AppResult, models::domain::Quiz, views::loadable::Loadable};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dashboard {
    pub quizzes: Loadable<Vec<Quiz>>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loaded(&mut self, result: AppResult<Vec<Quiz>>) {
        self.quizzes = Loadable::from_result(result);
    }

    pub fn quiz(&self, quiz_id: i64) -> Option<&Quiz> {
        self.quizzes
            .value()
            .and_then(|quizzes| quizzes.iter().find(|q| q.id == quiz_id))
    }
}
