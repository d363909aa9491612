use std::collections::BTreeSet;

use crate::{
    errors::{AppError, AppResult},
    models::domain::TempQuestion,
    views::loadable::Loadable,
};

/// Review of generated questions, one at a time, choosing which to keep.
#[derive(Debug, Clone, PartialEq)]
pub struct TempReview {
    pub quiz_id: i64,
    pub questions: Loadable<Vec<TempQuestion>>,
    pub current: usize,
    pub selected: BTreeSet<i64>,
    pub error: Option<String>,
}

impl TempReview {
    pub fn new(quiz_id: i64) -> Self {
        Self {
            quiz_id,
            questions: Loadable::Loading,
            current: 0,
            selected: BTreeSet::new(),
            error: None,
        }
    }

    pub fn loaded(&mut self, result: AppResult<Vec<TempQuestion>>) {
        self.questions = Loadable::from_result(result);
        self.current = 0;
        self.selected.clear();
    }

    pub fn len(&self) -> usize {
        self.questions.value().map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn current_question(&self) -> Option<&TempQuestion> {
        self.questions.value().and_then(|qs| qs.get(self.current))
    }

    pub fn next(&mut self) {
        if self.current + 1 < self.len() {
            self.current += 1;
        }
    }

    pub fn previous(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn toggle_current(&mut self) {
        if let Some(id) = self.current_question().map(|q| q.id) {
            if !self.selected.remove(&id) {
                self.selected.insert(id);
            }
        }
    }

    pub fn is_selected(&self, question_id: i64) -> bool {
        self.selected.contains(&question_id)
    }

    pub fn selection(&self) -> AppResult<Vec<i64>> {
        if self.selected.is_empty() {
            return Err(AppError::Validation(
                "Please select at least one question".to_string(),
            ));
        }
        Ok(self.selected.iter().copied().collect())
    }
}
