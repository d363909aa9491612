use std::collections::BTreeSet;

use crate::{errors::AppResult, models::domain::Question, views::loadable::Loadable};

pub const PAGE_SIZE: usize = 10;

/// Paged preview of a quiz's questions before an attempt. Correct answers
/// are hidden until a question is expanded.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionBank {
    pub quiz_id: i64,
    pub questions: Loadable<Vec<Question>>,
    pub page: usize,
    pub expanded: BTreeSet<i64>,
}

impl QuestionBank {
    pub fn new(quiz_id: i64) -> Self {
        Self {
            quiz_id,
            questions: Loadable::Loading,
            page: 0,
            expanded: BTreeSet::new(),
        }
    }

    pub fn loaded(&mut self, result: AppResult<Vec<Question>>) {
        self.questions = Loadable::from_result(result);
        self.page = 0;
        self.expanded.clear();
    }

    fn all(&self) -> &[Question] {
        self.questions.value().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn page_count(&self) -> usize {
        self.all().len().div_ceil(PAGE_SIZE).max(1)
    }

    pub fn visible(&self) -> &[Question] {
        let all = self.all();
        let start = (self.page * PAGE_SIZE).min(all.len());
        let end = (start + PAGE_SIZE).min(all.len());
        &all[start..end]
    }

    pub fn next_page(&mut self) {
        if self.page + 1 < self.page_count() {
            self.page += 1;
        }
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn toggle(&mut self, question_id: i64) {
        if !self.expanded.remove(&question_id) {
            self.expanded.insert(question_id);
        }
    }

    pub fn is_expanded(&self, question_id: i64) -> bool {
        self.expanded.contains(&question_id)
    }
}
