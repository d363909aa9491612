use crate::{errors::AppResult, models::domain::AttemptOverview, views::loadable::Loadable};

/// Per-quiz attempt counts and best scores.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttemptsOverview {
    pub rows: Loadable<Vec<AttemptOverview>>,
}

impl AttemptsOverview {
    pub fn loaded(&mut self, result: AppResult<Vec<AttemptOverview>>) {
        self.rows = Loadable::from_result(result);
    }

    pub fn total_attempts(&self) -> u32 {
        self.rows
            .value()
            .map(|rows| rows.iter().map(|r| r.attempt_count).sum())
            .unwrap_or(0)
    }
}

/// `"-"` for quizzes that were never scored.
pub fn highest_score_label(row: &AttemptOverview) -> String {
    match row.highest_score {
        Some(score) => format!("{:.2}%", score),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, attempts: u32, best: Option<f64>) -> AttemptOverview {
        AttemptOverview {
            id,
            title: format!("Quiz {}", id),
            attempt_count: attempts,
            highest_score: best,
        }
    }

    #[test]
    fn test_totals_and_labels() {
        let mut overview = AttemptsOverview::default();
        overview.loaded(Ok(vec![row(1, 2, Some(75.0)), row(2, 0, None)]));

        assert_eq!(overview.total_attempts(), 2);
        assert_eq!(highest_score_label(&row(1, 2, Some(75.0))), "75.00%");
        assert_eq!(highest_score_label(&row(2, 0, None)), "-");
    }
}
