use std::sync::Arc;

use crate::{
    api::{AttemptApi, QuizApi},
    errors::{AppError, AppResult},
    http::navigation::{routes, Navigator},
    views::{
        attempt_flow::{reduce, AttemptAction, AttemptState},
        AttemptReview, AttemptsOverview,
    },
};

/// Drives the attempt state machine against the backend.
///
/// Each method takes the current state and returns the next one. Backend
/// failures are folded into the state (an error message on the sheet or a
/// failed review) rather than returned, so the caller can keep rendering.
/// `Err` is reserved for illegal transitions.
pub struct AttemptService {
    attempts: Arc<dyn AttemptApi>,
    quizzes: Arc<dyn QuizApi>,
    navigator: Arc<dyn Navigator>,
}

impl AttemptService {
    pub fn new(
        attempts: Arc<dyn AttemptApi>,
        quizzes: Arc<dyn QuizApi>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            attempts,
            quizzes,
            navigator,
        }
    }

    pub async fn start(&self, state: &AttemptState) -> AppResult<AttemptState> {
        let quiz_id = match state {
            AttemptState::NotStarted { quiz_id, .. } => *quiz_id,
            other => {
                return Err(AppError::InvalidState(format!(
                    "Cannot start an attempt while {}",
                    other.name()
                )))
            }
        };

        let started = async {
            let attempt = self.attempts.start_attempt(quiz_id).await?;
            let questions = self.quizzes.list_questions(quiz_id).await?;
            Ok::<_, AppError>((attempt, questions))
        }
        .await;

        match started {
            Ok((attempt, questions)) => {
                log::info!(
                    "Started attempt {} on quiz {} with {} question(s)",
                    attempt.id,
                    quiz_id,
                    questions.len()
                );
                let next = reduce(
                    state,
                    AttemptAction::Started {
                        attempt_id: attempt.id,
                        questions,
                    },
                )?;
                self.navigator.navigate(&routes::attempt(quiz_id, attempt.id));
                Ok(next)
            }
            Err(err) => {
                log::warn!("Could not start attempt on quiz {}: {}", quiz_id, err);
                reduce(state, AttemptAction::StartFailed(err.to_string()))
            }
        }
    }

    /// Sends the answer sheet once. On success the review is loaded
    /// immediately; on failure the sheet comes back with its answers intact.
    pub async fn submit(&self, state: &AttemptState) -> AppResult<AttemptState> {
        let submitting = reduce(state, AttemptAction::Submit)?;
        let sheet = submitting
            .sheet()
            .ok_or_else(|| AppError::InvalidState("Submitting without an answer sheet".to_string()))?;
        let payload = sheet.submission();
        let (quiz_id, attempt_id) = (sheet.quiz_id, sheet.attempt_id);

        log::info!(
            "Submitting attempt {} with {} answer(s)",
            attempt_id,
            payload.answers.len()
        );

        match self.attempts.submit_attempt(attempt_id, &payload).await {
            Ok(()) => {
                let reviewed = reduce(&submitting, AttemptAction::Submitted)?;
                self.navigator.navigate(&routes::attempt_review(quiz_id, attempt_id));
                self.load_review(&reviewed).await
            }
            Err(err) => {
                log::warn!("Submitting attempt {} failed: {}", attempt_id, err);
                reduce(&submitting, AttemptAction::SubmitFailed(err.to_string()))
            }
        }
    }

    pub async fn load_review(&self, state: &AttemptState) -> AppResult<AttemptState> {
        let (attempt_id, quiz_id) = match state {
            AttemptState::Reviewed {
                attempt_id,
                quiz_id,
                ..
            } => (*attempt_id, *quiz_id),
            other => {
                return Err(AppError::InvalidState(format!(
                    "No review to load while {}",
                    other.name()
                )))
            }
        };

        let loaded = async {
            let attempt = self.attempts.get_attempt(attempt_id).await?;
            let quiz = self.quizzes.get_quiz(quiz_id).await?;
            Ok::<_, AppError>(AttemptReview::build(&attempt, &quiz))
        }
        .await;

        match loaded {
            Ok(review) => reduce(state, AttemptAction::ReviewLoaded(review)),
            Err(err) => reduce(state, AttemptAction::ReviewFailed(err.to_string())),
        }
    }

    pub async fn load_overview(&self, overview: &mut AttemptsOverview) {
        overview.loaded(self.attempts.overview().await);
    }
}
