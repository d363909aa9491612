use std::sync::Mutex;

pub mod routes {
    pub const LOGIN: &str = "/login";
    pub const DASHBOARD: &str = "/dashboard";
    pub const ATTEMPTS: &str = "/attempts";

    pub fn quiz(quiz_id: i64) -> String {
        format!("/quizzes/{}", quiz_id)
    }

    pub fn review_questions(quiz_id: i64) -> String {
        format!("/quizzes/{}/review-questions", quiz_id)
    }

    pub fn attempt(quiz_id: i64, attempt_id: i64) -> String {
        format!("/attempts/{}/attempt/{}", quiz_id, attempt_id)
    }

    pub fn attempt_review(quiz_id: i64, attempt_id: i64) -> String {
        format!("/attempts/{}/attempt/{}/review", quiz_id, attempt_id)
    }
}

/// Receives route changes requested by services (e.g. redirect to login).
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Navigator that remembers every route it was sent to.
#[derive(Debug, Default)]
pub struct RouteLog {
    history: Mutex<Vec<String>>,
}

impl RouteLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<String> {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }

    pub fn history(&self) -> Vec<String> {
        self.history.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Returns the routes visited since the last call and forgets them.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.history.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

impl Navigator for RouteLog {
    fn navigate(&self, route: &str) {
        log::info!("Navigating to {}", route);
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(route.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_log_records_history() {
        let log = RouteLog::new();
        assert!(log.current().is_none());

        log.navigate(routes::DASHBOARD);
        log.navigate(&routes::quiz(4));

        assert_eq!(log.current().as_deref(), Some("/quizzes/4"));
        assert_eq!(log.history(), vec!["/dashboard", "/quizzes/4"]);
    }

    #[test]
    fn test_drain_empties_history() {
        let log = RouteLog::new();
        log.navigate(routes::LOGIN);

        assert_eq!(log.drain(), vec!["/login"]);
        assert!(log.history().is_empty());
    }

    #[test]
    fn test_attempt_routes() {
        assert_eq!(routes::attempt(2, 9), "/attempts/2/attempt/9");
        assert_eq!(routes::attempt_review(2, 9), "/attempts/2/attempt/9/review");
    }
}
