use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated {
        username: String,
        since: DateTime<Utc>,
    },
    /// The credential was rejected and could not be refreshed.
    Expired,
}

/// Explicit session object handed to every component that needs auth state.
///
/// Created at app start, refreshed on demand, torn down at logout.
#[derive(Debug)]
pub struct Session {
    state: RwLock<SessionState>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(SessionState::Anonymous),
        }
    }

    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        matches!(*self.state.read().await, SessionState::Authenticated { .. })
    }

    pub async fn username(&self) -> Option<String> {
        match &*self.state.read().await {
            SessionState::Authenticated { username, .. } => Some(username.clone()),
            _ => None,
        }
    }

    pub async fn authenticate(&self, username: &str) {
        let mut state = self.state.write().await;
        log::info!("Session authenticated for {}", username);
        *state = SessionState::Authenticated {
            username: username.to_string(),
            since: Utc::now(),
        };
    }

    pub async fn expire(&self) {
        let mut state = self.state.write().await;
        if *state != SessionState::Expired {
            log::warn!("Session expired");
        }
        *state = SessionState::Expired;
    }

    pub async fn end(&self) {
        *self.state.write().await = SessionState::Anonymous;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_session_is_anonymous() {
        let session = Session::new();

        assert_eq!(session.state().await, SessionState::Anonymous);
        assert!(!session.is_authenticated().await);
        assert!(session.username().await.is_none());
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let session = Session::new();

        session.authenticate("alice").await;
        assert!(session.is_authenticated().await);
        assert_eq!(session.username().await.as_deref(), Some("alice"));

        session.expire().await;
        assert_eq!(session.state().await, SessionState::Expired);
        assert!(session.username().await.is_none());

        session.end().await;
        assert_eq!(session.state().await, SessionState::Anonymous);
    }
}
