use crate::errors::AppResult;

/// Network-backed view data: pending, present, or failed with a message.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Loadable<T> {
    #[default]
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Loadable<T> {
    pub fn from_result(result: AppResult<T>) -> Self {
        match result {
            Ok(value) => Loadable::Loaded(value),
            Err(err) => Loadable::Failed(err.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Loadable::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn value_mut(&mut self) -> Option<&mut T> {
        match self {
            Loadable::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Loadable::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    #[test]
    fn test_default_is_loading() {
        let state: Loadable<u32> = Loadable::default();
        assert!(state.is_loading());
        assert!(state.value().is_none());
    }

    #[test]
    fn test_from_result() {
        assert_eq!(Loadable::from_result(Ok(3)).value(), Some(&3));

        let failed: Loadable<u32> =
            Loadable::from_result(Err(AppError::NotFound("/quizzes/9/".to_string())));
        assert_eq!(failed.error(), Some("Not found: /quizzes/9/"));
    }
}
