use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("{0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Network(_) => "NETWORK_FAILURE",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Validation(_) => "VALIDATION_FAILURE",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::RequestFailed { .. } => "REQUEST_FAILED",
            AppError::Decode(_) => "DECODE_ERROR",
            AppError::InvalidState(_) => "INVALID_STATE",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Io(_) => "IO_ERROR",
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized(_))
    }

    /// Maps a non-2xx response onto an error kind.
    ///
    /// A `detail` field in the body is surfaced verbatim. Field-error maps
    /// (`{"title": ["This field is required."]}`) are flattened into
    /// `title: This field is required.`.
    pub fn from_status(status: StatusCode, path: &str, body: &str) -> Self {
        let detail = extract_detail(body);

        match status {
            StatusCode::UNAUTHORIZED => AppError::Unauthorized(
                detail.unwrap_or_else(|| "Authentication credentials were not provided".to_string()),
            ),
            StatusCode::NOT_FOUND => {
                AppError::NotFound(detail.unwrap_or_else(|| path.to_string()))
            }
            _ => match detail {
                Some(message) => AppError::Validation(message),
                None => AppError::RequestFailed {
                    status: status.as_u16(),
                    message: status
                        .canonical_reason()
                        .unwrap_or("unknown status")
                        .to_string(),
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Detail { detail: String },
    Fields(serde_json::Map<String, serde_json::Value>),
}

fn extract_detail(body: &str) -> Option<String> {
    match serde_json::from_str::<ErrorBody>(body).ok()? {
        ErrorBody::Detail { detail } => Some(detail),
        ErrorBody::Fields(fields) => {
            let messages: Vec<String> = fields
                .iter()
                .filter_map(|(field, value)| {
                    let text = match value {
                        serde_json::Value::String(s) => s.clone(),
                        serde_json::Value::Array(items) => items
                            .iter()
                            .filter_map(|item| item.as_str())
                            .collect::<Vec<_>>()
                            .join(" "),
                        _ => return None,
                    };
                    Some(format!("{}: {}", field, text))
                })
                .collect();

            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
