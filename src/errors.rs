use axum::http::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MoodError {
    #[error("invalid date key '{value}': expected YYYY-MM-DD")]
    InvalidDateKey { value: String },

    #[error("invalid month '{value}': expected YYYY-MM")]
    InvalidMonth { value: String },

    #[error("saved moods could not be parsed: {source}")]
    HydrationParse {
        #[source]
        source: serde_json::Error,
    },

    #[error("saved moods are inconsistent: {reason}")]
    HydrationShape { reason: String },

    #[error("failed to read snapshot {}: {source}", .path.display())]
    SnapshotRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write snapshot {}: {source}", .path.display())]
    PersistenceWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<MoodError> for AppError {
    fn from(err: MoodError) -> Self {
        match err {
            MoodError::InvalidDateKey { .. } | MoodError::InvalidMonth { .. } => {
                Self::bad_request(err.to_string())
            }
            other => Self::internal(other),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
