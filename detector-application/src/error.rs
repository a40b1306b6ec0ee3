use thiserror::Error;

use detector_domain::{DetectorError, RequestError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    ServiceRejected {
        status: u16,
        code: Option<String>,
        message: String,
    },
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<DetectorError> for AppError {
    fn from(value: DetectorError) -> Self {
        match value {
            DetectorError::Rejected {
                status,
                code,
                message,
            } => AppError::ServiceRejected {
                status,
                code,
                message,
            },
            other => AppError::Internal(other.into()),
        }
    }
}

impl From<RequestError> for AppError {
    fn from(value: RequestError) -> Self {
        AppError::BadRequest(value.to_string())
    }
}
