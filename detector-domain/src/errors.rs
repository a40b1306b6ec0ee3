// Domain errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("sensitivity must be between 0 and 99, got {0}")]
    SensitivityOutOfRange(u8),
    #[error("unknown granularity: {0}")]
    UnknownGranularity(String),
    #[error("unknown row policy: {0}")]
    UnknownRowPolicy(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("series needs at least {min} points, got {actual}")]
    TooFewPoints { min: usize, actual: usize },
    #[error("series may hold at most {max} points, got {actual}")]
    TooManyPoints { max: usize, actual: usize },
    #[error("timestamps must be strictly increasing (point {index} is not after point {previous})")]
    OutOfOrder { index: usize, previous: usize },
    #[error("max_anomaly_ratio must be in (0, 0.5), got {0}")]
    MaxAnomalyRatioOutOfRange(f64),
    #[error("custom_interval must be greater than 0")]
    ZeroCustomInterval,
}

/// Failures surfaced by an [`AnomalyDetector`](crate::ports::AnomalyDetector).
#[derive(Debug, Error)]
pub enum DetectorError {
    /// The service answered and refused the request.
    #[error("{message}")]
    Rejected {
        status: u16,
        code: Option<String>,
        message: String,
    },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected service response: {0}")]
    Protocol(String),
}
