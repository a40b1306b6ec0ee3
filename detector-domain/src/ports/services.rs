use async_trait::async_trait;

use crate::entities::{DetectionRequest, EntireSeriesResult, LastPointResult};
use crate::errors::DetectorError;

/// Remote anomaly detection. Implementations hold their own connection
/// settings and are shared for the lifetime of a run.
#[async_trait]
pub trait AnomalyDetector: Send + Sync {
    /// Models the whole series at once; each point is judged with the points
    /// before and after it.
    async fn detect_entire_series(
        &self,
        request: &DetectionRequest,
    ) -> Result<EntireSeriesResult, DetectorError>;

    /// Judges only the final point, modelled from the points preceding it.
    async fn detect_last_point(
        &self,
        request: &DetectionRequest,
    ) -> Result<LastPointResult, DetectorError>;
}
