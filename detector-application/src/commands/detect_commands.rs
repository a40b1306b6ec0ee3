use anyhow::anyhow;
use tracing::{info, warn};

use crate::{AppError, AppState, DetectionReport, EntireSeriesOutcome, FlaggedPoint, LastPointOutcome};
use detector_domain::DetectionRequest;

pub async fn detect_entire_series(
    state: &AppState,
    request: &DetectionRequest,
) -> Result<EntireSeriesOutcome, AppError> {
    state.metrics.record_detection_call();
    let result = match state.detector.detect_entire_series(request).await {
        Ok(result) => result,
        Err(err) => {
            state.metrics.record_detection_failure();
            warn!("entire series detection failed: {}", err);
            return Err(err.into());
        }
    };

    if !result.is_aligned_with(request) {
        state.metrics.record_detection_failure();
        return Err(AppError::Internal(anyhow!(
            "entire series detection returned {} flags for {} points",
            result.is_anomaly.len(),
            request.series().len()
        )));
    }

    let flagged = result
        .flagged_indices()
        .into_iter()
        .map(|index| FlaggedPoint {
            index,
            point: request.series()[index],
        })
        .collect::<Vec<_>>();
    state.metrics.record_anomalies(flagged.len());
    info!(
        "entire series detection flagged {} of {} points",
        flagged.len(),
        request.series().len()
    );
    Ok(EntireSeriesOutcome { flagged, result })
}

pub async fn detect_last_point(
    state: &AppState,
    request: &DetectionRequest,
) -> Result<LastPointOutcome, AppError> {
    state.metrics.record_detection_call();
    let result = match state.detector.detect_last_point(request).await {
        Ok(result) => result,
        Err(err) => {
            state.metrics.record_detection_failure();
            warn!("last point detection failed: {}", err);
            return Err(err.into());
        }
    };
    info!(
        "last point detection at {}: anomaly={}",
        request.last_point().timestamp,
        result.is_anomaly
    );
    Ok(LastPointOutcome {
        point: *request.last_point(),
        result,
    })
}

/// Issues both detection modes at once. The calls share nothing but the
/// read-only request, so the report is the same as running them in turn.
pub async fn detect_concurrently(
    state: &AppState,
    request: &DetectionRequest,
) -> Result<DetectionReport, AppError> {
    let (entire, last) = tokio::try_join!(
        detect_entire_series(state, request),
        detect_last_point(state, request)
    )?;
    Ok(DetectionReport { entire, last })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};
    use detector_domain::{
        AnomalyDetector, DetectionOptions, DetectorError, EntireSeriesResult, Granularity,
        LastPointResult, LoadedSeries, RowPolicy, RuntimeConfig, Sensitivity, SeriesRepository,
        TimeSeriesPoint,
    };

    use super::*;
    use crate::Metrics;

    enum Behavior {
        Flags(Vec<usize>),
        Misaligned,
        Reject,
    }

    struct StubDetector {
        behavior: Behavior,
    }

    #[async_trait]
    impl AnomalyDetector for StubDetector {
        async fn detect_entire_series(
            &self,
            request: &DetectionRequest,
        ) -> Result<EntireSeriesResult, DetectorError> {
            match &self.behavior {
                Behavior::Flags(indices) => {
                    let mut is_anomaly = vec![false; request.series().len()];
                    for index in indices {
                        is_anomaly[*index] = true;
                    }
                    Ok(EntireSeriesResult {
                        is_anomaly,
                        ..EntireSeriesResult::default()
                    })
                }
                Behavior::Misaligned => Ok(EntireSeriesResult {
                    is_anomaly: vec![true],
                    ..EntireSeriesResult::default()
                }),
                Behavior::Reject => Err(rejection()),
            }
        }

        async fn detect_last_point(
            &self,
            request: &DetectionRequest,
        ) -> Result<LastPointResult, DetectorError> {
            match &self.behavior {
                Behavior::Flags(indices) => Ok(LastPointResult {
                    is_anomaly: indices.contains(&(request.series().len() - 1)),
                    ..LastPointResult::default()
                }),
                Behavior::Misaligned => Ok(LastPointResult::default()),
                Behavior::Reject => Err(rejection()),
            }
        }
    }

    struct NoSeries;

    #[async_trait]
    impl SeriesRepository for NoSeries {
        async fn load_series(&self, _path: &str, _policy: RowPolicy) -> anyhow::Result<LoadedSeries> {
            Ok(LoadedSeries::default())
        }
    }

    fn rejection() -> DetectorError {
        DetectorError::Rejected {
            status: 400,
            code: Some("InvalidSeries".to_string()),
            message: "The series is invalid".to_string(),
        }
    }

    fn state(behavior: Behavior, concurrent: bool) -> AppState {
        AppState {
            config: RuntimeConfig {
                data_path: "unused.csv".to_string(),
                row_policy: RowPolicy::Lenient,
                granularity: Granularity::Daily,
                sensitivity: Sensitivity::default(),
                max_anomaly_ratio: None,
                custom_interval: None,
                period: None,
                concurrent,
            },
            detector: Arc::new(StubDetector { behavior }),
            series_repo: Arc::new(NoSeries),
            metrics: Arc::new(Metrics::default()),
        }
    }

    fn request(len: usize) -> DetectionRequest {
        let start = Utc.with_ymd_and_hms(2021, 10, 1, 0, 0, 0).unwrap();
        let series = (0..len)
            .map(|i| TimeSeriesPoint::new(start + Duration::days(i as i64), i as f64))
            .collect();
        DetectionRequest::new(
            series,
            Granularity::Daily,
            Sensitivity::default(),
            DetectionOptions::default(),
        )
        .expect("request")
    }

    #[tokio::test]
    async fn entire_series_collects_flagged_points() {
        let state = state(Behavior::Flags(vec![1, 4, 13]), false);
        let outcome = detect_entire_series(&state, &request(14)).await.expect("outcome");
        assert_eq!(outcome.total(), 3);
        let indices = outcome.flagged.iter().map(|f| f.index).collect::<Vec<_>>();
        assert_eq!(indices, vec![1, 4, 13]);
        assert_eq!(outcome.flagged[1].point.value, 4.0);
        assert_eq!(state.metrics.anomalies(), 3);
        assert_eq!(state.metrics.detection_calls(), 1);
    }

    #[tokio::test]
    async fn entire_series_without_flags_has_no_anomalies() {
        let state = state(Behavior::Flags(Vec::new()), false);
        let outcome = detect_entire_series(&state, &request(12)).await.expect("outcome");
        assert!(!outcome.has_anomalies());
        assert_eq!(outcome.total(), 0);
    }

    #[tokio::test]
    async fn misaligned_response_is_rejected() {
        let state = state(Behavior::Misaligned, false);
        let err = detect_entire_series(&state, &request(12))
            .await
            .expect_err("misaligned");
        match err {
            AppError::Internal(inner) => assert!(inner.to_string().contains("1 flags for 12 points")),
            _ => panic!("unexpected error type"),
        }
        assert_eq!(state.metrics.detection_failures(), 1);
    }

    #[tokio::test]
    async fn service_rejection_keeps_service_message() {
        let state = state(Behavior::Reject, false);
        let err = detect_last_point(&state, &request(12))
            .await
            .expect_err("rejected");
        match err {
            AppError::ServiceRejected { status, code, message } => {
                assert_eq!(status, 400);
                assert_eq!(code.as_deref(), Some("InvalidSeries"));
                assert_eq!(message, "The series is invalid");
            }
            _ => panic!("unexpected error type"),
        }
        assert_eq!(state.metrics.detection_failures(), 1);
    }

    #[tokio::test]
    async fn last_point_reports_final_point() {
        let state = state(Behavior::Flags(vec![11]), false);
        let outcome = detect_last_point(&state, &request(12)).await.expect("outcome");
        assert!(outcome.is_anomaly());
        assert_eq!(outcome.point.value, 11.0);
    }

    #[tokio::test]
    async fn concurrent_detection_matches_sequential() {
        let request = request(20);
        let sequential = state(Behavior::Flags(vec![3, 19]), false);
        let entire = detect_entire_series(&sequential, &request).await.expect("entire");
        let last = detect_last_point(&sequential, &request).await.expect("last");

        let concurrent = state(Behavior::Flags(vec![3, 19]), true);
        let report = detect_concurrently(&concurrent, &request).await.expect("report");
        assert_eq!(report.entire.flagged, entire.flagged);
        assert_eq!(report.last.is_anomaly(), last.is_anomaly());
        assert_eq!(concurrent.metrics.detection_calls(), 2);
    }
}
