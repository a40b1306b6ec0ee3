use detector_domain::{DetectionOptions, DetectionRequest, LoadedSeries, RuntimeConfig};

use crate::AppError;

pub fn build_detection_request(
    config: &RuntimeConfig,
    series: LoadedSeries,
) -> Result<DetectionRequest, AppError> {
    let options = DetectionOptions {
        max_anomaly_ratio: config.max_anomaly_ratio,
        custom_interval: config.custom_interval,
        period: config.period,
    };
    let request = DetectionRequest::new(
        series.points,
        config.granularity,
        config.sensitivity,
        options,
    )?;
    Ok(request)
}
