use std::sync::Arc;

use detector_domain::ports::{AnomalyDetector, SeriesRepository};
use detector_domain::RuntimeConfig;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub detector: Arc<dyn AnomalyDetector>,
    pub series_repo: Arc<dyn SeriesRepository>,
    pub metrics: Arc<Metrics>,
}
