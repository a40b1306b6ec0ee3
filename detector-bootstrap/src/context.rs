use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use detector_application::{AppState, Metrics};
use detector_infrastructure::{AppConfig, ConfigOverrides, CsvSeriesRepository, HttpAnomalyDetector};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new(overrides: &ConfigOverrides) -> Result<Self> {
        let config = AppConfig::load(overrides).await?;
        Self::from_config(&config)
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let runtime_config = config.to_runtime_config()?;
        let client_config = config.to_client_config();

        let detector = Arc::new(HttpAnomalyDetector::new(&client_config)?);
        info!(
            "detector client ready: endpoint={}, timeout={}s",
            client_config.endpoint, client_config.request_timeout_seconds
        );

        let state = AppState {
            config: runtime_config,
            detector,
            series_repo: Arc::new(CsvSeriesRepository::new()),
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}
