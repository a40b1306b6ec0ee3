use tracing::{debug, error};

use crate::AppError;
use crate::AppState;
use detector_domain::LoadedSeries;

pub async fn load_series(state: &AppState) -> Result<LoadedSeries, AppError> {
    let series = state
        .series_repo
        .load_series(&state.config.data_path, state.config.row_policy)
        .await
        .map_err(|err| {
            error!("failed to load series from {}: {}", state.config.data_path, err);
            AppError::Internal(err)
        })?;
    debug!(
        "loaded {} points from {} ({} rows skipped, policy={})",
        series.len(),
        state.config.data_path,
        series.skipped_rows,
        state.config.row_policy.as_str()
    );
    state.metrics.record_series(series.len(), series.skipped_rows);
    Ok(series)
}
