use async_trait::async_trait;

use crate::entities::LoadedSeries;
use crate::value_objects::RowPolicy;

#[async_trait]
pub trait SeriesRepository: Send + Sync {
    async fn load_series(&self, path: &str, policy: RowPolicy) -> anyhow::Result<LoadedSeries>;
}
