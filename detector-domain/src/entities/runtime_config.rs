// Runtime configuration handed to the application layer

use crate::value_objects::{Granularity, RowPolicy, Sensitivity};

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub data_path: String,
    pub row_policy: RowPolicy,
    pub granularity: Granularity,
    pub sensitivity: Sensitivity,
    pub max_anomaly_ratio: Option<f64>,
    pub custom_interval: Option<u32>,
    pub period: Option<u32>,
    pub concurrent: bool,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub request_timeout_seconds: u64,
}
