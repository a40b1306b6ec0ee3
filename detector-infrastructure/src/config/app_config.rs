use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use detector_domain::{ClientConfig, Granularity, RowPolicy, RuntimeConfig, Sensitivity};

use crate::config::validation::validate_endpoint;

pub const CONFIG_ENV: &str = "DETECTOR_CONFIG";
pub const DEFAULT_DATA_PATH: &str = "Data/adx_cost_change_row_count.csv";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub data_path: String,
    pub row_policy: String,
    pub granularity: String,
    pub sensitivity: u8,
    pub max_anomaly_ratio: Option<f64>,
    pub custom_interval: Option<u32>,
    pub period: Option<u32>,
    pub concurrent: bool,
    pub request_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: None,
            data_path: DEFAULT_DATA_PATH.to_string(),
            row_policy: RowPolicy::default().as_str().to_string(),
            granularity: Granularity::default().as_str().to_string(),
            sensitivity: Sensitivity::default().value(),
            max_anomaly_ratio: None,
            custom_interval: None,
            period: None,
            concurrent: false,
            request_timeout_seconds: 30,
        }
    }
}

/// Values given on the command line. They win over the file and the
/// environment, and `data_path` is taken relative to the working directory.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_path: Option<String>,
    pub granularity: Option<String>,
    pub sensitivity: Option<u8>,
    pub concurrent: bool,
}

impl AppConfig {
    pub async fn load(overrides: &ConfigOverrides) -> Result<Self> {
        let path = env::var(CONFIG_ENV).unwrap_or_else(|_| "./config.toml".to_string());
        Self::load_from(Path::new(&path), overrides).await
    }

    pub async fn load_from(file_path: &Path, overrides: &ConfigOverrides) -> Result<Self> {
        let (mut config, base_dir) = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            let config: AppConfig = toml::from_str(&content)?;
            (config, file_path.parent().map(Path::to_path_buf))
        } else {
            warn!("{} not found, using defaults", file_path.display());
            (AppConfig::default(), executable_dir())
        };
        config.apply_env_overrides();
        config.resolve_paths(base_dir.as_deref());
        config.apply_cli_overrides(overrides);
        config.normalize();
        config.validate()?;
        if config.api_key.is_none() {
            warn!("api_key not configured, requests will carry no subscription key");
        }
        Ok(config)
    }

    pub fn normalize(&mut self) {
        self.endpoint = self.endpoint.trim().to_string();
        if let Some(api_key) = &self.api_key {
            if api_key.trim().is_empty() {
                self.api_key = None;
            }
        }
        self.granularity = self.granularity.trim().to_lowercase();
        self.row_policy = self.row_policy.trim().to_lowercase();
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.data_path = resolve_path(base, &self.data_path);
    }

    pub fn validate(&self) -> Result<()> {
        validate_endpoint(&self.endpoint)?;
        if self.data_path.trim().is_empty() {
            return Err(anyhow!("data_path must not be empty"));
        }
        self.granularity.parse::<Granularity>()?;
        self.row_policy.parse::<RowPolicy>()?;
        Sensitivity::new(self.sensitivity)?;
        if let Some(ratio) = self.max_anomaly_ratio {
            if !(ratio > 0.0 && ratio < 0.5) {
                return Err(anyhow!("max_anomaly_ratio must be in (0, 0.5)"));
            }
        }
        if self.custom_interval == Some(0) {
            return Err(anyhow!("custom_interval must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> Result<RuntimeConfig> {
        Ok(RuntimeConfig {
            data_path: self.data_path.clone(),
            row_policy: self.row_policy.parse()?,
            granularity: self.granularity.parse()?,
            sensitivity: Sensitivity::new(self.sensitivity)?,
            max_anomaly_ratio: self.max_anomaly_ratio,
            custom_interval: self.custom_interval,
            period: self.period,
            concurrent: self.concurrent,
        })
    }

    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig {
            endpoint: self.endpoint.clone(),
            api_key: self.api_key.clone(),
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| env::var(key).ok());
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("DETECTOR_ENDPOINT") {
            self.endpoint = value;
        }
        if let Some(value) = lookup("DETECTOR_API_KEY") {
            self.api_key = Some(value);
        }
        if let Some(value) = lookup("DETECTOR_DATA_PATH") {
            self.data_path = value;
        }
        if let Some(value) = lookup("DETECTOR_ROW_POLICY") {
            self.row_policy = value;
        }
        if let Some(value) = lookup("DETECTOR_GRANULARITY") {
            self.granularity = value;
        }
        if let Some(value) = lookup("DETECTOR_SENSITIVITY") {
            self.sensitivity = value.parse().unwrap_or(self.sensitivity);
        }
        if let Some(value) = lookup("DETECTOR_MAX_ANOMALY_RATIO") {
            self.max_anomaly_ratio = value.parse().ok();
        }
        if let Some(value) = lookup("DETECTOR_CUSTOM_INTERVAL") {
            self.custom_interval = value.parse().ok();
        }
        if let Some(value) = lookup("DETECTOR_PERIOD") {
            self.period = value.parse().ok();
        }
        if let Some(value) = lookup("DETECTOR_CONCURRENT") {
            self.concurrent = value.parse().unwrap_or(self.concurrent);
        }
        if let Some(value) = lookup("DETECTOR_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
    }

    fn apply_cli_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(path) = &overrides.data_path {
            self.data_path = path.clone();
        }
        if let Some(granularity) = &overrides.granularity {
            self.granularity = granularity.clone();
        }
        if let Some(sensitivity) = overrides.sensitivity {
            self.sensitivity = sensitivity;
        }
        if overrides.concurrent {
            self.concurrent = true;
        }
    }
}

fn executable_dir() -> Option<PathBuf> {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}
