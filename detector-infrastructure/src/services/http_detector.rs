use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

use detector_domain::ports::AnomalyDetector;
use detector_domain::{
    ClientConfig, DetectionRequest, DetectorError, EntireSeriesResult, LastPointResult,
};

use crate::config::validation::validate_endpoint;
use crate::dtos::{DetectRequestBody, EntireDetectResponse, ErrorResponse, LastDetectResponse};

pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
pub const CLIENT_REQUEST_ID_HEADER: &str = "x-ms-client-request-id";
const API_PATH: &str = "anomalydetector/v1.0/timeseries";

/// Client for the hosted anomaly detection REST API.
pub struct HttpAnomalyDetector {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpAnomalyDetector {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let endpoint = validate_endpoint(&config.endpoint)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds.max(1)))
            .build()?;
        Ok(Self {
            client,
            base_url: endpoint.as_str().trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn detect_url(&self, mode: &str) -> String {
        format!("{}/{}/{}/detect", self.base_url, API_PATH, mode)
    }

    async fn post_detect<T: DeserializeOwned>(
        &self,
        mode: &str,
        request: &DetectionRequest,
    ) -> Result<T, DetectorError> {
        let request_id = Uuid::new_v4().to_string();
        let body = DetectRequestBody::from(request);
        let mut builder = self
            .client
            .post(self.detect_url(mode))
            .header(CLIENT_REQUEST_ID_HEADER, &request_id)
            .json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.header(SUBSCRIPTION_KEY_HEADER, key);
        }

        debug!(
            "sending {} detection: points={}, request_id={}",
            mode,
            body.series.len(),
            request_id
        );
        let response = builder
            .send()
            .await
            .map_err(|err| DetectorError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let err = rejection(status, &text);
            warn!(
                "{} detection rejected: status={}, request_id={}, err={}",
                mode, status, request_id, err
            );
            return Err(err);
        }

        response
            .json::<T>()
            .await
            .map_err(|err| DetectorError::Protocol(format!("{} detection: {}", mode, err)))
    }
}

#[async_trait]
impl AnomalyDetector for HttpAnomalyDetector {
    async fn detect_entire_series(
        &self,
        request: &DetectionRequest,
    ) -> Result<EntireSeriesResult, DetectorError> {
        let body: EntireDetectResponse = self.post_detect("entire", request).await?;
        Ok(body.into())
    }

    async fn detect_last_point(
        &self,
        request: &DetectionRequest,
    ) -> Result<LastPointResult, DetectorError> {
        let body: LastDetectResponse = self.post_detect("last", request).await?;
        Ok(body.into())
    }
}

fn rejection(status: StatusCode, text: &str) -> DetectorError {
    let (code, message) = match serde_json::from_str::<ErrorResponse>(text) {
        Ok(parsed) => {
            let body = parsed.into_body();
            (body.code, body.message)
        }
        Err(_) if !text.trim().is_empty() => (None, text.trim().to_string()),
        Err(_) => (
            None,
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        ),
    };
    DetectorError::Rejected {
        status: status.as_u16(),
        code,
        message,
    }
}
