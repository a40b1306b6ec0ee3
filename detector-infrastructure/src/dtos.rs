// Wire shapes for the anomaly detection REST API (v1.0, univariate)

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use detector_domain::{DetectionRequest, EntireSeriesResult, LastPointResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectRequestBody {
    pub series: Vec<PointBody>,
    pub granularity: &'static str,
    pub sensitivity: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_anomaly_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct PointBody {
    pub timestamp: String,
    pub value: f64,
}

impl From<&DetectionRequest> for DetectRequestBody {
    fn from(request: &DetectionRequest) -> Self {
        Self {
            series: request
                .series()
                .iter()
                .map(|point| PointBody {
                    timestamp: format_timestamp(&point.timestamp),
                    value: point.value,
                })
                .collect(),
            granularity: request.granularity().as_str(),
            sensitivity: request.sensitivity().value(),
            max_anomaly_ratio: request.options().max_anomaly_ratio,
            custom_interval: request.options().custom_interval,
            period: request.options().period,
        }
    }
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntireDetectResponse {
    #[serde(default)]
    pub period: u32,
    pub is_anomaly: Vec<bool>,
    #[serde(default)]
    pub is_positive_anomaly: Vec<bool>,
    #[serde(default)]
    pub is_negative_anomaly: Vec<bool>,
    #[serde(default)]
    pub expected_values: Vec<f64>,
    #[serde(default)]
    pub upper_margins: Vec<f64>,
    #[serde(default)]
    pub lower_margins: Vec<f64>,
}

impl From<EntireDetectResponse> for EntireSeriesResult {
    fn from(body: EntireDetectResponse) -> Self {
        Self {
            period: body.period,
            is_anomaly: body.is_anomaly,
            is_positive_anomaly: body.is_positive_anomaly,
            is_negative_anomaly: body.is_negative_anomaly,
            expected_values: body.expected_values,
            upper_margins: body.upper_margins,
            lower_margins: body.lower_margins,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastDetectResponse {
    pub is_anomaly: bool,
    #[serde(default)]
    pub is_positive_anomaly: bool,
    #[serde(default)]
    pub is_negative_anomaly: bool,
    #[serde(default)]
    pub expected_value: f64,
    #[serde(default)]
    pub upper_margin: f64,
    #[serde(default)]
    pub lower_margin: f64,
    #[serde(default)]
    pub period: u32,
    #[serde(default)]
    pub suggested_window: u32,
}

impl From<LastDetectResponse> for LastPointResult {
    fn from(body: LastDetectResponse) -> Self {
        Self {
            is_anomaly: body.is_anomaly,
            is_positive_anomaly: body.is_positive_anomaly,
            is_negative_anomaly: body.is_negative_anomaly,
            expected_value: body.expected_value,
            upper_margin: body.upper_margin,
            lower_margin: body.lower_margin,
            period: body.period,
            suggested_window: body.suggested_window,
        }
    }
}

/// Error payload. The service answers either `{code, message}` or the
/// same pair nested under `error`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ErrorResponse {
    Nested { error: ErrorBody },
    Flat(ErrorBody),
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
}

impl ErrorResponse {
    pub fn into_body(self) -> ErrorBody {
        match self {
            ErrorResponse::Nested { error } => error,
            ErrorResponse::Flat(body) => body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use detector_domain::{DetectionOptions, Granularity, Sensitivity, TimeSeriesPoint};

    fn request(options: DetectionOptions) -> DetectionRequest {
        let start = Utc.with_ymd_and_hms(2021, 10, 4, 0, 0, 0).unwrap();
        let series = (0..12)
            .map(|i| TimeSeriesPoint::new(start + Duration::days(i), 5208.0))
            .collect();
        DetectionRequest::new(series, Granularity::Daily, Sensitivity::default(), options)
            .expect("request")
    }

    #[test]
    fn request_body_uses_service_field_names() {
        let body = DetectRequestBody::from(&request(DetectionOptions::default()));
        let json = serde_json::to_value(&body).expect("json");
        assert_eq!(json["granularity"], "daily");
        assert_eq!(json["sensitivity"], 25);
        assert_eq!(json["series"][0]["timestamp"], "2021-10-04T00:00:00Z");
        assert_eq!(json["series"][0]["value"], 5208.0);
        assert!(json.get("maxAnomalyRatio").is_none());
        assert!(json.get("period").is_none());
    }

    #[test]
    fn request_body_includes_optional_parameters() {
        let body = DetectRequestBody::from(&request(DetectionOptions {
            max_anomaly_ratio: Some(0.25),
            custom_interval: Some(5),
            period: Some(7),
        }));
        let json = serde_json::to_value(&body).expect("json");
        assert_eq!(json["maxAnomalyRatio"], 0.25);
        assert_eq!(json["customInterval"], 5);
        assert_eq!(json["period"], 7);
    }

    #[test]
    fn sub_second_timestamps_stay_distinct() {
        let start = Utc.with_ymd_and_hms(2021, 10, 4, 0, 0, 0).unwrap();
        let series = (0..12)
            .map(|i| TimeSeriesPoint::new(start + Duration::microseconds(i), 1.0))
            .collect();
        let request = DetectionRequest::new(
            series,
            Granularity::Microsecond,
            Sensitivity::default(),
            DetectionOptions::default(),
        )
        .expect("request");

        let body = DetectRequestBody::from(&request);
        assert_eq!(body.series[0].timestamp, "2021-10-04T00:00:00Z");
        assert_eq!(body.series[1].timestamp, "2021-10-04T00:00:00.000001Z");
        let mut stamps = body.series.iter().map(|p| p.timestamp.as_str()).collect::<Vec<_>>();
        stamps.dedup();
        assert_eq!(stamps.len(), 12);
    }

    #[test]
    fn error_response_accepts_flat_and_nested_shapes() {
        let flat: ErrorResponse =
            serde_json::from_str(r#"{"code":"InvalidSeries","message":"bad series"}"#).expect("flat");
        assert_eq!(flat.into_body().message, "bad series");

        let nested: ErrorResponse = serde_json::from_str(
            r#"{"error":{"code":"401","message":"Access denied due to invalid subscription key."}}"#,
        )
        .expect("nested");
        let body = nested.into_body();
        assert_eq!(body.code.as_deref(), Some("401"));
        assert!(body.message.contains("subscription key"));
    }
}
