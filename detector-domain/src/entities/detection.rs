// Detection request and result entities

use serde::{Deserialize, Serialize};

use crate::entities::TimeSeriesPoint;
use crate::errors::RequestError;
use crate::value_objects::{Granularity, Sensitivity};

/// Smallest series the detection service accepts.
pub const MIN_SERIES_POINTS: usize = 12;
/// Largest series the detection service accepts.
pub const MAX_SERIES_POINTS: usize = 8640;

/// Optional tuning knobs forwarded to the service untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionOptions {
    pub max_anomaly_ratio: Option<f64>,
    pub custom_interval: Option<u32>,
    pub period: Option<u32>,
}

/// A validated detection request. Built once and shared read-only by both
/// detection modes.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionRequest {
    series: Vec<TimeSeriesPoint>,
    granularity: Granularity,
    sensitivity: Sensitivity,
    options: DetectionOptions,
}

impl DetectionRequest {
    pub fn new(
        series: Vec<TimeSeriesPoint>,
        granularity: Granularity,
        sensitivity: Sensitivity,
        options: DetectionOptions,
    ) -> Result<Self, RequestError> {
        if series.len() < MIN_SERIES_POINTS {
            return Err(RequestError::TooFewPoints {
                min: MIN_SERIES_POINTS,
                actual: series.len(),
            });
        }
        if series.len() > MAX_SERIES_POINTS {
            return Err(RequestError::TooManyPoints {
                max: MAX_SERIES_POINTS,
                actual: series.len(),
            });
        }
        if let Some(index) = series
            .windows(2)
            .position(|pair| pair[1].timestamp <= pair[0].timestamp)
        {
            return Err(RequestError::OutOfOrder {
                index: index + 1,
                previous: index,
            });
        }
        if let Some(ratio) = options.max_anomaly_ratio {
            if !(ratio > 0.0 && ratio < 0.5) {
                return Err(RequestError::MaxAnomalyRatioOutOfRange(ratio));
            }
        }
        if options.custom_interval == Some(0) {
            return Err(RequestError::ZeroCustomInterval);
        }
        Ok(Self {
            series,
            granularity,
            sensitivity,
            options,
        })
    }

    pub fn series(&self) -> &[TimeSeriesPoint] {
        &self.series
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn sensitivity(&self) -> Sensitivity {
        self.sensitivity
    }

    pub fn options(&self) -> &DetectionOptions {
        &self.options
    }

    pub fn last_point(&self) -> &TimeSeriesPoint {
        // construction guarantees at least MIN_SERIES_POINTS entries
        &self.series[self.series.len() - 1]
    }
}

/// Whole-series verdict. Every per-point vector is index aligned with the
/// request series; the supplementary vectors may be empty when the detector
/// does not report them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntireSeriesResult {
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

impl EntireSeriesResult {
    pub fn flagged_indices(&self) -> Vec<usize> {
        self.is_anomaly
            .iter()
            .enumerate()
            .filter_map(|(index, flagged)| flagged.then_some(index))
            .collect()
    }

    pub fn anomaly_count(&self) -> usize {
        self.is_anomaly.iter().filter(|flagged| **flagged).count()
    }

    pub fn is_aligned_with(&self, request: &DetectionRequest) -> bool {
        let len = request.series().len();
        let optional_ok = |count: usize| count == 0 || count == len;
        self.is_anomaly.len() == len
            && optional_ok(self.is_positive_anomaly.len())
            && optional_ok(self.is_negative_anomaly.len())
            && optional_ok(self.expected_values.len())
            && optional_ok(self.upper_margins.len())
            && optional_ok(self.lower_margins.len())
    }
}

/// Verdict for the final point, modelled from the points before it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LastPointResult {
    pub is_anomaly: bool,
    pub is_positive_anomaly: bool,
    pub is_negative_anomaly: bool,
    pub expected_value: f64,
    pub upper_margin: f64,
    pub lower_margin: f64,
    pub period: u32,
    pub suggested_window: u32,
}
