// Time series entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Output of a series load: the kept points in file order plus the number
/// of rows the row policy dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedSeries {
    pub points: Vec<TimeSeriesPoint>,
    pub skipped_rows: usize,
}

impl LoadedSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
