use detector_domain::{EntireSeriesResult, LastPointResult, TimeSeriesPoint};

#[derive(Debug, Clone, PartialEq)]
pub struct FlaggedPoint {
    pub index: usize,
    pub point: TimeSeriesPoint,
}

#[derive(Debug, Clone)]
pub struct EntireSeriesOutcome {
    pub flagged: Vec<FlaggedPoint>,
    pub result: EntireSeriesResult,
}

impl EntireSeriesOutcome {
    pub fn total(&self) -> usize {
        self.flagged.len()
    }

    pub fn has_anomalies(&self) -> bool {
        !self.flagged.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct LastPointOutcome {
    pub point: TimeSeriesPoint,
    pub result: LastPointResult,
}

impl LastPointOutcome {
    pub fn is_anomaly(&self) -> bool {
        self.result.is_anomaly
    }
}

#[derive(Debug, Clone)]
pub struct DetectionReport {
    pub entire: EntireSeriesOutcome,
    pub last: LastPointOutcome,
}
