use std::io::{self, Write};

use chrono::SecondsFormat;

use detector_application::{AppError, EntireSeriesOutcome, LastPointOutcome};
use detector_domain::{DetectionRequest, TimeSeriesPoint};

/// Console report for a detection run.
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn request_ready(&mut self, request: &DetectionRequest, skipped_rows: usize) -> io::Result<()> {
        writeln!(
            self.out,
            "Loaded {} points ({} malformed rows skipped); granularity={}, sensitivity={}.",
            request.series().len(),
            skipped_rows,
            request.granularity(),
            request.sensitivity()
        )
    }

    pub fn entire_series(&mut self, outcome: &EntireSeriesOutcome) -> io::Result<()> {
        for flagged in &outcome.flagged {
            writeln!(
                self.out,
                "An anomaly was detected at index: {} ({}).",
                flagged.index,
                describe(&flagged.point)
            )?;
        }
        if !outcome.has_anomalies() {
            writeln!(self.out, "No anomalies detected in the series.")?;
        }
        writeln!(
            self.out,
            "Detected a total of {} anomalies in the entire time series.",
            outcome.total()
        )
    }

    pub fn last_point(&mut self, outcome: &LastPointOutcome) -> io::Result<()> {
        writeln!(
            self.out,
            "Latest point ({}) is an anomaly: {}.",
            describe(&outcome.point),
            outcome.is_anomaly()
        )
    }

    pub fn failure(&mut self, err: &AppError) -> io::Result<()> {
        match err {
            AppError::ServiceRejected { message, .. } => {
                writeln!(self.out, "Entire detection failed: {}", message)
            }
            other => writeln!(self.out, "Detection error. {}", other),
        }
    }
}

fn describe(point: &TimeSeriesPoint) -> String {
    format!(
        "{}, value {}",
        point.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        point.value
    )
}
