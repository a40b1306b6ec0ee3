use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    points_loaded: AtomicU64,
    rows_skipped: AtomicU64,
    detection_calls: AtomicU64,
    detection_failures: AtomicU64,
    anomalies: AtomicU64,
}

impl Metrics {
    pub fn record_series(&self, point_count: usize, skipped_rows: usize) {
        self.points_loaded
            .fetch_add(point_count as u64, Ordering::Relaxed);
        self.rows_skipped
            .fetch_add(skipped_rows as u64, Ordering::Relaxed);
    }

    pub fn record_detection_call(&self) {
        self.detection_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_detection_failure(&self) {
        self.detection_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_anomalies(&self, count: usize) {
        self.anomalies.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn detection_calls(&self) -> u64 {
        self.detection_calls.load(Ordering::Relaxed)
    }

    pub fn detection_failures(&self) -> u64 {
        self.detection_failures.load(Ordering::Relaxed)
    }

    pub fn anomalies(&self) -> u64 {
        self.anomalies.load(Ordering::Relaxed)
    }

    pub fn render_summary(&self) -> String {
        format!(
            "points_loaded={} rows_skipped={} detection_calls={} detection_failures={} anomalies={}",
            self.points_loaded.load(Ordering::Relaxed),
            self.rows_skipped.load(Ordering::Relaxed),
            self.detection_calls(),
            self.detection_failures(),
            self.anomalies(),
        )
    }
}
