use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use csv::{ReaderBuilder, StringRecord, Trim};
use tokio::fs;

use detector_domain::{LoadedSeries, RowPolicy, SeriesRepository, TimeSeriesPoint};

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Reads `timestamp,value` files without a header row.
pub struct CsvSeriesRepository;

impl CsvSeriesRepository {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvSeriesRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SeriesRepository for CsvSeriesRepository {
    async fn load_series(&self, path: &str, policy: RowPolicy) -> Result<LoadedSeries> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read series file {}", path))?;
        parse_series(&content, policy)
    }
}

/// Parses series text. Rows that are not exactly two fields are skipped
/// under [`RowPolicy::Lenient`] and rejected under [`RowPolicy::Strict`].
/// A two-field row whose timestamp or value cannot be parsed always fails
/// the whole load. Quotes are ordinary characters: every comma splits a
/// field and a record never spans more than one line.
pub fn parse_series(content: &str, policy: RowPolicy) -> Result<LoadedSeries> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let mut series = LoadedSeries::default();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        if is_blank(&record) {
            continue;
        }
        if record.len() != 2 {
            match policy {
                RowPolicy::Lenient => {
                    series.skipped_rows += 1;
                    continue;
                }
                RowPolicy::Strict => {
                    return Err(anyhow!(
                        "line {}: expected 2 fields, found {}",
                        line,
                        record.len()
                    ));
                }
            }
        }

        let timestamp = parse_timestamp(&record[0])
            .ok_or_else(|| anyhow!("line {}: invalid timestamp {:?}", line, &record[0]))?;
        let value = parse_value(&record[1])
            .ok_or_else(|| anyhow!("line {}: invalid value {:?}", line, &record[1]))?;
        series.points.push(TimeSeriesPoint::new(timestamp, value));
    }
    Ok(series)
}

fn is_blank(record: &StringRecord) -> bool {
    record.len() == 1 && record[0].is_empty()
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|naive| Utc.from_utc_datetime(&naive));
        }
    }
    None
}

fn parse_value(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}
