use std::io::{self, Write};

use anyhow::Result;
use tracing::{error, info, warn};

use detector_application::commands::{detect_commands, request_commands};
use detector_application::queries::series_queries;
use detector_application::{AppError, AppState};
use detector_infrastructure::ConfigOverrides;

use crate::context::AppContext;
use crate::reporter::Reporter;

pub async fn run(overrides: ConfigOverrides) -> Result<()> {
    let context = AppContext::new(&overrides).await;
    let stdout = io::stdout();
    let mut reporter = Reporter::new(stdout.lock());
    run_context(context, &mut reporter).await
}

/// Runs the pipeline on a built context. A context that failed to build
/// (config or client setup) is reported like any other local failure.
pub async fn run_context<W: Write>(
    context: Result<AppContext>,
    reporter: &mut Reporter<W>,
) -> Result<()> {
    match context {
        Ok(context) => run_pipeline(&context.state, reporter).await,
        Err(err) => {
            let err = AppError::Internal(err);
            error!("detector setup failed: {}", err);
            report_failure(reporter, &err);
            Err(err.into())
        }
    }
}

/// Load, build the request, run both detections and report. A failure is
/// printed once and then returned; nothing is retried.
pub async fn run_pipeline<W: Write>(state: &AppState, reporter: &mut Reporter<W>) -> Result<()> {
    let outcome = detect(state, reporter).await;
    info!("run summary: {}", state.metrics.render_summary());
    if let Err(err) = &outcome {
        error!("detection run failed: {}", err);
        report_failure(reporter, err);
    }
    outcome.map_err(anyhow::Error::from)
}

// The detection error stays the returned error even when the console is gone.
fn report_failure<W: Write>(reporter: &mut Reporter<W>, err: &AppError) {
    if let Err(write_err) = reporter.failure(err) {
        warn!("failed to print detection failure: {}", write_err);
    }
}

async fn detect<W: Write>(state: &AppState, reporter: &mut Reporter<W>) -> Result<(), AppError> {
    let series = series_queries::load_series(state).await?;
    let skipped_rows = series.skipped_rows;
    let request = request_commands::build_detection_request(&state.config, series)?;
    reporter
        .request_ready(&request, skipped_rows)
        .map_err(anyhow::Error::from)?;

    if state.config.concurrent {
        let report = detect_commands::detect_concurrently(state, &request).await?;
        reporter
            .entire_series(&report.entire)
            .map_err(anyhow::Error::from)?;
        reporter
            .last_point(&report.last)
            .map_err(anyhow::Error::from)?;
        return Ok(());
    }

    let entire = detect_commands::detect_entire_series(state, &request).await?;
    reporter
        .entire_series(&entire)
        .map_err(anyhow::Error::from)?;
    let last = detect_commands::detect_last_point(state, &request).await?;
    reporter
        .last_point(&last)
        .map_err(anyhow::Error::from)?;
    Ok(())
}
