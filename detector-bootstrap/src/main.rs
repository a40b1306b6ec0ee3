use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use detector_infrastructure::{ConfigOverrides, CONFIG_ENV};

#[derive(Parser, Debug)]
#[command(name = "anomaly-detector")]
#[command(about = "Detect anomalies in a time series with the hosted detection API", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    /// Series file, one `timestamp,value` pair per line
    #[arg(short, long)]
    data: Option<String>,

    /// Sampling interval of the series (daily, hourly, ...)
    #[arg(short, long)]
    granularity: Option<String>,

    /// Margin sensitivity, 0-99
    #[arg(short, long)]
    sensitivity: Option<u8>,

    /// Issue both detection calls at the same time
    #[arg(long)]
    concurrent: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .init();

    let args = Args::parse();
    if let Some(config) = args.config {
        std::env::set_var(CONFIG_ENV, config);
    }
    let overrides = ConfigOverrides {
        data_path: args.data,
        granularity: args.granularity,
        sensitivity: args.sensitivity,
        concurrent: args.concurrent,
    };

    detector_bootstrap::run(overrides).await
}
