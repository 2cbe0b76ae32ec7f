use std::process::ExitCode;

use clap::Parser;
use figma_design_tokens::{pipeline, Config};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    if let Err(error) = config.validate() {
        error!(%error, "invalid configuration");
        return ExitCode::FAILURE;
    }

    match pipeline::run(&config).await {
        Ok(summary) => {
            info!(
                created = summary.created,
                updated = summary.updated,
                skipped = summary.skipped,
                failed = summary.failed,
                "theme files generated successfully"
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            error!(%error, "export run failed");
            ExitCode::FAILURE
        }
    }
}
