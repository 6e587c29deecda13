use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use venue_checkin::{Config, RateLimiter, Stop, Worker};

#[tokio::main]
async fn main() -> ExitCode {
    helpers::init_logging();

    let config = Config::parse();

    // Errors are reported once, through the log.
    if let Err(error) = run(&config).await {
        tracing::error!("{:#}", error);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn run(config: &Config) -> Result<()> {
    let client = config.client()?;
    let input = venue_checkin::open_input(&config.input).await?;

    let limiter = RateLimiter::per_hour(config.rate);
    tracing::info!(period = ?limiter.period(), ceiling = config.ceiling, "starting");

    let mut worker = Worker::new(client.clone(), limiter, config.ceiling);

    let summary = venue_checkin::run(input, &client, &mut worker)
        .await
        .context("pipeline aborted")?;

    match summary.stop {
        Stop::Drained => tracing::info!(?summary, "all locations processed"),
        Stop::CeilingReached => tracing::info!(?summary, "stopped at check-in ceiling"),
    }

    Ok(())
}
