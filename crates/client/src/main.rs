//! Taskrate console - interactive rating dialog against a fake backend.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskrate_client::ClientConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ClientConfig::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(
        mode = %config.mode,
        outcome = ?config.fake_outcome,
        "Starting Taskrate console"
    );

    taskrate_client::runner::run(config).await
}
