//! capsule - manifest validation and completion scoring for capsule archives.

mod cli;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    // RUST_LOG wins over --verbose
    let default_filter = if cli::is_verbose() {
        "capsule=info"
    } else {
        "capsule=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Exit status is set by the command itself
    cli::run().await
}
