mod config;
mod http;
mod serve;

use clap::Parser;
use config::Config;
use tracing::error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Last-resort handler: a panic anywhere in the pipeline is logged,
    // never allowed to take the process down silently.
    std::panic::set_hook(Box::new(|info| {
        error!("Unhandled panic in pipeline: {}", info);
    }));

    let config = Config::parse();
    config.validate()?;

    serve::run(config).await
}
