use anyhow::Error;
use clap::Parser;
use envconfig::Envconfig;
use replay_worker::{cmd, cmd::Cli, config::Config};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let log_layer = tracing_subscriber::fmt::layer().with_filter(filter);
    tracing_subscriber::registry().with(log_layer).init();
}

#[tokio::main]
pub async fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    let config = Config::init_from_env()?;
    config.validate()?;
    setup_tracing(config.verbose);
    info!("Starting up...");

    cmd::run(cli, config).await
}
