use std::io;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use movie_insights::ingest::load_dataset;
use movie_insights::{run_session, AppConfig};

fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::from_env();
    let dataset = load_dataset(&config.data_path, &config)
        .with_context(|| format!("cannot start without {}", config.data_path.display()))?;

    let stdin = io::stdin();
    run_session(&config, &dataset, stdin.lock(), io::stdout())?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
