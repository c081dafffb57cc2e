//! xpkit - Entry Point
//!
//! Loads configuration, initializes logging and runs the HTTP server.

use anyhow::Result;

use xpkit::config::Config;
use xpkit::server;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting xpkit v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    let result = server::run(config).await;

    if let Err(ref e) = result {
        log::error!("Server exited with error: {e}");
    }
    result
}
