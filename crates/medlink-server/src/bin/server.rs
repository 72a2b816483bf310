//! MedLink Server Binary

use anyhow::Result;
use clap::Parser;
use medlink_common_log::LogConfig;
use medlink_server::{config::load_config, Server};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "medlink-server", version, about = "MedLink access-control server")]
struct Cli {
    /// Path to a TOML config file layered over the built-in defaults.
    #[arg(short, long, env = "MEDLINK_CONFIG")]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = load_config(cli.config)?;

    medlink_common_log::init(
        LogConfig::new(config.logging.level, config.logging.format).with_env_overrides(),
    )?;

    info!("Starting MedLink Server v{}", env!("CARGO_PKG_VERSION"));

    let server = Server::new(config).await?;
    server.run().await?;

    info!("Server shutdown complete");
    Ok(())
}
