use std::path::PathBuf;

use courier::config::{CONFIG_ENV, ServerConfig};
use courier::server::listener;

const USAGE: &str = "usage: courier-serve <root-dir> [port]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let mut args = std::env::args().skip(1);
    let config_file = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let cfg = ServerConfig::from_sources(config_file.as_deref(), args.next(), args.next())
        .map_err(|e| anyhow::anyhow!("{e}\n{USAGE}"))?;

    tokio::select! {
        res = listener::run(&cfg) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
