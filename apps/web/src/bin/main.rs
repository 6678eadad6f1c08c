use anyhow::Result;
use clap::Parser;
use sqirvy_web::{AppState, serve};
use std::time::Duration;
use tokio::signal;
use tracing_subscriber::EnvFilter;

/// Serve sqirvy model queries over HTTP.
#[derive(Debug, Parser)]
#[command(name = "sqirvy-web", version, about)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: String,

    /// Give up on a query after this many seconds
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let state = AppState::from_env(args.timeout.map(Duration::from_secs));
    let handle = serve(&args.addr, state).await?;

    signal::ctrl_c().await?;
    handle.shutdown().await
}
