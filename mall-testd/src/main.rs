//! Standalone reference backend.
//!
//! Serves the in-memory mall API on a fixed port so the scenario suite
//! (or a curl session) can be pointed at a long-lived instance instead
//! of the per-test ephemeral one.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "mall-testd")]
#[command(author, version, about = "In-memory reference mall backend")]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", cli.port)).await?;
    info!(port = cli.port, "mall-testd listening");

    axum::serve(listener, mall_testd::router()).await?;
    Ok(())
}
