//! Mall E2E scenario runner.
//!
//! `mall list` shows the registered scenarios; `mall run` executes them
//! against a remote backend (`--base-url` or config) or, by default,
//! against an embedded ephemeral reference backend.

#![forbid(unsafe_code)]

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use mall_common::HarnessConfig;
use mall_harness::scenario::{Runner, registry};

#[derive(Parser)]
#[command(name = "mall")]
#[command(author, version, about = "Mall E2E scenario runner")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List registered scenarios
    List,
    /// Run scenarios and report the outcome
    Run {
        /// Only run scenarios whose name contains this substring
        #[arg(short, long)]
        filter: Option<String>,

        /// Backend base URL; when absent an embedded reference backend
        /// is started for the run
        #[arg(long, env = "MALL_E2E_BASE_URL")]
        base_url: Option<String>,

        /// Path to a config file (default: the standard config location)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Emit the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
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

    match cli.command {
        Command::List => {
            for scenario in registry() {
                println!("{:40} {}", scenario.name, scenario.summary);
            }
            Ok(())
        }
        Command::Run {
            filter,
            base_url,
            config,
            json,
        } => run(filter, base_url, config, json).await,
    }
}

async fn run(
    filter: Option<String>,
    base_url: Option<String>,
    config_path: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let mut config = match &config_path {
        Some(path) => HarnessConfig::load_from(path)?,
        None => HarnessConfig::load()?,
    };

    // Kept alive for the duration of the run; dropping the handle would
    // not stop the task, but the binding documents ownership.
    let mut _embedded = None;
    match base_url {
        Some(base_url) => {
            config.base_url = base_url;
            info!(base_url = %config.base_url, "running against remote backend");
        }
        None => {
            let (addr, handle) = mall_testd::spawn_ephemeral().await?;
            config.base_url = format!("http://{addr}");
            _embedded = Some(handle);
            info!(%addr, "running against embedded reference backend");
        }
    }

    let report = Runner::new(config).run(filter.as_deref()).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }

    if !report.all_passed() {
        std::process::exit(1);
    }
    Ok(())
}
