use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use payroll_api::run_server;
use payroll_data::AppConfig;
use tracing_subscriber::EnvFilter;

/// HTTP server for the payroll calculators.
#[derive(Debug, Parser)]
#[command(name = "payroll-api", version, about)]
struct Args {
    /// TOML settings file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Policy directory. Overrides `[policy] dir`.
    #[arg(long, value_name = "DIR")]
    policy_dir: Option<PathBuf>,

    /// Overrides `[server] host`.
    #[arg(long)]
    host: Option<String>,

    /// Overrides `[server] port`.
    #[arg(long)]
    port: Option<u16>,

    /// Overrides `[logging] level`.
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load_or_default(args.config.as_deref())?;
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    if let Some(dir) = args.policy_dir {
        config.policy.dir = Some(dir);
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(format!("{},tower_http=debug", config.logging.level))
            .with_context(|| format!("invalid log level '{}'", config.logging.level))?,
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let policy = config.policy().context("Failed to load policy")?;
    tracing::info!(policy = %policy.name, "policy ready");

    run_server(Arc::new(policy), &config.server.host, config.server.port).await
}
