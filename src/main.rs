// Main entrypoint for the watchdog daemon.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use watchdog::config::{Config, ConfigTrait};
use watchdog::shutdown::GracefulShutdown;

const CONFIG_PATH: &str = "cfg/watchdog.cfg.yaml";
const CONFIG_PATH_LOCAL: &str = "cfg/watchdog.cfg.local.yaml";

/// Watchdog - supervises heartbeat files and fails when one goes stale
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, value_name = "FILE")]
    cfg: Option<PathBuf>,
}

/// Loads the configuration struct from YAML file.
/// Tries local config first, then falls back to default config.
fn load_cfg(path: Option<PathBuf>) -> Result<Config> {
    if let Some(custom_path) = path {
        return Config::load(&custom_path)
            .with_context(|| format!("failed to load custom config from {:?}", custom_path));
    }

    match Config::load(PathBuf::from(CONFIG_PATH_LOCAL)) {
        Ok(cfg) => Ok(cfg),
        Err(_) => Config::load(PathBuf::from(CONFIG_PATH))
            .with_context(|| format!("failed to load config from {}", CONFIG_PATH)),
    }
}

/// Configures structured logging based on configuration.
fn configure_logger(cfg: &Config) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let log_level = cfg
        .logs()
        .and_then(|logs| logs.level.as_ref())
        .map(|s| s.as_str())
        .unwrap_or("info");

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    if cfg.is_prod() {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let cfg = load_cfg(args.cfg)?;
    configure_logger(&cfg);

    let supervisor = cfg.build_supervisor()?;
    info!(
        component = "main",
        event = "checks_registered",
        checks = ?supervisor.names(),
        "heartbeat checks registered"
    );

    let mut graceful_shutdown = GracefulShutdown::new(CancellationToken::new(), supervisor.clone());
    graceful_shutdown.set_graceful_timeout(cfg.shutdown_timeout());

    let watch = supervisor.spawn(cfg.period());

    if let Err(e) = graceful_shutdown.await_shutdown(watch).await {
        error!(
            component = "main",
            event = "watch_failed",
            error = %e,
            "watchdog stopped with failure"
        );
        return Err(e);
    }

    Ok(())
}
