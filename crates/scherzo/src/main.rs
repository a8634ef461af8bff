//! Scherzo - Entry Point
//!
//! Runs the front controller once over the settings found in a TOML file
//! and `SCHERZO__*` environment variables, and writes the response body to
//! stdout.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `scherzo [PATH]` | Run once, with `PATH` as the request in flight |
//! | `scherzo --list-services` | List the service types settings can name |
//! | `scherzo --print-config` | Print the merged settings as TOML |

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use scherzo::domain::constants::{APP_GROUP, LOGGING_GROUP};
use scherzo::domain::{Layer, SettingsExt};
use scherzo::infrastructure::config::{Config, ConfigLoader, LoggingConfig, default_layer};
use scherzo::infrastructure::logging::init_logging;
use scherzo::infrastructure::FrontController;
use serde_json::json;
use tracing::info;

/// Command line interface for Scherzo
#[derive(Parser, Debug)]
#[command(name = "scherzo")]
#[command(about = "Scherzo - Run a request through the configured handler chain")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Expose error details in error responses
    #[arg(long)]
    pub debug: bool,

    /// List the service types available to the `services` group and exit
    #[arg(long)]
    pub list_services: bool,

    /// Print the merged settings as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Request path passed down the chain
    pub path: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let controller = scherzo::front_controller();

    if cli.list_services {
        for (name, description) in controller.catalog().list() {
            println!("{name}\t{description}");
        }
        return Ok(());
    }

    let layers = load_layers(&cli)?;
    let mut merged = vec![default_layer()];
    merged.extend(layers.iter().cloned());
    let config = Config::from_layers(&merged)?;

    if cli.print_config {
        println!("{}", config.to_toml()?);
        return Ok(());
    }

    let logging: LoggingConfig = config
        .extract(LOGGING_GROUP, None)?
        .unwrap_or_default();
    init_logging(&logging)?;

    run(&controller, layers, cli.path)
}

fn load_layers(cli: &Cli) -> anyhow::Result<Vec<Layer>> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let mut layers = vec![loader.load().context("Failed to load configuration")?];
    if cli.debug {
        layers.push(Layer::new().with_group(APP_GROUP, json!({ "debug": true })));
    }
    Ok(layers)
}

fn run(controller: &FrontController, layers: Vec<Layer>, path: Option<String>) -> anyhow::Result<()> {
    let response = match path {
        Some(path) => controller.run_with(layers, Arc::new(path)),
        None => controller.run(layers),
    }?;
    info!(status = response.status, "Response emitted");
    Ok(())
}
