//! modelstats CLI — plot cost/accuracy curves for a model folder hierarchy.
//!
//! Writes the per-platform Pareto frontiers to a JSON report and draws a
//! plot that helps pick the "best" model for each target device.

mod commands;

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Plot speed/accuracy curves and Pareto frontiers for a model zoo
#[derive(Parser, Debug)]
#[command(name = "modelstats", version, about, long_about = None)]
pub(crate) struct Cli {
    /// Root of the model folder hierarchy, e.g. ~/models/ILSVRC2012
    models_root: Option<PathBuf>,

    /// Path to an output file for saving the plot
    #[arg(short = 'o', long)]
    output_figure: Option<PathBuf>,

    /// Output format of the plot (svg)
    #[arg(long)]
    output_format: Option<String>,

    /// Path to the output file for saving the frontier report
    #[arg(long)]
    output_stats: Option<PathBuf>,

    /// Only consider models faster than this many seconds/frame
    #[arg(long)]
    plot_max_secs_per_frame: Option<f64>,

    /// Lower bound of the accuracy axis, in percent
    #[arg(long)]
    plot_min_top1_accuracy: Option<f64>,

    /// Platforms to draw (see `modelstats platforms`)
    #[arg(long, num_args = 1..)]
    plot_targets: Option<Vec<String>>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also write JSON logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List known platforms
    Platforms,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum ConfigAction {
    /// Create default configuration file
    Init,
    /// Show current configuration
    Show,
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    // Human-readable layer for stderr (always active)
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new(filter));

    // Optional JSON file layer for structured logging
    let mut _guard = None;
    let json_layer = match &cli.log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            let file_name = path
                .file_name()
                .map(|n| n.to_os_string())
                .unwrap_or_else(|| "modelstats.log".into());
            std::fs::create_dir_all(&dir)?;
            let file_appender = tracing_appender::rolling::never(&dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            _guard = Some(guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let workspace = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    if let Some(command) = &cli.command {
        return commands::handle_command(command, &workspace, cli.config.as_deref());
    }

    let mut config = modelstats_core::load_config(Some(&workspace), cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;
    commands::apply_overrides(&mut config, &cli)?;

    let Some(models_root) = &cli.models_root else {
        anyhow::bail!("MODELS_ROOT is required, e.g. `modelstats ~/models/ILSVRC2012`");
    };

    commands::run_plot(models_root, &config, cli.quiet)
}
