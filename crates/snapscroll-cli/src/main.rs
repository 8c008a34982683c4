use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use snapscroll_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "snapscroll")]
#[command(author, version, about = "Section snapping for vertical scroll containers")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (defaults to ~/.config/snapscroll/config.toml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Sections that scroll freely instead of snapping (comma separated ids)
    #[arg(short = 'n', long, value_delimiter = ',', global = true)]
    normal: Vec<String>,

    /// Easing preset: easeInOutQuad, easeInCubic or inOutQuintic
    #[arg(short = 'e', long, global = true)]
    easing: Option<String>,

    /// Snap duration in milliseconds
    #[arg(short = 'd', long, global = true)]
    duration: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive terminal demo
    Run,
    /// Replay scripted wheel input through the snap driver
    Simulate {
        /// Wheel deltas in scroll units, comma separated
        #[arg(short = 'i', long, value_delimiter = ',', allow_hyphen_values = true, default_value = "6,6,-6")]
        input: Vec<f64>,
        /// Pause between inputs in milliseconds
        #[arg(long, default_value_t = 50)]
        interval_ms: u64,
        /// Print events as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Initialize logging; the terminal demo logs to a file so the screen stays clean
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );

    if to_file {
        let log_path = config.log_path();
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&log_path)?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let mut config = AppConfig::load_from(&config_path)?;

    // Command line options override the file
    if !cli.normal.is_empty() {
        config.snap.normal_scroll_element_ids = cli.normal;
    }
    if let Some(easing) = cli.easing {
        config.snap.easing_preset = easing;
    }
    if let Some(duration) = cli.duration {
        config.snap.snap_duration_ms = duration;
    }

    let interactive = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, interactive)?;

    // Handle commands
    match cli.command {
        Some(Commands::Run) | None => commands::run::run(&config),
        Some(Commands::Simulate {
            input,
            interval_ms,
            json,
        }) => commands::simulate::run(&config, &input, interval_ms, json).await,
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::show(&config, &config_path),
            ConfigAction::Init { force } => commands::config::init(&config_path, force),
        },
    }
}
