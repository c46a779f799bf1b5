//! Lightlog CLI
//!
//! Terminal front end for the weight log:
//! - Interactive page (default)
//! - Add a weigh-in
//! - Clear all records
//! - Show the chart and history

use anyhow::Context;
use clap::{Parser, Subcommand};
use lightlog::config::{generate_default_config, Config, LoggingConfig};
use lightlog::storage::{EntryStore, FileSlotStore};
use lightlog::tracker::{LinePrompt, SystemClock, Tracker};
use lightlog::view::{format_weight, render, render_history, render_text};
use lightlog::Session;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lightlog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Personal weight log with a trend chart")]
#[command(long_about = "Lightlog records one weight per entry, keeps the list in a local store,\nand shows it as a trend chart and a most-recent-first history.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: search the standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory holding the weight slot
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive page (default)
    Session,

    /// Record today's weight. Non-numeric input is ignored.
    Add {
        /// Weight, e.g. 70.5
        #[arg(allow_hyphen_values = true)]
        weight: String,
    },

    /// Clear all records
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the input, trend chart and history
    Show,

    /// Show the history only, most recent first
    History,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Needs no config, so a broken config file can still be replaced
    if let Some(Commands::Config { output }) = &cli.command {
        return write_default_config(output.as_deref());
    }

    let (mut config, source) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, Some(path.clone())),
        None => Config::discover()?,
    };
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.to_string_lossy().to_string();
    }
    config.validate()?;

    init_tracing(&config.logging)?;

    match &source {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("Using default config with environment overrides"),
    }
    tracing::info!("Data directory: {:?}", config.storage.data_path());

    let mut tracker = open_tracker(&config)?;
    let view = config.display.view_options();
    let style = config.display.text_style();

    match cli.command.unwrap_or(Commands::Session) {
        Commands::Session => {
            let stdin = io::stdin();
            Session::new(&mut tracker, view, style).run(stdin.lock(), io::stdout())?;
        }

        Commands::Add { weight } => {
            if let Some(entry) = tracker.add_entry(&weight)? {
                println!("{}  {} {}", entry.date, format_weight(entry.weight), view.unit);
            }
        }

        Commands::Clear { yes } => {
            let cleared = if yes {
                tracker.clear_all(&mut |_: &str| true)?
            } else {
                let stdin = io::stdin();
                tracker.clear_all(&mut LinePrompt::new(stdin.lock(), io::stdout()))?
            };
            if cleared {
                println!("All records cleared.");
            }
        }

        Commands::Show => {
            let screen = render(tracker.entries(), tracker.input(), &view);
            print!("{}", render_text(&screen, &style));
        }

        Commands::History => {
            let screen = render(tracker.entries(), tracker.input(), &view);
            print!("{}", render_history(&screen.history));
        }

        // Handled before the config is loaded
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn open_tracker(config: &Config) -> anyhow::Result<Tracker<FileSlotStore, SystemClock>> {
    let store = EntryStore::new(config.storage.slot_store(), config.storage.slot_key.clone())
        .on_corrupt(config.storage.on_corrupt);
    let date_format = config.display.date_format()?;

    Tracker::open(store, SystemClock, date_format).with_context(|| {
        format!(
            "Failed to load weight history from {:?}",
            config.storage.data_path()
        )
    })
}

fn write_default_config(output: Option<&Path>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write config to {:?}", path))?;
            println!("Wrote default config to {:?}", path);
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Logs go to stderr (or the configured file) so they never mix with the page
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("lightlog={}", logging.level)));

    let writer = match &logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {:?}", path))?;
            BoxMakeWriter::new(std::sync::Mutex::new(file))
        }
        None => BoxMakeWriter::new(io::stderr),
    };

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(writer))
            .init();
    }

    Ok(())
}
