//! Tactile CLI
//!
//! Replay scripted pointer input through gesture sessions and inspect the
//! gesture rule table.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tactile_gesture::GestureRuleSet;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod replay;
mod script;

use config::TactileConfig;
use replay::SessionKind;
use script::Script;

#[derive(Parser)]
#[command(name = "tactile")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Replay pointer input through Tactile gesture sessions", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./tactile.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an input script and print emitted events as JSON lines
    Replay {
        /// Input script (TOML)
        script: PathBuf,

        /// Track a single pointer instead of classifying gestures
        #[arg(long)]
        pointer: bool,

        /// Only print events with these names (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        events: Vec<String>,

        /// Pretty-print each event
        #[arg(long)]
        pretty: bool,
    },

    /// List gesture rules in evaluation order
    Rules,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = TactileConfig::load_or_default(cli.config.as_deref())?;

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_new(&config.logging.filter)
            .with_context(|| format!("Invalid log filter {:?}", config.logging.filter))?
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Replay {
            script,
            pointer,
            events,
            pretty,
        } => cmd_replay(&config, &script, pointer, &events, pretty),
        Commands::Rules => cmd_rules(),
    }
}

fn cmd_replay(
    config: &TactileConfig,
    path: &Path,
    pointer: bool,
    only: &[String],
    pretty: bool,
) -> Result<()> {
    let script = Script::load(path)?;
    let kind = if pointer {
        SessionKind::Pointer
    } else {
        SessionKind::Gesture
    };
    info!(
        "Replaying {} step(s) from {} on a {:?} host",
        script.steps.len(),
        path.display(),
        config.device
    );

    for event in replay::replay(config, &script, kind, only) {
        let line = if pretty {
            serde_json::to_string_pretty(&event)?
        } else {
            serde_json::to_string(&event)?
        };
        println!("{}", line);
    }

    Ok(())
}

fn cmd_rules() -> Result<()> {
    for (index, rule) in GestureRuleSet::standard().iter().enumerate() {
        println!("{:>2}  {}", index, rule.name());
    }
    Ok(())
}
