/// Earshot Simulator - headless playback sessions on a virtual clock
use anyhow::Context;
use clap::{Parser, Subcommand};
use earshot_playback::format_seconds;
use earshot_sim::{load_playlist, run_session, SessionOptions, SimConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "earshot-sim")]
#[command(about = "Replay Earshot player sessions without a browser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a playlist file to the end
    Run {
        /// JSON array of items (`title`, `members`, `url`, `thumbnail`, `duration`)
        playlist: PathBuf,

        /// Configuration file path
        #[arg(short, long, env = "EARSHOT_CONFIG")]
        config: Option<PathBuf>,

        /// Index of the first item
        #[arg(short, long, default_value_t = 0)]
        start: usize,

        /// Enable shuffle
        #[arg(long)]
        shuffle: bool,

        /// Enable single-item loop
        #[arg(long = "loop")]
        looping: bool,

        /// Override the configured tick budget
        #[arg(long)]
        max_ticks: Option<u64>,
    },
    /// Print a duration the way the player displays it
    Format {
        /// Whole seconds
        seconds: u32,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "earshot_sim=info,earshot_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            playlist,
            config,
            start,
            shuffle,
            looping,
            max_ticks,
        } => {
            let mut sim_config =
                SimConfig::load(config.as_deref()).context("failed to load configuration")?;
            if let Some(max_ticks) = max_ticks {
                sim_config.max_ticks = max_ticks;
            }

            let items = load_playlist(&playlist)
                .with_context(|| format!("failed to read playlist {}", playlist.display()))?;
            let options = SessionOptions {
                start,
                shuffle,
                looping,
            };

            let report = run_session(&sim_config, items, &options)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Format { seconds } => {
            println!("{}", format_seconds(seconds));
        }
    }

    Ok(())
}
