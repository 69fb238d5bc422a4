//! Wordround transcript replayer.
//!
//! # Usage
//!
//! ```bash
//! # Replay a recorded round as player 1, report to stdout
//! wordround-replay --player 1 round.jsonl
//!
//! # Start from a snapshot with reproducible shuffles
//! wordround-replay --player 2 --snapshot round.json --seed 7 --output report.jsonl round.jsonl
//! ```

use std::{fs::File, io::BufWriter, path::PathBuf};

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use wordround_replay::{ReplayConfig, Transcript, parse_snapshot, replay};

/// Wordround transcript replayer
#[derive(Parser, Debug)]
#[command(name = "wordround-replay")]
#[command(about = "Replay a recorded wordround round through the session runtime")]
#[command(version)]
struct Args {
    /// Transcript to replay (JSON lines)
    transcript: PathBuf,

    /// Local player number
    #[arg(short, long, default_value = "1")]
    player: u32,

    /// Round snapshot to start from (JSON)
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    /// Seed for rack shuffles (system randomness if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let transcript = Transcript::parse(&tokio::fs::read_to_string(&args.transcript).await?)?;
    let snapshot = match &args.snapshot {
        Some(path) => Some(parse_snapshot(&tokio::fs::read_to_string(path).await?)?),
        None => None,
    };

    let out: Box<dyn std::io::Write + Send> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(std::io::stdout()),
    };

    let config = ReplayConfig { player: args.player, seed: args.seed, snapshot };
    let summary = replay(config, transcript, out).await?;

    tracing::info!(
        sent = summary.sent,
        renders = summary.renders,
        applied = summary.stats.applied,
        ignored = summary.stats.ignored,
        malformed = summary.stats.malformed,
        "replay complete"
    );

    Ok(())
}
