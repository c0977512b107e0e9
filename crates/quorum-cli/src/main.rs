//! `quorum` CLI — inspect slot grids and rank event snapshots from the
//! command line.
//!
//! ## Usage
//!
//! ```sh
//! # Print the canonical grid for a day
//! quorum grid --date 2026-03-16 --duration 2 --timeframe afternoon
//!
//! # Rank a snapshot (stdin → stdout)
//! cat snapshot.json | quorum rank
//!
//! # Rank from file to file, keeping the 3 best slots
//! quorum rank -i snapshot.json -o ranked.json --top 3
//!
//! # Human-readable digest
//! quorum summary -i snapshot.json
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use quorum_engine::event::Timeframe;
use quorum_engine::snapshot::EventSnapshot;
use quorum_engine::{generate_grid, rank_snapshot};
use std::io::{self, Read};

#[derive(Parser)]
#[command(
    name = "quorum",
    version,
    about = "Group scheduling: slot grids and availability ranking"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical slot grid for one day as JSON
    Grid {
        /// Calendar day (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Meeting length in whole hours
        #[arg(long)]
        duration: u32,
        /// Daypart window: morning, afternoon, evening, or all-day
        #[arg(long, default_value = "all-day")]
        timeframe: Timeframe,
    },
    /// Rank an event snapshot by attendance
    Rank {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Keep only the N best slots
        #[arg(long)]
        top: Option<usize>,
    },
    /// Print a human-readable digest of an event snapshot
    Summary {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Grid {
            date,
            duration,
            timeframe,
        } => {
            let slots = generate_grid(date, duration, timeframe);
            let json = serde_json::to_string_pretty(&slots)?;
            println!("{}", json);
        }
        Commands::Rank { input, output, top } => {
            let snapshot = read_snapshot(input.as_deref())?;

            let mut ranked = rank_snapshot(&snapshot);
            if let Some(top) = top {
                ranked.truncate(top);
            }

            let json = serde_json::to_string_pretty(&ranked)?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Summary { input } => {
            let snapshot = read_snapshot(input.as_deref())?;
            let ranked = rank_snapshot(&snapshot);

            let event = &snapshot.event;
            println!("Event:         {} ({})", event.name, event.id);
            println!(
                "Window:        {}, {}h slots",
                event.timeframe, event.duration
            );
            println!("Participants:  {}", snapshot.participants.len());
            println!("Ranked slots:  {}", ranked.len());
            match ranked.first() {
                Some(best) => println!(
                    "Best slot:     {} {}-{} — {}/{} available ({})",
                    best.date,
                    best.start_time,
                    best.end_time,
                    best.participant_count,
                    snapshot.participants.len(),
                    best.conflict_level
                ),
                None => println!("Best slot:     none (no availability marked)"),
            }
        }
    }

    Ok(())
}

fn read_snapshot(path: Option<&str>) -> Result<EventSnapshot> {
    let json = read_input(path)?;
    serde_json::from_str(&json).context("Failed to parse event snapshot JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
