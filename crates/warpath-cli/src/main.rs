//! Warpath front end.
//!
//! Loads a seed document, optionally runs an event script through the
//! engine, then answers `status` / `gold` / `exit` on stdin. Everything
//! textual lives here; the core only ever sees typed events and emits plain
//! data back.

mod script;

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use warpath_core::data_loader::{load_seed_json, SeedError};
use warpath_core::engine::Engine;
use warpath_core::query::{QueryOutput, QuerySink, StatusReport};

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

#[derive(Debug, Parser)]
#[command(name = "warpath", about = "Clan-territory raid simulator")]
struct Args {
    /// Seed document (JSON) describing the initial territory.
    seed: PathBuf,

    /// Event script to run before the query prompt.
    #[arg(long)]
    events: Option<PathBuf>,

    /// Exit after the script instead of prompting for queries.
    #[arg(long)]
    batch: bool,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Prints query results as the drain produces them.
struct PrintSink;

impl QuerySink for PrintSink {
    fn emit(&mut self, output: QueryOutput) {
        match output {
            QueryOutput::Status(report) => print_status(&report),
            QueryOutput::Gold(total) => println!("gold {total}"),
        }
    }
}

fn print_status(report: &StatusReport) {
    println!("status @ {}", report.tick);
    for mine in &report.mines {
        println!("  {} {}/{}", mine.name, mine.available, mine.capacity);
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
enum SeedLoadError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Seed(#[from] SeedError),
}

fn load_engine(path: &Path) -> Result<Engine, SeedLoadError> {
    let text = fs::read_to_string(path)?;
    Ok(load_seed_json(&text)?)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut engine = match load_engine(&args.seed) {
        Ok(engine) => engine,
        Err(err) => {
            tracing::error!(%err, seed = %args.seed.display(), "failed to load seed");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        clans = engine.registry().len(),
        roads = engine.router().road_count(),
        "territory loaded"
    );

    if let Some(path) = &args.events {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                tracing::error!(%err, script = %path.display(), "failed to read event script");
                return ExitCode::FAILURE;
            }
        };
        let events = script::parse_script(&text);
        tracing::info!(count = events.len(), "running event script");
        for (tick, event) in events {
            engine.schedule(tick, event);
        }
        engine.drain(&mut PrintSink);
    }

    if args.batch {
        return ExitCode::SUCCESS;
    }

    query_loop(&mut engine)
}

/// Answer status/gold queries until `exit` or end of input.
fn query_loop(engine: &mut Engine) -> ExitCode {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return ExitCode::FAILURE;
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(err)) => {
                tracing::error!(%err, "failed to read command");
                return ExitCode::FAILURE;
            }
            None => break,
        };

        match line.trim() {
            "" => {}
            "status" => print_status(&engine.status_report()),
            "gold" => println!("gold {}", engine.gold_total()),
            "exit" => break,
            other => println!("unknown command '{other}' (status, gold, exit)"),
        }
    }

    ExitCode::SUCCESS
}
