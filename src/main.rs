//! Process Scheduling Simulator CLI
//!
//! Runs the round-robin, quantum-sliced scheduler over a set of synthetic
//! processes and keeps a human-readable process table up to date after every
//! dispatch.
//!
//! # Output
//!
//! - Transitions are logged to stderr (filter with `PROCSIM_LOG`).
//! - The process table goes to `--table` (default `process_table.txt`).
//! - A summary is written to stderr upon completion:
//!   `termination=.. processes=N terminated=N passes=N ... seed=N elapsed_ms=N`
//! - With `--report=json`, the full report is written to stdout.
//!
//! # Exit Codes
//!
//! - `0`: Success (including a run stopped by `--max-passes`)
//! - `2`: Invalid arguments or configuration error

use std::env;
use std::fs;
use std::io::{self, Write};
use std::time::Instant;

use procsim::cli::{self, Command, ReportFormat};
use procsim::run_simulation;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "PROCSIM_LOG";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> io::Result<()> {
    let mut args = env::args_os();
    let exe = args
        .next()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "procsim".to_string());

    let opts = match cli::parse_args(args) {
        Ok(Command::Run(opts)) => opts,
        Ok(Command::Help) => {
            eprintln!("{}", cli::usage(&exe));
            std::process::exit(0);
        }
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            eprintln!("{}", cli::usage(&exe));
            std::process::exit(2);
        }
    };

    let cfg = match opts.resolve() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    init_logging();

    let start = Instant::now();
    let run = match run_simulation(&cfg) {
        Ok(run) => run,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };
    let elapsed = start.elapsed();

    if let Some(path) = &opts.trace_out {
        let json = serde_json::to_string_pretty(&run.trace)?;
        fs::write(path, json)?;
    }

    if opts.report == ReportFormat::Json {
        let mut out = io::stdout().lock();
        serde_json::to_writer_pretty(&mut out, &run.report)?;
        writeln!(out)?;
    }

    eprintln!(
        "{} seed={} elapsed_ms={}",
        run.report.summary_line(),
        run.seed,
        elapsed.as_millis()
    );

    Ok(())
}
