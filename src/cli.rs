//! Command-line parsing for the `procsim` binary.
//!
//! Hand-rolled (no clap dependency); every flag uses the `--name=value`
//! form. Flags override values loaded from `--config`.
//!
//! # Grammar
//!
//! ```text
//! procsim [--config=<file.json>] [OVERRIDES] [--report=summary|json] [--trace-out=<file>]
//! procsim --help | -h
//! ```

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

use crate::config::{RecordMode, SimConfig};
use crate::error::ConfigError;

/// Output format for the end-of-run report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// `key=value` line on stderr.
    #[default]
    Summary,
    /// Pretty JSON on stdout, plus the summary line on stderr.
    Json,
}

/// Parsed invocation.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Run(CliOptions),
    Help,
}

/// Flags for a simulation run. `None` keeps the config file's value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub quantum: Option<u64>,
    pub p_io: Option<f64>,
    pub p_unblock: Option<f64>,
    pub workloads: Option<Vec<u64>>,
    pub seed: Option<u64>,
    pub max_passes: Option<u64>,
    pub table: Option<PathBuf>,
    pub record: Option<RecordMode>,
    pub trace_capacity: Option<usize>,
    pub trace_out: Option<PathBuf>,
    pub report: ReportFormat,
}

impl CliOptions {
    /// Load `--config` (or defaults), apply overrides, and validate.
    pub fn resolve(&self) -> Result<SimConfig, ConfigError> {
        let mut cfg = match &self.config {
            Some(path) => SimConfig::load(path)?,
            None => SimConfig::default(),
        };
        if let Some(q) = self.quantum {
            cfg.scheduler.quantum = q;
        }
        if let Some(p) = self.p_io {
            cfg.scheduler.p_io = p;
        }
        if let Some(p) = self.p_unblock {
            cfg.scheduler.p_unblock = p;
        }
        if let Some(w) = &self.workloads {
            cfg.workloads = w.clone();
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        if self.max_passes.is_some() {
            cfg.scheduler.max_passes = self.max_passes;
        }
        if let Some(n) = self.trace_capacity {
            cfg.scheduler.trace_capacity = n;
        }
        if let Some(path) = &self.table {
            cfg.recorder.path = path.clone();
        }
        if let Some(mode) = self.record {
            cfg.recorder.mode = mode;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Invalid command-line input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CliError {
    UnknownFlag(String),
    InvalidValue { flag: &'static str, value: String },
    UnexpectedArgument(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFlag(flag) => write!(f, "unknown flag: {flag}"),
            Self::InvalidValue { flag, value } => write!(f, "invalid {flag} value: {value}"),
            Self::UnexpectedArgument(arg) => write!(f, "unexpected argument: {arg}"),
        }
    }
}

impl std::error::Error for CliError {}

pub fn usage(exe: &str) -> String {
    format!(
        "usage: {exe} [OPTIONS]

OPTIONS:
    --config=<file.json>    Load configuration from JSON (flags override it)
    --quantum=<N>           Work cycles per quantum (default: 1000)
    --p-io=<P>              Per-cycle I/O request probability (default: 0.01)
    --p-unblock=<P>         Per-pass unblock probability (default: 0.30)
    --work=<N,N,...>        Total work per process (default: 10 built-in workloads)
    --seed=<N>              RNG seed (default: wall clock)
    --max-passes=<N>        Stop after N scheduler passes
    --table=<path>          Process table destination (default: process_table.txt)
    --record=<MODE>         table | append | none (default: table)
    --trace=<N>             Trace ring capacity (default: 256, 0 disables)
    --trace-out=<path>      Write the retained trace as JSON
    --report=<FMT>          summary | json (default: summary)
    --help, -h              Show this help message

ENVIRONMENT:
    PROCSIM_LOG             Log filter (default: info), e.g. procsim=debug"
    )
}

/// Parse arguments, excluding the executable name.
pub fn parse_args<I>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = OsString>,
{
    let mut opts = CliOptions::default();

    for arg in args {
        let Some(flag) = arg.to_str() else {
            return Err(CliError::UnexpectedArgument(
                arg.to_string_lossy().into_owned(),
            ));
        };
        if let Some(v) = flag.strip_prefix("--config=") {
            opts.config = Some(PathBuf::from(v));
            continue;
        }
        if let Some(v) = flag.strip_prefix("--quantum=") {
            opts.quantum = Some(parse_value(v, "--quantum")?);
            continue;
        }
        if let Some(v) = flag.strip_prefix("--p-io=") {
            opts.p_io = Some(parse_value(v, "--p-io")?);
            continue;
        }
        if let Some(v) = flag.strip_prefix("--p-unblock=") {
            opts.p_unblock = Some(parse_value(v, "--p-unblock")?);
            continue;
        }
        if let Some(v) = flag.strip_prefix("--work=") {
            opts.workloads = Some(parse_work_list(v)?);
            continue;
        }
        if let Some(v) = flag.strip_prefix("--seed=") {
            opts.seed = Some(parse_value(v, "--seed")?);
            continue;
        }
        if let Some(v) = flag.strip_prefix("--max-passes=") {
            opts.max_passes = Some(parse_value(v, "--max-passes")?);
            continue;
        }
        if let Some(v) = flag.strip_prefix("--table=") {
            opts.table = Some(PathBuf::from(v));
            continue;
        }
        if let Some(v) = flag.strip_prefix("--record=") {
            opts.record = Some(RecordMode::parse(v).ok_or_else(|| invalid("--record", v))?);
            continue;
        }
        if let Some(v) = flag.strip_prefix("--trace=") {
            opts.trace_capacity = Some(parse_value(v, "--trace")?);
            continue;
        }
        if let Some(v) = flag.strip_prefix("--trace-out=") {
            opts.trace_out = Some(PathBuf::from(v));
            continue;
        }
        if let Some(v) = flag.strip_prefix("--report=") {
            opts.report = match v {
                "summary" => ReportFormat::Summary,
                "json" => ReportFormat::Json,
                _ => return Err(invalid("--report", v)),
            };
            continue;
        }
        match flag {
            "--help" | "-h" => return Ok(Command::Help),
            _ if flag.starts_with('-') => return Err(CliError::UnknownFlag(flag.to_string())),
            _ => return Err(CliError::UnexpectedArgument(flag.to_string())),
        }
    }

    Ok(Command::Run(opts))
}

fn invalid(flag: &'static str, value: &str) -> CliError {
    CliError::InvalidValue {
        flag,
        value: value.to_string(),
    }
}

fn parse_value<T: std::str::FromStr>(value: &str, flag: &'static str) -> Result<T, CliError> {
    value.trim().parse().map_err(|_| invalid(flag, value))
}

fn parse_work_list(value: &str) -> Result<Vec<u64>, CliError> {
    value
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| parse_value(s, "--work"))
        .collect()
}
