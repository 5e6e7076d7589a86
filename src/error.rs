//! Error types for configuration, process bookkeeping and table recording.
//!
//! Errors are split by boundary so each carries only what its caller can act
//! on. Configuration errors are fatal at startup. Recording errors are
//! reported and dropped by the scheduler. `ProcessError` guards the single
//! public mutation on [`Process`](crate::Process).
//!
//! # Design Notes
//! - I/O errors keep their source so diagnostics stay actionable.
//! - Variants with a `path` name the file that failed, not the directory.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::process::Pid;

/// Errors from loading or validating a simulation configuration.
#[derive(Debug)]
#[non_exhaustive]
pub enum ConfigError {
    /// Reading the config file failed.
    Io { path: PathBuf, source: io::Error },
    /// The config file is not valid JSON for [`SimConfig`](crate::SimConfig).
    Parse(serde_json::Error),
    /// `quantum` must be at least one cycle.
    ZeroQuantum,
    /// A probability is NaN or outside `[0, 1]`.
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    /// A workload entry requires no work at all.
    ZeroWork { pid: Pid },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
            Self::ZeroQuantum => write!(f, "quantum must be >= 1"),
            Self::ProbabilityOutOfRange { name, value } => {
                write!(f, "{name} must be within [0, 1], got {value}")
            }
            Self::ZeroWork { pid } => write!(f, "workload for pid {pid} must be >= 1"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Errors from a table recorder write.
///
/// These never abort a simulation; the scheduler logs and counts them.
#[derive(Debug)]
#[non_exhaustive]
pub enum RecordError {
    /// Creating, writing or truncating the destination failed.
    Io { path: PathBuf, source: io::Error },
    /// Renaming the staged table over the destination failed.
    Persist { path: PathBuf, source: io::Error },
}

impl RecordError {
    #[inline]
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Destination the failed write targeted.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Persist { path, .. } => path,
        }
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to write process table {}: {source}", path.display())
            }
            Self::Persist { path, source } => {
                write!(f, "failed to replace process table {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } | Self::Persist { source, .. } => Some(source),
        }
    }
}

/// Errors from mutating a process record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessError {
    /// `advance_cycle` was called after all required work was done.
    WorkComplete { pid: Pid },
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WorkComplete { pid } => {
                write!(f, "pid {pid} has no remaining work to advance")
            }
        }
    }
}

impl std::error::Error for ProcessError {}
