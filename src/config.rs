//! Simulation configuration: defaults, JSON loading and validation.
//!
//! All fields have calibration defaults, so an empty JSON object is a valid
//! config. Values are validated once at startup; the scheduler assumes a
//! validated config and never re-checks ranges during a run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::process::Pid;

/// Default cycles per quantum.
pub const DEFAULT_QUANTUM: u64 = 1000;
/// Default per-cycle probability of an I/O request.
pub const DEFAULT_P_IO: f64 = 0.01;
/// Default per-pass probability that a blocked process wakes up.
pub const DEFAULT_P_UNBLOCK: f64 = 0.30;
/// Default workload list, one entry per process.
pub const DEFAULT_WORKLOADS: [u64; 10] = [
    10000, 5000, 7000, 3000, 3000, 8000, 2000, 5000, 4000, 10000,
];
/// Default trace ring capacity.
pub const DEFAULT_TRACE_CAPACITY: usize = 256;
/// Default process table destination.
pub const DEFAULT_TABLE_PATH: &str = "process_table.txt";

/// Parameters of the scheduling loop itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulerConfig {
    /// Maximum work cycles per dispatch.
    pub quantum: u64,
    /// Probability of an I/O request after each executed cycle.
    pub p_io: f64,
    /// Probability that a blocked process wakes during a pass.
    ///
    /// Zero together with a non-zero `p_io` can leave processes blocked
    /// forever; bound such runs with `max_passes`.
    pub p_unblock: f64,
    /// Stop after this many passes even if processes remain.
    pub max_passes: Option<u64>,
    /// Scheduler events retained in the trace ring (0 disables tracing).
    pub trace_capacity: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
            p_io: DEFAULT_P_IO,
            p_unblock: DEFAULT_P_UNBLOCK,
            max_passes: None,
            trace_capacity: DEFAULT_TRACE_CAPACITY,
        }
    }
}

impl SchedulerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quantum == 0 {
            return Err(ConfigError::ZeroQuantum);
        }
        check_probability("p_io", self.p_io)?;
        check_probability("p_unblock", self.p_unblock)?;
        Ok(())
    }
}

/// How snapshots are persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordMode {
    /// Overwrite the destination with the full current table each time.
    #[default]
    Table,
    /// Append every snapshot to the destination.
    Append,
    /// Keep nothing.
    None,
}

impl RecordMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "table" => Some(Self::Table),
            "append" => Some(Self::Append),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

/// Recorder destination and policy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecorderConfig {
    pub mode: RecordMode,
    pub path: PathBuf,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            mode: RecordMode::Table,
            path: PathBuf::from(DEFAULT_TABLE_PATH),
        }
    }
}

/// Full configuration of one simulation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    pub scheduler: SchedulerConfig,
    /// Total work of each process; the index becomes the pid.
    pub workloads: Vec<u64>,
    /// RNG seed. `None` seeds from the wall clock.
    pub seed: Option<u64>,
    pub recorder: RecorderConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            scheduler: SchedulerConfig::default(),
            workloads: DEFAULT_WORKLOADS.to_vec(),
            seed: None,
            recorder: RecorderConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file (not validated).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scheduler.validate()?;
        if let Some(idx) = self.workloads.iter().position(|&w| w == 0) {
            return Err(ConfigError::ZeroWork {
                pid: Pid::from_u32(idx as u32),
            });
        }
        Ok(())
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange { name, value })
    }
}
