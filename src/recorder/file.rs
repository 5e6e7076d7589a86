//! File-backed recorders.

use std::fmt::Write as _;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tempfile::NamedTempFile;

use super::{Snapshot, TableRecorder};
use crate::error::RecordError;

const TABLE_RULE: &str = "---------------------------------------------------------";

/// Append one line per row to `out`, in snapshot order.
pub fn render_rows(snapshot: &Snapshot, out: &mut String) {
    for row in &snapshot.rows {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{row}");
    }
}

fn unix_stamp() -> String {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => format!("{}.{:03}", d.as_secs(), d.subsec_millis()),
        Err(_) => "0.000".to_string(),
    }
}

/// Replaces the destination with the current table on every call.
///
/// Layout:
/// ```text
/// Process table (updated at unix=<secs>.<millis>)
/// ---------------------------------------------------------
/// PID=0 TP=1000/10000 CP=1001 EP=READY NES=0 N_CPU=1
/// ...
/// ```
#[derive(Debug)]
pub struct TableFileRecorder {
    path: PathBuf,
    buf: String,
}

impl TableFileRecorder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            buf: String::with_capacity(1024),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl TableRecorder for TableFileRecorder {
    fn record(&mut self, snapshot: &Snapshot) -> Result<(), RecordError> {
        self.buf.clear();
        let _ = writeln!(self.buf, "Process table (updated at unix={})", unix_stamp());
        self.buf.push_str(TABLE_RULE);
        self.buf.push('\n');
        render_rows(snapshot, &mut self.buf);

        let mut staged =
            NamedTempFile::new_in(self.staging_dir()).map_err(|e| RecordError::io(&self.path, e))?;
        staged
            .write_all(self.buf.as_bytes())
            .and_then(|()| staged.flush())
            .map_err(|e| RecordError::io(&self.path, e))?;
        staged
            .persist(&self.path)
            .map_err(|e| RecordError::Persist {
                path: self.path.clone(),
                source: e.error,
            })?;
        Ok(())
    }

    fn reset(&mut self) -> Result<(), RecordError> {
        File::create(&self.path)
            .map(drop)
            .map_err(|e| RecordError::io(&self.path, e))
    }
}

/// Appends a pass marker and every row on each call.
///
/// ```text
/// # pass=3 clock=2417
/// PID=0 TP=1000/10000 CP=1001 EP=READY NES=0 N_CPU=1
/// ...
/// ```
#[derive(Debug)]
pub struct AppendLogRecorder {
    path: PathBuf,
    buf: String,
}

impl AppendLogRecorder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            buf: String::with_capacity(1024),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableRecorder for AppendLogRecorder {
    fn record(&mut self, snapshot: &Snapshot) -> Result<(), RecordError> {
        self.buf.clear();
        let _ = writeln!(self.buf, "# pass={} clock={}", snapshot.pass, snapshot.clock);
        render_rows(snapshot, &mut self.buf);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| RecordError::io(&self.path, e))?;
        file.write_all(self.buf.as_bytes())
            .map_err(|e| RecordError::io(&self.path, e))
    }

    fn reset(&mut self) -> Result<(), RecordError> {
        File::create(&self.path)
            .map(drop)
            .map_err(|e| RecordError::io(&self.path, e))
    }
}
