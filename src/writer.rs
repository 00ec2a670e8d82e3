//! Append-only sink for converted log lines.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Result;

/// Writer that appends log lines to a file, creating it if needed.
///
/// The file is opened, written, flushed and closed inside a single
/// [`LogWriter::write`] call, so several sources can share one destination.
///
/// # Examples
///
/// ```no_run
/// use zeo_log::LogWriter;
///
/// let lines = vec!["2020-01-02T23:00:00+00:00 state=wake\n".to_string()];
/// let stats = LogWriter::new("zeo.log").write(&lines)?;
/// println!("{}", stats.summary());
/// # Ok::<(), zeo_log::Error>(())
/// ```
pub struct LogWriter {
    path: PathBuf,
}

impl LogWriter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `lines` verbatim. Each line carries its own trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or written.
    pub fn write<S: AsRef<str>>(&self, lines: &[S]) -> Result<WriteStats> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut out = BufWriter::new(file);

        let mut num_bytes = 0;
        for line in lines {
            let line = line.as_ref();
            out.write_all(line.as_bytes())?;
            num_bytes += line.len();
        }
        out.flush()?;

        debug!("appended {} lines to {}", lines.len(), self.path.display());

        Ok(WriteStats {
            num_lines: lines.len(),
            num_bytes,
        })
    }
}

/// Statistics about one append to the output log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    /// Lines appended
    pub num_lines: usize,
    /// Bytes appended
    pub num_bytes: usize,
}

impl WriteStats {
    pub fn summary(&self) -> String {
        format!("Appended {} lines ({} bytes)", self.num_lines, self.num_bytes)
    }
}
