//! Export-to-log conversion, one input source at a time.

use std::io::Read;
use std::path::Path;

use chrono_tz::Tz;
use log::debug;

use crate::error::Result;
use crate::formatter::format_record;
use crate::reader::ZeoReaderBuilder;
use crate::timestamp::{lookup_timezone, DEFAULT_TIMEZONE};
use crate::writer::LogWriter;
use crate::LogLines;

/// Settings shared by every source of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    /// IANA timezone name attached to every export timestamp. Empty means UTC.
    pub timezone: String,
    /// Field delimiter of the export files.
    pub delimiter: u8,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            delimiter: b',',
        }
    }
}

impl ConverterConfig {
    /// Create a configuration for UTC and comma-delimited exports.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timezone the export's wall-clock times are in.
    ///
    /// Any IANA name works, e.g. `"US/Eastern"` or `"Europe/London"`. An
    /// empty name means UTC. The name is checked by [`RecordConverter::new`].
    ///
    /// # Examples
    ///
    /// ```
    /// use zeo_log::{ConverterConfig, RecordConverter};
    ///
    /// let config = ConverterConfig::new().timezone("Europe/London");
    /// let converter = RecordConverter::new(&config)?;
    /// assert_eq!(converter.timezone().name(), "Europe/London");
    /// # Ok::<(), zeo_log::Error>(())
    /// ```
    pub fn timezone(mut self, name: impl Into<String>) -> Self {
        self.timezone = name.into();
        self
    }

    /// Set the field delimiter of the export files. Default is `,`.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Receives every produced line for live display.
///
/// Purely observational; the output file is the record of truth.
pub trait ProgressObserver {
    fn on_line(&mut self, line: &str);
}

impl<F: FnMut(&str)> ProgressObserver for F {
    fn on_line(&mut self, line: &str) {
        self(line)
    }
}

/// Echoes lines to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutProgress;

impl ProgressObserver for StdoutProgress {
    fn on_line(&mut self, line: &str) {
        print!("{}", line);
    }
}

/// Discards lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_line(&mut self, _line: &str) {}
}

/// Counters for one converted source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    pub records: usize,
    pub series_lines: usize,
    pub summary_lines: usize,
    pub bytes_written: usize,
}

impl ConversionStats {
    pub fn summary(&self) -> String {
        format!(
            "Converted {} record(s) into {} state line(s) and {} summary line(s), {} bytes",
            self.records, self.series_lines, self.summary_lines, self.bytes_written
        )
    }
}

/// Result of converting one source: its lines in output order plus counters.
#[derive(Debug, Clone, Default)]
pub struct Conversion {
    pub lines: LogLines,
    pub stats: ConversionStats,
}

/// Converts sleep exports into state and summary log lines.
///
/// # Examples
///
/// ```no_run
/// use zeo_log::{ConverterConfig, RecordConverter, StdoutProgress};
///
/// let converter = RecordConverter::new(&ConverterConfig::new().timezone("US/Eastern"))?;
/// let conversion = converter.convert_file("zeodata.csv", "zeo.log", &mut StdoutProgress)?;
/// println!("{}", conversion.stats.summary());
/// # Ok::<(), zeo_log::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct RecordConverter {
    zone: Tz,
    delimiter: u8,
}

impl RecordConverter {
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownTimezone`] if the configured zone is not known.
    pub fn new(config: &ConverterConfig) -> Result<Self> {
        Ok(Self {
            zone: lookup_timezone(&config.timezone)?,
            delimiter: config.delimiter,
        })
    }

    /// The zone attached to every export timestamp.
    pub fn timezone(&self) -> Tz {
        self.zone
    }

    /// Convert every record of `source`, in order.
    ///
    /// Each record's lines reach `observer` once the record has fully
    /// converted. The first failing record aborts the whole source.
    pub fn convert_reader<R: Read>(
        &self,
        source: R,
        observer: &mut dyn ProgressObserver,
    ) -> Result<Conversion> {
        let mut reader = ZeoReaderBuilder::new()
            .delimiter(self.delimiter)
            .from_reader(source)?;

        let mut conversion = Conversion::default();
        for (index, record) in reader.records().enumerate() {
            let lines = format_record(&record?, self.zone)?;
            debug!("record {} produced {} lines", index + 1, lines.len());

            for line in &lines {
                observer.on_line(line);
            }
            conversion.stats.records += 1;
            conversion.stats.series_lines += lines.len() - 1;
            conversion.stats.summary_lines += 1;
            conversion.lines.extend(lines);
        }

        Ok(conversion)
    }

    /// Convert the export at `input` and append the result to `output`.
    ///
    /// Nothing is appended if any record fails. The output is created even
    /// when the export has no rows.
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
        observer: &mut dyn ProgressObserver,
    ) -> Result<Conversion> {
        let file = std::fs::File::open(input.as_ref())?;
        let mut conversion = self.convert_reader(file, observer)?;

        let written = LogWriter::new(output.as_ref()).write(&conversion.lines)?;
        conversion.stats.bytes_written = written.num_bytes;

        debug!(
            "{} -> {}: {}",
            input.as_ref().display(),
            output.as_ref().display(),
            written.summary()
        );
        Ok(conversion)
    }
}

/// Convert one export file, appending to `output` and returning the lines written.
///
/// `timezone` falls back to UTC when `None` or empty. Lines are not echoed.
pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    timezone: Option<&str>,
) -> Result<LogLines> {
    let config = ConverterConfig::new().timezone(timezone.unwrap_or_default());
    let converter = RecordConverter::new(&config)?;
    let conversion = converter.convert_file(input, output, &mut NoProgress)?;
    Ok(conversion.lines)
}
