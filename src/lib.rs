//! # Zeo Log
//!
//! Converts myZeo sleep-tracker exports (`.csv`) into a flat, append-only log
//! that line-oriented tools such as Splunk can ingest.
//!
//! Every night in an export becomes:
//!
//! - one line per 30-second sample of the "Detailed Sleep Graph",
//!   `2020-01-02T23:00:30+00:00 state=REM`
//! - one summary line carrying every column as a sorted `key="value"` list,
//!   prefixed by the "End of Night" time
//!
//! All date columns are read as wall-clock times in a chosen timezone and
//! rendered as ISO-8601 with their offset.
//!
//! ## Quick Start
//!
//! ```no_run
//! use zeo_log::{ConverterConfig, RecordConverter, StdoutProgress};
//!
//! let converter = RecordConverter::new(&ConverterConfig::new().timezone("US/Eastern"))?;
//! let conversion = converter.convert_file("zeodata.csv", "zeo.log", &mut StdoutProgress)?;
//!
//! println!("{}", conversion.stats.summary());
//! # Ok::<(), zeo_log::Error>(())
//! ```
//!
//! Or, without any configuration:
//!
//! ```no_run
//! let lines = zeo_log::convert("zeodata.csv", "zeo.log", None)?;
//! println!("Wrote {} lines", lines.len());
//! # Ok::<(), zeo_log::Error>(())
//! ```
//!
//! ## Lower-Level Access
//!
//! Records can be read and formatted without touching the filesystem:
//!
//! ```
//! use zeo_log::{formatter, timestamp, ZeoReader};
//!
//! let csv = "Start of Night,End of Night,Detailed Sleep Graph\n\
//!            01/02/2020 23:00,01/03/2020 06:50,1 2\n";
//! let records = ZeoReader::from_reader(csv.as_bytes())?.read_all()?;
//! let zone = timestamp::lookup_timezone("UTC")?;
//! let lines = formatter::format_record(&records[0], zone)?;
//!
//! assert_eq!(lines[0], "2020-01-02T23:00:00+00:00 state=wake\n");
//! assert_eq!(lines[1], "2020-01-02T23:00:30+00:00 state=REM\n");
//! # Ok::<(), zeo_log::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! ```no_run
//! use zeo_log::Error;
//!
//! match zeo_log::convert("zeodata.csv", "zeo.log", Some("UTC")) {
//!     Ok(lines) => println!("{} lines", lines.len()),
//!     Err(Error::UnknownState(code)) => eprintln!("bad sleep graph code {}", code),
//!     Err(err) if err.is_parse_error() => eprintln!("bad date: {}", err),
//!     Err(err) => eprintln!("Error: {}", err),
//! }
//! ```

// Public API modules
pub mod converter;
pub mod error;
pub mod reader;
pub mod writer;

// Re-export commonly used types
pub use converter::{
    convert, Conversion, ConversionStats, ConverterConfig, NoProgress, ProgressObserver,
    RecordConverter, StdoutProgress,
};
pub use error::{Error, Result};
pub use reader::{ZeoReader, ZeoReaderBuilder};
pub use writer::{LogWriter, WriteStats};

pub use models::{DateField, SleepRecord, SleepState, TimeSeriesSample};

// Building blocks of a conversion
pub mod formatter;
pub mod models;
pub mod timestamp;

/// Alias for the lines produced by a conversion, each ending in `\n`.
pub type LogLines = Vec<String>;
