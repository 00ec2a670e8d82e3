//! Command-line interface for the Zeo log converter.
//!
//! Converts one or more myZeo export files into a single append-only log.

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, LevelFilter};
use std::path::{Path, PathBuf};
use std::time::Instant;
use zeo_log::{ConverterConfig, NoProgress, ProgressObserver, RecordConverter, StdoutProgress};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Convert myZeo CSV exports into a Splunk-friendly log",
    long_about = "Converts myZeo CSV exports into a flat log with one line per 30-second sleep \
                  state sample and one key=\"value\" summary line per night.\n\n\
                  Wildcards are permitted in ZEO_FILES. When several files match, they are \
                  processed in filename order and everything is appended to OUTPUT_FILE."
)]
struct Args {
    /// Export file, or a glob pattern such as "exports/zeo_*.csv"
    #[arg(value_name = "ZEO_FILES")]
    pattern: String,

    /// Timezone name the export times are in, e.g. "US/Eastern"
    #[arg(value_name = "TIMEZONE")]
    timezone: String,

    /// Log file to append to (created if missing)
    #[arg(value_name = "OUTPUT_FILE")]
    output: PathBuf,

    /// Field delimiter of the export files
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Do not echo converted lines to stdout
    #[arg(short, long)]
    quiet: bool,

    /// Skip files that fail to convert instead of stopping the run
    #[arg(long)]
    keep_going: bool,
}

fn convert_one_file(
    converter: &RecordConverter,
    input_file: &Path,
    output_file: &Path,
    quiet: bool,
) -> Result<()> {
    info!("📄 Processing: {}", input_file.display());
    let start_time = Instant::now();

    let mut observer: Box<dyn ProgressObserver> = if quiet {
        Box::new(NoProgress)
    } else {
        Box::new(StdoutProgress)
    };

    let conversion = converter
        .convert_file(input_file, output_file, observer.as_mut())
        .with_context(|| format!("failed to convert {}", input_file.display()))?;

    info!("   ├─ {}", conversion.stats.summary());
    info!("   └─ ✓ Done in {:.2?}", start_time.elapsed());

    Ok(())
}

/// Expand the pattern and sort the matches as path strings, oldest-named export first.
fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut files = glob::glob(pattern)
        .with_context(|| format!("invalid file pattern '{}'", pattern))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .context("failed to read a matched path")?;
    files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    Ok(files)
}

/// Convert `zeo_files` in order into `output_file`, returning how many failed.
///
/// Without `keep_going` the first failure is returned as the error.
fn convert_all(
    converter: &RecordConverter,
    zeo_files: &[PathBuf],
    output_file: &Path,
    quiet: bool,
    keep_going: bool,
) -> Result<usize> {
    let mut failed = 0;

    for (idx, input_file) in zeo_files.iter().enumerate() {
        info!("[{}/{}]", idx + 1, zeo_files.len());

        if let Err(e) = convert_one_file(converter, input_file, output_file, quiet) {
            if !keep_going {
                return Err(e);
            }
            error!("   └─ ✗ Error: {:#}", e);
            failed += 1;
        }
    }

    Ok(failed)
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp(None)
        .parse_default_env()
        .init();

    let args = Args::parse();

    anyhow::ensure!(
        args.delimiter.is_ascii(),
        "delimiter must be a single ASCII character, got '{}'",
        args.delimiter
    );

    let config = ConverterConfig::new()
        .timezone(args.timezone.as_str())
        .delimiter(args.delimiter as u8);
    let converter = RecordConverter::new(&config)?;

    info!("Processing zeo files...");

    let zeo_files = expand_pattern(&args.pattern)?;
    if zeo_files.is_empty() {
        info!("No files match {}", args.pattern);
        return Ok(());
    }

    info!(
        "📂 Found {} file(s), timezone {}",
        zeo_files.len(),
        converter.timezone()
    );

    let total_start = Instant::now();
    let failed = convert_all(
        &converter,
        &zeo_files,
        &args.output,
        args.quiet,
        args.keep_going,
    )?;

    info!("Output written to {}", args.output.display());
    info!("🏁 All files processed in {:.2?}", total_start.elapsed());

    if failed > 0 {
        anyhow::bail!("{} of {} file(s) failed to convert", failed, zeo_files.len());
    }

    Ok(())
}
