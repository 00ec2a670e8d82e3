//! High-level API for reading sleep export files.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::error::Result;
use crate::models::SleepRecord;

/// A reader for comma-delimited sleep exports whose first row names the columns.
///
/// # Examples
///
/// ```no_run
/// use zeo_log::ZeoReader;
///
/// let reader = ZeoReader::from_file("zeodata.csv")?;
/// let records = reader.read_all()?;
/// println!("Read {} nights", records.len());
/// # Ok::<(), zeo_log::Error>(())
/// ```
pub struct ZeoReader<R> {
    inner: csv::Reader<R>,
    headers: StringRecord,
}

impl ZeoReader<File> {
    /// Open an export file with the default comma delimiter.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or its header row cannot be read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        ZeoReaderBuilder::new().from_file(path)
    }
}

impl<R: Read> ZeoReader<R> {
    /// Wrap any byte source, e.g. an in-memory export, with the default comma delimiter.
    ///
    /// # Errors
    ///
    /// Returns an error if the header row cannot be read.
    pub fn from_reader(source: R) -> Result<Self> {
        ZeoReaderBuilder::new().from_reader(source)
    }

    fn with_csv(mut inner: csv::Reader<R>) -> Result<Self> {
        let headers = inner.headers()?.clone();
        Ok(Self { inner, headers })
    }

    /// Column names from the header row.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.headers.iter()
    }

    /// Iterate over the rows in file order.
    pub fn records(&mut self) -> impl Iterator<Item = Result<SleepRecord>> + '_ {
        let headers = &self.headers;
        self.inner.records().map(move |row| {
            let row = row?;
            Ok(SleepRecord::from_pairs(headers.iter().zip(row.iter())))
        })
    }

    /// Read every row, failing on the first malformed one.
    pub fn read_all(mut self) -> Result<Vec<SleepRecord>> {
        self.records().collect()
    }
}

/// Builder for configuring how exports are decoded.
///
/// # Examples
///
/// ```no_run
/// use zeo_log::ZeoReaderBuilder;
///
/// let reader = ZeoReaderBuilder::new()
///     .delimiter(b';')
///     .from_file("zeodata.csv")?;
/// # Ok::<(), zeo_log::Error>(())
/// ```
pub struct ZeoReaderBuilder {
    delimiter: u8,
}

impl ZeoReaderBuilder {
    /// Create a new reader builder with default options.
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Set the field delimiter. Default is `,`.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn csv_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder.delimiter(self.delimiter).has_headers(true);
        builder
    }

    /// Build a reader over the export at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or its header row cannot be read.
    pub fn from_file<P: AsRef<Path>>(self, path: P) -> Result<ZeoReader<File>> {
        let file = File::open(path.as_ref())?;
        ZeoReader::with_csv(self.csv_builder().from_reader(file))
    }

    /// Build a reader over any byte source.
    ///
    /// # Examples
    ///
    /// ```
    /// use zeo_log::ZeoReaderBuilder;
    ///
    /// let csv = "ZQ;Start of Night\n84;01/02/2020 23:00\n";
    /// let records = ZeoReaderBuilder::new()
    ///     .delimiter(b';')
    ///     .from_reader(csv.as_bytes())?
    ///     .read_all()?;
    ///
    /// assert_eq!(records[0].get("ZQ"), Some("84"));
    /// # Ok::<(), zeo_log::Error>(())
    /// ```
    pub fn from_reader<R: Read>(self, source: R) -> Result<ZeoReader<R>> {
        ZeoReader::with_csv(self.csv_builder().from_reader(source))
    }
}

impl Default for ZeoReaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}
