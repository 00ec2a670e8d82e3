//! Test utilities for building myZeo export files
use std::fs;
use std::path::{Path, PathBuf};

/// Columns of a real myZeo export, in export order.
pub const ZEO_COLUMNS: &[&str] = &[
    "Sleep Date",
    "ZQ",
    "Total Z",
    "Time to Z",
    "Time in Wake",
    "Time in REM",
    "Time in Light",
    "Time in Deep",
    "Awakenings",
    "Start of Night",
    "End of Night",
    "Rise Time",
    "Alarm Reason",
    "Snooze Time",
    "Wake Tone",
    "Wake Window",
    "Alarm Type",
    "First Alarm Ring",
    "Last Alarm Ring",
    "First Snooze Time",
    "Last Snooze Time",
    "Set Alarm Time",
    "Morning Feel",
    "Sleep Graph",
    "Detailed Sleep Graph",
];

/// Builder for creating export files
pub struct ZeoCsvBuilder {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ZeoCsvBuilder {
    /// Builder using the full myZeo header
    pub fn new() -> Self {
        Self::with_columns(ZEO_COLUMNS)
    }

    /// Builder with a custom header row
    pub fn with_columns(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a raw row; values are written as given
    pub fn row(mut self, values: &[&str]) -> Self {
        self.rows.push(values.iter().map(|v| v.to_string()).collect());
        self
    }

    /// Add a night to a builder created with [`ZeoCsvBuilder::new`].
    ///
    /// Alarm and snooze columns are left empty; everything else gets a
    /// plausible value.
    pub fn night(self, start: &str, end: &str, graph: &str) -> Self {
        let sleep_date = start.split(' ').next().unwrap_or("");
        let values: Vec<&str> = ZEO_COLUMNS
            .iter()
            .map(|column| match *column {
                "Sleep Date" => sleep_date,
                "ZQ" => "84",
                "Total Z" => "432",
                "Time to Z" => "12",
                "Time in Wake" => "20",
                "Time in REM" => "110",
                "Time in Light" => "240",
                "Time in Deep" => "82",
                "Awakenings" => "3",
                "Start of Night" => start,
                "End of Night" => end,
                "Rise Time" => end,
                "Morning Feel" => "3",
                "Sleep Graph" => "0 3 3 4",
                "Detailed Sleep Graph" => graph,
                _ => "",
            })
            .collect();
        self.row(&values)
    }

    /// Render the export as CSV text
    pub fn build(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.columns.join(","));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&row.join(","));
            out.push('\n');
        }
        out
    }

    /// Write the export to `dir/name` and return its path
    pub fn write_to(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, self.build()).unwrap();
        path
    }
}

impl Default for ZeoCsvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_writes_header_and_rows() {
        let csv = ZeoCsvBuilder::with_columns(&["A", "B"]).row(&["1", "2"]).build();
        assert_eq!(csv, "A,B\n1,2\n");
    }

    #[test]
    fn test_night_fills_every_column() {
        let csv = ZeoCsvBuilder::new()
            .night("01/02/2020 23:00", "01/03/2020 06:50", "1 2")
            .build();
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row.split(',').count(), ZEO_COLUMNS.len());
        assert!(row.starts_with("01/02/2020,84,"));
        assert!(row.ends_with(",1 2"));
    }
}
