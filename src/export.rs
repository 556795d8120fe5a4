//! CSV Exporter
//! Writes a table back to disk with the same column layout it was read with.

use crate::data::Table;
use polars::prelude::*;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Csv(#[from] PolarsError),
}

/// Writes CSV files into a fixed output directory.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    directory: PathBuf,
}

impl CsvExporter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Write `table` to `file_name`, overwriting any existing file.
    pub fn write(&self, table: &Table, file_name: &str) -> Result<PathBuf, ExportError> {
        let header = table.header();
        let records: Vec<Vec<String>> = table.rows().iter().map(|r| table.record(r)).collect();

        let columns: Vec<Column> = header
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let values: Vec<String> = records.iter().map(|r| r[i].clone()).collect();
                Column::new(name.as_str().into(), values)
            })
            .collect();
        let mut df = DataFrame::new(columns)?;

        let path = self.directory.join(file_name);
        let mut file = File::create(&path)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)?;

        log::info!("wrote {} rows to {}", table.len(), path.display());
        Ok(path)
    }

    /// Write and report the outcome on `out`. Failures are printed, never returned.
    pub fn save<W: Write>(&self, table: &Table, file_name: &str, out: &mut W) -> bool {
        let (saved, message) = match self.write(table, file_name) {
            Ok(_) => (true, format!("Data has been saved to {}", file_name)),
            Err(e) => {
                log::warn!("export of {} failed: {}", file_name, e);
                (false, format!("Failed to save data to {}: {}", file_name, e))
            }
        };

        if let Err(e) = writeln!(out, "{}", message) {
            log::warn!("could not report export result: {}", e);
        }
        saved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::tests::{date, price_table, row};
    use crate::data::DataLoader;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "stock_range_report_export_{}_{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_export_then_reload_keeps_content() {
        let table = price_table(vec![
            row(date(10, 2, 2023), &["$321.80", "20570000", "$316.28", "$321.89", "$315.00"]),
            row(date(10, 3, 2023), &["$313.39", "21033500", "$316.28", "$316.55", "$311.48"]),
            row(date(10, 4, 2023), &["$318.96", "", "$314.03", "$320.04", "$314.00"]),
        ]);

        let exporter = CsvExporter::new(scratch_dir("roundtrip"));
        let path = exporter.write(&table, "range_data.csv").unwrap();

        let reloaded = DataLoader::new().load_csv(&path).unwrap();
        assert_eq!(reloaded.len(), table.len());
        assert_eq!(reloaded.header(), table.header());
        assert_eq!(reloaded.rows(), table.rows());
    }

    #[test]
    fn test_export_overwrites() {
        let exporter = CsvExporter::new(scratch_dir("overwrite"));
        let big = price_table(
            (2..=6)
                .map(|d| row(date(10, d, 2023), &["1", "1", "1", "1", "1"]))
                .collect(),
        );
        let small = big.between(date(10, 2, 2023), date(10, 2, 2023));

        exporter.write(&big, "all_data.csv").unwrap();
        let path = exporter.write(&small, "all_data.csv").unwrap();

        let reloaded = DataLoader::new().load_csv(&path).unwrap();
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn test_failed_export_is_reported_not_raised() {
        let exporter = CsvExporter::new("/this/directory/does/not/exist");
        let table = price_table(vec![row(date(10, 2, 2023), &["1", "1", "1", "1", "1"])]);

        let mut out = Vec::new();
        assert!(!exporter.save(&table, "all_data.csv", &mut out));

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with("Failed to save data to all_data.csv:"));
    }
}
