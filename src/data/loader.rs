//! CSV Data Loader Module
//! Reads the price file with Polars and builds a date-ordered [`Table`].

use super::filter::parse_date;
use super::table::{Cell, Row, Table, DATE_COLUMN};
use polars::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("{} not found.", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing '{0}' column")]
    MissingColumn(String),
    #[error("Row {row}: invalid date '{value}', expected MM/DD/YYYY")]
    InvalidDate { row: usize, value: String },
    #[error("Duplicate date {0}")]
    DuplicateDate(String),
    #[error("No data loaded")]
    NoData,
}

/// Loads a single price file into memory.
#[derive(Debug, Default, Clone)]
pub struct DataLoader {
    strip_currency: bool,
}

impl DataLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat `"$418.16"` as `418.16` instead of a missing value.
    pub fn with_strip_currency(mut self, strip_currency: bool) -> Self {
        self.strip_currency = strip_currency;
        self
    }

    /// Load a CSV file. Every column is read as text; numbers are parsed
    /// per cell so one noisy value never rejects the row.
    pub fn load_csv(&self, file_path: impl AsRef<Path>) -> Result<Table, LoaderError> {
        let file_path = file_path.as_ref();
        if !file_path.exists() {
            return Err(LoaderError::NotFound(file_path.to_path_buf()));
        }

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(file_path.to_path_buf()))?
            .finish()?;

        log::debug!(
            "read {} rows x {} columns from {}",
            df.height(),
            df.width(),
            file_path.display()
        );

        let table = self.build_table(&df)?;
        log::info!("loaded {} rows from {}", table.len(), file_path.display());
        Ok(table)
    }

    fn build_table(&self, df: &DataFrame) -> Result<Table, LoaderError> {
        let header: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.trim().to_string())
            .collect();
        let date_position = header
            .iter()
            .position(|h| h == DATE_COLUMN)
            .ok_or_else(|| LoaderError::MissingColumn(DATE_COLUMN.to_string()))?;

        let mut text_columns: Vec<Vec<String>> = Vec::with_capacity(header.len());
        for column in df.get_columns() {
            let values = column
                .str()?
                .into_iter()
                .map(|v| v.unwrap_or_default().to_string())
                .collect();
            text_columns.push(values);
        }

        let mut seen = HashSet::new();
        let mut rows = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let raw_date = text_columns[date_position][i].trim();
            let date = parse_date(raw_date).ok_or_else(|| LoaderError::InvalidDate {
                row: i + 1,
                value: raw_date.to_string(),
            })?;
            if !seen.insert(date) {
                return Err(LoaderError::DuplicateDate(raw_date.to_string()));
            }

            let cells = text_columns
                .iter()
                .enumerate()
                .filter(|(c, _)| *c != date_position)
                .map(|(_, values)| Cell::parse(&values[i], self.strip_currency))
                .collect();
            rows.push(Row { date, cells });
        }

        if rows.is_empty() {
            return Err(LoaderError::NoData);
        }

        let columns = header
            .into_iter()
            .enumerate()
            .filter(|(c, _)| *c != date_position)
            .map(|(_, name)| name)
            .collect();

        Ok(Table::with_layout(columns, date_position, rows))
    }
}
