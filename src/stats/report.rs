//! Report Engine
//! Listing, endpoint difference and column average over a selected table.

use crate::data::{Table, DATE_COLUMN};
use statrs::statistics::Statistics;
use std::fmt;
use thiserror::Error;

pub const DIFFERENCE_LABEL: &str = "Difference";
pub const AVERAGE_LABEL: &str = "Average";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("Cannot summarize an empty table")]
    EmptyTable,
}

/// Menu choice on the operation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// 1. Show all data in selected date range
    Listing,
    /// 2. Start to end date market difference
    Difference,
    /// 3. Average start to end date market
    Average,
}

impl Operation {
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Operation::Listing),
            "2" => Some(Operation::Difference),
            "3" => Some(Operation::Average),
            _ => None,
        }
    }
}

/// A single derived row whose date is replaced by a label.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub label: String,
    pub columns: Vec<String>,
    pub values: Vec<Option<f64>>,
}

impl SummaryRow {
    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.values.get(i).copied().flatten())
    }
}

fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) => {
            let text = format!("{:.4}", v);
            text.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        None => "NaN".to_string(),
    }
}

impl fmt::Display for SummaryRow {
    /// Two aligned lines, header then values, like a one-row frame.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut header = vec![DATE_COLUMN.to_string()];
        header.extend(self.columns.iter().cloned());
        let mut cells = vec![self.label.clone()];
        cells.extend(self.values.iter().map(|v| format_value(*v)));

        let widths: Vec<usize> = header
            .iter()
            .zip(&cells)
            .map(|(h, c)| h.len().max(c.len()))
            .collect();

        let line = |items: &[String]| {
            items
                .iter()
                .zip(&widths)
                .map(|(item, w)| format!("{:>w$}", item, w = *w))
                .collect::<Vec<_>>()
                .join("  ")
        };

        writeln!(f, "{}", line(&header))?;
        write!(f, "{}", line(&cells))
    }
}

/// Result of one operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Listing(Table),
    Summary(SummaryRow),
}

/// Pure report operations; inputs are never modified.
pub struct ReportEngine;

impl ReportEngine {
    pub fn run(operation: Operation, table: &Table) -> Result<Report, ReportError> {
        match operation {
            Operation::Listing => Ok(Report::Listing(Self::listing(table))),
            Operation::Difference => Self::endpoint_difference(table).map(Report::Summary),
            Operation::Average => Self::column_average(table).map(Report::Summary),
        }
    }

    pub fn listing(table: &Table) -> Table {
        table.clone()
    }

    /// Last row minus first row for every non-date column. A cell that is
    /// not a number on either side gives a missing result.
    pub fn endpoint_difference(table: &Table) -> Result<SummaryRow, ReportError> {
        let (first, last) = match (table.first(), table.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(ReportError::EmptyTable),
        };

        let values = first
            .cells
            .iter()
            .zip(&last.cells)
            .map(|(start, end)| Some(end.value? - start.value?))
            .collect();

        Ok(SummaryRow {
            label: DIFFERENCE_LABEL.to_string(),
            columns: table.columns().to_vec(),
            values,
        })
    }

    /// Mean of every numeric column, skipping missing cells. Columns with
    /// any non-numeric text are left out of the result.
    pub fn column_average(table: &Table) -> Result<SummaryRow, ReportError> {
        if table.is_empty() {
            return Err(ReportError::EmptyTable);
        }

        let mut columns = Vec::new();
        let mut values = Vec::new();
        for (i, name) in table.columns().iter().enumerate() {
            if !table.is_numeric_column(i) {
                log::debug!("column '{}' is not numeric, excluded from average", name);
                continue;
            }

            let present: Vec<f64> = table.column_values(i).flatten().collect();
            let mean = if present.is_empty() {
                None
            } else {
                Some(present.iter().mean())
            };

            columns.push(name.clone());
            values.push(mean);
        }

        Ok(SummaryRow {
            label: AVERAGE_LABEL.to_string(),
            columns,
            values,
        })
    }
}
