//! Table Model
//! Immutable, date-ordered rows of daily price records.

use chrono::NaiveDate;

use super::filter::DateBounds;

/// Name of the column holding the trading day.
pub const DATE_COLUMN: &str = "Date";

/// Cell texts read as "no value", like an empty cell.
pub const MISSING_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A single value as read from the file.
///
/// The raw text is kept for export; `value` is the numeric reading of it and
/// is `None` when the text is not a plain number (e.g. `"$418.16"`).
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub raw: String,
    pub value: Option<f64>,
}

impl Cell {
    /// Parse a raw cell. With `strip_currency` a leading `$` is ignored.
    pub fn parse(raw: &str, strip_currency: bool) -> Self {
        let raw = raw.trim();
        let numeric = if strip_currency {
            raw.strip_prefix('$').unwrap_or(raw).trim_start()
        } else {
            raw
        };

        Self {
            raw: raw.to_string(),
            value: numeric.parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }

    /// Empty, or one of the [`MISSING_MARKERS`]. Blank cells never make a
    /// column non-numeric.
    pub fn is_blank(&self) -> bool {
        self.raw.is_empty() || MISSING_MARKERS.contains(&self.raw.as_str())
    }
}

/// One trading day.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub date: NaiveDate,
    /// Cells in the order of [`Table::columns`].
    pub cells: Vec<Cell>,
}

/// Rows sorted ascending by date, plus the column layout of the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    date_position: usize,
    rows: Vec<Row>,
}

impl Table {
    /// Build a table with the date column first. Rows are sorted by date;
    /// callers supply unique dates.
    #[cfg(test)]
    pub(crate) fn from_rows(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self::with_layout(columns, 0, rows)
    }

    /// Build a table whose date column sits at `date_position` in the header.
    pub(crate) fn with_layout(columns: Vec<String>, date_position: usize, mut rows: Vec<Row>) -> Self {
        rows.sort_by_key(|row| row.date);
        debug_assert!(
            rows.windows(2).all(|w| w[0].date < w[1].date),
            "table dates must be unique"
        );
        Self {
            date_position: date_position.min(columns.len()),
            columns,
            rows,
        }
    }

    /// Non-date column names, in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Full header, including the date column at its original position.
    pub fn header(&self) -> Vec<String> {
        let mut header = self.columns.clone();
        header.insert(self.date_position, DATE_COLUMN.to_string());
        header
    }

    /// Raw text of one row laid out like [`Table::header`].
    pub fn record(&self, row: &Row) -> Vec<String> {
        let mut record: Vec<String> = row.cells.iter().map(|c| c.raw.clone()).collect();
        record.insert(
            self.date_position,
            row.date.format(super::DATE_FORMAT).to_string(),
        );
        record
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    pub fn last(&self) -> Option<&Row> {
        self.rows.last()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Numeric values of a column, `None` where a cell did not parse.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = Option<f64>> + '_ {
        self.rows
            .iter()
            .map(move |row| row.cells.get(index).and_then(|c| c.value))
    }

    /// A column is numeric when every non-blank cell parsed as a number.
    pub fn is_numeric_column(&self, index: usize) -> bool {
        self.rows.iter().all(|row| {
            row.cells
                .get(index)
                .map_or(true, |c| c.is_blank() || c.value.is_some())
        })
    }

    /// Earliest and latest date, `None` for an empty table.
    pub fn bounds(&self) -> Option<DateBounds> {
        Some(DateBounds {
            min: self.first()?.date,
            max: self.last()?.date,
        })
    }

    /// Copy of the rows whose date lies in `[start, end]`.
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> Table {
        let lo = self.rows.partition_point(|row| row.date < start);
        let hi = self.rows.partition_point(|row| row.date <= end);
        let rows = if lo < hi {
            self.rows[lo..hi].to_vec()
        } else {
            Vec::new()
        };

        Table {
            columns: self.columns.clone(),
            date_position: self.date_position,
            rows,
        }
    }
}
