//! Date Range Filter
//! Validates user-entered dates against the dataset and selects the rows between them.

use super::table::Table;
use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

/// Input and display format for every date the user sees.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Parse a `MM/DD/YYYY` date, surrounding whitespace ignored.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}

/// Which end of a range failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Start => write!(f, "Start date"),
            Bound::End => write!(f, "End date"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Invalid date format. Use MM/DD/YYYY.")]
    Format { input: String },
    #[error(
        "{bound} must be between {} and {}.",
        .min.format(DATE_FORMAT),
        .max.format(DATE_FORMAT)
    )]
    OutOfRange {
        bound: Bound,
        min: NaiveDate,
        max: NaiveDate,
    },
    #[error("The start date cannot be after the end date.")]
    Order { start: NaiveDate, end: NaiveDate },
    #[error("No data found in the specified date range.")]
    EmptyResult { start: NaiveDate, end: NaiveDate },
}

/// Earliest and latest date present in a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateBounds {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl DateBounds {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min <= date && date <= self.max
    }

    fn check(&self, bound: Bound, date: NaiveDate) -> Result<(), SelectionError> {
        if self.contains(date) {
            Ok(())
        } else {
            Err(SelectionError::OutOfRange {
                bound,
                min: self.min,
                max: self.max,
            })
        }
    }
}

impl fmt::Display for DateBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.min.format(DATE_FORMAT),
            self.max.format(DATE_FORMAT)
        )
    }
}

/// A validated closed interval `[start, end]` inside the dataset bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Validate two user-entered dates: format, then bounds (start first),
    /// then ordering.
    pub fn parse(start: &str, end: &str, bounds: &DateBounds) -> Result<Self, SelectionError> {
        let parse = |input: &str| {
            parse_date(input).ok_or_else(|| SelectionError::Format {
                input: input.trim().to_string(),
            })
        };
        let start = parse(start)?;
        let end = parse(end)?;

        bounds.check(Bound::Start, start)?;
        bounds.check(Bound::End, end)?;

        if start > end {
            return Err(SelectionError::Order { start, end });
        }

        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Rows of `table` inside the range. Never empty on success.
    pub fn apply(&self, table: &Table) -> Result<Table, SelectionError> {
        let filtered = table.between(self.start, self.end);
        if filtered.is_empty() {
            log::debug!("no rows between {} and {}", self.start, self.end);
            return Err(SelectionError::EmptyResult {
                start: self.start,
                end: self.end,
            });
        }

        log::debug!(
            "selected {} of {} rows between {} and {}",
            filtered.len(),
            table.len(),
            self.start,
            self.end
        );
        Ok(filtered)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::tests::{date, price_table, row};

    fn weekdays() -> Table {
        // 10/02/2023 - 10/13/2023, no weekend rows
        let days = [2, 3, 4, 5, 6, 9, 10, 11, 12, 13];
        price_table(
            days.iter()
                .map(|&d| row(date(10, d, 2023), &["1", "1", "1", "1", "1"]))
                .collect(),
        )
    }

    #[test]
    fn test_malformed_date_is_format_error() {
        let bounds = weekdays().bounds().unwrap();
        let err = DateRange::parse("13/40/2023", "10/05/2023", &bounds).unwrap_err();
        assert!(matches!(err, SelectionError::Format { .. }));

        let err = DateRange::parse("10/05/2023", "yesterday", &bounds).unwrap_err();
        assert_eq!(
            err,
            SelectionError::Format {
                input: "yesterday".into()
            }
        );
    }

    #[test]
    fn test_out_of_bounds_names_the_bound() {
        let bounds = weekdays().bounds().unwrap();

        let err = DateRange::parse("09/29/2023", "10/05/2023", &bounds).unwrap_err();
        assert!(matches!(
            err,
            SelectionError::OutOfRange {
                bound: Bound::Start,
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "Start date must be between 10/02/2023 and 10/13/2023."
        );

        let err = DateRange::parse("10/05/2023", "10/14/2023", &bounds).unwrap_err();
        assert!(matches!(
            err,
            SelectionError::OutOfRange {
                bound: Bound::End,
                ..
            }
        ));
    }

    #[test]
    fn test_start_after_end_is_order_error() {
        let bounds = weekdays().bounds().unwrap();
        let err = DateRange::parse("10/10/2023", "10/03/2023", &bounds).unwrap_err();
        assert!(matches!(err, SelectionError::Order { .. }));
    }

    #[test]
    fn test_bounds_checked_before_filtering() {
        // Both dates precede the dataset: rejected by bounds, not by an empty filter.
        let bounds = weekdays().bounds().unwrap();
        let err = DateRange::parse("09/01/2023", "09/05/2023", &bounds).unwrap_err();
        assert!(matches!(err, SelectionError::OutOfRange { .. }));
    }

    #[test]
    fn test_weekend_range_is_empty_result() {
        let table = weekdays();
        let range = DateRange::parse("10/07/2023", "10/08/2023", &table.bounds().unwrap()).unwrap();
        assert!(matches!(
            range.apply(&table),
            Err(SelectionError::EmptyResult { .. })
        ));
    }

    #[test]
    fn test_every_valid_pair_matches_interval_count() {
        let table = weekdays();
        let bounds = table.bounds().unwrap();
        let dates: Vec<NaiveDate> = bounds.min.iter_days().take_while(|d| *d <= bounds.max).collect();

        for (i, start) in dates.iter().enumerate() {
            for end in &dates[i..] {
                let range = DateRange::parse(
                    &start.format(DATE_FORMAT).to_string(),
                    &end.format(DATE_FORMAT).to_string(),
                    &bounds,
                )
                .unwrap();
                let expected = table
                    .rows()
                    .iter()
                    .filter(|r| *start <= r.date && r.date <= *end)
                    .count();

                match range.apply(&table) {
                    Ok(filtered) => {
                        assert_eq!(filtered.len(), expected);
                        assert!(filtered.rows().iter().all(|r| *start <= r.date && r.date <= *end));
                    }
                    Err(SelectionError::EmptyResult { .. }) => assert_eq!(expected, 0),
                    Err(other) => panic!("unexpected error {other}"),
                }
            }
        }
    }
}
