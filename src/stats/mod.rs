//! Stats module - report calculations over a selected table

mod report;

pub use report::{Operation, Report, ReportEngine, ReportError, SummaryRow, AVERAGE_LABEL, DIFFERENCE_LABEL};
