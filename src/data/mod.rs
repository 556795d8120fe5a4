//! Data module - CSV loading, table model and date-range filtering

mod filter;
mod loader;
pub(crate) mod table;

pub use filter::{parse_date, Bound, DateBounds, DateRange, SelectionError, DATE_FORMAT};
pub use loader::{DataLoader, LoaderError};
pub use table::{Cell, Row, Table, DATE_COLUMN, MISSING_MARKERS};
