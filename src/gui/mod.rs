//! GUI module - Chart window

mod chart_window;

pub use chart_window::{ChartWindow, WindowDisplay};
