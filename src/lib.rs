//! Stock Range Report - interactive date-range reports over daily stock prices
//!
//! Loads one CSV of daily prices, lets the user pick the entire dataset or a
//! date range, and lists, differences or averages the selected rows, with an
//! optional line chart.

pub mod charts;
pub mod cli;
pub mod config;
pub mod data;
pub mod export;
pub mod gui;
pub mod stats;
