//! Configuration
//!
//! Loaded from an optional JSON file; every field has a default.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Files searched, in order, for a configuration.
pub const CONFIG_PATHS: [&str; 2] = ["stock_report.json", "config/stock_report.json"];

/// Input data settings
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// CSV file read at startup
    #[serde(default = "default_input_path")]
    pub input_path: PathBuf,
    /// Read `"$418.16"` as 418.16 instead of a missing value
    #[serde(default)]
    pub strip_currency: bool,
}

/// Export settings
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,
    #[serde(default = "default_all_data_file")]
    pub all_data_file: String,
    #[serde(default = "default_range_data_file")]
    pub range_data_file: String,
}

/// Chart window settings
#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_chart_title")]
    pub title: String,
    #[serde(default = "default_window_width")]
    pub width: f32,
    #[serde(default = "default_window_height")]
    pub height: f32,
    /// Size of PNGs written by the window's save button
    #[serde(default = "default_png_width")]
    pub png_width: u32,
    #[serde(default = "default_png_height")]
    pub png_height: u32,
}

/// Console session settings
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// First line of the scope prompt
    #[serde(default = "default_banner")]
    pub banner: String,
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

fn default_input_path() -> PathBuf { PathBuf::from("MSHistoricalData.csv") }
fn default_output_dir() -> PathBuf { PathBuf::from(".") }
fn default_all_data_file() -> String { "all_data.csv".to_string() }
fn default_range_data_file() -> String { "range_data.csv".to_string() }
fn default_chart_title() -> String { "Microsoft Previous Year Stock Market Data".to_string() }
fn default_window_width() -> f32 { 1000.0 }
fn default_window_height() -> f32 { 600.0 }
fn default_png_width() -> u32 { 1500 }
fn default_png_height() -> u32 { 900 }
fn default_banner() -> String { "MS Last Year Stock Market Data".to_string() }

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            strip_currency: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            all_data_file: default_all_data_file(),
            range_data_file: default_range_data_file(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: default_chart_title(),
            width: default_window_width(),
            height: default_window_height(),
            png_width: default_png_width(),
            png_height: default_png_height(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            banner: default_banner(),
        }
    }
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// First readable file from [`CONFIG_PATHS`], else defaults.
    pub fn load() -> Self {
        for path in CONFIG_PATHS {
            if Path::new(path).exists() {
                match Self::from_file(path) {
                    Ok(config) => {
                        log::info!("loaded configuration from {}", path);
                        return config;
                    }
                    Err(e) => {
                        log::warn!("failed to load configuration {}: {}", path, e);
                    }
                }
            }
        }

        log::info!("using default configuration");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "data": { "strip_currency": true }, "output": { "directory": "out" } }"#)
                .unwrap();

        assert!(config.data.strip_currency);
        assert_eq!(config.data.input_path, PathBuf::from("MSHistoricalData.csv"));
        assert_eq!(config.output.directory, PathBuf::from("out"));
        assert_eq!(config.output.range_data_file, "range_data.csv");
        assert_eq!(config.session.banner, "MS Last Year Stock Market Data");
    }

    #[test]
    fn test_empty_object_is_default() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.output.all_data_file, "all_data.csv");
        assert_eq!(config.chart.png_width, 1500);
    }
}
