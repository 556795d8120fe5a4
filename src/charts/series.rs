//! Chart Data
//! Turns a table or a summary row into plottable line series.

use crate::data::{Table, DATE_FORMAT};
use crate::stats::SummaryRow;
use chrono::{Datelike, NaiveDate};

/// Columns drawn on a chart, in legend order.
pub const CHART_COLUMNS: [&str; 5] = ["Close/Last", "Volume", "Open", "High", "Low"];

/// How x values map back to axis labels.
#[derive(Debug, Clone, PartialEq)]
pub enum XAxis {
    /// x is days since the common era
    Dates,
    /// x is an index into the labels
    Labels(Vec<String>),
}

/// One line on the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub x_axis: XAxis,
    pub series: Vec<ChartSeries>,
}

fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

impl ChartData {
    /// One line per chart column present in the table; missing cells are skipped.
    pub fn from_table(title: &str, table: &Table) -> Self {
        let series = CHART_COLUMNS
            .iter()
            .filter_map(|name| {
                let index = table.column_index(name)?;
                let points = table
                    .rows()
                    .iter()
                    .zip(table.column_values(index))
                    .filter_map(|(row, value)| Some([date_to_x(row.date), value?]))
                    .collect();
                Some(ChartSeries {
                    name: name.to_string(),
                    points,
                })
            })
            .collect();

        Self {
            title: title.to_string(),
            x_axis: XAxis::Dates,
            series,
        }
    }

    /// A single point per chart column, placed at the row's label.
    pub fn from_summary(title: &str, summary: &SummaryRow) -> Self {
        let series = CHART_COLUMNS
            .iter()
            .filter(|name| summary.columns.iter().any(|c| c.as_str() == **name))
            .map(|name| ChartSeries {
                name: name.to_string(),
                points: summary.get(name).map(|v| vec![[0.0, v]]).unwrap_or_default(),
            })
            .collect();

        Self {
            title: title.to_string(),
            x_axis: XAxis::Labels(vec![summary.label.clone()]),
            series,
        }
    }

    /// Axis label for an x position.
    pub fn format_x(&self, x: f64) -> String {
        match &self.x_axis {
            XAxis::Dates => NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            XAxis::Labels(labels) => {
                if x < -0.5 || (x - x.round()).abs() > 1e-6 {
                    return String::new();
                }
                labels.get(x.round() as usize).cloned().unwrap_or_default()
            }
        }
    }

    fn points(&self) -> impl Iterator<Item = &[f64; 2]> {
        self.series.iter().flat_map(|s| s.points.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.points().next().is_none()
    }

    /// Padded x extent; never zero-width.
    pub fn x_range(&self) -> (f64, f64) {
        Self::padded(self.points().map(|p| p[0]), 0.05, 1.0)
    }

    /// Padded y extent; never zero-width.
    pub fn y_range(&self) -> (f64, f64) {
        Self::padded(self.points().map(|p| p[1]), 0.1, 1.0)
    }

    fn padded(values: impl Iterator<Item = f64>, fraction: f64, min_pad: f64) -> (f64, f64) {
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if min.is_infinite() {
            return (0.0, 1.0);
        }
        let pad = ((max - min) * fraction).max(min_pad);
        (min - pad, max + pad)
    }
}
