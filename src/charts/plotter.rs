//! Chart Plotter Module
//! Draws the interactive line chart with egui_plot.

use crate::charts::ChartData;
use egui::Color32;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

/// One color per chart column, in `CHART_COLUMNS` order.
pub const PALETTE: [Color32; 5] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(243, 156, 18),  // Orange
];

/// Creates line charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn series_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Draw every series as a line with point markers.
    /// X-axis: date (or summary label), Y-axis: value
    pub fn draw_line_chart(ui: &mut egui::Ui, chart: &ChartData) {
        let labels = chart.clone();
        let (x_min, x_max) = chart.x_range();
        let (y_min, y_max) = chart.y_range();

        Plot::new(format!("line_{}", chart.title))
            .legend(Legend::default())
            .x_axis_label("Date")
            .y_axis_label("Values")
            .include_x(x_min)
            .include_x(x_max)
            .include_y(y_min)
            .include_y(y_max)
            .x_axis_formatter(move |mark, _range| labels.format_x(mark.value))
            .label_formatter(|name, value| {
                if name.is_empty() {
                    String::new()
                } else {
                    format!("{}: {:.2}", name, value.y)
                }
            })
            .show(ui, |plot_ui| {
                for (i, series) in chart.series.iter().enumerate() {
                    let color = Self::series_color(i);

                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(series.points.iter().copied()))
                            .color(color)
                            .width(1.5)
                            .name(&series.name),
                    );

                    // Markers keep single-point series visible
                    plot_ui.points(
                        Points::new(PlotPoints::from_iter(series.points.iter().copied()))
                            .radius(2.5)
                            .color(color)
                            .name(&series.name),
                    );
                }
            });
    }
}
