//! Static Chart Renderer
//! Renders the same line chart the window shows into a PNG file.
//!
//! Layout:
//! 1. Title centered on top
//! 2. Line per series with point markers, x-axis labels from the chart data
//! 3. Legend in the upper-right corner

use crate::charts::ChartData;
use plotters::prelude::*;
use std::path::Path;

// Same order as the interactive palette
const SERIES_COLORS: [RGBColor; 5] = [
    RGBColor(52, 152, 219),
    RGBColor(231, 76, 60),
    RGBColor(46, 204, 113),
    RGBColor(155, 89, 182),
    RGBColor(243, 156, 18),
];

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Write `chart` as a PNG of `width` x `height` pixels.
    pub fn save_png(
        chart: &ChartData,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        let (x_min, x_max) = chart.x_range();
        let (y_min, y_max) = chart.y_range();

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, ("sans-serif", 24))
            .margin(15)
            .x_label_area_size(70)
            .y_label_area_size(90)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        let format_x = |x: &f64| chart.format_x(*x);
        ctx.configure_mesh()
            .x_desc("Date")
            .y_desc("Values")
            .x_labels(8)
            .x_label_formatter(&format_x)
            .x_label_style(
                ("sans-serif", 12)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .draw()?;

        for (i, series) in chart.series.iter().enumerate() {
            let color = SERIES_COLORS[i % SERIES_COLORS.len()];
            let points: Vec<(f64, f64)> = series.points.iter().map(|p| (p[0], p[1])).collect();

            ctx.draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?
                .label(series.name.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));

            ctx.draw_series(points.iter().map(|&p| Circle::new(p, 3, color.filled())))?;
        }

        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        log::info!("chart saved to {}", path.display());
        Ok(())
    }
}
