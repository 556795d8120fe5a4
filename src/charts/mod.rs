//! Charts module - Chart data and rendering

mod plotter;
mod renderer;
mod series;

pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;
pub use series::{ChartData, ChartSeries, XAxis, CHART_COLUMNS};

/// Something that can show a chart to the user and block until they are done.
pub trait ChartDisplay {
    fn show(&mut self, chart: &ChartData) -> anyhow::Result<()>;
}

impl<T: ChartDisplay + ?Sized> ChartDisplay for &mut T {
    fn show(&mut self, chart: &ChartData) -> anyhow::Result<()> {
        (**self).show(chart)
    }
}
