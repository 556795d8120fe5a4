//! Chart Window
//! Native window showing one line chart; blocks the caller until closed.

use crate::charts::{ChartData, ChartDisplay, ChartPlotter, StaticChartRenderer};
use crate::config::ChartConfig;
use egui::RichText;
use std::path::Path;

/// The eframe app behind one chart window.
pub struct ChartWindow {
    chart: ChartData,
    png_size: (u32, u32),
    status: Option<String>,
}

impl ChartWindow {
    pub fn new(chart: ChartData, png_size: (u32, u32)) -> Self {
        Self {
            chart,
            png_size,
            status: None,
        }
    }

    /// Ask for a destination and write the chart as PNG.
    fn handle_save_png(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("chart.png")
            .save_file()
        else {
            return;
        };

        self.status = Some(match self.save_png(&path) {
            Ok(()) => format!("Saved {}", path.display()),
            Err(e) => {
                log::warn!("saving chart to {} failed: {}", path.display(), e);
                format!("Save failed: {}", e)
            }
        });
    }

    fn save_png(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let (width, height) = self.png_size;
        StaticChartRenderer::save_png(&self.chart, path, width, height)
    }
}

impl eframe::App for ChartWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("chart_toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(&self.chart.title).size(16.0).strong());
                ui.separator();
                if ui.button("Save PNG").clicked() {
                    self.handle_save_png();
                }
                if let Some(status) = &self.status {
                    ui.label(status);
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.chart.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("No numeric data to plot").size(20.0));
                });
                return;
            }
            ChartPlotter::draw_line_chart(ui, &self.chart);
        });
    }
}

/// Shows charts in a native window, one at a time.
#[derive(Debug, Clone)]
pub struct WindowDisplay {
    inner_size: [f32; 2],
    png_size: (u32, u32),
}

impl WindowDisplay {
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            inner_size: [config.width, config.height],
            png_size: (config.png_width, config.png_height),
        }
    }
}

impl ChartDisplay for WindowDisplay {
    fn show(&mut self, chart: &ChartData) -> anyhow::Result<()> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size(self.inner_size)
                .with_min_inner_size([400.0, 300.0])
                .with_title(&chart.title),
            ..Default::default()
        };

        log::debug!("opening chart window with {} series", chart.series.len());
        let app = ChartWindow::new(chart.clone(), self.png_size);
        eframe::run_native(
            &chart.title,
            options,
            Box::new(move |_cc| Ok(Box::new(app))),
        )
        .map_err(|e| anyhow::anyhow!("chart window failed: {}", e))
    }
}
