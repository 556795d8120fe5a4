//! Stock Range Report - CSV Price Data Reports & Chart Viewer
//!
//! Console front end: load the configured price file once, then run the
//! interactive session until the user quits.

use anyhow::Context;
use env_logger::Env;
use std::io;
use stock_range_report::cli::{Prompter, Session, SessionSettings};
use stock_range_report::config::AppConfig;
use stock_range_report::data::DataLoader;
use stock_range_report::export::CsvExporter;
use stock_range_report::gui::WindowDisplay;

fn main() -> anyhow::Result<()> {
    // Keep stderr quiet by default so log lines don't interleave with prompts
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let config = AppConfig::load();

    let table = DataLoader::new()
        .with_strip_currency(config.data.strip_currency)
        .load_csv(&config.data.input_path)
        .with_context(|| format!("loading {}", config.data.input_path.display()))?;
    if let Some(bounds) = table.bounds() {
        println!("Loaded {} rows ({})", table.len(), bounds);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(
        &table,
        Prompter::new(stdin.lock(), stdout.lock()),
        WindowDisplay::new(&config.chart),
        CsvExporter::new(config.output.directory.clone()),
        SessionSettings::from(&config),
    )?;
    session.run()?;

    Ok(())
}
