use approx::assert_relative_eq;
use chrono::NaiveDate;

use stock_range_report::data::{DataLoader, DateRange, SelectionError, DATE_FORMAT};
use stock_range_report::export::CsvExporter;
use stock_range_report::stats::{Operation, Report, ReportEngine};

#[test]
fn test_plain_prices_average_and_difference() {
    // File rows are out of order on purpose
    let table = DataLoader::new()
        .load_csv("tests/data/plain_prices.csv")
        .expect("Failed to load test data");

    let dates: Vec<NaiveDate> = table.rows().iter().map(|r| r.date).collect();
    assert!(dates.windows(2).all(|w| w[0] < w[1]));

    let avg = ReportEngine::column_average(&table).unwrap();
    assert_eq!(avg.label, "Average");
    assert_relative_eq!(avg.get("Close/Last").unwrap(), 20.0);
    assert_relative_eq!(avg.get("Volume").unwrap(), 200.0);
    assert_relative_eq!(avg.get("Low").unwrap(), 18.0);

    let diff = ReportEngine::endpoint_difference(&table).unwrap();
    assert_eq!(diff.label, "Difference");
    assert_relative_eq!(diff.get("Close/Last").unwrap(), 20.0);
    assert_relative_eq!(diff.get("Volume").unwrap(), 200.0);
}

#[test]
fn test_missing_marker_keeps_column_in_average() {
    let table = DataLoader::new()
        .load_csv("tests/data/gappy_prices.csv")
        .expect("Failed to load test data");

    let avg = ReportEngine::column_average(&table).unwrap();
    assert_eq!(avg.columns.len(), 5);
    assert_relative_eq!(avg.get("Volume").unwrap(), 200.0);
    assert_relative_eq!(avg.get("Close/Last").unwrap(), 20.0);

    let diff = ReportEngine::endpoint_difference(&table).unwrap();
    assert_relative_eq!(diff.get("Volume").unwrap(), 200.0);
}

#[test]
fn test_single_day_range_difference_is_zero() {
    let table = DataLoader::new()
        .load_csv("tests/data/plain_prices.csv")
        .unwrap();
    let bounds = table.bounds().unwrap();

    let range = DateRange::parse("01/03/2024", "01/03/2024", &bounds).unwrap();
    let one_day = range.apply(&table).unwrap();
    assert_eq!(one_day.len(), 1);

    match ReportEngine::run(Operation::Difference, &one_day).unwrap() {
        Report::Summary(diff) => assert!(diff.values.iter().all(|v| *v == Some(0.0))),
        other => panic!("expected summary, got {:?}", other),
    }
}

#[test]
fn test_currency_columns_are_left_out_of_average() {
    let table = DataLoader::new()
        .load_csv("tests/data/sample_prices.csv")
        .unwrap();

    let avg = ReportEngine::column_average(&table).unwrap();
    assert_eq!(avg.columns, vec!["Volume".to_string()]);

    let stripped = DataLoader::new()
        .with_strip_currency(true)
        .load_csv("tests/data/sample_prices.csv")
        .unwrap();
    let avg = ReportEngine::column_average(&stripped).unwrap();
    assert_eq!(avg.columns.len(), 5);
    assert_relative_eq!(avg.get("Close/Last").unwrap(), 3250.29 / 10.0, max_relative = 1e-9);
}

#[test]
fn test_range_filter_matches_interval_rows() {
    let table = DataLoader::new()
        .load_csv("tests/data/sample_prices.csv")
        .unwrap();
    let bounds = table.bounds().unwrap();

    let range = DateRange::parse("10/04/2023", "10/10/2023", &bounds).unwrap();
    let filtered = range.apply(&table).unwrap();
    assert_eq!(filtered.len(), 5);
    assert!(filtered
        .rows()
        .iter()
        .all(|r| range.start() <= r.date && r.date <= range.end()));

    let err = DateRange::parse("10/10/2023", "10/01/2023", &bounds).unwrap_err();
    assert!(matches!(err, SelectionError::OutOfRange { .. }));
    let err = DateRange::parse("10/10/2023", "10/02/2023", &bounds).unwrap_err();
    assert!(matches!(err, SelectionError::Order { .. }));
}

#[test]
fn test_export_and_reload_round_trip() {
    let table = DataLoader::new()
        .load_csv("tests/data/sample_prices.csv")
        .unwrap();
    let dir = std::env::temp_dir().join(format!("stock_range_report_roundtrip_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let listing = ReportEngine::listing(&table);
    let path = CsvExporter::new(dir).write(&listing, "all_data.csv").unwrap();
    let reloaded = DataLoader::new().load_csv(&path).unwrap();

    assert_eq!(reloaded.len(), table.len());
    assert_eq!(reloaded.header(), table.header());
    for (a, b) in reloaded.rows().iter().zip(table.rows()) {
        assert_eq!(a.date.format(DATE_FORMAT).to_string(), b.date.format(DATE_FORMAT).to_string());
        assert_eq!(a.cells, b.cells);
    }
}
