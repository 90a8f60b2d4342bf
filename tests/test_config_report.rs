//! Settings resolution and the JSON part of report export.

mod common;

use common::{load_rows, mixed_rows, write_file};
use fuel_dash::report::{ReportExporter, REPORT_FILE};
use fuel_dash::{compute_dashboard, AppConfig, ComparisonTarget, FuelType, Selection};
use std::collections::BTreeSet;

#[test]
fn config_file_overrides_default_selection() {
    let (table, dir) = load_rows(&mixed_rows());
    let path = write_file(
        dir.path(),
        "settings.json",
        r#"{"years": [2023], "fuels": ["oleo_diesel"], "comparison": {"year": 2023, "month": 1}}"#,
    );
    let config = AppConfig::from_file(&path).unwrap();
    let selection = config.selection_for(&table);

    assert_eq!(selection.years, BTreeSet::from([2023]));
    assert_eq!(selection.fuels, vec![FuelType::Diesel]);
    assert_eq!(
        selection.comparison,
        Some(ComparisonTarget { year: 2023, month: 1 })
    );
}

#[test]
fn absent_settings_select_every_year() {
    let (table, _dir) = load_rows(&mixed_rows());
    let selection = AppConfig::default().selection_for(&table);
    assert_eq!(selection, Selection::for_table(&table));
    assert_eq!(selection.years, BTreeSet::from([2022, 2023, 2024]));
}

#[test]
fn unreadable_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(AppConfig::from_file(&dir.path().join("missing.json")).is_err());
    let bad = write_file(dir.path(), "bad.json", "{ not json");
    assert!(AppConfig::from_file(&bad).is_err());
}

#[test]
fn report_json_contains_every_section() {
    let (table, dir) = load_rows(&mixed_rows());
    let view = compute_dashboard(&table, &Selection::for_table(&table));

    let out = dir.path().join("report");
    let path = ReportExporter::write_json(&view, &out).unwrap();
    assert_eq!(path, out.join(REPORT_FILE));

    let text = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(json["overview"]["record_count"], 6);
    assert_eq!(json["series"][0]["fuel"], "gasolina_comum");
    assert_eq!(json["series"][0]["points"][0]["timestamp"], "2022-01-01");
    assert_eq!(json["comparison"]["status"], "available");
    assert_eq!(json["comparison"]["matched_rows"], 1);
    assert_eq!(json["stats"].as_array().unwrap().len(), FuelType::COUNT);
    // Undefined statistics serialize as null
    assert!(json["stats"][6]["mean"].is_null());
    assert_eq!(json["correlation"]["values"][0][0], 1.0);
    assert_eq!(
        json["sample"][0]["quotes"]["gasolina_comum"]["avg"],
        6.1
    );
}
