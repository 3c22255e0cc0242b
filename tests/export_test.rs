//! 結果出力の統合テスト

use no_show_validator::cli::ExportFormat;
use no_show_validator::common::{validate_tables, ColumnSelector, Table, ValidationOptions, ValidationReport};
use no_show_validator::config::Config;
use no_show_validator::export::{self, DEFAULT_OUTPUT_STEM, RESULT_COLUMN};
use no_show_validator::reader::load_table;
use tempfile::tempdir;

fn export_table() -> Table {
    Table::new(
        vec!["Id".into(), "Texto".into()],
        vec![
            vec!["1".into(), "Reagendado. Técnico. Motivo: chuva".into()],
            vec!["2".into(), "Reagendado. Técnico. Motivo: 0".into()],
            vec!["3".into(), "Cancelado. Cliente. Qualquer".into()],
        ],
    )
}

fn report(export: &Table) -> ValidationReport {
    let catalog = Table::single_column("Regra", &["Reagendado. Técnico. Motivo: 0"]);
    validate_tables(
        &catalog,
        &ColumnSelector::default(),
        export,
        &ColumnSelector::parse("#2"),
        &ValidationOptions::default(),
    )
    .unwrap()
}

#[test]
fn test_export_csv_roundtrip_through_reader() {
    let dir = tempdir().expect("Failed to create temp dir");
    let export = export_table();
    let report = report(&export);

    let path = export::export_results(
        &export,
        &report,
        &ExportFormat::Csv,
        &dir.path().join("saida.csv"),
        &Config::default(),
        true,
    )
    .unwrap();

    let table = load_table(&path, None).unwrap();
    let result_col = table.headers.iter().position(|h| h == RESULT_COLUMN).unwrap();
    let results: Vec<_> = table.column_values(result_col).map(Option::unwrap_or_default).collect();
    assert_eq!(results, vec!["Máscara correta", "No-show Técnico", "No-show Técnico"]);
    // 元の列はそのまま残る
    assert_eq!(table.cell(2, 0), Some("3"));
}

#[test]
fn test_export_excel_to_directory_uses_default_name() {
    let dir = tempdir().expect("Failed to create temp dir");
    let export = export_table();
    let report = report(&export);

    let path = export::export_results(
        &export,
        &report,
        &ExportFormat::Excel,
        dir.path(),
        &Config::default(),
        false,
    )
    .unwrap();

    assert_eq!(path, dir.path().join(format!("{}.xlsx", DEFAULT_OUTPUT_STEM)));
    assert!(path.exists());

    // 書いたシートを読み戻す
    let table = load_table(&path, Some("Resultado")).unwrap();
    assert_eq!(table.headers, vec!["Id", "Texto", "ResultadoValidacao", "DetalheValidacao"]);
    assert_eq!(table.cell(0, 2), Some("Máscara correta"));
    assert_eq!(table.cell(2, 3), Some("no template defined for this (Cause, Reason)"));
}

#[test]
fn test_export_json_summary() {
    let dir = tempdir().expect("Failed to create temp dir");
    let export = export_table();
    let report = report(&export);

    let path = export::export_results(
        &export,
        &report,
        &ExportFormat::Json,
        &dir.path().join("sub").join("resultado.json"),
        &Config::default(),
        true,
    )
    .unwrap();

    let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(value["summary"]["total"], 3);
    assert_eq!(value["summary"]["matched"], 1);
    assert_eq!(value["summary"]["unfilledPlaceholder"], 1);
    assert_eq!(value["summary"]["missingTemplate"], 1);
    assert_eq!(value["rows"][0]["filled"][0], "chuva");
}
