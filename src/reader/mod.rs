//! 入力ファイル読み込み
//!
//! 拡張子で形式を判定し、1行目をヘッダーとした文字列テーブルを返す。

mod delimited;
mod workbook;

use crate::error::{Result, ValidatorError};
use no_show_common::Table;
use std::path::Path;

pub use delimited::{decode_utf8_or_windows_1252, sniff_delimiter, table_from_csv_str};
pub use workbook::{sheet_names, table_from_range};

const EXCEL_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];
const CSV_EXTENSIONS: &[&str] = &["csv", "tsv", "txt"];

/// 入力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Excel,
    Csv,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if EXCEL_EXTENSIONS.contains(&ext.as_str()) {
            Ok(InputFormat::Excel)
        } else if CSV_EXTENSIONS.contains(&ext.as_str()) {
            Ok(InputFormat::Csv)
        } else {
            Err(ValidatorError::UnsupportedFormat(path.display().to_string()))
        }
    }
}

/// ファイルを読み込んでテーブルにする
///
/// # Arguments
/// * `path` - 入力ファイル
/// * `sheet` - Excelのシート名（省略時は先頭シート、CSVでは無視）
pub fn load_table(path: &Path, sheet: Option<&str>) -> Result<Table> {
    if !path.exists() {
        return Err(ValidatorError::FileNotFound(path.display().to_string()));
    }

    let table = match InputFormat::from_path(path)? {
        InputFormat::Excel => workbook::load(path, sheet)?,
        InputFormat::Csv => delimited::load(path)?,
    };

    tracing::debug!(
        path = %path.display(),
        columns = table.width(),
        rows = table.len(),
        "テーブルを読み込み"
    );

    Ok(table)
}

/// ヘッダー行とデータ行に分け、短い行をヘッダー幅まで空文字で埋める
pub(crate) fn into_table(mut records: Vec<Vec<String>>) -> Table {
    if records.is_empty() {
        return Table::default();
    }

    let headers = records.remove(0);
    let width = records
        .iter()
        .map(Vec::len)
        .max()
        .unwrap_or(0)
        .max(headers.len());

    let mut headers = headers;
    // ヘッダーが足りない列には仮の名前を振る
    for i in headers.len()..width {
        headers.push(format!("Unnamed: {}", i));
    }

    let rows = records
        .into_iter()
        .map(|mut r| {
            r.resize(width, String::new());
            r
        })
        .collect();

    Table::new(headers, rows)
}
