pub mod excel;
pub mod json;

use crate::cli::ExportFormat;
use crate::config::Config;
use crate::error::Result;
use no_show_common::{Status, Table, ValidationReport};
use std::path::{Path, PathBuf};

/// 既定の出力ファイル名（拡張子なし）
pub const DEFAULT_OUTPUT_STEM: &str = "resultado_validacion_no_show";

pub const CAUSE_COLUMN: &str = "Causa_extraida";
pub const REASON_COLUMN: &str = "Motivo_extraido";
pub const MASK_COLUMN: &str = "Mascara_extraida";
pub const RESULT_COLUMN: &str = "ResultadoValidacao";
pub const DETAIL_COLUMN: &str = "DetalheValidacao";

/// 出力用の表（元の列＋判定列）
#[derive(Debug, Clone)]
pub struct ResultSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// 行ごとのステータス（Excelの色分け用）
    pub statuses: Vec<Status>,
}

/// 元のエクスポートの全列の後ろに判定結果の列を追加する
pub fn build_result_sheet(
    export: &Table,
    report: &ValidationReport,
    config: &Config,
    include_extracted: bool,
) -> ResultSheet {
    let mut headers = export.headers.clone();
    if include_extracted {
        headers.extend([CAUSE_COLUMN, REASON_COLUMN, MASK_COLUMN].map(String::from));
    }
    headers.extend([RESULT_COLUMN, DETAIL_COLUMN].map(String::from));

    let mut rows = Vec::with_capacity(report.rows.len());
    let mut statuses = Vec::with_capacity(report.rows.len());

    for (i, classification) in report.rows.iter().enumerate() {
        let mut row = export.rows.get(i).cloned().unwrap_or_default();
        row.resize(export.width(), String::new());

        if include_extracted {
            let parsed = &classification.parsed;
            row.extend([parsed.cause.clone(), parsed.reason.clone(), parsed.mask.clone()]);
        }
        row.push(config.label(classification.result.status).to_string());
        row.push(classification.result.detail_text().to_string());

        rows.push(row);
        statuses.push(classification.result.status);
    }

    ResultSheet {
        headers,
        rows,
        statuses,
    }
}

/// 出力先がディレクトリ（または拡張子なし）なら既定のファイル名を付ける
pub fn output_path_for_format(output: &Path, format: &ExportFormat) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", DEFAULT_OUTPUT_STEM, format.extension()))
    } else {
        output.to_path_buf()
    }
}

pub fn write_csv(sheet: &ResultSheet, output_path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(output_path)?;

    writer.write_record(&sheet.headers)?;
    for row in &sheet.rows {
        writer.write_record(row)?;
    }

    writer.flush()?;
    Ok(())
}

/// 検証結果を指定形式で書き出し、出力パスを返す
pub fn export_results(
    export: &Table,
    report: &ValidationReport,
    format: &ExportFormat,
    output: &Path,
    config: &Config,
    include_extracted: bool,
) -> Result<PathBuf> {
    let output_path = output_path_for_format(output, format);

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    match format {
        ExportFormat::Excel => {
            let sheet = build_result_sheet(export, report, config, include_extracted);
            excel::generate_excel(&sheet, &output_path, &config.sheet_name)?;
        }
        ExportFormat::Csv => {
            let sheet = build_result_sheet(export, report, config, include_extracted);
            write_csv(&sheet, &output_path)?;
        }
        ExportFormat::Json => {
            json::write_json(report, config, &output_path)?;
        }
    }

    tracing::debug!(path = %output_path.display(), "結果を書き出し");
    Ok(output_path)
}
