//! JSON出力
//!
//! 行ごとの抽出値・判定・プレースホルダ値と集計をまとめて出す。

use crate::config::Config;
use crate::error::Result;
use no_show_common::{DuplicateRule, ValidationReport, ValidationSummary};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonRow<'a> {
    /// 1始まりのデータ行番号
    pub row: usize,
    pub cause: &'a str,
    pub reason: &'a str,
    pub mask: &'a str,
    pub status: &'a str,
    pub detail: &'a str,
    #[serde(skip_serializing_if = "is_empty")]
    pub filled: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonPayload<'a> {
    pub generated_at: String,
    pub summary: &'a ValidationSummary,
    pub duplicates: &'a [DuplicateRule],
    pub rows: Vec<JsonRow<'a>>,
}

fn is_empty(values: &&[String]) -> bool {
    values.is_empty()
}

pub fn build_payload<'a>(report: &'a ValidationReport, config: &'a Config) -> JsonPayload<'a> {
    let rows = report
        .rows
        .iter()
        .enumerate()
        .map(|(i, c)| JsonRow {
            row: i + 1,
            cause: &c.parsed.cause,
            reason: &c.parsed.reason,
            mask: &c.parsed.mask,
            status: config.label(c.result.status),
            detail: c.result.detail_text(),
            filled: &c.filled,
        })
        .collect();

    JsonPayload {
        generated_at: chrono::Local::now().to_rfc3339(),
        summary: &report.summary,
        duplicates: &report.duplicates,
        rows,
    }
}

pub fn write_json(report: &ValidationReport, config: &Config, output_path: &Path) -> Result<()> {
    let payload = build_payload(report, config);
    let json = serde_json::to_string_pretty(&payload)?;
    std::fs::write(output_path, json)?;
    Ok(())
}
