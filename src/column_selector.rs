//! 対話式の列選択モジュール
//!
//! 列指定がなく、複数列あるファイルのときだけ端末で選ばせる。
//! 端末でない場合（パイプ・CI）は先頭列を使う。

use crate::error::{Result, ValidatorError};
use dialoguer::Select;
use no_show_common::{ColumnSelector, Table};
use std::io::IsTerminal;

/// 列指定を決める
///
/// # Arguments
/// * `table` - 読み込んだテーブル
/// * `given` - CLIで指定された列（`#N` または名前）
/// * `label` - プロンプトに出すファイルの呼び名
pub fn choose_column(table: &Table, given: Option<&str>, label: &str) -> Result<ColumnSelector> {
    if let Some(s) = given {
        return Ok(ColumnSelector::parse(s));
    }

    if table.width() <= 1 || !std::io::stdin().is_terminal() {
        return Ok(ColumnSelector::default());
    }

    select_column_interactive(table, label)
}

/// 各列の先頭の値をプレビューとして付ける
pub fn column_items(table: &Table) -> Vec<String> {
    table
        .headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let sample = table
                .column_values(i)
                .flatten()
                .find(|v| !v.trim().is_empty())
                .map(|v| truncate(v, 40))
                .unwrap_or_default();
            if sample.is_empty() {
                header.clone()
            } else {
                format!("{}  (例: {})", header, sample)
            }
        })
        .collect()
}

fn select_column_interactive(table: &Table, label: &str) -> Result<ColumnSelector> {
    let items = column_items(table);

    let index = Select::new()
        .with_prompt(format!("{}の列を選択してください", label))
        .items(&items)
        .default(0)
        .interact()
        .map_err(|e| ValidatorError::ColumnSelection(e.to_string()))?;

    println!("→ {} を使用", table.headers[index]);
    Ok(ColumnSelector::Index(index))
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        value.to_string()
    } else {
        let head: String = value.chars().take(max_chars).collect();
        format!("{}…", head)
    }
}
