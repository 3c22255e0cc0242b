//! 表形式データと列指定
//!
//! ファイル読み込みは呼び出し側の責務。ここではヘッダー行＋データ行の
//! 文字列テーブルとして受け取る。

use crate::error::{Error, Result};
use crate::text::normalize;
use serde::{Deserialize, Serialize};

/// 文字列テーブル（1行目がヘッダー）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// 1列だけのテーブルを作る
    pub fn single_column(header: &str, values: &[&str]) -> Self {
        Self {
            headers: vec![header.to_string()],
            rows: values.iter().map(|v| vec![v.to_string()]).collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// セル値（存在しないセルは None）
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// 指定列の値を行順に返す（欠けたセルは None）
    pub fn column_values(&self, col: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.rows.iter().map(move |r| r.get(col).map(String::as_str))
    }
}

/// 列の指定方法
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnSelector {
    /// 0始まりの列番号
    Index(usize),
    /// ヘッダー名
    Name(String),
}

impl Default for ColumnSelector {
    fn default() -> Self {
        ColumnSelector::Index(0)
    }
}

impl ColumnSelector {
    /// CLI表記をパース: `#N`（1始まり）は列番号、それ以外はヘッダー名
    pub fn parse(s: &str) -> Self {
        if let Some(n) = s.strip_prefix('#').and_then(|n| n.parse::<usize>().ok()) {
            if n >= 1 {
                return ColumnSelector::Index(n - 1);
            }
        }
        ColumnSelector::Name(s.to_string())
    }

    /// ヘッダーから列番号を解決する
    ///
    /// 名前は完全一致を優先し、なければ正規化後の一致を探す。
    pub fn resolve(&self, headers: &[String]) -> Result<usize> {
        if headers.is_empty() {
            return Err(Error::EmptyTable);
        }

        match self {
            ColumnSelector::Index(i) if *i < headers.len() => Ok(*i),
            ColumnSelector::Index(i) => Err(Error::ColumnIndexOutOfRange {
                index: *i,
                width: headers.len(),
            }),
            ColumnSelector::Name(name) => {
                if let Some(i) = headers.iter().position(|h| h == name) {
                    return Ok(i);
                }
                let wanted = normalize(name);
                headers
                    .iter()
                    .position(|h| normalize(h) == wanted)
                    .ok_or_else(|| Error::ColumnNotFound(name.clone()))
            }
        }
    }
}

impl std::fmt::Display for ColumnSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnSelector::Index(i) => write!(f, "#{}", i + 1),
            ColumnSelector::Name(name) => write!(f, "{}", name),
        }
    }
}
