//! 1列形式 "Causa. Motivo. Mascara..." の分解
//!
//! 抽出優先順位:
//! 1. 正規表現（先頭2つのセグメントは最短一致）
//! 2. `.` での単純分割（3つ以上に分かれる場合のみ）
//! 3. 分解不能 → 全体をマスクとして扱う

use crate::text::collapse_whitespace;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref COMPOSITE_RE: Regex = Regex::new(r"^(.*?\.)\s+(.*?\.)\s+(.*)$").unwrap();
}

/// 分解結果
///
/// `cause` と `reason` は末尾の `.` を含む。
/// 分解できなかった場合は両方とも空で、`mask` に入力全体が入る。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTriple {
    pub cause: String,
    pub reason: String,
    pub mask: String,
}

/// 1セルの文字列を (Causa, Motivo, Mascara) に分解する
///
/// # Examples
/// ```
/// use no_show_common::split_composite;
///
/// let t = split_composite("Cliente ausente. Sem contato. Tentativa 1. Ligação 2.");
/// assert_eq!(t.cause, "Cliente ausente.");
/// assert_eq!(t.reason, "Sem contato.");
/// assert_eq!(t.mask, "Tentativa 1. Ligação 2.");
/// ```
pub fn split_composite(value: &str) -> ParsedTriple {
    let txt = collapse_whitespace(value);

    if let Some(caps) = COMPOSITE_RE.captures(&txt) {
        return ParsedTriple {
            cause: caps[1].trim().to_string(),
            reason: caps[2].trim().to_string(),
            mask: caps[3].trim().to_string(),
        };
    }

    // 正規表現に合わない場合（". " の区切りが2つ未満）
    let parts: Vec<&str> = txt.split('.').map(str::trim).collect();
    if parts.len() >= 3 {
        return ParsedTriple {
            cause: format!("{}.", parts[0]),
            reason: format!("{}.", parts[1]),
            mask: parts[2..].join(".").trim().to_string(),
        };
    }

    ParsedTriple {
        cause: String::new(),
        reason: String::new(),
        mask: txt,
    }
}

/// null を空文字として扱う版
pub fn split_composite_opt(value: Option<&str>) -> ParsedTriple {
    split_composite(value.unwrap_or_default())
}
