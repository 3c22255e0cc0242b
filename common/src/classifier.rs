//! マスク判定
//!
//! 1行ごとに「Máscara correta」か「No-show Técnico」かを判定する。
//! No-show の場合の詳細は次の優先順位で決まる:
//! 1. (Causa, Motivo) に対応するテンプレートがない
//! 2. 未入力の `0` が単独で残っている
//! 3. テンプレートに一致しない

use crate::rules::{RuleIndex, RuleKey};
use crate::splitter::{split_composite, ParsedTriple};
use crate::template::PLACEHOLDER;
use crate::text::collapse_whitespace;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    // 空白・ハイフン（または先頭）の後に単独の 0 の連続、その後が終端か区切り
    static ref UNFILLED_RE: Regex = Regex::new(r"(?:^|[\s-])0+(?:$|[\s.,;:-])").unwrap();
}

/// 判定ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    /// Máscara correta
    MatchOk,
    /// No-show Técnico
    NoShowTechnical,
}

impl Status {
    /// 既定の表示ラベル
    pub fn default_label(&self) -> &'static str {
        match self {
            Status::MatchOk => "Máscara correta",
            Status::NoShowTechnical => "No-show Técnico",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.default_label())
    }
}

/// No-show の理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Detail {
    MissingTemplate,
    UnfilledPlaceholder,
    TemplateMismatch,
}

impl Detail {
    pub fn message(&self) -> &'static str {
        match self {
            Detail::MissingTemplate => "no template defined for this (Cause, Reason)",
            Detail::UnfilledPlaceholder => "contains an unfilled placeholder ('0')",
            Detail::TemplateMismatch => "does not match the expected template",
        }
    }
}

impl std::fmt::Display for Detail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// 1行分の判定結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub status: Status,
    /// MatchOk のときは None
    pub detail: Option<Detail>,
}

impl ClassificationResult {
    pub fn matched() -> Self {
        Self {
            status: Status::MatchOk,
            detail: None,
        }
    }

    pub fn no_show(detail: Detail) -> Self {
        Self {
            status: Status::NoShowTechnical,
            detail: Some(detail),
        }
    }

    pub fn is_match(&self) -> bool {
        self.status == Status::MatchOk
    }

    /// 詳細メッセージ（一致時は空文字）
    pub fn detail_text(&self) -> &'static str {
        self.detail.map(|d| d.message()).unwrap_or("")
    }
}

/// 分解・判定・プレースホルダ値をまとめたもの
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub parsed: ParsedTriple,
    pub result: ClassificationResult,
    /// テンプレートのプレースホルダに入っていた値（一致時のみ）
    pub filled: Vec<String>,
}

/// マスクに未入力の `0` が残っているか（診断用のヒューリスティック）
pub fn contains_unfilled_placeholder(mask: &str) -> bool {
    UNFILLED_RE.is_match(mask)
}

/// プレースホルダがそのまま残った値か（"0", "0000" など）
///
/// 判定に使うのは正規表現の最左・最短の割り当て1通りだけで、別の割り当てなら
/// 全部の隙間が埋まる場合も見ない。例えばテンプレート `0 x 0` に対する
/// `0 x 0 x y` は `"0" | "0 x y"` と割り当てられ、未入力扱いになる
/// （`"0 x 0" | "y"` とは読まない）。
fn is_placeholder_run(value: &str) -> bool {
    let v = value.trim();
    !v.is_empty() && v.chars().all(|c| c == PLACEHOLDER)
}

/// 1セルの文字列を判定する
pub fn classify(text: &str, index: &RuleIndex) -> ClassificationResult {
    classify_detailed(text, index).result
}

/// null を空文字として扱う版
pub fn classify_opt(text: Option<&str>, index: &RuleIndex) -> ClassificationResult {
    classify(text.unwrap_or_default(), index)
}

/// 分解結果とプレースホルダ値も含めて判定する
pub fn classify_detailed(text: &str, index: &RuleIndex) -> Classification {
    let parsed = split_composite(text);
    let key = RuleKey::new(&parsed.cause, &parsed.reason);
    let mask = collapse_whitespace(&parsed.mask);

    let template = match index.lookup(&key) {
        Some(t) => t,
        None => {
            return Classification {
                parsed,
                result: ClassificationResult::no_show(Detail::MissingTemplate),
                filled: Vec::new(),
            }
        }
    };

    // 隙間が 0 のままなら一致とはみなさない
    let filled = template
        .captures(&mask)
        .filter(|values| !values.iter().any(|v| is_placeholder_run(v)));

    if let Some(filled) = filled {
        return Classification {
            parsed,
            result: ClassificationResult::matched(),
            filled,
        };
    }

    let detail = if contains_unfilled_placeholder(&mask) {
        Detail::UnfilledPlaceholder
    } else {
        Detail::TemplateMismatch
    };

    Classification {
        parsed,
        result: ClassificationResult::no_show(detail),
        filled: Vec::new(),
    }
}
