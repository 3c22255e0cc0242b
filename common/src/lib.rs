//! No-show Validator Common Library
//!
//! 1列形式 "Causa. Motivo. Mascara..." のマスクを、カタログのマスクモデルと
//! 照合する判定エンジン。ファイル入出力は持たない。
//!
//! ## 処理フロー
//! 1. カタログ各行を分解し、正規化キー → コンパイル済みテンプレートの索引を構築
//! 2. エクスポート各行を分解・正規化して索引を引く
//! 3. マスクがテンプレートに一致すれば「Máscara correta」、それ以外は「No-show Técnico」

pub mod classifier;
pub mod error;
pub mod rules;
pub mod splitter;
pub mod table;
pub mod template;
pub mod text;
pub mod validate;

pub use classifier::{
    classify, classify_detailed, classify_opt, contains_unfilled_placeholder, Classification,
    ClassificationResult, Detail, Status,
};
pub use error::{Error, Result};
pub use rules::{DuplicateRule, Rule, RuleIndex, RuleKey};
pub use splitter::{split_composite, split_composite_opt, ParsedTriple};
pub use table::{ColumnSelector, Table};
pub use template::{compile_template, compile_template_opt, CompiledTemplate, PLACEHOLDER};
pub use text::{collapse_whitespace, normalize, normalize_opt};
pub use validate::{
    classify_all, validate, validate_tables, validate_with_index, ValidationOptions,
    ValidationReport, ValidationSummary,
};
