//! 検証パイプライン
//!
//! カタログからルール索引を1回だけ構築し、エクスポートの各行を入力順に判定する。
//! 行ごとの判定は独立しているため、行数が多い場合は並列に処理する
//! （結果の順序・内容は逐次処理と同一）。

use crate::classifier::{classify_detailed, Classification, ClassificationResult, Detail, Status};
use crate::error::Result;
use crate::rules::{DuplicateRule, RuleIndex};
use crate::table::{ColumnSelector, Table};
use serde::{Deserialize, Serialize};

/// 検証オプション
#[derive(Debug, Clone)]
pub struct ValidationOptions {
    /// この行数以上なら並列処理（feature "parallel" 有効時）
    pub parallel_threshold: usize,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            parallel_threshold: 2048,
        }
    }
}

/// 集計
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub total: usize,
    pub matched: usize,
    pub no_show: usize,
    pub missing_template: usize,
    pub unfilled_placeholder: usize,
    pub template_mismatch: usize,
    /// 索引のルール数
    pub rules: usize,
    pub duplicate_keys: usize,
}

impl ValidationSummary {
    pub fn from_results<'a, I>(results: I, index: &RuleIndex) -> Self
    where
        I: IntoIterator<Item = &'a ClassificationResult>,
    {
        let mut summary = Self {
            rules: index.len(),
            duplicate_keys: index.duplicates().len(),
            ..Default::default()
        };

        for result in results {
            summary.total += 1;
            match result.status {
                Status::MatchOk => summary.matched += 1,
                Status::NoShowTechnical => summary.no_show += 1,
            }
            match result.detail {
                Some(Detail::MissingTemplate) => summary.missing_template += 1,
                Some(Detail::UnfilledPlaceholder) => summary.unfilled_placeholder += 1,
                Some(Detail::TemplateMismatch) => summary.template_mismatch += 1,
                None => {}
            }
        }

        summary
    }

    /// 一致率（0.0〜1.0、行がなければ 0.0）
    pub fn match_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.matched as f64 / self.total as f64
    }
}

/// 検証結果一式
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// エクスポートの行順
    pub rows: Vec<Classification>,
    pub summary: ValidationSummary,
    pub duplicates: Vec<DuplicateRule>,
}

impl ValidationReport {
    pub fn results(&self) -> impl Iterator<Item = &ClassificationResult> {
        self.rows.iter().map(|r| &r.result)
    }
}

/// 汎用エントリポイント
///
/// カタログとエクスポートは別々の行型でよい。`catalog_text` / `export_text` で
/// 各行から複合テキストを取り出す（None は空文字扱い）。
///
/// # Examples
/// ```
/// use no_show_common::{validate, Status};
///
/// struct Export { id: u32, texto: Option<String> }
///
/// let catalog = vec!["Causa. Motivo. Nome: 0"];
/// let export = vec![
///     Export { id: 1, texto: Some("causa. motivo. Nome: Ana".into()) },
///     Export { id: 2, texto: Some("causa. motivo. Nome: 0".into()) },
/// ];
/// let results = validate(&catalog, |r| Some(*r), &export, |r| r.texto.as_deref());
/// assert_eq!(export[0].id, 1);
/// assert_eq!(results[0].status, Status::MatchOk);
/// assert_eq!(results[1].status, Status::NoShowTechnical);
/// ```
pub fn validate<C, E, FC, FE>(
    catalog_rows: &[C],
    catalog_text: FC,
    export_rows: &[E],
    export_text: FE,
) -> Vec<ClassificationResult>
where
    FC: Fn(&C) -> Option<&str>,
    FE: Fn(&E) -> Option<&str>,
{
    let index = RuleIndex::build(catalog_rows.iter().map(catalog_text));
    classify_all(
        export_rows.iter().map(export_text).collect(),
        &index,
        &ValidationOptions::default(),
    )
    .into_iter()
    .map(|c| c.result)
    .collect()
}

/// テーブル同士の検証
pub fn validate_tables(
    catalog: &Table,
    catalog_column: &ColumnSelector,
    export: &Table,
    export_column: &ColumnSelector,
    options: &ValidationOptions,
) -> Result<ValidationReport> {
    let catalog_col = catalog_column.resolve(&catalog.headers)?;
    let export_col = export_column.resolve(&export.headers)?;

    let index = RuleIndex::build(catalog.column_values(catalog_col));
    Ok(validate_with_index(
        export.column_values(export_col).collect(),
        &index,
        options,
    ))
}

/// 構築済みの索引で検証
pub fn validate_with_index(
    texts: Vec<Option<&str>>,
    index: &RuleIndex,
    options: &ValidationOptions,
) -> ValidationReport {
    let rows = classify_all(texts, index, options);
    let summary = ValidationSummary::from_results(rows.iter().map(|r| &r.result), index);

    tracing::info!(
        total = summary.total,
        matched = summary.matched,
        no_show = summary.no_show,
        "検証完了"
    );

    ValidationReport {
        rows,
        summary,
        duplicates: index.duplicates().to_vec(),
    }
}

/// 全行を判定（入力順を保持）
pub fn classify_all(
    texts: Vec<Option<&str>>,
    index: &RuleIndex,
    options: &ValidationOptions,
) -> Vec<Classification> {
    if texts.len() >= options.parallel_threshold {
        if let Some(rows) = classify_parallel(&texts, index) {
            return rows;
        }
    }

    texts
        .iter()
        .map(|text| classify_detailed(text.unwrap_or_default(), index))
        .collect()
}

#[cfg(feature = "parallel")]
fn classify_parallel(texts: &[Option<&str>], index: &RuleIndex) -> Option<Vec<Classification>> {
    use rayon::prelude::*;

    tracing::debug!(rows = texts.len(), "並列判定");
    Some(
        texts
            .par_iter()
            .map(|text| classify_detailed(text.unwrap_or_default(), index))
            .collect(),
    )
}

#[cfg(not(feature = "parallel"))]
fn classify_parallel(_texts: &[Option<&str>], _index: &RuleIndex) -> Option<Vec<Classification>> {
    None
}
