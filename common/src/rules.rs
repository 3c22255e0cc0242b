//! ルール索引
//!
//! カタログの各行 "Causa. Motivo. MascaraModelo" から
//! 正規化済み (Causa, Motivo) → コンパイル済みテンプレート の対応表を作る。
//! 同じキーが複数回現れた場合は後の行で上書きする（上書きは記録して警告）。

use crate::splitter::split_composite;
use crate::template::{compile_template, CompiledTemplate};
use crate::text::normalize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 照合キー: 正規化済みの (Causa, Motivo)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleKey {
    pub cause: String,
    pub reason: String,
}

impl RuleKey {
    /// 生の Causa/Motivo から正規化してキーを作る
    pub fn new(cause: &str, reason: &str) -> Self {
        Self {
            cause: normalize(cause),
            reason: normalize(reason),
        }
    }
}

impl std::fmt::Display for RuleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.cause, self.reason)
    }
}

/// 索引の1エントリ
#[derive(Debug, Clone)]
pub struct Rule {
    /// カタログ上の行番号（0始まり、ヘッダー除く）
    pub row: usize,
    pub template: CompiledTemplate,
}

/// 上書きされた重複キー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateRule {
    pub key: RuleKey,
    pub first_row: usize,
    pub overwritten_by_row: usize,
}

/// (Causa, Motivo) → テンプレートの索引
///
/// 構築後は読み取り専用。
#[derive(Debug, Clone, Default)]
pub struct RuleIndex {
    rules: HashMap<RuleKey, Rule>,
    duplicates: Vec<DuplicateRule>,
    skipped_rows: usize,
}

impl RuleIndex {
    /// カタログの1列分の値から索引を構築
    ///
    /// 空セル（None / 空白のみ）はルールを作らずスキップする。
    pub fn build<'a, I>(catalog: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut index = Self::default();

        for (row, value) in catalog.into_iter().enumerate() {
            let text = match value {
                Some(v) if !v.trim().is_empty() => v,
                _ => {
                    index.skipped_rows += 1;
                    continue;
                }
            };

            let parsed = split_composite(text);
            let key = RuleKey::new(&parsed.cause, &parsed.reason);
            let template = compile_template(&parsed.mask);

            if let Some(previous) = index.rules.insert(key.clone(), Rule { row, template }) {
                tracing::warn!(
                    key = %key,
                    first_row = previous.row,
                    overwritten_by_row = row,
                    "カタログに重複キー、後の行で上書き"
                );
                index.duplicates.push(DuplicateRule {
                    key,
                    first_row: previous.row,
                    overwritten_by_row: row,
                });
            }
        }

        tracing::debug!(
            rules = index.rules.len(),
            duplicates = index.duplicates.len(),
            skipped = index.skipped_rows,
            "ルール索引を構築"
        );

        index
    }

    /// 文字列スライスから構築（空文字は空セル扱い）
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        Self::build(rows.iter().map(|r| Some(r.as_ref())))
    }

    /// 正規化済みキーで検索
    pub fn lookup(&self, key: &RuleKey) -> Option<&CompiledTemplate> {
        self.rules.get(key).map(|r| &r.template)
    }

    /// 生の Causa/Motivo で検索
    pub fn get(&self, cause: &str, reason: &str) -> Option<&CompiledTemplate> {
        self.lookup(&RuleKey::new(cause, reason))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// キー順に並べたルール一覧
    pub fn iter(&self) -> impl Iterator<Item = (&RuleKey, &Rule)> {
        let mut entries: Vec<_> = self.rules.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }

    /// 上書きされた重複キーの一覧（出現順）
    pub fn duplicates(&self) -> &[DuplicateRule] {
        &self.duplicates
    }

    /// スキップした空セルの数
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_normalization_equivalence() {
        let index = RuleIndex::from_rows(&["Não Agendado. Cliente. Paciente 0000 ausente."]);
        let from_catalog = index.get("Não Agendado.", "Cliente.");
        let from_export = index.get("nao agendado", "CLIENTE");
        assert!(from_catalog.is_some());
        assert!(from_export.is_some());
        assert_eq!(
            from_catalog.map(|t| t.source()),
            from_export.map(|t| t.source())
        );
        assert_eq!(RuleKey::new("Não Agendado.", "x"), RuleKey::new("nao agendado", "x"));
    }

    #[test]
    fn test_last_write_wins() {
        let index = RuleIndex::from_rows(&[
            "Causa. Motivo. Primeiro 0.",
            "Outra. Coisa. 0",
            "causa. MOTIVO. Segundo 0.",
        ]);
        assert_eq!(index.len(), 2);
        let t = index.get("Causa", "Motivo").unwrap();
        assert_eq!(t.source(), "Segundo 0.");
        assert!(t.is_match("Segundo valor."));
        assert!(!t.is_match("Primeiro valor."));

        assert_eq!(
            index.duplicates(),
            &[DuplicateRule {
                key: RuleKey::new("causa", "motivo"),
                first_row: 0,
                overwritten_by_row: 2,
            }]
        );
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let index = RuleIndex::build(vec![
            Some("A. B. 0"),
            None,
            Some("   "),
            Some(""),
        ]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.skipped_rows(), 3);
        assert_eq!(index.iter().next().map(|(_, r)| r.row), Some(0));
    }

    #[test]
    fn test_iter_sorted() {
        let index = RuleIndex::from_rows(&["Z. Z. 0", "A. B. 0", "A. A. 0"]);
        let keys: Vec<String> = index.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["(a, a)", "(a, b)", "(z, z)"]);
    }

    #[test]
    fn test_unparseable_catalog_row_gets_empty_key() {
        let index = RuleIndex::from_rows(&["sem estrutura"]);
        assert!(index.get("", "").is_some());
        assert!(index.get("sem estrutura", "").is_none());
    }
}
