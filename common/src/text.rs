//! テキスト正規化
//!
//! Causa/Motivo をキーとして比較できるよう、アクセント・大小文字・
//! 末尾の句読点・空白の揺れを吸収する。

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    static ref TRAILING_PUNCT_RE: Regex = Regex::new(r"[.;:\s]+$").unwrap();
}

/// 連続する空白を半角スペース1つにまとめ、前後を除去する
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RE.replace_all(s, " ").trim().to_string()
}

/// 結合文字を分解して取り除く（"é" → "e", "ã" → "a"）
pub fn strip_accents(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// キー比較用の正規化
///
/// 1. 小文字化
/// 2. アクセント除去（"İ" の小文字化で生じる結合文字もここで落ちる）
/// 3. 末尾の `.` `;` `:` と空白を除去
/// 4. 空白の連続を1つにまとめて trim
///
/// # Examples
/// ```
/// use no_show_common::normalize;
///
/// assert_eq!(normalize("Não Agendado."), "nao agendado");
/// assert_eq!(normalize("  Técnico   ausente ;: "), "tecnico ausente");
/// ```
pub fn normalize(s: &str) -> String {
    let folded = strip_accents(&s.to_lowercase());
    let stripped = TRAILING_PUNCT_RE.replace(&folded, "");
    collapse_whitespace(&stripped)
}

/// null を空文字として扱う版
pub fn normalize_opt(s: Option<&str>) -> String {
    s.map(normalize).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \t b\n\nc  "), "a b c");
        assert_eq!(collapse_whitespace(""), "");
        assert_eq!(collapse_whitespace(" \n "), "");
    }

    #[test]
    fn test_strip_accents() {
        assert_eq!(strip_accents("Não"), "Nao");
        assert_eq!(strip_accents("Técnico"), "Tecnico");
        assert_eq!(strip_accents("ação çúñ"), "acao cun");
    }

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize("Não Agendado."), "nao agendado");
        assert_eq!(normalize("nao agendado"), "nao agendado");
        assert_eq!(normalize("CLIENTE AUSENTE..."), "cliente ausente");
    }

    #[test]
    fn test_normalize_trailing_punctuation() {
        assert_eq!(normalize("Motivo:"), "motivo");
        assert_eq!(normalize("Motivo ; . :"), "motivo");
        // 途中の句読点は残る
        assert_eq!(normalize("a.b. c"), "a.b. c");
    }

    #[test]
    fn test_normalize_internal_whitespace() {
        assert_eq!(normalize("  Falta   de\tpeça  "), "falta de peca");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" .;: "), "");
        assert_eq!(normalize_opt(None), "");
    }

    #[test]
    fn test_normalize_idempotent() {
        let samples = [
            "Não Agendado.",
            "  ÁÉÍ óú  ;",
            "a . ; b :",
            "Ünïcödé\u{00A0}spaces.",
            "x.",
            "İstanbul",
            "",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "入力: {:?}", s);
        }
    }
}
