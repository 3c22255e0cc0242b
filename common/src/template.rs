//! マスクモデル（テンプレート）のコンパイル
//!
//! カタログのマスクでは `0` の連続が「プレースホルダ」（プロバイダが埋める箇所）。
//! 固定部分はリテラルとして扱い、プレースホルダ1つにつき最短一致の
//! ワイルドカード `(.+?)` を1つ割り当てる。
//!
//! ## 変換例
//! `Paciente 0000 ausente.` → `(?is)^\s*Paciente\s+(.+?)\s+ausente\.\s*$`

use crate::text::collapse_whitespace;
use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

/// プレースホルダ文字
pub const PLACEHOLDER: char = '0';

/// 生成する正規表現のサイズ上限（regexクレートの既定値と同じ）
pub const DEFAULT_SIZE_LIMIT: usize = 10 * (1 << 20);

const GAP: &str = "(.+?)";

lazy_static! {
    static ref PLACEHOLDER_RUN_RE: Regex = Regex::new("0+").unwrap();
}

/// マッチ方式
#[derive(Debug, Clone)]
enum Matcher {
    /// プレースホルダをワイルドカード化したパターン
    Pattern(Regex),
    /// パターン生成に失敗した場合: テンプレート全体のリテラル一致
    Literal(Regex),
    /// リテラルの正規表現すら作れない場合: 大小文字を無視した文字列比較
    Exact(String),
}

/// コンパイル済みテンプレート
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    source: String,
    matcher: Matcher,
}

impl CompiledTemplate {
    /// 空白を畳んだ元テンプレート
    pub fn source(&self) -> &str {
        &self.source
    }

    /// 生成された正規表現（文字列比較の場合は None）
    pub fn pattern(&self) -> Option<&str> {
        match &self.matcher {
            Matcher::Pattern(re) | Matcher::Literal(re) => Some(re.as_str()),
            Matcher::Exact(_) => None,
        }
    }

    /// リテラル一致にフォールバックしたか
    pub fn is_fallback(&self) -> bool {
        !matches!(self.matcher, Matcher::Pattern(_))
    }

    /// プレースホルダの数（フォールバック時は 0）
    pub fn placeholder_count(&self) -> usize {
        match &self.matcher {
            Matcher::Pattern(re) => re.captures_len() - 1,
            _ => 0,
        }
    }

    /// テキスト全体がテンプレートに一致するか
    pub fn is_match(&self, text: &str) -> bool {
        match &self.matcher {
            Matcher::Pattern(re) | Matcher::Literal(re) => re.is_match(text),
            Matcher::Exact(expected) => collapse_whitespace(text).to_lowercase() == *expected,
        }
    }

    /// 一致した場合、プレースホルダに入った値を順に返す
    pub fn captures(&self, text: &str) -> Option<Vec<String>> {
        match &self.matcher {
            Matcher::Pattern(re) => re.captures(text).map(|caps| {
                caps.iter()
                    .skip(1)
                    .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                    .collect()
            }),
            _ => self.is_match(text).then(Vec::new),
        }
    }
}

/// テンプレートを固定部分に分割する
///
/// 先頭・末尾がプレースホルダなら、その側に空の固定部分ができる。
pub fn fixed_segments(template: &str) -> Vec<&str> {
    PLACEHOLDER_RUN_RE.split(template).collect()
}

/// 固定部分の空白を `\s+` にしつつ、それ以外をエスケープ
fn escape_segment(segment: &str) -> String {
    segment
        .split(' ')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}

/// テンプレート本体の正規表現（アンカー・フラグなし）を組み立てる
pub fn template_body(template: &str) -> String {
    let t = collapse_whitespace(template);
    fixed_segments(&t)
        .into_iter()
        .map(escape_segment)
        .collect::<Vec<_>>()
        .join(GAP)
}

/// テンプレートをコンパイル（失敗しない）
pub fn compile_template(template: &str) -> CompiledTemplate {
    compile_template_with_limit(template, DEFAULT_SIZE_LIMIT)
}

/// null を空文字として扱う版
pub fn compile_template_opt(template: Option<&str>) -> CompiledTemplate {
    compile_template(template.unwrap_or_default())
}

/// サイズ上限を指定してコンパイル
pub fn compile_template_with_limit(template: &str, size_limit: usize) -> CompiledTemplate {
    let source = collapse_whitespace(template);
    let pattern = format!(r"^\s*{}\s*$", template_body(&source));

    let matcher = match RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .size_limit(size_limit)
        .build()
    {
        Ok(re) => Matcher::Pattern(re),
        Err(e) => {
            tracing::debug!(template = %source, error = %e, "テンプレートのパターン生成に失敗、リテラル一致に切り替え");
            literal_matcher(&source, size_limit)
        }
    };

    CompiledTemplate { source, matcher }
}

fn literal_matcher(source: &str, size_limit: usize) -> Matcher {
    let pattern = format!(r"^\s*{}\s*$", escape_segment(source));
    match RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .size_limit(size_limit)
        .build()
    {
        Ok(re) => Matcher::Literal(re),
        Err(e) => {
            tracing::debug!(template = %source, error = %e, "リテラル正規表現も生成できないため文字列比較を使用");
            Matcher::Exact(source.to_lowercase())
        }
    }
}
